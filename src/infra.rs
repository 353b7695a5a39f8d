pub mod compose_adapter;
pub mod config;
pub mod hosts;
pub mod site_discovery;

pub use compose_adapter::DockerComposeAdapter;
pub use site_discovery::SiteDiscovery;
