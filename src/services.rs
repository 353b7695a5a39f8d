mod orchestrator;
mod provision_service;
mod site_service;

pub use orchestrator::Orchestrator;
pub use provision_service::ProvisionService;
pub use site_service::SiteService;
