use crate::domain::{ComposeRuntime, Site};
use crate::infra::config;
use crate::infra::{DockerComposeAdapter, SiteDiscovery};
use crate::services::{Orchestrator, ProvisionService, SiteService};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Façade wiring config, services and the compose runtime for the site
/// commands
pub struct Sites {
    config_dir: PathBuf,
    sites_root: PathBuf,
    orchestrator: Orchestrator,
}

impl Sites {
    pub fn new(config_dir: &Path) -> Result<Self> {
        Self::with_runtime(config_dir, Arc::new(DockerComposeAdapter::new()))
    }

    /// Builds the façade with an injected runtime (used by tests)
    pub fn with_runtime(config_dir: &Path, runtime: Arc<dyn ComposeRuntime>) -> Result<Self> {
        let app_config = config::load_app_config(config_dir)?;

        let sites_root = app_config
            .paths
            .sites_root
            .context("sites_root não definido na config")?;
        let hosts_path = app_config
            .paths
            .hosts_file
            .context("hosts_file não definido na config")?;
        let packages = app_config
            .provision
            .packages
            .context("packages não definido na config")?;

        let site_service = Arc::new(SiteService::new(runtime.clone()));
        let provision_service = Arc::new(ProvisionService::new(runtime));
        let orchestrator = Orchestrator::new(site_service, provision_service, hosts_path, packages);

        Ok(Self {
            config_dir: config_dir.to_path_buf(),
            sites_root,
            orchestrator,
        })
    }

    pub fn create(&self, name: &str) -> Result<()> {
        let site = Site::new(name, &self.sites_root)?;
        let descriptor = config::compose_template(&self.config_dir)?;
        self.orchestrator.create_site(&site, &descriptor)
    }

    pub fn enable(&self, name: Option<&str>) -> Result<()> {
        let site = self.resolve_site(name)?;
        self.orchestrator.enable_site(&site)
    }

    pub fn disable(&self, name: Option<&str>) -> Result<()> {
        let site = self.resolve_site(name)?;
        self.orchestrator.disable_site(&site)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let site = Site::new(name, &self.sites_root)?;
        self.orchestrator.delete_site(&site)
    }

    pub fn status(&self, name: Option<&str>) -> Result<()> {
        let sites = match name {
            Some(name) => vec![Site::new(name, &self.sites_root)?],
            None => SiteDiscovery::new(self.sites_root.clone()).discover_all()?,
        };

        if sites.is_empty() {
            println!("⚠️  Nenhum site encontrado em {:?}", self.sites_root);
            return Ok(());
        }

        self.orchestrator.status(&sites)
    }

    /// Sem nome explícito, o diretório atual é tratado como o site
    fn resolve_site(&self, name: Option<&str>) -> Result<Site> {
        match name {
            Some(name) => Site::new(name, &self.sites_root),
            None => {
                let cwd = std::env::current_dir().context("lendo diretório atual")?;
                Site::from_dir(&cwd)
            }
        }
    }
}
