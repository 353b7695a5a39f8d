use crate::domain::{Site, SiteState, compose};
use crate::infra::hosts;
use crate::services::{ProvisionService, SiteService};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Orchestrates the full site workflows: provisioning, scaffold, compose
/// lifecycle and hosts registration
pub struct Orchestrator {
    site_service: Arc<SiteService>,
    provision_service: Arc<ProvisionService>,
    hosts_path: PathBuf,
    packages: Vec<String>,
}

impl Orchestrator {
    pub fn new(
        site_service: Arc<SiteService>,
        provision_service: Arc<ProvisionService>,
        hosts_path: PathBuf,
        packages: Vec<String>,
    ) -> Self {
        Self {
            site_service,
            provision_service,
            hosts_path,
            packages,
        }
    }

    /// Creates a site: dependencies, directory + descriptor, containers and
    /// hosts entry, in that order
    pub fn create_site(&self, site: &Site, descriptor: &str) -> Result<()> {
        self.provision_service.ensure_installed(&self.packages)?;

        info!("Criando site {} em {:?}...", site.name, site.path);
        self.site_service.scaffold(site, descriptor)?;
        self.site_service.up(site)?;

        // O site já está no ar; falha no hosts não desfaz o trabalho
        if let Err(e) = hosts::register(&self.hosts_path, site.hostname()) {
            warn!(
                "Falha ao registrar {} em {:?}: {}",
                site.hostname(),
                self.hosts_path,
                e
            );
            println!(
                "💡 Adicione manualmente ao hosts: {}",
                hosts::hosts_line(site.hostname())
            );
        }

        println!("🚀 Site no ar! Abra {} no navegador.", site.url());
        Ok(())
    }

    pub fn enable_site(&self, site: &Site) -> Result<()> {
        self.ensure_site_exists(site)?;
        self.site_service.up(site)
    }

    pub fn disable_site(&self, site: &Site) -> Result<()> {
        self.ensure_site_exists(site)?;
        self.site_service.stop(site)
    }

    /// Removes containers, the site directory and the hosts entry,
    /// continuing past non-fatal failures
    pub fn delete_site(&self, site: &Site) -> Result<()> {
        self.ensure_site_exists(site)?;

        info!("Removendo site {}...", site.name);

        if let Err(e) = self.site_service.down(site) {
            error!("Falha ao derrubar containers de {}: {}", site.name, e);
        }

        fs::remove_dir_all(&site.path).with_context(|| format!("removendo {:?}", site.path))?;

        if let Err(e) = hosts::unregister(&self.hosts_path, site.hostname()) {
            warn!(
                "Falha ao remover {} de {:?}: {}",
                site.hostname(),
                self.hosts_path,
                e
            );
        }

        println!("✅ Site {} removido", site.name);
        Ok(())
    }

    pub fn status(&self, sites: &[Site]) -> Result<()> {
        println!("📦 Status dos sites:");
        let mut missing = false;

        for site in sites {
            let state = match self.site_service.get_state(site)? {
                SiteState::Running => "no ar",
                SiteState::Stopped => "parado",
                SiteState::NotCreated => {
                    missing = true;
                    "não criado"
                }
            };

            let services = match compose::load_compose_file(&site.compose_path()) {
                Ok(compose) => compose.service_names().join(", "),
                Err(_) => "?".to_string(),
            };

            println!("- {:<12} | {:<10} | {}", site.name, state, services);
        }

        if missing {
            println!("⚠️  Há sites sem containers. Rode 'sitebox enable <site>'.");
        }

        Ok(())
    }

    fn ensure_site_exists(&self, site: &Site) -> Result<()> {
        if !site.compose_path().exists() {
            bail!(
                "Site '{}' não encontrado em {:?}. Rode 'sitebox create {}' primeiro.",
                site.name,
                site.path,
                site.name
            );
        }

        Ok(())
    }
}
