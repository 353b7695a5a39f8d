use crate::domain::ComposeRuntime;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Dependency probing and installation through the system package installer
pub struct ProvisionService {
    runtime: Arc<dyn ComposeRuntime>,
}

impl ProvisionService {
    pub fn new(runtime: Arc<dyn ComposeRuntime>) -> Self {
        Self { runtime }
    }

    /// Installs every package whose command is not available
    pub fn ensure_installed(&self, packages: &[String]) -> Result<()> {
        for package in packages {
            if self.runtime.is_command_available(package) {
                debug!("{} disponível", package);
                continue;
            }

            info!("Dependência {} ausente, instalando...", package);
            self.runtime.install_package(package)?;
        }

        Ok(())
    }

    /// Report-only probe of dependencies and config directory
    pub fn doctor(&self, packages: &[String], config_dir: &Path) -> Result<()> {
        println!("🔍 Checando dependências e configuração...");

        for package in packages {
            if self.runtime.is_command_available(package) {
                println!("✅ {package} disponível");
            } else {
                println!("⚠️  {package} não encontrado no PATH");
            }
        }

        if config_dir.exists() {
            println!("✅ Diretório de config: {:?}", config_dir);
        } else {
            println!(
                "⚠️  Diretório de config ausente em {:?} (use sitebox setup)",
                config_dir
            );
        }

        Ok(())
    }
}
