use crate::infra::DockerComposeAdapter;
use crate::infra::config::{
    self, default_config_dir, ensure_config_dir, install_default_config,
};
use crate::services::ProvisionService;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub fn install(config_dir: &Path) -> Result<()> {
    info!("Preparando config em {:?}", config_dir);

    ensure_config_dir(config_dir)?;
    install_default_config(config_dir)?;

    info!(
        "Config pronto. Ajuste sitebox.toml conforme necessário (padrão: {:?})",
        default_config_dir()
    );

    Ok(())
}

pub fn doctor(config_dir: &Path) -> Result<()> {
    let app_config = config::load_app_config(config_dir)?;
    let packages = app_config
        .provision
        .packages
        .context("packages não definido na config")?;

    let runtime = Arc::new(DockerComposeAdapter::new());
    let provision = ProvisionService::new(runtime);
    provision.doctor(&packages, config_dir)
}
