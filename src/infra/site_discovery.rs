use crate::domain::{COMPOSE_FILE_NAME, Site};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Discovers managed sites under the configured sites root
pub struct SiteDiscovery {
    base_dir: PathBuf,
}

impl SiteDiscovery {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Lists all sites (directories with a compose descriptor)
    ///
    /// Scans the base directory for subdirectories containing a
    /// docker-compose.yml file. Only direct children are scanned.
    pub fn discover_all(&self) -> Result<Vec<Site>> {
        let mut sites = Vec::new();

        if !self.base_dir.exists() {
            return Ok(sites);
        }

        let entries = fs::read_dir(&self.base_dir)
            .with_context(|| format!("lendo diretório de sites {:?}", self.base_dir))?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            if !path.is_dir() {
                continue;
            }

            if !path.join(COMPOSE_FILE_NAME).exists() {
                debug!("Ignorando {:?} - não possui descriptor", path.file_name());
                continue;
            }

            match Site::from_dir(&path) {
                Ok(site) => {
                    debug!("Site encontrado: {}", site.name);
                    sites.push(site);
                }
                Err(e) => {
                    debug!("Ignorando {:?}: {}", path.file_name(), e);
                    // Continua descobrindo outros sites mesmo se um falhar
                }
            }
        }

        sites.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(sites)
    }

    /// Finds a specific site by name
    pub fn find_site(&self, name: &str) -> Result<Option<Site>> {
        let sites = self.discover_all()?;
        Ok(sites.into_iter().find(|s| s.name == name))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}
