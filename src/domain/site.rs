use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

pub const COMPOSE_FILE_NAME: &str = "docker-compose.yml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteState {
    Running,
    Stopped,
    NotCreated,
}

/// Represents a managed site: one directory, one compose project, one hostname
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// Site name (directory name, hostname and compose project name)
    pub name: String,
    /// Absolute or root-relative path to the site directory
    pub path: PathBuf,
}

impl Site {
    pub fn new(name: &str, sites_root: &Path) -> Result<Self> {
        validate_site_name(name)?;
        Ok(Self {
            name: name.to_string(),
            path: sites_root.join(name),
        })
    }

    /// Builds a Site from an existing directory (name taken from the last path component)
    pub fn from_dir(path: &Path) -> Result<Self> {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => bail!("Diretório {:?} não tem um nome de site válido", path),
        };

        validate_site_name(&name)?;

        Ok(Self {
            name,
            path: path.to_path_buf(),
        })
    }

    /// Hostname registered for this site
    pub fn hostname(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.name)
    }

    pub fn compose_path(&self) -> PathBuf {
        self.path.join(COMPOSE_FILE_NAME)
    }
}

/// The name becomes a path component and a hostname, so it is restricted to
/// alphanumerics plus `-`, `_` and `.`, starting with an alphanumeric.
pub fn validate_site_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Nome de site vazio");
    }

    let first_char = name.chars().next().unwrap();
    if !first_char.is_alphanumeric() {
        bail!("Nome de site '{}' deve começar com letra ou número", name);
    }

    for c in name.chars() {
        if !c.is_alphanumeric() && c != '_' && c != '.' && c != '-' {
            bail!("Nome de site '{}' contém caractere inválido '{}'", name, c);
        }
    }

    Ok(())
}
