use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Typed view of a compose descriptor, used by status and by validation
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ComposeFile {
    #[serde(default)]
    pub version: Option<String>,
    pub services: BTreeMap<String, ComposeService>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ComposeService {
    pub image: String,
    #[serde(default)]
    pub ports: Vec<String>,
    #[serde(default)]
    pub volumes: Vec<String>,
    #[serde(default)]
    pub environment: Vec<String>,
}

impl ComposeFile {
    pub fn service_names(&self) -> Vec<&str> {
        self.services.keys().map(|name| name.as_str()).collect()
    }
}

pub fn load_compose_file(path: &Path) -> Result<ComposeFile> {
    let content = fs::read_to_string(path).with_context(|| format!("lendo {:?}", path))?;
    parse_compose(&content, path)
}

pub fn parse_compose(content: &str, path: &Path) -> Result<ComposeFile> {
    let compose: ComposeFile =
        serde_yml::from_str(content).with_context(|| format!("parse de {:?}", path))?;

    if compose.services.is_empty() {
        bail!("Descriptor {:?} sem serviços", path);
    }

    for (name, service) in &compose.services {
        if service.image.trim().is_empty() {
            bail!("Serviço '{}' em {:?} sem 'image'", name, path);
        }
    }

    Ok(compose)
}
