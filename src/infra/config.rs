use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use toml;

pub const DEFAULT_SITEBOX_TOML_NAME: &str = "sitebox.toml";
pub const COMPOSE_TEMPLATE_NAME: &str = "compose-template.yml";
pub const COMPOSE_TEMPLATE: &str = include_str!("../../config/compose-template.yml");

#[derive(Deserialize, Debug, Default)]
pub struct PathsConfig {
    pub sites_root: Option<PathBuf>,
    pub hosts_file: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ProvisionConfig {
    pub packages: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub provision: ProvisionConfig,
}

impl AppConfig {
    /// Merges another AppConfig into self.
    /// Values from `other` overwrite values in `self` if present.
    pub fn merge(&mut self, other: AppConfig) {
        if let Some(root) = other.paths.sites_root {
            self.paths.sites_root = Some(root);
        }
        if let Some(hosts) = other.paths.hosts_file {
            self.paths.hosts_file = Some(hosts);
        }
        if let Some(packages) = other.provision.packages {
            self.provision.packages = Some(packages);
        }
    }
}

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/home/dev"))
        .join(".config/sitebox")
}

pub fn default_packages() -> Vec<String> {
    vec!["docker".to_string(), "docker-compose".to_string()]
}

pub fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    fs::create_dir_all(config_dir).with_context(|| format!("criando {:?}", config_dir))
}

pub fn load_app_config(config_dir: &Path) -> Result<AppConfig> {
    let global_config_path = config_dir.join(DEFAULT_SITEBOX_TOML_NAME);
    let mut app_config = AppConfig::default();

    if global_config_path.exists() {
        let content = fs::read_to_string(&global_config_path)
            .with_context(|| format!("lendo config global em {:?}", global_config_path))?;
        app_config = toml::from_str(&content)
            .with_context(|| format!("parse de config global em {:?}", global_config_path))?;
    }

    let local_config_path = PathBuf::from("./").join(DEFAULT_SITEBOX_TOML_NAME); // Check current working directory
    if local_config_path.exists() {
        let content = fs::read_to_string(&local_config_path)
            .with_context(|| format!("lendo config local em {:?}", local_config_path))?;
        let local_app_config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("parse de config local em {:?}", local_config_path))?;
        app_config.merge(local_app_config);
    }

    // Default values if not set in any config
    if app_config.paths.sites_root.is_none() {
        app_config.paths.sites_root = Some(PathBuf::from("."));
    }
    if app_config.paths.hosts_file.is_none() {
        app_config.paths.hosts_file = Some(PathBuf::from("/etc/hosts"));
    }
    if app_config.provision.packages.is_none() {
        app_config.provision.packages = Some(default_packages());
    }

    app_config.paths.sites_root = app_config.paths.sites_root.map(|p| expand_path(&p));
    app_config.paths.hosts_file = app_config.paths.hosts_file.map(|p| expand_path(&p));

    Ok(app_config)
}

/// Compose descriptor used by `create`: the template installed in the config
/// directory, or the embedded default when none was installed
pub fn compose_template(config_dir: &Path) -> Result<String> {
    let template_path = config_dir.join(COMPOSE_TEMPLATE_NAME);

    if template_path.exists() {
        return fs::read_to_string(&template_path)
            .with_context(|| format!("lendo {:?}", template_path));
    }

    Ok(COMPOSE_TEMPLATE.to_string())
}

pub fn install_default_config(target_dir: &Path) -> Result<()> {
    ensure_config_dir(target_dir)?;

    let files = [
        (COMPOSE_TEMPLATE_NAME, COMPOSE_TEMPLATE),
        (
            DEFAULT_SITEBOX_TOML_NAME,
            include_str!("../../config/default_sitebox.toml"),
        ),
    ];

    for (name, content) in files {
        let target = target_dir.join(name);

        if target.exists() {
            continue;
        }

        fs::write(&target, content)
            .with_context(|| format!("escrevendo template em {:?}", target))?;
    }

    Ok(())
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.to_string_lossy().as_ref()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_config_file() {
        let temp = TempDir::new().unwrap();

        let config = load_app_config(temp.path()).unwrap();

        assert_eq!(config.paths.sites_root, Some(PathBuf::from(".")));
        assert_eq!(config.paths.hosts_file, Some(PathBuf::from("/etc/hosts")));
        assert_eq!(config.provision.packages, Some(default_packages()));
    }

    #[test]
    fn parses_config_file() {
        let temp = TempDir::new().unwrap();
        let toml = r#"
[paths]
sites_root = "/srv/sites"
hosts_file = "/tmp/hosts"

[provision]
packages = ["podman", "podman-compose"]
"#;
        fs::write(temp.path().join(DEFAULT_SITEBOX_TOML_NAME), toml).unwrap();

        let config = load_app_config(temp.path()).unwrap();

        assert_eq!(config.paths.sites_root, Some(PathBuf::from("/srv/sites")));
        assert_eq!(config.paths.hosts_file, Some(PathBuf::from("/tmp/hosts")));
        assert_eq!(
            config.provision.packages,
            Some(vec!["podman".to_string(), "podman-compose".to_string()])
        );
    }

    #[test]
    fn merge_overwrites_only_present_values() {
        let mut base: AppConfig = toml::from_str(
            r#"
[paths]
sites_root = "/srv/sites"
hosts_file = "/etc/hosts"
"#,
        )
        .unwrap();

        let other: AppConfig = toml::from_str(
            r#"
[paths]
sites_root = "/var/www"
"#,
        )
        .unwrap();

        base.merge(other);

        assert_eq!(base.paths.sites_root, Some(PathBuf::from("/var/www")));
        assert_eq!(base.paths.hosts_file, Some(PathBuf::from("/etc/hosts")));
    }

    #[test]
    fn installs_default_config() {
        let temp = TempDir::new().unwrap();
        let target_dir = temp.path().join("config");

        install_default_config(&target_dir).unwrap();

        assert!(target_dir.join(DEFAULT_SITEBOX_TOML_NAME).exists());
        assert!(target_dir.join(COMPOSE_TEMPLATE_NAME).exists());

        // Verify content matches embedded content
        assert_eq!(
            fs::read_to_string(target_dir.join(COMPOSE_TEMPLATE_NAME)).unwrap(),
            COMPOSE_TEMPLATE
        );
    }

    #[test]
    fn install_does_not_overwrite_existing_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(COMPOSE_TEMPLATE_NAME), "custom").unwrap();

        install_default_config(temp.path()).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join(COMPOSE_TEMPLATE_NAME)).unwrap(),
            "custom"
        );
    }

    #[test]
    fn compose_template_prefers_installed_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(COMPOSE_TEMPLATE_NAME), "services: {}\n").unwrap();

        let template = compose_template(temp.path()).unwrap();
        assert_eq!(template, "services: {}\n");
    }

    #[test]
    fn compose_template_falls_back_to_embedded() {
        let temp = TempDir::new().unwrap();

        let template = compose_template(temp.path()).unwrap();
        assert_eq!(template, COMPOSE_TEMPLATE);
    }

    #[test]
    fn embedded_template_is_a_valid_descriptor() {
        let compose = crate::domain::compose::parse_compose(
            COMPOSE_TEMPLATE,
            Path::new(COMPOSE_TEMPLATE_NAME),
        )
        .unwrap();

        assert_eq!(compose.service_names(), vec!["db", "wordpress"]);
        assert_eq!(compose.services["wordpress"].image, "wordpress:latest");
        assert_eq!(compose.services["db"].image, "mysql:5.7");
    }
}
