use crate::domain::{ComposeRuntime, Site, SiteState};
use anyhow::{Context, Result};
use std::fs;
use std::sync::Arc;
use tracing::{info, warn};

pub struct SiteService {
    runtime: Arc<dyn ComposeRuntime>,
}

impl SiteService {
    pub fn new(runtime: Arc<dyn ComposeRuntime>) -> Self {
        Self { runtime }
    }

    pub fn get_state(&self, site: &Site) -> Result<SiteState> {
        self.runtime.project_state(&site.path)
    }

    /// Creates the site directory and writes the compose descriptor
    pub fn scaffold(&self, site: &Site, descriptor: &str) -> Result<()> {
        fs::create_dir_all(&site.path).with_context(|| format!("criando {:?}", site.path))?;

        let compose_path = site.compose_path();
        fs::write(&compose_path, descriptor)
            .with_context(|| format!("escrevendo {:?}", compose_path))
    }

    pub fn up(&self, site: &Site) -> Result<()> {
        match self.get_state(site)? {
            SiteState::Running => {
                warn!("{} já está no ar", site.name);
                Ok(())
            }
            SiteState::Stopped | SiteState::NotCreated => {
                info!("Subindo {}...", site.name);
                self.runtime.project_up(&site.path)
            }
        }
    }

    pub fn stop(&self, site: &Site) -> Result<()> {
        match self.get_state(site)? {
            SiteState::Running => {
                info!("Parando {}...", site.name);
                self.runtime.project_stop(&site.path)
            }
            SiteState::Stopped | SiteState::NotCreated => {
                warn!("{} já está parado ou não foi criado", site.name);
                Ok(())
            }
        }
    }

    pub fn down(&self, site: &Site) -> Result<()> {
        self.runtime.project_down(&site.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockCompose;
    use std::path::Path;

    fn site(name: &str) -> Site {
        Site::new(name, Path::new("/srv/sites")).unwrap()
    }

    #[test]
    fn test_up_starts_stopped_site() {
        let mock = Arc::new(MockCompose::new());
        mock.add_project("blog", SiteState::Stopped);
        let service = SiteService::new(mock.clone());

        service.up(&site("blog")).unwrap();

        assert_eq!(mock.get_state("blog"), Some(SiteState::Running));
        assert!(mock.get_commands().contains(&"up:blog".to_string()));
    }

    #[test]
    fn test_up_skips_running_site() {
        let mock = Arc::new(MockCompose::new());
        mock.add_project("blog", SiteState::Running);
        let service = SiteService::new(mock.clone());

        service.up(&site("blog")).unwrap();

        assert!(!mock.get_commands().contains(&"up:blog".to_string()));
    }

    #[test]
    fn test_stop_running_site() {
        let mock = Arc::new(MockCompose::new());
        mock.add_project("blog", SiteState::Running);
        let service = SiteService::new(mock.clone());

        service.stop(&site("blog")).unwrap();

        assert_eq!(mock.get_state("blog"), Some(SiteState::Stopped));
        assert!(mock.get_commands().contains(&"stop:blog".to_string()));
    }

    #[test]
    fn test_stop_is_noop_when_not_created() {
        let mock = Arc::new(MockCompose::new());
        let service = SiteService::new(mock.clone());

        service.stop(&site("blog")).unwrap();

        assert!(!mock.get_commands().contains(&"stop:blog".to_string()));
    }

    #[test]
    fn test_scaffold_writes_descriptor() {
        let temp = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockCompose::new());
        let service = SiteService::new(mock);

        let site = Site::new("blog", temp.path()).unwrap();
        service.scaffold(&site, "services:\n").unwrap();

        let written = fs::read_to_string(site.compose_path()).unwrap();
        assert_eq!(written, "services:\n");
    }
}
