use crate::domain::{ComposeRuntime, SiteState};
use anyhow::{Result, bail};
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

/// In-memory ComposeRuntime that records every operation, keyed by the
/// project directory's last component
#[derive(Debug)]
pub struct MockCompose {
    projects: RwLock<HashMap<String, SiteState>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
    missing_commands: RwLock<Vec<String>>,
}

impl MockCompose {
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(HashMap::new()),
            commands: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
            missing_commands: RwLock::new(Vec::new()),
        }
    }

    pub fn add_project(&self, name: &str, state: SiteState) {
        self.projects
            .write()
            .unwrap()
            .insert(name.to_string(), state);
    }

    pub fn get_state(&self, name: &str) -> Option<SiteState> {
        self.projects.read().unwrap().get(name).cloned()
    }

    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    pub fn set_command_missing(&self, cmd: &str) {
        self.missing_commands.write().unwrap().push(cmd.to_string());
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    fn check_fail(&self, operation: &str) -> Result<()> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                bail!("Mock failure on: {}", operation);
            }
        }
        Ok(())
    }

    fn project_key(project_dir: &Path) -> String {
        project_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| project_dir.to_string_lossy().into_owned())
    }
}

impl Default for MockCompose {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposeRuntime for MockCompose {
    fn project_up(&self, project_dir: &Path) -> Result<()> {
        let key = Self::project_key(project_dir);
        self.record_command(&format!("up:{}", key));
        self.check_fail("up")?;

        self.projects
            .write()
            .unwrap()
            .insert(key, SiteState::Running);
        Ok(())
    }

    fn project_stop(&self, project_dir: &Path) -> Result<()> {
        let key = Self::project_key(project_dir);
        self.record_command(&format!("stop:{}", key));
        self.check_fail("stop")?;

        if let Some(state) = self.projects.write().unwrap().get_mut(&key) {
            *state = SiteState::Stopped;
        }
        Ok(())
    }

    fn project_down(&self, project_dir: &Path) -> Result<()> {
        let key = Self::project_key(project_dir);
        self.record_command(&format!("down:{}", key));
        self.check_fail("down")?;

        self.projects.write().unwrap().remove(&key);
        Ok(())
    }

    fn project_state(&self, project_dir: &Path) -> Result<SiteState> {
        let key = Self::project_key(project_dir);
        self.record_command(&format!("state:{}", key));
        self.check_fail("state")?;

        let state = self
            .projects
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or(SiteState::NotCreated);

        Ok(state)
    }

    fn is_command_available(&self, cmd: &str) -> bool {
        self.record_command(&format!("is_available:{}", cmd));
        !self
            .missing_commands
            .read()
            .unwrap()
            .contains(&cmd.to_string())
    }

    fn install_package(&self, package: &str) -> Result<()> {
        self.record_command(&format!("install:{}", package));
        self.check_fail("install")?;

        self.missing_commands
            .write()
            .unwrap()
            .retain(|cmd| cmd != package);
        Ok(())
    }
}
