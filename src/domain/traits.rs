use super::SiteState;
use anyhow::Result;
use std::fmt::Debug;
use std::path::Path;

/// Trait for compose-project and host toolchain operations
pub trait ComposeRuntime: Send + Sync + Debug {
    /// Bring the project's services up detached, creating containers as needed
    fn project_up(&self, project_dir: &Path) -> Result<()>;

    /// Stop the project's containers without removing them
    fn project_stop(&self, project_dir: &Path) -> Result<()>;

    /// Stop and remove the project's containers
    fn project_down(&self, project_dir: &Path) -> Result<()>;

    /// Current state of the project's containers
    fn project_state(&self, project_dir: &Path) -> Result<SiteState>;

    /// Check if a command is available
    fn is_command_available(&self, cmd: &str) -> bool;

    /// Install a system package
    fn install_package(&self, package: &str) -> Result<()>;
}
