use crate::domain::{ComposeRuntime, SiteState};
use anyhow::{Context, Result, bail};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Drives `docker-compose` inside a site directory
#[derive(Debug)]
pub struct DockerComposeAdapter;

impl DockerComposeAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DockerComposeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposeRuntime for DockerComposeAdapter {
    fn project_up(&self, project_dir: &Path) -> Result<()> {
        compose(
            project_dir,
            ["up", "-d"],
            &format!("subindo serviços em {:?}", project_dir),
        )
    }

    fn project_stop(&self, project_dir: &Path) -> Result<()> {
        compose(
            project_dir,
            ["stop"],
            &format!("parando serviços em {:?}", project_dir),
        )
    }

    fn project_down(&self, project_dir: &Path) -> Result<()> {
        let status = compose_status(
            project_dir,
            ["down"],
            &format!("removendo serviços em {:?}", project_dir),
        )?;

        if !status.success() {
            println!(
                "⚠️  Não foi possível remover os containers em {:?} (podem não existir)",
                project_dir
            );
        }

        Ok(())
    }

    fn project_state(&self, project_dir: &Path) -> Result<SiteState> {
        let all = compose_output(
            project_dir,
            ["ps", "-aq"],
            &format!("listando containers em {:?}", project_dir),
        )?;

        if all.trim().is_empty() {
            return Ok(SiteState::NotCreated);
        }

        let running = compose_output(
            project_dir,
            ["ps", "-q", "--status", "running"],
            &format!("checando containers ativos em {:?}", project_dir),
        )?;

        Ok(if running.trim().is_empty() {
            SiteState::Stopped
        } else {
            SiteState::Running
        })
    }

    fn is_command_available(&self, cmd: &str) -> bool {
        Command::new(cmd)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn install_package(&self, package: &str) -> Result<()> {
        println!("📦 Instalando {package}...");

        let status = Command::new("sudo")
            .args(["apt", "install", "-y", package])
            .status()
            .with_context(|| format!("instalando pacote {package}"))?;

        ensure_success(status, &format!("instalando pacote {package}"))
    }
}

fn compose<I, S>(project_dir: &Path, args: I, context: &str) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let status = compose_status(project_dir, args, context)?;
    ensure_success(status, context)
}

fn compose_status<I, S>(project_dir: &Path, args: I, context: &str) -> Result<ExitStatus>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new("docker-compose")
        .current_dir(project_dir)
        .args(args.into_iter().map(|item| item.as_ref().to_os_string()))
        .status()
        .with_context(|| context.to_string())
}

fn compose_output<I, S>(project_dir: &Path, args: I, context: &str) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = Command::new("docker-compose")
        .current_dir(project_dir)
        .args(args.into_iter().map(|item| item.as_ref().to_os_string()))
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .with_context(|| context.to_string())?;

    if !output.status.success() {
        return Ok(String::new());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn ensure_success(status: ExitStatus, context: &str) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    bail!("docker-compose retornou status {:?} ({context})", status)
}
