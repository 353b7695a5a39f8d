use anyhow::Result;
use sitebox::cli::Sites;
use sitebox::test_support::MockCompose;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

struct Workspace {
    _temp: tempfile::TempDir,
    config_dir: PathBuf,
    sites_root: PathBuf,
    hosts_path: PathBuf,
}

fn setup_workspace() -> Result<Workspace> {
    let temp = tempfile::tempdir()?;
    let config_dir = temp.path().join("config");
    let sites_root = temp.path().join("sites");
    let hosts_path = temp.path().join("hosts");

    fs::create_dir_all(&config_dir)?;
    fs::create_dir_all(&sites_root)?;

    let sitebox_toml = format!(
        r#"
[paths]
sites_root = "{}"
hosts_file = "{}"
"#,
        sites_root.display(),
        hosts_path.display()
    );
    fs::write(config_dir.join("sitebox.toml"), sitebox_toml)?;

    Ok(Workspace {
        _temp: temp,
        config_dir,
        sites_root,
        hosts_path,
    })
}

#[test]
fn test_create_fails_cleanly_when_compose_up_fails() -> Result<()> {
    let ws = setup_workspace()?;
    let mock = Arc::new(MockCompose::new());
    mock.set_fail_on("up");
    let sites = Sites::with_runtime(&ws.config_dir, mock)?;

    let result = sites.create("blog");
    assert!(result.is_err());

    // O scaffold já aconteceu, mas o hosts não foi tocado
    assert!(ws.sites_root.join("blog").exists());
    assert!(!ws.hosts_path.exists());

    Ok(())
}

#[test]
fn test_delete_still_cleans_up_when_down_fails() -> Result<()> {
    let ws = setup_workspace()?;
    let mock = Arc::new(MockCompose::new());
    let sites = Sites::with_runtime(&ws.config_dir, mock.clone())?;

    sites.create("blog")?;
    mock.set_fail_on("down");

    sites.delete("blog")?;

    assert!(!ws.sites_root.join("blog").exists());
    let hosts = fs::read_to_string(&ws.hosts_path)?;
    assert!(!hosts.contains("blog"));

    Ok(())
}

#[test]
fn test_enable_unknown_site_is_an_error() -> Result<()> {
    let ws = setup_workspace()?;
    let mock = Arc::new(MockCompose::new());
    let sites = Sites::with_runtime(&ws.config_dir, mock.clone())?;

    let err = sites.enable(Some("fantasma")).unwrap_err();
    assert!(err.to_string().contains("não encontrado"));

    // Nenhum comando compose deve ter sido disparado
    assert!(!mock.get_commands().iter().any(|c| c.starts_with("up:")));

    Ok(())
}

#[test]
fn test_invalid_site_name_is_rejected_before_any_command() -> Result<()> {
    let ws = setup_workspace()?;
    let mock = Arc::new(MockCompose::new());
    let sites = Sites::with_runtime(&ws.config_dir, mock.clone())?;

    let err = sites.create("../escape").unwrap_err();
    assert!(err.to_string().contains("deve começar com letra ou número"));

    let err = sites.create("meu/site").unwrap_err();
    assert!(err.to_string().contains("caractere inválido"));

    assert!(mock.get_commands().is_empty());
    assert!(!ws.sites_root.join("..").join("escape").exists());

    Ok(())
}

#[test]
fn test_create_installs_missing_dependencies() -> Result<()> {
    let ws = setup_workspace()?;
    let mock = Arc::new(MockCompose::new());
    mock.set_command_missing("docker-compose");
    let sites = Sites::with_runtime(&ws.config_dir, mock.clone())?;

    sites.create("blog")?;

    let commands = mock.get_commands();
    assert!(commands.contains(&"install:docker-compose".to_string()));
    assert!(!commands.contains(&"install:docker".to_string()));

    Ok(())
}

#[test]
fn test_create_aborts_when_install_fails() -> Result<()> {
    let ws = setup_workspace()?;
    let mock = Arc::new(MockCompose::new());
    mock.set_command_missing("docker");
    mock.set_fail_on("install");
    let sites = Sites::with_runtime(&ws.config_dir, mock.clone())?;

    let result = sites.create("blog");
    assert!(result.is_err());

    // Sem dependências, nada é criado
    assert!(!ws.sites_root.join("blog").exists());
    assert!(!mock.get_commands().iter().any(|c| c.starts_with("up:")));

    Ok(())
}
