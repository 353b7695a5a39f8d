use anyhow::Result;
use clap::{Parser, Subcommand};
use sitebox::cli::{self, Sites};
use sitebox::infra::config::default_config_dir;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sitebox",
    about = "Controlador de sites WordPress em containers"
)]
struct Cli {
    /// Diretório de configuração (default: ~/.config/sitebox)
    #[arg(long, env = "SITEBOX_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cria um site novo: diretório, descriptor compose, containers e hosts
    Create { site_name: String },
    /// Sobe os containers de um site já criado
    Enable { site_name: Option<String> },
    /// Para os containers de um site sem removê-los
    Disable { site_name: Option<String> },
    /// Derruba containers, remove o diretório do site e a entrada de hosts
    Delete { site_name: String },
    /// Mostra o estado dos sites gerenciados
    Status { site_name: Option<String> },
    /// Verifica dependências e configuração
    Doctor,
    /// Instala templates de config padrão
    Setup,
    /// Atualiza o binário para a última release
    Update,
}

fn main() {
    init_tracing();

    // Erros de uso saem com código 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            match err.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    std::process::exit(0)
                }
                _ => std::process::exit(1),
            }
        }
    };

    if let Err(err) = run(cli) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_dir = cli.config_dir.unwrap_or_else(default_config_dir);

    match cli.command {
        Commands::Create { site_name } => Sites::new(&config_dir)?.create(&site_name),
        Commands::Enable { site_name } => Sites::new(&config_dir)?.enable(site_name.as_deref()),
        Commands::Disable { site_name } => Sites::new(&config_dir)?.disable(site_name.as_deref()),
        Commands::Delete { site_name } => Sites::new(&config_dir)?.delete(&site_name),
        Commands::Status { site_name } => Sites::new(&config_dir)?.status(site_name.as_deref()),
        Commands::Doctor => cli::setup::doctor(&config_dir),
        Commands::Setup => cli::setup::install(&config_dir),
        Commands::Update => cli::update::update(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
