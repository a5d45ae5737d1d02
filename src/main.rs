use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use envput::cli::{
    handle_download_command, handle_init_command, handle_list_command, handle_upload_command,
    user_message, TerminalPrompt, TransferArgs, Workspace,
};
use envput::config::paths::CONFIG_ENV_VAR;
use envput::config::{EnvputPaths, ProjectConfig};
use envput::storage::S3Store;
use envput::EnvputError;

#[derive(Parser)]
#[command(
    name = "envput",
    version,
    about = "Encrypt environment files and store them in S3",
    long_about = "envput encrypts local environment files with a shared project key \
                  and keeps them in an S3 bucket, so a team can sync secrets without \
                  ever uploading plaintext."
)]
struct Cli {
    /// Path to the config file (default: ./.envputrc)
    #[arg(long, global = true, env = CONFIG_ENV_VAR, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new configuration interactively
    Init,

    /// List configured environments
    #[command(alias = "ls")]
    List,

    /// Encrypt an environment file and upload it to S3
    Upload(TransferArgs),

    /// Download an environment file from S3 and decrypt it
    Download(TransferArgs),
}

impl Commands {
    /// Label used in failure messages
    fn label(&self) -> &'static str {
        match self {
            Commands::Init => "Initialization",
            Commands::List => "List",
            Commands::Upload(_) => "Upload",
            Commands::Download(_) => "Download",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors exit 1 like every other failure; help and version exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing(cli.verbose);

    let label = cli.command.label();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<EnvputError>() {
            Some(err) if err.is_cancelled() => {
                println!("❌ {}", err);
                ExitCode::SUCCESS
            }
            Some(err) => {
                tracing::debug!(error = ?err, "command failed");
                eprintln!("❌ {} failed: {}", label, user_message(err));
                ExitCode::FAILURE
            }
            None => {
                eprintln!("❌ {} failed: {:#}", label, err);
                ExitCode::FAILURE
            }
        },
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "envput=debug" } else { "envput=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let paths = EnvputPaths::new(cli.config)?;
    let mut prompt = TerminalPrompt::new();

    match cli.command {
        Commands::Init => handle_init_command(&paths, &mut prompt)?,
        Commands::List => {
            let config = ProjectConfig::load(&paths)?;
            handle_list_command(&config)?;
        }
        Commands::Upload(args) => {
            let config = ProjectConfig::load(&paths)?;
            let store = S3Store::from_config(&config.aws).await;
            let ws = Workspace::new(&paths, &config, &store);
            handle_upload_command(&ws, &args, &mut prompt).await?;
        }
        Commands::Download(args) => {
            let config = ProjectConfig::load(&paths)?;
            let store = S3Store::from_config(&config.aws).await;
            let ws = Workspace::new(&paths, &config, &store);
            handle_download_command(&ws, &args, &mut prompt).await?;
        }
    }

    Ok(())
}
