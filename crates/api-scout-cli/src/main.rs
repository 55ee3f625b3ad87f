//! api-scout — entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod inspect_cmd;

use inspect_cmd::InspectOptions;

#[derive(Parser)]
#[command(
    name = "api-scout",
    about = "Infer the contract of an undocumented HTTP JSON API by probing it",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe endpoints and print the synthesized descriptor.
    Inspect {
        /// Base URL the paths are resolved against.
        base_url: String,

        /// Endpoint paths to inspect, in order.
        #[arg(required = true)]
        paths: Vec<String>,

        /// Path to a JSON discovery config.
        /// Also reads from API_SCOUT_CONFIG env var.
        #[arg(short, long)]
        config: Option<String>,

        /// Schema discovery round budget.
        #[arg(long)]
        rounds: Option<usize>,

        /// Per-probe timeout in milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Run the action trials of each field concurrently.
        #[arg(long)]
        parallel_trials: bool,

        /// Keep every endpoint, keyed by path, instead of the last one per category.
        #[arg(long)]
        keyed: bool,

        /// Output a single machine-readable JSON document.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   api-scout completions bash > ~/.local/share/bash-completion/completions/api-scout
    ///   api-scout completions zsh > ~/.zfunc/_api-scout
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Inspect {
            base_url,
            paths,
            config,
            rounds,
            timeout_ms,
            parallel_trials,
            keyed,
            json,
        } => {
            let opts = InspectOptions {
                config,
                rounds,
                timeout_ms,
                parallel_trials,
                keyed,
                json,
            };
            inspect_cmd::run(&base_url, &paths, &opts).await?;
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "api-scout", &mut std::io::stdout());
        }
    }

    Ok(())
}
