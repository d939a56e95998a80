mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cryptorun")]
#[command(about = "CryptoRun momentum-signal scoring and admission pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a layered YAML config stack, print its canonical JSON + hash.
    ConfigHash {
        /// Paths in merge order (base -> env -> profile -> ...)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Run the C1 policy cascade for one symbol/venue, no state involved.
    PolicyCheck(commands::policy_check::PolicyCheckArgs),

    /// Run one scan tick over a universe + caller-supplied scan inputs.
    Scan(commands::scan::ScanArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::ConfigHash { paths } => commands::config_hash::run(&paths),
        Commands::PolicyCheck(args) => commands::policy_check::run(args),
        Commands::Scan(args) => commands::scan::run(args).await,
    }
}
