mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rest_api_core::{DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rest-api")]
#[command(about = "User CRUD REST service backed by MongoDB", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the store and serve the users resource over HTTP
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_LISTEN_PORT)]
        port: u16,
        #[arg(short = 'H', long, default_value = DEFAULT_LISTEN_HOST)]
        host: String,
        /// Backing store for user documents
        #[arg(long, value_enum, default_value_t = StorageKind::Mongodb)]
        storage: StorageKind,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum StorageKind {
    Mongodb,
    /// Process-local, lost on exit
    Memory,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host, storage } => commands::serve::run(port, host, storage).await,
    }
}
