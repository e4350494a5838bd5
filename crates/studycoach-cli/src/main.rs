//! studycoach CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studycoach", version, about = "Single-session study coach for diagnosing misconceptions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive coaching session
    Run {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Content pack path (overrides the config)
        #[arg(long)]
        content_pack: Option<PathBuf>,

        /// Dashboard format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Validate a content pack
    Validate {
        /// Path to the content pack JSON file
        #[arg(long)]
        content_pack: PathBuf,
    },

    /// Create starter config and example content pack
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studycoach=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            content_pack,
            format,
        } => commands::run::execute(config, content_pack, format).await,
        Commands::Validate { content_pack } => commands::validate::execute(content_pack),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
