//! kgfetch CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "kgfetch")]
#[command(about = "Download reusable components described in a knowledge graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Project root path (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Graph snapshot to load (overrides `[graph] snapshot`)
    #[arg(short, long)]
    graph: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download repositories or component specifications by identifier
    Download {
        #[arg(required = true)]
        identifiers: Vec<String>,
    },
    /// Show what the graph says about a component
    Inspect { identifier: String },
    /// List a component's dependencies in install order
    Deps { identifier: String },
    /// List specification files in a directory
    Specs {
        /// Directory to scan (defaults to the download root)
        dir: Option<PathBuf>,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("kgfetch={}", log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Project root: {}", cli.root.display());

    match cli.command {
        Commands::Download { identifiers } => {
            commands::download(&cli.root, cli.graph, &identifiers)
        }
        Commands::Inspect { identifier } => commands::inspect(&cli.root, cli.graph, &identifier),
        Commands::Deps { identifier } => commands::deps(&cli.root, cli.graph, &identifier),
        Commands::Specs { dir } => commands::specs(&cli.root, dir),
        Commands::Version => {
            println!("kgfetch v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
