//! typebridge CLI - Effect Schema generator
//!
//! Commands:
//! - `typebridge generate` - Reflect the configured roots and write the output tree
//! - `typebridge check` - Validate typebridge.toml, the snapshot and every root
//! - `typebridge literals` - Print the literal set recovered for a string type
//! - `typebridge inspect` - Print the module generated for one type

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use typebridge_logging::{DiagnosticLog, LogLevel, init_logging};

mod check;
mod generate;
mod inspect;
mod literals;
mod project;
mod summary;

#[derive(Parser)]
#[command(name = "typebridge")]
#[command(author, version, about = "Generate Effect Schema classes from Go struct types", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error, off); RUST_LOG takes precedence
    #[arg(long, global = true, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one module per reflected type plus an index
    Generate {
        /// Path to typebridge.toml (default: ./typebridge.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (default: [generator].output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Omit documentation links
        #[arg(long)]
        no_docs: bool,
    },

    /// Validate typebridge.toml, the snapshot and every root type
    Check {
        /// Path to typebridge.toml (default: ./typebridge.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the literal set recovered for a named string type
    Literals {
        /// Type key, e.g. github.com/moby/moby/api/types/container.HealthStatus
        key: String,

        /// Path to typebridge.toml (default: ./typebridge.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Reflect one type and print its module without writing anything
    Inspect {
        /// Type key, e.g. github.com/moby/moby/api/types/mount.Mount
        key: String,

        /// Path to typebridge.toml (default: ./typebridge.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let result = match cli.command {
        Commands::Generate {
            config,
            output,
            no_docs,
        } => generate::run(config, output, no_docs),
        Commands::Check { config } => check::run(config),
        Commands::Literals { key, config } => literals::run(&key, config),
        Commands::Inspect { key, config } => inspect::run(&key, config),
    };

    if let Some(report) = summary::format(&DiagnosticLog::global().take()) {
        eprint!("{report}");
    }

    result
}
