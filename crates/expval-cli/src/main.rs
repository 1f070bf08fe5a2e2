//! expval command-line interface.
//!
//! ```text
//! expval eval -i job.yaml [-c config.yaml] [--seed N] [--format table|json]
//! expval version
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{eval, version};

/// expval - expectation values of Pauli-string observables
#[derive(Parser)]
#[command(name = "expval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the observables of a job file
    Eval {
        /// Job file (YAML)
        #[arg(short, long)]
        input: PathBuf,

        /// Evaluator configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for sampled estimates
        #[arg(long)]
        seed: Option<u64>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show version information
    Version,
}

fn log_filter(verbose: u8) -> EnvFilter {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return EnvFilter::from_default_env();
    }
    EnvFilter::new(match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    })
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Eval {
            input,
            config,
            seed,
            format,
        } => eval::execute(&input, config.as_deref(), seed, &format),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
