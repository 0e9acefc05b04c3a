//! Cna CLI

use clap::{Parser, Subcommand};
use cna::error::report_error;
use cna::interp::{self, Config};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cna", version, about = "Cna - run parsed Cna programs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a program tree
    Run {
        /// Program tree (JSON) to run
        file: PathBuf,
        /// Seed for random(), for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Do not flush stdout after every print/write
        #[arg(long)]
        no_flush: bool,
    },
    /// Check that a program tree decodes
    Check {
        /// Program tree (JSON) to check
        file: PathBuf,
    },
    /// Decode and dump a program tree (debug)
    Dump {
        /// Program tree (JSON) to dump
        file: PathBuf,
    },
}

/// Enable with `RUST_LOG=cna=debug` or `RUST_LOG=cna=trace`
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let (file, result) = match cli.command {
        Command::Run { file, seed, no_flush } => {
            let mut config = Config::new().with_flush(!no_flush);
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            let result = run_file(&file, config);
            (file, result)
        }
        Command::Check { file } => {
            let result = check_file(&file);
            (file, result)
        }
        Command::Dump { file } => {
            let result = dump_file(&file);
            (file, result)
        }
    };

    if let Err(e) = result {
        report_error(&file.display().to_string(), &e);
        std::process::exit(1);
    }
}

fn run_file(path: &Path, config: Config) -> cna::Result<()> {
    let program = cna::load_program(path)?;
    tracing::debug!(file = %path.display(), "running");
    interp::run_with_config(&program, config)?;
    Ok(())
}

fn check_file(path: &Path) -> cna::Result<()> {
    let program = cna::load_program(path)?;
    let count = program.body.statements().count();
    println!("✓ {} decodes ({count} top-level statements)", path.display());
    Ok(())
}

fn dump_file(path: &Path) -> cna::Result<()> {
    let program = cna::load_program(path)?;
    let json = serde_json::to_string_pretty(&program)
        .map_err(|e| cna::CnaError::decode_error(&e))?;
    println!("{json}");
    Ok(())
}
