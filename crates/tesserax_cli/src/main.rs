//! Main entry point for the tesserax CLI

mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides the -v / -q level
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Bake {
            scene,
            output,
            rate,
            strategy,
        } => commands::bake::execute(&scene, output.as_deref(), rate, strategy),
        Commands::Sample { clip, fps, at } => commands::sample::execute(&clip, fps, at),
        Commands::Info { clip } => commands::info::execute(&clip),
    }
}
