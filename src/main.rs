//! Relink - normalize and audit local resource references in HTML trees.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod html;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = Config::load(&cli)?;

    match &cli.command {
        Commands::Rewrite { args } => {
            logger::set_verbose(args.verbose);
            cli::rewrite::run_rewrite(&config, args.dry_run)
        }
        Commands::Audit { .. } => {
            let code = cli::audit::run_audit(&config)?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
    }
}
