//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::RewriteMode;

/// Relink local-reference normalizer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: relink.toml)
    #[arg(short = 'C', long, default_value = "relink.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite local references so they resolve from the root directory
    #[command(visible_alias = "r")]
    Rewrite {
        #[command(flatten)]
        args: RewriteArgs,
    },

    /// Report local references whose target does not exist (read-only)
    #[command(visible_alias = "a")]
    Audit {
        #[command(flatten)]
        args: AuditArgs,
    },
}

/// Rewrite command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RewriteArgs {
    /// Root directory containing the HTML tree (default: docs)
    #[arg(value_name = "ROOT", value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Preview the changes without writing files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Anchor rewritten references to the root or to each document
    #[arg(short, long, value_enum)]
    pub mode: Option<RewriteMode>,

    /// Rescue unresolved references by base name directly under the root
    #[arg(short, long)]
    pub fallback: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Audit command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct AuditArgs {
    /// Root directory containing the HTML tree (default: docs)
    #[arg(value_name = "ROOT", value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Treat broken links as warnings instead of errors
    #[arg(long, short = 'w')]
    pub warn_only: bool,
}
