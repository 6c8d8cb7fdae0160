//! Rewrite command - normalize local references across the tree.
//!
//! Two phases per run: a parallel read-only phase that plans every edit, and
//! a sequential phase that prints each document's change log and then (unless
//! dry-run) persists that document. Printing before writing keeps a partial
//! run diagnosable: whatever hit the disk is already on the screen.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use rayon::prelude::*;

use crate::cli::common::{collect_html_files, display_name};
use crate::config::Config;
use crate::core::RewriteMode;
use crate::html::{AttrChange, RewriteContext, rewrite_document};
use crate::utils::path::normalize_path;
use crate::utils::plural_count;
use crate::{log, warn};

/// Planned outcome for one document.
enum FileResult {
    /// Could not be read as text; reason kept for the warning.
    Skipped(String),
    /// Nothing to change.
    Unchanged,
    /// At least one attribute changed.
    Changed {
        html: String,
        changes: Vec<AttrChange>,
    },
}

struct FileReport {
    path: PathBuf,
    name: String,
    result: FileResult,
}

/// Run the rewrite pass.
///
/// A missing root is a warning and a no-op success: there is nothing to
/// rewrite, which is not the same failure as having validated nothing.
pub fn run_rewrite(config: &Config, dry_run: bool) -> Result<()> {
    let root = config.get_root();
    if !root.exists() {
        warn!("rewrite"; "root directory `{}` does not exist, nothing to rewrite", root.display());
        return Ok(());
    }
    let root = normalize_path(root);

    let files = collect_html_files(&root);
    if files.is_empty() {
        log!("rewrite"; "no HTML files found under `{}`", root.display());
        return Ok(());
    }
    log!("rewrite"; "scanning {}", plural_count(files.len(), "file"));

    let mode = config.rewrite.mode;
    let fallback = config.rewrite.fallback;

    // Documents are independent; plan them all in parallel, then report and
    // persist in discovery order.
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|file| plan_file(file, &root, mode, fallback))
        .collect();

    let mut updated = 0usize;
    for report in reports {
        match report.result {
            FileResult::Skipped(reason) => {
                warn!("rewrite"; "skipping {}: {}", report.name, reason);
            }
            FileResult::Unchanged => {}
            FileResult::Changed { html, changes } => {
                print_changes(&report.name, &changes);
                if !dry_run {
                    fs::write(&report.path, html)
                        .with_context(|| format!("failed to write `{}`", report.path.display()))?;
                }
                updated += 1;
            }
        }
    }

    if updated == 0 {
        log!("rewrite"; "no local links required rewriting");
    }
    if dry_run {
        log!("rewrite"; "dry run complete, {} would be updated", plural_count(updated, "file"));
    } else {
        log!("rewrite"; "update complete, {} updated", plural_count(updated, "file"));
    }

    Ok(())
}

/// Read and rewrite one document in memory. Never touches the disk.
fn plan_file(file: &Path, root: &Path, mode: RewriteMode, fallback: bool) -> FileReport {
    let name = display_name(file, root);

    let text = match fs::read_to_string(file) {
        Ok(text) => text,
        Err(err) => {
            return FileReport {
                path: file.to_path_buf(),
                name,
                result: FileResult::Skipped(err.to_string()),
            };
        }
    };

    let document_dir = file.parent().unwrap_or(root);
    let ctx = RewriteContext {
        root,
        document_dir,
        mode,
        fallback,
    };

    let outcome = rewrite_document(&text, &ctx);
    let result = match outcome.html {
        Some(html) => FileResult::Changed {
            html,
            changes: outcome.changes,
        },
        None => FileResult::Unchanged,
    };

    FileReport {
        path: file.to_path_buf(),
        name,
        result,
    }
}

/// Print one document's change log.
fn print_changes(name: &str, changes: &[AttrChange]) {
    println!("{}{}{}", "[".dimmed(), name.cyan(), "]".dimmed());
    for change in changes {
        if change.via_fallback {
            println!(
                "  {}: {} {} {} {}",
                change.attr,
                change.old,
                "->".dimmed(),
                change.new,
                "(fallback)".yellow()
            );
        } else {
            println!(
                "  {}: {} {} {}",
                change.attr,
                change.old,
                "->".dimmed(),
                change.new
            );
        }
    }
}
