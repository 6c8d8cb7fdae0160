//! Audit command - report references whose target does not exist.
//!
//! Read-only sibling of the rewrite pass: same classification and
//! resolution, no fallback search, no mutation. The exit status is the
//! contract other tooling depends on: 0 clean, 1 broken links found,
//! 2 the root itself is missing.

mod report;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::cli::common::{collect_html_files, display_name};
use crate::config::Config;
use crate::core::{RefClass, classify, resolve};
use crate::html::collect_references;
use crate::utils::path::normalize_path;
use crate::utils::plural_count;
use crate::{log, warn};

use report::AuditReport;

/// Exit status when at least one broken link was found.
const EXIT_BROKEN: i32 = 1;
/// Exit status when the root directory does not exist.
const EXIT_NO_ROOT: i32 = 2;

/// Run the audit pass; returns the process exit code.
pub fn run_audit(config: &Config) -> Result<i32> {
    let root = config.get_root();
    if !root.exists() {
        warn!("audit"; "root directory `{}` does not exist", root.display());
        return Ok(EXIT_NO_ROOT);
    }
    let root = normalize_path(root);

    let files = collect_html_files(&root);
    if files.is_empty() {
        log!("audit"; "no HTML files found under `{}`", root.display());
        return Ok(0);
    }
    log!("audit"; "auditing {}", plural_count(files.len(), "file"));

    let report = Arc::new(RwLock::new(AuditReport::default()));

    files.par_iter().for_each(|file| {
        audit_file(file, &root, &report);
    });

    let report = Arc::try_unwrap(report).unwrap().into_inner();
    report.print();
    log!("audit"; "{}", report);

    if report.broken_count() > 0 {
        if config.audit.warn_only {
            log!("audit"; "broken links treated as warnings (--warn-only)");
            return Ok(0);
        }
        return Ok(EXIT_BROKEN);
    }
    Ok(0)
}

/// Check every reference in one document against the filesystem.
fn audit_file(file: &Path, root: &Path, report: &Arc<RwLock<AuditReport>>) {
    let name = display_name(file, root);

    let text = match fs::read_to_string(file) {
        Ok(text) => text,
        Err(err) => {
            report.write().add_skipped(name, err.to_string());
            return;
        }
    };

    let document_dir = file.parent().unwrap_or(root);

    for scanned in collect_references(&text) {
        let RefClass::Candidate(candidate) = classify(&scanned.value) else {
            continue;
        };
        if resolve(candidate, document_dir, root, false).is_none() {
            report
                .write()
                .add_broken(name.clone(), scanned.attr, scanned.value);
        }
    }
}
