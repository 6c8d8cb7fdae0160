//! Audit report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_s;

/// A single broken reference
#[derive(Debug, Clone)]
pub struct BrokenRef {
    /// Attribute the reference was found in.
    pub attr: String,
    /// The reference value that failed to resolve.
    pub target: String,
}

/// Broken-reference report, grouped by source document
#[derive(Debug, Default)]
pub struct AuditReport {
    /// Documents that could not be decoded, with the reason.
    pub skipped: BTreeMap<String, String>,
    /// Broken references, grouped by source document.
    pub broken: BTreeMap<String, Vec<BrokenRef>>,
}

impl AuditReport {
    /// Record a broken reference.
    pub fn add_broken(&mut self, source: String, attr: String, target: String) {
        self.broken
            .entry(source)
            .or_default()
            .push(BrokenRef { attr, target });
    }

    /// Record an unreadable document.
    pub fn add_skipped(&mut self, source: String, reason: String) {
        self.skipped.insert(source, reason);
    }

    /// Count of documents with broken references.
    pub fn file_count(&self) -> usize {
        self.broken.len()
    }

    /// Total broken reference count.
    pub fn broken_count(&self) -> usize {
        self.broken.values().map(|v| v.len()).sum()
    }

    /// Print the full report to stderr.
    pub fn print(&self) {
        for (source, reason) in &self.skipped {
            eprintln!(
                "{} could not decode {}: {}",
                "warning:".yellow().bold(),
                source.cyan(),
                reason
            );
        }

        if self.broken.is_empty() {
            return;
        }
        eprintln!();

        let file_count = self.file_count();
        let broken_count = self.broken_count();
        eprintln!(
            "{} {}",
            "broken links".red().bold(),
            format!(
                "({file_count} file{}, {broken_count} link{})",
                plural_s(file_count),
                plural_s(broken_count)
            )
            .dimmed()
        );

        for (source, refs) in &self.broken {
            eprintln!("{}{}{}", "[".dimmed(), source.cyan(), "]".dimmed());
            for broken in refs {
                eprintln!(
                    "{} {} {}",
                    "→".red(),
                    broken.target,
                    format!("({})", broken.attr).dimmed()
                );
            }
        }
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.broken_count();
        if total == 0 {
            write!(f, "{}", "all links are valid".green())
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("broken link{}", plural_s(total)).dimmed()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut report = AuditReport::default();
        assert_eq!(report.broken_count(), 0);

        report.add_broken("a.html".into(), "href".into(), "x.html".into());
        report.add_broken("a.html".into(), "src".into(), "y.png".into());
        report.add_broken("b.html".into(), "href".into(), "z.html".into());

        assert_eq!(report.file_count(), 2);
        assert_eq!(report.broken_count(), 3);
    }

    #[test]
    fn test_grouping_is_sorted() {
        let mut report = AuditReport::default();
        report.add_broken("z.html".into(), "href".into(), "x".into());
        report.add_broken("a.html".into(), "href".into(), "y".into());
        let sources: Vec<&String> = report.broken.keys().collect();
        assert_eq!(sources, ["a.html", "z.html"]);
    }
}
