//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Sync
//!
//! ```text
//! Found 2 posts
//! 001 Hi → hello-world.md
//! 002 Second post → second.md
//! Success!
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 Hi
//!     Slug: hello-world
//!     Date: 2023-01-02T03:04:00Z
//!     Keywords: k1
//!     Tags: t1, t2
//!     Flags: toc
//!
//! 1 post, 0 drafts
//! ```
//!
//! Each `format_*` function is pure and returns lines for testability; the
//! `print_*` wrappers write them to stdout. Diagnostics go through `tracing`
//! on stderr, never through here.

use crate::sync::SyncEvent;
use crate::types::Record;
use chrono::SecondsFormat;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Name of the written file, relative to the output directory.
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Sync
// ============================================================================

/// `Found N posts`, as printed once the source is decoded.
pub fn format_found(count: usize) -> String {
    format!("Found {}", plural(count, "post"))
}

/// Lines for one sync event. `written` is the 1-based position of a
/// written record.
pub fn format_sync_event(event: &SyncEvent<'_>, written: usize) -> Vec<String> {
    match event {
        SyncEvent::Found { count } => vec![format_found(*count)],
        SyncEvent::Written { record, path } => vec![format!(
            "{} {} → {}",
            format_index(written),
            record.title,
            file_label(path)
        )],
    }
}

pub fn format_success() -> String {
    "Success!".to_string()
}

/// Stateful printer for [`SyncEvent`]s that numbers written files.
#[derive(Debug, Default)]
pub struct SyncPrinter {
    written: usize,
}

impl SyncPrinter {
    pub fn print(&mut self, event: &SyncEvent<'_>) {
        if let SyncEvent::Written { .. } = event {
            self.written += 1;
        }
        for line in format_sync_event(event, self.written) {
            println!("{}", line);
        }
    }
}

// ============================================================================
// Check
// ============================================================================

/// Inventory of decoded records, one entity block per record.
pub fn format_check_output(records: &[Record]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, record) in records.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), record.title));
        lines.push(format!("{}Slug: {}", indent(1), record.slug));
        lines.push(format!(
            "{}Date: {}",
            indent(1),
            record.date.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        if !record.keywords.is_empty() {
            lines.push(format!("{}Keywords: {}", indent(1), record.keywords.join(", ")));
        }
        if !record.tags.is_empty() {
            lines.push(format!("{}Tags: {}", indent(1), record.tags.join(", ")));
        }
        let flags: Vec<&str> = [(record.draft, "draft"), (record.toc, "toc")]
            .into_iter()
            .filter_map(|(on, name)| on.then_some(name))
            .collect();
        if !flags.is_empty() {
            lines.push(format!("{}Flags: {}", indent(1), flags.join(", ")));
        }
    }

    if !records.is_empty() {
        lines.push(String::new());
    }
    let drafts = records.iter().filter(|r| r.draft).count();
    lines.push(format!(
        "{}, {}",
        plural(records.len(), "post"),
        plural(drafts, "draft")
    ));
    lines
}

pub fn print_check_output(records: &[Record]) {
    for line in format_check_output(records) {
        println!("{}", line);
    }
}
