//! Rendering of recommendation reports and list overviews.

use crate::error::CoreError;
use crate::types::{ListDescriptor, OutputFormat, RankedEntry};
use std::fmt::Write;

pub fn render_report(entries: &[RankedEntry], format: OutputFormat) -> Result<String, CoreError> {
    match format {
        OutputFormat::Text => Ok(report_text(entries)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
    }
}

pub fn render_lists(
    username: &str,
    lists: &[ListDescriptor],
    format: OutputFormat,
) -> Result<String, CoreError> {
    match format {
        OutputFormat::Text => Ok(lists_text(username, lists)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(lists)?),
    }
}

fn report_text(entries: &[RankedEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "({}) \"{}\" - \"{}\"",
            entry.count, entry.identity.display_name, entry.identity.handle
        );
        let _ = writeln!(out, "{}", entry.identity.description);
    }
    out
}

fn lists_text(username: &str, lists: &[ListDescriptor]) -> String {
    let mut out = format!("📋 {}'s lists:\n", username);
    for list in lists {
        let _ = writeln!(out, "- {}", list.name);
    }
    out
}
