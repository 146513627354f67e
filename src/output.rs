//! Result rendering for the CLI layer.

use crate::entry::{EntryRecord, SearchOutcome};
use byte_unit::{Byte, UnitType};
use clap::ValueEnum;
use colored::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::path::Path;
use std::time::Duration;

#[derive(ValueEnum, Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_simple_list(matches: &[EntryRecord]) {
    for entry in matches {
        println!("{}", entry.path.display());
    }
}

pub fn print_long_format(matches: &[EntryRecord]) {
    for entry in matches {
        let size = entry
            .size
            .map(human_size)
            .unwrap_or_else(|| "<DIR>".to_string());
        let modified = entry
            .modified
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        println!("{:<60} {:>12} {}", entry.path.display(), size, modified);
    }
}

fn human_size(bytes: u64) -> String {
    let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Binary);
    format!("{:.2} {}", adjusted.get_value(), adjusted.get_unit())
}

/// One JSON document for the whole run.
pub fn render_json(root: &Path, pattern: &str, outcome: &SearchOutcome) -> String {
    let document = json!({
        "root": root.to_string_lossy(),
        "pattern": pattern,
        "match_count": outcome.match_count(),
        "failure_count": outcome.failure_count(),
        "matches": outcome
            .matches
            .iter()
            .map(|m| {
                json!({
                    "name": m.name,
                    "path": m.path.to_string_lossy(),
                    "parent": m.parent.to_string_lossy(),
                    "directory": m.is_directory,
                    "size": m.size,
                    "created": m.created.map(|t| t.to_rfc3339()),
                    "accessed": m.accessed.map(|t| t.to_rfc3339()),
                    "modified": m.modified.map(|t| t.to_rfc3339()),
                })
            })
            .collect::<Vec<_>>(),
        "failures": outcome
            .failures
            .iter()
            .map(|f| {
                json!({
                    "path": f.path.to_string_lossy(),
                    "reason": f.reason.to_string(),
                })
            })
            .collect::<Vec<_>>(),
    });
    serde_json::to_string_pretty(&document).unwrap_or_default()
}

pub fn print_failures(outcome: &SearchOutcome) {
    if outcome.failures.is_empty() {
        return;
    }
    eprintln!(
        "\n{}",
        "Directories that could not be searched:".red().bold()
    );
    for failure in &outcome.failures {
        eprintln!(
            "  {} ({})",
            failure.path.display().to_string().red(),
            failure.reason
        );
    }
}

pub fn print_summary(outcome: &SearchOutcome, elapsed: Duration) {
    println!("\n{}", "Summary:".green().bold());
    println!("{}: {}", "Matches".cyan(), outcome.match_count());
    println!(
        "{}: {}",
        "Unsearchable directories".cyan(),
        outcome.failure_count()
    );
    println!(
        "{}: {}",
        "Total size".cyan(),
        human_size(outcome.total_matched_bytes())
    );
    println!("{}: {:.2?}", "Elapsed".cyan(), elapsed);
}
