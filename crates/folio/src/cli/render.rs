//! # Rendering
//!
//! Plain-text output with `console` styling. Every function returns a string
//! so output can be checked in tests without a terminal; styles collapse to
//! plain text when colors are off (e.g. when stdout is not a TTY).

use console::style;
use folioapp::model::{FolderRecord, NodeType};
use folioapp::organize::TreeEntry;
use folioapp::workbench::View;

const INDENT: &str = "  ";
pub const ACTIVE_MARKER: &str = "▶";

pub fn render_tree(entries: &[TreeEntry]) -> String {
    if entries.is_empty() {
        return format!(
            "{}\n",
            style("No folders yet. Create one with: folio folder create <name>").dim()
        );
    }

    let mut out = String::new();
    for entry in entries {
        out.push_str(&INDENT.repeat(entry.depth));
        out.push_str(&render_record(&entry.record));
        out.push('\n');
    }
    out
}

fn render_record(record: &FolderRecord) -> String {
    match record.node_type {
        NodeType::Folder => format!(
            "{}  {}",
            style(format!("{}/", record.data)).bold(),
            style(&record.id).dim()
        ),
        link => format!(
            "{} {}  {}",
            style(link.as_str()).cyan(),
            record.data,
            style(&record.id).dim()
        ),
    }
}

/// One line per view: marker, index, location, share of the total width, id.
pub fn render_views(views: &[View], active: usize) -> String {
    let total: f64 = views.iter().map(View::size).sum();
    let mut out = String::new();
    for (index, view) in views.iter().enumerate() {
        let marker = if index == active { ACTIVE_MARKER } else { " " };
        let share = if total > 0.0 { view.size() / total * 100.0 } else { 0.0 };
        let location = view.location().to_string();
        let location = if index == active {
            style(location).bold().to_string()
        } else {
            location
        };
        out.push_str(&format!(
            "{} {:>2}. {}  {}  {}",
            style(marker).yellow(),
            index,
            location,
            style(format!("{:.0}%", share)).dim(),
            style(view.id()).dim()
        ));
        if let Some(title) = view.title() {
            out.push_str(&format!("  {}", title));
        }
        out.push('\n');
    }
    out
}

pub fn render_message(message: &str) -> String {
    format!("{}\n", style(message).green())
}
