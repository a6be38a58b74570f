//! History list markup.

use crate::services::markup::{render_all, Element, Node};
use crate::types::history::HistoryEntry;

pub const EMPTY_HISTORY_TEXT: &str = "No history yet — generate recipes to build history.";

/// One clickable item per entry, or a placeholder when there is none.
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return Element::new("div")
            .class("small history-empty")
            .text(EMPTY_HISTORY_TEXT)
            .render();
    }

    let items: Vec<Node> = entries
        .iter()
        .map(|entry| {
            Element::new("div")
                .class("small history-item")
                .attr("data-history-id", entry.id.to_string())
                .attr("title", "Click to view results")
                .text(entry.label())
                .into()
        })
        .collect();
    render_all(&items)
}
