//! Open document texts.
//!
//! The editor syncs incrementally: each change carries a range in UTF-16 line/character
//! positions, or no range for a full replacement. Positions past the end of a line or of
//! the document clamp to that end, as the protocol asks.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};

#[derive(Default)]
pub struct DocumentStore {
    entries: RwLock<HashMap<Url, Arc<String>>>,
}

impl DocumentStore {
    pub async fn open(&self, uri: Url, text: String) {
        self.entries.write().await.insert(uri, Arc::new(text));
    }

    /// Applies `changes` in order. Returns `false` when the document is not open.
    pub async fn change(&self, uri: &Url, changes: &[TextDocumentContentChangeEvent]) -> bool {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.get_mut(uri) else {
            return false;
        };
        let text = Arc::make_mut(entry);
        for change in changes {
            apply_change(text, change);
        }
        true
    }

    /// Snapshot of the current text. Later edits do not affect the returned value.
    pub async fn text(&self, uri: &Url) -> Option<Arc<String>> {
        self.entries.read().await.get(uri).map(Arc::clone)
    }

    pub async fn close(&self, uri: &Url) {
        self.entries.write().await.remove(uri);
    }
}

pub fn apply_change(text: &mut String, change: &TextDocumentContentChangeEvent) {
    match change.range {
        Some(range) => {
            let start = offset_at(text, range.start);
            let end = offset_at(text, range.end).max(start);
            text.replace_range(start..end, &change.text);
        }
        None => {
            text.clear();
            text.push_str(&change.text);
        }
    }
}

/// Byte offset of an LSP position.
pub fn offset_at(text: &str, position: Position) -> usize {
    let mut line_start = 0;
    for _ in 0..position.line {
        match text[line_start..].find('\n') {
            Some(idx) => line_start += idx + 1,
            None => return text.len(),
        }
    }

    let rest = &text[line_start..];
    let line = rest.find('\n').map_or(rest, |idx| &rest[..idx]);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut units = 0u32;
    for (idx, ch) in line.char_indices() {
        if units >= position.character {
            return line_start + idx;
        }
        units += ch.len_utf16() as u32;
    }
    line_start + line.len()
}
