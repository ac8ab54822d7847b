//! Styled text document: a text buffer paired with a run store.
//!
//! [`StyledDocument`] keeps a [`SpanStore`] aligned with a mutable text buffer
//! by routing every insertion and deletion through both, synchronously and in
//! the same character-offset space. Hosts that already own a text buffer can
//! instead drive a bare [`SpanStore`] directly from their edit path; this type
//! packages the contract for hosts that want both halves in one place.
//!
//! Undo and redo need no extra support here: replaying the inverse edits
//! forward through [`insert`](StyledDocument::insert) and
//! [`delete`](StyledDocument::delete) keeps the store consistent, the same as
//! live typing does.

use std::ops::Range;

use ropey::Rope;

use crate::attrs::StyleAttrs;
use crate::store::SpanStore;

/// A text buffer whose per-character styling tracks edits.
#[derive(Debug, Clone)]
pub struct StyledDocument {
    text: Rope,
    spans: SpanStore,
}

impl StyledDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            text: Rope::new(),
            spans: SpanStore::new(),
        }
    }

    /// Create a document from initial text, covered by one default-styled run.
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.insert(0, text);
        doc
    }

    /// Character count of the text.
    pub fn char_count(&self) -> usize {
        self.text.len_chars()
    }

    /// The document text.
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// The run store tracking this document's styling.
    pub fn spans(&self) -> &SpanStore {
        &self.spans
    }

    /// Mutable access to the run store, for bulk style writes.
    pub fn spans_mut(&mut self) -> &mut SpanStore {
        &mut self.spans
    }

    /// Insert `text` at `char_offset` (clamped to the end of the document).
    ///
    /// The store is adjusted before control returns, so any observer reading
    /// styling state after this call sees post-edit positions.
    pub fn insert(&mut self, char_offset: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let offset = char_offset.min(self.text.len_chars());
        self.text.insert(offset, text);
        self.spans.insert(offset, text.chars().count());
    }

    /// Delete the characters in `range` (clamped to the document).
    pub fn delete(&mut self, range: Range<usize>) {
        let end = range.end.min(self.text.len_chars());
        let start = range.start.min(end);
        if start == end {
            return;
        }
        self.text.remove(start..end);
        self.spans.delete(start, end - start);
    }

    /// Document-order `(range, attrs)` pairs for building a styled view.
    pub fn styled_runs(&self) -> Vec<(Range<usize>, StyleAttrs)> {
        let mut out = Vec::with_capacity(self.spans.num_runs());
        let mut start = 0;
        self.spans.for_each_run(|run| {
            out.push((start..start + run.len, run.attrs));
            start += run.len;
        });
        out
    }
}

impl Default for StyledDocument {
    fn default() -> Self {
        Self::new()
    }
}
