//! Applying parsed span writes to a run store.
//!
//! The transport hands over complete, line-aligned payloads together with the
//! current character length of the text being styled; parsing finishes before
//! the store is touched, so a rejected write leaves prior styling intact. The
//! transport-level `clear` sentinel is not part of the span grammar; it maps
//! directly to [`SpanStore::clear`].

use runstyle_core::{SpanStore, StyledDocument};

use crate::error::WireError;
use crate::parser::{SpanUpdate, parse_spans};

/// Apply a parsed update to a store.
pub fn apply_update(store: &mut SpanStore, update: &SpanUpdate) {
    if update.is_empty() {
        return;
    }
    store.region_update(update.start, &update.runs);
}

/// Parse a span payload and apply it to a store in one step.
///
/// `buf_len` is the current character length of the text the store tracks.
/// On error the store is untouched and the caller can surface the failure to
/// whatever issued the write.
pub fn apply_payload(
    store: &mut SpanStore,
    payload: &str,
    buf_len: usize,
) -> Result<SpanUpdate, WireError> {
    let update = parse_spans(payload, buf_len)?;
    apply_update(store, &update);
    Ok(update)
}

/// Parse a span payload and apply it to a styled document.
///
/// The document's own character count bounds the write, so a producer that
/// styled against a stale snapshot degrades to a shorter region instead of
/// failing.
pub fn apply_to_document(
    doc: &mut StyledDocument,
    payload: &str,
) -> Result<SpanUpdate, WireError> {
    let buf_len = doc.char_count();
    let update = parse_spans(payload, buf_len)?;
    apply_update(doc.spans_mut(), &update);
    Ok(update)
}
