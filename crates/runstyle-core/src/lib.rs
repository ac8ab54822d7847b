#![warn(missing_docs)]
//! `runstyle-core` - Run-based character styling kept aligned with live text edits.
//!
//! # Overview
//!
//! This crate tracks per-character style attributes (colors, bold, italic,
//! hidden) over a mutable text buffer. Instead of storing one style tag per
//! character, it stores a compact ordered sequence of style *runs*, each
//! covering a contiguous range of character positions and sharing one
//! [`StyleAttrs`] value — the styling analogue of a piece table.
//!
//! # Core Features
//!
//! - **Gap-buffer run storage**: amortized O(1) run insertion/removal for the
//!   localized edit patterns of interactive editing
//! - **Edit tracking**: [`SpanStore::insert`] / [`SpanStore::delete`] keep run
//!   positions aligned with every text mutation, including undo/redo replay
//! - **Region updates**: [`SpanStore::region_update`] bulk-replaces the
//!   styling of an arbitrary sub-range, splitting and merging runs as needed
//! - **Document pairing**: [`StyledDocument`] bundles a rope-backed text
//!   buffer with a store and drives both through one edit path
//!
//! # Quick Start
//!
//! ```rust
//! use runstyle_core::{Color, SpanStore, StyleAttrs, StyleRun};
//!
//! let mut store = SpanStore::new();
//! store.insert(0, 20); // the tracked text is 20 characters long
//!
//! // Color characters 5..10 red.
//! let red = StyleAttrs::default().with_fg(Color::Rgb(255, 0, 0));
//! store.region_update(5, &[StyleRun::new(5, red)]);
//! assert_eq!(store.num_runs(), 3);
//!
//! // Typing at the end of the red range extends it.
//! store.insert(10, 2);
//! assert_eq!(store.attrs_at(11), Some(&red));
//! assert_eq!(store.total_len(), 22);
//! ```
//!
//! # Module Description
//!
//! - [`attrs`] - style attribute value types
//! - [`store`] - the gap-buffer run store
//! - [`document`] - text buffer + store pairing
//!
//! # Concurrency
//!
//! A store has no internal synchronization: it is built for single-writer,
//! synchronous use under whatever discipline already serializes edits to the
//! owning document. Independent stores are fully independent.

pub mod attrs;
pub mod document;
pub mod store;

pub use attrs::{Color, StyleAttrs, StyleRun};
pub use document::StyledDocument;
pub use store::SpanStore;
