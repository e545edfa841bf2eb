#![warn(missing_docs)]
//! Line Buffer - Incremental Line-Indexed Text Buffer
//!
//! # Overview
//!
//! `line-buffer` holds a document as an ordered sequence of lines and converts between flat
//! character offsets and (line, column) positions in O(log N), while staying consistent under
//! a continuous stream of range edits (keystrokes, paste, undo/redo, remote synchronization).
//! It never rescans the whole document on an edit.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Word Queries                               │  ← Consumers
//! ├─────────────────────────────────────────────┤
//! │  LineBuffer (edits, offset/position)        │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  PrefixSumIndex (Fenwick tree)              │  ← Line Weights
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use line_buffer::{LineBuffer, Position, Range, TextEdit};
//!
//! let mut buffer = LineBuffer::from_text("hello", 1);
//!
//! buffer
//!     .apply_edit(&[TextEdit::new(Range::new(1, 3, 1, 3), "\nworld")], None, 2)
//!     .unwrap();
//!
//! assert_eq!(buffer.lines(), &["hel", "worldlo"]);
//! assert_eq!(buffer.version(), 2);
//! assert_eq!(buffer.offset_at(Position::new(2, 0)).unwrap(), 4);
//! assert_eq!(buffer.position_at(4).unwrap(), Position::new(2, 0));
//! ```
//!
//! # Coordinates
//!
//! - Offsets count characters (Unicode scalar values) from the document start.
//! - Line numbers are 1-based; columns are 0-based character offsets within a line.
//! - The last line carries no trailing end-of-line, so the largest valid offset is
//!   [`LineBuffer::char_len`], the length of [`LineBuffer::get_text`].
//!
//! # Module Description
//!
//! - [`prefix_sum`] - Fenwick-tree prefix sums over line weights
//! - [`buffer`] - line storage, edit application and coordinate conversion
//! - [`words`] - regex-based word lookup
//! - [`line_ending`] - end-of-line sequences
//! - [`options`] - verification and recovery settings
//! - [`error`] - contract and invariant violations

pub mod buffer;
pub mod error;
pub mod line_ending;
pub mod options;
pub mod position;
pub mod prefix_sum;
mod text;
pub mod words;

pub use buffer::{BufferReader, LineBuffer};
pub use error::{ContractViolation, InvariantViolation};
pub use line_ending::EndOfLine;
pub use options::{BufferOptions, VerifyLevel, ViolationPolicy};
pub use position::{Position, Range, TextEdit};
pub use prefix_sum::PrefixSumIndex;
pub use words::{DEFAULT_WORD_PATTERN, WordAtPosition, WordDefinition};
