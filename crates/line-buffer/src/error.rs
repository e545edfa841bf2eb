//! Error types.
//!
//! Two kinds of failure exist:
//!
//! - [`ContractViolation`]: a caller passed an out-of-range line, column, or offset (or an
//!   unknown end-of-line sequence). Returned immediately and never clamped; the buffer is left
//!   exactly as it was before the call.
//! - [`InvariantViolation`]: the prefix-sum index disagrees with the line contents. This is
//!   unreachable in a correct implementation and is reported by [`crate::LineBuffer::verify`].

use thiserror::Error;

/// A caller-side precondition was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// Line number outside `1..=line_count`.
    #[error("line {line_number} is out of range (line count {line_count})")]
    LineOutOfRange {
        /// The offending 1-based line number.
        line_number: usize,
        /// Line count of the document at the time of the call.
        line_count: usize,
    },

    /// Column past the end of its line.
    #[error("column {column} is out of range on line {line_number} (line length {line_len})")]
    ColumnOutOfRange {
        /// 1-based line number.
        line_number: usize,
        /// The offending 0-based column.
        column: usize,
        /// Length of the line in characters.
        line_len: usize,
    },

    /// Offset past the end of the document.
    #[error("offset {offset} is out of range (document length {len})")]
    OffsetOutOfRange {
        /// The offending character offset.
        offset: usize,
        /// Document length in characters.
        len: usize,
    },

    /// Range whose end precedes its start.
    #[error("range end {end_line}:{end_column} precedes start {start_line}:{start_column}")]
    InvertedRange {
        /// Start line number.
        start_line: usize,
        /// Start column.
        start_column: usize,
        /// End line number.
        end_line: usize,
        /// End column.
        end_column: usize,
    },

    /// A line handed to the constructor contains a line break.
    #[error("line {line_number} contains an embedded line break")]
    EmbeddedLineBreak {
        /// 1-based line number.
        line_number: usize,
    },

    /// A string that is not `"\n"`, `"\r\n"`, or `"\r"` was offered as an end-of-line sequence.
    #[error("unsupported end-of-line sequence {0:?}")]
    InvalidEol(String),
}

/// The prefix-sum index drifted away from the line contents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// `sum_before(line_count)` does not match the document length.
    #[error("index total {indexed} does not match document length {actual}")]
    TotalMismatch {
        /// Total weight reported by the index.
        indexed: usize,
        /// Character count derived from the lines.
        actual: usize,
    },

    /// The tracked document length does not match the lines.
    #[error("tracked document length {tracked} does not match actual length {actual}")]
    LengthMismatch {
        /// Length maintained incrementally by the buffer.
        tracked: usize,
        /// Length recomputed from the lines.
        actual: usize,
    },

    /// The index holds a different number of weights than there are lines.
    #[error("index holds {indexed} weights for {actual} lines")]
    LineCountMismatch {
        /// Number of weights in the index.
        indexed: usize,
        /// Number of lines in the buffer.
        actual: usize,
    },

    /// One line's weight is wrong.
    #[error("weight of line index {index} is {indexed}, expected {expected}")]
    WeightMismatch {
        /// 0-based line index.
        index: usize,
        /// Weight stored in the index.
        indexed: usize,
        /// Weight derived from the line contents.
        expected: usize,
    },

    /// The Fenwick tree's cumulative sums disagree with its own weights.
    #[error("cumulative sums are corrupt: tree total {tree} vs weight total {weights}")]
    CorruptCumulative {
        /// Total computed through the tree.
        tree: usize,
        /// Total computed by summing the weights directly.
        weights: usize,
    },

    /// An inverse edit recorded during a failed batch could not be applied, so the lines no
    /// longer match their pre-batch contents.
    #[error("rollback of a failed edit batch did not apply: {0}")]
    RollbackFailed(ContractViolation),
}

/// Result alias for buffer operations that can only fail on caller input.
pub type Result<T, E = ContractViolation> = std::result::Result<T, E>;
