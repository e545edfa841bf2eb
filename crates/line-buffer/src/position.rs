//! Positions, ranges and edits.
//!
//! Line numbers are 1-based. Columns are 0-based character (Unicode scalar value) offsets
//! within a line, valid from `0` up to and including the line's length. Ranges are half-open:
//! the character at `end` is not covered.

use std::fmt;

/// A location in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// 1-based line number.
    pub line_number: usize,
    /// 0-based character column.
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(line_number: usize, column: usize) -> Self {
        Self {
            line_number,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_number, self.column)
    }
}

/// A span between two positions, `start` inclusive and `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Start position (inclusive).
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
}

impl Range {
    /// Create a range from its four coordinates.
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start: Position::new(start_line, start_column),
            end: Position::new(end_line, end_column),
        }
    }

    /// Create a range from two positions.
    pub fn from_positions(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width range at `position`.
    pub fn empty_at(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Whether the range covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether start and end are on the same line.
    pub fn is_single_line(&self) -> bool {
        self.start.line_number == self.end.line_number
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Replace the text covered by `range` with `text`.
///
/// Edits in one batch are applied in order; each edit's coordinates refer to the document as
/// left by the previous edit of the same batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Range being replaced.
    pub range: Range,
    /// Replacement text. May contain `"\r\n"`, `'\n'` or `'\r'` line breaks in any mixture.
    pub text: String,
}

impl TextEdit {
    /// Create a new edit.
    pub fn new(range: Range, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    /// Insert `text` at `position`.
    pub fn insert(position: Position, text: impl Into<String>) -> Self {
        Self::new(Range::empty_at(position), text)
    }

    /// Delete the text covered by `range`.
    pub fn delete(range: Range) -> Self {
        Self::new(range, String::new())
    }

    /// An empty replacement over a zero-width range changes nothing.
    pub fn is_noop(&self) -> bool {
        self.range.is_empty() && self.text.is_empty()
    }
}
