//! Wire shapes of mirror events.
//!
//! Field names are camelCase on the wire. Wire ranges use 1-based lines **and** 1-based
//! columns; they are converted to the buffer's 1-based-line, 0-based-column coordinates before
//! reaching [`line_buffer::LineBuffer`].

use crate::error::SyncError;
use line_buffer::{EndOfLine, Range, TextEdit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Initial content of a mirrored model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModelData {
    /// Model URL, the mirror's key.
    pub url: String,
    /// Version of the initial content.
    pub version_id: u64,
    /// Lines without terminators.
    pub lines: Vec<String>,
    /// End-of-line sequence (`"\n"`, `"\r\n"` or `"\r"`).
    #[serde(rename = "EOL")]
    pub eol: String,
}

/// A range on the wire: 1-based lines, 1-based columns, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRange {
    /// Start line number.
    pub start_line_number: usize,
    /// Start column.
    pub start_column: usize,
    /// End line number.
    pub end_line_number: usize,
    /// End column.
    pub end_column: usize,
}

impl WireRange {
    /// Create a wire range.
    pub fn new(
        start_line_number: usize,
        start_column: usize,
        end_line_number: usize,
        end_column: usize,
    ) -> Self {
        Self {
            start_line_number,
            start_column,
            end_line_number,
            end_column,
        }
    }

    /// Convert to buffer coordinates.
    pub fn to_range(self) -> Result<Range, SyncError> {
        let start_column = self
            .start_column
            .checked_sub(1)
            .ok_or_else(|| SyncError::ZeroColumn(self.to_string()))?;
        let end_column = self
            .end_column
            .checked_sub(1)
            .ok_or_else(|| SyncError::ZeroColumn(self.to_string()))?;
        Ok(Range::new(
            self.start_line_number,
            start_column,
            self.end_line_number,
            end_column,
        ))
    }
}

impl fmt::Display for WireRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{} -> {},{}]",
            self.start_line_number, self.start_column, self.end_line_number, self.end_column
        )
    }
}

/// One replaced range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelContentChange {
    /// The replaced range.
    pub range: WireRange,
    /// Replacement text.
    pub text: String,
}

/// A batch of changes that moves a model to `version_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelChangedEvent {
    /// Changes in application order.
    pub changes: Vec<ModelContentChange>,
    /// New end-of-line sequence, if the event carries one.
    #[serde(default)]
    pub eol: Option<String>,
    /// Version the model transitions to.
    pub version_id: u64,
}

impl ModelChangedEvent {
    /// Convert the wire changes to buffer edits.
    pub fn text_edits(&self) -> Result<Vec<TextEdit>, SyncError> {
        self.changes
            .iter()
            .map(|change| Ok(TextEdit::new(change.range.to_range()?, change.text.clone())))
            .collect()
    }

    /// Parse the optional end-of-line sequence.
    pub fn end_of_line(&self) -> Result<Option<EndOfLine>, SyncError> {
        self.eol
            .as_deref()
            .map(EndOfLine::from_sequence)
            .transpose()
            .map_err(SyncError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_range_shifts_columns() {
        let range = WireRange::new(2, 1, 3, 5).to_range().unwrap();
        assert_eq!(range, Range::new(2, 0, 3, 4));
    }

    #[test]
    fn test_zero_column_is_rejected() {
        assert!(matches!(
            WireRange::new(1, 0, 1, 1).to_range(),
            Err(SyncError::ZeroColumn(_))
        ));
    }

    #[test]
    fn test_invalid_eol_is_rejected() {
        let event = ModelChangedEvent {
            changes: Vec::new(),
            eol: Some("\t".to_string()),
            version_id: 1,
        };
        assert!(matches!(event.end_of_line(), Err(SyncError::Buffer(_))));
    }
}
