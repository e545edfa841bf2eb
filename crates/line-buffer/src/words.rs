//! Word lookup over buffer lines.
//!
//! Words are whatever a [`WordDefinition`] regex matches inside a single line. Scanning a line
//! stops at the first empty match.

use crate::buffer::LineBuffer;
use crate::error::Result;
use crate::position::{Position, Range};
use crate::text::char_len;
use regex::Regex;
use std::sync::LazyLock;

/// Numbers with a decimal point, or runs of characters that are neither whitespace nor common
/// punctuation.
pub const DEFAULT_WORD_PATTERN: &str =
    r#"(-?\d*\.\d\w*)|([^`~!@#$%^&*()\-=+\[{\]}\\|;:'",.<>/?\s]+)"#;

static DEFAULT_WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_WORD_PATTERN).expect("default word pattern must compile")
});

/// A compiled word pattern.
#[derive(Debug, Clone)]
pub struct WordDefinition {
    regex: Regex,
}

impl WordDefinition {
    /// Compile a custom word pattern.
    pub fn new(pattern: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Wrap an already compiled regex.
    pub fn from_regex(regex: Regex) -> Self {
        Self { regex }
    }

    /// Character column spans `(start, end)` of every word in `line`.
    fn spans(&self, line: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut column = 0;
        let mut byte = 0;
        for m in self.regex.find_iter(line) {
            if m.is_empty() {
                break;
            }
            column += char_len(&line[byte..m.start()]);
            let start = column;
            column += char_len(m.as_str());
            byte = m.end();
            spans.push((start, column));
        }
        spans
    }
}

impl Default for WordDefinition {
    fn default() -> Self {
        Self {
            regex: DEFAULT_WORD_REGEX.clone(),
        }
    }
}

/// A word and its column span on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAtPosition {
    /// The word text.
    pub word: String,
    /// 0-based start column (inclusive).
    pub start_column: usize,
    /// 0-based end column (exclusive).
    pub end_column: usize,
}

impl LineBuffer {
    /// Range of the word touching `position`, if any.
    ///
    /// A word touches the position when `start <= column <= end`, so a caret directly after
    /// a word still finds it.
    pub fn word_at_position(
        &self,
        position: Position,
        definition: &WordDefinition,
    ) -> Result<Option<Range>> {
        self.validate_position(position)?;
        let line = self.line_content(position.line_number)?;
        Ok(definition
            .spans(line)
            .into_iter()
            .find(|&(start, end)| start <= position.column && position.column <= end)
            .map(|(start, end)| {
                Range::new(position.line_number, start, position.line_number, end)
            }))
    }

    /// The part of the word at `position` that lies before the position.
    ///
    /// Returns an empty word spanning `column..column` when no word touches the position.
    pub fn word_until_position(
        &self,
        position: Position,
        definition: &WordDefinition,
    ) -> Result<WordAtPosition> {
        let Some(range) = self.word_at_position(position, definition)? else {
            return Ok(WordAtPosition {
                word: String::new(),
                start_column: position.column,
                end_column: position.column,
            });
        };
        let line = self.line_content(position.line_number)?;
        Ok(WordAtPosition {
            word: line
                .chars()
                .skip(range.start.column)
                .take(position.column - range.start.column)
                .collect(),
            start_column: range.start.column,
            end_column: position.column,
        })
    }

    /// Every word on a 1-based line.
    pub fn line_words(
        &self,
        line_number: usize,
        definition: &WordDefinition,
    ) -> Result<Vec<WordAtPosition>> {
        let line = self.line_content(line_number)?;
        Ok(definition
            .spans(line)
            .into_iter()
            .map(|(start, end)| WordAtPosition {
                word: line.chars().skip(start).take(end - start).collect(),
                start_column: start,
                end_column: end,
            })
            .collect())
    }

    /// Every word of the document, line by line.
    pub fn words<'a>(&'a self, definition: &'a WordDefinition) -> impl Iterator<Item = &'a str> {
        self.lines().iter().flat_map(move |line| {
            definition
                .regex
                .find_iter(line)
                .take_while(|m| !m.is_empty())
                .map(|m| m.as_str())
        })
    }
}
