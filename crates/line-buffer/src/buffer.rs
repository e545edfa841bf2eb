//! Line buffer
//!
//! Owns the document's lines and end-of-line sequence, applies range edits, and converts
//! between character offsets and positions through a lazily built [`PrefixSumIndex`].
//!
//! The index has two states. It starts `Unbuilt`, is built by the first offset/position query,
//! and from then on is patched incrementally by every edit. Only an end-of-line change sends
//! it back to `Unbuilt`, because every line weight includes the end-of-line length.
//!
//! Weight policy: every line weighs its length plus the end-of-line length, except the last
//! line, which carries no trailing end-of-line. The index total therefore equals the character
//! count of [`LineBuffer::get_text`].

use crate::error::{ContractViolation, InvariantViolation, Result};
use crate::line_ending::EndOfLine;
use crate::options::{BufferOptions, VerifyLevel, ViolationPolicy};
use crate::position::{Position, Range, TextEdit};
use crate::prefix_sum::PrefixSumIndex;
use crate::text::{char_len, char_to_byte, contains_line_break, split_lines};
use tracing::{debug, error, trace};

#[derive(Debug, Clone, Default)]
enum IndexState {
    #[default]
    Unbuilt,
    Built(PrefixSumIndex),
}

impl IndexState {
    fn get_or_build(&mut self, build: impl FnOnce() -> PrefixSumIndex) -> &PrefixSumIndex {
        if let IndexState::Unbuilt = self {
            *self = IndexState::Built(build());
        }
        match self {
            IndexState::Built(index) => index,
            IndexState::Unbuilt => unreachable!("index was built above"),
        }
    }
}

/// A document held as lines, with incremental offset/position conversion.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    /// Line contents without terminators. Never empty.
    lines: Vec<String>,
    eol: EndOfLine,
    version: u64,
    /// Document length in characters, tracked independently of the index.
    char_len: usize,
    index: IndexState,
    options: BufferOptions,
}

impl LineBuffer {
    /// Create a buffer from lines that carry no line terminators.
    ///
    /// An empty `lines` vector is treated as a single empty line.
    pub fn new(lines: Vec<String>, eol: EndOfLine, version: u64) -> Result<Self> {
        if let Some(i) = lines.iter().position(|line| contains_line_break(line)) {
            return Err(ContractViolation::EmbeddedLineBreak { line_number: i + 1 });
        }
        let mut lines = lines;
        if lines.is_empty() {
            lines.push(String::new());
        }
        let char_len = document_len(&lines, eol);
        Ok(Self {
            lines,
            eol,
            version,
            char_len,
            index: IndexState::Unbuilt,
            options: BufferOptions::default(),
        })
    }

    /// Create a buffer from raw text, splitting on any line break and detecting the dominant
    /// end-of-line sequence.
    pub fn from_text(text: &str, version: u64) -> Self {
        let eol = EndOfLine::detect_in_text(text);
        let lines: Vec<String> = split_lines(text).into_iter().map(str::to_string).collect();
        let char_len = document_len(&lines, eol);
        Self {
            lines,
            eol,
            version,
            char_len,
            index: IndexState::Unbuilt,
            options: BufferOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: BufferOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> BufferOptions {
        self.options
    }

    /// Version supplied by the most recent [`apply_edit`](Self::apply_edit).
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Document end-of-line sequence.
    pub fn eol(&self) -> EndOfLine {
        self.eol
    }

    /// Number of lines (at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Document length in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// All lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Owned copy of all lines.
    pub fn lines_content(&self) -> Vec<String> {
        self.lines.clone()
    }

    /// Content of a 1-based line.
    pub fn line_content(&self, line_number: usize) -> Result<&str> {
        check_line(&self.lines, line_number)?;
        Ok(&self.lines[line_number - 1])
    }

    /// Full text, lines joined with the document end-of-line.
    pub fn get_text(&self) -> String {
        self.lines.join(self.eol.as_str())
    }

    /// Whether the prefix-sum index is currently built.
    pub fn is_index_built(&self) -> bool {
        matches!(self.index, IndexState::Built(_))
    }

    /// Check that `position` lies inside the document.
    pub fn validate_position(&self, position: Position) -> Result<()> {
        check_position(&self.lines, position)
    }

    /// Check that both ends of `range` lie inside the document and `start <= end`.
    pub fn validate_range(&self, range: Range) -> Result<()> {
        check_range(&self.lines, range)
    }

    /// Move an arbitrary position to the nearest valid one.
    ///
    /// Line numbers below 1 go to the document start, line numbers past the end go to the
    /// document end, and columns past the line end go to the line end. Nothing else in the
    /// buffer clamps; this is for callers that explicitly want lenient coordinates.
    pub fn clamp_position(&self, position: Position) -> Position {
        if position.line_number < 1 {
            return Position::new(1, 0);
        }
        if position.line_number > self.lines.len() {
            let last = self.lines.len();
            return Position::new(last, char_len(&self.lines[last - 1]));
        }
        let line_len = char_len(&self.lines[position.line_number - 1]);
        Position::new(position.line_number, position.column.min(line_len))
    }

    /// Text covered by `range`, with line breaks rendered as the document end-of-line.
    pub fn value_in_range(&self, range: Range) -> Result<String> {
        check_range(&self.lines, range)?;
        Ok(text_in_range(&self.lines, self.eol, range))
    }

    /// Ensure the index is built and borrow a read-only view for offset/position queries.
    pub fn reader(&mut self) -> BufferReader<'_> {
        let lines = &self.lines;
        let eol = self.eol;
        let index = self.index.get_or_build(|| {
            debug!(line_count = lines.len(), %eol, "building line index");
            build_index(lines, eol)
        });
        BufferReader {
            lines: &self.lines,
            index,
        }
    }

    /// Character offset of `position`.
    pub fn offset_at(&mut self, position: Position) -> Result<usize> {
        self.reader().offset_at(position)
    }

    /// Position of a character offset.
    pub fn position_at(&mut self, offset: usize) -> Result<Position> {
        self.reader().position_at(offset)
    }

    /// Change the document end-of-line sequence.
    ///
    /// Line contents are untouched; the index is dropped and rebuilt on the next query.
    pub fn set_eol(&mut self, eol: EndOfLine) {
        if eol == self.eol {
            return;
        }
        let breaks = self.lines.len() - 1;
        self.char_len = self.char_len - breaks * self.eol.char_len() + breaks * eol.char_len();
        self.eol = eol;
        if self.is_index_built() {
            debug!(%eol, "end-of-line changed, dropping line index");
        }
        self.index = IndexState::Unbuilt;
    }

    /// Apply a batch of edits, then set the version to `new_version`.
    ///
    /// `new_eol`, when it differs from the current sequence, is applied first. Edits are applied
    /// in order, each against the document produced by the previous one. If any edit is out of
    /// range, every edit already applied from this batch is reverted, the end-of-line is
    /// restored, the version is left alone, and the violation is returned.
    pub fn apply_edit(
        &mut self,
        edits: &[TextEdit],
        new_eol: Option<EndOfLine>,
        new_version: u64,
    ) -> Result<()> {
        trace!(
            edits = edits.len(),
            version = new_version,
            "applying edit batch"
        );
        let previous_eol = self.eol;
        // Lines are untouched by an EOL change, so the old index is valid again after rollback.
        let saved_index = match new_eol {
            Some(eol) if eol != self.eol => {
                let saved = std::mem::take(&mut self.index);
                self.set_eol(eol);
                Some(saved)
            }
            _ => None,
        };

        let mut undo = Vec::new();
        for edit in edits {
            match self.apply_single(edit) {
                Ok(Some(inverse)) => undo.push(inverse),
                Ok(None) => {}
                Err(err) => {
                    let reverted = self.revert(undo);
                    self.set_eol(previous_eol);
                    match reverted {
                        Ok(()) => {
                            if let Some(saved) = saved_index {
                                self.index = saved;
                            }
                        }
                        Err(violation) => self.recover(violation),
                    }
                    return Err(err);
                }
            }
        }

        self.version = new_version;
        self.check_after_edit();
        Ok(())
    }

    /// Apply one edit and return the edit that undoes it, or `None` for a no-op.
    fn apply_single(&mut self, edit: &TextEdit) -> Result<Option<TextEdit>> {
        let range = edit.range;
        check_range(&self.lines, range)?;
        if edit.is_noop() {
            return Ok(None);
        }

        let removed = text_in_range(&self.lines, self.eol, range);
        let start_idx = range.start.line_number - 1;
        let end_idx = range.end.line_number - 1;

        let inserted_end = if range.is_single_line() && !contains_line_break(&edit.text) {
            let line = &mut self.lines[start_idx];
            let from = char_to_byte(line, range.start.column);
            let to = char_to_byte(line, range.end.column);
            line.replace_range(from..to, &edit.text);

            if let IndexState::Built(index) = &mut self.index {
                index.change_value(start_idx, line_weight(&self.lines, start_idx, self.eol));
            }
            self.char_len = self.char_len - char_len(&removed) + char_len(&edit.text);
            Position::new(
                range.start.line_number,
                range.start.column + char_len(&edit.text),
            )
        } else {
            let first = &self.lines[start_idx];
            let last = &self.lines[end_idx];
            let prefix = first[..char_to_byte(first, range.start.column)].to_string();
            let suffix = last[char_to_byte(last, range.end.column)..].to_string();

            let parts = split_lines(&edit.text);
            let inserted_len = parts.iter().map(|part| char_len(part)).sum::<usize>()
                + (parts.len() - 1) * self.eol.char_len();
            let last_part_len = parts.last().map_or(0, |part| char_len(part));

            let mut replacement: Vec<String> = parts.into_iter().map(str::to_string).collect();
            replacement[0].insert_str(0, &prefix);
            if let Some(tail) = replacement.last_mut() {
                tail.push_str(&suffix);
            }

            let removed_count = end_idx - start_idx + 1;
            let inserted_count = replacement.len();
            self.lines.splice(start_idx..=end_idx, replacement);

            if let IndexState::Built(index) = &mut self.index {
                let weights = (start_idx..start_idx + inserted_count)
                    .map(|i| line_weight(&self.lines, i, self.eol));
                if removed_count == inserted_count {
                    for (i, weight) in (start_idx..).zip(weights) {
                        index.change_value(i, weight);
                    }
                } else {
                    trace!(
                        start = start_idx,
                        removed = removed_count,
                        inserted = inserted_count,
                        "splicing line index"
                    );
                    index.splice_values(start_idx, removed_count, weights.collect());
                }
            }
            self.char_len = self.char_len - char_len(&removed) + inserted_len;

            let end_column = if inserted_count == 1 {
                range.start.column + last_part_len
            } else {
                last_part_len
            };
            Position::new(range.start.line_number + inserted_count - 1, end_column)
        };

        Ok(Some(TextEdit::new(
            Range::from_positions(range.start, inserted_end),
            removed,
        )))
    }

    /// Apply recorded inverse edits, newest first.
    fn revert(&mut self, undo: Vec<TextEdit>) -> std::result::Result<(), InvariantViolation> {
        for inverse in undo.into_iter().rev() {
            // Inverse edits are derived from the buffer itself and are always in range.
            self.apply_single(&inverse)
                .map_err(InvariantViolation::RollbackFailed)?;
        }
        Ok(())
    }

    fn check_after_edit(&mut self) {
        let IndexState::Built(index) = &self.index else {
            return;
        };
        let result = match self.options.verify {
            VerifyLevel::Off => return,
            VerifyLevel::Totals => check_total(index, self.lines.len(), self.char_len),
            VerifyLevel::Full => verify_index(index, &self.lines, self.eol)
                .and_then(|()| check_total(index, self.lines.len(), self.char_len)),
        };
        if let Err(violation) = result {
            self.recover(violation);
        }
    }

    fn recover(&mut self, violation: InvariantViolation) {
        match self.options.on_violation {
            ViolationPolicy::Panic => panic!("line index invariant violated: {violation}"),
            ViolationPolicy::Rebuild => {
                error!(%violation, "line index out of sync, rebuilding");
                self.char_len = document_len(&self.lines, self.eol);
                self.index = IndexState::Built(build_index(&self.lines, self.eol));
            }
        }
    }

    /// Check the tracked length and, when built, the index against the line contents.
    pub fn verify(&self) -> std::result::Result<(), InvariantViolation> {
        let actual = document_len(&self.lines, self.eol);
        if self.char_len != actual {
            return Err(InvariantViolation::LengthMismatch {
                tracked: self.char_len,
                actual,
            });
        }
        if let IndexState::Built(index) = &self.index {
            verify_index(index, &self.lines, self.eol)?;
            check_total(index, self.lines.len(), actual)?;
        }
        Ok(())
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::from_text("", 0)
    }
}

/// Read-only view of a [`LineBuffer`] with a built index.
///
/// Obtained from [`LineBuffer::reader`]. Readers are `Copy` and can be shared across threads;
/// the borrow keeps the buffer from being edited while any reader is alive.
#[derive(Debug, Clone, Copy)]
pub struct BufferReader<'a> {
    lines: &'a [String],
    index: &'a PrefixSumIndex,
}

impl<'a> BufferReader<'a> {
    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Document length in characters.
    pub fn char_len(&self) -> usize {
        self.index.total_weight()
    }

    /// Content of a 1-based line.
    pub fn line_content(&self, line_number: usize) -> Result<&'a str> {
        check_line(self.lines, line_number)?;
        Ok(&self.lines[line_number - 1])
    }

    /// Offset of the first character of a 1-based line.
    pub fn line_start_offset(&self, line_number: usize) -> Result<usize> {
        check_line(self.lines, line_number)?;
        Ok(self.index.sum_before(line_number - 1))
    }

    /// Character offset of `position`.
    pub fn offset_at(&self, position: Position) -> Result<usize> {
        check_position(self.lines, position)?;
        Ok(self.index.sum_before(position.line_number - 1) + position.column)
    }

    /// Position of a character offset.
    ///
    /// An offset that falls inside a two-character end-of-line (between `'\r'` and `'\n'`)
    /// resolves to the end of its line.
    pub fn position_at(&self, offset: usize) -> Result<Position> {
        let len = self.index.total_weight();
        if offset > len {
            return Err(ContractViolation::OffsetOutOfRange { offset, len });
        }
        let (index, remainder) = self.index.locate(offset);
        let line_len = char_len(&self.lines[index]);
        Ok(Position::new(index + 1, remainder.min(line_len)))
    }
}

fn line_weight(lines: &[String], index: usize, eol: EndOfLine) -> usize {
    let eol_len = if index + 1 < lines.len() {
        eol.char_len()
    } else {
        0
    };
    char_len(&lines[index]) + eol_len
}

fn build_index(lines: &[String], eol: EndOfLine) -> PrefixSumIndex {
    (0..lines.len())
        .map(|i| line_weight(lines, i, eol))
        .collect()
}

fn document_len(lines: &[String], eol: EndOfLine) -> usize {
    lines.iter().map(|line| char_len(line)).sum::<usize>()
        + lines.len().saturating_sub(1) * eol.char_len()
}

fn verify_index(
    index: &PrefixSumIndex,
    lines: &[String],
    eol: EndOfLine,
) -> std::result::Result<(), InvariantViolation> {
    if index.len() != lines.len() {
        return Err(InvariantViolation::LineCountMismatch {
            indexed: index.len(),
            actual: lines.len(),
        });
    }
    index.verify()?;
    for (i, &indexed) in index.values().iter().enumerate() {
        let expected = line_weight(lines, i, eol);
        if indexed != expected {
            return Err(InvariantViolation::WeightMismatch {
                index: i,
                indexed,
                expected,
            });
        }
    }
    Ok(())
}

fn check_total(
    index: &PrefixSumIndex,
    line_count: usize,
    char_len: usize,
) -> std::result::Result<(), InvariantViolation> {
    if index.len() != line_count {
        return Err(InvariantViolation::LineCountMismatch {
            indexed: index.len(),
            actual: line_count,
        });
    }
    let indexed = index.sum_before(line_count);
    if indexed != char_len {
        return Err(InvariantViolation::TotalMismatch {
            indexed,
            actual: char_len,
        });
    }
    Ok(())
}

fn check_line(lines: &[String], line_number: usize) -> Result<()> {
    if line_number < 1 || line_number > lines.len() {
        return Err(ContractViolation::LineOutOfRange {
            line_number,
            line_count: lines.len(),
        });
    }
    Ok(())
}

fn check_position(lines: &[String], position: Position) -> Result<()> {
    check_line(lines, position.line_number)?;
    let line_len = char_len(&lines[position.line_number - 1]);
    if position.column > line_len {
        return Err(ContractViolation::ColumnOutOfRange {
            line_number: position.line_number,
            column: position.column,
            line_len,
        });
    }
    Ok(())
}

fn check_range(lines: &[String], range: Range) -> Result<()> {
    check_position(lines, range.start)?;
    check_position(lines, range.end)?;
    if range.end < range.start {
        return Err(ContractViolation::InvertedRange {
            start_line: range.start.line_number,
            start_column: range.start.column,
            end_line: range.end.line_number,
            end_column: range.end.column,
        });
    }
    Ok(())
}

/// Text of an already validated range.
fn text_in_range(lines: &[String], eol: EndOfLine, range: Range) -> String {
    let start_idx = range.start.line_number - 1;
    let end_idx = range.end.line_number - 1;
    let first = &lines[start_idx];

    if start_idx == end_idx {
        let from = char_to_byte(first, range.start.column);
        let to = char_to_byte(first, range.end.column);
        return first[from..to].to_string();
    }

    let last = &lines[end_idx];
    let mut out = String::new();
    out.push_str(&first[char_to_byte(first, range.start.column)..]);
    for line in &lines[start_idx + 1..end_idx] {
        out.push_str(eol.as_str());
        out.push_str(line);
    }
    out.push_str(eol.as_str());
    out.push_str(&last[..char_to_byte(last, range.end.column)]);
    out
}
