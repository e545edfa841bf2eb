//! Offset/position conversion.
//!
//! Weight policy under test: every line except the last weighs its length plus the
//! end-of-line length, so the largest offset equals the length of `get_text()`.

use line_buffer::{ContractViolation, EndOfLine, LineBuffer, Position, PrefixSumIndex};
use std::thread;

#[test]
fn test_round_trip_every_offset_lf() {
    let mut buf = LineBuffer::from_text("fn main() {\n    let x = 1;\n\n}\n", 1);
    let len = buf.get_text().chars().count();
    assert_eq!(buf.char_len(), len);

    let reader = buf.reader();
    assert_eq!(reader.char_len(), len);
    for offset in 0..=len {
        let position = reader.position_at(offset).unwrap();
        assert_eq!(reader.offset_at(position).unwrap(), offset, "offset {offset}");
    }
}

#[test]
fn test_total_weight_equals_text_length() {
    for eol in [EndOfLine::Lf, EndOfLine::CrLf, EndOfLine::Cr] {
        let mut buf = LineBuffer::from_text("ab\ncd\n\nef", 0);
        buf.set_eol(eol);
        let text_len = buf.get_text().chars().count();
        let reader = buf.reader();
        assert_eq!(reader.char_len(), text_len, "{eol}");
        assert_eq!(
            reader.line_start_offset(4).unwrap() + 2,
            text_len,
            "last line has no trailing end-of-line ({eol})"
        );
    }
}

#[test]
fn test_crlf_offsets() {
    let mut buf = LineBuffer::from_text("ab\r\ncd", 0);
    assert_eq!(buf.offset_at(Position::new(2, 0)).unwrap(), 4);
    assert_eq!(buf.position_at(2).unwrap(), Position::new(1, 2));
    // Between '\r' and '\n': no position exists, resolve to the end of the line.
    assert_eq!(buf.position_at(3).unwrap(), Position::new(1, 2));
    assert_eq!(buf.position_at(4).unwrap(), Position::new(2, 0));
    assert_eq!(buf.position_at(6).unwrap(), Position::new(2, 2));
}

#[test]
fn test_round_trip_crlf_outside_eol() {
    let mut buf = LineBuffer::from_text("one\r\ntwo\r\n\r\nthree", 0);
    let text: Vec<char> = buf.get_text().chars().collect();
    let reader = buf.reader();
    for offset in 0..=text.len() {
        let inside_eol = offset > 0 && text[offset - 1] == '\r' && text.get(offset) == Some(&'\n');
        if inside_eol {
            continue;
        }
        let position = reader.position_at(offset).unwrap();
        assert_eq!(reader.offset_at(position).unwrap(), offset);
    }
}

#[test]
fn test_empty_document() {
    let mut buf = LineBuffer::from_text("", 0);
    assert_eq!(buf.position_at(0).unwrap(), Position::new(1, 0));
    assert_eq!(buf.offset_at(Position::new(1, 0)).unwrap(), 0);

    let index = PrefixSumIndex::build(vec![0]);
    assert_eq!(index.locate(0), (0, 0));
}

#[test]
fn test_document_end() {
    let mut buf = LineBuffer::from_text("abc\ndef", 0);
    assert_eq!(buf.position_at(7).unwrap(), Position::new(2, 3));
    assert_eq!(buf.offset_at(Position::new(2, 3)).unwrap(), 7);
}

#[test]
fn test_out_of_range_offset_fails_fast() {
    let mut buf = LineBuffer::from_text("abc", 0);
    assert_eq!(
        buf.position_at(4),
        Err(ContractViolation::OffsetOutOfRange { offset: 4, len: 3 })
    );
}

#[test]
fn test_out_of_range_position_fails_fast() {
    let mut buf = LineBuffer::from_text("abc\nd", 0);
    assert_eq!(
        buf.offset_at(Position::new(3, 0)),
        Err(ContractViolation::LineOutOfRange {
            line_number: 3,
            line_count: 2,
        })
    );
    assert_eq!(
        buf.offset_at(Position::new(0, 0)),
        Err(ContractViolation::LineOutOfRange {
            line_number: 0,
            line_count: 2,
        })
    );
    assert!(matches!(
        buf.offset_at(Position::new(2, 2)),
        Err(ContractViolation::ColumnOutOfRange { .. })
    ));
}

#[test]
fn test_readers_share_across_threads() {
    let text: String = (0..2_000).map(|i| format!("line {i}\n")).collect();
    let mut buf = LineBuffer::from_text(&text, 0);
    let reader = buf.reader();

    thread::scope(|scope| {
        for chunk in 0..4 {
            scope.spawn(move || {
                for line in (chunk * 500 + 1)..=(chunk * 500 + 500) {
                    let offset = reader.line_start_offset(line).unwrap();
                    assert_eq!(reader.position_at(offset).unwrap(), Position::new(line, 0));
                }
            });
        }
    });
}

#[test]
fn test_large_document() {
    let lines: Vec<String> = (0..10_000).map(|i| format!("Line {i}")).collect();
    let mut buf = LineBuffer::new(lines, EndOfLine::Lf, 0).unwrap();

    let offset = buf.offset_at(Position::new(5_001, 2)).unwrap();
    assert_eq!(buf.position_at(offset).unwrap(), Position::new(5_001, 2));
    assert_eq!(buf.line_content(5_001).unwrap(), "Line 5000");
}
