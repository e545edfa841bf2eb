//! End-of-line sequences.
//!
//! A document shares one end-of-line sequence across all of its lines. Line contents never
//! embed it; it only contributes to each line's weight in the prefix-sum index and to the
//! text produced by [`crate::LineBuffer::get_text`].

use crate::error::ContractViolation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The end-of-line sequence of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EndOfLine {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    CrLf,
    /// Classic Mac CR (`'\r'`).
    Cr,
}

impl EndOfLine {
    /// The literal sequence.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }

    /// Length of the sequence in characters.
    pub fn char_len(self) -> usize {
        match self {
            Self::CrLf => 2,
            Self::Lf | Self::Cr => 1,
        }
    }

    /// Parse an exact sequence, rejecting anything else.
    pub fn from_sequence(sequence: &str) -> Result<Self, ContractViolation> {
        match sequence {
            "\n" => Ok(Self::Lf),
            "\r\n" => Ok(Self::CrLf),
            "\r" => Ok(Self::Cr),
            other => Err(ContractViolation::InvalidEol(other.to_string())),
        }
    }

    /// Detect the dominant line ending from a source text.
    ///
    /// Policy: any CRLF wins, then any lone CR, otherwise LF (also for text without breaks).
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::CrLf
        } else if text.contains('\r') {
            Self::Cr
        } else {
            Self::Lf
        }
    }
}

impl FromStr for EndOfLine {
    type Err = ContractViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_sequence(s)
    }
}

impl fmt::Display for EndOfLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lf => "LF",
            Self::CrLf => "CRLF",
            Self::Cr => "CR",
        })
    }
}
