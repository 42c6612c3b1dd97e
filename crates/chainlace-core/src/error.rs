use derive_more::{Display, Error};

use crate::{Digit, Position};

/// A contradiction found in a [`CandidateGrid`](crate::CandidateGrid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ConsistencyError {
    /// A cell has no candidate left, or a digit has no place left in a house.
    #[display("no candidates remain")]
    NoCandidates,
    /// Two decided cells in one house hold the same digit.
    #[display("digit {digit} is decided twice around {position}")]
    CandidateConflict {
        /// One of the conflicting cells.
        position: Position,
        /// The duplicated digit.
        digit: Digit,
    },
}

/// Failure to parse a [`DigitGrid`](crate::DigitGrid) from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum DigitGridParseError {
    /// The text does not hold exactly 81 cells.
    #[display("expected 81 cells, found {len}")]
    InvalidLength {
        /// Number of cells found.
        len: usize,
    },
    /// A character other than `1`-`9`, `.`, `_`, `0` or whitespace.
    #[display("invalid character {ch:?}")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
    },
}
