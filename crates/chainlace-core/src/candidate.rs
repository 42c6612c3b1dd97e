//! A single candidate: one digit in one cell.

use std::fmt::{self, Display};

use crate::{Digit, Position};

/// A digit that may still occupy a cell.
///
/// Candidates order by their [`index`](Candidate::index): cell first, then digit.
///
/// # Examples
///
/// ```
/// use chainlace_core::{Candidate, Digit, Position};
///
/// let candidate = Candidate::new(Position::new(1, 0), Digit::D5);
/// assert_eq!(candidate.index(), 13);
/// assert_eq!(Candidate::from_index(13), candidate);
/// assert_eq!(candidate.to_string(), "r1c2(5)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Candidate {
    /// Cell holding the candidate.
    pub position: Position,
    /// Candidate digit.
    pub digit: Digit,
}

impl Candidate {
    /// Number of distinct candidates on a board.
    pub const COUNT: u16 = 729;

    /// Creates a candidate.
    #[must_use]
    #[inline]
    pub const fn new(position: Position, digit: Digit) -> Self {
        Self { position, digit }
    }

    /// Canonical index `cell * 9 + digit_index` (0-728).
    #[must_use]
    #[inline]
    pub fn index(self) -> u16 {
        u16::from(self.position.index()) * 9 + u16::from(self.digit.index())
    }

    /// Creates a candidate from its canonical index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 729 or greater.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_index(index: u16) -> Self {
        assert!(index < Self::COUNT);
        Self {
            position: Position::from_index((index / 9) as u8),
            digit: Digit::from_value((index % 9) as u8 + 1),
        }
    }
}

impl Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.position, self.digit)
    }
}
