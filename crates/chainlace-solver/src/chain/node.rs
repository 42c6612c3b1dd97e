use std::{
    fmt::{self, Display},
    ops::Not,
};

use chainlace_core::{Candidate, Digit, DigitPositions};

/// A non-empty set of cells sharing one candidate digit.
///
/// A set with one position is an ordinary candidate; a larger set is a grouped node,
/// read as "the digit is somewhere in these cells".
///
/// Sets order by their cells first, lowest cell first, then by digit.
///
/// # Examples
///
/// ```
/// use chainlace_core::{Digit, DigitPositions, Position};
/// use chainlace_solver::chain::CandidateSet;
///
/// let group = CandidateSet::new(
///     DigitPositions::from_iter([Position::new(0, 0), Position::new(1, 0)]),
///     Digit::D5,
/// )
/// .unwrap();
/// assert_eq!(group.to_string(), "r1c12(5)");
/// assert!(CandidateSet::new(DigitPositions::EMPTY, Digit::D5).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CandidateSet {
    positions: DigitPositions,
    digit: Digit,
}

impl CandidateSet {
    /// Creates a set, or `None` if `positions` is empty.
    #[must_use]
    pub fn new(positions: DigitPositions, digit: Digit) -> Option<Self> {
        (!positions.is_empty()).then_some(Self { positions, digit })
    }

    /// Creates a single-candidate set.
    #[must_use]
    pub fn from_candidate(candidate: Candidate) -> Self {
        Self {
            positions: DigitPositions::from_elem(candidate.position),
            digit: candidate.digit,
        }
    }

    /// Cells of the set.
    #[must_use]
    #[inline]
    pub fn positions(self) -> DigitPositions {
        self.positions
    }

    /// Digit shared by every cell of the set.
    #[must_use]
    #[inline]
    pub fn digit(self) -> Digit {
        self.digit
    }

    /// Returns `true` if the set spans more than one cell.
    #[must_use]
    #[inline]
    pub fn is_grouped(self) -> bool {
        self.positions.len() > 1
    }

    /// The candidate of a single-cell set.
    #[must_use]
    pub fn as_candidate(self) -> Option<Candidate> {
        self.positions
            .as_single()
            .map(|pos| Candidate::new(pos, self.digit))
    }

    /// Returns `true` if both sets hold the same digit and share a cell.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.digit == other.digit && !self.positions.is_disjoint(other.positions)
    }
}

impl From<Candidate> for CandidateSet {
    fn from(candidate: Candidate) -> Self {
        Self::from_candidate(candidate)
    }
}

impl Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.positions.iter();
        let Some(first) = iter.next() else {
            return Ok(());
        };
        if self.positions.len() == 1 {
            return write!(f, "{first}({})", self.digit);
        }
        if self.positions.iter().all(|pos| pos.y() == first.y()) {
            write!(f, "r{}c", first.y() + 1)?;
            for pos in self.positions {
                write!(f, "{}", pos.x() + 1)?;
            }
        } else if self.positions.iter().all(|pos| pos.x() == first.x()) {
            write!(f, "r")?;
            for pos in self.positions {
                write!(f, "{}", pos.y() + 1)?;
            }
            write!(f, "c{}", first.x() + 1)?;
        } else {
            write!(f, "{{{first}")?;
            for pos in iter {
                write!(f, ",{pos}")?;
            }
            write!(f, "}}")?;
        }
        write!(f, "({})", self.digit)
    }
}

/// Truth state asserted by a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Polarity {
    /// No candidate of the set is true.
    Off,
    /// At least one candidate of the set is true.
    On,
}

impl Not for Polarity {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Polarity::Off => Polarity::On,
            Polarity::On => Polarity::Off,
        }
    }
}

/// A candidate set together with an asserted truth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node {
    /// Candidates the node talks about.
    pub set: CandidateSet,
    /// Asserted state of the set.
    pub polarity: Polarity,
}

impl Node {
    /// Creates a node.
    #[must_use]
    #[inline]
    pub const fn new(set: CandidateSet, polarity: Polarity) -> Self {
        Self { set, polarity }
    }

    /// Creates an `On` node.
    #[must_use]
    #[inline]
    pub const fn on(set: CandidateSet) -> Self {
        Self::new(set, Polarity::On)
    }

    /// Creates an `Off` node.
    #[must_use]
    #[inline]
    pub const fn off(set: CandidateSet) -> Self {
        Self::new(set, Polarity::Off)
    }

    /// Returns `true` for `On` nodes.
    #[must_use]
    #[inline]
    pub fn is_on(self) -> bool {
        self.polarity == Polarity::On
    }
}

impl Not for Node {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::new(self.set, !self.polarity)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.polarity == Polarity::Off {
            write!(f, "!")?;
        }
        write!(f, "{}", self.set)
    }
}

#[cfg(test)]
mod tests {
    use chainlace_core::Position;

    use super::*;

    fn set(cells: &[(u8, u8)], digit: Digit) -> CandidateSet {
        CandidateSet::new(
            cells.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            digit,
        )
        .unwrap()
    }

    #[test]
    fn test_display() {
        assert_eq!(set(&[(1, 0)], Digit::D5).to_string(), "r1c2(5)");
        assert_eq!(set(&[(0, 0), (2, 0)], Digit::D3).to_string(), "r1c13(3)");
        assert_eq!(set(&[(4, 1), (4, 2)], Digit::D7).to_string(), "r23c5(7)");
        assert_eq!(
            set(&[(0, 0), (2, 1)], Digit::D1).to_string(),
            "{r1c1,r2c3}(1)"
        );
        assert_eq!(Node::off(set(&[(0, 0)], Digit::D9)).to_string(), "!r1c1(9)");
    }

    #[test]
    fn test_negation() {
        let node = Node::on(set(&[(0, 0)], Digit::D1));
        assert_eq!(!node, Node::off(node.set));
        assert_eq!(!!node, node);
        assert!(node.is_on());
    }

    #[test]
    fn test_candidate_conversion() {
        let candidate = Candidate::new(Position::new(3, 4), Digit::D2);
        let single = CandidateSet::from(candidate);
        assert_eq!(single.as_candidate(), Some(candidate));
        assert!(!single.is_grouped());
        assert_eq!(set(&[(0, 0), (1, 0)], Digit::D2).as_candidate(), None);
    }

    #[test]
    fn test_overlaps() {
        let group = set(&[(0, 0), (1, 0)], Digit::D4);
        assert!(group.overlaps(set(&[(1, 0)], Digit::D4)));
        assert!(!group.overlaps(set(&[(1, 0)], Digit::D5)));
        assert!(!group.overlaps(set(&[(2, 0)], Digit::D4)));
    }

    #[test]
    fn test_order_follows_board() {
        let a = set(&[(0, 0)], Digit::D9);
        let b = set(&[(1, 0)], Digit::D1);
        assert!(a < b);
        assert!(set(&[(0, 0)], Digit::D1) < a);
    }
}
