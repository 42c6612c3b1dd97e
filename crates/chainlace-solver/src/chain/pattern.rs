use std::fmt::{self, Display};

use chainlace_core::{Digit, DigitPositions, DigitSet, House, Position};

/// `n` cells of one house holding exactly `n + 1` candidate digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlmostLockedSet {
    /// Cells of the set.
    pub positions: DigitPositions,
    /// Union of the candidates of the cells.
    pub digits: DigitSet,
    /// First house (in [`House::ALL`] order) containing every cell.
    pub house: House,
}

/// Four cells forming a potential deadly pattern on two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniqueRectanglePattern {
    /// The four rectangle cells.
    pub cells: DigitPositions,
    /// The two digits that could swap diagonally.
    pub digits: (Digit, Digit),
}

/// A pivot `{x,y,z}` with wings `{x,z}` and `{y,z}` that both see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct XyzWingPattern {
    /// The three-candidate cell.
    pub pivot: Position,
    /// Wing sharing `x` with the pivot.
    pub wing1: Position,
    /// Wing sharing `y` with the pivot.
    pub wing2: Position,
    /// Digit common to all three cells.
    pub z: Digit,
}

/// The structure justifying a link that is not a plain candidate relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupedLinkPattern {
    /// Link inside an almost locked set.
    AlmostLockedSet(AlmostLockedSet),
    /// Link forced by avoiding a unique rectangle.
    UniqueRectangle(UniqueRectanglePattern),
    /// Link forced by an XYZ-Wing.
    XyzWing(XyzWingPattern),
}

impl GroupedLinkPattern {
    /// Cells making up the pattern.
    #[must_use]
    pub fn cells(&self) -> DigitPositions {
        match self {
            GroupedLinkPattern::AlmostLockedSet(als) => als.positions,
            GroupedLinkPattern::UniqueRectangle(ur) => ur.cells,
            GroupedLinkPattern::XyzWing(wing) => {
                DigitPositions::from_iter([wing.pivot, wing.wing1, wing.wing2])
            }
        }
    }

    /// Digits the pattern is built on.
    #[must_use]
    pub fn digits(&self) -> DigitSet {
        match self {
            GroupedLinkPattern::AlmostLockedSet(als) => als.digits,
            GroupedLinkPattern::UniqueRectangle(ur) => DigitSet::from_iter([ur.digits.0, ur.digits.1]),
            GroupedLinkPattern::XyzWing(wing) => DigitSet::from_elem(wing.z),
        }
    }
}

impl Display for GroupedLinkPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupedLinkPattern::AlmostLockedSet(als) => {
                write!(f, "ALS {}:", als.house)?;
                for digit in als.digits {
                    write!(f, "{digit}")?;
                }
                Ok(())
            }
            GroupedLinkPattern::UniqueRectangle(ur) => {
                write!(f, "UR ")?;
                for pos in ur.cells {
                    write!(f, "{pos}")?;
                }
                write!(f, ":{}{}", ur.digits.0, ur.digits.1)
            }
            GroupedLinkPattern::XyzWing(wing) => write!(
                f,
                "XYZ-Wing {}/{}/{}:{}",
                wing.pivot, wing.wing1, wing.wing2, wing.z
            ),
        }
    }
}
