//! Board position representation.

use std::fmt::{self, Display};

use crate::{
    DigitPositions, House,
    containers::{Array9, Array81},
    index::{CellIndexSemantics, PositionSemantics},
};

/// A cell on the board, `x` being the column (0-8) and `y` the row (0-8).
///
/// Positions are ordered row-major, matching their [`index`](Position::index).
///
/// # Examples
///
/// ```
/// use chainlace_core::Position;
///
/// let pos = Position::new(4, 1);
/// assert_eq!(pos.index(), 13);
/// assert_eq!(pos.box_index(), 1);
/// assert_eq!(pos.to_string(), "r2c5");
/// assert!(pos.sees(Position::new(3, 0)));
/// assert!(!pos.sees(Position::new(0, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    // `y` first so the derived ordering is row-major.
    y: u8,
    x: u8,
}

impl Position {
    /// All 81 positions in row-major order.
    pub const ALL: [Self; 81] = {
        let mut all = [Self { x: 0, y: 0 }; 81];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 81 {
            all[i] = Self::from_index(i as u8);
            i += 1;
        }
        all
    };

    /// Creates a position.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is not in the range 0-8.
    #[must_use]
    #[inline]
    pub const fn new(x: u8, y: u8) -> Self {
        assert!(x < 9 && y < 9);
        Self { x, y }
    }

    /// Creates a position from its row-major index (0-80).
    ///
    /// # Panics
    ///
    /// Panics if `index` is 81 or greater.
    #[must_use]
    #[inline]
    pub const fn from_index(index: u8) -> Self {
        assert!(index < 81);
        Self {
            x: index % 9,
            y: index / 9,
        }
    }

    /// Creates the position of cell `i` (0-8) of box `box_index` (0-8).
    #[must_use]
    #[inline]
    pub const fn from_box(box_index: u8, i: u8) -> Self {
        assert!(box_index < 9 && i < 9);
        Self {
            x: (box_index % 3) * 3 + i % 3,
            y: (box_index / 3) * 3 + i / 3,
        }
    }

    /// Column (0-8).
    #[must_use]
    #[inline]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Row (0-8).
    #[must_use]
    #[inline]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Row-major index `y * 9 + x`.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u8 {
        self.y * 9 + self.x
    }

    /// Index of the box containing this cell.
    #[must_use]
    #[inline]
    pub const fn box_index(self) -> u8 {
        (self.y / 3) * 3 + self.x / 3
    }

    /// Index of this cell inside its box.
    #[must_use]
    #[inline]
    pub const fn box_cell_index(self) -> u8 {
        (self.y % 3) * 3 + self.x % 3
    }

    /// Top-left cell of the box containing this cell.
    #[must_use]
    #[inline]
    pub const fn box_origin(self) -> Self {
        Self {
            x: self.x / 3 * 3,
            y: self.y / 3 * 3,
        }
    }

    /// The row, column and box containing this cell.
    #[must_use]
    #[inline]
    pub const fn houses(self) -> [House; 3] {
        [
            House::Row { y: self.y },
            House::Column { x: self.x },
            House::Box {
                index: self.box_index(),
            },
        ]
    }

    /// Cells sharing a house with this one, excluding the cell itself.
    #[must_use]
    #[inline]
    pub fn house_peers(self) -> DigitPositions {
        HOUSE_PEERS[self]
    }

    /// Returns `true` if `other` is a different cell sharing a house with this one.
    #[must_use]
    #[inline]
    pub fn sees(self, other: Self) -> bool {
        self.house_peers().contains(other)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.y + 1, self.x + 1)
    }
}

const fn bit(x: u8, y: u8) -> u128 {
    1 << (y * 9 + x)
}

const ROW_BITS: [u128; 9] = {
    let mut rows = [0; 9];
    let mut y = 0;
    while y < 9 {
        let mut x = 0;
        while x < 9 {
            rows[y as usize] |= bit(x, y);
            x += 1;
        }
        y += 1;
    }
    rows
};

const COLUMN_BITS: [u128; 9] = {
    let mut columns = [0; 9];
    let mut x = 0;
    while x < 9 {
        let mut y = 0;
        while y < 9 {
            columns[x as usize] |= bit(x, y);
            y += 1;
        }
        x += 1;
    }
    columns
};

const BOX_BITS: [u128; 9] = {
    let mut boxes = [0; 9];
    let mut b = 0;
    while b < 9 {
        let mut i = 0;
        while i < 9 {
            let pos = Position::from_box(b, i);
            boxes[b as usize] |= bit(pos.x, pos.y);
            i += 1;
        }
        b += 1;
    }
    boxes
};

const fn to_positions(bits: [u128; 9]) -> Array9<DigitPositions, CellIndexSemantics> {
    let mut sets = [DigitPositions::EMPTY; 9];
    let mut i = 0;
    while i < 9 {
        sets[i] = DigitPositions::from_bits(bits[i]);
        i += 1;
    }
    Array9::from_array(sets)
}

impl DigitPositions {
    /// Positions of each row, indexed by `y`.
    pub const ROW_POSITIONS: Array9<DigitPositions, CellIndexSemantics> = to_positions(ROW_BITS);
    /// Positions of each column, indexed by `x`.
    pub const COLUMN_POSITIONS: Array9<DigitPositions, CellIndexSemantics> =
        to_positions(COLUMN_BITS);
    /// Positions of each box, indexed by box number.
    pub const BOX_POSITIONS: Array9<DigitPositions, CellIndexSemantics> = to_positions(BOX_BITS);

    /// Cells outside the set that see every cell of it.
    ///
    /// An empty set has no common peers.
    #[must_use]
    pub fn common_peers(self) -> DigitPositions {
        let mut iter = self.iter();
        let Some(first) = iter.next() else {
            return DigitPositions::EMPTY;
        };
        iter.fold(first.house_peers(), |peers, pos| peers & pos.house_peers()) - self
    }

    /// Returns `true` if the set is non-empty and lies inside one box and one line.
    #[must_use]
    pub fn is_in_intersection(self) -> bool {
        let mut lines = 0;
        let mut has_box = false;
        for house in House::containing(self) {
            if house.is_line() {
                lines += 1;
            } else {
                has_box = true;
            }
        }
        has_box && (lines > 0 || self.len() == 1)
    }
}

const HOUSE_PEERS: Array81<DigitPositions, PositionSemantics> = {
    let mut peers = [DigitPositions::EMPTY; 81];
    let mut i = 0;
    #[expect(clippy::cast_possible_truncation)]
    while i < 81 {
        let pos = Position::from_index(i as u8);
        let bits = ROW_BITS[pos.y as usize]
            | COLUMN_BITS[pos.x as usize]
            | BOX_BITS[pos.box_index() as usize];
        peers[i] = DigitPositions::from_bits(bits & !bit(pos.x, pos.y));
        i += 1;
    }
    Array81::from_array(peers)
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, pos) in (0..).zip(Position::ALL) {
            assert_eq!(pos.index(), i);
            assert_eq!(Position::from_index(i), pos);
        }
    }

    #[test]
    fn test_box_coordinates() {
        let pos = Position::new(5, 7);
        assert_eq!(pos.box_index(), 7);
        assert_eq!(pos.box_cell_index(), 5);
        assert_eq!(pos.box_origin(), Position::new(3, 6));
        assert_eq!(Position::from_box(7, 5), pos);
    }

    #[test]
    fn test_house_peers() {
        for pos in Position::ALL {
            let peers = pos.house_peers();
            assert_eq!(peers.len(), 20);
            assert!(!peers.contains(pos));
            for other in peers {
                assert!(other.sees(pos));
            }
        }
    }

    #[test]
    fn test_house_tables() {
        for i in 0..9 {
            assert_eq!(DigitPositions::ROW_POSITIONS[i].len(), 9);
            assert_eq!(DigitPositions::COLUMN_POSITIONS[i].len(), 9);
            assert_eq!(DigitPositions::BOX_POSITIONS[i].len(), 9);
        }
        assert!(DigitPositions::BOX_POSITIONS[4].contains(Position::new(4, 4)));
    }

    #[test]
    fn test_common_peers() {
        let pair = DigitPositions::from_iter([Position::new(0, 0), Position::new(1, 0)]);
        let peers = pair.common_peers();
        assert_eq!(peers.len(), 7 + 6);
        assert!(!peers.contains(Position::new(0, 0)));
        assert!(peers.contains(Position::new(8, 0)));
        assert!(peers.contains(Position::new(2, 2)));
        assert!(!peers.contains(Position::new(0, 4)));
        assert!(DigitPositions::EMPTY.common_peers().is_empty());
    }

    #[test]
    fn test_is_in_intersection() {
        let pair = DigitPositions::from_iter([Position::new(0, 0), Position::new(1, 0)]);
        assert!(pair.is_in_intersection());
        assert!(DigitPositions::from_elem(Position::new(4, 4)).is_in_intersection());
        let diagonal = DigitPositions::from_iter([Position::new(0, 0), Position::new(1, 1)]);
        assert!(!diagonal.is_in_intersection());
        let row = DigitPositions::from_iter([Position::new(0, 0), Position::new(3, 0)]);
        assert!(!row.is_in_intersection());
        assert!(!DigitPositions::EMPTY.is_in_intersection());
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(0, 0).to_string(), "r1c1");
        assert_eq!(Position::new(8, 2).to_string(), "r3c9");
    }
}
