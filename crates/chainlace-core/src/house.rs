use std::fmt::{self, Display};

use crate::{Digit, DigitPositions, Position};

/// A Sudoku house (row, column, or 3×3 box).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum House {
    /// A row identified by its y coordinate (0-8).
    Row {
        /// Row index (0-8).
        y: u8,
    },
    /// A column identified by its x coordinate (0-8).
    Column {
        /// Column index (0-8).
        x: u8,
    },
    /// A 3×3 box identified by its index (0-8, left to right, top to bottom).
    Box {
        /// Box index (0-8).
        index: u8,
    },
}

impl House {
    /// All rows, top to bottom.
    pub const ROWS: [Self; 9] = {
        let mut rows = [Self::Row { y: 0 }; 9];
        let mut y = 0;
        while y < 9 {
            rows[y as usize] = Self::Row { y };
            y += 1;
        }
        rows
    };

    /// All columns, left to right.
    pub const COLUMNS: [Self; 9] = {
        let mut columns = [Self::Column { x: 0 }; 9];
        let mut x = 0;
        while x < 9 {
            columns[x as usize] = Self::Column { x };
            x += 1;
        }
        columns
    };

    /// All boxes in index order.
    pub const BOXES: [Self; 9] = {
        let mut boxes = [Self::Box { index: 0 }; 9];
        let mut index = 0;
        while index < 9 {
            boxes[index as usize] = Self::Box { index };
            index += 1;
        }
        boxes
    };

    /// All 27 houses: rows, then columns, then boxes.
    pub const ALL: [Self; 27] = {
        let mut all = [Self::Row { y: 0 }; 27];
        let mut i = 0;
        while i < 9 {
            all[i] = Self::ROWS[i];
            all[i + 9] = Self::COLUMNS[i];
            all[i + 18] = Self::BOXES[i];
            i += 1;
        }
        all
    };

    /// Converts a cell index within the house (0-8) into an absolute [`Position`].
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in the range 0-8.
    #[must_use]
    #[inline]
    pub fn position_from_cell_index(self, i: u8) -> Position {
        assert!(i < 9);
        match self {
            House::Row { y } => Position::new(i, y),
            House::Column { x } => Position::new(x, i),
            House::Box { index } => Position::from_box(index, i),
        }
    }

    /// Returns all positions contained in this house.
    #[must_use]
    #[inline]
    pub fn positions(self) -> DigitPositions {
        match self {
            House::Row { y } => DigitPositions::ROW_POSITIONS[y],
            House::Column { x } => DigitPositions::COLUMN_POSITIONS[x],
            House::Box { index } => DigitPositions::BOX_POSITIONS[index],
        }
    }

    /// Returns `true` for rows and columns.
    #[must_use]
    #[inline]
    pub const fn is_line(self) -> bool {
        !matches!(self, House::Box { .. })
    }

    /// Houses containing every position of `positions`, in [`House::ALL`] order.
    ///
    /// An empty set is contained in no house.
    pub fn containing(positions: DigitPositions) -> impl Iterator<Item = House> {
        House::ALL
            .into_iter()
            .filter(move |house| !positions.is_empty() && positions.is_subset(house.positions()))
    }
}

impl Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            House::Row { y } => write!(f, "r{}", y + 1),
            House::Column { x } => write!(f, "c{}", x + 1),
            House::Box { index } => write!(f, "b{}", index + 1),
        }
    }
}

/// Returns an iterator over all `(Digit, House)` pairs, digit-major.
pub fn all_digit_houses() -> impl Iterator<Item = (Digit, House)> {
    Digit::ALL
        .into_iter()
        .flat_map(|digit| House::ALL.into_iter().map(move |house| (digit, house)))
}
