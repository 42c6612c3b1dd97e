//! A grid of placed digits.

use std::{
    fmt::{self, Display},
    ops::{Index, IndexMut},
    str::FromStr,
};

use crate::{Digit, DigitGridParseError, Position, containers::Array81, index::PositionSemantics};

/// A 9x9 grid where each cell is either empty or holds a digit.
///
/// The text form is 81 cells in row-major order. Digits `1`-`9` are givens, `.`, `_`
/// and `0` are empty cells and whitespace is ignored.
///
/// # Examples
///
/// ```
/// use chainlace_core::{Digit, DigitGrid, Position};
///
/// let grid: DigitGrid = "
///     1.. ... ...
///     ... ... ...
///     ... ... ...
///     ... ... ...
///     ... ... ...
///     ... ... ...
///     ... ... ...
///     ... ... ...
///     ... ... ..9
/// "
/// .parse()?;
/// assert_eq!(grid[Position::new(0, 0)], Some(Digit::D1));
/// assert_eq!(grid[Position::new(8, 8)], Some(Digit::D9));
/// assert_eq!(grid.filled_count(), 2);
/// # Ok::<(), chainlace_core::DigitGridParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DigitGrid {
    cells: Array81<Option<Digit>, PositionSemantics>,
}

impl DigitGrid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the digit at `pos`.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Digit> {
        self.cells[pos]
    }

    /// Sets or clears the digit at `pos`.
    pub fn set(&mut self, pos: Position, digit: Option<Digit>) {
        self.cells[pos] = digit;
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Returns `true` if every cell holds a digit.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.filled_count() == 81
    }
}

impl Index<Position> for DigitGrid {
    type Output = Option<Digit>;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[pos]
    }
}

impl IndexMut<Position> for DigitGrid {
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        &mut self.cells[pos]
    }
}

impl FromStr for DigitGrid {
    type Err = DigitGridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = Self::new();
        let mut len = 0;
        for ch in s.chars().filter(|ch| !ch.is_whitespace()) {
            let digit = match ch {
                '.' | '_' | '0' => None,
                _ => {
                    let digit = ch
                        .to_digit(10)
                        .and_then(|value| u8::try_from(value).ok())
                        .and_then(Digit::try_from_value)
                        .ok_or(DigitGridParseError::InvalidCharacter { ch })?;
                    Some(digit)
                }
            };
            if len < 81 {
                #[expect(clippy::cast_possible_truncation)]
                grid.set(Position::from_index(len as u8), digit);
            }
            len += 1;
        }
        if len != 81 {
            return Err(DigitGridParseError::InvalidLength { len });
        }
        Ok(grid)
    }
}

impl Display for DigitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.cells.iter() {
            match cell {
                Some(digit) => write!(f, "{digit}")?,
                None => f.write_str(".")?,
            }
        }
        Ok(())
    }
}
