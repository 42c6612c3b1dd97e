//! Board-wide candidate tracking.
//!
//! [`CandidateGrid`] stores, for each digit, the set of positions where it may still
//! go. Per-cell views ([`CandidateGrid::candidates_at`]) and per-house views
//! ([`CandidateGrid::house_mask`]) are derived from those nine bit boards.
//!
//! # Examples
//!
//! ```
//! use chainlace_core::{CandidateGrid, Digit, Position};
//!
//! let mut grid = CandidateGrid::new();
//! let center = Position::new(4, 4);
//! grid.place(center, Digit::D5);
//! grid.remove_candidate_with_mask(center.house_peers(), Digit::D5);
//!
//! assert!(!grid.candidates_at(Position::new(4, 5)).contains(Digit::D5));
//! assert_eq!(grid.candidates_at(center).as_single(), Some(Digit::D5));
//! assert!(grid.check_consistency().is_ok());
//! ```

use crate::{
    ConsistencyError, Digit, DigitGrid, House, Position,
    containers::{Array9, BitSet9, BitSet81},
    index::{CellIndexSemantics, DigitSemantics, PositionSemantics},
};

/// Positions across the board, typically where one digit may go.
pub type DigitPositions = BitSet81<PositionSemantics>;

/// Cells inside one house, by their index within the house (0-8).
pub type HouseMask = BitSet9<CellIndexSemantics>;

/// A set of digits, typically the candidates of one cell.
pub type DigitSet = BitSet9<DigitSemantics>;

/// Candidate positions of all nine digits.
///
/// A cell with exactly one candidate is *decided*; a cell with none is a contradiction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGrid {
    digits: Array9<DigitPositions, DigitSemantics>,
}

impl Default for CandidateGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateGrid {
    /// Creates a grid where every digit may go everywhere.
    #[must_use]
    pub fn new() -> Self {
        Self {
            digits: Array9::from_array([DigitPositions::FULL; 9]),
        }
    }

    /// Creates a grid from givens.
    ///
    /// Each given is placed and removed from its house peers.
    #[must_use]
    pub fn from_digit_grid(digit_grid: &DigitGrid) -> Self {
        let mut grid = Self::new();
        for pos in Position::ALL {
            if let Some(digit) = digit_grid.get(pos) {
                grid.place(pos, digit);
                grid.remove_candidate_with_mask(pos.house_peers(), digit);
            }
        }
        grid
    }

    /// Converts decided cells into a [`DigitGrid`].
    #[must_use]
    pub fn to_digit_grid(&self) -> DigitGrid {
        let mut digit_grid = DigitGrid::new();
        for pos in self.decided_cells() {
            digit_grid.set(pos, self.candidates_at(pos).as_single());
        }
        digit_grid
    }

    /// Places `digit` at `pos` by removing every other candidate of the cell.
    ///
    /// Peers are left untouched; propagation is the job of the naked single technique.
    /// Returns `true` if any candidate was removed.
    pub fn place(&mut self, pos: Position, digit: Digit) -> bool {
        let mut changed = false;
        for (d, positions) in Digit::ALL.into_iter().zip(self.digits.iter_mut()) {
            if d != digit {
                changed |= positions.remove(pos);
            }
        }
        changed
    }

    /// Returns `true` if [`place`](Self::place) would remove anything.
    #[must_use]
    pub fn would_place_change(&self, pos: Position, digit: Digit) -> bool {
        !(self.candidates_at(pos) - DigitSet::from_elem(digit)).is_empty()
    }

    /// Removes `digit` from `pos`. Returns `true` if it was a candidate.
    pub fn remove_candidate(&mut self, pos: Position, digit: Digit) -> bool {
        self.digits[digit].remove(pos)
    }

    /// Returns `true` if [`remove_candidate`](Self::remove_candidate) would remove anything.
    #[must_use]
    pub fn would_remove_candidate_change(&self, pos: Position, digit: Digit) -> bool {
        self.digits[digit].contains(pos)
    }

    /// Removes `digit` from every cell of `mask`.
    ///
    /// Returns `true` if any candidate was removed.
    pub fn remove_candidate_with_mask(&mut self, mask: DigitPositions, digit: Digit) -> bool {
        let positions = &mut self.digits[digit];
        let changed = !(*positions & mask).is_empty();
        *positions -= mask;
        changed
    }

    /// Returns `true` if
    /// [`remove_candidate_with_mask`](Self::remove_candidate_with_mask) would remove
    /// anything.
    #[must_use]
    pub fn would_remove_candidate_with_mask_change(&self, mask: DigitPositions, digit: Digit) -> bool {
        !(self.digits[digit] & mask).is_empty()
    }

    /// Positions where `digit` may still go.
    #[must_use]
    #[inline]
    pub fn digit_positions(&self, digit: Digit) -> DigitPositions {
        self.digits[digit]
    }

    /// Digits that may still go at `pos`.
    #[must_use]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        Digit::ALL
            .into_iter()
            .filter(|&digit| self.digits[digit].contains(pos))
            .collect()
    }

    /// Returns `true` if `digit` may still go at `pos`.
    #[must_use]
    #[inline]
    pub fn has_candidate(&self, pos: Position, digit: Digit) -> bool {
        self.digits[digit].contains(pos)
    }

    /// Cells of `house` where `digit` may still go, by index inside the house.
    #[must_use]
    pub fn house_mask(&self, house: House, digit: Digit) -> HouseMask {
        let positions = self.digits[digit];
        (0..9)
            .filter(|&i| positions.contains(house.position_from_cell_index(i)))
            .collect()
    }

    /// Cells holding exactly one candidate.
    #[must_use]
    pub fn decided_cells(&self) -> DigitPositions {
        let [_, decided] = self.classify_cells::<2>();
        decided
    }

    /// Cells holding two or more candidates.
    #[must_use]
    pub fn undecided_cells(&self) -> DigitPositions {
        let [empty, decided] = self.classify_cells::<2>();
        !(empty | decided)
    }

    /// Classifies cells by candidate count.
    ///
    /// Element `k` of the result holds the cells with exactly `k` candidates. Cells with
    /// `N` or more candidates appear in no element.
    #[must_use]
    pub fn classify_cells<const N: usize>(&self) -> [DigitPositions; N] {
        let mut counts = [DigitPositions::EMPTY; N];
        if N == 0 {
            return counts;
        }
        counts[0] = DigitPositions::FULL;
        for &positions in self.digits.iter() {
            for k in (1..N).rev() {
                counts[k] = (counts[k] - positions) | (counts[k - 1] & positions);
            }
            counts[0] -= positions;
        }
        counts
    }

    /// Checks the grid for contradictions.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError::NoCandidates`] if a cell has no candidate or a digit
    /// has no place in some house, and [`ConsistencyError::CandidateConflict`] if two
    /// decided cells of one house hold the same digit.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        let [empty, decided] = self.classify_cells::<2>();
        if !empty.is_empty() {
            return Err(ConsistencyError::NoCandidates);
        }
        for digit in Digit::ALL {
            let positions = self.digits[digit];
            if House::ALL
                .into_iter()
                .any(|house| (positions & house.positions()).is_empty())
            {
                return Err(ConsistencyError::NoCandidates);
            }
            let decided = positions & decided;
            for position in decided {
                if !(decided & position.house_peers()).is_empty() {
                    return Err(ConsistencyError::CandidateConflict { position, digit });
                }
            }
        }
        Ok(())
    }

    /// Returns `true` if every cell is decided and the grid is consistent.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is inconsistent.
    pub fn is_solved(&self) -> Result<bool, ConsistencyError> {
        self.check_consistency()?;
        Ok(self.decided_cells().len() == 81)
    }
}
