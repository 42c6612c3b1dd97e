use chainlace_core::{
    CandidateGrid, ConsistencyError, Digit, DigitGrid, DigitPositions, DigitSet, Position,
};

/// Solver state shared by every technique.
///
/// Wraps a [`CandidateGrid`] and keeps the solver's own bookkeeping next to it, so
/// techniques only ever see domain operations (place, remove, query). Chain searches
/// read the grid through this type and never mutate it.
///
/// # Examples
///
/// ```
/// use chainlace_core::{Digit, Position};
/// use chainlace_solver::TechniqueGrid;
///
/// let mut grid = TechniqueGrid::new();
/// assert!(grid.remove_candidate(Position::new(0, 0), Digit::D1));
/// assert!(!grid.has_candidate(Position::new(0, 0), Digit::D1));
/// ```
#[derive(Debug, Clone)]
pub struct TechniqueGrid {
    candidates: CandidateGrid,
    /// Decided cells whose digit has already been removed from their peers.
    decided_propagated: DigitPositions,
}

impl From<DigitGrid> for TechniqueGrid {
    fn from(grid: DigitGrid) -> Self {
        Self::from_digit_grid(&grid)
    }
}

impl From<CandidateGrid> for TechniqueGrid {
    fn from(candidates: CandidateGrid) -> Self {
        Self {
            candidates,
            decided_propagated: DigitPositions::EMPTY,
        }
    }
}

impl Default for TechniqueGrid {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TechniqueGrid {
    /// Creates a grid with every candidate available.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from(CandidateGrid::new())
    }

    /// Builds a grid from givens.
    ///
    /// Givens are propagated to their peers by [`CandidateGrid::from_digit_grid`] and are
    /// therefore recorded as already propagated.
    #[must_use]
    pub fn from_digit_grid(grid: &DigitGrid) -> Self {
        let candidates = CandidateGrid::from_digit_grid(grid);
        let decided_propagated = Position::ALL
            .into_iter()
            .filter(|&pos| grid.get(pos).is_some())
            .collect();
        Self {
            candidates,
            decided_propagated,
        }
    }

    /// Returns the underlying candidate grid.
    #[inline]
    #[must_use]
    pub fn candidates(&self) -> &CandidateGrid {
        &self.candidates
    }

    /// Returns a digit grid holding the decided cells.
    #[inline]
    #[must_use]
    pub fn to_digit_grid(&self) -> DigitGrid {
        self.candidates.to_digit_grid()
    }

    /// Mirrors [`CandidateGrid::place`].
    #[inline]
    pub fn place(&mut self, pos: Position, digit: Digit) -> bool {
        self.candidates.place(pos, digit)
    }

    /// Mirrors [`CandidateGrid::would_place_change`].
    #[inline]
    #[must_use]
    pub fn would_place_change(&self, pos: Position, digit: Digit) -> bool {
        self.candidates.would_place_change(pos, digit)
    }

    /// Mirrors [`CandidateGrid::remove_candidate`].
    #[inline]
    pub fn remove_candidate(&mut self, pos: Position, digit: Digit) -> bool {
        self.candidates.remove_candidate(pos, digit)
    }

    /// Mirrors [`CandidateGrid::remove_candidate_with_mask`].
    #[inline]
    pub fn remove_candidate_with_mask(&mut self, mask: DigitPositions, digit: Digit) -> bool {
        self.candidates.remove_candidate_with_mask(mask, digit)
    }

    /// Mirrors [`CandidateGrid::would_remove_candidate_with_mask_change`].
    #[inline]
    #[must_use]
    pub fn would_remove_candidate_with_mask_change(
        &self,
        mask: DigitPositions,
        digit: Digit,
    ) -> bool {
        self.candidates
            .would_remove_candidate_with_mask_change(mask, digit)
    }

    /// Mirrors [`CandidateGrid::digit_positions`].
    #[inline]
    #[must_use]
    pub fn digit_positions(&self, digit: Digit) -> DigitPositions {
        self.candidates.digit_positions(digit)
    }

    /// Mirrors [`CandidateGrid::candidates_at`].
    #[inline]
    #[must_use]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        self.candidates.candidates_at(pos)
    }

    /// Mirrors [`CandidateGrid::has_candidate`].
    #[inline]
    #[must_use]
    pub fn has_candidate(&self, pos: Position, digit: Digit) -> bool {
        self.candidates.has_candidate(pos, digit)
    }

    /// Mirrors [`CandidateGrid::check_consistency`].
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] if the grid contains contradictions.
    #[inline]
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        self.candidates.check_consistency()
    }

    /// Mirrors [`CandidateGrid::is_solved`].
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] if the grid contains contradictions.
    #[inline]
    pub fn is_solved(&self) -> Result<bool, ConsistencyError> {
        self.candidates.is_solved()
    }

    /// Mirrors [`CandidateGrid::decided_cells`].
    #[inline]
    #[must_use]
    pub fn decided_cells(&self) -> DigitPositions {
        self.candidates.decided_cells()
    }

    /// Mirrors [`CandidateGrid::undecided_cells`].
    #[inline]
    #[must_use]
    pub fn undecided_cells(&self) -> DigitPositions {
        self.candidates.undecided_cells()
    }

    /// Cells holding exactly two candidates.
    #[must_use]
    pub fn bivalue_cells(&self) -> DigitPositions {
        let [.., bivalue] = self.candidates.classify_cells::<3>();
        bivalue
    }

    /// Cells holding exactly three candidates.
    #[must_use]
    pub fn trivalue_cells(&self) -> DigitPositions {
        let [.., trivalue] = self.candidates.classify_cells::<4>();
        trivalue
    }

    /// Decided cells whose digit has already been removed from their peers.
    #[inline]
    #[must_use]
    pub fn decided_propagated(&self) -> DigitPositions {
        self.decided_propagated
    }

    /// Marks a decided cell as propagated.
    #[inline]
    pub fn insert_decided_propagated(&mut self, pos: Position) {
        self.decided_propagated.insert(pos);
    }
}
