use chainlace_core::{Digit, DigitPositions, DigitSet, Position};

use crate::{
    BoxedTechniqueStep, ConditionCells, ConditionDigitCells, SolverError, TechniqueApplication,
    TechniqueGrid, TechniqueStep,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "Naked Single";

/// A technique that finds cells with only one remaining candidate and propagates constraints.
///
/// A decided cell removes its digit from every peer. This is the only place where
/// placements are propagated; other techniques place digits and leave the cleanup to
/// this one.
///
/// # Examples
///
/// ```
/// use chainlace_core::{Digit, Position};
/// use chainlace_solver::{
///     TechniqueGrid,
///     technique::{NakedSingle, Technique},
/// };
///
/// let mut grid = TechniqueGrid::new();
/// grid.place(Position::new(0, 0), Digit::D5);
///
/// assert!(NakedSingle::new().apply(&mut grid)?);
/// assert!(!grid.has_candidate(Position::new(8, 0), Digit::D5));
/// # Ok::<(), chainlace_solver::SolverError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedSingle {}

impl NakedSingle {
    /// Creates a new `NakedSingle` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Builds a naked single step for a decided position, without gating on eliminations.
    #[must_use]
    pub fn build_step(grid: &TechniqueGrid, pos: Position) -> Option<BoxedTechniqueStep> {
        let digit = grid.candidates_at(pos).as_single()?;
        let affected = pos.house_peers() & grid.digit_positions(digit);
        Some(Box::new(NakedSingleStep::new(pos, digit, affected)))
    }

    fn pending(grid: &TechniqueGrid, digit: Digit) -> DigitPositions {
        grid.digit_positions(digit) & grid.decided_cells() & !grid.decided_propagated()
    }
}

#[derive(Debug, Clone)]
pub struct NakedSingleStep {
    position: Position,
    digit: Digit,
    affected_positions: DigitPositions,
}

impl NakedSingleStep {
    fn new(position: Position, digit: Digit, affected_positions: DigitPositions) -> Self {
        Self {
            position,
            digit,
            affected_positions,
        }
    }
}

impl TechniqueStep for NakedSingleStep {
    fn technique_name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechniqueStep {
        Box::new(self.clone())
    }

    fn condition_cells(&self) -> ConditionCells {
        DigitPositions::from_elem(self.position)
    }

    fn condition_digit_cells(&self) -> ConditionDigitCells {
        vec![(
            DigitPositions::from_elem(self.position),
            DigitSet::from_elem(self.digit),
        )]
    }

    fn application(&self) -> Vec<TechniqueApplication> {
        vec![
            TechniqueApplication::Placement {
                position: self.position,
                digit: self.digit,
            },
            TechniqueApplication::CandidateElimination {
                positions: self.affected_positions,
                digits: DigitSet::from_elem(self.digit),
            },
        ]
    }
}

impl Technique for NakedSingle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        for digit in Digit::ALL {
            for pos in Self::pending(grid, digit) {
                let affected = pos.house_peers() & grid.digit_positions(digit);
                if grid.would_remove_candidate_with_mask_change(affected, digit) {
                    return Ok(Some(Box::new(NakedSingleStep::new(pos, digit, affected))));
                }
            }
        }
        Ok(None)
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        for digit in Digit::ALL {
            for pos in Self::pending(grid, digit) {
                grid.insert_decided_propagated(pos);
                changed |= grid.remove_candidate_with_mask(pos.house_peers(), digit);
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use chainlace_core::{CandidateGrid, Digit, Position};

    use super::*;
    use crate::testing::TechniqueTester;

    #[test]
    fn test_places_naked_single() {
        let mut grid = CandidateGrid::new();
        grid.place(Position::new(0, 0), Digit::D5);

        TechniqueTester::new(grid)
            .apply_once(&NakedSingle::new())
            .assert_removed_exact(Position::new(1, 0), [Digit::D5])
            .assert_removed_exact(Position::new(0, 1), [Digit::D5])
            .assert_removed_exact(Position::new(1, 1), [Digit::D5])
            .assert_no_change(Position::new(4, 4));
    }

    #[test]
    fn test_places_multiple_naked_singles() {
        let mut grid = CandidateGrid::new();
        grid.place(Position::new(0, 0), Digit::D3);
        grid.place(Position::new(5, 5), Digit::D7);

        TechniqueTester::new(grid)
            .apply_once(&NakedSingle::new())
            .assert_removed_exact(Position::new(1, 0), [Digit::D3])
            .assert_removed_exact(Position::new(5, 4), [Digit::D7]);
    }

    #[test]
    fn test_propagates_each_cell_once() {
        let mut grid = TechniqueGrid::new();
        grid.place(Position::new(0, 0), Digit::D1);
        assert!(NakedSingle::new().apply(&mut grid).unwrap());
        assert!(grid.decided_propagated().contains(Position::new(0, 0)));
        assert!(!NakedSingle::new().apply(&mut grid).unwrap());
        assert!(NakedSingle::new().find_step(&grid).unwrap().is_none());
    }

    #[test]
    fn test_build_step_ignores_propagation_state() {
        let mut grid = TechniqueGrid::new();
        grid.place(Position::new(2, 2), Digit::D4);
        NakedSingle::new().apply(&mut grid).unwrap();

        let step = NakedSingle::build_step(&grid, Position::new(2, 2)).unwrap();
        assert_eq!(step.technique_name(), NAME);
        assert!(NakedSingle::build_step(&grid, Position::new(3, 3)).is_none());
    }

    #[test]
    fn test_no_change_when_no_naked_singles() {
        TechniqueTester::new(CandidateGrid::new())
            .apply_once(&NakedSingle::new())
            .assert_no_change(Position::new(0, 0))
            .assert_no_change(Position::new(4, 4));
    }

    #[test]
    fn test_real_puzzle() {
        TechniqueTester::from_str(
            "
            53_ _7_ ___
            6__ 195 ___
            _98 ___ _6_
            8__ _6_ __3
            4__ 8_3 __1
            7__ _2_ __6
            _6_ ___ 28_
            ___ 419 __5
            ___ _8_ _79
        ",
        )
        .apply_until_stuck(&NakedSingle::new())
        .assert_removed_includes(Position::new(1, 1), [Digit::D4]);
    }
}
