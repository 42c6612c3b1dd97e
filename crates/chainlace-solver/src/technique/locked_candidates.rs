use std::ops::ControlFlow;

use chainlace_core::{Digit, DigitPositions, DigitSet, House, Position};

use crate::{
    BoxedTechniqueStep, ConditionCells, ConditionDigitCells, SolverError, TechniqueApplication,
    TechniqueGrid, TechniqueStep,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "Locked Candidates";
const NAME_POINTING: &str = "Locked Candidates (Pointing)";
const NAME_CLAIMING: &str = "Locked Candidates (Claiming)";

/// A technique that removes candidates using locked candidates (pointing/claiming).
///
/// - **Pointing**: Within a box, all candidates of a digit lie in a single row/column,
///   so that digit can be removed from the rest of that row/column outside the box.
/// - **Claiming**: Within a row/column, all candidates of a digit lie in a single box,
///   so that digit can be removed from the rest of that box outside the row/column.
///
/// The chain search expresses the same deduction through grouped nodes; this technique
/// handles the common cases before a chain is needed.
///
/// # Examples
///
/// ```
/// use chainlace_solver::{
///     TechniqueGrid,
///     technique::{LockedCandidates, Technique},
/// };
///
/// let mut grid = TechniqueGrid::new();
/// assert!(!LockedCandidates::new().apply(&mut grid)?);
/// # Ok::<(), chainlace_solver::SolverError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LockedCandidates {}

impl LockedCandidates {
    /// Creates a new `LockedCandidates` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockedCandidatesKind {
    Pointing,
    Claiming,
}

#[derive(Debug, Clone)]
pub struct LockedCandidatesStep {
    kind: LockedCandidatesKind,
    digit: Digit,
    box_: House,
    line: House,
    intersection_cells: DigitPositions,
    eliminations: DigitPositions,
}

impl TechniqueStep for LockedCandidatesStep {
    fn technique_name(&self) -> &'static str {
        match self.kind {
            LockedCandidatesKind::Pointing => NAME_POINTING,
            LockedCandidatesKind::Claiming => NAME_CLAIMING,
        }
    }

    fn clone_box(&self) -> BoxedTechniqueStep {
        Box::new(self.clone())
    }

    fn condition_cells(&self) -> ConditionCells {
        self.box_.positions() | self.line.positions()
    }

    fn condition_digit_cells(&self) -> ConditionDigitCells {
        vec![(self.intersection_cells, DigitSet::from_elem(self.digit))]
    }

    fn application(&self) -> Vec<TechniqueApplication> {
        vec![TechniqueApplication::CandidateElimination {
            positions: self.eliminations,
            digits: DigitSet::from_elem(self.digit),
        }]
    }
}

/// Every (box, line) pair sharing three cells.
fn intersections() -> impl Iterator<Item = (House, House)> {
    (0..9).flat_map(|index| {
        let box_ = House::Box { index };
        let origin = Position::from_box(index, 0);
        (0..3)
            .map(move |i| House::Row { y: origin.y() + i })
            .chain((0..3).map(move |i| House::Column { x: origin.x() + i }))
            .map(move |line| (box_, line))
    })
}

impl LockedCandidates {
    fn apply_with_control_flow<F>(
        grid: &mut TechniqueGrid,
        mut on_condition: F,
    ) -> Option<LockedCandidatesStep>
    where
        F: FnMut(&mut TechniqueGrid, &LockedCandidatesStep) -> ControlFlow<()>,
    {
        for (box_, line) in intersections() {
            let intersection = box_.positions() & line.positions();
            if (intersection & grid.undecided_cells()).is_empty() {
                continue;
            }
            let rest_in_box = box_.positions() & !intersection;
            let rest_in_line = line.positions() & !intersection;
            for digit in Digit::ALL {
                let digit_positions = grid.digit_positions(digit);
                if (digit_positions & intersection).is_empty() {
                    continue;
                }
                let (kind, eliminations) = if (digit_positions & rest_in_box).is_empty() {
                    (LockedCandidatesKind::Pointing, digit_positions & rest_in_line)
                } else if (digit_positions & rest_in_line).is_empty() {
                    (LockedCandidatesKind::Claiming, digit_positions & rest_in_box)
                } else {
                    continue;
                };
                if !grid.would_remove_candidate_with_mask_change(eliminations, digit) {
                    continue;
                }
                let step = LockedCandidatesStep {
                    kind,
                    digit,
                    box_,
                    line,
                    intersection_cells: digit_positions & intersection,
                    eliminations,
                };
                if on_condition(grid, &step).is_break() {
                    return Some(step);
                }
            }
        }
        None
    }
}

impl Technique for LockedCandidates {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut grid = grid.clone();
        let step = Self::apply_with_control_flow(&mut grid, |_, _| ControlFlow::Break(()));
        Ok(step.map(|step| step.clone_box()))
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        Self::apply_with_control_flow(grid, |grid, step| {
            changed |= grid.remove_candidate_with_mask(step.eliminations, step.digit);
            ControlFlow::Continue(())
        });
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use chainlace_core::{CandidateGrid, Digit, Position};

    use super::*;
    use crate::testing::TechniqueTester;

    #[test]
    fn test_pointing_eliminates_from_row() {
        // Box 1: D5 only in row 1.
        let mut grid = CandidateGrid::new();
        for pos in House::BOXES[0].positions() {
            if pos.y() != 0 {
                grid.remove_candidate(pos, Digit::D5);
            }
        }

        TechniqueTester::new(grid)
            .apply_once(&LockedCandidates::new())
            .assert_removed_includes(Position::new(3, 0), [Digit::D5])
            .assert_removed_includes(Position::new(8, 0), [Digit::D5])
            .assert_no_change(Position::new(0, 0));
    }

    #[test]
    fn test_claiming_eliminates_from_box() {
        // Row 1: D7 only inside box 1.
        let mut grid = CandidateGrid::new();
        for pos in House::ROWS[0].positions() {
            if pos.x() > 2 {
                grid.remove_candidate(pos, Digit::D7);
            }
        }

        TechniqueTester::new(grid)
            .apply_once(&LockedCandidates::new())
            .assert_removed_includes(Position::new(0, 1), [Digit::D7])
            .assert_removed_includes(Position::new(2, 2), [Digit::D7]);
    }

    #[test]
    fn test_step_names_kind() {
        let mut grid = TechniqueGrid::new();
        for pos in House::ROWS[0].positions() {
            if pos.x() > 2 {
                grid.remove_candidate(pos, Digit::D7);
            }
        }
        let step = LockedCandidates::new().find_step(&grid).unwrap().unwrap();
        assert_eq!(step.technique_name(), NAME_CLAIMING);
        assert_eq!(
            step.condition_digit_cells(),
            [(
                House::ROWS[0].positions() & House::BOXES[0].positions(),
                DigitSet::from_elem(Digit::D7)
            )]
        );
    }

    #[test]
    fn test_intersections_cover_every_box_line_pair() {
        let all = intersections().collect::<Vec<_>>();
        assert_eq!(all.len(), 54);
        assert!(
            all.iter()
                .all(|(box_, line)| (box_.positions() & line.positions()).len() == 3)
        );
    }

    #[test]
    fn test_no_change_when_no_locked_candidates() {
        TechniqueTester::new(CandidateGrid::new())
            .apply_once(&LockedCandidates::new())
            .assert_no_change(Position::new(0, 0))
            .assert_no_change(Position::new(4, 4));
    }
}
