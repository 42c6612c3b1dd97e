use std::ops::ControlFlow;

use chainlace_core::{Digit, DigitSet, House, Position};

use crate::{
    BoxedTechniqueStep, ConditionCells, ConditionDigitCells, SolverError, TechniqueApplication,
    TechniqueGrid, TechniqueStep,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "Hidden Single";

/// A technique that finds digits that can only go in one position within a house.
///
/// The cell may still hold other candidates; placing the digit leaves the peer cleanup
/// to [`NakedSingle`](super::NakedSingle).
///
/// # Examples
///
/// ```
/// use chainlace_solver::{
///     TechniqueGrid,
///     technique::{HiddenSingle, Technique},
/// };
///
/// let mut grid = TechniqueGrid::new();
/// assert!(!HiddenSingle::new().apply(&mut grid)?);
/// # Ok::<(), chainlace_solver::SolverError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenSingle {}

impl HiddenSingle {
    /// Creates a new `HiddenSingle` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

#[derive(Debug, Clone)]
pub struct HiddenSingleStep {
    house: House,
    position: Position,
    digit: Digit,
}

impl TechniqueStep for HiddenSingleStep {
    fn technique_name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechniqueStep {
        Box::new(self.clone())
    }

    fn condition_cells(&self) -> ConditionCells {
        self.house.positions()
    }

    fn condition_digit_cells(&self) -> ConditionDigitCells {
        vec![(self.house.positions(), DigitSet::from_elem(self.digit))]
    }

    fn application(&self) -> Vec<TechniqueApplication> {
        vec![TechniqueApplication::Placement {
            position: self.position,
            digit: self.digit,
        }]
    }
}

impl HiddenSingle {
    #[inline]
    fn apply_with_control_flow<F>(
        grid: &mut TechniqueGrid,
        mut on_condition: F,
    ) -> Option<HiddenSingleStep>
    where
        F: FnMut(&mut TechniqueGrid, House, Position, Digit) -> ControlFlow<HiddenSingleStep>,
    {
        // Cells placed during this pass still hold the digit in their peers.
        let decided_cells = grid.decided_cells();
        for digit in Digit::ALL {
            let undecided = grid.digit_positions(digit) & !decided_cells;
            for house in House::ALL {
                if let Some(pos) = (undecided & house.positions()).as_single()
                    && grid.place(pos, digit)
                    && let ControlFlow::Break(value) = on_condition(grid, house, pos, digit)
                {
                    return Some(value);
                }
            }
        }
        None
    }
}

impl Technique for HiddenSingle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut after_grid = grid.clone();
        let step = Self::apply_with_control_flow(&mut after_grid, |_, house, position, digit| {
            ControlFlow::Break(HiddenSingleStep {
                house,
                position,
                digit,
            })
        });
        Ok(step.map(|step| step.clone_box()))
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        Self::apply_with_control_flow(grid, |_, _, _, _| {
            changed = true;
            ControlFlow::Continue(())
        });
        Ok(changed)
    }
}
