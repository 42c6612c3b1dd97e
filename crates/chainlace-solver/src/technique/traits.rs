use std::fmt::Debug;

use crate::{BoxedTechniqueStep, SolverError, TechniqueGrid};

/// A deduction technique.
///
/// [`find_step`](Self::find_step) and [`apply`](Self::apply) must agree: `find_step`
/// returns a step exactly when `apply` would change the grid, and the grid after
/// `apply` holds no candidate the step's application removes.
pub trait Technique: Debug + Send + Sync {
    /// Returns the name of the technique.
    fn name(&self) -> &'static str;

    /// Returns a boxed clone of the technique.
    fn clone_box(&self) -> BoxedTechnique;

    /// Returns `true` if the technique searches the link graph.
    ///
    /// Chaining techniques are the expensive ones; callers may run everything else
    /// to a standstill first.
    fn is_chaining(&self) -> bool {
        false
    }

    /// Finds the next step without mutating the grid.
    ///
    /// Returns `Ok(None)` when this technique has no applicable step.
    ///
    /// # Errors
    ///
    /// Returns an error if the technique detects an invalid state in the grid.
    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError>;

    /// Finds every step available on `grid`, easiest first.
    ///
    /// The default returns at most the step of [`find_step`](Self::find_step).
    ///
    /// # Errors
    ///
    /// Returns an error if the technique detects an invalid state in the grid.
    fn find_steps(&self, grid: &TechniqueGrid) -> Result<Vec<BoxedTechniqueStep>, SolverError> {
        Ok(self.find_step(grid)?.into_iter().collect())
    }

    /// Applies the technique.
    ///
    /// Returns `Ok(true)` if the grid changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the technique detects an invalid state in the grid.
    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError>;
}

/// A boxed technique.
pub type BoxedTechnique = Box<dyn Technique>;

impl Clone for BoxedTechnique {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
