use std::collections::BTreeMap;

use crate::{
    BoxedTechniqueStep, SolverError, TechniqueGrid,
    technique::{self, BoxedTechnique},
};

/// Per-technique application counts collected while solving.
///
/// # Examples
///
/// ```
/// use chainlace_solver::{TechniqueGrid, TechniqueSolver};
///
/// let solver = TechniqueSolver::with_fundamental_techniques();
/// let mut grid = TechniqueGrid::new();
/// let mut stats = solver.new_stats();
///
/// let _ = solver.solve_with_stats(&mut grid, &mut stats)?;
/// for (technique, count) in solver.techniques().iter().zip(stats.applications()) {
///     println!("{}: {count}", technique.name());
/// }
/// # Ok::<(), chainlace_solver::SolverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TechniqueSolverStats {
    applications: Vec<usize>,
    chain_names: BTreeMap<&'static str, usize>,
    total_steps: usize,
}

impl TechniqueSolverStats {
    /// Application counts in solver order, including techniques never applied.
    #[must_use]
    pub fn applications(&self) -> &[usize] {
        &self.applications
    }

    /// Chain steps applied, by the name the step reports (`X-Chain`, `Grouped AIC`, ...).
    #[must_use]
    pub fn chain_names(&self) -> &BTreeMap<&'static str, usize> {
        &self.chain_names
    }

    /// Total number of steps taken.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Returns `true` if any technique was applied.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.total_steps > 0
    }
}

/// Applies techniques in order, one step at a time.
///
/// Each [`step`](Self::step) runs the first technique that makes progress and returns,
/// so the next step starts again from the simplest technique on the updated grid.
///
/// # Examples
///
/// ```
/// use chainlace_solver::{TechniqueGrid, TechniqueSolver};
///
/// let solver = TechniqueSolver::with_all_techniques();
/// let mut grid = TechniqueGrid::new();
/// let mut stats = solver.new_stats();
///
/// while solver.step(&mut grid, &mut stats)? {
///     if grid.is_solved()? {
///         break;
///     }
/// }
/// # Ok::<(), chainlace_solver::SolverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TechniqueSolver {
    techniques: Vec<BoxedTechnique>,
}

impl TechniqueSolver {
    /// Creates a solver applying `techniques` in the given order.
    #[must_use]
    pub fn new(techniques: Vec<BoxedTechnique>) -> Self {
        Self { techniques }
    }

    /// Creates a solver with [`technique::all_techniques`].
    #[must_use]
    pub fn with_all_techniques() -> Self {
        Self::new(technique::all_techniques())
    }

    /// Creates a solver with [`technique::fundamental_techniques`].
    #[must_use]
    pub fn with_fundamental_techniques() -> Self {
        Self::new(technique::fundamental_techniques())
    }

    /// Creates statistics aligned with this solver's technique order.
    #[must_use]
    pub fn new_stats(&self) -> TechniqueSolverStats {
        TechniqueSolverStats {
            applications: vec![0; self.techniques.len()],
            chain_names: BTreeMap::new(),
            total_steps: 0,
        }
    }

    /// Configured techniques in application order.
    #[must_use]
    pub fn techniques(&self) -> &[BoxedTechnique] {
        &self.techniques
    }

    /// Applies the first technique that makes progress.
    ///
    /// Chaining techniques apply exactly the step they find, so its name can be
    /// recorded. Returns `Ok(false)` when no technique changes the grid.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the grid is or becomes inconsistent, and
    /// [`SolverError::Chain`] if a chain search breaks an internal invariant.
    pub fn step(
        &self,
        grid: &mut TechniqueGrid,
        stats: &mut TechniqueSolverStats,
    ) -> Result<bool, SolverError> {
        debug_assert_eq!(self.techniques.len(), stats.applications.len());
        grid.check_consistency()?;

        for (i, technique) in self.techniques.iter().enumerate() {
            let changed = if technique.is_chaining() {
                let Some(step) = technique.find_step(grid)? else {
                    continue;
                };
                let applied = step.apply_application(grid);
                if applied {
                    *stats.chain_names.entry(step.technique_name()).or_default() += 1;
                }
                applied
            } else {
                technique.apply(grid)?
            };
            if changed {
                log::trace!("applied {}", technique.name());
                stats.applications[i] += 1;
                stats.total_steps += 1;
                grid.check_consistency()?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Finds the next step without mutating the grid.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Inconsistent`] if the grid is inconsistent.
    pub fn find_step(
        &self,
        grid: &TechniqueGrid,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        grid.check_consistency()?;
        for technique in &self.techniques {
            if let Some(step) = technique.find_step(grid)? {
                return Ok(Some(step));
            }
        }
        Ok(None)
    }

    /// Steps until the grid is solved or stuck.
    ///
    /// Returns whether the grid was solved, along with the collected statistics.
    ///
    /// # Errors
    ///
    /// Same as [`step`](Self::step).
    pub fn solve(
        &self,
        grid: &mut TechniqueGrid,
    ) -> Result<(bool, TechniqueSolverStats), SolverError> {
        let mut stats = self.new_stats();
        let solved = self.solve_with_stats(grid, &mut stats)?;
        Ok((solved, stats))
    }

    /// Like [`solve`](Self::solve), accumulating into existing statistics.
    ///
    /// # Errors
    ///
    /// Same as [`step`](Self::step).
    pub fn solve_with_stats(
        &self,
        grid: &mut TechniqueGrid,
        stats: &mut TechniqueSolverStats,
    ) -> Result<bool, SolverError> {
        while self.step(grid, stats)? {
            if grid.is_solved()? {
                return Ok(true);
            }
        }
        Ok(grid.is_solved()?)
    }
}

#[cfg(test)]
mod tests {
    use chainlace_core::{ConsistencyError, Digit, Position};

    use super::*;
    use crate::technique::{AlternatingInferenceChain, HiddenSingle, NakedSingle, Technique as _};

    fn create_test_solver() -> TechniqueSolver {
        let techniques: Vec<BoxedTechnique> =
            vec![Box::new(NakedSingle::new()), Box::new(HiddenSingle::new())];
        TechniqueSolver::new(techniques)
    }

    fn naked_single_grid(pos: Position, digit: Digit) -> TechniqueGrid {
        let mut grid = TechniqueGrid::new();
        grid.place(pos, digit);
        grid
    }

    #[test]
    fn test_step_returns_false_without_progress() {
        let solver = create_test_solver();
        let mut grid = TechniqueGrid::new();
        let mut stats = solver.new_stats();

        assert!(!solver.step(&mut grid, &mut stats).unwrap());
        assert_eq!(stats.total_steps(), 0);
        assert!(!stats.has_progress());
    }

    #[test]
    fn test_step_records_applied_technique() {
        let solver = create_test_solver();
        let mut grid = naked_single_grid(Position::new(4, 4), Digit::D5);
        let mut stats = solver.new_stats();

        assert!(solver.step(&mut grid, &mut stats).unwrap());
        assert_eq!(stats.total_steps(), 1);
        let i = solver
            .techniques()
            .iter()
            .position(|t| t.name() == NakedSingle::new().name())
            .unwrap();
        assert_eq!(stats.applications()[i], 1);
    }

    #[test]
    fn test_step_rejects_inconsistent_grid() {
        let solver = create_test_solver();
        let mut grid = TechniqueGrid::new();
        for digit in Digit::ALL {
            grid.remove_candidate(Position::new(0, 0), digit);
        }
        let mut stats = solver.new_stats();
        assert_eq!(
            solver.step(&mut grid, &mut stats),
            Err(SolverError::Inconsistent(ConsistencyError::NoCandidates))
        );
    }

    #[test]
    fn test_find_step_does_not_mutate() {
        let solver = create_test_solver();
        let grid = naked_single_grid(Position::new(0, 0), Digit::D1);
        let before = grid.clone();

        let step = solver.find_step(&grid).unwrap().unwrap();
        assert_eq!(step.technique_name(), NakedSingle::new().name());
        assert_eq!(grid.candidates(), before.candidates());
    }

    #[test]
    fn test_solve_empty_grid_gets_stuck() {
        let solver = create_test_solver();
        let mut grid = TechniqueGrid::new();

        let (solved, stats) = solver.solve(&mut grid).unwrap();
        assert!(!solved);
        assert_eq!(stats.total_steps(), 0);
    }

    #[test]
    fn test_solve_with_stats_accumulates() {
        let solver = create_test_solver();
        let mut stats = solver.new_stats();

        let mut grid = naked_single_grid(Position::new(0, 0), Digit::D1);
        let _ = solver.solve_with_stats(&mut grid, &mut stats).unwrap();
        let first_steps = stats.total_steps();
        assert!(first_steps >= 1);

        let mut grid = naked_single_grid(Position::new(1, 1), Digit::D2);
        let _ = solver.solve_with_stats(&mut grid, &mut stats).unwrap();
        assert!(stats.total_steps() > first_steps);
    }

    #[test]
    fn test_step_records_chain_name() {
        // Column 1 holds digit 1 in r1c1/r5c1, column 5 in r2c5/r5c5.
        let mut grid = TechniqueGrid::new();
        for y in 0..9 {
            if y != 0 && y != 4 {
                grid.remove_candidate(Position::new(0, y), Digit::D1);
            }
            if y != 1 && y != 4 {
                grid.remove_candidate(Position::new(4, y), Digit::D1);
            }
        }
        let solver = TechniqueSolver::new(vec![Box::new(AlternatingInferenceChain::new())]);
        let mut stats = solver.new_stats();

        assert!(solver.step(&mut grid, &mut stats).unwrap());
        assert_eq!(stats.applications(), [1]);
        assert_eq!(stats.chain_names().get("X-Chain"), Some(&1));
        assert!(!grid.has_candidate(Position::new(3, 0), Digit::D1));
    }

    #[test]
    fn test_with_all_techniques() {
        let solver = TechniqueSolver::with_all_techniques();
        assert_eq!(solver.techniques().len(), technique::all_techniques().len());
        assert_eq!(solver.new_stats().applications().len(), solver.techniques().len());
    }
}
