//! Human-style Sudoku deduction built around alternating inference chains.
//!
//! # Overview
//!
//! - [`TechniqueGrid`] wraps a candidate grid with solver bookkeeping.
//! - [`technique`] holds the step finders, from naked singles up to grouped chains.
//! - [`chain`] builds the strong/weak link graph and searches it for alternating
//!   inference chains and continuous nice loops.
//! - [`TechniqueSolver`] applies techniques in order until the grid is solved or stuck.
//!
//! # Examples
//!
//! ```
//! use chainlace_core::DigitGrid;
//! use chainlace_solver::{TechniqueGrid, TechniqueSolver};
//!
//! let puzzle: DigitGrid = "
//!     53_ _7_ ___
//!     6__ 195 ___
//!     _98 ___ _6_
//!     8__ _6_ __3
//!     4__ 8_3 __1
//!     7__ _2_ __6
//!     _6_ ___ 28_
//!     ___ 419 __5
//!     ___ _8_ _79
//! "
//! .parse()?;
//!
//! let solver = TechniqueSolver::with_all_techniques();
//! let mut grid = TechniqueGrid::from_digit_grid(&puzzle);
//! let (solved, stats) = solver.solve(&mut grid)?;
//! assert!(solved);
//! assert!(stats.has_progress());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{error::*, technique_grid::*, technique_solver::*, technique_step::*};

pub mod chain;
pub mod technique;

mod error;
mod technique_grid;
mod technique_solver;
mod technique_step;

#[cfg(test)]
mod testing;
