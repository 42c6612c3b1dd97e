//! Core data structures for the chainlace deduction engine.
//!
//! # Overview
//!
//! 1. **Core types**
//!    - [`Digit`], [`Position`], [`House`] and [`Candidate`]
//!
//! 2. **Index semantics** - how values map to container slots
//!    - [`index`]: [`Index9`], [`Index81`] and the semantics types
//!      [`DigitSemantics`], [`CellIndexSemantics`] and [`PositionSemantics`]
//!
//! 3. **Generic containers** parameterized by those semantics
//!    - [`containers`]: [`BitSet9`], [`BitSet81`], [`Array9`] and [`Array81`]
//!
//! 4. **Grids**
//!    - [`CandidateGrid`]: remaining candidates of every digit, with the aliases
//!      [`DigitPositions`], [`DigitSet`] and [`HouseMask`]
//!    - [`DigitGrid`]: placed digits, parsed from the 81-character text form
//!
//! [`Index9`]: index::Index9
//! [`Index81`]: index::Index81
//! [`DigitSemantics`]: index::DigitSemantics
//! [`CellIndexSemantics`]: index::CellIndexSemantics
//! [`PositionSemantics`]: index::PositionSemantics
//! [`BitSet9`]: containers::BitSet9
//! [`BitSet81`]: containers::BitSet81
//! [`Array9`]: containers::Array9
//! [`Array81`]: containers::Array81
//!
//! # Examples
//!
//! ```
//! use chainlace_core::{CandidateGrid, Digit, DigitGrid, Position};
//!
//! let givens: DigitGrid = format!("5{}", ".".repeat(80)).parse()?;
//! let grid = CandidateGrid::from_digit_grid(&givens);
//!
//! assert!(!grid.has_candidate(Position::new(8, 0), Digit::D5));
//! assert_eq!(grid.decided_cells().len(), 1);
//! # Ok::<(), chainlace_core::DigitGridParseError>(())
//! ```

pub mod containers;
pub mod index;

mod candidate;
mod candidate_grid;
mod digit;
mod digit_grid;
mod error;
mod house;
mod position;

pub use self::{
    candidate::Candidate,
    candidate_grid::{CandidateGrid, DigitPositions, DigitSet, HouseMask},
    digit::Digit,
    digit_grid::DigitGrid,
    error::{ConsistencyError, DigitGridParseError},
    house::{House, all_digit_houses},
    position::Position,
};
