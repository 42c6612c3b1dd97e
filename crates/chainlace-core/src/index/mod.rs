//! Index types and semantics for containers.
//!
//! The bit sets and arrays in [`containers`](crate::containers) are indexed by small
//! integers. The types in this module describe how user-facing values (digits,
//! positions, cell indices inside a house) map onto those integers.
//!
//! # Index Types
//!
//! - [`Index9`] - Index into 9-element containers (range 0-8)
//! - [`Index81`] - Index into 81-element containers (board positions in row-major order)
//!
//! # Semantics
//!
//! - [`DigitSemantics`] - Maps [`Digit`](crate::Digit) 1-9 to indices 0-8
//! - [`CellIndexSemantics`] - Identity mapping for cell indices inside a house
//! - [`PositionSemantics`] - Maps [`Position`](crate::Position) to board indices
//!
//! # Examples
//!
//! ```
//! use chainlace_core::{
//!     Digit, Position,
//!     index::{DigitSemantics, Index9Semantics, Index81Semantics, PositionSemantics},
//! };
//!
//! assert_eq!(DigitSemantics::to_index(Digit::D5).index(), 4);
//!
//! let idx = PositionSemantics::to_index(Position::new(4, 4));
//! assert_eq!(idx.index(), 40);
//! assert_eq!(PositionSemantics::from_index(idx), Position::new(4, 4));
//! ```

pub use self::{index_9::*, index_81::*};

mod index_81;
mod index_9;
