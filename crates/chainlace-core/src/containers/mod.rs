//! Generic containers parameterized by index semantics.
//!
//! - [`BitSet9`] / [`BitSet81`] - bit sets over 9 and 81 elements
//! - [`Array9`] / [`Array81`] - fixed arrays addressed through semantics
//!
//! The concrete aliases used throughout the workspace live at the crate root:
//! [`DigitSet`](crate::DigitSet), [`HouseMask`](crate::HouseMask) and
//! [`DigitPositions`](crate::DigitPositions).

pub use self::{array_9::*, array_81::*, bit_set_9::*, bit_set_81::*};

mod array_81;
mod array_9;
mod bit_set_81;
mod bit_set_9;
