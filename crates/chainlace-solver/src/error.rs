use chainlace_core::ConsistencyError;
use derive_more::{Display, Error, From, IsVariant};

use crate::chain::ChainError;

/// Errors raised while searching for or applying technique steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, IsVariant)]
pub enum SolverError {
    /// The grid contains a contradiction.
    #[display("inconsistent grid: {_0}")]
    Inconsistent(ConsistencyError),
    /// The chain search hit an internal invariant violation.
    #[display("chain search failed: {_0}")]
    Chain(ChainError),
}
