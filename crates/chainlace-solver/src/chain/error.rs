use derive_more::{Display, Error};

/// Invariant violations detected while building chains.
///
/// These indicate a defect in a chaining rule or in the search, not a property of the
/// puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ChainError {
    /// Two consecutive nodes of a chain are equal.
    #[display("chain repeats a node")]
    DegenerateLink,
    /// Adjacent links do not alternate strong and weak, or a link is missing.
    #[display("chain links do not alternate")]
    BrokenAlternation,
    /// A search visited more nodes than the link graph contains.
    #[display("chain search exceeded the node space")]
    SearchOverflow,
}
