use std::{
    collections::BTreeSet,
    fmt::{self, Display},
};

use super::{CandidateSet, ChainError, LinkDictionary, LinkKind, Node, Polarity};

/// Shape of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChainKind {
    /// An open chain `Off(start) => ... => On(end)`, or a chain proving or refuting a
    /// single candidate by returning to it.
    Aic,
    /// A closed loop whose last node repeats its first node.
    ContinuousNiceLoop,
}

/// A sequence of nodes joined by alternating strong and weak links.
///
/// Every step `Off(A) -> On(B)` uses a strong link and every step `On(A) -> Off(B)` a
/// weak link.
///
/// # Examples
///
/// ```
/// use chainlace_core::{Candidate, Digit, Position};
/// use chainlace_solver::chain::{CandidateSet, Chain, ChainKind, LinkDictionary, LinkKind, Node};
///
/// let set = |x, y| CandidateSet::from(Candidate::new(Position::new(x, y), Digit::D1));
/// let (a, b, c, d) = (set(0, 0), set(4, 0), set(4, 4), set(8, 4));
///
/// let mut links = LinkDictionary::new();
/// links.add(LinkKind::Strong, a, b, None);
/// links.add(LinkKind::Weak, b, c, None);
/// links.add(LinkKind::Strong, c, d, None);
///
/// let chain = Chain::new(
///     ChainKind::Aic,
///     vec![Node::off(a), Node::on(b), Node::off(c), Node::on(d)],
/// );
/// assert!(chain.validate(&links).is_ok());
/// assert_eq!(chain.complexity(), 3);
/// assert_eq!(chain.to_string(), "r1c1(1) == r1c5(1) -- r5c5(1) == r5c9(1)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chain {
    kind: ChainKind,
    nodes: Vec<Node>,
}

impl Chain {
    /// Creates a chain from its nodes.
    #[must_use]
    pub fn new(kind: ChainKind, nodes: Vec<Node>) -> Self {
        Self { kind, nodes }
    }

    /// Shape of the chain.
    #[must_use]
    pub fn kind(&self) -> ChainKind {
        self.kind
    }

    /// Nodes in order; a loop ends with its first node.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// First node.
    #[must_use]
    pub fn first(&self) -> Option<Node> {
        self.nodes.first().copied()
    }

    /// Last node.
    #[must_use]
    pub fn last(&self) -> Option<Node> {
        self.nodes.last().copied()
    }

    /// Number of links.
    #[must_use]
    pub fn complexity(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Consecutive node pairs with the kind of link joining them.
    pub fn links(&self) -> impl Iterator<Item = (Node, Node, LinkKind)> + '_ {
        self.nodes.windows(2).map(|pair| {
            let kind = match pair[0].polarity {
                Polarity::Off => LinkKind::Strong,
                Polarity::On => LinkKind::Weak,
            };
            (pair[0], pair[1], kind)
        })
    }

    /// Distinct candidate sets of the chain.
    #[must_use]
    pub fn sets(&self) -> BTreeSet<CandidateSet> {
        self.nodes.iter().map(|node| node.set).collect()
    }

    /// The same inference read backwards.
    ///
    /// `!A => B` is equivalent to `!B => A`, so the nodes are reversed and negated.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            kind: self.kind,
            nodes: self.nodes.iter().rev().map(|&node| !node).collect(),
        }
    }

    /// Orients an open chain so that it starts at its smaller end.
    #[must_use]
    pub fn canonicalized(self) -> Self {
        match (self.kind, self.first(), self.last()) {
            (ChainKind::Aic, Some(first), Some(last)) if last.set < first.set => self.reversed(),
            _ => self,
        }
    }

    /// Checks that the chain is walkable in `links`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::DegenerateLink`] if two consecutive nodes are equal, and
    /// [`ChainError::BrokenAlternation`] if polarities do not alternate or a required
    /// link is missing.
    pub fn validate(&self, links: &LinkDictionary) -> Result<(), ChainError> {
        if self.nodes.len() < 2 {
            return Err(ChainError::BrokenAlternation);
        }
        for (from, to, kind) in self.links() {
            if from == to {
                return Err(ChainError::DegenerateLink);
            }
            if from.polarity == to.polarity || !links.has_link(kind, from.set, to.set) {
                return Err(ChainError::BrokenAlternation);
            }
        }
        if self.kind == ChainKind::ContinuousNiceLoop && self.first() != self.last() {
            return Err(ChainError::BrokenAlternation);
        }
        Ok(())
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.first() else {
            return Ok(());
        };
        write!(f, "{}", first.set)?;
        for (_, to, kind) in self.links() {
            let sep = match kind {
                LinkKind::Strong => "==",
                LinkKind::Weak => "--",
            };
            write!(f, " {sep} {}", to.set)?;
        }
        Ok(())
    }
}
