use std::collections::{BTreeMap, BTreeSet};

use super::{CandidateSet, GroupedLinkPattern, Node, Polarity};

/// Kind of inference carried by a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LinkKind {
    /// At least one side is true: `!A => B`.
    Strong,
    /// At most one side is true: `A => !B`.
    Weak,
}

/// A link between two candidate sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Link {
    /// One side of the link.
    pub from: CandidateSet,
    /// The other side of the link.
    pub to: CandidateSet,
    /// Inference carried by the link.
    pub kind: LinkKind,
    /// Structure justifying the link, if it is not a plain candidate relation.
    pub pattern: Option<GroupedLinkPattern>,
}

type Adjacency = BTreeMap<CandidateSet, BTreeSet<CandidateSet>>;

/// Symmetric strong and weak links between candidate sets.
///
/// Insertion is idempotent and symmetric, and iteration follows the ordering of
/// [`CandidateSet`], so everything built on top of the dictionary is deterministic.
///
/// # Examples
///
/// ```
/// use chainlace_core::{Candidate, Digit, Position};
/// use chainlace_solver::chain::{CandidateSet, LinkDictionary, LinkKind, Node};
///
/// let a = CandidateSet::from(Candidate::new(Position::new(0, 0), Digit::D1));
/// let b = CandidateSet::from(Candidate::new(Position::new(5, 0), Digit::D1));
///
/// let mut links = LinkDictionary::new();
/// assert!(links.add(LinkKind::Strong, a, b, None));
/// assert!(!links.add(LinkKind::Strong, b, a, None));
/// assert!(links.has_link(LinkKind::Strong, b, a));
/// assert_eq!(links.next_nodes(Node::off(a)).collect::<Vec<_>>(), [Node::on(b)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDictionary {
    strong: Adjacency,
    weak: Adjacency,
    patterns: BTreeMap<(LinkKind, CandidateSet, CandidateSet), GroupedLinkPattern>,
}

impl LinkDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn adjacency(&self, kind: LinkKind) -> &Adjacency {
        match kind {
            LinkKind::Strong => &self.strong,
            LinkKind::Weak => &self.weak,
        }
    }

    /// Adds a link in both directions.
    ///
    /// Self-links and weak links between overlapping sets of one digit are ignored.
    /// The first pattern recorded for a link is kept. Returns `true` if the link is new.
    pub fn add(
        &mut self,
        kind: LinkKind,
        a: CandidateSet,
        b: CandidateSet,
        pattern: Option<GroupedLinkPattern>,
    ) -> bool {
        if a == b || (kind == LinkKind::Weak && a.overlaps(b)) {
            return false;
        }
        let adjacency = match kind {
            LinkKind::Strong => &mut self.strong,
            LinkKind::Weak => &mut self.weak,
        };
        let added = adjacency.entry(a).or_default().insert(b);
        adjacency.entry(b).or_default().insert(a);
        if let Some(pattern) = pattern {
            self.patterns.entry((kind, a, b)).or_insert(pattern);
            self.patterns.entry((kind, b, a)).or_insert(pattern);
        }
        added
    }

    /// Returns `true` if `a` and `b` are linked by `kind`.
    #[must_use]
    pub fn has_link(&self, kind: LinkKind, a: CandidateSet, b: CandidateSet) -> bool {
        self.adjacency(kind)
            .get(&a)
            .is_some_and(|targets| targets.contains(&b))
    }

    /// Returns `true` if `set` takes part in any link.
    #[must_use]
    pub fn contains(&self, set: CandidateSet) -> bool {
        self.strong.contains_key(&set) || self.weak.contains_key(&set)
    }

    /// Sets linked to `set` by `kind`, in order.
    pub fn neighbors(
        &self,
        kind: LinkKind,
        set: CandidateSet,
    ) -> impl Iterator<Item = CandidateSet> + '_ {
        self.adjacency(kind).get(&set).into_iter().flatten().copied()
    }

    /// Nodes implied by `node`.
    ///
    /// An `On` node turns its weak neighbors `Off`; an `Off` node turns its strong
    /// neighbors `On`.
    pub fn next_nodes(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        let kind = match node.polarity {
            Polarity::On => LinkKind::Weak,
            Polarity::Off => LinkKind::Strong,
        };
        self.neighbors(kind, node.set)
            .map(move |set| Node::new(set, !node.polarity))
    }

    /// Pattern recorded for a link, if any.
    #[must_use]
    pub fn pattern(
        &self,
        kind: LinkKind,
        a: CandidateSet,
        b: CandidateSet,
    ) -> Option<GroupedLinkPattern> {
        self.patterns.get(&(kind, a, b)).copied()
    }

    /// Every link once, strong links first, each with `from < to`.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        [LinkKind::Strong, LinkKind::Weak]
            .into_iter()
            .flat_map(move |kind| {
                self.adjacency(kind).iter().flat_map(move |(&from, targets)| {
                    targets
                        .range(from..)
                        .filter(move |&&to| to != from)
                        .map(move |&to| Link {
                            from,
                            to,
                            kind,
                            pattern: self.pattern(kind, from, to),
                        })
                })
            })
    }

    /// Number of strong links.
    #[must_use]
    pub fn strong_count(&self) -> usize {
        self.strong.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Number of weak links.
    #[must_use]
    pub fn weak_count(&self) -> usize {
        self.weak.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Number of distinct candidate sets taking part in a link.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.strong
            .keys()
            .chain(self.weak.keys())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Number of nodes in the graph, two per candidate set.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.set_count() * 2
    }

    /// Returns `true` if no link was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strong.is_empty() && self.weak.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chainlace_core::{Candidate, Digit, DigitPositions, Position};

    use super::*;

    fn single(x: u8, y: u8, digit: Digit) -> CandidateSet {
        Candidate::new(Position::new(x, y), digit).into()
    }

    #[test]
    fn test_add_is_symmetric_and_idempotent() {
        let a = single(0, 0, Digit::D1);
        let b = single(3, 0, Digit::D1);
        let mut links = LinkDictionary::new();
        assert!(links.add(LinkKind::Weak, a, b, None));
        assert!(!links.add(LinkKind::Weak, a, b, None));
        assert!(!links.add(LinkKind::Weak, b, a, None));
        assert!(links.has_link(LinkKind::Weak, a, b));
        assert!(links.has_link(LinkKind::Weak, b, a));
        assert!(!links.has_link(LinkKind::Strong, a, b));
        assert_eq!(links.weak_count(), 1);
        assert_eq!(links.node_count(), 4);
        assert!(links.contains(a));
        assert!(!links.contains(single(0, 0, Digit::D2)));
    }

    #[test]
    fn test_ignores_self_and_overlapping_weak_links() {
        let a = single(0, 0, Digit::D1);
        let group = CandidateSet::new(
            DigitPositions::from_iter([Position::new(0, 0), Position::new(1, 0)]),
            Digit::D1,
        )
        .unwrap();
        let mut links = LinkDictionary::new();
        assert!(!links.add(LinkKind::Strong, a, a, None));
        assert!(!links.add(LinkKind::Weak, a, group, None));
        assert!(links.is_empty());
    }

    #[test]
    fn test_next_nodes_alternate_polarity() {
        let a = single(0, 0, Digit::D1);
        let b = single(3, 0, Digit::D1);
        let c = single(0, 0, Digit::D2);
        let mut links = LinkDictionary::new();
        links.add(LinkKind::Strong, a, b, None);
        links.add(LinkKind::Weak, a, c, None);
        assert_eq!(links.next_nodes(Node::off(a)).collect::<Vec<_>>(), [Node::on(b)]);
        assert_eq!(links.next_nodes(Node::on(a)).collect::<Vec<_>>(), [Node::off(c)]);
        assert_eq!(links.next_nodes(Node::on(b)).count(), 0);
    }

    #[test]
    fn test_links_lists_each_pair_once() {
        let a = single(0, 0, Digit::D1);
        let b = single(3, 0, Digit::D1);
        let c = single(6, 0, Digit::D1);
        let mut links = LinkDictionary::new();
        links.add(LinkKind::Strong, b, a, None);
        links.add(LinkKind::Weak, a, b, None);
        links.add(LinkKind::Weak, c, a, None);
        let all = links.links().collect::<Vec<_>>();
        assert_eq!(all.len(), 3);
        assert_eq!((all[0].kind, all[0].from, all[0].to), (LinkKind::Strong, a, b));
        assert!(all.iter().all(|link| link.from < link.to));
    }
}
