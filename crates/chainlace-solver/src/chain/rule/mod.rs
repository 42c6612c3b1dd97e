//! Producers of links for the chain search.
//!
//! Every rule reads the grid, decides which candidate sets are forced together
//! (strong links) or exclude each other (weak links), and writes them into a shared
//! [`LinkDictionary`]. Rules are stateless and their contributions are additive;
//! [`all_rules`] lists them in a fixed order.

use std::fmt::Debug;

use chainlace_core::{Candidate, Digit, DigitPositions};

pub use self::{
    almost_locked_set::AlmostLockedSetRule,
    locked_candidates::LockedCandidatesRule,
    single_cell::SingleCellRule,
    single_digit::SingleDigitRule,
    unique_rectangle::{UniqueRectangleCase, UniqueRectangleRule},
    xyz_wing::XyzWingRule,
};
use super::{
    CandidateSet, Chain, ChainingOptions, Conclusion, Conclusions, GroupedLinkPattern,
    LinkDictionary, LinkKind, LinkTypes,
};
use crate::TechniqueGrid;

mod almost_locked_set;
mod locked_candidates;
mod single_cell;
mod single_digit;
mod unique_rectangle;
mod xyz_wing;

/// A producer of links.
pub trait ChainingRule: Debug + Send + Sync {
    /// The link type this rule produces.
    fn link_type(&self) -> LinkTypes;

    /// Returns a boxed clone of the rule.
    fn clone_box(&self) -> BoxedChainingRule;

    /// Adds this rule's links to the context.
    fn collect_links(&self, context: &mut LinkContext<'_>);

    /// Adds eliminations implied by a continuous nice loop through this rule's links.
    fn collect_loop_conclusions(&self, _context: &mut LoopConclusionContext<'_>) {}
}

/// A boxed chaining rule.
pub type BoxedChainingRule = Box<dyn ChainingRule>;

impl Clone for BoxedChainingRule {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Returns every chaining rule, elementary rules first.
#[must_use]
pub fn all_rules() -> Vec<BoxedChainingRule> {
    vec![
        Box::new(SingleDigitRule::new()),
        Box::new(SingleCellRule::new()),
        Box::new(LockedCandidatesRule::new()),
        Box::new(AlmostLockedSetRule::new()),
        Box::new(UniqueRectangleRule::new(UniqueRectangleCase::SameDigit)),
        Box::new(UniqueRectangleRule::new(UniqueRectangleCase::DifferentDigit)),
        Box::new(UniqueRectangleRule::new(UniqueRectangleCase::SingleSideExternal)),
        Box::new(UniqueRectangleRule::new(UniqueRectangleCase::DoubleSideExternal)),
        Box::new(XyzWingRule::new()),
    ]
}

/// Input and output of [`ChainingRule::collect_links`].
///
/// Links are filtered by the rule's [`LinkOption`](super::LinkOption) before they
/// reach the dictionary.
#[derive(Debug)]
pub struct LinkContext<'a> {
    grid: &'a TechniqueGrid,
    options: &'a ChainingOptions,
    link_type: LinkTypes,
    links: &'a mut LinkDictionary,
    added: usize,
}

impl<'a> LinkContext<'a> {
    /// Creates a context writing links of `link_type` into `links`.
    pub fn new(
        grid: &'a TechniqueGrid,
        options: &'a ChainingOptions,
        link_type: LinkTypes,
        links: &'a mut LinkDictionary,
    ) -> Self {
        Self {
            grid,
            options,
            link_type,
            links,
            added: 0,
        }
    }

    /// The grid links are built from.
    #[must_use]
    pub fn grid(&self) -> &'a TechniqueGrid {
        self.grid
    }

    /// Search options.
    #[must_use]
    pub fn options(&self) -> &'a ChainingOptions {
        self.options
    }

    /// Number of new links added through this context.
    #[must_use]
    pub fn added(&self) -> usize {
        self.added
    }

    /// Adds a strong link if both sides are admitted.
    pub fn add_strong(
        &mut self,
        a: CandidateSet,
        b: CandidateSet,
        pattern: Option<GroupedLinkPattern>,
    ) -> bool {
        self.add(LinkKind::Strong, a, b, pattern)
    }

    /// Adds a weak link if both sides are admitted.
    pub fn add_weak(
        &mut self,
        a: CandidateSet,
        b: CandidateSet,
        pattern: Option<GroupedLinkPattern>,
    ) -> bool {
        self.add(LinkKind::Weak, a, b, pattern)
    }

    fn add(
        &mut self,
        kind: LinkKind,
        a: CandidateSet,
        b: CandidateSet,
        pattern: Option<GroupedLinkPattern>,
    ) -> bool {
        let option = self.options.link_option(self.link_type);
        if !option.admits(a.positions()) || !option.admits(b.positions()) {
            return false;
        }
        let added = self.links.add(kind, a, b, pattern);
        self.added += usize::from(added);
        added
    }

    /// Adds weak links from a grouped node to every same-digit candidate seeing all of
    /// its cells.
    ///
    /// Single-cell sets are left alone; their weak links come from the elementary
    /// rules.
    pub fn add_group_weak_links(&mut self, group: CandidateSet) {
        if !group.is_grouped() {
            return;
        }
        let digit = group.digit();
        let targets = group.positions().common_peers() & self.grid.digit_positions(digit);
        for pos in targets {
            self.add_weak(
                group,
                CandidateSet::from_candidate(Candidate::new(pos, digit)),
                None,
            );
        }
    }
}

/// Input and output of [`ChainingRule::collect_loop_conclusions`].
#[derive(Debug)]
pub struct LoopConclusionContext<'a> {
    grid: &'a TechniqueGrid,
    links: &'a LinkDictionary,
    chain: &'a Chain,
    conclusions: &'a mut Conclusions,
}

impl<'a> LoopConclusionContext<'a> {
    /// Creates a context collecting into `conclusions`.
    pub fn new(
        grid: &'a TechniqueGrid,
        links: &'a LinkDictionary,
        chain: &'a Chain,
        conclusions: &'a mut Conclusions,
    ) -> Self {
        Self {
            grid,
            links,
            chain,
            conclusions,
        }
    }

    /// The grid the loop was found in.
    #[must_use]
    pub fn grid(&self) -> &'a TechniqueGrid {
        self.grid
    }

    /// The closed loop.
    #[must_use]
    pub fn chain(&self) -> &'a Chain {
        self.chain
    }

    /// Strong links of the loop together with their recorded patterns.
    pub fn strong_link_patterns(
        &self,
    ) -> impl Iterator<Item = (CandidateSet, CandidateSet, GroupedLinkPattern)> + 'a {
        let links = self.links;
        let chain = self.chain;
        chain
            .links()
            .filter(|&(_, _, kind)| kind == LinkKind::Strong)
            .filter_map(move |(from, to, kind)| {
                links
                    .pattern(kind, from.set, to.set)
                    .map(|pattern| (from.set, to.set, pattern))
            })
    }

    /// Eliminates `digit` from every cell of `positions` still holding it.
    pub fn eliminate(&mut self, positions: DigitPositions, digit: Digit) {
        let targets = positions & self.grid.digit_positions(digit);
        self.conclusions.extend(
            targets
                .iter()
                .map(|pos| Conclusion::elimination(Candidate::new(pos, digit))),
        );
    }
}
