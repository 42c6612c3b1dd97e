use std::collections::BTreeSet;

use chainlace_core::{DigitPositions, DigitSet, House, Position};

use super::{BoxedChainingRule, ChainingRule, LinkContext, LoopConclusionContext};
use crate::{
    TechniqueGrid,
    chain::{AlmostLockedSet, CandidateSet, GroupedLinkPattern, LinkTypes},
};

/// Links inside almost locked sets.
///
/// If one digit of an ALS is absent, the remaining `n` digits fill its `n` cells, so
/// every other digit is present. Pairs of digits whose cells inside the set do not
/// overlap are joined by a strong link carrying the set as its pattern.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlmostLockedSetRule {}

impl AlmostLockedSetRule {
    /// Creates the rule.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl ChainingRule for AlmostLockedSetRule {
    fn link_type(&self) -> LinkTypes {
        LinkTypes::ALMOST_LOCKED_SETS
    }

    fn clone_box(&self) -> BoxedChainingRule {
        Box::new(*self)
    }

    fn collect_links(&self, context: &mut LinkContext<'_>) {
        let grid = context.grid();
        for als in find_almost_locked_sets(grid, context.options().max_als_size()) {
            let pattern = GroupedLinkPattern::AlmostLockedSet(als);
            let groups = als
                .digits
                .iter()
                .filter_map(|digit| {
                    CandidateSet::new(als.positions & grid.digit_positions(digit), digit)
                })
                .collect::<Vec<_>>();
            for (i, &a) in groups.iter().enumerate() {
                for &b in &groups[i + 1..] {
                    if a.positions().is_disjoint(b.positions()) {
                        context.add_strong(a, b, Some(pattern));
                    }
                }
            }
            for &group in &groups {
                context.add_group_weak_links(group);
            }
        }
    }

    fn collect_loop_conclusions(&self, context: &mut LoopConclusionContext<'_>) {
        let grid = context.grid();
        let links = context.strong_link_patterns().collect::<Vec<_>>();
        for (from, to, pattern) in links {
            let GroupedLinkPattern::AlmostLockedSet(als) = pattern else {
                continue;
            };
            let remaining = als.digits - DigitSet::from_iter([from.digit(), to.digit()]);
            for digit in remaining {
                let inside = als.positions & grid.digit_positions(digit);
                if inside.is_empty() {
                    continue;
                }
                context.eliminate(inside.common_peers() - als.positions, digit);
            }
        }
    }
}

/// Every almost locked set of the grid, each reported once with the first house that
/// contains it.
pub(crate) fn find_almost_locked_sets(
    grid: &TechniqueGrid,
    max_size: usize,
) -> Vec<AlmostLockedSet> {
    let undecided = grid.undecided_cells();
    let mut seen = BTreeSet::new();
    let mut sets = vec![];
    for house in House::ALL {
        let cells = (house.positions() & undecided).iter().collect::<Vec<_>>();
        let unions = subset_digit_unions(grid, &cells);
        for (mask, &digits) in unions.iter().enumerate() {
            let size = mask.count_ones() as usize;
            if !(2..=max_size).contains(&size) || digits.len() != size + 1 {
                continue;
            }
            if has_locked_subset(mask, &unions) {
                continue;
            }
            let positions = select(&cells, mask);
            if seen.insert(positions) {
                sets.push(AlmostLockedSet {
                    positions,
                    digits,
                    house,
                });
            }
        }
    }
    sets
}

/// Candidate union of every subset of `cells`, indexed by bit mask.
fn subset_digit_unions(grid: &TechniqueGrid, cells: &[Position]) -> Vec<DigitSet> {
    let mut unions = vec![DigitSet::EMPTY; 1 << cells.len()];
    for mask in 1..unions.len() {
        let lowest = mask.trailing_zeros() as usize;
        unions[mask] = unions[mask & (mask - 1)] | grid.candidates_at(cells[lowest]);
    }
    unions
}

/// Returns `true` if a proper non-empty subset of `mask` holds no more digits than cells.
fn has_locked_subset(mask: usize, unions: &[DigitSet]) -> bool {
    let mut sub = (mask - 1) & mask;
    while sub != 0 {
        if unions[sub].len() <= sub.count_ones() as usize {
            return true;
        }
        sub = (sub - 1) & mask;
    }
    false
}

fn select(cells: &[Position], mask: usize) -> DigitPositions {
    cells
        .iter()
        .enumerate()
        .filter(|&(i, _)| mask & (1 << i) != 0)
        .map(|(_, &pos)| pos)
        .collect()
}
