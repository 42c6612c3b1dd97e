use chainlace_core::{DigitPositions, House, Position, all_digit_houses};

use super::{BoxedChainingRule, ChainingRule, LinkContext};
use crate::chain::{CandidateSet, LinkTypes};

/// Links involving box-line intersection groups.
///
/// Inside a house, the places of a digit split into units: single cells and groups of
/// two or three cells sharing a box-line intersection. Two disjoint units covering
/// every place form a strong link; any two disjoint units form a weak link.
///
/// Only pairs involving at least one group are produced here; pairs of single cells
/// belong to [`SingleDigitRule`](super::SingleDigitRule).
#[derive(Debug, Default, Clone, Copy)]
pub struct LockedCandidatesRule {}

impl LockedCandidatesRule {
    /// Creates the rule.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl ChainingRule for LockedCandidatesRule {
    fn link_type(&self) -> LinkTypes {
        LinkTypes::LOCKED_CANDIDATES
    }

    fn clone_box(&self) -> BoxedChainingRule {
        Box::new(*self)
    }

    fn collect_links(&self, context: &mut LinkContext<'_>) {
        let grid = context.grid();
        let undecided = grid.undecided_cells();
        let decided = grid.decided_cells();
        for (digit, house) in all_digit_houses() {
            let digit_positions = grid.digit_positions(digit) & house.positions();
            let positions = digit_positions & undecided;
            let units = units(house, positions);
            if !units.iter().any(|unit| unit.len() > 1) {
                continue;
            }
            let can_be_strong = (digit_positions & decided).is_empty();
            let set = |positions| CandidateSet::new(positions, digit);
            for (i, &a) in units.iter().enumerate() {
                for &b in &units[i + 1..] {
                    if !a.is_disjoint(b) || (a.len() == 1 && b.len() == 1) {
                        continue;
                    }
                    let (Some(sa), Some(sb)) = (set(a), set(b)) else {
                        continue;
                    };
                    if can_be_strong && (a | b) == positions {
                        context.add_strong(sa, sb, None);
                    }
                    context.add_weak(sa, sb, None);
                }
            }
            for &unit in &units {
                if let Some(group) = set(unit) {
                    context.add_group_weak_links(group);
                }
            }
        }
    }
}

/// Single cells followed by intersection groups of two or more cells.
fn units(house: House, positions: DigitPositions) -> Vec<DigitPositions> {
    let mut units = positions
        .iter()
        .map(DigitPositions::from_elem)
        .collect::<Vec<_>>();
    units.extend(
        crossing_houses(house)
            .into_iter()
            .map(|other| positions & other.positions())
            .filter(|group| group.len() > 1),
    );
    units
}

/// Houses meeting `house` in a box-line intersection.
fn crossing_houses(house: House) -> Vec<House> {
    match house {
        House::Row { y } => (0..3)
            .map(|i| House::Box {
                index: (y / 3) * 3 + i,
            })
            .collect(),
        House::Column { x } => (0..3)
            .map(|i| House::Box {
                index: i * 3 + x / 3,
            })
            .collect(),
        House::Box { index } => {
            let origin = Position::from_box(index, 0);
            (0..3)
                .map(|i| House::Row { y: origin.y() + i })
                .chain((0..3).map(|i| House::Column { x: origin.x() + i }))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use chainlace_core::{Candidate, Digit};

    use super::*;
    use crate::{
        TechniqueGrid,
        chain::{ChainingOptions, LinkDictionary, LinkKind, LinkOption},
    };

    fn build(grid: &TechniqueGrid, options: &ChainingOptions) -> LinkDictionary {
        let mut links = LinkDictionary::new();
        let mut context =
            LinkContext::new(grid, options, LinkTypes::LOCKED_CANDIDATES, &mut links);
        LockedCandidatesRule::new().collect_links(&mut context);
        links
    }

    fn cells(cells: &[(u8, u8)]) -> DigitPositions {
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    fn keep_only(grid: &mut TechniqueGrid, house: House, digit: Digit, keep: DigitPositions) {
        grid.remove_candidate_with_mask(house.positions() - keep, digit);
    }

    #[test]
    fn test_group_and_single_cover_row() {
        let mut grid = TechniqueGrid::new();
        let keep = cells(&[(0, 0), (1, 0), (6, 0)]);
        keep_only(&mut grid, House::Row { y: 0 }, Digit::D3, keep);
        let links = build(&grid, &ChainingOptions::grouped());

        let group = CandidateSet::new(cells(&[(0, 0), (1, 0)]), Digit::D3).unwrap();
        let single = CandidateSet::from(Candidate::new(Position::new(6, 0), Digit::D3));
        assert!(links.has_link(LinkKind::Strong, group, single));
        assert!(links.has_link(LinkKind::Weak, group, single));

        // The group also sees the rest of box 1.
        let box_cell = CandidateSet::from(Candidate::new(Position::new(2, 2), Digit::D3));
        assert!(links.has_link(LinkKind::Weak, group, box_cell));
        assert!(!links.has_link(LinkKind::Strong, group, box_cell));
    }

    #[test]
    fn test_two_groups_cover_row() {
        let mut grid = TechniqueGrid::new();
        let keep = cells(&[(0, 0), (1, 0), (6, 0), (8, 0)]);
        keep_only(&mut grid, House::Row { y: 0 }, Digit::D3, keep);
        let links = build(&grid, &ChainingOptions::grouped());

        let left = CandidateSet::new(cells(&[(0, 0), (1, 0)]), Digit::D3).unwrap();
        let right = CandidateSet::new(cells(&[(6, 0), (8, 0)]), Digit::D3).unwrap();
        assert!(links.has_link(LinkKind::Strong, left, right));
        // Single against group does not cover the row.
        let single = CandidateSet::from(Candidate::new(Position::new(0, 0), Digit::D3));
        assert!(!links.has_link(LinkKind::Strong, single, right));
        assert!(links.has_link(LinkKind::Weak, single, right));
    }

    #[test]
    fn test_link_option_none_disables_rule() {
        let mut grid = TechniqueGrid::new();
        keep_only(&mut grid, House::Row { y: 0 }, Digit::D3, cells(&[(0, 0), (1, 0), (6, 0)]));
        let options = ChainingOptions::grouped()
            .with_link_option(LinkTypes::LOCKED_CANDIDATES, LinkOption::None);
        assert!(build(&grid, &options).is_empty());
    }

    #[test]
    fn test_crossing_houses() {
        assert_eq!(
            crossing_houses(House::Column { x: 4 }),
            [1, 4, 7].map(|index| House::Box { index })
        );
        assert_eq!(crossing_houses(House::Box { index: 8 }).len(), 6);
    }
}
