use chainlace_core::{DigitPositions, Position};

use super::{BoxedChainingRule, ChainingRule, LinkContext};
use crate::{
    TechniqueGrid,
    chain::{CandidateSet, GroupedLinkPattern, LinkTypes, XyzWingPattern},
};

/// Links through XYZ-Wings.
///
/// A pivot `{x,y,z}` sees two bivalue wings `{x,z}` and `{y,z}`. If one wing is not
/// `z`, the pivot or the other wing must be, which gives a strong link between the
/// pivot grouped with one wing and the other wing.
#[derive(Debug, Default, Clone, Copy)]
pub struct XyzWingRule {}

impl XyzWingRule {
    /// Creates the rule.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl ChainingRule for XyzWingRule {
    fn link_type(&self) -> LinkTypes {
        LinkTypes::XYZ_WING
    }

    fn clone_box(&self) -> BoxedChainingRule {
        Box::new(*self)
    }

    fn collect_links(&self, context: &mut LinkContext<'_>) {
        for wing in find_xyz_wings(context.grid()) {
            let pattern = GroupedLinkPattern::XyzWing(wing);
            for (paired, alone) in [(wing.wing1, wing.wing2), (wing.wing2, wing.wing1)] {
                let Some(group) =
                    CandidateSet::new(DigitPositions::from_iter([wing.pivot, paired]), wing.z)
                else {
                    continue;
                };
                let Some(single) = CandidateSet::new(DigitPositions::from_elem(alone), wing.z)
                else {
                    continue;
                };
                context.add_strong(group, single, Some(pattern));
                context.add_group_weak_links(group);
            }
        }
    }
}

fn find_xyz_wings(grid: &TechniqueGrid) -> Vec<XyzWingPattern> {
    let bivalue = grid.bivalue_cells();
    let mut wings = vec![];
    for pivot in grid.trivalue_cells() {
        let digits = grid.candidates_at(pivot);
        let candidates = (pivot.house_peers() & bivalue)
            .iter()
            .filter(|&pos| grid.candidates_at(pos).is_subset(digits))
            .collect::<Vec<Position>>();
        for (i, &wing1) in candidates.iter().enumerate() {
            for &wing2 in &candidates[i + 1..] {
                let (d1, d2) = (grid.candidates_at(wing1), grid.candidates_at(wing2));
                if d1 == d2 || (d1 | d2) != digits {
                    continue;
                }
                let Some(z) = (d1 & d2).as_single() else {
                    continue;
                };
                wings.push(XyzWingPattern {
                    pivot,
                    wing1,
                    wing2,
                    z,
                });
            }
        }
    }
    wings
}

#[cfg(test)]
mod tests {
    use chainlace_core::{Candidate, Digit};

    use super::*;
    use crate::chain::{ChainingOptions, LinkDictionary, LinkKind};

    fn restrict(grid: &mut TechniqueGrid, pos: Position, digits: &[Digit]) {
        for digit in Digit::ALL {
            if !digits.contains(&digit) {
                grid.remove_candidate(pos, digit);
            }
        }
    }

    fn build(grid: &TechniqueGrid) -> LinkDictionary {
        let options = ChainingOptions::grouped();
        let mut links = LinkDictionary::new();
        let mut context = LinkContext::new(grid, &options, LinkTypes::XYZ_WING, &mut links);
        XyzWingRule::new().collect_links(&mut context);
        links
    }

    const PIVOT: Position = Position::new(0, 0);
    const ROW_WING: Position = Position::new(4, 0);
    const BOX_WING: Position = Position::new(1, 1);

    fn wing_grid(box_wing: Position) -> TechniqueGrid {
        let mut grid = TechniqueGrid::new();
        restrict(&mut grid, PIVOT, &[Digit::D1, Digit::D2, Digit::D3]);
        restrict(&mut grid, ROW_WING, &[Digit::D1, Digit::D3]);
        restrict(&mut grid, box_wing, &[Digit::D2, Digit::D3]);
        grid
    }

    #[test]
    fn test_pivot_grouped_with_each_wing() {
        let grid = wing_grid(BOX_WING);
        let wings = find_xyz_wings(&grid);
        assert_eq!(wings.len(), 1);
        assert_eq!(wings[0].z, Digit::D3);

        let links = build(&grid);
        let z = |cells: &[Position]| {
            CandidateSet::new(cells.iter().copied().collect(), Digit::D3).unwrap()
        };
        assert!(links.has_link(LinkKind::Strong, z(&[PIVOT, ROW_WING]), z(&[BOX_WING])));
        assert!(links.has_link(LinkKind::Strong, z(&[PIVOT, BOX_WING]), z(&[ROW_WING])));
        assert_eq!(links.strong_count(), 2);
        assert!(matches!(
            links.pattern(LinkKind::Strong, z(&[BOX_WING]), z(&[PIVOT, ROW_WING])),
            Some(GroupedLinkPattern::XyzWing(_))
        ));

        // r1c3 sees both the pivot and the row wing.
        let outside = CandidateSet::from(Candidate::new(Position::new(2, 0), Digit::D3));
        assert!(links.has_link(LinkKind::Weak, z(&[PIVOT, ROW_WING]), outside));
    }

    #[test]
    fn test_wing_must_see_pivot() {
        let grid = wing_grid(Position::new(4, 4));
        assert!(find_xyz_wings(&grid).is_empty());
        assert!(build(&grid).is_empty());
    }
}
