use chainlace_core::{Candidate, Digit, House, all_digit_houses};

use super::{BoxedChainingRule, ChainingRule, LinkContext};
use crate::{
    TechniqueGrid,
    chain::{CandidateSet, LinkTypes},
};

/// Links between candidates of one digit inside a house.
///
/// A digit with exactly two places in a house forms a strong link (a conjugate pair);
/// any two places of a digit in a house form a weak link.
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleDigitRule {}

impl SingleDigitRule {
    /// Creates the rule.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl ChainingRule for SingleDigitRule {
    fn link_type(&self) -> LinkTypes {
        LinkTypes::SINGLE_DIGIT
    }

    fn clone_box(&self) -> BoxedChainingRule {
        Box::new(*self)
    }

    fn collect_links(&self, context: &mut LinkContext<'_>) {
        let grid = context.grid();
        let undecided = grid.undecided_cells();
        for (digit, house) in all_digit_houses() {
            let positions = grid.digit_positions(digit) & house.positions() & undecided;
            let sets = positions
                .iter()
                .map(|pos| CandidateSet::from_candidate(Candidate::new(pos, digit)))
                .collect::<Vec<_>>();
            if let [a, b] = sets[..]
                && !house_has_decided(grid, house, digit)
            {
                context.add_strong(a, b, None);
            }
            for (i, &a) in sets.iter().enumerate() {
                for &b in &sets[i + 1..] {
                    context.add_weak(a, b, None);
                }
            }
        }
    }
}

fn house_has_decided(grid: &TechniqueGrid, house: House, digit: Digit) -> bool {
    !(grid.digit_positions(digit) & house.positions() & grid.decided_cells()).is_empty()
}

#[cfg(test)]
mod tests {
    use chainlace_core::Position;

    use super::*;
    use crate::chain::{ChainingOptions, LinkDictionary, LinkKind};

    fn build(grid: &TechniqueGrid) -> LinkDictionary {
        let options = ChainingOptions::elementary();
        let mut links = LinkDictionary::new();
        let mut context = LinkContext::new(grid, &options, LinkTypes::SINGLE_DIGIT, &mut links);
        SingleDigitRule::new().collect_links(&mut context);
        links
    }

    fn set(x: u8, y: u8, digit: Digit) -> CandidateSet {
        Candidate::new(Position::new(x, y), digit).into()
    }

    #[test]
    fn test_conjugate_pair_is_strong() {
        let mut grid = TechniqueGrid::new();
        for x in 2..9 {
            grid.remove_candidate(Position::new(x, 0), Digit::D4);
        }
        let links = build(&grid);
        let (a, b) = (set(0, 0, Digit::D4), set(1, 0, Digit::D4));
        assert!(links.has_link(LinkKind::Strong, a, b));
        assert!(links.has_link(LinkKind::Weak, a, b));
    }

    #[test]
    fn test_third_cell_only_weak() {
        let mut grid = TechniqueGrid::new();
        for x in 3..9 {
            grid.remove_candidate(Position::new(x, 4), Digit::D6);
        }
        let links = build(&grid);
        let [a, b, c] = [0, 1, 2].map(|x| set(x, 4, Digit::D6));
        // The box still holds the digit elsewhere, and so does every column.
        assert!(!links.has_link(LinkKind::Strong, a, b));
        assert!(links.has_link(LinkKind::Weak, a, c));
        assert!(links.has_link(LinkKind::Weak, b, c));
    }
}
