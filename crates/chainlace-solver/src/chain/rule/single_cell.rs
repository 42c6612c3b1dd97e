use chainlace_core::{Candidate, Digit};

use super::{BoxedChainingRule, ChainingRule, LinkContext};
use crate::chain::{CandidateSet, LinkTypes};

/// Links between candidates of one cell.
///
/// A bivalue cell forms a strong link; any two candidates of a cell form a weak link.
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleCellRule {}

impl SingleCellRule {
    /// Creates the rule.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl ChainingRule for SingleCellRule {
    fn link_type(&self) -> LinkTypes {
        LinkTypes::SINGLE_CELL
    }

    fn clone_box(&self) -> BoxedChainingRule {
        Box::new(*self)
    }

    fn collect_links(&self, context: &mut LinkContext<'_>) {
        let grid = context.grid();
        for pos in grid.undecided_cells() {
            let digits = grid.candidates_at(pos).iter().collect::<Vec<Digit>>();
            let set = |digit| CandidateSet::from_candidate(Candidate::new(pos, digit));
            if let [d1, d2] = digits[..] {
                context.add_strong(set(d1), set(d2), None);
            }
            for (i, &d1) in digits.iter().enumerate() {
                for &d2 in &digits[i + 1..] {
                    context.add_weak(set(d1), set(d2), None);
                }
            }
        }
    }
}
