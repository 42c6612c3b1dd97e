use std::{
    collections::BTreeSet,
    fmt::{self, Display},
};

use chainlace_core::{Candidate, DigitSet};

use super::CandidateSet;
use crate::TechniqueGrid;

/// What a conclusion does to its candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConclusionKind {
    /// The digit goes in the cell.
    Assignment,
    /// The digit is removed from the cell.
    Elimination,
}

/// A deduction about a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Conclusion {
    /// Assignment or elimination.
    pub kind: ConclusionKind,
    /// The candidate concerned.
    pub candidate: Candidate,
}

/// An ordered, duplicate-free set of conclusions.
pub type Conclusions = BTreeSet<Conclusion>;

impl Conclusion {
    /// Creates an assignment.
    #[must_use]
    pub const fn assignment(candidate: Candidate) -> Self {
        Self {
            kind: ConclusionKind::Assignment,
            candidate,
        }
    }

    /// Creates an elimination.
    #[must_use]
    pub const fn elimination(candidate: Candidate) -> Self {
        Self {
            kind: ConclusionKind::Elimination,
            candidate,
        }
    }

    /// Returns `true` if applying the conclusion would change `grid`.
    ///
    /// Both kinds need the candidate present in a cell that is not decided yet.
    #[must_use]
    pub fn is_applicable(&self, grid: &TechniqueGrid) -> bool {
        let Candidate { position, digit } = self.candidate;
        match self.kind {
            ConclusionKind::Elimination => {
                grid.has_candidate(position, digit) && grid.candidates_at(position).len() > 1
            }
            ConclusionKind::Assignment => {
                grid.has_candidate(position, digit) && grid.would_place_change(position, digit)
            }
        }
    }

    /// Applies the conclusion. Returns `true` if the grid changed.
    pub fn apply_to(&self, grid: &mut TechniqueGrid) -> bool {
        let Candidate { position, digit } = self.candidate;
        match self.kind {
            ConclusionKind::Elimination => grid.remove_candidate(position, digit),
            ConclusionKind::Assignment => grid.place(position, digit),
        }
    }
}

impl Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Candidate { position, digit } = self.candidate;
        match self.kind {
            ConclusionKind::Assignment => write!(f, "{position}={digit}"),
            ConclusionKind::Elimination => write!(f, "{position}<>{digit}"),
        }
    }
}

/// Eliminations that hold whenever at least one of `a` and `b` is true.
///
/// - Same digit: the digit leaves every cell seeing all cells of both sets.
/// - Two digits of one cell: every other digit leaves that cell.
/// - Two digits where a single cell of one set sees every cell of the other: the other
///   digit leaves that cell.
///
/// Cells of `a` and `b` themselves are never touched.
#[must_use]
pub fn either_true_eliminations(grid: &TechniqueGrid, a: CandidateSet, b: CandidateSet) -> Conclusions {
    let mut conclusions = Conclusions::new();
    if a.digit() == b.digit() {
        let digit = a.digit();
        let members = a.positions() | b.positions();
        let targets = members.common_peers() & grid.digit_positions(digit);
        conclusions.extend(
            targets
                .iter()
                .map(|pos| Conclusion::elimination(Candidate::new(pos, digit))),
        );
        return conclusions;
    }

    if let (Some(ca), Some(cb)) = (a.as_candidate(), b.as_candidate())
        && ca.position == cb.position
    {
        let others = grid.candidates_at(ca.position) - DigitSet::from_iter([ca.digit, cb.digit]);
        conclusions.extend(
            others
                .iter()
                .map(|digit| Conclusion::elimination(Candidate::new(ca.position, digit))),
        );
        return conclusions;
    }

    for (single, other) in [(a, b), (b, a)] {
        let Some(candidate) = single.as_candidate() else {
            continue;
        };
        let pos = candidate.position;
        if !other.positions().contains(pos)
            && other.positions().is_subset(pos.house_peers())
            && grid.has_candidate(pos, other.digit())
        {
            conclusions.insert(Conclusion::elimination(Candidate::new(pos, other.digit())));
        }
    }
    conclusions
}

/// Formats conclusions as a comma separated list.
pub(crate) struct DisplayConclusions<'a>(pub(crate) &'a Conclusions);

impl Display for DisplayConclusions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, conclusion) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{conclusion}")?;
        }
        Ok(())
    }
}
