use std::{
    collections::BTreeMap,
    fmt::{self, Debug, Display},
};

use chainlace_core::{Candidate, Digit, DigitPositions, DigitSet, Position};

use crate::{
    TechniqueGrid,
    chain::{ConclusionKind, Conclusions},
};

/// Cells involved in a technique's applicability conditions.
pub type ConditionCells = DigitPositions;

/// Pairs of (cells, digits) involved in a technique's applicability conditions.
pub type ConditionDigitCells = Vec<(DigitPositions, DigitSet)>;

/// A deduction found by a technique, described without mutating the grid.
pub trait TechniqueStep: Debug + Send + Sync {
    /// Name of the technique that produced this step.
    ///
    /// Chain steps report the kind of chain found (`X-Chain`, `Grouped AIC`, ...)
    /// rather than the name of the technique that searched for it.
    fn technique_name(&self) -> &'static str;

    /// Returns a boxed clone of the step.
    fn clone_box(&self) -> BoxedTechniqueStep;

    /// Cells that justify the step.
    fn condition_cells(&self) -> ConditionCells;

    /// Cells and the digits that matter in them.
    fn condition_digit_cells(&self) -> ConditionDigitCells;

    /// Placements and eliminations proven by the step.
    fn application(&self) -> Vec<TechniqueApplication>;

    /// Applies [`application`](Self::application) to `grid`.
    ///
    /// Returns `true` if any candidate was removed.
    fn apply_application(&self, grid: &mut TechniqueGrid) -> bool {
        self.application()
            .iter()
            .fold(false, |changed, app| app.apply_to(grid) | changed)
    }
}

/// A boxed technique step.
pub type BoxedTechniqueStep = Box<dyn TechniqueStep>;

impl Clone for BoxedTechniqueStep {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A single change proven by a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechniqueApplication {
    /// The digit goes in the cell.
    Placement {
        /// Cell receiving the digit.
        position: Position,
        /// Placed digit.
        digit: Digit,
    },
    /// Candidates removed from cells.
    CandidateElimination {
        /// Cells losing candidates.
        positions: DigitPositions,
        /// Digits removed from every cell of `positions`.
        digits: DigitSet,
    },
}

impl TechniqueApplication {
    /// Converts chain conclusions: assignments first, then one elimination per digit.
    #[must_use]
    pub fn from_conclusions(conclusions: &Conclusions) -> Vec<Self> {
        let mut placements = vec![];
        let mut eliminations = BTreeMap::<Digit, DigitPositions>::new();
        for conclusion in conclusions {
            let Candidate { position, digit } = conclusion.candidate;
            match conclusion.kind {
                ConclusionKind::Assignment => placements.push(Self::Placement { position, digit }),
                ConclusionKind::Elimination => {
                    eliminations.entry(digit).or_default().insert(position);
                }
            }
        }
        placements.extend(eliminations.into_iter().map(|(digit, positions)| {
            Self::CandidateElimination {
                positions,
                digits: DigitSet::from_elem(digit),
            }
        }));
        placements
    }

    /// Applies the change. Returns `true` if the grid changed.
    pub fn apply_to(&self, grid: &mut TechniqueGrid) -> bool {
        match *self {
            Self::Placement { position, digit } => grid.place(position, digit),
            Self::CandidateElimination { positions, digits } => digits
                .into_iter()
                .fold(false, |changed, digit| {
                    grid.remove_candidate_with_mask(positions, digit) | changed
                }),
        }
    }
}

impl Display for TechniqueApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placement { position, digit } => write!(f, "{position}={digit}"),
            Self::CandidateElimination { positions, digits } => {
                for (i, pos) in positions.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{pos}")?;
                }
                write!(f, "<>")?;
                for digit in *digits {
                    write!(f, "{digit}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Conclusion;

    fn candidate(x: u8, y: u8, digit: Digit) -> Candidate {
        Candidate::new(Position::new(x, y), digit)
    }

    #[test]
    fn test_from_conclusions_groups_eliminations_by_digit() {
        let conclusions = Conclusions::from([
            Conclusion::elimination(candidate(3, 0, Digit::D1)),
            Conclusion::elimination(candidate(5, 0, Digit::D1)),
            Conclusion::elimination(candidate(5, 0, Digit::D4)),
            Conclusion::assignment(candidate(0, 8, Digit::D7)),
        ]);
        let app = TechniqueApplication::from_conclusions(&conclusions);
        assert_eq!(
            app,
            [
                TechniqueApplication::Placement {
                    position: Position::new(0, 8),
                    digit: Digit::D7,
                },
                TechniqueApplication::CandidateElimination {
                    positions: DigitPositions::from_iter([
                        Position::new(3, 0),
                        Position::new(5, 0),
                    ]),
                    digits: DigitSet::from_elem(Digit::D1),
                },
                TechniqueApplication::CandidateElimination {
                    positions: DigitPositions::from_elem(Position::new(5, 0)),
                    digits: DigitSet::from_elem(Digit::D4),
                },
            ]
        );
        let text = app.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(text, ["r9c1=7", "r1c4,r1c6<>1", "r1c6<>4"]);
    }

    #[test]
    fn test_apply_to_reports_change_once() {
        let mut grid = TechniqueGrid::new();
        let app = TechniqueApplication::CandidateElimination {
            positions: DigitPositions::from_iter([Position::new(0, 0), Position::new(1, 0)]),
            digits: DigitSet::from_iter([Digit::D2, Digit::D3]),
        };
        assert!(app.apply_to(&mut grid));
        assert!(!grid.has_candidate(Position::new(1, 0), Digit::D3));
        assert!(!app.apply_to(&mut grid));

        let place = TechniqueApplication::Placement {
            position: Position::new(4, 4),
            digit: Digit::D9,
        };
        assert!(place.apply_to(&mut grid));
        assert_eq!(
            grid.candidates_at(Position::new(4, 4)),
            DigitSet::from_elem(Digit::D9)
        );
        assert!(!place.apply_to(&mut grid));
    }
}
