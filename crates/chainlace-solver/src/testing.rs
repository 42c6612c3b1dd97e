//! Test harness for techniques.
//!
//! [`TechniqueTester`] keeps the initial grid next to the current one. Every
//! application is cross-checked: the step returned by `find_step` on the grid before
//! `apply` is replayed through its [`TechniqueApplication`](crate::TechniqueApplication)s
//! and must account for the candidates `apply` removed.

use std::str::FromStr as _;

use chainlace_core::{Digit, DigitGrid, DigitSet, Position};

use crate::{TechniqueGrid, technique::Technique};

/// Fluent assertions over a grid evolving under techniques.
///
/// Assertions compare against the initial grid and report the caller's location.
#[derive(Debug)]
pub struct TechniqueTester {
    initial: TechniqueGrid,
    current: TechniqueGrid,
    replay_steps: bool,
}

impl TechniqueTester {
    /// Creates a tester from an initial grid state.
    pub fn new<T>(initial: T) -> Self
    where
        T: Into<TechniqueGrid>,
    {
        let initial = initial.into();
        Self {
            current: initial.clone(),
            initial,
            replay_steps: true,
        }
    }

    /// Creates a tester from a grid string in the [`DigitGrid::from_str`] format.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a grid.
    #[track_caller]
    pub fn from_str(s: &str) -> Self {
        Self::new(DigitGrid::from_str(s).unwrap())
    }

    /// Skips replaying `find_step` after every application.
    #[must_use]
    pub fn without_step_replay(mut self) -> Self {
        self.replay_steps = false;
        self
    }

    /// Current grid state.
    pub fn grid(&self) -> &TechniqueGrid {
        &self.current
    }

    /// Applies the technique once.
    ///
    /// # Panics
    ///
    /// Panics if the technique fails or disagrees with its own step.
    #[track_caller]
    pub fn apply_once<T>(mut self, technique: &T) -> Self
    where
        T: Technique,
    {
        self.apply_checked(technique);
        self
    }

    /// Applies the technique until it makes no more progress.
    ///
    /// # Panics
    ///
    /// Panics if the technique fails or disagrees with its own step.
    #[track_caller]
    pub fn apply_until_stuck<T>(mut self, technique: &T) -> Self
    where
        T: Technique,
    {
        while self.apply_checked(technique) {}
        self
    }

    #[track_caller]
    fn apply_checked<T>(&mut self, technique: &T) -> bool
    where
        T: Technique,
    {
        let before = self.current.clone();
        let changed = technique.apply(&mut self.current).unwrap();
        if self.replay_steps {
            replay_step(technique, &before, &self.current, changed);
        }
        changed
    }

    /// Asserts that the next step found on the current grid has the given name.
    ///
    /// # Panics
    ///
    /// Panics if no step is found or its name differs.
    #[track_caller]
    pub fn assert_step_named<T>(self, technique: &T, expected: &str) -> Self
    where
        T: Technique,
    {
        let step = technique.find_step(&self.current).unwrap();
        assert_eq!(
            step.as_ref().map(|step| step.technique_name()),
            Some(expected),
            "Expected {} to find a {expected} step",
            technique.name()
        );
        self
    }

    /// Asserts that an initially undecided cell now holds only `digit`.
    ///
    /// # Panics
    ///
    /// Panics if the cell was decided from the start, or is not decided as `digit`.
    #[track_caller]
    pub fn assert_placed(self, pos: Position, digit: Digit) -> Self {
        let (initial, current) = self.cell(pos);
        assert!(
            initial.len() > 1,
            "Expected {pos} to start undecided, but it held {initial:?}"
        );
        assert_eq!(
            current,
            DigitSet::from_elem(digit),
            "Expected {pos} to be decided as {digit}, but it holds {current:?}"
        );
        self
    }

    /// Asserts that every digit of `digits` was a candidate initially and is gone now.
    ///
    /// Other candidates may also have been removed.
    ///
    /// # Panics
    ///
    /// Panics if any of the digits is still present, or was never present.
    #[track_caller]
    pub fn assert_removed_includes<C>(self, pos: Position, digits: C) -> Self
    where
        C: IntoIterator<Item = Digit>,
    {
        let digits = DigitSet::from_iter(digits);
        let (initial, current) = self.cell(pos);
        assert!(
            digits.is_subset(initial),
            "Expected {pos} to start with {digits:?}, but it held {initial:?}"
        );
        assert!(
            (current & digits).is_empty(),
            "Expected {digits:?} to be removed from {pos}, but {:?} remain",
            current & digits
        );
        self
    }

    /// Asserts that exactly `digits` were removed from a cell.
    ///
    /// # Panics
    ///
    /// Panics if the removed candidates don't match `digits`.
    #[track_caller]
    pub fn assert_removed_exact<C>(self, pos: Position, digits: C) -> Self
    where
        C: IntoIterator<Item = Digit>,
    {
        let digits = DigitSet::from_iter(digits);
        let (initial, current) = self.cell(pos);
        let removed = initial.difference(current);
        assert_eq!(
            removed, digits,
            "Expected exactly {digits:?} to be removed from {pos}, but {removed:?} were ({initial:?} -> {current:?})"
        );
        self
    }

    /// Asserts that a cell's candidates have not changed.
    ///
    /// # Panics
    ///
    /// Panics if the cell's candidates differ from the initial state.
    #[track_caller]
    pub fn assert_no_change(self, pos: Position) -> Self {
        let (initial, current) = self.cell(pos);
        assert_eq!(
            initial, current,
            "Expected no change at {pos}, but {initial:?} became {current:?}"
        );
        self
    }

    fn cell(&self, pos: Position) -> (DigitSet, DigitSet) {
        (
            self.initial.candidates_at(pos),
            self.current.candidates_at(pos),
        )
    }
}

// `apply` may go further than one step, so the replayed step only bounds it.
#[track_caller]
fn replay_step<T>(technique: &T, before: &TechniqueGrid, after: &TechniqueGrid, changed: bool)
where
    T: Technique,
{
    let name = technique.name();
    let step = technique.find_step(before).unwrap();
    assert_eq!(
        step.is_some(),
        changed,
        "Expected {name} to report a change exactly when find_step returns a step"
    );
    let mut replayed = before.clone();
    if let Some(step) = &step {
        assert!(
            step.apply_application(&mut replayed),
            "Expected the {} step of {name} to change the grid",
            step.technique_name()
        );
    }
    for digit in Digit::ALL {
        let (replayed, after) = (replayed.digit_positions(digit), after.digit_positions(digit));
        assert!(
            after.is_subset(replayed),
            "Expected {name} to remove every {digit} its step removes, but {:?} remain",
            after.difference(replayed)
        );
    }
}

#[cfg(test)]
mod tests {
    use chainlace_core::{CandidateGrid, DigitPositions};

    use super::*;
    use crate::{
        BoxedTechniqueStep, ConditionCells, ConditionDigitCells, SolverError,
        TechniqueApplication, TechniqueStep,
        technique::{BoxedTechnique, HiddenSingle, LockedCandidates, NakedSingle},
    };

    const CORNER: Position = Position::new(0, 0);

    #[derive(Debug, Clone)]
    struct PlaceCornerStep;

    impl TechniqueStep for PlaceCornerStep {
        fn technique_name(&self) -> &'static str {
            "place-corner"
        }

        fn clone_box(&self) -> BoxedTechniqueStep {
            Box::new(self.clone())
        }

        fn condition_cells(&self) -> ConditionCells {
            DigitPositions::from_elem(CORNER)
        }

        fn condition_digit_cells(&self) -> ConditionDigitCells {
            vec![(self.condition_cells(), DigitSet::from_elem(Digit::D1))]
        }

        fn application(&self) -> Vec<TechniqueApplication> {
            vec![TechniqueApplication::Placement {
                position: CORNER,
                digit: Digit::D1,
            }]
        }
    }

    // Always reports the corner placement; `apply` does whatever the closure says.
    #[derive(Debug)]
    struct Misbehaving(fn(&mut TechniqueGrid) -> bool);

    impl Technique for Misbehaving {
        fn name(&self) -> &'static str {
            "misbehaving"
        }

        fn clone_box(&self) -> BoxedTechnique {
            Box::new(Misbehaving(self.0))
        }

        fn find_step(
            &self,
            _grid: &TechniqueGrid,
        ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
            Ok(Some(Box::new(PlaceCornerStep)))
        }

        fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
            Ok((self.0)(grid))
        }
    }

    fn corner_single() -> CandidateGrid {
        let mut grid = CandidateGrid::new();
        grid.place(CORNER, Digit::D1);
        grid
    }

    #[test]
    fn test_apply_until_stuck_stops() {
        let tester = TechniqueTester::new(corner_single()).apply_until_stuck(&NakedSingle::new());
        assert!(tester.grid().decided_propagated().contains(CORNER));
    }

    #[test]
    #[should_panic(expected = "Expected misbehaving to report a change exactly")]
    fn test_step_without_change_panics() {
        TechniqueTester::new(CandidateGrid::new()).apply_once(&Misbehaving(|_| false));
    }

    #[test]
    fn test_step_replay_opt_out() {
        TechniqueTester::new(CandidateGrid::new())
            .without_step_replay()
            .apply_once(&Misbehaving(|_| false));
    }

    #[test]
    #[should_panic(expected = "Expected misbehaving to remove every")]
    fn test_replayed_step_bounds_apply() {
        TechniqueTester::new(CandidateGrid::new())
            .apply_once(&Misbehaving(|grid| {
                grid.remove_candidate(Position::new(8, 8), Digit::D9)
            }));
    }

    #[test]
    fn test_step_matching_apply_passes() {
        TechniqueTester::new(CandidateGrid::new())
            .apply_once(&Misbehaving(|grid| grid.place(CORNER, Digit::D1)))
            .assert_placed(CORNER, Digit::D1);
    }

    #[test]
    #[should_panic(expected = "Expected r1c1 to be decided as 1")]
    fn test_assert_placed_fails_when_not_placed() {
        TechniqueTester::new(CandidateGrid::new())
            .apply_once(&HiddenSingle::new())
            .assert_placed(CORNER, Digit::D1);
    }

    #[test]
    #[should_panic(expected = "Expected no change at r1c2")]
    fn test_assert_no_change_fails_when_changed() {
        TechniqueTester::new(corner_single())
            .apply_once(&NakedSingle::new())
            .assert_no_change(Position::new(1, 0));
    }

    #[test]
    #[should_panic(expected = "Expected exactly")]
    fn test_assert_removed_exact_fails_on_extra_removal() {
        TechniqueTester::new(CandidateGrid::new())
            .apply_once(&Misbehaving(|grid| grid.place(CORNER, Digit::D1)))
            .assert_removed_exact(CORNER, [Digit::D2]);
    }

    #[test]
    #[should_panic(expected = "Expected naked single to find a hidden single step")]
    fn test_assert_step_named_fails_without_step() {
        #[derive(Debug)]
        struct Renamed;

        impl Technique for Renamed {
            fn name(&self) -> &'static str {
                "naked single"
            }

            fn clone_box(&self) -> BoxedTechnique {
                Box::new(Renamed)
            }

            fn find_step(
                &self,
                grid: &TechniqueGrid,
            ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
                NakedSingle::new().find_step(grid)
            }

            fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
                NakedSingle::new().apply(grid)
            }
        }

        TechniqueTester::new(CandidateGrid::new())
            .assert_step_named(&Renamed, "hidden single");
    }

    #[test]
    fn test_method_chaining() {
        TechniqueTester::new(corner_single())
            .assert_step_named(&NakedSingle::new(), "Naked Single")
            .apply_once(&NakedSingle::new())
            .assert_removed_includes(Position::new(8, 0), [Digit::D1])
            .assert_removed_exact(Position::new(1, 1), [Digit::D1])
            .apply_once(&LockedCandidates::new())
            .assert_no_change(Position::new(5, 5));
    }
}
