//! Deduction techniques.
//!
//! Each technique implements the [`Technique`] trait and can be applied to a
//! [`TechniqueGrid`](crate::TechniqueGrid).

pub use self::{
    chain::{AlternatingInferenceChain, GroupedAlternatingInferenceChain},
    hidden_single::HiddenSingle,
    locked_candidates::LockedCandidates,
    naked_single::NakedSingle,
    traits::{BoxedTechnique, Technique},
};

mod chain;
mod hidden_single;
mod locked_candidates;
mod naked_single;
mod traits;

/// Returns all available techniques.
///
/// Techniques are ordered from easiest to hardest: singles, locked candidates, then
/// chains over single candidates and finally grouped chains.
///
/// # Examples
///
/// ```
/// use chainlace_solver::technique;
///
/// let names = technique::all_techniques()
///     .iter()
///     .map(|t| t.name())
///     .collect::<Vec<_>>();
/// assert_eq!(names.first(), Some(&"Naked Single"));
/// assert_eq!(names.last(), Some(&"Grouped Alternating Inference Chain"));
/// ```
#[must_use]
pub fn all_techniques() -> Vec<BoxedTechnique> {
    let mut techniques = fundamental_techniques();
    techniques.extend([
        Box::new(LockedCandidates::new()) as BoxedTechnique,
        Box::new(AlternatingInferenceChain::new()),
        Box::new(GroupedAlternatingInferenceChain::new()),
    ]);
    techniques
}

/// Returns the fundamental techniques.
///
/// - **Naked Single**: A cell with only one remaining candidate
/// - **Hidden Single**: A digit that can only go in one cell within a house
///
/// This set remains stable over time, serving as a consistent baseline for
/// benchmarking even as more advanced techniques are added to [`all_techniques`].
///
/// # Examples
///
/// ```
/// use chainlace_solver::technique;
///
/// let techniques = technique::fundamental_techniques();
/// assert_eq!(techniques.len(), 2);
/// ```
#[must_use]
pub fn fundamental_techniques() -> Vec<BoxedTechnique> {
    vec![Box::new(NakedSingle::new()), Box::new(HiddenSingle::new())]
}
