use crate::{
    BoxedTechniqueStep, SolverError, TechniqueGrid, TechniqueStep,
    chain::{ChainSearcher, ChainStep, ChainingOptions},
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "Alternating Inference Chain";
const NAME_GROUPED: &str = "Grouped Alternating Inference Chain";

/// Finds alternating inference chains and continuous nice loops over single
/// candidates, using strong links from conjugate pairs and bivalue cells.
///
/// Covers X-Chains, XY-Chains and their mixtures. Steps report the specific chain
/// name through [`TechniqueStep::technique_name`].
///
/// # Examples
///
/// ```
/// use chainlace_solver::{
///     TechniqueGrid,
///     technique::{AlternatingInferenceChain, Technique},
/// };
///
/// let grid = TechniqueGrid::new();
/// assert!(AlternatingInferenceChain::new().find_step(&grid)?.is_none());
/// # Ok::<(), chainlace_solver::SolverError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AlternatingInferenceChain {
    searcher: ChainSearcher,
}

impl Default for AlternatingInferenceChain {
    fn default() -> Self {
        Self::new()
    }
}

impl AlternatingInferenceChain {
    /// Creates the technique with [`ChainingOptions::elementary`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            searcher: ChainSearcher::new(ChainingOptions::elementary()),
        }
    }

    /// The searcher driving this technique.
    #[must_use]
    pub fn searcher(&self) -> &ChainSearcher {
        &self.searcher
    }
}

impl Technique for AlternatingInferenceChain {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(self.clone())
    }

    fn is_chaining(&self) -> bool {
        true
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        Ok(self.searcher.find_first(grid)?.map(|step| step.clone_box()))
    }

    fn find_steps(&self, grid: &TechniqueGrid) -> Result<Vec<BoxedTechniqueStep>, SolverError> {
        Ok(boxed(self.searcher.find_steps(grid, false)?))
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        Ok(apply(self.searcher.find_first(grid)?, grid))
    }
}

/// Like [`AlternatingInferenceChain`], with grouped nodes and every link type:
/// locked candidates, almost locked sets, unique rectangles and XYZ-Wings.
///
/// Only chains that use a grouped node or a grouped pattern are reported; plain
/// single-candidate chains belong to [`AlternatingInferenceChain`].
///
/// # Examples
///
/// ```
/// use chainlace_solver::{
///     chain::{ChainingOptions, LinkTypes},
///     technique::{GroupedAlternatingInferenceChain, Technique},
/// };
///
/// let options = ChainingOptions::grouped().with_assume_unique_solution(false);
/// let technique = GroupedAlternatingInferenceChain::with_options(options);
/// assert!(technique.searcher().options().is_enabled(LinkTypes::ALMOST_LOCKED_SETS));
/// assert_eq!(technique.name(), "Grouped Alternating Inference Chain");
/// ```
#[derive(Debug, Clone)]
pub struct GroupedAlternatingInferenceChain {
    searcher: ChainSearcher,
}

impl Default for GroupedAlternatingInferenceChain {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupedAlternatingInferenceChain {
    /// Creates the technique with [`ChainingOptions::grouped`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ChainingOptions::grouped())
    }

    /// Creates the technique with custom options.
    #[must_use]
    pub fn with_options(options: ChainingOptions) -> Self {
        Self {
            searcher: ChainSearcher::new(options),
        }
    }

    /// The searcher driving this technique.
    #[must_use]
    pub fn searcher(&self) -> &ChainSearcher {
        &self.searcher
    }
}

impl Technique for GroupedAlternatingInferenceChain {
    fn name(&self) -> &'static str {
        NAME_GROUPED
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(self.clone())
    }

    fn is_chaining(&self) -> bool {
        true
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        Ok(self.find_first(grid)?.map(|step| step.clone_box()))
    }

    fn find_steps(&self, grid: &TechniqueGrid) -> Result<Vec<BoxedTechniqueStep>, SolverError> {
        Ok(boxed(self.grouped_steps(grid)?))
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        Ok(apply(self.find_first(grid)?, grid))
    }
}

impl GroupedAlternatingInferenceChain {
    // The first seed may only yield an elementary chain, so the search runs in full.
    fn grouped_steps(&self, grid: &TechniqueGrid) -> Result<Vec<ChainStep>, SolverError> {
        let mut steps = self.searcher.find_steps(grid, false)?;
        steps.retain(ChainStep::is_grouped);
        Ok(steps)
    }

    fn find_first(&self, grid: &TechniqueGrid) -> Result<Option<ChainStep>, SolverError> {
        Ok(self.grouped_steps(grid)?.into_iter().next())
    }
}

fn boxed(steps: Vec<ChainStep>) -> Vec<BoxedTechniqueStep> {
    steps.into_iter().map(|step| step.clone_box()).collect()
}

fn apply(step: Option<ChainStep>, grid: &mut TechniqueGrid) -> bool {
    let Some(step) = step else {
        return false;
    };
    log::debug!("applying {step}");
    step.apply_to(grid)
}
