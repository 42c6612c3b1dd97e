//! Link graph and chain search.
//!
//! Chaining rules ([`rule`]) read a [`TechniqueGrid`](crate::TechniqueGrid) and fill a
//! [`LinkDictionary`] with strong and weak links between [`CandidateSet`]s. The search
//! walks that graph alternating strong and weak links, and every chain that proves
//! something becomes a [`ChainStep`].
//!
//! # Examples
//!
//! ```
//! use chainlace_solver::{
//!     TechniqueGrid,
//!     chain::{ChainSearcher, ChainingOptions},
//! };
//!
//! let searcher = ChainSearcher::new(ChainingOptions::elementary());
//! let grid = TechniqueGrid::new();
//! let links = searcher.build_links(&grid);
//! assert!(links.strong_count() == 0);
//! assert!(searcher.find_first(&grid)?.is_none());
//! # Ok::<(), chainlace_solver::SolverError>(())
//! ```

pub use self::{
    conclusion::{Conclusion, ConclusionKind, Conclusions, either_true_eliminations},
    error::ChainError,
    link::{Link, LinkDictionary, LinkKind},
    node::{CandidateSet, Node, Polarity},
    options::{ChainingOptions, LinkOption, LinkTypes},
    path::{Chain, ChainKind},
    pattern::{AlmostLockedSet, GroupedLinkPattern, UniqueRectanglePattern, XyzWingPattern},
    search::{ChainSearcher, build_links, search_chains},
    step::ChainStep,
};

pub mod rule;

mod conclusion;
mod error;
mod link;
mod node;
mod options;
mod path;
mod pattern;
mod search;
mod step;
