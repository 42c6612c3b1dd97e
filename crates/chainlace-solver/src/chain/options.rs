use bitflags::bitflags;
use chainlace_core::{DigitPositions, House};

bitflags! {
    /// Kinds of links a chain search may use.
    ///
    /// Each chaining rule produces exactly one kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LinkTypes: u16 {
        /// Conjugate pairs and peers of one digit inside a house.
        const SINGLE_DIGIT = 1 << 0;
        /// Candidates of one cell.
        const SINGLE_CELL = 1 << 1;
        /// Box-line intersection groups.
        const LOCKED_CANDIDATES = 1 << 2;
        /// Almost locked sets.
        const ALMOST_LOCKED_SETS = 1 << 3;
        /// Unique rectangle with one extra digit.
        const UNIQUE_RECTANGLE_SAME_DIGIT = 1 << 4;
        /// Unique rectangle with two extra digits.
        const UNIQUE_RECTANGLE_DIFFERENT_DIGIT = 1 << 5;
        /// Unique rectangle locked from one side by an outside house.
        const UNIQUE_RECTANGLE_SINGLE_SIDE_EXTERNAL = 1 << 6;
        /// Unique rectangle whose extra cells force a digit outside it.
        const UNIQUE_RECTANGLE_DOUBLE_SIDE_EXTERNAL = 1 << 7;
        /// XYZ-Wing.
        const XYZ_WING = 1 << 8;

        /// Links between single candidates only.
        const ELEMENTARY = Self::SINGLE_DIGIT.bits() | Self::SINGLE_CELL.bits();
        /// Every unique rectangle case.
        const UNIQUE_RECTANGLE = Self::UNIQUE_RECTANGLE_SAME_DIGIT.bits()
            | Self::UNIQUE_RECTANGLE_DIFFERENT_DIGIT.bits()
            | Self::UNIQUE_RECTANGLE_SINGLE_SIDE_EXTERNAL.bits()
            | Self::UNIQUE_RECTANGLE_DOUBLE_SIDE_EXTERNAL.bits();
    }
}

const LINK_TYPE_COUNT: usize = 9;

/// Which grouped nodes a link type may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LinkOption {
    /// The link type produces nothing.
    None,
    /// Single cells, or groups inside one box-line intersection.
    Intersection,
    /// Groups inside one house.
    House,
    /// Any group.
    #[default]
    All,
}

impl LinkOption {
    /// Returns `true` if a node over `positions` is allowed.
    #[must_use]
    pub fn admits(self, positions: DigitPositions) -> bool {
        match self {
            LinkOption::None => false,
            LinkOption::Intersection => positions.is_in_intersection(),
            LinkOption::House => House::containing(positions).next().is_some(),
            LinkOption::All => !positions.is_empty(),
        }
    }
}

/// Configuration of link building and chain search.
///
/// # Examples
///
/// ```
/// use chainlace_solver::chain::{ChainingOptions, LinkOption, LinkTypes};
///
/// let options = ChainingOptions::grouped()
///     .with_assume_unique_solution(false)
///     .with_link_option(LinkTypes::LOCKED_CANDIDATES, LinkOption::Intersection);
/// assert!(options.is_enabled(LinkTypes::ALMOST_LOCKED_SETS));
/// assert!(!options.assume_unique_solution());
/// assert!(!ChainingOptions::elementary().is_enabled(LinkTypes::XYZ_WING));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainingOptions {
    link_types: LinkTypes,
    link_options: [LinkOption; LINK_TYPE_COUNT],
    assume_unique_solution: bool,
    max_als_size: usize,
}

impl Default for ChainingOptions {
    fn default() -> Self {
        Self::grouped()
    }
}

impl ChainingOptions {
    /// Single-digit and single-cell links only.
    #[must_use]
    pub fn elementary() -> Self {
        Self::grouped().with_link_types(LinkTypes::ELEMENTARY)
    }

    /// Every link type.
    #[must_use]
    pub fn grouped() -> Self {
        Self {
            link_types: LinkTypes::all(),
            link_options: [LinkOption::All; LINK_TYPE_COUNT],
            assume_unique_solution: true,
            max_als_size: 8,
        }
    }

    /// Replaces the enabled link types.
    #[must_use]
    pub fn with_link_types(mut self, link_types: LinkTypes) -> Self {
        self.link_types = link_types;
        self
    }

    /// Sets the grouping scope of every type in `link_types`.
    #[must_use]
    pub fn with_link_option(mut self, link_types: LinkTypes, option: LinkOption) -> Self {
        for link_type in link_types.iter() {
            self.link_options[slot(link_type)] = option;
        }
        self
    }

    /// Sets whether the puzzle may be assumed to have a unique solution.
    #[must_use]
    pub fn with_assume_unique_solution(mut self, assume: bool) -> Self {
        self.assume_unique_solution = assume;
        self
    }

    /// Sets the largest almost locked set, in cells. Values are clamped to 2-8.
    #[must_use]
    pub fn with_max_als_size(mut self, size: usize) -> Self {
        self.max_als_size = size.clamp(2, 8);
        self
    }

    /// Enabled link types.
    #[must_use]
    pub fn link_types(&self) -> LinkTypes {
        self.link_types
    }

    /// Grouping scope of a single link type.
    #[must_use]
    pub fn link_option(&self, link_type: LinkTypes) -> LinkOption {
        self.link_options[slot(link_type)]
    }

    /// Returns `true` if `link_type` is enabled with a scope other than
    /// [`LinkOption::None`].
    #[must_use]
    pub fn is_enabled(&self, link_type: LinkTypes) -> bool {
        self.link_types.contains(link_type) && self.link_option(link_type) != LinkOption::None
    }

    /// Whether uniqueness-based rules may run.
    #[must_use]
    pub fn assume_unique_solution(&self) -> bool {
        self.assume_unique_solution
    }

    /// Largest almost locked set, in cells.
    #[must_use]
    pub fn max_als_size(&self) -> usize {
        self.max_als_size
    }
}

fn slot(link_type: LinkTypes) -> usize {
    debug_assert_eq!(link_type.bits().count_ones(), 1);
    (link_type.bits().trailing_zeros() as usize).min(LINK_TYPE_COUNT - 1)
}
