use crate::Position;

/// An index in the range 0-80, addressing one cell of the board in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index81 {
    index: u8,
}

impl Index81 {
    /// Creates a new index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-80.
    #[must_use]
    #[inline]
    pub const fn new(index: u8) -> Self {
        assert!(index < 81);
        Self { index }
    }

    /// Returns the underlying index value (0-80).
    #[must_use]
    #[inline]
    pub const fn index(self) -> u8 {
        self.index
    }

    #[inline]
    pub(crate) const fn bit(self) -> u128 {
        1 << self.index
    }

    /// Returns an iterator over all 81 valid indices in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..81).map(Index81::new)
    }
}

/// Maps values to [`Index81`] slots.
pub trait Index81Semantics {
    /// The value type addressed by the index.
    type Value;

    /// Converts a value to an index.
    fn to_index(value: Self::Value) -> Index81;

    /// Converts an index back to a value.
    fn from_index(index: Index81) -> Self::Value;
}

/// Semantics for board positions: `(x, y)` maps to `y * 9 + x`.
#[derive(Debug)]
pub struct PositionSemantics;

impl Index81Semantics for PositionSemantics {
    type Value = Position;

    #[inline]
    fn to_index(value: Self::Value) -> Index81 {
        Index81::new(value.index())
    }

    #[inline]
    fn from_index(index: Index81) -> Self::Value {
        Position::from_index(index.index())
    }
}
