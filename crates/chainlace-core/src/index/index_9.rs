use crate::Digit;

/// An index in the range 0-8.
///
/// Guarantees at construction time that the value addresses one of the nine slots of
/// a 9-element container (a 9-bit set or a 9-element array).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index9 {
    index: u8,
}

impl Index9 {
    /// Creates a new index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-8.
    #[must_use]
    #[inline]
    pub const fn new(index: u8) -> Self {
        assert!(index < 9);
        Self { index }
    }

    /// Returns the underlying index value (0-8).
    #[must_use]
    #[inline]
    pub const fn index(self) -> u8 {
        self.index
    }

    #[inline]
    pub(crate) const fn bit(self) -> u16 {
        1 << self.index
    }

    /// Returns an iterator over all 9 valid indices in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..9).map(Index9::new)
    }
}

/// Maps values to [`Index9`] slots.
///
/// Implementors define how a user-facing value is converted to and from the internal
/// index used by [`BitSet9`](crate::containers::BitSet9) and
/// [`Array9`](crate::containers::Array9).
pub trait Index9Semantics {
    /// The value type addressed by the index.
    type Value;

    /// Converts a value to an index.
    ///
    /// # Panics
    ///
    /// Should panic if the value has no valid index.
    fn to_index(value: Self::Value) -> Index9;

    /// Converts an index back to a value.
    fn from_index(index: Index9) -> Self::Value;
}

/// Semantics for sudoku digits: `D1` maps to index 0, `D9` to index 8.
#[derive(Debug)]
pub struct DigitSemantics;

impl Index9Semantics for DigitSemantics {
    type Value = Digit;

    #[inline]
    fn to_index(value: Self::Value) -> Index9 {
        Index9::new(value.value() - 1)
    }

    #[inline]
    fn from_index(index: Index9) -> Self::Value {
        Digit::from_value(index.index() + 1)
    }
}

/// Semantics for cell indices (0-8) inside a house, and for house numbers.
///
/// The mapping is the identity.
#[derive(Debug)]
pub struct CellIndexSemantics;

impl Index9Semantics for CellIndexSemantics {
    type Value = u8;

    #[inline]
    fn to_index(value: Self::Value) -> Index9 {
        assert!(value < 9, "Cell index must be 0-8, got {value}");
        Index9::new(value)
    }

    #[inline]
    fn from_index(index: Index9) -> Self::Value {
        index.index()
    }
}
