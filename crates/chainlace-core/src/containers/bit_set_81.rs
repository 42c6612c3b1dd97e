use std::{
    cmp::Ordering,
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    iter::FusedIterator,
    marker::PhantomData,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Sub, SubAssign},
};

use crate::index::{Index81, Index81Semantics};

const MASK: u128 = (1 << 81) - 1;

/// A set of up to 81 elements stored in the low 81 bits of a `u128`.
///
/// With [`PositionSemantics`](crate::index::PositionSemantics) this is a set of board
/// positions, the representation used for the positions of one digit and for the
/// cells of a grouped chain node.
pub struct BitSet81<S> {
    bits: u128,
    _marker: PhantomData<fn() -> S>,
}

impl<S> BitSet81<S> {
    /// The empty set.
    pub const EMPTY: Self = Self::from_bits(0);
    /// The set containing all 81 elements.
    pub const FULL: Self = Self::from_bits(MASK);

    /// Creates an empty set.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set from raw bits. Bits above the 81st are discarded.
    #[must_use]
    #[inline]
    pub const fn from_bits(bits: u128) -> Self {
        Self {
            bits: bits & MASK,
            _marker: PhantomData,
        }
    }

    /// Returns the raw bits.
    #[must_use]
    #[inline]
    pub const fn bits(self) -> u128 {
        self.bits
    }

    /// Returns the number of elements.
    #[must_use]
    #[inline]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set has no elements.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns the union of `self` and `other`.
    #[must_use]
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self::from_bits(self.bits | other.bits)
    }

    /// Returns the intersection of `self` and `other`.
    #[must_use]
    #[inline]
    pub const fn intersection(self, other: Self) -> Self {
        Self::from_bits(self.bits & other.bits)
    }

    /// Returns the elements of `self` that are not in `other`.
    #[must_use]
    #[inline]
    pub const fn difference(self, other: Self) -> Self {
        Self::from_bits(self.bits & !other.bits)
    }

    /// Returns `true` if every element of `self` is in `other`.
    #[must_use]
    #[inline]
    pub const fn is_subset(self, other: Self) -> bool {
        self.bits & !other.bits == 0
    }

    /// Returns `true` if `self` and `other` share no element.
    #[must_use]
    #[inline]
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.bits & other.bits == 0
    }
}

impl<S> BitSet81<S>
where
    S: Index81Semantics,
{
    /// Creates a set holding a single element.
    #[must_use]
    #[inline]
    pub fn from_elem(value: S::Value) -> Self {
        Self::from_bits(S::to_index(value).bit())
    }

    /// Returns `true` if the set contains `value`.
    #[must_use]
    #[inline]
    pub fn contains(self, value: S::Value) -> bool {
        self.bits & S::to_index(value).bit() != 0
    }

    /// Inserts `value`, returning `true` if it was not present.
    #[inline]
    pub fn insert(&mut self, value: S::Value) -> bool {
        let bit = S::to_index(value).bit();
        let inserted = self.bits & bit == 0;
        self.bits |= bit;
        inserted
    }

    /// Removes `value`, returning `true` if it was present.
    #[inline]
    pub fn remove(&mut self, value: S::Value) -> bool {
        let bit = S::to_index(value).bit();
        let removed = self.bits & bit != 0;
        self.bits &= !bit;
        removed
    }

    /// Returns the smallest element.
    #[must_use]
    #[inline]
    pub fn first(self) -> Option<S::Value> {
        self.iter().next()
    }

    /// Returns the only element if the set has exactly one.
    #[must_use]
    #[inline]
    pub fn as_single(self) -> Option<S::Value> {
        if self.len() == 1 { self.first() } else { None }
    }

    /// Returns both elements, smallest first, if the set has exactly two.
    #[must_use]
    #[inline]
    pub fn as_double(self) -> Option<(S::Value, S::Value)> {
        if self.len() != 2 {
            return None;
        }
        let mut iter = self.iter();
        Some((iter.next()?, iter.next()?))
    }

    /// Returns an iterator over the elements in ascending index order.
    #[inline]
    pub fn iter(self) -> BitSet81Iter<S> {
        BitSet81Iter {
            bits: self.bits,
            _marker: PhantomData,
        }
    }
}

impl<S> Default for BitSet81<S> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<S> Clone for BitSet81<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for BitSet81<S> {}

impl<S> PartialEq for BitSet81<S> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<S> Eq for BitSet81<S> {}

impl<S> PartialOrd for BitSet81<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for BitSet81<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ordered by lowest element first, so singletons follow board order.
        other.bits.reverse_bits().cmp(&self.bits.reverse_bits())
    }
}

impl<S> Hash for BitSet81<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<S> Debug for BitSet81<S>
where
    S: Index81Semantics,
    S::Value: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<S> BitOr for BitSet81<S> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl<S> BitOrAssign for BitSet81<S> {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl<S> BitAnd for BitSet81<S> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl<S> BitAndAssign for BitSet81<S> {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersection(rhs);
    }
}

impl<S> Sub for BitSet81<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

impl<S> SubAssign for BitSet81<S> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.difference(rhs);
    }
}

impl<S> Not for BitSet81<S> {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::from_bits(!self.bits)
    }
}

impl<S> FromIterator<S::Value> for BitSet81<S>
where
    S: Index81Semantics,
{
    fn from_iter<T: IntoIterator<Item = S::Value>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S> Extend<S::Value> for BitSet81<S>
where
    S: Index81Semantics,
{
    fn extend<T: IntoIterator<Item = S::Value>>(&mut self, iter: T) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<S> IntoIterator for BitSet81<S>
where
    S: Index81Semantics,
{
    type Item = S::Value;
    type IntoIter = BitSet81Iter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a [`BitSet81`].
pub struct BitSet81Iter<S> {
    bits: u128,
    _marker: PhantomData<fn() -> S>,
}

impl<S> Debug for BitSet81Iter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitSet81Iter")
            .field("bits", &self.bits)
            .finish()
    }
}

impl<S> Iterator for BitSet81Iter<S>
where
    S: Index81Semantics,
{
    type Item = S::Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(S::from_index(Index81::new(index)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl<S> DoubleEndedIterator for BitSet81Iter<S>
where
    S: Index81Semantics,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = (127 - self.bits.leading_zeros()) as u8;
        self.bits &= !(1 << index);
        Some(S::from_index(Index81::new(index)))
    }
}

impl<S> ExactSizeIterator for BitSet81Iter<S> where S: Index81Semantics {}
impl<S> FusedIterator for BitSet81Iter<S> where S: Index81Semantics {}
