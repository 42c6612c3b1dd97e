use std::{
    cmp::Ordering,
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    iter::FusedIterator,
    marker::PhantomData,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Sub, SubAssign},
};

use crate::index::{Index9, Index9Semantics};

const MASK: u16 = 0x1ff;

/// A set of up to 9 elements stored in the low 9 bits of a `u16`.
///
/// The semantics parameter `S` decides what the elements are. With
/// [`DigitSemantics`](crate::index::DigitSemantics) it is a set of digits, with
/// [`CellIndexSemantics`](crate::index::CellIndexSemantics) a set of cells inside a house.
///
/// # Examples
///
/// ```
/// use chainlace_core::{Digit, DigitSet};
///
/// let a = DigitSet::from_iter([Digit::D1, Digit::D2, Digit::D3]);
/// let b = DigitSet::from_iter([Digit::D2, Digit::D3, Digit::D4]);
///
/// assert_eq!((a | b).len(), 4);
/// assert_eq!(a & b, DigitSet::from_iter([Digit::D2, Digit::D3]));
/// assert_eq!(a - b, DigitSet::from_elem(Digit::D1));
/// ```
pub struct BitSet9<S> {
    bits: u16,
    _marker: PhantomData<fn() -> S>,
}

impl<S> BitSet9<S> {
    /// The empty set.
    pub const EMPTY: Self = Self::from_bits(0);
    /// The set containing all 9 elements.
    pub const FULL: Self = Self::from_bits(MASK);

    /// Creates an empty set.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set from raw bits. Bits above the ninth are discarded.
    #[must_use]
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self {
            bits: bits & MASK,
            _marker: PhantomData,
        }
    }

    /// Returns the raw bits.
    #[must_use]
    #[inline]
    pub const fn bits(self) -> u16 {
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

impl<S> BitSet9<S>
where
    S: Index9Semantics,
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
    pub fn iter(self) -> BitSet9Iter<S> {
        BitSet9Iter {
            bits: self.bits,
            _marker: PhantomData,
        }
    }
}

impl<S> Default for BitSet9<S> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<S> Clone for BitSet9<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for BitSet9<S> {}

impl<S> PartialEq for BitSet9<S> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<S> Eq for BitSet9<S> {}

impl<S> PartialOrd for BitSet9<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for BitSet9<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bits.cmp(&other.bits)
    }
}

impl<S> Hash for BitSet9<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<S> Debug for BitSet9<S>
where
    S: Index9Semantics,
    S::Value: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<S> BitOr for BitSet9<S> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl<S> BitOrAssign for BitSet9<S> {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl<S> BitAnd for BitSet9<S> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl<S> BitAndAssign for BitSet9<S> {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersection(rhs);
    }
}

impl<S> Sub for BitSet9<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

impl<S> SubAssign for BitSet9<S> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.difference(rhs);
    }
}

impl<S> Not for BitSet9<S> {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::from_bits(!self.bits)
    }
}

impl<S> FromIterator<S::Value> for BitSet9<S>
where
    S: Index9Semantics,
{
    fn from_iter<T: IntoIterator<Item = S::Value>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S> Extend<S::Value> for BitSet9<S>
where
    S: Index9Semantics,
{
    fn extend<T: IntoIterator<Item = S::Value>>(&mut self, iter: T) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<S> IntoIterator for BitSet9<S>
where
    S: Index9Semantics,
{
    type Item = S::Value;
    type IntoIter = BitSet9Iter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a [`BitSet9`].
pub struct BitSet9Iter<S> {
    bits: u16,
    _marker: PhantomData<fn() -> S>,
}

impl<S> Debug for BitSet9Iter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitSet9Iter")
            .field("bits", &self.bits)
            .finish()
    }
}

impl<S> Iterator for BitSet9Iter<S>
where
    S: Index9Semantics,
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
        Some(S::from_index(Index9::new(index)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl<S> DoubleEndedIterator for BitSet9Iter<S>
where
    S: Index9Semantics,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = (15 - self.bits.leading_zeros()) as u8;
        self.bits &= !(1 << index);
        Some(S::from_index(Index9::new(index)))
    }
}

impl<S> ExactSizeIterator for BitSet9Iter<S> where S: Index9Semantics {}
impl<S> FusedIterator for BitSet9Iter<S> where S: Index9Semantics {}
