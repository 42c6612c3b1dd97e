use std::{
    fmt::{self, Debug},
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::index::Index9Semantics;

/// A 9-element array indexed through semantics `S`.
///
/// Used for per-digit and per-house tables such as
/// [`DigitPositions::ROW_POSITIONS`](crate::DigitPositions::ROW_POSITIONS).
pub struct Array9<T, S> {
    array: [T; 9],
    _marker: PhantomData<fn() -> S>,
}

impl<T, S> Array9<T, S> {
    /// Wraps a plain array.
    #[must_use]
    #[inline]
    pub const fn from_array(array: [T; 9]) -> Self {
        Self {
            array,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over the elements in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.array.iter()
    }

    /// Returns a mutable iterator over the elements in index order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.array.iter_mut()
    }
}

impl<T, S> Default for Array9<T, S>
where
    T: Default,
{
    fn default() -> Self {
        Self::from_array(std::array::from_fn(|_| T::default()))
    }
}

impl<T, S> Clone for Array9<T, S>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self::from_array(self.array.clone())
    }
}

impl<T, S> Copy for Array9<T, S> where T: Copy {}

impl<T, S> PartialEq for Array9<T, S>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.array == other.array
    }
}

impl<T, S> Eq for Array9<T, S> where T: Eq {}

impl<T, S> Debug for Array9<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.array.iter()).finish()
    }
}

impl<T, S> Index<S::Value> for Array9<T, S>
where
    S: Index9Semantics,
{
    type Output = T;

    #[inline]
    fn index(&self, index: S::Value) -> &Self::Output {
        &self.array[usize::from(S::to_index(index).index())]
    }
}

impl<T, S> IndexMut<S::Value> for Array9<T, S>
where
    S: Index9Semantics,
{
    #[inline]
    fn index_mut(&mut self, index: S::Value) -> &mut Self::Output {
        &mut self.array[usize::from(S::to_index(index).index())]
    }
}
