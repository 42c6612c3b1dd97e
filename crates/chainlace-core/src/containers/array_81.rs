use std::{
    fmt::{self, Debug},
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::index::Index81Semantics;

/// An 81-element array indexed through semantics `S`, one slot per board cell.
pub struct Array81<T, S> {
    array: [T; 81],
    _marker: PhantomData<fn() -> S>,
}

impl<T, S> Array81<T, S> {
    /// Wraps a plain array.
    #[must_use]
    #[inline]
    pub const fn from_array(array: [T; 81]) -> Self {
        Self {
            array,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over the elements in board order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.array.iter()
    }
}

impl<T, S> Default for Array81<T, S>
where
    T: Default,
{
    fn default() -> Self {
        Self::from_array(std::array::from_fn(|_| T::default()))
    }
}

impl<T, S> Clone for Array81<T, S>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self::from_array(self.array.clone())
    }
}

impl<T, S> Copy for Array81<T, S> where T: Copy {}

impl<T, S> PartialEq for Array81<T, S>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.array == other.array
    }
}

impl<T, S> Eq for Array81<T, S> where T: Eq {}

impl<T, S> Debug for Array81<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.array.iter()).finish()
    }
}

impl<T, S> Index<S::Value> for Array81<T, S>
where
    S: Index81Semantics,
{
    type Output = T;

    #[inline]
    fn index(&self, index: S::Value) -> &Self::Output {
        &self.array[usize::from(S::to_index(index).index())]
    }
}

impl<T, S> IndexMut<S::Value> for Array81<T, S>
where
    S: Index81Semantics,
{
    #[inline]
    fn index_mut(&mut self, index: S::Value) -> &mut Self::Output {
        &mut self.array[usize::from(S::to_index(index).index())]
    }
}
