//! Iterators over a slot map's dense storage.
//!
//! All iterators walk the packed value array, never the slot table, so they
//! touch only live elements. Order is dense order: insertion order until the
//! first erase, after which swap-remove reorders the tail.

use core::iter::FusedIterator;
use core::slice;
use std::vec;

use crate::Handle;

/// Iterator over live values in dense order.
pub type Values<'a, T> = slice::Iter<'a, T>;

/// Mutable iterator over live values in dense order.
pub type ValuesMut<'a, T> = slice::IterMut<'a, T>;

/// Iterator over live handles in dense order.
pub type Handles<'a> = core::iter::Copied<slice::Iter<'a, Handle>>;

/// Iterator over `(Handle, &T)` pairs. Created by [`SlotMap::iter`](crate::SlotMap::iter).
#[derive(Debug)]
pub struct Iter<'a, T> {
    pub(crate) handles: slice::Iter<'a, Handle>,
    pub(crate) values: slice::Iter<'a, T>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            handles: self.handles.clone(),
            values: self.values.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Handle, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let handle = *self.handles.next()?;
        self.values.next().map(|value| (handle, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let handle = *self.handles.next_back()?;
        self.values.next_back().map(|value| (handle, value))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over `(Handle, &mut T)` pairs. Created by [`SlotMap::iter_mut`](crate::SlotMap::iter_mut).
#[derive(Debug)]
pub struct IterMut<'a, T> {
    pub(crate) handles: slice::Iter<'a, Handle>,
    pub(crate) values: slice::IterMut<'a, T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = (Handle, &'a mut T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let handle = *self.handles.next()?;
        self.values.next().map(|value| (handle, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let handle = *self.handles.next_back()?;
        self.values.next_back().map(|value| (handle, value))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over `(Handle, T)` pairs.
#[derive(Debug)]
pub struct IntoIter<T> {
    pub(crate) handles: vec::IntoIter<Handle>,
    pub(crate) values: vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = (Handle, T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.handles.next()?;
        self.values.next().map(|value| (handle, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let handle = self.handles.next_back()?;
        self.values.next_back().map(|value| (handle, value))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

/// Draining iterator. Created by [`SlotMap::drain`](crate::SlotMap::drain).
///
/// Every slot is already invalidated when this is created; the yielded
/// handles are stale. Values not consumed are dropped with the iterator.
#[derive(Debug)]
pub struct Drain<'a, T> {
    pub(crate) handles: vec::Drain<'a, Handle>,
    pub(crate) values: vec::Drain<'a, T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = (Handle, T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.handles.next()?;
        self.values.next().map(|value| (handle, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for Drain<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let handle = self.handles.next_back()?;
        self.values.next_back().map(|value| (handle, value))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}
impl<T> FusedIterator for Drain<'_, T> {}
