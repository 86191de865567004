//! Iterators over live entries, in slot order.
//!
//! All three walk the slot arrays from index 0 and stop as soon as `len`
//! live entries have been produced, so a sparse tail is never scanned.

use crate::probe::Slot;
use core::iter::Zip;
use core::slice;
use std::vec;

/// Iterator over `(&K, &V)`.
pub struct Iter<'a, K, V> {
    slots: Zip<slice::Iter<'a, Slot<K>>, slice::Iter<'a, Option<V>>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(keys: &'a [Slot<K>], values: &'a [Option<V>], len: usize) -> Self {
        Self {
            slots: keys.iter().zip(values.iter()),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for (slot, value) in self.slots.by_ref() {
            if let (Slot::Occupied(k), Some(v)) = (slot, value) {
                self.remaining -= 1;
                return Some((k, v));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

/// Iterator over `(&K, &mut V)`.
pub struct IterMut<'a, K, V> {
    slots: Zip<slice::Iter<'a, Slot<K>>, slice::IterMut<'a, Option<V>>>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(keys: &'a [Slot<K>], values: &'a mut [Option<V>], len: usize) -> Self {
        Self {
            slots: keys.iter().zip(values.iter_mut()),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for (slot, value) in self.slots.by_ref() {
            if let (Slot::Occupied(k), Some(v)) = (slot, value) {
                self.remaining -= 1;
                return Some((k, v));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// Owning iterator over `(K, V)`.
pub struct IntoIter<K, V> {
    slots: Zip<vec::IntoIter<Slot<K>>, vec::IntoIter<Option<V>>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(keys: Box<[Slot<K>]>, values: Box<[Option<V>]>, len: usize) -> Self {
        Self {
            slots: keys.into_vec().into_iter().zip(values.into_vec()),
            remaining: len,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for (slot, value) in self.slots.by_ref() {
            if let (Slot::Occupied(k), Some(v)) = (slot, value) {
                self.remaining -= 1;
                return Some((k, v));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
