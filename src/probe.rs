//! Slot states and the cyclic linear probe sequence.

/// State of one slot in the key array.
///
/// A `Tombstone` marks a slot whose entry was removed. It keeps probe
/// chains that pass through it intact: lookups walk over it, inserts may
/// reuse it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Slot<K> {
    Empty,
    Tombstone,
    Occupied(K),
}

impl<K> Slot<K> {
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub(crate) fn key(&self) -> Option<&K> {
        match self {
            Slot::Occupied(k) => Some(k),
            _ => None,
        }
    }
}

/// Home slot of a hash in a table of `capacity` slots.
#[inline]
pub(crate) fn home_slot(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (hash % capacity as u64) as usize
}

/// Visits `start, start + 1, .., len - 1, 0, .., start - 1`, each slot once.
#[derive(Clone, Debug)]
pub(crate) struct CyclicProbe {
    len: usize,
    next: usize,
    remaining: usize,
}

impl CyclicProbe {
    pub(crate) fn new(start: usize, len: usize) -> Self {
        debug_assert!(len == 0 || start < len);
        Self {
            len,
            next: start,
            remaining: len,
        }
    }
}

impl Iterator for CyclicProbe {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let r = self.next;
        self.next += 1;
        if self.next == self.len {
            self.next = 0;
        }
        Some(r)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CyclicProbe {}

/// First slot at or after `start` (cyclically) satisfying `pred`.
#[inline]
pub(crate) fn probe<F>(start: usize, len: usize, pred: F) -> Option<usize>
where
    F: FnMut(&usize) -> bool,
{
    CyclicProbe::new(start, len).find(pred)
}
