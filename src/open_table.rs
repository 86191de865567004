//! OpenAddressingTable: linear-probing hash table over two parallel slot arrays.

use crate::capability::{Equivalence, KeyHasher, StdEq, StdHash};
use crate::error::{invariant_violation, TableError};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::policy::{DuplicatePolicy, InsertOutcome};
use crate::probe::{home_slot, probe, CyclicProbe, Slot};
use core::fmt;
use core::hash::Hash;
use core::mem;
use core::ops::Index;
use log::{debug, trace};

/// Capacity of a table built without an explicit one.
pub const DEFAULT_CAPACITY: usize = 10;

// Growth threshold 0.7, kept as a ratio so the check stays in integers.
const LOAD_NUMERATOR: u128 = 7;
const LOAD_DENOMINATOR: u128 = 10;

#[inline]
fn at_threshold(used: usize, capacity: usize) -> bool {
    used as u128 * LOAD_DENOMINATOR >= capacity as u128 * LOAD_NUMERATOR
}

fn alloc_slots<K, V>(capacity: usize) -> (Box<[Slot<K>]>, Box<[Option<V>]>) {
    let keys = (0..capacity).map(|_| Slot::Empty).collect();
    let values = (0..capacity).map(|_| None).collect();
    (keys, values)
}

/// Where an insert probe stopped.
enum Landing {
    /// Slot holding an equivalent key.
    Occupied(usize),
    /// First reusable slot on the probe path: a tombstone if one was
    /// passed, otherwise the empty slot that ended the probe.
    Vacant(usize),
}

/// Hash table keyed through injected capabilities.
///
/// `keys[i]` and `values[i]` describe slot `i`; the slot is live iff
/// `keys[i]` is `Occupied` iff `values[i]` is `Some`. For every live key at
/// slot `i`, no slot on the cyclic path from its home slot up to `i` is
/// `Empty`. Removal leaves a tombstone so that property survives.
#[derive(Clone)]
pub struct OpenAddressingTable<K, V, H = StdHash, KE = StdEq, VE = StdEq> {
    keys: Box<[Slot<K>]>,
    values: Box<[Option<V>]>,
    len: usize,
    tombstones: usize,
    hasher: H,
    key_eq: KE,
    value_eq: VE,
}

impl<K, V> OpenAddressingTable<K, V> {
    /// Table over `K: Hash + PartialEq` using hashbrown's default hasher.
    pub fn with_std() -> Self {
        Self::new(StdHash::new(), StdEq, StdEq)
    }
}

impl<K, V> Default for OpenAddressingTable<K, V> {
    fn default() -> Self {
        Self::with_std()
    }
}

impl<K, V, H, KE, VE> OpenAddressingTable<K, V, H, KE, VE> {
    /// Empty table with `DEFAULT_CAPACITY` slots.
    pub fn new(hasher: H, key_eq: KE, value_eq: VE) -> Self {
        Self::from_parts(DEFAULT_CAPACITY, hasher, key_eq, value_eq)
    }

    /// Empty table with `capacity` slots. Zero is rejected.
    pub fn with_capacity(
        capacity: usize,
        hasher: H,
        key_eq: KE,
        value_eq: VE,
    ) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::InvalidArgument("capacity"));
        }
        Ok(Self::from_parts(capacity, hasher, key_eq, value_eq))
    }

    pub(crate) fn from_parts(capacity: usize, hasher: H, key_eq: KE, value_eq: VE) -> Self {
        debug_assert!(capacity > 0);
        let (keys, values) = alloc_slots(capacity);
        Self {
            keys,
            values,
            len: 0,
            tombstones: 0,
            hasher,
            key_eq,
            value_eq,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in each backing array.
    pub fn capacity(&self) -> usize {
        self.keys.len()
    }

    #[cfg(test)]
    pub(crate) fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Snapshot of the live keys in slot order.
    pub fn keys(&self) -> Vec<&K> {
        self.keys.iter().filter_map(Slot::key).collect()
    }

    /// Snapshot of the live values in slot order.
    pub fn values(&self) -> Vec<&V> {
        self.values.iter().filter_map(Option::as_ref).collect()
    }

    /// Drop every entry and tombstone; capacity is kept.
    pub fn clear(&mut self) {
        self.keys.iter_mut().for_each(|k| *k = Slot::Empty);
        self.values.iter_mut().for_each(|v| *v = None);
        self.len = 0;
        self.tombstones = 0;
    }

    /// Live entries in slot order. Restarting means calling `iter` again.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.keys, &self.values, self.len)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&self.keys, &mut self.values, self.len)
    }

    fn value_at(&self, i: usize) -> &V {
        self.values[i]
            .as_ref()
            .unwrap_or_else(|| invariant_violation("live slot without a value"))
    }

    fn value_at_mut(&mut self, i: usize) -> &mut V {
        self.values[i]
            .as_mut()
            .unwrap_or_else(|| invariant_violation("live slot without a value"))
    }

    /// Turn live slot `i` into a tombstone and hand back its entry.
    fn take_slot(&mut self, i: usize) -> (K, V) {
        let key = match mem::replace(&mut self.keys[i], Slot::Tombstone) {
            Slot::Occupied(k) => k,
            _ => invariant_violation("removing a slot that is not live"),
        };
        let value = self.values[i]
            .take()
            .unwrap_or_else(|| invariant_violation("live slot without a value"));
        self.len -= 1;
        self.tombstones += 1;
        (key, value)
    }
}

impl<K, V, H, KE, VE> OpenAddressingTable<K, V, H, KE, VE>
where
    H: KeyHasher<K>,
    KE: Equivalence<K>,
{
    #[inline]
    fn home(&self, key: &K) -> usize {
        home_slot(self.hasher.hash_key(key), self.capacity())
    }

    /// Slot holding a key equivalent to `key`. Tombstones continue the
    /// probe, an empty slot ends it.
    fn find_index(&self, key: &K) -> Option<usize> {
        let found = probe(self.home(key), self.capacity(), |&i| match &self.keys[i] {
            Slot::Empty => true,
            Slot::Tombstone => false,
            Slot::Occupied(k) => self.key_eq.equivalent(k, key),
        })?;
        if self.keys[found].is_empty() {
            None
        } else {
            Some(found)
        }
    }

    fn find_landing(&self, key: &K) -> Option<Landing> {
        let mut first_tombstone = None;
        for i in CyclicProbe::new(self.home(key), self.capacity()) {
            match &self.keys[i] {
                Slot::Empty => return Some(Landing::Vacant(first_tombstone.unwrap_or(i))),
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(i);
                }
                Slot::Occupied(k) => {
                    if self.key_eq.equivalent(k, key) {
                        return Some(Landing::Occupied(i));
                    }
                }
            }
        }
        first_tombstone.map(Landing::Vacant)
    }

    /// Grow when live entries reach the load threshold; otherwise compact
    /// in place when tombstones push the occupied share over it.
    fn make_room(&mut self) {
        let capacity = self.capacity();
        if at_threshold(self.len, capacity) {
            self.rehash(capacity.saturating_mul(2));
        } else if self.tombstones > 0 && at_threshold(self.len + self.tombstones, capacity) {
            self.rehash(capacity);
        }
    }

    /// Move every live entry into fresh arrays of `new_capacity` slots,
    /// visiting old slots from 0 upward. Tombstones are discarded.
    ///
    /// Placement is planned before anything moves, so a panicking hasher
    /// leaves the table as it was.
    fn rehash(&mut self, new_capacity: usize) {
        let mut taken = vec![false; new_capacity];
        let mut moves = Vec::with_capacity(self.len);
        for (i, slot) in self.keys.iter().enumerate() {
            if let Slot::Occupied(k) = slot {
                let home = home_slot(self.hasher.hash_key(k), new_capacity);
                let Some(j) = probe(home, new_capacity, |&j| !taken[j]) else {
                    invariant_violation("no free slot while rehashing");
                };
                taken[j] = true;
                moves.push((i, j));
            }
        }

        let (mut keys, mut values) = alloc_slots(new_capacity);
        for (i, j) in moves {
            keys[j] = mem::replace(&mut self.keys[i], Slot::Empty);
            values[j] = self.values[i].take();
        }
        debug!(
            "rehash: capacity {} -> {}, {} live, {} tombstones dropped",
            self.capacity(),
            new_capacity,
            self.len,
            self.tombstones
        );
        self.keys = keys;
        self.values = values;
        self.tombstones = 0;
    }

    /// Insert `key -> value`, resolving an equivalent stored key with `policy`.
    pub fn insert(
        &mut self,
        key: K,
        value: V,
        policy: DuplicatePolicy,
    ) -> Result<InsertOutcome<K, V>, TableError> {
        self.make_room();
        match self.find_landing(&key) {
            Some(Landing::Vacant(i)) => {
                if let Slot::Tombstone = self.keys[i] {
                    self.tombstones -= 1;
                }
                self.keys[i] = Slot::Occupied(key);
                self.values[i] = Some(value);
                self.len += 1;
                Ok(InsertOutcome::Inserted)
            }
            Some(Landing::Occupied(i)) => self.resolve_duplicate(i, key, value, policy),
            None => invariant_violation("no free slot below the load threshold"),
        }
    }

    fn resolve_duplicate(
        &mut self,
        i: usize,
        key: K,
        value: V,
        policy: DuplicatePolicy,
    ) -> Result<InsertOutcome<K, V>, TableError> {
        trace!("duplicate key at slot {} resolved with {:?}", i, policy);
        match policy {
            DuplicatePolicy::Reject => Err(TableError::DuplicateKey),
            DuplicatePolicy::Ignore => Ok(InsertOutcome::Ignored { key, value }),
            DuplicatePolicy::ReplaceValue => {
                let old = mem::replace(self.value_at_mut(i), value);
                Ok(InsertOutcome::ValueReplaced(old))
            }
            DuplicatePolicy::ReplaceKeyAndValue => {
                let old_key = match mem::replace(&mut self.keys[i], Slot::Occupied(key)) {
                    Slot::Occupied(k) => k,
                    _ => invariant_violation("duplicate landed on a slot that is not live"),
                };
                let old_value = mem::replace(self.value_at_mut(i), value);
                Ok(InsertOutcome::EntryReplaced {
                    key: old_key,
                    value: old_value,
                })
            }
        }
    }

    /// Insert a new entry; an equivalent key already present is an error.
    pub fn add(&mut self, key: K, value: V) -> Result<(), TableError> {
        self.insert(key, value, DuplicatePolicy::Reject).map(|_| ())
    }

    /// Insert or overwrite the value. Returns the previous value if any.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.insert(key, value, DuplicatePolicy::ReplaceValue) {
            Ok(InsertOutcome::ValueReplaced(old)) => Some(old),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    pub fn try_get(&self, key: &K) -> Option<&V> {
        let i = self.find_index(key)?;
        Some(self.value_at(i))
    }

    /// Checked read; a missing key is `TableError::KeyNotFound`.
    pub fn get(&self, key: &K) -> Result<&V, TableError> {
        self.try_get(key).ok_or(TableError::KeyNotFound)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = self.find_index(key)?;
        Some(self.value_at_mut(i))
    }

    /// Stored key and value. The stored key may differ from `key` in
    /// anything the key equivalence ignores.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let i = self.find_index(key)?;
        let k = self.keys[i].key()?;
        Some((k, self.value_at(i)))
    }

    /// Remove the entry for `key`. Returns false if it was absent.
    pub fn remove(&mut self, key: &K) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Remove the entry for `key` and return the stored pair.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let i = self.find_index(key)?;
        Some(self.take_slot(i))
    }
}

impl<K, V, H, KE, VE> OpenAddressingTable<K, V, H, KE, VE>
where
    H: KeyHasher<K>,
    KE: Equivalence<K>,
    VE: Equivalence<V>,
{
    /// True if `key` is present and its value is equivalent to `value`.
    pub fn contains(&self, key: &K, value: &V) -> bool {
        self.try_get(key)
            .map_or(false, |v| self.value_eq.equivalent(v, value))
    }

    /// Remove `key` only if its value is equivalent to `value`.
    pub fn remove_pair(&mut self, key: &K, value: &V) -> bool {
        match self.find_index(key) {
            Some(i) if self.value_eq.equivalent(self.value_at(i), value) => {
                self.take_slot(i);
                true
            }
            _ => false,
        }
    }
}

impl<K, V, H, KE, VE> Index<&K> for OpenAddressingTable<K, V, H, KE, VE>
where
    H: KeyHasher<K>,
    KE: Equivalence<K>,
{
    type Output = V;

    /// Panics with `TableError::KeyNotFound` if `key` is absent.
    fn index(&self, key: &K) -> &V {
        match self.get(key) {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<K, V, H, KE, VE> Extend<(K, V)> for OpenAddressingTable<K, V, H, KE, VE>
where
    H: KeyHasher<K>,
    KE: Equivalence<K>,
{
    /// Later pairs overwrite the values of earlier equivalent keys.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OpenAddressingTable<K, V>
where
    K: Hash + PartialEq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::with_std();
        table.extend(iter);
        table
    }
}

impl<'a, K, V, H, KE, VE> IntoIterator for &'a OpenAddressingTable<K, V, H, KE, VE> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, H, KE, VE> IntoIterator for &'a mut OpenAddressingTable<K, V, H, KE, VE> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, H, KE, VE> IntoIterator for OpenAddressingTable<K, V, H, KE, VE> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.keys, self.values, self.len)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, H, KE, VE> fmt::Debug for OpenAddressingTable<K, V, H, KE, VE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
impl<K, V, H, KE, VE> OpenAddressingTable<K, V, H, KE, VE>
where
    H: KeyHasher<K>,
    KE: Equivalence<K>,
{
    /// Panics unless the counters match the slots and every live key is
    /// reachable from its home slot without crossing an empty slot.
    pub(crate) fn assert_consistent(&self) {
        let cap = self.capacity();
        assert_eq!(self.values.len(), cap);
        let mut live = 0;
        let mut tombs = 0;
        for (i, slot) in self.keys.iter().enumerate() {
            match slot {
                Slot::Empty => assert!(self.values[i].is_none()),
                Slot::Tombstone => {
                    tombs += 1;
                    assert!(self.values[i].is_none());
                }
                Slot::Occupied(k) => {
                    live += 1;
                    assert!(self.values[i].is_some());
                    for j in CyclicProbe::new(self.home(k), cap) {
                        if j == i {
                            break;
                        }
                        assert!(!self.keys[j].is_empty(), "probe chain broken before slot {i}");
                    }
                }
            }
        }
        assert_eq!(live, self.len);
        assert_eq!(tombs, self.tombstones);
        assert!(self.len <= cap);
    }
}
