//! probe-table: an open-addressing hash table whose hashing and equality
//! are supplied by the caller instead of taken from `Hash`/`Eq`.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, single-threaded associative container where the
//!   caller owns the notion of "same key" (case-insensitive strings,
//!   identity on ids, tolerance on floats) and the table owns nothing but
//!   the probing.
//! - Layers:
//!   - `capability`: `KeyHasher` and `Equivalence` traits, implemented for
//!     closures and for adapters over `Hash`/`PartialEq`.
//!   - `probe`: slot states and the cyclic linear probe sequence every
//!     operation walks.
//!   - `OpenAddressingTable<K, V, H, KE, VE>`: two parallel slot arrays
//!     (keys and values), insert with a `DuplicatePolicy`, lookup,
//!     removal, snapshots and iteration.
//!   - `TableBuilder`: assembles a table from capabilities supplied one by
//!     one and reports missing ones.
//!
//! Probe-chain invariant
//! - A live key at slot `i` is reachable from its home slot
//!   `hash(key) % capacity` without crossing an `Empty` slot. Lookups stop
//!   at the first `Empty` slot, so removal never writes `Empty`: it leaves
//!   a `Tombstone`, which lookups walk over and inserts may reuse.
//!
//! Growth
//! - Before every insert: if `len / capacity >= 0.7` the table doubles
//!   (saturating). Otherwise, if live entries plus tombstones reach 0.7 of
//!   capacity, the table rehashes at the same capacity to drop tombstones.
//! - Rehash plans every entry's new slot (calling the hasher) before moving
//!   anything, so a panicking hasher leaves the table intact.
//!
//! Errors
//! - `TableError::DuplicateKey` and `TableError::KeyNotFound` are returned
//!   for callers to branch on. `InvalidArgument` comes from construction
//!   and policy parsing. A broken internal invariant panics with
//!   `InvariantViolation` rather than returning a wrong answer.
//!
//! Notes and non-goals
//! - No internal synchronization. Concurrent access needs an outer lock.
//! - `keys()`/`values()` return snapshots in slot order; iteration is lazy
//!   and stops once `len` live entries have been produced.
//! - Resize is automatic only; there is no public `reserve`/`shrink`.

mod builder;
pub mod capability;
mod error;
mod iter;
mod open_table;
mod open_table_proptest;
mod policy;
mod probe;

// Public surface
pub use builder::TableBuilder;
pub use capability::{Equivalence, IdentityHash, KeyHasher, StdEq, StdHash};
pub use error::TableError;
pub use iter::{IntoIter, Iter, IterMut};
pub use open_table::{OpenAddressingTable, DEFAULT_CAPACITY};
pub use policy::{DuplicatePolicy, InsertOutcome};
