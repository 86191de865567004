//! Hash and equality capabilities injected into the table.
//!
//! The table never calls `K: Hash` or `K: Eq` directly. Everything goes
//! through a `KeyHasher` and two `Equivalence`s supplied at construction,
//! so callers can key on case-insensitive strings, pointer identity, or
//! anything else that forms an equivalence relation.
//!
//! Closures implement both traits, as do the `StdHash` / `StdEq` adapters
//! over the standard traits.

use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;
use hashbrown::hash_map::DefaultHashBuilder;

/// Maps a key to its hash. Equal keys (under the table's key equivalence)
/// must hash to the same value.
pub trait KeyHasher<K: ?Sized> {
    fn hash_key(&self, key: &K) -> u64;
}

/// An equivalence relation over `T`: reflexive, symmetric and transitive.
pub trait Equivalence<T: ?Sized> {
    fn equivalent(&self, a: &T, b: &T) -> bool;
}

impl<K, F> KeyHasher<K> for F
where
    K: ?Sized,
    F: Fn(&K) -> u64,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self(key)
    }
}

impl<T, F> Equivalence<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// `KeyHasher` over `K: Hash` using a `BuildHasher`.
#[derive(Clone, Debug, Default)]
pub struct StdHash<S = DefaultHashBuilder> {
    build: S,
}

impl StdHash {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: BuildHasher> StdHash<S> {
    pub fn with_hasher(build: S) -> Self {
        Self { build }
    }
}

impl<K, S> KeyHasher<K> for StdHash<S>
where
    K: ?Sized + Hash,
    S: BuildHasher,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self.build.hash_one(key)
    }
}

/// `Equivalence` over `T: PartialEq`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdEq;

impl<T: ?Sized + PartialEq> Equivalence<T> for StdEq {
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Hashes an integer key to itself, so `hash(k) = k`.
///
/// Handy for tests and for keys that are already well-distributed ids.
/// Negative values wrap through `as u64`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityHash<T>(PhantomData<fn(&T)>);

impl<T> IdentityHash<T> {
    pub const fn new() -> Self {
        IdentityHash(PhantomData)
    }
}

macro_rules! identity_hash {
    ($($t:ty),*) => {
        $(
            impl KeyHasher<$t> for IdentityHash<$t> {
                #[inline]
                fn hash_key(&self, key: &$t) -> u64 {
                    *key as u64
                }
            }
        )*
    };
}

identity_hash!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
