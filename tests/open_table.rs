// OpenAddressingTable integration suite.
//
// Each test documents the behavior verified through the public API only:
// - Round-trip: inserted keys read back their values, others are absent.
// - Removal: idempotent, and never cuts off keys further along a chain.
// - Duplicate policies: Reject / Ignore / ReplaceValue / ReplaceKeyAndValue.
// - Growth: entries and iteration survive repeated resizes.
// - Custom capabilities: equality decided by the caller, not by `Eq`.
use probe_table::{
    DuplicatePolicy, IdentityHash, InsertOutcome, OpenAddressingTable, StdEq, TableBuilder,
    TableError,
};
use std::collections::BTreeSet;

fn identity_table() -> OpenAddressingTable<u64, &'static str, IdentityHash<u64>, StdEq, StdEq> {
    OpenAddressingTable::new(IdentityHash::new(), StdEq, StdEq)
}

// Test: snapshot views and removal on a default-capacity table with hash(k) = k.
#[test]
fn keys_snapshot_and_remove_in_slot_order() {
    let mut t = identity_table();
    t.add(1, "a").unwrap();
    t.add(2, "b").unwrap();
    t.add(3, "c").unwrap();

    assert_eq!(t.keys(), vec![&1, &2, &3]);
    assert_eq!(t.len(), 3);

    assert!(t.remove(&2));
    assert_eq!(t.len(), 2);
    assert_eq!(t.try_get(&2), None);
    assert_eq!(t.try_get(&1), Some(&"a"));
    assert_eq!(t.try_get(&3), Some(&"c"));
}

// Test: three keys sharing a home slot; removing the middle one.
// Verifies: the keys on either side stay reachable.
#[test]
fn survives_churn_on_shared_home_slot() {
    let mut t = OpenAddressingTable::new(|_: &&str| 5u64, StdEq, StdEq);
    t.add("A", 1).unwrap();
    t.add("B", 2).unwrap();
    t.add("C", 3).unwrap();

    assert!(t.remove(&"B"));
    assert_eq!(t.try_get(&"A"), Some(&1));
    assert_eq!(t.try_get(&"C"), Some(&3));
    assert!(!t.contains_key(&"B"));

    // Reinsert and remove the head of the chain as well.
    t.add("B", 20).unwrap();
    assert!(t.remove(&"A"));
    assert_eq!(t.try_get(&"B"), Some(&20));
    assert_eq!(t.try_get(&"C"), Some(&3));
}

// Test: removal of an absent key is a no-op; removing twice is true then false.
#[test]
fn removal_is_idempotent() {
    let mut t = identity_table();
    t.add(10, "ten").unwrap();
    assert!(!t.remove(&11));
    assert_eq!(t.len(), 1);

    assert!(t.remove(&10));
    assert!(!t.remove(&10));
    assert!(t.is_empty());
}

// Test: round-trip over many distinct keys with forced resizes.
// Verifies: every pair is preserved, absent keys stay absent, iteration
// yields the same set of pairs as was inserted.
#[test]
fn resize_preserves_every_pair() {
    let mut t = OpenAddressingTable::new(|k: &u64| k.wrapping_mul(31), StdEq, StdEq);
    let start_cap = t.capacity();
    for k in 0..1_000u64 {
        t.add(k, k * 2).unwrap();
    }
    assert!(t.capacity() > start_cap);
    assert_eq!(t.len(), 1_000);
    for k in 0..1_000u64 {
        assert_eq!(t.try_get(&k), Some(&(k * 2)));
    }
    for k in 1_000..1_100u64 {
        assert_eq!(t.try_get(&k), None);
    }
    let pairs: BTreeSet<_> = t.iter().map(|(k, v)| (*k, *v)).collect();
    let expected: BTreeSet<_> = (0..1_000u64).map(|k| (k, k * 2)).collect();
    assert_eq!(pairs, expected);
}

// Test: the duplicate policy matrix through the public API.
#[test]
fn duplicate_policies() {
    let mut t = identity_table();
    t.add(1, "one").unwrap();

    assert_eq!(t.add(1, "uno"), Err(TableError::DuplicateKey));
    assert_eq!(t[&1], "one");

    let out = t.insert(1, "eins", DuplicatePolicy::Ignore).unwrap();
    assert_eq!(out, InsertOutcome::Ignored { key: 1, value: "eins" });
    assert_eq!(t[&1], "one");

    assert_eq!(t.set(1, "un"), Some("one"));
    assert_eq!(t[&1], "un");

    let out = t
        .insert(1, "yksi", DuplicatePolicy::ReplaceKeyAndValue)
        .unwrap();
    assert_eq!(out, InsertOutcome::EntryReplaced { key: 1, value: "un" });
    assert_eq!(t.len(), 1);
}

// Test: caller-defined key equivalence (ASCII case-insensitive).
// Assumes: the hasher agrees with the equivalence.
// Verifies: lookups and duplicates honor the custom relation.
#[test]
fn case_insensitive_keys() {
    let hash = |k: &String| {
        k.bytes()
            .fold(0xcbf29ce484222325u64, |h, b| {
                (h ^ b.to_ascii_lowercase() as u64).wrapping_mul(0x100000001b3)
            })
    };
    let eq = |a: &String, b: &String| a.eq_ignore_ascii_case(b);
    let mut t = TableBuilder::new()
        .hasher(hash)
        .key_eq(eq)
        .value_eq(StdEq)
        .build::<String, u32>()
        .unwrap();

    t.add("Content-Type".to_string(), 1).unwrap();
    assert!(t.contains_key(&"content-type".to_string()));
    assert_eq!(
        t.add("CONTENT-TYPE".to_string(), 2),
        Err(TableError::DuplicateKey)
    );
    assert_eq!(t.get(&"content-TYPE".to_string()), Ok(&1));
    assert_eq!(t.get(&"accept".to_string()), Err(TableError::KeyNotFound));
}

// Test: value-checked removal only removes on an equivalent value.
#[test]
fn remove_pair_checks_value() {
    let mut t = identity_table();
    t.add(4, "four").unwrap();
    assert!(t.contains(&4, &"four"));
    assert!(!t.remove_pair(&4, &"vier"));
    assert!(t.contains_key(&4));
    assert!(t.remove_pair(&4, &"four"));
    assert!(!t.contains_key(&4));
}

// Test: clear keeps capacity and the table is reusable afterwards.
#[test]
fn clear_then_reuse() {
    let mut t = identity_table();
    for k in 0..50 {
        t.set(k, "x");
    }
    let cap = t.capacity();
    t.clear();
    assert_eq!(t.len(), 0);
    assert_eq!(t.capacity(), cap);
    assert!(t.values().is_empty());

    t.add(3, "three").unwrap();
    assert_eq!(t.keys(), vec![&3]);
}

// Test: extend overwrites earlier values for equal keys; owned iteration
// returns every entry.
#[test]
fn extend_and_into_iter() {
    let mut t = identity_table();
    t.extend([(1, "a"), (2, "b"), (1, "c")]);
    assert_eq!(t.len(), 2);
    assert_eq!(t[&1], "c");

    let all: BTreeSet<_> = t.into_iter().collect();
    assert_eq!(all, BTreeSet::from([(1, "c"), (2, "b")]));
}

#[test]
#[should_panic(expected = "key not found")]
fn index_on_missing_key_panics() {
    let t = identity_table();
    let _v = t[&99];
}
