#![cfg(test)]

// Property tests for OpenAddressingTable kept inside the crate so they can
// check slot-level consistency through `assert_consistent`.

use crate::capability::{StdEq, StdHash};
use crate::error::TableError;
use crate::open_table::OpenAddressingTable;
use crate::policy::{DuplicatePolicy, InsertOutcome};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations so shrinking moves toward earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32, DuplicatePolicy),
    Set(usize, i32),
    Remove(usize),
    RemovePair(usize, i32),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
    Clear,
}

fn arb_policy() -> impl Strategy<Value = DuplicatePolicy> {
    prop_oneof![
        Just(DuplicatePolicy::Reject),
        Just(DuplicatePolicy::Ignore),
        Just(DuplicatePolicy::ReplaceValue),
        Just(DuplicatePolicy::ReplaceKeyAndValue),
    ]
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>(), arb_policy()).prop_map(|(i, v, p)| Op::Insert(i, v, p)),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Set(i, v)),
            3 => idx.clone().prop_map(Op::Remove),
            1 => (idx.clone(), -2i32..2).prop_map(|(i, v)| Op::RemovePair(i, v)),
            2 => idx.clone().prop_map(Op::Get),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(Op::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            1 => Just(Op::Iterate),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Drives the table and a std HashMap model through the same operations,
// checking after every step that
// - lookups, counts and iteration agree with the model;
// - duplicate policies produce the outcome the model predicts;
// - `len` matches the live slots and every probe chain is unbroken.
fn run_state_machine<H>(
    mut sut: OpenAddressingTable<String, i32, H, StdEq, StdEq>,
    pool: Vec<String>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError>
where
    H: crate::capability::KeyHasher<String>,
{
    let mut model: HashMap<String, i32> = HashMap::new();
    for op in ops {
        match op {
            Op::Insert(i, v, policy) => {
                let k = pool[i].clone();
                let prev = model.get(&k).copied();
                let res = sut.insert(k.clone(), v, policy);
                match (prev, policy) {
                    (None, _) => {
                        prop_assert_eq!(res, Ok(InsertOutcome::Inserted));
                        model.insert(k, v);
                    }
                    (Some(_), DuplicatePolicy::Reject) => {
                        prop_assert_eq!(res, Err(TableError::DuplicateKey));
                    }
                    (Some(_), DuplicatePolicy::Ignore) => {
                        prop_assert_eq!(res, Ok(InsertOutcome::Ignored { key: k, value: v }));
                    }
                    (Some(old), DuplicatePolicy::ReplaceValue) => {
                        prop_assert_eq!(res, Ok(InsertOutcome::ValueReplaced(old)));
                        model.insert(k, v);
                    }
                    (Some(old), DuplicatePolicy::ReplaceKeyAndValue) => {
                        prop_assert_eq!(
                            res,
                            Ok(InsertOutcome::EntryReplaced { key: k.clone(), value: old })
                        );
                        model.insert(k, v);
                    }
                }
            }
            Op::Set(i, v) => {
                let k = pool[i].clone();
                prop_assert_eq!(sut.set(k.clone(), v), model.insert(k, v));
            }
            Op::Remove(i) => {
                let k = &pool[i];
                let expected = model.remove(k).is_some();
                prop_assert_eq!(sut.remove(k), expected);
                prop_assert!(!sut.remove(k), "second removal must report absence");
            }
            Op::RemovePair(i, v) => {
                let k = &pool[i];
                let matches = model.get(k) == Some(&v);
                prop_assert_eq!(sut.remove_pair(k, &v), matches);
                if matches {
                    model.remove(k);
                }
            }
            Op::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.try_get(k), model.get(k));
                prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
            }
            Op::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            Op::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.wrapping_add(d);
                }
                if let Some(v) = model.get_mut(k) {
                    *v = v.wrapping_add(d);
                }
            }
            Op::Iterate => {
                let s: BTreeMap<_, _> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                let m: BTreeMap<_, _> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(s, m);
                prop_assert_eq!(sut.keys().len(), model.len());
                prop_assert_eq!(sut.values().len(), model.len());
            }
            Op::Clear => {
                let cap = sut.capacity();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), cap);
            }
        }

        sut.assert_consistent();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.len() <= sut.capacity());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(OpenAddressingTable::with_std(), pool, ops)?;
    }
}

// Same operations with every key hashing to one slot: every lookup walks a
// single chain full of tombstones, which is where removal bugs surface.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut = OpenAddressingTable::new(|_: &String| 3u64, StdEq, StdEq);
        run_state_machine(sut, pool, ops)?;
    }
}

// A handful of home slots over a tiny initial capacity forces repeated
// growth and compaction.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_small_capacity((pool, ops) in arb_scenario()) {
        let hasher = |k: &String| k.len() as u64;
        let sut = OpenAddressingTable::with_capacity(1, hasher, StdEq, StdEq).unwrap();
        run_state_machine(sut, pool, ops)?;
    }
}

#[test]
fn std_hash_table_matches_model_smoke() {
    let mut t: OpenAddressingTable<String, i32, StdHash> = OpenAddressingTable::with_std();
    for i in 0..100 {
        t.add(format!("k{i}"), i).unwrap();
    }
    t.assert_consistent();
    assert_eq!(t.len(), 100);
    assert!(t.capacity() >= 143);
}
