#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can use a
// tiny resize policy and inspect bucket layout.

use crate::chained_hash_map::ChainedHashMap;
use crate::fnv;
use crate::policy::ResizePolicy;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Mutate(usize, i32),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,6}", 1..=48).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            4 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Small thresholds so random scenarios cross many grow and shrink boundaries.
fn tiny_policy() -> ResizePolicy {
    ResizePolicy::default()
        .with_initial_capacity(2)
        .with_shrink_min_capacity(4)
        .with_bucket_capacity(3)
}

fn snapshot(m: &ChainedHashMap<i32>) -> BTreeMap<String, i32> {
    m.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn check_layout(m: &ChainedHashMap<i32>) -> Result<(), TestCaseError> {
    let lengths = m.bucket_lengths();
    prop_assert_eq!(lengths.len(), m.cap());
    prop_assert_eq!(lengths.iter().sum::<usize>(), m.len());
    prop_assert_eq!(m.to_vec().len(), m.len());
    Ok(())
}

fn run_state_machine(
    mut sut: ChainedHashMap<i32>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let policy = *sut.policy();
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        let cap_before = sut.cap();
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let prev = sut.insert(k.as_str(), v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
                if prev.is_some() {
                    prop_assert_eq!(sut.cap(), cap_before, "overwrite must not resize");
                }
                prop_assert_eq!(sut.get(k), Some(&v));
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let got = sut.remove(k);
                prop_assert_eq!(got, model.remove(k));
                if got.is_none() {
                    prop_assert_eq!(sut.cap(), cap_before, "miss must not resize");
                }
                prop_assert!(sut.get(k).is_none());
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.wrapping_add(d);
                }
                if let Some(v) = model.get_mut(k) {
                    *v = v.wrapping_add(d);
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.cap(), policy.initial_capacity);
            }
            OpI::Iterate => {
                let expected: BTreeMap<String, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(snapshot(&sut), expected);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        if sut.cap() > cap_before {
            prop_assert!(sut.cap() == cap_before * policy.growth_factor);
        }
        check_layout(&sut)?;
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap
// with the default thresholds.
// - Upsert returns the previous value; overwrite never changes `len` or `cap`.
// - Remove of a missing key returns `None` and changes nothing.
// - `len` equals the model's size and the sum of bucket lengths after each op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedHashMap::new(), pool, ops)?;
    }
}

// Property: Same invariants with a tiny policy, so almost every scenario
// migrates in both directions many times.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_frequent_migration((pool, ops) in arb_scenario()) {
        let sut = ChainedHashMap::with_policy(tiny_policy()).unwrap();
        run_state_machine(sut, pool, ops)?;
    }
}

// Property: Migration fidelity. Growing to many buckets and draining back
// down preserves every surviving (key, value) pair, and every pair lives in
// the bucket its digest names at each capacity it passes through.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_migration_preserves_pairs(
        keys in proptest::collection::btree_set("[a-z0-9]{1,8}", 1..300),
        keep_every in 2usize..6,
    ) {
        let mut m = ChainedHashMap::with_policy(tiny_policy()).unwrap();
        for (i, k) in keys.iter().enumerate() {
            m.insert(k.as_str(), i as i32);
        }
        let grown_cap = m.cap();
        let mut expected = snapshot(&m);
        prop_assert_eq!(expected.len(), keys.len());

        for (i, k) in keys.iter().enumerate() {
            if i % keep_every != 0 {
                prop_assert_eq!(m.remove(k), Some(i as i32));
                expected.remove(k);
            }
        }
        prop_assert!(m.cap() <= grown_cap);
        prop_assert_eq!(snapshot(&m), expected);

        let cap = m.cap();
        for (k, _) in m.iter() {
            let slot = fnv::digest(k, cap);
            prop_assert!(m.bucket_lengths()[slot] > 0);
        }
    }
}
