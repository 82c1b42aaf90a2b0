#![cfg(test)]

// Property tests for ChainedMap kept inside the crate so they can reach
// the bucket tier table without widening the public surface.

use crate::chained_map::{ChainedMap, InsertError};
use crate::hash::BUCKET_TIERS;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Replace(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Replace(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Duplicate keys are rejected with the supplied value handed back;
//   successful inserts are immediately visible.
// - `replace` returns the previous value exactly when the model has one,
//   and hands the supplied value back on absence.
// - `remove` returns the model's value and leaves the key absent.
// - `iter` yields each live binding exactly once; key set parity.
// - `len`/`is_empty` parity with the model after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: ChainedMap<i32> = ChainedMap::new();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = &pool[i];
                    let already = model.contains_key(k);
                    match sut.insert(k, v) {
                        Ok(()) => {
                            prop_assert!(!already, "insert must fail on duplicate");
                            model.insert(k.clone(), v);
                        }
                        Err(InsertError::DuplicateKey(back)) => {
                            prop_assert!(already, "duplicate error only when key exists");
                            prop_assert_eq!(back, v, "rejected value must come back intact");
                        }
                    }
                    prop_assert_eq!(sut.get(k), model.get(k));
                }
                OpI::Replace(i, v) => {
                    let k = &pool[i];
                    match sut.replace(k, v) {
                        Ok(old) => {
                            let mv = model.insert(k.clone(), v);
                            prop_assert_eq!(Some(old), mv);
                        }
                        Err(back) => {
                            prop_assert!(!model.contains_key(k));
                            prop_assert_eq!(back, v);
                        }
                    }
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.remove(k), model.remove(k));
                    prop_assert!(!sut.contains(k));
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), model.get(k));
                    prop_assert_eq!(sut.contains(k), model.contains_key(k));
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
                }
                OpI::Iterate => {
                    let s_keys: BTreeSet<String> =
                        sut.iter().map(|(k, _)| k.to_string()).collect();
                    let m_keys: BTreeSet<String> = model.keys().cloned().collect();
                    prop_assert_eq!(sut.iter().count(), model.len());
                    prop_assert_eq!(s_keys, m_keys);
                }
            }

            // Post-conditions after each op
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }
    }
}

// Property: the growth policy settles at the first tier that can hold the
// binding count at load factor <= 1, and never loses a binding while
// rehashing. Single-step growth suffices because the count rises by one
// insert at a time.
proptest! {
    #![proptest_config(ProptestConfig { cases: 16, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_settles_at_expected_tier(n in 0usize..1200) {
        let mut m: ChainedMap<usize> = ChainedMap::new();
        for i in 0..n {
            m.insert(&format!("key{}", i), i).unwrap();
        }

        let expected = BUCKET_TIERS
            .iter()
            .copied()
            .find(|&count| n <= count)
            .unwrap_or(*BUCKET_TIERS.last().unwrap());
        prop_assert_eq!(m.bucket_count(), expected);
        prop_assert_eq!(m.len(), n);
        for i in 0..n {
            prop_assert_eq!(m.get(&format!("key{}", i)), Some(&i));
        }
    }
}
