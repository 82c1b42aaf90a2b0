// ChainedMap integration suite over the public API.
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Uniqueness: at most one live binding per key after any op sequence.
// - Round-trip: a successful insert is immediately visible via get and
//   contains.
// - Ownership: keys are copied on insert; values move back to the caller
//   on remove/replace and on rejected inserts.
// - Growth transparency: tier crossings never lose or corrupt bindings
//   and are invisible to the insert that triggers them.
use std::collections::BTreeSet;
use symtable::{ChainedMap, InsertError};

// Test: the reference operation sequence, end to end.
// Verifies: duplicate rejection, replace returning the old value, remove
// returning the stored value exactly once.
#[test]
fn reference_scenario() {
    let mut m: ChainedMap<i32> = ChainedMap::new();
    assert!(m.insert("a", 1).is_ok());
    assert!(m.insert("b", 2).is_ok());
    match m.insert("a", 3) {
        Err(InsertError::DuplicateKey(v)) => assert_eq!(v, 3),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(m.get("a"), Some(&1));
    assert_eq!(m.replace("a", 3), Ok(1));
    assert_eq!(m.get("a"), Some(&3));
    assert_eq!(m.remove("b"), Some(2));
    assert_eq!(m.len(), 1);
    assert_eq!(m.remove("b"), None);
}

// Test: key independence.
// Assumes: insert stores an owned copy of the key bytes.
// Verifies: mutating and dropping the caller's buffer after insert does
// not affect later lookups.
#[test]
fn key_buffer_can_be_reused_after_insert() {
    let mut m: ChainedMap<i32> = ChainedMap::new();

    let mut buffer = String::from("original");
    m.insert(&buffer, 1).unwrap();

    buffer.clear();
    buffer.push_str("overwritten");
    m.insert(&buffer, 2).unwrap();
    drop(buffer);

    assert_eq!(m.get("original"), Some(&1));
    assert_eq!(m.get("overwritten"), Some(&2));
    assert!(!m.contains("origina"));
}

// Test: growth transparency across every tier boundary.
// Assumes: tiers are 509..=65521 and growth triggers when the binding
// count exceeds the bucket count.
// Verifies: after crossing the last boundary the table sits at the final
// tier, every inserted key still resolves to its value, and further
// inserts no longer grow the table.
#[test]
fn growth_crosses_every_tier_and_preserves_bindings() {
    let tiers = [509usize, 1021, 2039, 4093, 8191, 16381, 32749, 65521];
    let mut m: ChainedMap<usize> = ChainedMap::new();
    assert_eq!(m.bucket_count(), tiers[0]);

    let total = tiers[tiers.len() - 1] + 1;
    let mut crossings = Vec::new();
    let mut last_count = m.bucket_count();
    for i in 0..total {
        m.insert(&format!("k{:06}", i), i).unwrap();
        if m.bucket_count() != last_count {
            // Verify the whole table right after each crossing.
            for j in 0..=i {
                assert_eq!(m.get(&format!("k{:06}", j)), Some(&j));
            }
            crossings.push(m.bucket_count());
            last_count = m.bucket_count();
        }
    }

    assert_eq!(crossings, &tiers[1..]);
    assert_eq!(m.bucket_count(), 65521);
    assert_eq!(m.len(), total);

    // Final tier: load factor above one is accepted, no further growth.
    for i in total..total + 100 {
        m.insert(&format!("k{:06}", i), i).unwrap();
    }
    assert_eq!(m.bucket_count(), 65521);
    assert_eq!(m.len(), total + 100);
}

// Test: traversal completeness at a size that has forced one growth.
// Verifies: iter() yields exactly len() bindings covering the full key
// set, each exactly once.
#[test]
fn traversal_complete_after_growth() {
    let mut m: ChainedMap<usize> = ChainedMap::new();
    let n = 1000;
    for i in 0..n {
        m.insert(&format!("key{}", i), i).unwrap();
    }
    assert_eq!(m.bucket_count(), 1021);

    let mut seen = BTreeSet::new();
    let mut visits = 0;
    for (k, &v) in m.iter() {
        visits += 1;
        assert_eq!(k, format!("key{}", v));
        assert!(seen.insert(v), "binding visited twice: {}", k);
    }
    assert_eq!(visits, m.len());
    assert_eq!(seen.len(), n);
}

// Test: length consistency under interleaved inserts and removes.
// Verifies: len() equals successful inserts minus successful removes;
// failed ops leave it untouched.
#[test]
fn length_consistency() {
    let mut m: ChainedMap<i32> = ChainedMap::new();
    let mut expected = 0usize;
    for round in 0..3 {
        for i in 0..600 {
            let key = format!("r{}k{}", round, i);
            if m.insert(&key, i).is_ok() {
                expected += 1;
            }
            assert_eq!(m.len(), expected);
        }
        for i in (0..600).step_by(3) {
            let key = format!("r{}k{}", round, i);
            if m.remove(&key).is_some() {
                expected -= 1;
            }
            assert_eq!(m.len(), expected);
        }
    }
}

// Test: values with no Clone/Default/Debug bounds move through intact,
// including borrowed values (V = &T), matching the opaque-value contract.
#[test]
fn borrowed_values_are_supported() {
    let backing = [10i32, 20, 30];
    let mut m: ChainedMap<&i32> = ChainedMap::new();
    m.insert("x", &backing[0]).unwrap();
    m.insert("y", &backing[1]).unwrap();

    assert_eq!(m.get("x"), Some(&&backing[0]));
    assert_eq!(m.replace("y", &backing[2]), Ok(&backing[1]));
    assert_eq!(m.remove("y"), Some(&backing[2]));
    assert_eq!(m.len(), 1);
}

// Test: a rejected insert hands the exact value back, so non-Clone
// payloads survive the failure path.
#[test]
fn rejected_insert_returns_payload() {
    struct Payload(String);

    let mut m: ChainedMap<Payload> = ChainedMap::new();
    m.insert("k", Payload("first".into())).unwrap();
    let err = m.insert("k", Payload("second".into())).unwrap_err();
    assert_eq!(err.into_value().0, "second");
    assert_eq!(m.get("k").map(|p| p.0.as_str()), Some("first"));
}
