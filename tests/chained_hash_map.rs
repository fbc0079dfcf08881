use chained_containers::{ChainedHashMap, ResizePolicy};
use std::collections::BTreeSet;

/// Invariant: Inserting the same key twice keeps only the latest value and counts it once.
#[test]
fn duplicate_key_counts_once() {
    let mut m = ChainedHashMap::new();
    m.insert("dup", 1);
    m.insert("dup", 2);
    assert_eq!(m.get("dup"), Some(&2));
    assert_eq!(m.len(), 1);
    assert_eq!(m.keys(), vec!["dup".to_string()]);
}

/// Invariant: `insert(k, v)` followed by `get(k)` yields `v` for assorted keys.
#[test]
fn round_trip_assorted_keys() {
    let keys = ["", " ", "a", "A", "key0", "ключ", "キー", "\u{1F600}", "a\0b"];
    let mut m = ChainedHashMap::new();
    for (i, k) in keys.iter().enumerate() {
        m.insert(*k, i);
        assert_eq!(m.get(k), Some(&i));
    }
    assert_eq!(m.len(), keys.len());
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(m.get(k), Some(&i));
    }
}

/// Invariant: Removing a never-inserted or already-removed key is a no-op.
#[test]
fn remove_absent_is_noop() {
    let mut m = ChainedHashMap::from_pairs([("a", 1), ("b", 2)]);
    assert_eq!(m.remove("missing"), None);
    assert_eq!(m.len(), 2);
    assert_eq!(m.remove("a"), Some(1));
    assert_eq!(m.remove("a"), None);
    assert_eq!(m.len(), 1);
}

/// Invariant: `len` matches distinct live keys and the pairs in `to_vec`.
#[test]
fn size_accounting_after_mixed_ops() {
    let mut m = ChainedHashMap::new();
    let mut live = BTreeSet::new();
    for i in 0..2000u32 {
        let k = format!("k{}", i % 700);
        if i % 3 == 0 {
            m.remove(&k);
            live.remove(&k);
        } else {
            m.insert(k.clone(), i);
            live.insert(k);
        }
        assert_eq!(m.len(), live.len());
    }
    assert_eq!(m.to_vec().len(), live.len());
    let keys: BTreeSet<String> = m.keys().into_iter().collect();
    assert_eq!(keys, live);
}

/// Invariant: 100 fresh keys grow a default map from 100 to 200 buckets, with the
/// grow happening once the load ratio exceeds 0.75.
#[test]
fn grow_trigger_at_default_policy() {
    let mut m = ChainedHashMap::new();
    let mut grew_at = None;
    for i in 0..100 {
        m.insert(format!("key{}", i), i);
        if grew_at.is_none() && m.cap() != 100 {
            grew_at = Some(i + 1);
        }
    }
    assert_eq!(m.len(), 100);
    assert_eq!(m.cap(), 200);
    assert!(grew_at.is_some_and(|n| n <= 76));
    for i in 0..100 {
        assert_eq!(m.get(&format!("key{}", i)), Some(&i));
    }
}

/// Invariant: From 1000 keys (1600 buckets), removing down to 300 halves to 800.
#[test]
fn shrink_trigger_at_default_policy() {
    let mut m = ChainedHashMap::new();
    for i in 0..1000 {
        m.insert(format!("key{}", i), i);
    }
    assert_eq!(m.cap(), 1600);
    for i in 300..1000 {
        m.remove(&format!("key{}", i));
    }
    assert_eq!(m.len(), 300);
    assert_eq!(m.cap(), 800);
    for i in 0..300 {
        assert_eq!(m.get(&format!("key{}", i)), Some(&i));
    }
}

/// Invariant: Below the shrink-eligible size, removals never shrink.
#[test]
fn small_tables_never_shrink() {
    let mut m = ChainedHashMap::new();
    for i in 0..300 {
        m.insert(format!("key{}", i), i);
    }
    assert_eq!(m.cap(), 400);
    for i in 0..300 {
        m.remove(&format!("key{}", i));
    }
    assert!(m.is_empty());
    assert_eq!(m.cap(), 400);
}

/// Invariant: `clear` empties the map, restores the default capacity, and forgets keys.
#[test]
fn clear_then_reuse() {
    let mut m: ChainedHashMap<usize> = (0..1000).map(|i| (format!("key{}", i), i)).collect();
    m.clear();
    assert_eq!(m.len(), 0);
    assert_eq!(m.cap(), 100);
    assert!(m.get("key0").is_none());
    m.insert("key0", 7);
    assert_eq!(m.get("key0"), Some(&7));
    assert_eq!(m.len(), 1);
}

#[test]
fn collision_handling_many_keys() {
    let mut m = ChainedHashMap::new();
    for i in 0..100 {
        m.insert(i.to_string(), i);
    }
    assert_eq!(m.len(), 100);
    for i in 0..100 {
        assert_eq!(m.get(&i.to_string()), Some(&i));
    }
}

/// Invariant: With a single bucket and a huge load factor, every key shares one
/// chain until the bucket cap forces a grow; lookups stay correct throughout.
#[test]
fn single_chain_until_bucket_cap() {
    let policy = ResizePolicy::default()
        .with_initial_capacity(1)
        .with_load_factor(1_000.0)
        .with_bucket_capacity(10);
    let mut m = ChainedHashMap::with_policy(policy).unwrap();
    for i in 0..10 {
        m.insert(format!("c{}", i), i);
        assert_eq!(m.cap(), 1);
    }
    m.insert("c10", 10);
    assert_eq!(m.cap(), 2);
    for i in 0..=10 {
        assert_eq!(m.get(&format!("c{}", i)), Some(&i));
    }
}

#[test]
fn values_are_generic() {
    let mut m: ChainedHashMap<Vec<String>> = ChainedHashMap::new();
    m.insert("xs", vec!["a".to_string()]);
    m.get_mut("xs").unwrap().push("b".to_string());
    assert_eq!(m.get("xs").map(|v| v.len()), Some(2));
    let (k, v) = m.remove_entry("xs").unwrap();
    assert_eq!(k, "xs");
    assert_eq!(v, vec!["a".to_string(), "b".to_string()]);
}

/// Invariant: Under any accepted policy, a shrink never leaves the table above
/// its grow threshold, so removals and inserts cannot ping-pong migrations.
#[test]
fn shrink_lands_below_load_factor() {
    let overshooting = ResizePolicy::default().with_shrink_factor(0.5);
    assert!(ChainedHashMap::<u32>::with_policy(overshooting).is_err());

    let policy = ResizePolicy::default().with_shrink_factor(0.3);
    let mut m = ChainedHashMap::with_policy(policy).unwrap();
    for i in 0..1500u32 {
        m.insert(format!("key{}", i), i);
    }
    let peak = m.cap();
    for i in 0..1500u32 {
        m.remove(&format!("key{}", i));
        assert!(m.load_ratio() <= policy.load_factor);
    }
    assert!(m.is_empty());
    assert!(m.cap() < peak);
}
