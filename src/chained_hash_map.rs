//! ChainedHashMap: string-keyed map with separate chaining and two-way resizing.
//!
//! Keys are placed with the 32-bit FNV-1a digest in `fnv`. Each slot holds a
//! `Bucket`, a linked chain of pairs scanned linearly. After a fresh insert
//! the table grows when the load ratio passes the policy's load factor or
//! the receiving bucket overflows; after a remove it shrinks once it is both
//! large and sparse. Both directions go through `migrate`, which moves every
//! pair into a new bucket array addressed by the new bucket count.
//!
//! The bucket count is the length of the bucket array itself, so it cannot
//! drift from the storage it describes.

use crate::bucket::{Bucket, Pair};
use crate::error::Result;
use crate::fnv;
use crate::linked_list;
use crate::policy::ResizePolicy;
use core::fmt;

#[derive(Clone)]
pub struct ChainedHashMap<V> {
    buckets: Vec<Bucket<V>>,
    len: usize,
    policy: ResizePolicy,
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ChainedHashMap<V> {
    pub fn new() -> Self {
        Self::from_valid_policy(ResizePolicy::default())
    }

    /// Build an empty map with custom thresholds.
    pub fn with_policy(policy: ResizePolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self::from_valid_policy(policy))
    }

    fn from_valid_policy(policy: ResizePolicy) -> Self {
        Self {
            buckets: alloc_buckets(policy.initial_capacity),
            len: 0,
            policy,
        }
    }

    /// Build a map from initial pairs, applied in order through `insert`.
    /// Later duplicates overwrite earlier ones and resizing applies as usual.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str> + Into<Box<str>>,
    {
        let mut map = Self::new();
        map.extend(pairs);
        map
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Current number of buckets.
    pub fn cap(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn policy(&self) -> &ResizePolicy {
        &self.policy
    }

    pub fn load_ratio(&self) -> f64 {
        self.len as f64 / self.cap() as f64
    }

    #[inline]
    fn slot(&self, key: &str) -> usize {
        fnv::digest(key, self.cap())
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets[self.slot(key)].get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let idx = self.slot(key);
        self.buckets[idx].get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Upsert. An existing key has its value replaced in place and the old
    /// value is returned; no resize is considered in that case. A fresh key
    /// is appended to its bucket and may trigger a grow.
    pub fn insert<K>(&mut self, key: K, value: V) -> Option<V>
    where
        K: AsRef<str> + Into<Box<str>>,
    {
        let idx = self.slot(key.as_ref());
        if let Some(slot) = self.buckets[idx].get_mut(key.as_ref()) {
            return Some(core::mem::replace(slot, value));
        }

        let bucket = &mut self.buckets[idx];
        bucket.push(Pair::new(key, value));
        let bucket_len = bucket.len();
        self.len += 1;

        if self.policy.should_grow(self.len, self.cap(), bucket_len) {
            self.migrate(self.policy.grown(self.cap()));
        }
        None
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Remove `key`, returning the stored key and value. A shrink may follow.
    pub fn remove_entry(&mut self, key: &str) -> Option<(String, V)> {
        let idx = self.slot(key);
        let pair = self.buckets[idx].take(key)?;
        self.len -= 1;

        if self.policy.should_shrink(self.len, self.cap()) {
            self.migrate(self.policy.shrunk(self.cap()));
        }
        Some(pair.into_parts())
    }

    /// Drop every pair and start over with a fresh bucket array of the
    /// initial capacity.
    pub fn clear(&mut self) {
        log::trace!("clearing map: len={} cap={}", self.len, self.cap());
        self.buckets = alloc_buckets(self.policy.initial_capacity);
        self.len = 0;
    }

    /// Rehash every pair into a new bucket array of `new_cap` buckets.
    fn migrate(&mut self, new_cap: usize) {
        let old_cap = self.cap();
        let mut next = alloc_buckets(new_cap);
        for pair in core::mem::take(&mut self.buckets).into_iter().flatten() {
            let idx = fnv::digest(pair.key(), new_cap);
            next[idx].push(pair);
        }
        self.buckets = next;
        log::debug!(
            "migrated map: cap {} -> {}, len={}",
            old_cap,
            new_cap,
            self.len
        );
        self.debug_check_invariants();
    }

    #[cfg(debug_assertions)]
    fn debug_check_invariants(&self) {
        let mut seen = hashbrown::HashSet::with_capacity(self.len);
        for (i, bucket) in self.buckets.iter().enumerate() {
            for pair in bucket.iter() {
                assert!(seen.insert(pair.key()), "duplicate key after migration");
                assert_eq!(fnv::digest(pair.key(), self.cap()), i, "pair in wrong bucket");
            }
        }
        assert_eq!(seen.len(), self.len, "length diverged from pair count");
    }

    #[cfg(not(debug_assertions))]
    #[inline]
    fn debug_check_invariants(&self) {}

    /// Pairs in bucket order, then chain order within a bucket.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.len,
        }
    }

    pub fn for_each_value_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut V),
    {
        for bucket in &mut self.buckets {
            bucket.for_each_value_mut(&mut f);
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_string()).collect()
    }

    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn to_vec(&self) -> Vec<Pair<V>>
    where
        V: Clone,
    {
        self.buckets
            .iter()
            .flat_map(|b| b.iter().cloned())
            .collect()
    }

    /// Number of pairs in each bucket, in bucket order.
    pub fn bucket_lengths(&self) -> Vec<usize> {
        self.buckets.iter().map(|b| b.len()).collect()
    }
}

fn alloc_buckets<V>(cap: usize) -> Vec<Bucket<V>> {
    let mut buckets = Vec::with_capacity(cap);
    buckets.resize_with(cap, Bucket::default);
    buckets
}

/// Iterator over `(&str, &V)` in bucket order.
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Bucket<V>>,
    chain: Option<linked_list::Iter<'a, Pair<V>>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.chain.as_mut().and_then(|c| c.next()) {
                self.remaining -= 1;
                return Some((pair.key(), &pair.value));
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V> ExactSizeIterator for Iter<'a, V> {}

/// Owning iterator over `(String, V)` in bucket order.
pub struct IntoIter<V> {
    inner: core::iter::Flatten<std::vec::IntoIter<Bucket<V>>>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.inner.next()?;
        self.remaining -= 1;
        Some(pair.into_parts())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> IntoIterator for ChainedHashMap<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> IntoIter<V> {
        IntoIter {
            inner: self.buckets.into_iter().flatten(),
            remaining: self.len,
        }
    }
}

impl<'a, V> IntoIterator for &'a ChainedHashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<K, V> Extend<(K, V)> for ChainedHashMap<V>
where
    K: AsRef<str> + Into<Box<str>>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedHashMap<V>
where
    K: AsRef<str> + Into<Box<str>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainedHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for ChainedHashMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<V: Eq> Eq for ChainedHashMap<V> {}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::ChainedHashMap;
    use crate::policy::ResizePolicy;
    use core::fmt;
    use core::marker::PhantomData;
    use serde::de::{self, MapAccess, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl<V: Serialize> Serialize for ChainedHashMap<V> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_map(self.iter())
        }
    }

    struct MapVisitor<V> {
        policy: ResizePolicy,
        value_marker: PhantomData<V>,
    }

    impl<'de, V: Deserialize<'de>> Visitor<'de> for MapVisitor<V> {
        type Value = ChainedHashMap<V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "a map with string keys")
        }

        fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut map = ChainedHashMap::with_policy(self.policy).map_err(de::Error::custom)?;
            while let Some((key, value)) = access.next_entry::<String, V>()? {
                map.insert(key, value);
            }
            Ok(map)
        }
    }

    /// Only the pairs are serialized. Deserializing through `Deserialize`
    /// yields a map with `ResizePolicy::default()`; use
    /// [`ChainedHashMap::deserialize_with_policy`] to restore custom thresholds.
    impl<'de, V: Deserialize<'de>> Deserialize<'de> for ChainedHashMap<V> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            Self::deserialize_with_policy(deserializer, ResizePolicy::default())
        }
    }

    impl<V> ChainedHashMap<V> {
        /// Deserialize a map of pairs into a table using `policy`.
        ///
        /// An invalid `policy` is reported as a deserialization error.
        pub fn deserialize_with_policy<'de, D>(
            deserializer: D,
            policy: ResizePolicy,
        ) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
            V: Deserialize<'de>,
        {
            deserializer.deserialize_map(MapVisitor {
                policy,
                value_marker: PhantomData,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sorted<V: Clone>(m: &ChainedHashMap<V>) -> BTreeMap<String, V> {
        m.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn create_empty() {
        let m: ChainedHashMap<i32> = ChainedHashMap::new();
        assert_eq!(m.len(), 0);
        assert_eq!(m.cap(), 100);
        assert!(m.is_empty());
        assert!(m.to_vec().is_empty());
    }

    #[test]
    fn insert_and_get() {
        let mut m = ChainedHashMap::new();
        assert_eq!(m.insert("one", 1), None);
        assert_eq!(m.insert("two", 2), None);
        assert_eq!(m.insert("three", 3), None);
        assert_eq!(m.len(), 3);
        assert!(!m.is_empty());
        assert_eq!(m.get("one"), Some(&1));
        assert_eq!(m.get("two"), Some(&2));
        assert_eq!(m.get("three"), Some(&3));
        assert_eq!(m.get("four"), None);
    }

    /// Invariant: Inserting an existing key replaces its value and keeps `len`.
    #[test]
    fn upsert_overwrites_in_place() {
        let mut m = ChainedHashMap::new();
        m.insert("key", 1);
        assert_eq!(m.insert("key".to_string(), 2), Some(1));
        assert_eq!(m.get("key"), Some(&2));
        assert_eq!(m.len(), 1);
    }

    /// Invariant: Removing a missing key returns `None` and leaves the map unchanged.
    #[test]
    fn remove_present_and_absent() {
        let mut m = ChainedHashMap::new();
        m.insert("a", 1);
        m.insert("b", 2);
        assert_eq!(m.remove("a"), Some(1));
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("a"), None);
        assert_eq!(m.remove("c"), None);
        assert_eq!(m.remove("a"), None);
        assert_eq!(m.len(), 1);
        assert_eq!(m.remove_entry("b"), Some(("b".to_string(), 2)));
        assert!(m.is_empty());
    }

    /// Invariant: `clear` resets to the initial bucket count even after growth.
    #[test]
    fn clear_resets_capacity() {
        let mut m = ChainedHashMap::new();
        for i in 0..500 {
            m.insert(format!("key{}", i), i);
        }
        assert!(m.cap() > 100);
        m.clear();
        assert_eq!(m.len(), 0);
        assert_eq!(m.cap(), 100);
        assert!(m.is_empty());
        for i in 0..500 {
            assert_eq!(m.get(&format!("key{}", i)), None);
        }
    }

    #[test]
    fn keys_values_to_vec() {
        let mut m = ChainedHashMap::new();
        m.insert("a", 1);
        m.insert("b", 2);
        let mut keys = m.keys();
        keys.sort();
        let mut values = m.values();
        values.sort();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(values, vec![1, 2]);

        let pairs = m.to_vec();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.iter().find(|p| p.key() == "a").map(|p| p.value), Some(1));
        assert_eq!(pairs.iter().find(|p| p.key() == "b").map(|p| p.value), Some(2));
    }

    /// Invariant: Crossing the 0.75 load factor doubles 100 buckets to 200 exactly once.
    #[test]
    fn grows_past_load_factor() {
        let mut m = ChainedHashMap::new();
        for i in 0..75 {
            m.insert(format!("key{}", i), i);
        }
        assert_eq!(m.cap(), 100);
        for i in 75..100 {
            m.insert(format!("key{}", i), i);
        }
        assert_eq!(m.len(), 100);
        assert_eq!(m.cap(), 200);
        for i in 0..100 {
            assert_eq!(m.get(&format!("key{}", i)), Some(&i));
        }
    }

    /// Invariant: A large, sparse table halves its bucket count on removal.
    #[test]
    fn shrinks_when_sparse() {
        let mut m = ChainedHashMap::new();
        for i in 0..1000 {
            m.insert(format!("key{}", i), i);
        }
        assert_eq!(m.cap(), 1600);
        for i in 300..1000 {
            assert_eq!(m.remove(&format!("key{}", i)), Some(i));
        }
        assert_eq!(m.len(), 300);
        assert_eq!(m.cap(), 800);
        for i in 0..300 {
            assert_eq!(m.get(&format!("key{}", i)), Some(&i));
        }
    }

    /// Invariant: One overfull bucket forces a grow even when the table is sparse.
    #[test]
    fn bucket_overflow_forces_grow() {
        let policy = ResizePolicy::default()
            .with_initial_capacity(1)
            .with_load_factor(100.0)
            .with_bucket_capacity(3);
        let mut m = ChainedHashMap::with_policy(policy).unwrap();
        for i in 0..3 {
            m.insert(format!("k{}", i), i);
        }
        assert_eq!(m.cap(), 1);
        m.insert("k3", 3);
        assert_eq!(m.cap(), 2);
        for i in 0..4 {
            assert_eq!(m.get(&format!("k{}", i)), Some(&i));
        }
    }

    /// Invariant: After every migration each pair sits in the bucket its digest names.
    #[test]
    fn pairs_live_in_their_digest_bucket() {
        let mut m = ChainedHashMap::new();
        for i in 0..700 {
            m.insert(format!("key{}", i), i);
        }
        for (i, bucket) in m.buckets.iter().enumerate() {
            for pair in bucket.iter() {
                assert_eq!(fnv::digest(pair.key(), m.cap()), i);
            }
        }
        assert_eq!(m.bucket_lengths().iter().sum::<usize>(), m.len());
    }

    /// Invariant: Construction from pairs goes through `insert`; later duplicates win.
    #[test]
    fn from_pairs_applies_in_order() {
        let m = ChainedHashMap::from_pairs([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("a"), Some(&3));

        let big: ChainedHashMap<usize> = (0..100).map(|i| (format!("key{}", i), i)).collect();
        assert_eq!(big.cap(), 200);
        assert_eq!(big.len(), 100);
    }

    #[test]
    fn with_policy_rejects_invalid() {
        let bad = ResizePolicy::default().with_initial_capacity(0);
        assert!(ChainedHashMap::<i32>::with_policy(bad).is_err());
    }

    #[test]
    fn get_mut_and_for_each_value_mut() {
        let mut m = ChainedHashMap::from_pairs([("a", 1), ("b", 2)]);
        *m.get_mut("a").unwrap() += 10;
        assert!(m.get_mut("z").is_none());
        m.for_each_value_mut(|k, v| {
            if k == "b" {
                *v *= 100;
            }
        });
        assert_eq!(m.get("a"), Some(&11));
        assert_eq!(m.get("b"), Some(&200));
    }

    #[test]
    fn iteration_yields_every_pair_once() {
        let m: ChainedHashMap<usize> = (0..250).map(|i| (format!("k{}", i), i)).collect();
        assert_eq!(m.iter().len(), 250);
        let owned: BTreeMap<String, usize> = m.clone().into_iter().collect();
        assert_eq!(owned, sorted(&m));
        assert_eq!(owned.len(), 250);
    }

    #[test]
    fn equality_ignores_bucket_layout() {
        let a = ChainedHashMap::from_pairs([("x", 1), ("y", 2)]);
        let mut b = ChainedHashMap::new();
        for i in 0..200 {
            b.insert(format!("tmp{}", i), 0);
        }
        for i in 0..200 {
            b.remove(&format!("tmp{}", i));
        }
        b.insert("y", 2);
        b.insert("x", 1);
        assert_eq!(a, b);
        b.insert("x", 5);
        assert_ne!(a, b);
    }

    #[test]
    fn debug_renders_as_map() {
        let m = ChainedHashMap::from_pairs([("only", 1)]);
        assert_eq!(format!("{:?}", m), "{\"only\": 1}");
    }
}
