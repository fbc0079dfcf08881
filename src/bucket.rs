//! Bucket: one slot's collision chain, a `LinkedList` of key/value pairs.
//!
//! The map only relies on tail pushes, indexed iteration, removal by
//! position and the chain length; lookups are linear scans for key equality.

use crate::linked_list::{self, LinkedList};

/// A key and its value. The key never changes once the pair is stored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pair<V> {
    key: Box<str>,
    pub value: V,
}

impl<V> Pair<V> {
    pub fn new(key: impl Into<Box<str>>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn into_parts(self) -> (String, V) {
        (self.key.into_string(), self.value)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Bucket<V> {
    chain: LinkedList<Pair<V>>,
}

impl<V> Default for Bucket<V> {
    fn default() -> Self {
        Self {
            chain: LinkedList::new(),
        }
    }
}

impl<V> Bucket<V> {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.chain.len()
    }

    pub(crate) fn push(&mut self, pair: Pair<V>) {
        self.chain.push_back(pair);
    }

    /// Position of the first pair whose key equals `key`.
    pub(crate) fn position(&self, key: &str) -> Option<usize> {
        self.chain
            .iter()
            .enumerate()
            .find_map(|(i, p)| (p.key() == key).then_some(i))
    }

    pub(crate) fn get(&self, key: &str) -> Option<&V> {
        self.chain.iter().find(|p| p.key() == key).map(|p| &p.value)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.chain
            .find_mut(|p| p.key() == key)
            .map(|p| &mut p.value)
    }

    /// Unlink and return the pair stored under `key`.
    pub(crate) fn take(&mut self, key: &str) -> Option<Pair<V>> {
        let idx = self.position(key)?;
        self.chain.remove(idx).ok()
    }

    pub(crate) fn iter(&self) -> linked_list::Iter<'_, Pair<V>> {
        self.chain.iter()
    }

    pub(crate) fn for_each_value_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut V),
    {
        self.chain.for_each_mut(|p, _| f(&p.key, &mut p.value));
    }
}

impl<V> IntoIterator for Bucket<V> {
    type Item = Pair<V>;
    type IntoIter = linked_list::IntoIter<Pair<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.chain.into_iter()
    }
}
