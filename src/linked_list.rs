//! LinkedList: doubly linked list whose nodes live in a generational arena.
//!
//! Links are `DefaultKey`s into a `SlotMap` rather than pointers. A node is
//! linked exactly when it is present in the arena, so there is no separate
//! "detached" state to check at runtime; unlinking a node removes it from
//! the arena and hands back its value by move.
//!
//! Positional access walks from whichever end of the list is closer.

use crate::error::{ContainerError, Result};
use core::fmt;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

#[derive(Clone)]
pub struct LinkedList<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    fn check_index(&self, idx: usize) -> Result<()> {
        if idx < self.len() {
            Ok(())
        } else {
            Err(ContainerError::out_of_bounds(idx, self.len()))
        }
    }

    /// Key of the node at `idx`; `idx` must already be bounds-checked.
    fn key_at(&self, idx: usize) -> Option<DefaultKey> {
        let len = self.len();
        if idx < len / 2 {
            let mut cur = self.head?;
            for _ in 0..idx {
                cur = self.nodes.get(cur)?.next?;
            }
            Some(cur)
        } else {
            let mut cur = self.tail?;
            for _ in idx + 1..len {
                cur = self.nodes.get(cur)?.prev?;
            }
            Some(cur)
        }
    }

    /// Link a new node directly after `prev`, or at the front when `prev` is `None`.
    fn link_after(&mut self, prev: Option<DefaultKey>, value: T) -> DefaultKey {
        let next = match prev {
            Some(p) => self.nodes[p].next,
            None => self.head,
        };
        let key = self.nodes.insert(Node { value, prev, next });
        match prev {
            Some(p) => self.nodes[p].next = Some(key),
            None => self.head = Some(key),
        }
        match next {
            Some(n) => self.nodes[n].prev = Some(key),
            None => self.tail = Some(key),
        }
        key
    }

    fn unlink(&mut self, key: DefaultKey) -> Option<T> {
        let node = self.nodes.remove(key)?;
        match node.prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.nodes[n].prev = node.prev,
            None => self.tail = node.prev,
        }
        Some(node.value)
    }

    pub fn get(&self, idx: usize) -> Result<&T> {
        self.check_index(idx)?;
        self.key_at(idx)
            .and_then(|k| self.nodes.get(k))
            .map(|n| &n.value)
            .ok_or(ContainerError::out_of_bounds(idx, self.len()))
    }

    pub fn get_mut(&mut self, idx: usize) -> Result<&mut T> {
        self.check_index(idx)?;
        let len = self.len();
        self.key_at(idx)
            .and_then(|k| self.nodes.get_mut(k))
            .map(|n| &mut n.value)
            .ok_or(ContainerError::out_of_bounds(idx, len))
    }

    /// Replace the value at `idx`, returning the previous one.
    pub fn set(&mut self, idx: usize, value: T) -> Result<T> {
        let slot = self.get_mut(idx)?;
        Ok(core::mem::replace(slot, value))
    }

    /// Insert so that `value` ends up at position `idx`; `idx == len` appends.
    pub fn insert(&mut self, idx: usize, value: T) -> Result<()> {
        if idx > self.len() {
            return Err(ContainerError::out_of_bounds(idx, self.len()));
        }
        let prev = if idx == 0 { None } else { self.key_at(idx - 1) };
        self.link_after(prev, value);
        Ok(())
    }

    pub fn remove(&mut self, idx: usize) -> Result<T> {
        self.check_index(idx)?;
        let len = self.len();
        self.key_at(idx)
            .and_then(|k| self.unlink(k))
            .ok_or(ContainerError::out_of_bounds(idx, len))
    }

    pub fn push_front(&mut self, value: T) {
        self.link_after(None, value);
    }

    pub fn push_back(&mut self, value: T) {
        let tail = self.tail;
        self.link_after(tail, value);
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        self.unlink(head)
    }

    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.unlink(tail)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|k| self.nodes.get(k)).map(|n| &n.value)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|k| self.nodes.get(k)).map(|n| &n.value)
    }

    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.position(|v| v == value)
    }

    /// Index of the first element matching `pred`.
    pub fn position<F>(&self, mut pred: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().position(|v| pred(v))
    }

    /// Mutable reference to the first element matching `pred`.
    pub fn find_mut<F>(&mut self, mut pred: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = self.nodes.get(k)?;
            if pred(&node.value) {
                return self.nodes.get_mut(k).map(|n| &mut n.value);
            }
            cur = node.next;
        }
        None
    }

    /// Exchange the values at positions `i` and `j`.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        if i == j {
            return Ok(());
        }
        let len = self.len();
        let (ki, kj) = match (self.key_at(i), self.key_at(j)) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(ContainerError::out_of_bounds(i.max(j), len)),
        };
        if let Some([a, b]) = self.nodes.get_disjoint_mut([ki, kj]) {
            core::mem::swap(&mut a.value, &mut b.value);
        }
        Ok(())
    }

    /// Reverse in place by flipping every node's links.
    pub fn reverse(&mut self) {
        for (_, node) in self.nodes.iter_mut() {
            core::mem::swap(&mut node.prev, &mut node.next);
        }
        core::mem::swap(&mut self.head, &mut self.tail);
    }

    pub fn map<U, F>(&self, mut f: F) -> LinkedList<U>
    where
        F: FnMut(&T, usize) -> U,
    {
        self.iter().enumerate().map(|(i, v)| f(v, i)).collect()
    }

    pub fn filter<F>(&self, mut pred: F) -> LinkedList<T>
    where
        T: Clone,
        F: FnMut(&T, usize) -> bool,
    {
        self.iter()
            .enumerate()
            .filter(|(i, v)| pred(v, *i))
            .map(|(_, v)| v.clone())
            .collect()
    }

    pub fn fold<U, F>(&self, init: U, mut f: F) -> U
    where
        F: FnMut(U, &T, usize) -> U,
    {
        self.iter()
            .enumerate()
            .fold(init, |acc, (i, v)| f(acc, v, i))
    }

    pub fn for_each_indexed<F>(&self, mut f: F)
    where
        F: FnMut(&T, usize),
    {
        for (i, v) in self.iter().enumerate() {
            f(v, i);
        }
    }

    /// Visit every element mutably, front to back.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T, usize),
    {
        let mut cur = self.head;
        let mut i = 0;
        while let Some(k) = cur {
            let Some(node) = self.nodes.get_mut(k) else {
                break;
            };
            f(&mut node.value, i);
            cur = node.next;
            i += 1;
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

/// Front-to-back iterator over shared references.
pub struct Iter<'a, T> {
    nodes: &'a SlotMap<DefaultKey, Node<T>>,
    front: Option<DefaultKey>,
    back: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// Owning iterator; drains the list front to back.
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.push_back(v);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}
