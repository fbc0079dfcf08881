//! Vector: growable array with an explicit, policy-driven capacity.
//!
//! Elements live in a `Vec<T>`; the reported capacity is tracked here so it
//! follows `GrowthPolicy` exactly instead of the allocator's own growth.

use crate::error::{ContainerError, Result};
use crate::policy::GrowthPolicy;
use core::fmt;

#[derive(Clone)]
pub struct Vector<T> {
    data: Vec<T>,
    cap: usize,
    policy: GrowthPolicy,
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Vector<T> {
    pub fn new() -> Self {
        Self::from_valid_policy(GrowthPolicy::default())
    }

    pub fn with_policy(policy: GrowthPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self::from_valid_policy(policy))
    }

    fn from_valid_policy(policy: GrowthPolicy) -> Self {
        let cap = policy.initial_capacity;
        Self {
            data: Vec::with_capacity(cap),
            cap,
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn resize_storage(&mut self, new_cap: usize) {
        log::trace!("vector capacity {} -> {}, len={}", self.cap, new_cap, self.len());
        if new_cap > self.data.capacity() {
            self.data.reserve_exact(new_cap - self.data.len());
        } else {
            self.data.shrink_to(new_cap);
        }
        self.cap = new_cap;
    }

    fn grow_if_full(&mut self) {
        if self.len() == self.cap {
            self.resize_storage(self.policy.grown(self.cap));
        }
    }

    fn shrink_if_sparse(&mut self) {
        if let Some(new_cap) = self.policy.shrunk(self.len(), self.cap) {
            self.resize_storage(new_cap);
        }
    }

    fn check_index(&self, idx: usize) -> Result<()> {
        if idx < self.len() {
            Ok(())
        } else {
            Err(ContainerError::out_of_bounds(idx, self.len()))
        }
    }

    pub fn get(&self, idx: usize) -> Result<&T> {
        self.data
            .get(idx)
            .ok_or(ContainerError::out_of_bounds(idx, self.len()))
    }

    pub fn get_mut(&mut self, idx: usize) -> Result<&mut T> {
        let len = self.len();
        self.data
            .get_mut(idx)
            .ok_or(ContainerError::out_of_bounds(idx, len))
    }

    /// Replace the element at `idx`, returning the previous one.
    pub fn set(&mut self, idx: usize, value: T) -> Result<T> {
        let slot = self.get_mut(idx)?;
        Ok(core::mem::replace(slot, value))
    }

    /// Truncate to empty; storage may be cut back per the growth policy.
    pub fn clear(&mut self) {
        self.data.clear();
        self.shrink_if_sparse();
    }

    pub fn insert(&mut self, idx: usize, value: T) -> Result<()> {
        if idx > self.len() {
            return Err(ContainerError::out_of_bounds(idx, self.len()));
        }
        self.grow_if_full();
        self.data.insert(idx, value);
        Ok(())
    }

    pub fn remove(&mut self, idx: usize) -> Result<T> {
        self.check_index(idx)?;
        let value = self.data.remove(idx);
        self.shrink_if_sparse();
        Ok(value)
    }

    pub fn push_back(&mut self, value: T) {
        self.grow_if_full();
        self.data.push(value);
    }

    pub fn push_front(&mut self, value: T) {
        self.grow_if_full();
        self.data.insert(0, value);
    }

    pub fn pop_back(&mut self) -> Option<T> {
        let value = self.data.pop()?;
        self.shrink_if_sparse();
        Some(value)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.remove(0).ok()
    }

    pub fn front(&self) -> Option<&T> {
        self.data.first()
    }

    pub fn back(&self) -> Option<&T> {
        self.data.last()
    }

    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.data.iter().position(|v| v == value)
    }

    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        self.data.swap(i, j);
        Ok(())
    }

    pub fn reverse(&mut self) {
        self.data.reverse();
    }

    pub fn map<U, F>(&self, mut f: F) -> Vector<U>
    where
        F: FnMut(&T, usize) -> U,
    {
        self.iter().enumerate().map(|(i, v)| f(v, i)).collect()
    }

    pub fn filter<F>(&self, mut pred: F) -> Vector<T>
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

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let policy = GrowthPolicy::default();
        let data: Vec<T> = iter.into_iter().collect();
        let cap = policy.capacity_for(data.len());
        let mut v = Self {
            data,
            cap,
            policy,
        };
        v.data.reserve_exact(cap - v.data.len());
        v
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.push_back(v);
        }
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}
