//! Deque: ring buffer over a slot array sized by `GrowthPolicy`.
//!
//! Live elements occupy `start..start + len` modulo the slot count. Growing
//! or shrinking copies them into a fresh array starting at slot zero.

use crate::error::Result;
use crate::policy::GrowthPolicy;
use core::fmt;

#[derive(Clone)]
pub struct Deque<T> {
    slots: Vec<Option<T>>,
    start: usize,
    len: usize,
    policy: GrowthPolicy,
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_slots<T>(cap: usize) -> Vec<Option<T>> {
    let mut slots = Vec::with_capacity(cap);
    slots.resize_with(cap, || None);
    slots
}

impl<T> Deque<T> {
    pub fn new() -> Self {
        Self::from_valid_policy(GrowthPolicy::default())
    }

    pub fn with_policy(policy: GrowthPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self::from_valid_policy(policy))
    }

    fn from_valid_policy(policy: GrowthPolicy) -> Self {
        Self {
            slots: empty_slots(policy.initial_capacity),
            start: 0,
            len: 0,
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn cap(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn physical(&self, offset: usize) -> usize {
        (self.start + offset) % self.cap()
    }

    /// Move live elements into a fresh array of `new_cap` slots, front first.
    fn relocate(&mut self, new_cap: usize) {
        log::trace!("deque capacity {} -> {}, len={}", self.cap(), new_cap, self.len);
        let mut next = empty_slots(new_cap);
        for (offset, slot) in next.iter_mut().enumerate().take(self.len) {
            let idx = self.physical(offset);
            *slot = self.slots[idx].take();
        }
        self.slots = next;
        self.start = 0;
    }

    fn grow_if_full(&mut self) {
        if self.len == self.cap() {
            self.relocate(self.policy.grown(self.cap()));
        }
    }

    fn shrink_if_sparse(&mut self) {
        if let Some(new_cap) = self.policy.shrunk(self.len, self.cap()) {
            self.relocate(new_cap);
        }
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.start = 0;
        self.len = 0;
        self.shrink_if_sparse();
    }

    pub fn push_back(&mut self, value: T) {
        self.grow_if_full();
        let idx = self.physical(self.len);
        self.slots[idx] = Some(value);
        self.len += 1;
    }

    pub fn push_front(&mut self, value: T) {
        self.grow_if_full();
        self.start = (self.start + self.cap() - 1) % self.cap();
        self.slots[self.start] = Some(value);
        self.len += 1;
    }

    /// Insert a batch at the front, keeping the batch's own order.
    pub fn prepend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let batch: Vec<T> = values.into_iter().collect();
        for value in batch.into_iter().rev() {
            self.push_front(value);
        }
    }

    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let idx = self.physical(self.len - 1);
        let value = self.slots[idx].take();
        self.len -= 1;
        self.shrink_if_sparse();
        value
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.slots[self.start].take();
        self.start = (self.start + 1) % self.cap();
        self.len -= 1;
        self.shrink_if_sparse();
        value
    }

    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Element at logical position `idx` from the front.
    pub fn get(&self, idx: usize) -> Option<&T> {
        if idx >= self.len {
            return None;
        }
        self.slots[self.physical(idx)].as_ref()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |i| self.slots[self.physical(i)].as_ref())
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let policy = GrowthPolicy::default();
        let items: Vec<T> = iter.into_iter().collect();
        let cap = policy.capacity_for(items.len());
        let len = items.len();
        let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
        slots.resize_with(cap, || None);
        Self {
            slots,
            start: 0,
            len,
            policy,
        }
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.push_back(v);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
