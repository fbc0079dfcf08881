//! Resize policies for the hash map and the array-backed containers.

use crate::error::{ContainerError, Result};

pub const DEFAULT_INITIAL_CAPACITY: usize = 100;
pub const DEFAULT_SHRINK_MIN_CAPACITY: usize = 1000;
pub const DEFAULT_BUCKET_CAPACITY: usize = 10;
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;
pub const DEFAULT_SHRINK_FACTOR: f64 = 0.25;
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Grow/shrink thresholds for `ChainedHashMap`.
///
/// A grow doubles (by `growth_factor`) the bucket count when the load ratio
/// exceeds `load_factor` or the bucket that just received a pair holds more
/// than `bucket_capacity` pairs. A shrink divides the bucket count by
/// `growth_factor` once it exceeds `shrink_min_capacity` and the load ratio
/// drops below `shrink_factor`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResizePolicy {
    pub initial_capacity: usize,
    pub load_factor: f64,
    pub shrink_factor: f64,
    pub shrink_min_capacity: usize,
    pub bucket_capacity: usize,
    pub growth_factor: usize,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            shrink_factor: DEFAULT_SHRINK_FACTOR,
            shrink_min_capacity: DEFAULT_SHRINK_MIN_CAPACITY,
            bucket_capacity: DEFAULT_BUCKET_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl ResizePolicy {
    pub fn with_initial_capacity(mut self, cap: usize) -> Self {
        self.initial_capacity = cap;
        self
    }

    pub fn with_load_factor(mut self, f: f64) -> Self {
        self.load_factor = f;
        self
    }

    pub fn with_shrink_factor(mut self, f: f64) -> Self {
        self.shrink_factor = f;
        self
    }

    pub fn with_shrink_min_capacity(mut self, cap: usize) -> Self {
        self.shrink_min_capacity = cap;
        self
    }

    pub fn with_bucket_capacity(mut self, cap: usize) -> Self {
        self.bucket_capacity = cap;
        self
    }

    pub fn with_growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = factor;
        self
    }

    /// Reject policies under which the map could not keep its invariants,
    /// e.g. a zero bucket count after a shrink.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason| Err(ContainerError::InvalidPolicy { reason });
        if self.initial_capacity == 0 {
            return invalid("initial capacity must be positive");
        }
        if self.bucket_capacity == 0 {
            return invalid("bucket capacity must be positive");
        }
        if self.growth_factor < 2 {
            return invalid("growth factor must be at least 2");
        }
        if !(self.load_factor.is_finite() && self.load_factor > 0.0) {
            return invalid("load factor must be positive and finite");
        }
        if !(self.shrink_factor >= 0.0 && self.shrink_factor < self.load_factor) {
            return invalid("shrink factor must be in [0, load factor)");
        }
        // After a shrink the load ratio can approach shrink_factor * growth_factor.
        if self.shrink_factor * self.growth_factor as f64 >= self.load_factor {
            return invalid("shrink factor times growth factor must be below the load factor");
        }
        if self.shrink_min_capacity < self.growth_factor {
            return invalid("shrink minimum capacity must be at least the growth factor");
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn should_grow(&self, len: usize, cap: usize, bucket_len: usize) -> bool {
        len as f64 / cap as f64 > self.load_factor || bucket_len > self.bucket_capacity
    }

    #[inline]
    pub(crate) fn should_shrink(&self, len: usize, cap: usize) -> bool {
        cap > self.shrink_min_capacity && (len as f64 / cap as f64) < self.shrink_factor
    }

    #[inline]
    pub(crate) fn grown(&self, cap: usize) -> usize {
        cap.saturating_mul(self.growth_factor)
    }

    #[inline]
    pub(crate) fn shrunk(&self, cap: usize) -> usize {
        (cap / self.growth_factor).max(1)
    }
}

/// Capacity rules for `Vector` and `Deque`.
///
/// Capacities are kept at multiples of `initial_capacity`. Storage grows by
/// `growth_factor` when full, and is cut back to roughly twice the length
/// once it is both large and sparse.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrowthPolicy {
    pub initial_capacity: usize,
    pub shrink_min_capacity: usize,
    pub shrink_factor: f64,
    pub growth_factor: usize,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            shrink_min_capacity: DEFAULT_SHRINK_MIN_CAPACITY,
            shrink_factor: DEFAULT_SHRINK_FACTOR,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl GrowthPolicy {
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason| Err(ContainerError::InvalidPolicy { reason });
        if self.initial_capacity == 0 {
            return invalid("initial capacity must be positive");
        }
        if self.growth_factor < 2 {
            return invalid("growth factor must be at least 2");
        }
        if !(self.shrink_factor >= 0.0 && self.shrink_factor < 1.0) {
            return invalid("shrink factor must be in [0, 1)");
        }
        Ok(())
    }

    /// Smallest multiple of `initial_capacity` that holds `len` elements,
    /// never less than `initial_capacity`.
    pub(crate) fn capacity_for(&self, len: usize) -> usize {
        let unit = self.initial_capacity;
        if len <= unit {
            unit
        } else {
            len.div_ceil(unit) * unit
        }
    }

    #[inline]
    pub(crate) fn grown(&self, cap: usize) -> usize {
        cap.saturating_mul(self.growth_factor)
    }

    /// New capacity after a removal, or `None` when no shrink is due.
    pub(crate) fn shrunk(&self, len: usize, cap: usize) -> Option<usize> {
        if cap > self.shrink_min_capacity && (len as f64) < cap as f64 * self.shrink_factor {
            let base = self.initial_capacity.max(len.saturating_mul(self.growth_factor));
            Some(self.capacity_for(base))
        } else {
            None
        }
    }
}
