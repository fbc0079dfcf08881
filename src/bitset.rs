//! Bitset: fixed number of bits packed into `u64` words.

use crate::error::{ContainerError, Result};
use core::fmt;

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Bitset {
    words: Vec<u64>,
    size: usize,
}

impl Bitset {
    /// All bits start cleared. A size of zero is rejected.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(ContainerError::ZeroSize);
        }
        Ok(Self {
            words: vec![0; size.div_ceil(WORD_BITS)],
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of backing `u64` words.
    pub fn word_len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    fn locate(&self, idx: usize) -> Result<(usize, u64)> {
        if idx >= self.size {
            return Err(ContainerError::out_of_bounds(idx, self.size));
        }
        Ok((idx / WORD_BITS, 1u64 << (idx % WORD_BITS)))
    }

    pub fn get(&self, idx: usize) -> Result<bool> {
        let (w, mask) = self.locate(idx)?;
        Ok(self.words[w] & mask != 0)
    }

    pub fn set_bit(&mut self, idx: usize) -> Result<()> {
        let (w, mask) = self.locate(idx)?;
        self.words[w] |= mask;
        Ok(())
    }

    pub fn reset_bit(&mut self, idx: usize) -> Result<()> {
        let (w, mask) = self.locate(idx)?;
        self.words[w] &= !mask;
        Ok(())
    }

    /// Set every bit in `0..size`; padding bits in the last word stay clear.
    pub fn set_all(&mut self) {
        self.words.fill(u64::MAX);
        let tail = self.size % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last = (1u64 << tail) - 1;
            }
        }
    }

    pub fn reset_all(&mut self) {
        self.words.fill(0);
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(move |i| self.words[i / WORD_BITS] & (1u64 << (i % WORD_BITS)) != 0)
    }

    pub fn to_vec(&self) -> Vec<bool> {
        self.iter().collect()
    }
}

impl fmt::Debug for Bitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: String = self.iter().map(|b| if b { '1' } else { '0' }).collect();
        f.debug_struct("Bitset")
            .field("size", &self.size)
            .field("bits", &bits)
            .finish()
    }
}
