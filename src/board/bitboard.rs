//! Bitboard over the 61 playable cells

use super::{Coord, NUM_CELLS};

const MASK: u64 = (1u64 << NUM_CELLS) - 1;

/// One bit per cell, indexed by [`Coord::index`]. Fits a single `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Set the bit at a cell index
    #[inline]
    pub fn set(&mut self, idx: usize) {
        self.bits |= 1u64 << idx;
    }

    /// Clear the bit at a cell index
    #[inline]
    pub fn clear(&mut self, idx: usize) {
        self.bits &= !(1u64 << idx);
    }

    /// Check if bit is set at a cell index
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        (self.bits >> idx) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        (self.bits & MASK).count_ones()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits & MASK == 0
    }

    #[inline]
    pub fn intersects(&self, other: &Bitboard) -> bool {
        self.bits & other.bits != 0
    }

    /// Iterate over occupied cells in row-major order
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter { bits: self.bits & MASK }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: u64,
}

impl Iterator for BitboardIter {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        // Clear the bit we just found
        self.bits &= self.bits - 1;
        Some(Coord::from_index(idx))
    }
}
