//! Insert-only Bloom filter over integer keys.
//!
//! The filter answers "definitely absent" or "may exist". A key that was
//! added always answers "may exist"; there is no way to remove one.

use std::fmt::Debug;
use std::hash::Hash;

use xxhash_rust::xxh3::{xxh3_64, xxh3_64_with_seed};

use crate::options::DEFAULT_FILTER_BITS;

const WORD_BITS: usize = u64::BITS as usize;
const HASHES: u64 = 3;
const PROBE_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Integer keys usable in front of a membership filter.
pub trait IntKey: Ord + Copy + Hash + Debug {
    /// Lossless 64-bit image of the key. Distinct keys map to distinct images.
    fn to_bits(self) -> u64;
}

macro_rules! impl_int_key {
    ($($t:ty),*) => {
        $(
            impl IntKey for $t {
                #[inline]
                fn to_bits(self) -> u64 {
                    self as u64
                }
            }
        )*
    };
}

impl_int_key!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

#[derive(Clone, PartialEq, Eq)]
pub struct BloomFilter {
    words: Box<[u64]>,
}

impl Debug for BloomFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloomFilter")
            .field("bits", &self.bits())
            .field("ones", &self.count_ones())
            .finish()
    }
}

impl Default for BloomFilter {
    fn default() -> Self {
        Self::new()
    }
}

// double hashing: probe i is h1 + i * h2 (mod m), h2 forced odd
fn probes(key: u64, bits: usize) -> impl Iterator<Item = usize> {
    let bytes = key.to_le_bytes();
    let h1 = xxh3_64(&bytes);
    let h2 = xxh3_64_with_seed(&bytes, PROBE_SEED) | 1;
    let m = bits as u64;

    (0..HASHES).map(move |i| (h1.wrapping_add(i.wrapping_mul(h2)) % m) as usize)
}

impl BloomFilter {
    pub fn new() -> Self {
        Self::with_bits(DEFAULT_FILTER_BITS)
    }

    /// Create an empty filter of at least `bits` bits (minimum 64).
    pub fn with_bits(bits: usize) -> Self {
        let words = ((bits + WORD_BITS - 1) / WORD_BITS).max(1);

        Self {
            words: vec![0; words].into_boxed_slice(),
        }
    }

    /// total number of bits
    pub fn bits(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    pub fn add<K: IntKey>(&mut self, key: K) {
        for bit in probes(key.to_bits(), self.bits()) {
            self.words[bit / WORD_BITS] |= 1u64 << (bit % WORD_BITS);
        }
    }

    /// Return false only if the key was never added.
    pub fn may_exist<K: IntKey>(&self, key: K) -> bool {
        probes(key.to_bits(), self.bits())
            .all(|bit| self.words[bit / WORD_BITS] & (1u64 << (bit % WORD_BITS)) != 0)
    }

    /// Forget every key.
    pub fn reset(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }
}
