//! A fixed-capacity bit vector.

use crate::error::{Error, Result};
use std::{
    mem::size_of,
    ops::Range,
    sync::atomic::{AtomicU64, Ordering},
};

const WORD_BITS: usize = 64;

/// A fixed-capacity bit vector.
///
/// The words are atomics, so bits can be flipped through a shared reference.
/// Two threads may touch distinct bits of the same word at the same time;
/// concurrent writes to the *same* bit are left to the caller to avoid.
pub struct BitSet {
    words: Vec<AtomicU64>,
    len: usize,
}

impl BitSet {
    /// Create a cleared bit set of `len` bits.
    pub fn new(len: usize) -> Self {
        let mut words = Vec::with_capacity(num_words(len));
        words.resize_with(num_words(len), || AtomicU64::new(0));
        Self { words, len }
    }

    /// Like [`new`](#method.new), but reports an allocation failure instead of aborting.
    pub fn try_new(len: usize) -> Result<Self> {
        let count = num_words(len);
        let mut words = Vec::new();
        words
            .try_reserve_exact(count)
            .map_err(|_| Error::OutOfMemory(count.saturating_mul(size_of::<AtomicU64>())))?;
        words.resize_with(count, || AtomicU64::new(0));
        Ok(Self { words, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set bit `i`, returns its previous value.
    pub fn set(&self, i: usize) -> bool {
        let (word, mask) = self.locate(i);
        self.words[word].fetch_or(mask, Ordering::Relaxed) & mask != 0
    }

    /// Clear bit `i`, returns its previous value.
    pub fn clear(&self, i: usize) -> bool {
        let (word, mask) = self.locate(i);
        self.words[word].fetch_and(!mask, Ordering::Relaxed) & mask != 0
    }

    pub fn get(&self, i: usize) -> bool {
        let (word, mask) = self.locate(i);
        self.words[word].load(Ordering::Relaxed) & mask != 0
    }

    pub fn any(&self) -> bool {
        self.words.iter().any(|w| w.load(Ordering::Relaxed) != 0)
    }

    /// Returns `true` if any bit in `range` is set.
    pub fn any_in(&self, range: Range<usize>) -> bool {
        assert!(
            range.end <= self.len,
            "range end {} out of bounds {}",
            range.end,
            self.len
        );
        if range.start >= range.end {
            return false;
        }
        let (first, last) = (range.start / WORD_BITS, (range.end - 1) / WORD_BITS);
        (first..=last).any(|word| {
            let mut mask = u64::MAX;
            if word == first {
                mask &= u64::MAX << (range.start % WORD_BITS);
            }
            if word == last {
                mask &= tail_mask(range.end);
            }
            self.words[word].load(Ordering::Relaxed) & mask != 0
        })
    }

    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as usize)
            .sum()
    }

    pub fn set_all(&self) {
        if let Some((last, init)) = self.words.split_last() {
            init.iter().for_each(|w| w.store(u64::MAX, Ordering::Relaxed));
            last.store(tail_mask(self.len), Ordering::Relaxed);
        }
    }

    pub fn clear_all(&self) {
        self.words.iter().for_each(|w| w.store(0, Ordering::Relaxed));
    }

    /// Iterate over the indices of the set bits in increasing order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, w)| {
            let mut bits = w.load(Ordering::Relaxed);
            std::iter::from_fn(move || {
                if bits == 0 {
                    None
                } else {
                    let tz = bits.trailing_zeros() as usize;
                    bits &= bits - 1;
                    Some(i * WORD_BITS + tz)
                }
            })
        })
    }

    /// Number of bytes a bit set of `len` bits occupies.
    pub fn required_bytes(len: usize) -> usize {
        num_words(len) * size_of::<AtomicU64>()
    }

    fn locate(&self, i: usize) -> (usize, u64) {
        assert!(i < self.len, "bit {} out of bounds {}", i, self.len);
        (i / WORD_BITS, 1 << (i % WORD_BITS))
    }
}

impl std::fmt::Debug for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter_ones()).finish()
    }
}

fn num_words(len: usize) -> usize {
    len / WORD_BITS + (len % WORD_BITS != 0) as usize
}

/// Mask of the bits below `end` in the word containing bit `end - 1`.
fn tail_mask(end: usize) -> u64 {
    match end % WORD_BITS {
        0 => u64::MAX,
        r => (1 << r) - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clear_get() {
        let bs = BitSet::new(130);
        assert_eq!(bs.len(), 130);
        assert!(!bs.any());
        assert!(!bs.set(0));
        assert!(bs.set(0));
        assert!(!bs.set(129));
        assert!(bs.get(0));
        assert!(bs.get(129));
        assert!(!bs.get(64));
        assert_eq!(bs.count_ones(), 2);
        assert!(bs.clear(0));
        assert!(!bs.clear(0));
        assert_eq!(bs.iter_ones().collect::<Vec<_>>(), vec![129]);
    }

    #[test]
    fn test_any_in() {
        let bs = BitSet::new(200);
        bs.set(70);
        assert!(bs.any_in(0..200));
        assert!(bs.any_in(64..128));
        assert!(bs.any_in(70..71));
        assert!(!bs.any_in(0..70));
        assert!(!bs.any_in(71..200));
        assert!(!bs.any_in(70..70));
    }

    #[test]
    fn test_set_all_respects_len() {
        let bs = BitSet::new(70);
        bs.set_all();
        assert_eq!(bs.count_ones(), 70);
        assert_eq!(bs.iter_ones().last(), Some(69));
        bs.clear_all();
        assert!(!bs.any());
        let bs = BitSet::new(128);
        bs.set_all();
        assert_eq!(bs.count_ones(), 128);
    }

    #[test]
    fn test_empty() {
        let bs = BitSet::new(0);
        assert!(bs.is_empty());
        bs.set_all();
        assert!(!bs.any());
        assert!(!bs.any_in(0..0));
        assert_eq!(BitSet::required_bytes(0), 0);
        assert_eq!(BitSet::required_bytes(65), 16);
    }

    #[test]
    fn test_try_new() {
        assert_eq!(BitSet::try_new(100).unwrap().len(), 100);
        assert!(matches!(
            BitSet::try_new(usize::MAX),
            Err(Error::OutOfMemory(_))
        ));
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds() {
        BitSet::new(10).set(10);
    }
}
