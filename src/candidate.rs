//! Per-vertex candidate sets.

use crate::{
    bitset::BitSet,
    error::{Error, Result},
    types::{PId, VId},
};

/// The candidate sets of all target vertices.
///
/// Logically a `capacity × num_patterns` bit matrix, stored as one contiguous
/// bit array whose rows are padded to whole words, plus an indicator bit per
/// target vertex telling whether its row has any bit set.
///
/// `has_candidate(u)` is `true` iff row `u` is not empty; every mutation keeps
/// this in sync.
pub struct CandidateSet {
    bits: BitSet,
    has_any: BitSet,
    num_patterns: usize,
    stride: usize,
}

impl CandidateSet {
    /// Allocate candidate sets for `capacity` target vertices over `num_patterns`
    /// pattern vertices.
    ///
    /// With `seed_full` every candidate bit starts set.
    pub fn new(capacity: usize, num_patterns: usize, seed_full: bool) -> Result<Self> {
        let stride = row_stride(num_patterns);
        let num_bits = capacity.checked_mul(stride).ok_or(Error::OutOfMemory(usize::MAX))?;
        let (bits, has_any) = (BitSet::try_new(num_bits)?, BitSet::try_new(capacity)?);
        let candidates = Self {
            bits,
            has_any,
            num_patterns,
            stride,
        };
        if seed_full && num_patterns > 0 {
            for u in 0..capacity {
                (0..num_patterns).for_each(|p| {
                    candidates.bits.set(u * stride + p);
                });
            }
            candidates.has_any.set_all();
        }
        Ok(candidates)
    }

    /// Number of bytes [`new`](#method.new) allocates, `None` on overflow.
    pub fn required_bytes(capacity: usize, num_patterns: usize) -> Option<usize> {
        capacity
            .checked_mul(row_stride(num_patterns))
            .map(|bits| BitSet::required_bytes(bits) + BitSet::required_bytes(capacity))
    }

    pub fn capacity(&self) -> usize {
        self.has_any.len()
    }

    pub fn num_patterns(&self) -> usize {
        self.num_patterns
    }

    /// Make `p` a candidate of `u`.
    pub fn mark(&self, u: VId, p: PId) {
        self.bits.set(self.index(u, p));
        self.has_any.set(u);
    }

    /// Remove `p` from the candidates of `u`, returns whether it was a candidate.
    pub fn prune(&self, u: VId, p: PId) -> bool {
        let was_set = self.bits.clear(self.index(u, p));
        if !self.bits.any_in(self.row(u)) {
            self.has_any.clear(u);
        }
        was_set
    }

    pub fn has_candidate(&self, u: VId) -> bool {
        self.has_any.get(u)
    }

    pub fn is_candidate(&self, u: VId, p: PId) -> bool {
        self.bits.get(self.index(u, p))
    }

    /// The candidates of `u` in increasing order.
    pub fn candidates(&self, u: VId) -> impl Iterator<Item = PId> + '_ {
        self.row(u).filter(move |&i| self.bits.get(i)).map(move |i| i % self.stride)
    }

    /// Total number of `(u, p)` candidate pairs.
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of target vertices with at least one candidate.
    pub fn num_matched(&self) -> usize {
        self.has_any.count_ones()
    }

    fn index(&self, u: VId, p: PId) -> usize {
        assert!(
            p < self.num_patterns,
            "pattern vertex {} out of {}",
            p,
            self.num_patterns
        );
        self.row(u).start + p
    }

    fn row(&self, u: VId) -> std::ops::Range<usize> {
        assert!(
            u < self.capacity(),
            "target vertex {} out of capacity {}",
            u,
            self.capacity()
        );
        let base = u * self.stride;
        base..base + self.num_patterns
    }
}

fn row_stride(num_patterns: usize) -> usize {
    BitSet::required_bytes(num_patterns) * 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_prune() {
        let cs = CandidateSet::new(4, 3, false).unwrap();
        assert_eq!(cs.capacity(), 4);
        assert!(!cs.has_candidate(1));
        cs.mark(1, 0);
        cs.mark(1, 2);
        assert!(cs.has_candidate(1));
        assert!(cs.is_candidate(1, 2));
        assert!(!cs.is_candidate(1, 1));
        assert!(!cs.has_candidate(0));
        assert!(!cs.has_candidate(2));
        assert_eq!(cs.candidates(1).collect::<Vec<_>>(), vec![0, 2]);
        assert!(cs.prune(1, 0));
        assert!(cs.has_candidate(1));
        assert!(cs.prune(1, 2));
        assert!(!cs.has_candidate(1));
        assert!(!cs.prune(1, 2));
        assert_eq!(cs.count(), 0);
    }

    #[test]
    fn test_rows_are_independent() {
        let cs = CandidateSet::new(3, 65, false).unwrap();
        cs.mark(0, 64);
        cs.mark(1, 0);
        cs.prune(1, 0);
        assert!(cs.has_candidate(0));
        assert!(!cs.has_candidate(1));
        assert_eq!(cs.candidates(0).collect::<Vec<_>>(), vec![64]);
        assert_eq!(cs.num_matched(), 1);
    }

    #[test]
    fn test_seed_full() {
        let cs = CandidateSet::new(5, 3, true).unwrap();
        assert_eq!(cs.count(), 15);
        assert_eq!(cs.num_matched(), 5);
        cs.prune(4, 0);
        cs.prune(4, 1);
        assert!(cs.has_candidate(4));
        cs.prune(4, 2);
        assert!(!cs.has_candidate(4));
        let cs = CandidateSet::new(5, 0, true).unwrap();
        assert_eq!(cs.num_matched(), 0);
    }

    #[test]
    fn test_out_of_memory() {
        assert!(matches!(
            CandidateSet::new(usize::MAX, 5, false),
            Err(Error::OutOfMemory(_))
        ));
        assert_eq!(CandidateSet::required_bytes(usize::MAX, 5), None);
        assert_eq!(CandidateSet::required_bytes(64, 5), Some(64 * 8 + 8));
    }

    #[test]
    #[should_panic]
    fn test_out_of_capacity() {
        CandidateSet::new(2, 2, false).unwrap().mark(2, 0);
    }

    #[test]
    #[should_panic]
    fn test_out_of_patterns() {
        CandidateSet::new(2, 2, false).unwrap().is_candidate(0, 2);
    }
}
