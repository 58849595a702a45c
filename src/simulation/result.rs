use crate::{
    candidate::CandidateSet,
    types::{PId, VId},
};
use itertools::Itertools;

/// The simulation relation: for every target vertex, the pattern vertices it
/// simulates.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    candidates: Vec<Vec<PId>>,
    converged_at: Option<usize>,
}

impl MatchResult {
    pub fn new(candidates: &CandidateSet, converged_at: Option<usize>) -> Self {
        Self {
            candidates: (0..candidates.capacity())
                .map(|vid| candidates.candidates(vid).collect())
                .collect(),
            converged_at,
        }
    }

    /// The pattern vertices `vid` simulates, empty if it simulates none.
    pub fn get(&self, vid: VId) -> &[PId] {
        self.candidates.get(vid).map_or(&[][..], Vec::as_slice)
    }

    /// Number of target vertices.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VId, &[PId])> + '_ {
        self.candidates.iter().map(Vec::as_slice).enumerate()
    }

    /// Number of target vertices simulating at least one pattern vertex.
    pub fn num_matched(&self) -> usize {
        self.candidates.iter().filter(|c| !c.is_empty()).count()
    }

    /// The target vertices simulating `p`.
    pub fn matches_of(&self, p: PId) -> Vec<VId> {
        self.iter()
            .filter(|(_, ps)| ps.contains(&p))
            .map(|(vid, _)| vid)
            .collect()
    }

    /// The first iteration without changes, `None` if the run was cut short.
    pub fn converged_at(&self) -> Option<usize> {
        self.converged_at
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (vid, ps) in self.iter().filter(|(_, ps)| !ps.is_empty()) {
            writeln!(f, "{}: {}", vid, ps.iter().join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result() {
        let cs = CandidateSet::new(4, 3, false).unwrap();
        cs.mark(0, 1);
        cs.mark(2, 0);
        cs.mark(2, 2);
        let result = MatchResult::new(&cs, Some(3));
        assert_eq!(result.len(), 4);
        assert_eq!(result.get(2), &[0, 2]);
        assert_eq!(result.get(1), &[] as &[PId]);
        assert_eq!(result.get(99), &[] as &[PId]);
        assert_eq!(result.num_matched(), 2);
        assert_eq!(result.matches_of(2), vec![2]);
        assert_eq!(result.converged_at(), Some(3));
        assert_eq!(result.to_string(), "0: 1\n2: 0 2\n");
    }
}
