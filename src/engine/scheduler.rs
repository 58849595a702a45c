use super::Scheduler;
use crate::{bitset::BitSet, data::DataGraph, types::VId};
use std::ops::RangeInclusive;

/// A scheduler keeping two bit sets: the vertices to visit in the current
/// iteration and the vertices scheduled for the next one.
pub struct BitsetScheduler<'a> {
    graph: &'a DataGraph,
    current: BitSet,
    next: BitSet,
}

impl<'a> BitsetScheduler<'a> {
    pub fn new(graph: &'a DataGraph) -> Self {
        Self {
            graph,
            current: BitSet::new(graph.num_vertices()),
            next: BitSet::new(graph.num_vertices()),
        }
    }

    /// Visit every vertex in the current iteration.
    pub fn schedule_all(&self) {
        self.current.set_all();
    }

    /// Start the next iteration.
    pub fn advance(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.next.clear_all();
    }

    /// Number of vertices still to be visited in the current iteration.
    pub fn num_pending(&self) -> usize {
        self.current.count_ones()
    }

    /// Number of vertices scheduled for the next iteration.
    pub fn num_scheduled(&self) -> usize {
        self.next.count_ones()
    }
}

impl<'a> Scheduler for BitsetScheduler<'a> {
    fn schedule_vertex(&self, vid: VId, also_neighbors: bool) {
        self.next.set(vid);
        if also_neighbors {
            for &n in self
                .graph
                .out_neighbors(vid)
                .iter()
                .chain(self.graph.in_neighbors(vid))
            {
                self.next.set(n);
            }
        }
    }

    fn unschedule(&self, vids: RangeInclusive<VId>) {
        for vid in vids {
            self.current.clear(vid);
        }
    }

    fn is_scheduled(&self, vid: VId) -> bool {
        self.current.get(vid)
    }
}
