use crate::{
    data::GraphInfo,
    engine::{Edge, Vertex},
    types::{VId, VLabel},
};
use rayon::slice::ParallelSliceMut;
use std::{
    collections::HashSet,
    sync::atomic::{AtomicI64, Ordering},
};

/// The in-memory data graph.
///
/// Arcs are stored twice in CSR form, once grouped by source and once grouped
/// by destination. Both views of an arc share a single payload slot.
///
/// Vertex labels and arc payloads are atomics, so the engine may update
/// non-adjacent vertices from several threads through a shared reference.
pub struct DataGraph {
    vlabels: Vec<AtomicI64>,
    out_offsets: Vec<usize>,
    out_targets: Vec<VId>,
    in_offsets: Vec<usize>,
    in_sources: Vec<VId>,
    in_eids: Vec<usize>,
    edata: Vec<AtomicI64>,
}

impl DataGraph {
    /// Build a data graph from labeled vertices and `(src, dst)` arcs.
    ///
    /// The id space is `0..=max_id` over both inputs; vertices that only
    /// appear in `arcs` are labeled `0`.
    pub fn new<V, A>(vertices: V, arcs: A) -> Self
    where
        V: IntoIterator<Item = (VId, VLabel)>,
        A: IntoIterator<Item = (VId, VId)>,
    {
        let vertices: Vec<_> = vertices.into_iter().collect();
        let mut arcs: Vec<_> = arcs.into_iter().collect();
        let num_vertices = vertices
            .iter()
            .map(|&(vid, _)| vid + 1)
            .chain(arcs.iter().map(|&(src, dst)| src.max(dst) + 1))
            .max()
            .unwrap_or(0);
        let mut vlabels = vec![0; num_vertices];
        for (vid, vlabel) in vertices {
            vlabels[vid] = vlabel;
        }
        arcs.par_sort_unstable();
        let out_offsets = offsets(num_vertices, arcs.iter().map(|&(src, _)| src));
        let out_targets = arcs.iter().map(|&(_, dst)| dst).collect();
        let mut by_dst: Vec<_> = arcs
            .iter()
            .enumerate()
            .map(|(eid, &(src, dst))| (dst, src, eid))
            .collect();
        by_dst.par_sort_unstable();
        let in_offsets = offsets(num_vertices, by_dst.iter().map(|&(dst, _, _)| dst));
        Self {
            vlabels: vlabels.into_iter().map(AtomicI64::new).collect(),
            out_offsets,
            out_targets,
            in_offsets,
            in_sources: by_dst.iter().map(|&(_, src, _)| src).collect(),
            in_eids: by_dst.iter().map(|&(_, _, eid)| eid).collect(),
            edata: arcs.iter().map(|_| AtomicI64::new(0)).collect(),
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vlabels.len()
    }

    pub fn num_arcs(&self) -> usize {
        self.out_targets.len()
    }

    pub fn vlabel(&self, vid: VId) -> VLabel {
        self.vlabels[vid].load(Ordering::Relaxed)
    }

    pub fn out_neighbors(&self, vid: VId) -> &[VId] {
        &self.out_targets[self.out_offsets[vid]..self.out_offsets[vid + 1]]
    }

    pub fn in_neighbors(&self, vid: VId) -> &[VId] {
        &self.in_sources[self.in_offsets[vid]..self.in_offsets[vid + 1]]
    }

    /// A handle on `vid` for the duration of one update.
    pub fn vertex(&self, vid: VId) -> DataVertex<'_> {
        assert!(vid < self.num_vertices(), "vertex {} out of range", vid);
        DataVertex { graph: self, vid }
    }

    pub fn info(&self) -> GraphInfo {
        let vlabels: HashSet<_> = (0..self.num_vertices()).map(|v| self.vlabel(v)).collect();
        GraphInfo::new(self.num_vertices(), self.num_arcs(), vlabels.len())
    }
}

fn offsets<I>(num_vertices: usize, sorted_keys: I) -> Vec<usize>
where
    I: IntoIterator<Item = VId>,
{
    let mut offsets = vec![0; num_vertices + 1];
    for key in sorted_keys {
        offsets[key + 1] += 1;
    }
    for i in 0..num_vertices {
        offsets[i + 1] += offsets[i];
    }
    offsets
}

pub struct DataVertex<'a> {
    graph: &'a DataGraph,
    vid: VId,
}

impl<'a> Vertex for DataVertex<'a> {
    type Edge = DataEdge<'a>;
    type Edges = DataEdges<'a>;

    fn id(&self) -> VId {
        self.vid
    }

    fn label(&self) -> VLabel {
        self.graph.vlabel(self.vid)
    }

    fn set_label(&mut self, vlabel: VLabel) {
        self.graph.vlabels[self.vid].store(vlabel, Ordering::Relaxed);
    }

    fn out_edges(&self) -> Self::Edges {
        let range = self.graph.out_offsets[self.vid]..self.graph.out_offsets[self.vid + 1];
        DataEdges {
            graph: self.graph,
            range,
            inbound: false,
        }
    }

    fn in_edges(&self) -> Self::Edges {
        let range = self.graph.in_offsets[self.vid]..self.graph.in_offsets[self.vid + 1];
        DataEdges {
            graph: self.graph,
            range,
            inbound: true,
        }
    }
}

/// An arc seen from one of its endpoints.
pub struct DataEdge<'a> {
    graph: &'a DataGraph,
    neighbor: VId,
    eid: usize,
}

impl<'a> Edge for DataEdge<'a> {
    fn vertex_id(&self) -> VId {
        self.neighbor
    }

    fn data(&self) -> VLabel {
        self.graph.edata[self.eid].load(Ordering::Relaxed)
    }

    fn set_data(&self, data: VLabel) {
        self.graph.edata[self.eid].store(data, Ordering::Relaxed);
    }
}

pub struct DataEdges<'a> {
    graph: &'a DataGraph,
    range: std::ops::Range<usize>,
    inbound: bool,
}

impl<'a> Iterator for DataEdges<'a> {
    type Item = DataEdge<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(|pos| {
            let (neighbor, eid) = if self.inbound {
                (self.graph.in_sources[pos], self.graph.in_eids[pos])
            } else {
                (self.graph.out_targets[pos], pos)
            };
            DataEdge {
                graph: self.graph,
                neighbor,
                eid,
            }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<'a> ExactSizeIterator for DataEdges<'a> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_data_graph() -> DataGraph {
        DataGraph::new(
            vec![(0, 10), (1, 11), (2, 12)],
            vec![(2, 0), (0, 1), (0, 2), (1, 2), (4, 0)],
        )
    }

    #[test]
    fn test_topology() {
        let g = create_data_graph();
        assert_eq!(g.num_vertices(), 5);
        assert_eq!(g.num_arcs(), 5);
        assert_eq!(g.out_neighbors(0), &[1, 2]);
        assert_eq!(g.in_neighbors(0), &[2, 4]);
        assert_eq!(g.in_neighbors(2), &[0, 1]);
        assert_eq!(g.out_neighbors(3), &[] as &[VId]);
        assert_eq!(g.vlabel(2), 12);
        assert_eq!(g.vlabel(4), 0);
        assert_eq!(g.info().to_string(), "5 5 4");
        assert_eq!(g.info().num_vlabels(), 4);
    }

    #[test]
    fn test_shared_payload() {
        let g = create_data_graph();
        let mut v2 = g.vertex(2);
        v2.set_label(42);
        for e in v2.in_edges() {
            e.set_data(v2.label());
        }
        let v0 = g.vertex(0);
        let out: Vec<_> = v0.out_edges().map(|e| (e.vertex_id(), e.data())).collect();
        assert_eq!(out, vec![(1, 0), (2, 42)]);
        let v1 = g.vertex(1);
        assert_eq!(
            v1.out_edges().map(|e| e.data()).collect::<Vec<_>>(),
            vec![42]
        );
        assert_eq!(v2.in_edges().len(), 2);
        assert_eq!(v2.out_edges().len(), 1);
    }

    #[test]
    fn test_empty() {
        let g = DataGraph::new(vec![], vec![]);
        assert_eq!(g.num_vertices(), 0);
        assert_eq!(g.num_arcs(), 0);
    }
}
