use crate::{
    error::{Error, Result},
    types::{PId, VLabel},
};
use itertools::Itertools;
use std::collections::BTreeSet;

/// How the arcs of a pattern graph are laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum Adjacency {
    /// An arc between every ordered pair of distinct vertices.
    Clique,
    /// An explicit list of `(src, dst)` arcs.
    Arcs(Vec<(PId, PId)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternVertex {
    id: PId,
    vlabel: VLabel,
    out_neighbors: Vec<PId>,
}

impl PatternVertex {
    pub fn id(&self) -> PId {
        self.id
    }

    pub fn vlabel(&self) -> VLabel {
        self.vlabel
    }

    /// The out-neighbors in increasing order.
    pub fn out_neighbors(&self) -> &[PId] {
        &self.out_neighbors
    }

    pub fn out_deg(&self) -> usize {
        self.out_neighbors.len()
    }
}

/// A small labeled directed graph.
///
/// Vertices are numbered `0..num_vertices()`. Once built, the graph cannot
/// be modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGraph {
    vertices: Vec<PatternVertex>,
    num_arcs: usize,
}

impl PatternGraph {
    /// Build a pattern graph of `num_vertices` vertices labeled by `vlabel_of`.
    ///
    /// Duplicate arcs are collapsed.
    pub fn build<F>(num_vertices: usize, mut vlabel_of: F, adjacency: Adjacency) -> Result<Self>
    where
        F: FnMut(PId) -> VLabel,
    {
        if num_vertices == 0 {
            return Err(Error::InvalidArgument(String::from(
                "a pattern graph needs at least one vertex",
            )));
        }
        let mut out_neighbors = vec![BTreeSet::new(); num_vertices];
        match adjacency {
            Adjacency::Clique => {
                for (src, dst) in (0..num_vertices).cartesian_product(0..num_vertices) {
                    if src != dst {
                        out_neighbors[src].insert(dst);
                    }
                }
            }
            Adjacency::Arcs(arcs) => {
                for (src, dst) in arcs {
                    if src >= num_vertices || dst >= num_vertices {
                        return Err(Error::InvalidArgument(format!(
                            "arc ({}, {}) out of {} vertices",
                            src, dst, num_vertices
                        )));
                    }
                    out_neighbors[src].insert(dst);
                }
            }
        }
        let vertices: Vec<_> = out_neighbors
            .into_iter()
            .enumerate()
            .map(|(id, neighbors)| PatternVertex {
                id,
                vlabel: vlabel_of(id),
                out_neighbors: neighbors.into_iter().collect(),
            })
            .collect();
        let num_arcs = vertices.iter().map(|v| v.out_deg()).sum();
        Ok(Self { vertices, num_arcs })
    }

    /// Shorthand for a clique pattern.
    pub fn clique<F>(num_vertices: usize, vlabel_of: F) -> Result<Self>
    where
        F: FnMut(PId) -> VLabel,
    {
        Self::build(num_vertices, vlabel_of, Adjacency::Clique)
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_arcs(&self) -> usize {
        self.num_arcs
    }

    pub fn vertices(&self) -> &[PatternVertex] {
        &self.vertices
    }

    pub fn vertex(&self, id: PId) -> &PatternVertex {
        &self.vertices[id]
    }

    pub fn vlabel(&self, id: PId) -> VLabel {
        self.vertices[id].vlabel
    }

    pub fn out_neighbors(&self, id: PId) -> &[PId] {
        &self.vertices[id].out_neighbors
    }

    pub fn out_deg(&self, id: PId) -> usize {
        self.vertices[id].out_deg()
    }

    pub fn arcs(&self) -> Vec<(PId, PId)> {
        self.vertices
            .iter()
            .flat_map(|v| v.out_neighbors.iter().map(move |&n| (v.id, n)))
            .collect()
    }
}

impl std::fmt::Display for PatternGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "num_vertices: {}, num_arcs: {}",
            self.num_vertices(),
            self.num_arcs()
        )?;
        for v in &self.vertices {
            writeln!(
                f,
                "u{} ({}) -> [{}]",
                v.id,
                v.vlabel,
                v.out_neighbors.iter().map(|n| format!("u{}", n)).join(", ")
            )?;
        }
        Ok(())
    }
}
