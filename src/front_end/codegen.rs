use crate::{
    error::Result,
    front_end::{Ast, Topology, VName},
    pattern::{Adjacency, PatternGraph},
    types::PId,
};
use std::collections::HashMap;

/// Build the pattern graph of a checked `ast`.
///
/// Vertices are numbered in declaration order.
pub fn codegen(ast: &Ast) -> Result<PatternGraph> {
    let ids: HashMap<VName, PId> = ast
        .vertices()
        .iter()
        .enumerate()
        .map(|(id, &(name, _))| (name, id))
        .collect();
    let adjacency = match ast.topologies().first() {
        Some(Topology::Clique) => Adjacency::Clique,
        Some(Topology::Arcs(arcs)) => {
            Adjacency::Arcs(arcs.iter().map(|(src, dst)| (ids[src], ids[dst])).collect())
        }
        None => Adjacency::Arcs(vec![]),
    };
    PatternGraph::build(ast.vertices().len(), |id| ast.vertices()[id].1, adjacency)
}
