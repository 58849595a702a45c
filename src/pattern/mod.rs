//! The pattern graph.

pub use graph::{Adjacency, PatternGraph, PatternVertex};

mod graph;
