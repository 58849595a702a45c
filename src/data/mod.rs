//! The data graph.

pub use graph::{DataEdge, DataEdges, DataGraph, DataVertex};
pub use info::GraphInfo;
pub use loader::{read_edge_list, read_sqlite};

mod graph;
mod info;
mod loader;
