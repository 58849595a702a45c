use derive_more::Display;

/// Summary of a data graph: vertices, arcs and distinct labels.
#[derive(Debug, Display, PartialEq)]
#[display(fmt = "{} {} {}", num_vertices, num_arcs, num_vlabels)]
pub struct GraphInfo {
    num_vertices: usize,
    num_arcs: usize,
    num_vlabels: usize,
}

impl GraphInfo {
    pub fn new(num_vertices: usize, num_arcs: usize, num_vlabels: usize) -> Self {
        Self {
            num_vertices,
            num_arcs,
            num_vlabels,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn num_arcs(&self) -> usize {
        self.num_arcs
    }

    pub fn num_vlabels(&self) -> usize {
        self.num_vlabels
    }
}
