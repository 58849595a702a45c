use crate::types::VLabel;

/// A pattern vertex as written in the description, `u3` is `3`.
pub type VName = usize;

#[derive(Debug, Clone, PartialEq)]
pub enum Topology {
    Arcs(Vec<(VName, VName)>),
    Clique,
}

#[derive(Debug, PartialEq, Default)]
pub struct Ast {
    vertices: Vec<(VName, VLabel)>,
    topologies: Vec<Topology>,
}

impl Ast {
    pub fn new(vertices: Vec<(VName, VLabel)>, topologies: Vec<Topology>) -> Self {
        Self {
            vertices,
            topologies,
        }
    }

    pub fn set_vertices(&mut self, vertices: Vec<(VName, VLabel)>) {
        self.vertices = vertices;
    }

    pub fn add_topology(&mut self, topology: Topology) {
        self.topologies.push(topology);
    }

    pub fn vertices(&self) -> &[(VName, VLabel)] {
        &self.vertices
    }

    pub fn topologies(&self) -> &[Topology] {
        &self.topologies
    }
}
