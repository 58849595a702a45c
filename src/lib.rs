//! Vertex-centric graph simulation.
//!
//! A target vertex simulates a pattern vertex if their labels agree and every
//! out-neighbor of the pattern vertex is simulated by some out-neighbor of
//! the target vertex. The maximal such relation is computed by pruning
//! per-vertex candidate sets until a fixed point is reached.

pub mod bitset;
pub mod candidate;
pub mod data;
pub mod engine;
pub mod error;
pub mod front_end;
pub mod pattern;
pub mod simulation;
pub mod task;
pub mod types;
