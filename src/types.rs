//! Various types related to graph simulation.

/// The target vertex id type.
pub type VId = usize;

/// The pattern vertex id type.
pub type PId = usize;

/// The vertex label type.
///
/// Edge payloads share this type, since an edge carries the label of its head.
pub type VLabel = i64;
