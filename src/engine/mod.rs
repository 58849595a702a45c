//! A vertex-centric execution engine.
//!
//! The engine calls [`VertexProgram::update`] once per vertex per iteration
//! and the lifecycle hooks around iterations and windows. Vertices are
//! processed in windows of consecutive ids; two vertices joined by an arc are
//! never updated at the same time, so an update may read its neighbors in
//! place.

pub use context::Context;
pub use engine::{Engine, EngineConfig, RunStats};
pub use scheduler::BitsetScheduler;

use crate::types::{VId, VLabel};
use std::ops::{Range, RangeInclusive};

mod context;
mod engine;
mod scheduler;

/// A vertex handed to an update.
pub trait Vertex {
    type Edge: Edge;
    type Edges: Iterator<Item = Self::Edge>;

    fn id(&self) -> VId;

    fn label(&self) -> VLabel;

    fn set_label(&mut self, vlabel: VLabel);

    fn out_edges(&self) -> Self::Edges;

    fn in_edges(&self) -> Self::Edges;
}

/// An arc seen from one endpoint.
pub trait Edge {
    /// Id of the opposite endpoint.
    fn vertex_id(&self) -> VId;

    fn data(&self) -> VLabel;

    fn set_data(&self, data: VLabel);
}

/// Selective scheduling.
pub trait Scheduler: Sync {
    /// Visit `vid` in the next iteration, and its in- and out-neighbors too if
    /// `also_neighbors` is set.
    fn schedule_vertex(&self, vid: VId, also_neighbors: bool);

    /// Drop `vids` from the vertices still to be visited in this iteration.
    fn unschedule(&self, vids: RangeInclusive<VId>);

    fn is_scheduled(&self, vid: VId) -> bool;
}

/// A program run by the [`Engine`].
///
/// `update` may run on several threads at once; the hooks run on the driving
/// thread between updates.
pub trait VertexProgram: Sync {
    fn update<V: Vertex>(&self, vertex: &mut V, ctx: &Context);

    fn before_iteration(&mut self, _iteration: usize, _ctx: &mut Context) {}

    fn after_iteration(&mut self, _iteration: usize, _ctx: &mut Context) {}

    fn before_window(&mut self, _window: Range<VId>, _ctx: &mut Context) {}

    fn after_window(&mut self, _window: Range<VId>, _ctx: &mut Context) {}
}
