use super::{ConvergenceTracker, MatchResult};
use crate::{
    candidate::CandidateSet,
    engine::{Context, Edge, Scheduler, Vertex, VertexProgram},
    error::{Error, Result},
    pattern::{PatternGraph, PatternVertex},
    types::{VId, VLabel},
};
use log::{debug, info, log_enabled, Level};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// How target vertices get their labels in iteration 0.
#[derive(Debug, Clone, PartialEq)]
pub enum Seeding {
    /// Keep the labels the data graph was loaded with.
    Preset,
    /// Draw every label from `0..num_labels`.
    ///
    /// The label of a vertex only depends on `seed` and its id.
    Random { num_labels: VLabel, seed: u64 },
}

impl Seeding {
    /// Random labels over an alphabet of `num_labels`, or the loaded labels
    /// if `num_labels` is `0`.
    pub fn from_alphabet(num_labels: VLabel, seed: u64) -> Result<Self> {
        let seeding = match num_labels {
            0 => Seeding::Preset,
            _ => Seeding::Random { num_labels, seed },
        };
        seeding.validate()?;
        Ok(seeding)
    }

    /// The label of `vid`, whose current label is `current`.
    ///
    /// Panics on an empty alphabet; see [`validate`](#method.validate).
    pub fn vlabel(&self, vid: VId, current: VLabel) -> VLabel {
        match *self {
            Seeding::Preset => current,
            Seeding::Random { num_labels, seed } => {
                StdRng::seed_from_u64(seed ^ (vid as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15))
                    .gen_range(0..num_labels)
            }
        }
    }

    /// Reject an empty or negative label alphabet.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Seeding::Random { num_labels, .. } if num_labels <= 0 => Err(Error::InvalidArgument(
                format!("label alphabet of size {}", num_labels),
            )),
            _ => Ok(()),
        }
    }
}

/// Computes the graph simulation of a pattern graph by pruning candidate sets.
///
/// Iteration 0 labels the vertices, iteration 1 makes every vertex a candidate
/// of the pattern vertices sharing its label, and every later iteration prunes
/// the candidates failing the child check, until an iteration prunes nothing.
pub struct SimulationProgram<'a> {
    pattern: &'a PatternGraph,
    candidates: CandidateSet,
    seeding: Seeding,
    tracker: ConvergenceTracker,
}

impl<'a> SimulationProgram<'a> {
    pub fn new(pattern: &'a PatternGraph, candidates: CandidateSet, seeding: Seeding) -> Result<Self> {
        seeding.validate()?;
        if candidates.num_patterns() != pattern.num_vertices() {
            return Err(Error::InvalidArgument(format!(
                "candidate sets over {} pattern vertices for a pattern of {}",
                candidates.num_patterns(),
                pattern.num_vertices()
            )));
        }
        if candidates.count() != 0 {
            return Err(Error::InvalidArgument(format!(
                "candidate sets must start empty, got {} candidates",
                candidates.count()
            )));
        }
        Ok(Self {
            pattern,
            candidates,
            seeding,
            tracker: ConvergenceTracker::new(),
        })
    }

    pub fn pattern(&self) -> &PatternGraph {
        self.pattern
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn tracker(&self) -> &ConvergenceTracker {
        &self.tracker
    }

    pub fn result(&self) -> MatchResult {
        MatchResult::new(&self.candidates, self.tracker.converged_at())
    }

    fn seed<V: Vertex>(&self, vertex: &mut V, scheduler: Option<&dyn Scheduler>) {
        let vlabel = self.seeding.vlabel(vertex.id(), vertex.label());
        vertex.set_label(vlabel);
        // Every arc carries the label of its head.
        for edge in vertex.in_edges() {
            edge.set_data(vlabel);
        }
        if let Some(scheduler) = scheduler {
            scheduler.schedule_vertex(vertex.id(), false);
        }
    }

    fn mark_candidates<V: Vertex>(&self, vertex: &V, scheduler: Option<&dyn Scheduler>) {
        let vid = vertex.id();
        if !self.candidates.has_candidate(vid) {
            let vlabel = vertex.label();
            let mut marked = false;
            for p in self.pattern.vertices().iter().filter(|p| p.vlabel() == vlabel) {
                self.candidates.mark(vid, p.id());
                marked = true;
            }
            if marked {
                self.tracker.mark_changed();
            }
        }
        match scheduler {
            Some(scheduler) if self.candidates.has_candidate(vid) => {
                scheduler.schedule_vertex(vid, false)
            }
            _ => {}
        }
    }

    fn refine<V: Vertex>(&self, vertex: &V, scheduler: Option<&dyn Scheduler>) {
        let vid = vertex.id();
        if !self.candidates.has_candidate(vid) {
            return;
        }
        let mut pruned = false;
        for p in self.pattern.vertices() {
            if self.candidates.is_candidate(vid, p.id()) && !self.check_children(vertex, p) {
                self.candidates.prune(vid, p.id());
                pruned = true;
            }
        }
        if pruned {
            self.tracker.mark_changed();
            if let Some(scheduler) = scheduler {
                for edge in vertex.out_edges().chain(vertex.in_edges()) {
                    scheduler.schedule_vertex(edge.vertex_id(), false);
                }
            }
        }
    }

    /// Every out-neighbor of `p` needs an out-neighbor of `vertex` with the
    /// same label that is still a candidate of some pattern vertex.
    fn check_children<V: Vertex>(&self, vertex: &V, p: &PatternVertex) -> bool {
        p.out_neighbors().iter().all(|&q| {
            let vlabel = self.pattern.vlabel(q);
            vertex
                .out_edges()
                .any(|edge| edge.data() == vlabel && self.candidates.has_candidate(edge.vertex_id()))
        })
    }
}

impl<'a> VertexProgram for SimulationProgram<'a> {
    fn update<V: Vertex>(&self, vertex: &mut V, ctx: &Context) {
        let scheduler = ctx.scheduler();
        if let Some(scheduler) = scheduler {
            scheduler.unschedule(vertex.id()..=vertex.id());
        }
        match ctx.iteration() {
            0 => self.seed(vertex, scheduler),
            1 => self.mark_candidates(vertex, scheduler),
            _ => self.refine(vertex, scheduler),
        }
    }

    fn before_iteration(&mut self, iteration: usize, _ctx: &mut Context) {
        self.tracker.begin(iteration);
    }

    fn after_iteration(&mut self, iteration: usize, ctx: &mut Context) {
        if self.tracker.finish(iteration) {
            info!("converged at iteration {}", iteration);
            ctx.set_last_iteration(iteration);
        } else if log_enabled!(Level::Debug) {
            debug!(
                "iteration {}: {} candidates on {} vertices",
                iteration,
                self.candidates.count(),
                self.candidates.num_matched()
            );
        }
    }
}
