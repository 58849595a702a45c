use super::{BitsetScheduler, Context, Scheduler, VertexProgram};
use crate::{data::DataGraph, types::VId};
use log::{debug, info};
use rayon::prelude::*;
use std::{ops::Range, time::Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Maximum number of iterations.
    pub niters: usize,
    /// Only visit the vertices scheduled by the program.
    pub scheduler: bool,
    /// Number of windows the id space is split into.
    pub windows: usize,
    /// Update the vertices of a window that have no neighbor in it in parallel.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            niters: 1000,
            scheduler: false,
            windows: 1,
            parallel: true,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RunStats {
    pub iterations: usize,
    pub updates: usize,
}

pub struct Engine<'a> {
    graph: &'a DataGraph,
    config: EngineConfig,
}

impl<'a> Engine<'a> {
    pub fn new(graph: &'a DataGraph, config: EngineConfig) -> Self {
        Self { graph, config }
    }

    /// Run `program` until it asks to stop, nothing is scheduled any more, or
    /// `niters` iterations have been done.
    pub fn run<P: VertexProgram>(&self, program: &mut P) -> RunStats {
        let windows = split_windows(self.graph.num_vertices(), self.config.windows);
        let mut scheduler = if self.config.scheduler {
            let scheduler = BitsetScheduler::new(self.graph);
            scheduler.schedule_all();
            Some(scheduler)
        } else {
            None
        };
        let mut stats = RunStats::default();
        for iteration in 0..self.config.niters {
            if let Some(scheduler) = scheduler.as_mut() {
                if iteration > 0 {
                    scheduler.advance();
                }
                if scheduler.num_pending() == 0 {
                    info!("nothing scheduled before iteration {}", iteration);
                    break;
                }
            }
            let time_now = Instant::now();
            let mut ctx = Context::new(
                iteration,
                scheduler.as_ref().map(|s| s as &dyn Scheduler),
            );
            program.before_iteration(iteration, &mut ctx);
            let mut updates = 0;
            for window in &windows {
                program.before_window(window.clone(), &mut ctx);
                updates += self.execute_window(&*program, window.clone(), &ctx);
                program.after_window(window.clone(), &mut ctx);
            }
            program.after_iteration(iteration, &mut ctx);
            stats.iterations += 1;
            stats.updates += updates;
            info!(
                "iteration {}: {} updates in {}ms",
                iteration,
                updates,
                time_now.elapsed().as_millis()
            );
            if ctx.last_iteration().map_or(false, |last| last <= iteration) {
                break;
            }
        }
        stats
    }

    /// Returns the number of updates.
    fn execute_window<P: VertexProgram>(
        &self,
        program: &P,
        window: Range<VId>,
        ctx: &Context,
    ) -> usize {
        let active: Vec<VId> = window
            .clone()
            .filter(|&vid| ctx.scheduler().map_or(true, |s| s.is_scheduled(vid)))
            .collect();
        if !self.config.parallel {
            for &vid in &active {
                program.update(&mut self.graph.vertex(vid), ctx);
            }
            return active.len();
        }
        let (critical, independent): (Vec<VId>, Vec<VId>) = active
            .iter()
            .partition(|&&vid| self.is_critical(vid, &window));
        debug!(
            "window {:?}: {} parallel, {} sequential",
            window,
            independent.len(),
            critical.len()
        );
        independent
            .par_iter()
            .for_each(|&vid| program.update(&mut self.graph.vertex(vid), ctx));
        for &vid in &critical {
            program.update(&mut self.graph.vertex(vid), ctx);
        }
        active.len()
    }

    /// A vertex is critical if one of its neighbors lies in the same window.
    fn is_critical(&self, vid: VId, window: &Range<VId>) -> bool {
        self.graph
            .out_neighbors(vid)
            .iter()
            .chain(self.graph.in_neighbors(vid))
            .any(|&n| n != vid && window.contains(&n))
    }
}

/// Split `0..num_vertices` into at most `count` windows of about the same size.
fn split_windows(num_vertices: usize, count: usize) -> Vec<Range<VId>> {
    let count = count.max(1).min(num_vertices.max(1));
    let size = num_vertices / count + (num_vertices % count != 0) as usize;
    (0..num_vertices)
        .step_by(size.max(1))
        .map(|start| start..(start + size).min(num_vertices))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Edge, Vertex};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_split_windows() {
        assert_eq!(split_windows(0, 3), Vec::<Range<VId>>::new());
        assert_eq!(split_windows(5, 1), vec![0..5]);
        assert_eq!(split_windows(5, 2), vec![0..3, 3..5]);
        assert_eq!(split_windows(2, 8), vec![0..1, 1..2]);
        assert_eq!(split_windows(10, 0), vec![0..10]);
    }

    /// Propagates the minimum label along the arcs of a chain, one hop per
    /// update, and stops when a whole iteration changes nothing.
    struct MinLabel {
        changes: AtomicUsize,
        windows: usize,
    }

    impl VertexProgram for MinLabel {
        fn update<V: Vertex>(&self, vertex: &mut V, ctx: &Context) {
            let min = vertex
                .in_edges()
                .map(|e| e.data())
                .chain(std::iter::once(vertex.label()))
                .min()
                .unwrap();
            if ctx.iteration() == 0 || min < vertex.label() {
                vertex.set_label(min);
                for e in vertex.out_edges() {
                    e.set_data(min);
                    if let Some(scheduler) = ctx.scheduler() {
                        scheduler.schedule_vertex(e.vertex_id(), false);
                    }
                }
                self.changes.fetch_add(1, Ordering::Relaxed);
            }
        }

        fn before_iteration(&mut self, _iteration: usize, _ctx: &mut Context) {
            self.changes.store(0, Ordering::Relaxed);
        }

        fn after_iteration(&mut self, iteration: usize, ctx: &mut Context) {
            if self.changes.load(Ordering::Relaxed) == 0 {
                ctx.set_last_iteration(iteration);
            }
        }

        fn before_window(&mut self, _window: Range<VId>, _ctx: &mut Context) {
            self.windows += 1;
        }
    }

    fn chain() -> DataGraph {
        DataGraph::new(
            vec![(0, 9), (1, 8), (2, 7), (3, 1), (4, 6), (5, 5)],
            vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)],
        )
    }

    fn run(config: EngineConfig) -> (Vec<i64>, RunStats, usize) {
        let graph = chain();
        let mut program = MinLabel {
            changes: AtomicUsize::new(0),
            windows: 0,
        };
        let stats = Engine::new(&graph, config).run(&mut program);
        (
            (0..graph.num_vertices()).map(|v| graph.vlabel(v)).collect(),
            stats,
            program.windows,
        )
    }

    #[test]
    fn test_run_sequential() {
        let (labels, stats, windows) = run(EngineConfig {
            parallel: false,
            ..EngineConfig::default()
        });
        assert_eq!(labels, vec![9, 8, 7, 1, 1, 1]);
        // Asynchronous updates carry the minimum down the chain in one pass.
        assert_eq!(stats.iterations, 2);
        assert_eq!(stats.updates, 12);
        assert_eq!(windows, 2);
    }

    #[test]
    fn test_run_parallel_windows() {
        let (labels, stats, windows) = run(EngineConfig {
            windows: 3,
            ..EngineConfig::default()
        });
        assert_eq!(labels, vec![9, 8, 7, 1, 1, 1]);
        assert_eq!(stats.iterations, 2);
        assert_eq!(windows, 6);
    }

    #[test]
    fn test_run_scheduler() {
        let (labels, stats, _) = run(EngineConfig {
            scheduler: true,
            ..EngineConfig::default()
        });
        assert_eq!(labels, vec![9, 8, 7, 1, 1, 1]);
        assert!(stats.updates < 12);
    }

    #[test]
    fn test_niters() {
        let (_, stats, _) = run(EngineConfig {
            niters: 1,
            ..EngineConfig::default()
        });
        assert_eq!(stats.iterations, 1);
        assert_eq!(stats.updates, 6);
    }
}
