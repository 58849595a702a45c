use crate::{
    candidate::CandidateSet,
    data::DataGraph,
    engine::{Engine, EngineConfig},
    error::{Error, Result},
    pattern::PatternGraph,
    simulation::{MatchResult, Seeding, SimulationProgram},
};
use log::{info, warn};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub engine: EngineConfig,
    pub seeding: Seeding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            seeding: Seeding::Preset,
        }
    }
}

/// One simulation of `pattern` over `data`.
pub struct Task<'a> {
    data: &'a DataGraph,
    pattern: &'a PatternGraph,
    config: Config,
}

impl<'a> Task<'a> {
    pub fn new(data: &'a DataGraph, pattern: &'a PatternGraph, config: Config) -> Self {
        Self {
            data,
            pattern,
            config,
        }
    }

    pub fn run(&self) -> Result<MatchResult> {
        let start_time = Instant::now();
        let info = self.data.info();
        info!(
            "data graph: {} vertices, {} arcs, {} labels",
            info.num_vertices(),
            info.num_arcs(),
            info.num_vlabels()
        );
        let (capacity, num_patterns) = (self.data.num_vertices(), self.pattern.num_vertices());
        let required = CandidateSet::required_bytes(capacity, num_patterns)
            .ok_or(Error::OutOfMemory(usize::MAX))?;
        check_available_memory(required)?;
        let candidates = CandidateSet::new(capacity, num_patterns, false)?;
        let mut program =
            SimulationProgram::new(self.pattern, candidates, self.config.seeding.clone())?;
        let time_now = Instant::now();
        let stats = Engine::new(self.data, self.config.engine.clone()).run(&mut program);
        info!(
            "run_time: {} ({} iterations, {} updates)",
            time_now.elapsed().as_millis(),
            stats.iterations,
            stats.updates
        );
        let result = program.result();
        match result.converged_at() {
            Some(iteration) => info!("fixed point at iteration {}", iteration),
            None => warn!("no fixed point within {} iterations", stats.iterations),
        }
        info!(
            "{} of {} vertices matched",
            result.num_matched(),
            result.len()
        );
        info!("total_time: {}", start_time.elapsed().as_millis());
        Ok(result)
    }
}

fn check_available_memory(required: usize) -> Result<()> {
    match sys_info::mem_info() {
        Ok(mem) if (required as u64) > mem.avail.saturating_mul(1024) => {
            Err(Error::OutOfMemory(required))
        }
        Ok(_) => Ok(()),
        Err(e) => {
            warn!("cannot read available memory: {}", e);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VLabel;

    #[test]
    fn test_run() {
        let data = DataGraph::new(
            vec![(0, 1), (1, 2), (2, 1)],
            vec![(0, 1), (1, 0), (1, 2), (2, 1)],
        );
        let pattern = PatternGraph::clique(2, |id| id as VLabel + 1).unwrap();
        let result = Task::new(&data, &pattern, Config::default()).run().unwrap();
        assert_eq!(result.get(0), &[0]);
        assert_eq!(result.get(1), &[1]);
        assert_eq!(result.get(2), &[0]);
        assert_eq!(result.converged_at(), Some(2));
    }

    #[test]
    fn test_invalid_seeding() {
        let data = DataGraph::new(vec![], vec![(0, 1)]);
        let pattern = PatternGraph::clique(2, |_| 0).unwrap();
        let config = Config {
            seeding: Seeding::Random {
                num_labels: -3,
                seed: 1,
            },
            ..Config::default()
        };
        assert!(matches!(
            Task::new(&data, &pattern, config).run(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_out_of_memory() {
        assert_eq!(
            check_available_memory(usize::MAX),
            Err(Error::OutOfMemory(usize::MAX))
        );
        assert_eq!(check_available_memory(0), Ok(()));
    }
}
