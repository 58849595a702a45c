//! Graph simulation as a vertex program.

pub use convergence::ConvergenceTracker;
pub use kernel::{Seeding, SimulationProgram};
pub use result::MatchResult;

mod convergence;
mod kernel;
mod result;
