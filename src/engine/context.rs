use super::Scheduler;

/// The state of a run as seen by a vertex program.
pub struct Context<'a> {
    iteration: usize,
    scheduler: Option<&'a dyn Scheduler>,
    last_iteration: Option<usize>,
}

impl<'a> Context<'a> {
    pub fn new(iteration: usize, scheduler: Option<&'a dyn Scheduler>) -> Self {
        Self {
            iteration,
            scheduler,
            last_iteration: None,
        }
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// The selective scheduler, `None` when every vertex is visited every iteration.
    pub fn scheduler(&self) -> Option<&'a dyn Scheduler> {
        self.scheduler
    }

    /// Ask the engine to stop once `iteration` has finished.
    pub fn set_last_iteration(&mut self, iteration: usize) {
        self.last_iteration = Some(iteration);
    }

    pub fn last_iteration(&self) -> Option<usize> {
        self.last_iteration
    }
}
