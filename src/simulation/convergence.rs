use std::sync::atomic::{AtomicBool, Ordering};

/// Records whether an iteration changed any candidate set.
#[derive(Debug, Default)]
pub struct ConvergenceTracker {
    changed: AtomicBool,
    converged_at: Option<usize>,
}

impl ConvergenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the flag at the start of `iteration`.
    ///
    /// Iteration 0 only seeds labels and never counts as a fixed point.
    pub fn begin(&mut self, iteration: usize) {
        *self.changed.get_mut() = iteration == 0;
    }

    pub fn mark_changed(&self) {
        self.changed.store(true, Ordering::Relaxed);
    }

    pub fn changed(&self) -> bool {
        self.changed.load(Ordering::Relaxed)
    }

    /// Close `iteration`, returns `true` if it reached the fixed point.
    pub fn finish(&mut self, iteration: usize) -> bool {
        if !*self.changed.get_mut() && self.converged_at.is_none() {
            self.converged_at = Some(iteration);
        }
        self.converged_at.is_some()
    }

    /// The first iteration that changed nothing.
    pub fn converged_at(&self) -> Option<usize> {
        self.converged_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker() {
        let mut tracker = ConvergenceTracker::new();
        tracker.begin(0);
        assert!(!tracker.finish(0));
        tracker.begin(1);
        tracker.mark_changed();
        assert!(tracker.changed());
        assert!(!tracker.finish(1));
        tracker.begin(2);
        assert!(!tracker.changed());
        assert!(tracker.finish(2));
        assert_eq!(tracker.converged_at(), Some(2));
    }
}
