use std::fmt;
use std::time::Duration;

/// What one worker did during a schedule run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerReport {
    pub worker: usize,
    pub completed: usize,
    pub failed: usize,
    pub interrupted: usize,
    /// Time spent inside tasks, or the worker's whole run for static striping.
    pub busy: Duration,
}

impl WorkerReport {
    #[must_use]
    pub fn new(worker: usize) -> Self {
        Self {
            worker,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn tasks_seen(&self) -> usize {
        self.completed + self.failed + self.interrupted
    }
}

impl fmt::Display for WorkerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Thread_{:02} ready: {} tasks completed in {} ms",
            self.worker,
            self.completed,
            self.busy.as_millis()
        )?;

        if self.failed > 0 || self.interrupted > 0 {
            write!(f, " ({} failed, {} interrupted)", self.failed, self.interrupted)?;
        }

        Ok(())
    }
}
