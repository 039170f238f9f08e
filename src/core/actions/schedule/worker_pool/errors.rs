use crate::core::actions::schedule::worker_pool::pool::PoolState;
use std::error::Error;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("pool is closed to new jobs (state: {state})")]
    Closed { state: PoolState },
    #[error("pool queue is full (capacity {capacity})")]
    QueueFull { capacity: usize },
    #[error("failed to spawn worker {worker}: {source}")]
    Spawn {
        worker: usize,
        #[source]
        source: io::Error,
    },
}

/// How a pool job can end other than successfully.
#[derive(Debug, Error)]
pub enum JobError {
    /// The job saw the pool's kill signal and gave up part way through.
    #[error("job interrupted by pool kill")]
    Interrupted,
    #[error(transparent)]
    Failed(Box<dyn Error + Send + Sync>),
}
