use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// How many cells a stripe computes between two cancellation checks.
pub const CANCEL_CHECK_INTERVAL_CELLS: usize = 1024;

pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// One-way flag shared between a pool and the jobs it runs.
///
/// Once raised it stays raised.
#[derive(Debug, Clone, Default)]
pub struct KillSignal {
    raised: Arc<AtomicBool>,
}

impl KillSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

impl CancelToken for KillSignal {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.is_raised()
    }
}
