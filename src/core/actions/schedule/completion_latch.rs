use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Countdown barrier: waiters block until `count_down` has been called
/// once per expected task.
#[derive(Debug)]
pub struct CompletionLatch {
    remaining: Mutex<usize>,
    done: Condvar,
}

impl CompletionLatch {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            remaining: Mutex::new(count),
            done: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.remaining.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Signals one finished task. Extra calls once the count is zero are ignored.
    pub fn count_down(&self) {
        let mut remaining = self.lock();

        if *remaining > 0 {
            *remaining -= 1;

            if *remaining == 0 {
                self.done.notify_all();
            }
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        *self.lock()
    }

    pub fn wait(&self) {
        let remaining = self.lock();

        let _released = self
            .done
            .wait_while(remaining, |remaining| *remaining > 0)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Returns `true` if the count reached zero before `timeout` elapsed.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut remaining = self.lock();

        while *remaining > 0 {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }

            remaining = self
                .done
                .wait_timeout(remaining, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }

        true
    }

    /// A handle that counts the latch down when dropped, including during
    /// unwinding or when its job is discarded unrun.
    #[must_use]
    pub fn guard(self: &Arc<Self>) -> LatchGuard {
        LatchGuard {
            latch: Arc::clone(self),
        }
    }
}

#[derive(Debug)]
pub struct LatchGuard {
    latch: Arc<CompletionLatch>,
}

impl Drop for LatchGuard {
    fn drop(&mut self) {
        self.latch.count_down();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_zero_count_latch_is_open() {
        let latch = CompletionLatch::new(0);

        latch.wait();
        assert!(latch.wait_timeout(Duration::ZERO));
    }

    #[test]
    fn test_wait_returns_after_all_threads_count_down() {
        let latch = Arc::new(CompletionLatch::new(4));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let latch = Arc::clone(&latch);
                thread::spawn(move || latch.count_down())
            })
            .collect();

        latch.wait();
        assert_eq!(latch.remaining(), 0);

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_wait_timeout_expires_while_tasks_remain() {
        let latch = CompletionLatch::new(2);
        latch.count_down();

        assert!(!latch.wait_timeout(Duration::from_millis(10)));
        assert_eq!(latch.remaining(), 1);
    }

    #[test]
    fn test_extra_count_downs_are_ignored() {
        let latch = CompletionLatch::new(1);

        latch.count_down();
        latch.count_down();

        assert_eq!(latch.remaining(), 0);
    }

    #[test]
    fn test_guard_counts_down_on_drop_even_when_unwinding() {
        let latch = Arc::new(CompletionLatch::new(2));
        let clean = latch.guard();
        let panicking = latch.guard();

        drop(clean);
        let result = thread::spawn(move || {
            let _guard = panicking;
            panic!("job failed");
        })
        .join();

        assert!(result.is_err());
        assert!(latch.wait_timeout(Duration::from_secs(1)));
    }
}
