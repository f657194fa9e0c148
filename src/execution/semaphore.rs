use std::sync::{Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// A small, blocking counting semaphore bounding in-flight chunks.
pub struct Semaphore {
    permits: Mutex<usize>,
    cv: Condvar,
}

/// A held permit. Released on drop, so a panicking stage cannot leak it.
pub struct Permit<'a> {
    sem: &'a Semaphore,
    waited: Duration,
}

impl Permit<'_> {
    /// Time spent blocked before the permit was granted (zero if none).
    pub fn waited(&self) -> Duration {
        self.waited
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        self.sem.release();
    }
}

impl Semaphore {
    pub fn new(permits: usize) -> Self {
        assert!(permits > 0, "permits must be > 0");
        Self {
            permits: Mutex::new(permits),
            cv: Condvar::new(),
        }
    }

    /// Acquire one permit, blocking until available.
    pub fn acquire(&self) -> Permit<'_> {
        let start = Instant::now();
        let mut waited = false;
        let mut g = self.permits.lock().unwrap_or_else(PoisonError::into_inner);
        while *g == 0 {
            waited = true;
            g = self.cv.wait(g).unwrap_or_else(PoisonError::into_inner);
        }
        *g -= 1;
        Permit {
            sem: self,
            waited: if waited { start.elapsed() } else { Duration::ZERO },
        }
    }

    fn release(&self) {
        let mut g = self.permits.lock().unwrap_or_else(PoisonError::into_inner);
        *g += 1;
        self.cv.notify_one();
    }
}
