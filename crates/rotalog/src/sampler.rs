//! Event sampling

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::level::Level;

/// Decides whether an event at `level` is kept
pub trait Sampler: Send + Sync {
    fn sample(&self, level: Level) -> bool;
}

/// Keeps the first event and then every Nth one. N of 0 drops everything.
#[derive(Debug)]
pub struct BasicSampler {
    n: u32,
    counter: AtomicU32,
}

impl BasicSampler {
    pub fn new(n: u32) -> Self {
        Self {
            n,
            counter: AtomicU32::new(0),
        }
    }
}

impl Sampler for BasicSampler {
    fn sample(&self, _level: Level) -> bool {
        match self.n {
            0 => false,
            1 => true,
            n => self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1) % n == 1,
        }
    }
}

struct BurstState {
    reset_at: Option<Instant>,
    count: u32,
}

/// Lets `burst` events through per `period`; past that, defers to `next`
/// (or drops the event when there is none).
pub struct BurstSampler {
    burst: u32,
    period: Duration,
    next: Option<Arc<dyn Sampler>>,
    state: Mutex<BurstState>,
}

impl BurstSampler {
    pub fn new(burst: u32, period: Duration) -> Self {
        Self {
            burst,
            period,
            next: None,
            state: Mutex::new(BurstState {
                reset_at: None,
                count: 0,
            }),
        }
    }

    pub fn with_next(mut self, next: impl Sampler + 'static) -> Self {
        self.next = Some(Arc::new(next));
        self
    }

    fn in_burst(&self) -> bool {
        if self.burst == 0 || self.period.is_zero() {
            return false;
        }

        let now = Instant::now();
        let mut state = self.state.lock();
        if state.reset_at.map_or(true, |reset| now >= reset) {
            state.reset_at = Some(now + self.period);
            state.count = 0;
        }
        state.count += 1;
        state.count <= self.burst
    }
}

impl Sampler for BurstSampler {
    fn sample(&self, level: Level) -> bool {
        if self.in_burst() {
            return true;
        }
        self.next.as_ref().is_some_and(|next| next.sample(level))
    }
}
