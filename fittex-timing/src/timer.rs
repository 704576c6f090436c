use std::time::{Duration, Instant};

/// Clock used to stamp interaction events.
///
/// Timestamps are opaque to the sequencing core, which only ever receives
/// them through events; the concrete adapters in this crate use seconds
/// since clock construction.
pub trait Timer: Clone + Send + Sync {
    type Timestamp: Copy + Clone + Send + Sync;
    fn now(&self) -> Self::Timestamp;
    fn elapsed(&self, ts: Self::Timestamp) -> Duration;
}

/// Wall-clock-independent timer backed by `Instant`
#[derive(Debug, Clone)]
pub struct MonotonicTimer {
    start: Instant,
}

impl MonotonicTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for MonotonicTimer {
    type Timestamp = f64;

    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn elapsed(&self, ts: f64) -> Duration {
        Duration::from_secs_f64((self.now() - ts).max(0.0))
    }
}

/// Manually advanced clock for simulations and tests
#[derive(Debug, Clone, Default)]
pub struct VirtualTimer {
    current: f64,
}

impl VirtualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, seconds: f64) {
        self.current += seconds;
    }
}

impl Timer for VirtualTimer {
    type Timestamp = f64;

    fn now(&self) -> f64 {
        self.current
    }

    fn elapsed(&self, ts: f64) -> Duration {
        Duration::from_secs_f64((self.current - ts).max(0.0))
    }
}
