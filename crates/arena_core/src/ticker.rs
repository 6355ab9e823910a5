//! Round scheduling. A scheduler is armed with an interval when a match
//! starts and disarmed when it stops; whoever owns the clock feeds elapsed
//! time into [`TickScheduler::poll`] to learn how many rounds are due.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

pub trait TickScheduler {
    fn start(&mut self, interval: Duration) -> TickHandle;

    /// Cancelling a handle that is not armed does nothing.
    fn cancel(&mut self, handle: TickHandle);

    /// Ticks that became due over `elapsed`.
    fn poll(&mut self, elapsed: Duration) -> u32;
}

#[derive(Debug, Clone)]
struct Armed {
    handle: TickHandle,
    interval: Duration,
    accumulated: Duration,
}

/// Fixed-interval repeating timer driven by externally supplied time.
/// A zero interval fires once per poll.
#[derive(Debug, Default, Clone)]
pub struct IntervalScheduler {
    next_id: u64,
    armed: Option<Armed>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

impl TickScheduler for IntervalScheduler {
    fn start(&mut self, interval: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.armed = Some(Armed {
            handle,
            interval,
            accumulated: Duration::ZERO,
        });
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if self.armed.as_ref().is_some_and(|a| a.handle == handle) {
            self.armed = None;
        }
    }

    fn poll(&mut self, elapsed: Duration) -> u32 {
        let Some(armed) = self.armed.as_mut() else {
            return 0;
        };
        if armed.interval.is_zero() {
            return 1;
        }
        armed.accumulated += elapsed;
        let mut due = 0;
        while armed.accumulated >= armed.interval {
            armed.accumulated -= armed.interval;
            due += 1;
        }
        due
    }
}

/// Fires exactly one tick per poll while armed, regardless of elapsed time.
/// Lets tests step a match round by round.
#[derive(Debug, Default, Clone)]
pub struct StepScheduler {
    next_id: u64,
    armed: Option<TickHandle>,
    pub starts: u32,
    pub cancels: u32,
}

impl StepScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

impl TickScheduler for StepScheduler {
    fn start(&mut self, _interval: Duration) -> TickHandle {
        self.next_id += 1;
        self.starts += 1;
        let handle = TickHandle(self.next_id);
        self.armed = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if self.armed == Some(handle) {
            self.armed = None;
            self.cancels += 1;
        }
    }

    fn poll(&mut self, _elapsed: Duration) -> u32 {
        u32::from(self.armed.is_some())
    }
}
