//! Tick sources for the focus timer.
//!
//! The engine never sleeps. A [`Clock`] decides when the next second is due,
//! and [`drive`] feeds those seconds into the engine until the phase ends or
//! the clock is stopped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use super::engine::FocusTimer;
use crate::events::Event;

/// Source of one-second ticks.
pub trait Clock {
    /// Block until the next tick is due.
    ///
    /// Returns `false` once the clock has been stopped; the driver must not
    /// touch the timer after that.
    fn wait_tick(&mut self) -> bool;
}

/// Hands out a fixed number of ticks without waiting.
#[derive(Debug, Clone)]
pub struct ManualClock {
    remaining: u64,
    elapsed: u64,
}

impl ManualClock {
    pub fn new(ticks: u64) -> Self {
        Self {
            remaining: ticks,
            elapsed: 0,
        }
    }

    /// Ticks handed out so far.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }
}

impl Clock for ManualClock {
    fn wait_tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.elapsed += 1;
        true
    }
}

/// Shared stop flag for a [`SystemClock`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Wall-clock ticks, deadline based so sleeps do not accumulate drift.
#[derive(Debug)]
pub struct SystemClock {
    period: Duration,
    /// Deadline of the next tick; anchored by the first `wait_tick`.
    next: Option<Instant>,
    cancel: CancelToken,
}

/// Upper bound on a single sleep so cancellation is noticed promptly.
const POLL_SLICE: Duration = Duration::from_millis(100);

impl SystemClock {
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            next: None,
            cancel: CancelToken::new(),
        }
    }

    /// Token that stops this clock from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn wait_tick(&mut self) -> bool {
        let next = self.next.unwrap_or_else(Instant::now) + self.period;
        self.next = Some(next);
        loop {
            if self.cancel.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= next {
                return true;
            }
            std::thread::sleep((next - now).min(POLL_SLICE));
        }
    }
}

/// Feed ticks from `clock` into `timer` while it is running.
///
/// `observer` sees the timer after every tick. Returns the
/// `PhaseCompleted` event if the phase ran out, or `None` if the timer was
/// not running or the clock stopped first.
pub fn drive<C, F>(timer: &mut FocusTimer, clock: &mut C, mut observer: F) -> Option<Event>
where
    C: Clock + ?Sized,
    F: FnMut(&FocusTimer),
{
    while timer.is_running() {
        if !clock.wait_tick() {
            debug!(remaining = timer.remaining_secs(), "clock stopped before phase end");
            return None;
        }
        let event = timer.tick();
        observer(timer);
        if event.is_some() {
            return event;
        }
    }
    None
}
