//! Focus timer engine.
//!
//! A one-second countdown state machine. It does not own a thread or an
//! interval - the caller (or [`drive`](super::drive) with an injected
//! [`Clock`](super::Clock)) is responsible for calling `tick()` once per second.
//!
//! ## State Transitions
//!
//! ```text
//! Work --(zero, n-th completion)--> LongBreak --(zero)--> Work
//!   \---(zero, otherwise)---------> ShortBreak --(zero)--> Work
//! ```
//!
//! Every transition stops the timer; the next phase starts only on an
//! explicit `start()`.
//!
//! ## Usage
//!
//! ```
//! use placeprep_core::timer::{FocusTimer, TimerMode};
//!
//! let mut timer = FocusTimer::default();
//! timer.start();
//! for _ in 0..1500 {
//!     timer.tick();
//! }
//! assert_eq!(timer.mode(), TimerMode::ShortBreak);
//! assert!(!timer.is_running());
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::settings::{TimerMode, TimerSettings};
use crate::events::Event;

/// Core focus timer.
///
/// Holds no clock of its own, so it is plain data: cloneable, serializable
/// and fully deterministic under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusTimer {
    settings: TimerSettings,
    mode: TimerMode,
    /// Seconds left in the current phase. Never exceeds the phase duration.
    remaining_secs: u64,
    is_running: bool,
    /// Work phases that ran down to zero. Skips are not counted.
    completed_work_sessions: u64,
    #[serde(default)]
    total_focus_minutes: u64,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

impl FocusTimer {
    /// Create a stopped timer at the start of a Work phase.
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            remaining_secs: settings.duration_secs(TimerMode::Work),
            settings,
            mode: TimerMode::Work,
            is_running: false,
            completed_work_sessions: 0,
            total_focus_minutes: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn completed_work_sessions(&self) -> u64 {
        self.completed_work_sessions
    }

    /// Minutes of naturally completed Work phases.
    pub fn total_focus_minutes(&self) -> u64 {
        self.total_focus_minutes
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn mode_duration_secs(&self, mode: TimerMode) -> u64 {
        self.settings.duration_secs(mode)
    }

    pub fn total_secs(&self) -> u64 {
        self.mode_duration_secs(self.mode)
    }

    /// 0.0 .. 100.0 progress within the current phase.
    pub fn progress_pct(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total - self.remaining_secs.min(total);
        (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Remaining time as `MM:SS`.
    pub fn display_time(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    /// Position inside the current long-break cycle.
    pub fn cycle_position(&self) -> u64 {
        match self.settings.sessions_until_long_break {
            0 => self.completed_work_sessions,
            n => self.completed_work_sessions % n,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            label: self.mode.label().to_string(),
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            display: self.display_time(),
            is_running: self.is_running,
            completed_work_sessions: self.completed_work_sessions,
            total_focus_minutes: self.total_focus_minutes,
            cycle_position: self.cycle_position(),
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.is_running {
            return None;
        }
        self.is_running = true;
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Single play/pause control.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Stop and refill the current phase. Counters are left alone.
    pub fn reset(&mut self) -> Event {
        self.enter(self.mode);
        Event::TimerReset {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Jump to the phase that would follow the current one.
    ///
    /// A skipped Work phase is not counted as completed, but the break it
    /// leads to is chosen as if it had been.
    pub fn skip(&mut self) -> Event {
        let from = self.mode;
        let to = match from {
            TimerMode::Work => self.break_after(self.completed_work_sessions + 1),
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Work,
        };
        self.enter(to);
        debug!(?from, ?to, "phase skipped");
        Event::PhaseSkipped {
            from,
            to,
            at: Utc::now(),
        }
    }

    pub fn switch_mode(&mut self, target: TimerMode) -> Event {
        let from = self.mode;
        self.enter(target);
        Event::ModeSwitched {
            from,
            to: target,
            at: Utc::now(),
        }
    }

    /// Replace the settings and restart from a fresh Work phase.
    ///
    /// Completed-session counters survive.
    pub fn apply_settings(&mut self, settings: TimerSettings) -> Event {
        self.settings = settings;
        self.enter(TimerMode::Work);
        debug!(?settings, "timer settings applied");
        Event::SettingsApplied {
            settings,
            at: Utc::now(),
        }
    }

    /// Advance one second. Returns `Some(Event::PhaseCompleted)` when the
    /// phase runs out.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.complete_phase());
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_phase(&mut self) -> Event {
        let from = self.mode;
        let duration_min = self.settings.minutes_for(from);
        let to = match from {
            TimerMode::Work => {
                self.completed_work_sessions += 1;
                self.total_focus_minutes = self.total_focus_minutes.saturating_add(duration_min);
                self.break_after(self.completed_work_sessions)
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Work,
        };
        self.enter(to);
        debug!(
            ?from,
            ?to,
            completed = self.completed_work_sessions,
            "phase completed"
        );
        Event::PhaseCompleted {
            from,
            to,
            duration_min,
            completed_work_sessions: self.completed_work_sessions,
            at: Utc::now(),
        }
    }

    /// Break that follows the `count`-th Work phase.
    fn break_after(&self, count: u64) -> TimerMode {
        let n = self.settings.sessions_until_long_break;
        if n != 0 && count % n == 0 {
            TimerMode::LongBreak
        } else {
            TimerMode::ShortBreak
        }
    }

    fn enter(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.remaining_secs = self.settings.duration_secs(mode);
        self.is_running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run_to_zero(timer: &mut FocusTimer) -> Option<Event> {
        timer.start();
        let mut last = None;
        while timer.is_running() {
            last = timer.tick();
        }
        last
    }

    #[test]
    fn new_timer_is_stopped_work() {
        let timer = FocusTimer::default();
        assert_eq!(timer.mode(), TimerMode::Work);
        assert_eq!(timer.remaining_secs(), 1500);
        assert!(!timer.is_running());
        assert_eq!(timer.completed_work_sessions(), 0);
        assert_eq!(timer.display_time(), "25:00");
    }

    #[test]
    fn start_pause_are_idempotent() {
        let mut timer = FocusTimer::default();
        assert!(timer.start().is_some());
        assert!(timer.start().is_none());
        assert!(timer.is_running());

        assert!(timer.pause().is_some());
        assert!(timer.pause().is_none());
        assert!(!timer.is_running());
    }

    #[test]
    fn toggle_flips_running() {
        let mut timer = FocusTimer::default();
        assert!(matches!(timer.toggle(), Some(Event::TimerStarted { .. })));
        assert!(matches!(timer.toggle(), Some(Event::TimerPaused { .. })));
    }

    #[test]
    fn tick_ignored_while_paused() {
        let mut timer = FocusTimer::default();
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining_secs(), 1500);
    }

    #[test]
    fn full_work_phase_goes_to_short_break() {
        let mut timer = FocusTimer::default();
        timer.start();
        let mut completed = None;
        for _ in 0..1500 {
            if let Some(event) = timer.tick() {
                completed = Some(event);
            }
        }
        assert_eq!(timer.mode(), TimerMode::ShortBreak);
        assert_eq!(timer.remaining_secs(), 300);
        assert_eq!(timer.completed_work_sessions(), 1);
        assert_eq!(timer.total_focus_minutes(), 25);
        assert!(!timer.is_running());
        match completed {
            Some(Event::PhaseCompleted {
                from,
                to,
                duration_min,
                completed_work_sessions,
                ..
            }) => {
                assert_eq!(from, TimerMode::Work);
                assert_eq!(to, TimerMode::ShortBreak);
                assert_eq!(duration_min, 25);
                assert_eq!(completed_work_sessions, 1);
            }
            other => panic!("Expected PhaseCompleted, got {other:?}"),
        }
    }

    #[test]
    fn fourth_completion_goes_to_long_break() {
        let mut timer = FocusTimer::default();
        for expected in 1..=4u64 {
            run_to_zero(&mut timer);
            assert_eq!(timer.completed_work_sessions(), expected);
            let want = if expected == 4 {
                TimerMode::LongBreak
            } else {
                TimerMode::ShortBreak
            };
            assert_eq!(timer.mode(), want);
            run_to_zero(&mut timer);
            assert_eq!(timer.mode(), TimerMode::Work);
            assert_eq!(timer.remaining_secs(), 1500);
        }
        assert_eq!(timer.cycle_position(), 0);
    }

    #[test]
    fn skip_work_does_not_count() {
        let mut timer = FocusTimer::default();
        timer.start();
        timer.tick();
        let event = timer.skip();
        assert!(matches!(
            event,
            Event::PhaseSkipped {
                from: TimerMode::Work,
                to: TimerMode::ShortBreak,
                ..
            }
        ));
        assert_eq!(timer.completed_work_sessions(), 0);
        assert_eq!(timer.total_focus_minutes(), 0);
        assert_eq!(timer.remaining_secs(), 300);
        assert!(!timer.is_running());
    }

    #[test]
    fn skip_before_long_break_picks_long_break() {
        let mut timer = FocusTimer::default();
        for _ in 0..3 {
            run_to_zero(&mut timer);
            timer.skip();
        }
        assert_eq!(timer.completed_work_sessions(), 3);
        timer.skip();
        assert_eq!(timer.mode(), TimerMode::LongBreak);
        assert_eq!(timer.completed_work_sessions(), 3);
    }

    #[test]
    fn skip_break_returns_to_work() {
        let mut timer = FocusTimer::default();
        timer.switch_mode(TimerMode::LongBreak);
        timer.skip();
        assert_eq!(timer.mode(), TimerMode::Work);
        assert_eq!(timer.remaining_secs(), 1500);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut timer = FocusTimer::default();
        timer.switch_mode(TimerMode::ShortBreak);
        timer.start();
        for _ in 0..42 {
            timer.tick();
        }
        timer.reset();
        let once = timer.clone();
        timer.reset();
        assert_eq!(timer, once);
        assert_eq!(timer.mode(), TimerMode::ShortBreak);
        assert_eq!(timer.remaining_secs(), 300);
        assert!(!timer.is_running());
    }

    #[test]
    fn switch_mode_keeps_counters() {
        let mut timer = FocusTimer::default();
        run_to_zero(&mut timer);
        timer.start();
        timer.switch_mode(TimerMode::LongBreak);
        assert_eq!(timer.mode(), TimerMode::LongBreak);
        assert_eq!(timer.remaining_secs(), 900);
        assert!(!timer.is_running());
        assert_eq!(timer.completed_work_sessions(), 1);
    }

    #[test]
    fn apply_settings_restarts_work_without_resetting_count() {
        let mut timer = FocusTimer::default();
        run_to_zero(&mut timer);
        timer.start();
        timer.apply_settings(TimerSettings {
            work_minutes: 50,
            short_break_minutes: 10,
            long_break_minutes: 30,
            sessions_until_long_break: 2,
        });
        assert_eq!(timer.mode(), TimerMode::Work);
        assert_eq!(timer.remaining_secs(), 3000);
        assert!(!timer.is_running());
        assert_eq!(timer.completed_work_sessions(), 1);

        run_to_zero(&mut timer);
        assert_eq!(timer.mode(), TimerMode::LongBreak);
        assert_eq!(timer.remaining_secs(), 1800);
        assert_eq!(timer.total_focus_minutes(), 75);
    }

    #[test]
    fn progress_tracks_elapsed_time() {
        let mut timer = FocusTimer::default();
        assert_eq!(timer.progress_pct(), 0.0);
        timer.start();
        for _ in 0..750 {
            timer.tick();
        }
        assert!((timer.progress_pct() - 50.0).abs() < f64::EPSILON);
        assert_eq!(timer.display_time(), "12:30");
    }

    #[test]
    fn zero_length_settings_do_not_panic() {
        let mut timer = FocusTimer::new(TimerSettings {
            work_minutes: 0,
            short_break_minutes: 0,
            long_break_minutes: 0,
            sessions_until_long_break: 0,
        });
        assert_eq!(timer.progress_pct(), 0.0);
        timer.start();
        assert!(timer.tick().is_some());
        assert_eq!(timer.mode(), TimerMode::ShortBreak);
        assert_eq!(timer.cycle_position(), 1);
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let timer = FocusTimer::default();
        match timer.snapshot() {
            Event::StateSnapshot {
                mode,
                remaining_secs,
                total_secs,
                display,
                label,
                ..
            } => {
                assert_eq!(mode, TimerMode::Work);
                assert_eq!(remaining_secs, 1500);
                assert_eq!(total_secs, 1500);
                assert_eq!(display, "25:00");
                assert_eq!(label, "Focus Time");
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }

    #[test]
    fn serde_round_trip_preserves_state() {
        let mut timer = FocusTimer::default();
        timer.start();
        timer.tick();
        let json = serde_json::to_string(&timer).unwrap();
        let restored: FocusTimer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, timer);
    }

    proptest! {
        #[test]
        fn ticks_decrease_by_one_and_never_underflow(
            work in 1u64..5,
            short in 1u64..3,
            long in 1u64..4,
            sessions in 1u64..5,
            ticks in 0usize..2000,
        ) {
            let mut timer = FocusTimer::new(TimerSettings {
                work_minutes: work,
                short_break_minutes: short,
                long_break_minutes: long,
                sessions_until_long_break: sessions,
            });
            timer.start();
            for _ in 0..ticks {
                let before = timer.remaining_secs();
                let was_running = timer.is_running();
                let event = timer.tick();
                if was_running && event.is_none() {
                    prop_assert_eq!(timer.remaining_secs(), before - 1);
                }
                prop_assert!(timer.remaining_secs() <= timer.total_secs());
                prop_assert!((0.0..=100.0).contains(&timer.progress_pct()));
                if !timer.is_running() {
                    timer.start();
                }
            }
        }

        #[test]
        fn skip_never_counts(skips in 1usize..50) {
            let mut timer = FocusTimer::default();
            for _ in 0..skips {
                timer.skip();
            }
            prop_assert_eq!(timer.completed_work_sessions(), 0);
        }
    }
}
