use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{TimerMode, TimerSettings};

/// Every state change of the focus timer produces an Event.
/// Front-ends render them; storage collaborators record them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A phase ran down to zero on its own.
    PhaseCompleted {
        from: TimerMode,
        to: TimerMode,
        /// Configured length of the phase that just finished.
        duration_min: u64,
        completed_work_sessions: u64,
        at: DateTime<Utc>,
    },
    /// The user jumped to the next phase; nothing is counted.
    PhaseSkipped {
        from: TimerMode,
        to: TimerMode,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: TimerMode,
        to: TimerMode,
        at: DateTime<Utc>,
    },
    SettingsApplied {
        settings: TimerSettings,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        label: String,
        remaining_secs: u64,
        total_secs: u64,
        display: String,
        is_running: bool,
        completed_work_sessions: u64,
        total_focus_minutes: u64,
        cycle_position: u64,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}
