use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub const ALL: [TimerMode; 3] = [TimerMode::Work, TimerMode::ShortBreak, TimerMode::LongBreak];

    /// Human-readable label shown under the countdown.
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Work => "Focus Time",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, TimerMode::Work)
    }

    /// Stable identifier used in storage and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            TimerMode::Work => "work",
            TimerMode::ShortBreak => "short_break",
            TimerMode::LongBreak => "long_break",
        }
    }
}

impl std::str::FromStr for TimerMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "work" | "focus" => Ok(TimerMode::Work),
            "short_break" | "short" => Ok(TimerMode::ShortBreak),
            "long_break" | "long" => Ok(TimerMode::LongBreak),
            other => Err(ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("unknown timer mode '{other}'"),
            }),
        }
    }
}

/// User-configurable phase lengths.
///
/// Changes take effect through `FocusTimer::apply_settings`, which always
/// restarts from a fresh Work phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u64,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u64,
    #[serde(default = "default_sessions_until_long_break")]
    pub sessions_until_long_break: u64,
}

fn default_work_minutes() -> u64 {
    25
}
fn default_short_break_minutes() -> u64 {
    5
}
fn default_long_break_minutes() -> u64 {
    15
}
fn default_sessions_until_long_break() -> u64 {
    4
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            sessions_until_long_break: default_sessions_until_long_break(),
        }
    }
}

impl TimerSettings {
    pub fn minutes_for(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Work => self.work_minutes,
            TimerMode::ShortBreak => self.short_break_minutes,
            TimerMode::LongBreak => self.long_break_minutes,
        }
    }

    /// Phase duration in seconds.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn duration_secs(&self, mode: TimerMode) -> u64 {
        self.minutes_for(mode).saturating_mul(60)
    }

    /// Check the ranges accepted by the settings form.
    ///
    /// The engine itself never calls this; it is the job of whoever accepts
    /// user input (config layer, CLI).
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("work_minutes", self.work_minutes, 1, 60)?;
        check_range("short_break_minutes", self.short_break_minutes, 1, 30)?;
        check_range("long_break_minutes", self.long_break_minutes, 1, 60)?;
        check_range("sessions_until_long_break", self.sessions_until_long_break, 2, 10)?;
        Ok(())
    }
}

fn check_range(field: &str, value: u64, min: u64, max: u64) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.into(),
            message: format!("{value} is outside {min}..={max}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_pomodoro() {
        let s = TimerSettings::default();
        assert_eq!(s.duration_secs(TimerMode::Work), 1500);
        assert_eq!(s.duration_secs(TimerMode::ShortBreak), 300);
        assert_eq!(s.duration_secs(TimerMode::LongBreak), 900);
        assert_eq!(s.sessions_until_long_break, 4);
    }

    #[test]
    fn duration_saturates() {
        let s = TimerSettings {
            work_minutes: u64::MAX,
            ..TimerSettings::default()
        };
        assert_eq!(s.duration_secs(TimerMode::Work), u64::MAX);
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(TimerSettings::default().validate().is_ok());

        let zero_work = TimerSettings {
            work_minutes: 0,
            ..TimerSettings::default()
        };
        assert!(zero_work.validate().is_err());

        let one_session = TimerSettings {
            sessions_until_long_break: 1,
            ..TimerSettings::default()
        };
        let err = one_session.validate().unwrap_err();
        assert!(err.to_string().contains("sessions_until_long_break"));
    }

    #[test]
    fn parses_mode_aliases() {
        assert_eq!("work".parse::<TimerMode>().unwrap(), TimerMode::Work);
        assert_eq!("short-break".parse::<TimerMode>().unwrap(), TimerMode::ShortBreak);
        assert_eq!("LONG".parse::<TimerMode>().unwrap(), TimerMode::LongBreak);
        assert!("nap".parse::<TimerMode>().is_err());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let s: TimerSettings = toml::from_str("work_minutes = 50").unwrap();
        assert_eq!(s.work_minutes, 50);
        assert_eq!(s.short_break_minutes, 5);
        assert_eq!(s.sessions_until_long_break, 4);
    }
}
