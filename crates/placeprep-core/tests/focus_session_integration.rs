//! Integration tests for a focus session end to end.
//!
//! Drives the timer with an injected clock, records completed phases the
//! way a front-end would, and checks the stored statistics.

use placeprep_core::timer::{drive, ManualClock};
use placeprep_core::{Database, Event, FocusTimer, TimerMode, TimerSettings};

fn record(db: &Database, event: &Event) {
    if let Event::PhaseCompleted {
        from,
        duration_min,
        at,
        ..
    } = event
    {
        db.record_session(*from, *duration_min, *at).unwrap();
    }
}

#[test]
fn test_full_pomodoro_cycle_is_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_at(&dir.path().join("placeprep.db")).unwrap();
    let mut timer = FocusTimer::default();
    let mut clock = ManualClock::new(u64::MAX);

    // Four focus phases, each followed by its break.
    let mut modes = Vec::new();
    for _ in 0..8 {
        timer.start();
        let event = drive(&mut timer, &mut clock, |_| {}).expect("phase should complete");
        record(&db, &event);
        modes.push(timer.mode());
    }

    assert_eq!(
        modes,
        vec![
            TimerMode::ShortBreak,
            TimerMode::Work,
            TimerMode::ShortBreak,
            TimerMode::Work,
            TimerMode::ShortBreak,
            TimerMode::Work,
            TimerMode::LongBreak,
            TimerMode::Work,
        ]
    );
    assert_eq!(timer.completed_work_sessions(), 4);
    assert_eq!(timer.total_focus_minutes(), 100);
    assert_eq!(clock.elapsed(), 4 * 1500 + 3 * 300 + 900);

    let stats = db.stats_all().unwrap();
    assert_eq!(stats.total_sessions, 8);
    assert_eq!(stats.completed_work_sessions, 4);
    assert_eq!(stats.total_focus_min, 100);
    assert_eq!(stats.total_break_min, 30);
}

#[test]
fn test_persisted_timer_resumes_where_it_stopped() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_at(&dir.path().join("placeprep.db")).unwrap();

    let mut timer = FocusTimer::new(TimerSettings {
        work_minutes: 1,
        short_break_minutes: 1,
        long_break_minutes: 2,
        sessions_until_long_break: 2,
    });
    timer.start();
    assert!(drive(&mut timer, &mut ManualClock::new(20), |_| {}).is_none());
    db.kv_set("focus_timer", &serde_json::to_string(&timer).unwrap())
        .unwrap();

    let json = db.kv_get("focus_timer").unwrap().unwrap();
    let mut restored: FocusTimer = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.remaining_secs(), 40);
    assert!(restored.is_running());

    let event = drive(&mut restored, &mut ManualClock::new(40), |_| {});
    assert!(matches!(
        event,
        Some(Event::PhaseCompleted {
            from: TimerMode::Work,
            to: TimerMode::ShortBreak,
            ..
        })
    ));
}
