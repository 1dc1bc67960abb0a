use std::error::Error;

use clap::Subcommand;
use placeprep_core::storage::{Config, Database};
use placeprep_core::timer::{drive, FocusTimer, ManualClock, SystemClock, TimerMode};
use placeprep_core::Event;
use tracing::warn;

const ENGINE_KEY: &str = "focus_timer";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Start if paused, pause if running
    Toggle,
    /// Refill the current phase and stop
    Reset,
    /// Jump to the next phase without counting the current one
    Skip,
    /// Jump to a phase (work, short-break, long-break)
    Switch {
        mode: TimerMode,
    },
    /// Print current timer state as JSON
    Status,
    /// Run the countdown in the foreground until the phase ends (Ctrl-C stops)
    Run {
        /// Feed this many ticks instantly instead of waiting on the wall clock
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Change phase lengths; restarts from a fresh focus phase
    Settings {
        /// Focus minutes (1-60)
        #[arg(long)]
        work: Option<u64>,
        /// Short break minutes (1-30)
        #[arg(long)]
        short_break: Option<u64>,
        /// Long break minutes (1-60)
        #[arg(long)]
        long_break: Option<u64>,
        /// Focus sessions before a long break (2-10)
        #[arg(long)]
        sessions: Option<u64>,
    },
}

/// Restore the saved engine, falling back to a fresh one only when the
/// stored state no longer decodes.
///
/// `[timer]` in the config is authoritative: if it changed since the engine
/// was saved, the new lengths are applied and the cycle restarts on focus.
fn load_engine(db: &Database, config: &Config) -> Result<FocusTimer, Box<dyn Error>> {
    let mut engine = match db.kv_get(ENGINE_KEY)? {
        Some(json) => match serde_json::from_str::<FocusTimer>(&json) {
            Ok(engine) => engine,
            Err(e) => {
                warn!(error = %e, "discarding unreadable timer state");
                FocusTimer::new(config.timer)
            }
        },
        None => FocusTimer::new(config.timer),
    };
    if engine.settings() != &config.timer {
        engine.apply_settings(config.timer);
    }
    Ok(engine)
}

fn save_engine(db: &Database, engine: &FocusTimer) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

fn print_event(event: &Event) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

/// Persist naturally completed phases to the session history.
fn record_completion(db: &Database, event: &Event) -> Result<(), Box<dyn Error>> {
    if let Event::PhaseCompleted {
        from,
        duration_min,
        at,
        ..
    } = event
    {
        db.record_session(*from, *duration_min, *at)?;
    }
    Ok(())
}

/// Drive the engine on the wall clock until the phase ends or Ctrl-C.
///
/// The clock runs on a blocking thread; the signal handler only cancels it,
/// so the engine is never touched after the driver returns.
fn run_live(engine: FocusTimer) -> Result<(FocusTimer, Option<Event>), Box<dyn Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(async move {
        let mut clock = SystemClock::new();
        let cancel = clock.cancel_token();
        let mut worker = tokio::task::spawn_blocking(move || {
            let mut engine = engine;
            let event = drive(&mut engine, &mut clock, |t| {
                eprint!("\r{:<12} {}", t.mode().label(), t.display_time());
            });
            eprintln!();
            (engine, event)
        });

        tokio::select! {
            joined = &mut worker => joined,
            _ = tokio::signal::ctrl_c() => {
                cancel.cancel();
                worker.await.map(|(mut engine, event)| {
                    engine.pause();
                    (engine, event)
                })
            }
        }
    });
    Ok(outcome?)
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn Error>> {
    let db = Database::open()?;
    let mut config = Config::load()?;
    let mut engine = load_engine(&db, &config)?;

    match action {
        TimerAction::Start => match engine.start() {
            Some(event) => print_event(&event)?,
            None => print_event(&engine.snapshot())?,
        },
        TimerAction::Pause => match engine.pause() {
            Some(event) => print_event(&event)?,
            None => print_event(&engine.snapshot())?,
        },
        TimerAction::Toggle => {
            if let Some(event) = engine.toggle() {
                print_event(&event)?;
            }
        }
        TimerAction::Reset => print_event(&engine.reset())?,
        TimerAction::Skip => print_event(&engine.skip())?,
        TimerAction::Switch { mode } => print_event(&engine.switch_mode(mode))?,
        TimerAction::Status => print_event(&engine.snapshot())?,
        TimerAction::Run { ticks } => {
            if let Some(event) = engine.start() {
                print_event(&event)?;
            }
            let completed = match ticks {
                Some(n) => drive(&mut engine, &mut ManualClock::new(n), |_| {}),
                None => {
                    let (returned, completed) = run_live(engine)?;
                    engine = returned;
                    completed
                }
            };
            match completed {
                Some(event) => {
                    record_completion(&db, &event)?;
                    print_event(&event)?;
                }
                None => print_event(&engine.snapshot())?,
            }
        }
        TimerAction::Settings {
            work,
            short_break,
            long_break,
            sessions,
        } => {
            let mut settings = config.timer;
            if let Some(v) = work {
                settings.work_minutes = v;
            }
            if let Some(v) = short_break {
                settings.short_break_minutes = v;
            }
            if let Some(v) = long_break {
                settings.long_break_minutes = v;
            }
            if let Some(v) = sessions {
                settings.sessions_until_long_break = v;
            }
            settings.validate()?;
            config.timer = settings;
            config.save()?;
            print_event(&engine.apply_settings(settings))?;
        }
    }

    save_engine(&db, &engine)?;
    Ok(())
}
