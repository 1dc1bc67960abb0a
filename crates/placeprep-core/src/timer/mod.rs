mod clock;
mod engine;
mod settings;

pub use clock::{drive, CancelToken, Clock, ManualClock, SystemClock};
pub use engine::FocusTimer;
pub use settings::{TimerMode, TimerSettings};
