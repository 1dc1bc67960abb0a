//! # placeprep Core Library
//!
//! Core logic for the placement-preparation toolkit. Front-ends (the CLI,
//! or any UI shell) stay thin and call into this crate.
//!
//! ## Architecture
//!
//! - **Focus Timer**: a one-second countdown state machine (work, short
//!   break, long break). It owns no thread; ticks come from an injected
//!   [`timer::Clock`].
//! - **Skill Matching**: a pure keyword heuristic that scores a candidate's
//!   text against a company's job description.
//! - **Storage**: SQLite session history and TOML configuration.
//!
//! ## Key Components
//!
//! - [`FocusTimer`]: Timer state machine
//! - [`estimate_match`]: Skill match estimator
//! - [`Database`]: Session and statistics persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod matching;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use matching::{
    estimate_match, CompanyDirectory, CompanyProfile, FocusDistribution, MatchResult,
    SkillCatalog,
};
pub use storage::{Config, Database};
pub use timer::{FocusTimer, TimerMode, TimerSettings};
