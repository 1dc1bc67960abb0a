pub mod companies;
pub mod config;
pub mod matching;
pub mod stats;
pub mod timer;
