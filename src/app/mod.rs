//! Application glue module
//!
//! Configuration shared by the buffer engine and the headless runner.

mod config;

pub use config::{Config, ConfigError, MAX_TAB_WIDTH};
