//! Configuration file utilities

pub mod settings;

pub use settings::{CliConfig, CONFIG_PATH_ENV, DEFAULT_DEV_PORT};
