//! CLI library for testing purposes

pub mod config_file;
pub mod logging;

pub use config_file::find_config;
pub use logging::{LogConfig, init_logging};
