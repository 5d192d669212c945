//! Theme dev server.

pub mod config;

pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_ENVIRONMENT};
