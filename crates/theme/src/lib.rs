//! Theme development support.

pub mod dev_server;
pub mod error;

pub use dev_server::Config;
pub use error::{Result, ThemeConfigError};
