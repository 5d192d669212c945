//! Extension commands built on top of the project handle.

pub mod serve;

pub use serve::{DEFAULT_PORT, ServeExtension, ServeOptions, ServePhase};
