//! Command line tooling for storefront extensions and themes
//!
//! This crate wires the extension project state from `storefront_project`
//! and the theme config reader from `storefront_theme` into the `storefront`
//! binary. It includes:
//!
//! - **Project Setup**: create a project and connect it to its app credentials
//! - **Development Server**: validate the project and run its JavaScript dev server
//! - **Theme Config**: inspect the theme dev server configuration
//! - **User Configuration**: persisted defaults such as the dev server port
//!
//! ## Usage
//!
//! The main entry point is the [`commands::handle_command`] function, which dispatches
//! to the appropriate handler based on the [`commands::Commands`] enum.
//!
//! ```rust,no_run
//! use storefront_dev::commands::{Commands, ExtensionCommands, handle_command};
//!
//! # async fn example() -> eyre::Result<()> {
//! let cmd = Commands::Extension {
//!     command: ExtensionCommands::Serve {
//!         resource_url: Some("/cart".to_string()),
//!         tunnel_url: None,
//!         port: None,
//!         shop: None,
//!         package_manager: None,
//!     },
//! };
//!
//! handle_command(cmd, None).await?;
//! # Ok(())
//! # }
//! ```

pub use commands::{Commands, handle_command};

pub mod cli;
pub mod commands;
pub mod config;
pub mod utils;
