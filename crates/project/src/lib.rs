//! Local state and dev-server launching for storefront extension projects
//!
//! This crate owns everything the CLI needs to know about one extension
//! project on disk:
//!
//! - **Env file**: the `.env` record holding credentials, the target shop and
//!   registration values ([`env_file`])
//! - **Project handle**: registration queries and guarded accessors over that
//!   record ([`project`])
//! - **Runtimes**: the closed set of extension surfaces and their resource URL
//!   needs ([`runtime`])
//! - **Serve**: validating a project and starting the JavaScript dev server
//!   ([`features::serve`])
//!
//! ## Usage
//!
//! ```rust,no_run
//! use storefront_project::{
//!     ExtensionProject, JsSystem, Runtime, ServeExtension, ServeOptions,
//!     tasks::{RequireCredentials, ShopFlagDevStore},
//! };
//!
//! # async fn example() -> storefront_project::Result<()> {
//! let mut project = ExtensionProject::discover(&std::env::current_dir().unwrap()).await?;
//! let runtime = Runtime::for_specification(project.specification_identifier().unwrap_or_default());
//! let js_system = JsSystem::new(project.directory());
//! let dev_store = ShopFlagDevStore::default();
//!
//! ServeExtension::new(runtime, &js_system, &dev_store, &RequireCredentials, ServeOptions::default())
//!     .call(&mut project)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod env_file;
pub mod error;
pub mod features;
pub mod js_system;
pub mod messages;
pub mod project;
pub mod runtime;
pub mod tasks;

pub use env_file::{EnvFile, EnvStore};
pub use error::{ProjectError, Result};
pub use features::serve::{DEFAULT_PORT, ServeExtension, ServeOptions};
pub use js_system::{InvocationConfig, JsSystem, PackageManager, ProcessRunner};
pub use project::{EnvFields, EnvUpdate, ExtensionProject, generate_temporary_uuid};
pub use runtime::{Runtime, ServeFlag};
