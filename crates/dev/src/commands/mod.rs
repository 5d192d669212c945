//! Command definitions and handlers

use clap::Subcommand;
use eyre::Result;
use std::path::{Path, PathBuf};
use url::Url;

use crate::config::Config;

pub mod config;
pub mod connect;
pub mod create;
pub mod info;
pub mod serve;
pub mod theme;

/// Top-level commands available in the CLI
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Work with storefront extension projects
    Extension {
        #[command(subcommand)]
        command: ExtensionCommands,
    },
    /// Theme development helpers
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ExtensionCommands {
    /// Create a new extension project
    Create {
        /// Directory to create the project in
        directory: PathBuf,
        /// Extension type, e.g. CHECKOUT_UI_EXTENSION
        #[arg(long = "type")]
        specification: String,
        /// Human readable title
        #[arg(long)]
        title: String,
        /// Overwrite an existing project without asking
        #[arg(long)]
        force: bool,
    },
    /// Store app credentials and registration values for this project
    Connect {
        #[arg(long)]
        api_key: String,
        #[arg(long)]
        api_secret: String,
        /// Target store domain
        #[arg(long)]
        shop: Option<String>,
        /// Numeric id of the remote registration
        #[arg(long)]
        registration_id: Option<i64>,
        /// Stable registration uuid (generated when omitted)
        #[arg(long)]
        registration_uuid: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Show this project's registration state
    Info,
    /// Run the extension's local dev server
    Serve {
        /// Resource URL to preview the extension against
        #[arg(long)]
        resource_url: Option<String>,
        /// Public tunnel URL forwarded to the dev server
        #[arg(long)]
        tunnel_url: Option<Url>,
        /// Port for the dev server
        #[arg(long)]
        port: Option<u16>,
        /// Development store to use
        #[arg(long)]
        shop: Option<String>,
        /// Package manager (yarn or npm)
        #[arg(long)]
        package_manager: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ThemeCommands {
    /// Print the theme dev server configuration
    Config {
        /// Theme root containing config.yml
        #[arg(default_value = ".")]
        root: PathBuf,
        /// Section of config.yml to read
        #[arg(long, default_value = storefront_theme::dev_server::DEFAULT_ENVIRONMENT)]
        environment: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print one configuration value
    Get { key: String },
    /// Set one configuration value
    Set { key: String, value: String },
    /// Print the whole configuration
    Show,
    /// Restore defaults
    Reset,
}

/// Handle a parsed command
pub async fn handle_command(cmd: Commands, config_path: Option<&Path>) -> Result<()> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::get_config_path);

    match cmd {
        Commands::Extension { command } => {
            let config = Config::load_from(&config_path).await?;
            handle_extension_command(command, &config).await
        }
        Commands::Theme {
            command: ThemeCommands::Config { root, environment },
        } => theme::handle_config(&root, &environment).await,
        Commands::Config { command } => config::handle(command, &config_path).await,
    }
}

async fn handle_extension_command(cmd: ExtensionCommands, config: &Config) -> Result<()> {
    match cmd {
        ExtensionCommands::Create {
            directory,
            specification,
            title,
            force,
        } => create::handle(&directory, specification, title, force).await,
        ExtensionCommands::Connect {
            api_key,
            api_secret,
            shop,
            registration_id,
            registration_uuid,
            title,
        } => {
            let args = connect::ConnectArgs {
                api_key,
                api_secret,
                shop,
                registration_id,
                registration_uuid,
                title,
            };
            let mut project = crate::utils::current_project().await?;
            connect::handle(&mut project, args).await
        }
        ExtensionCommands::Info => {
            let project = crate::utils::current_project().await?;
            info::handle(&project)
        }
        ExtensionCommands::Serve {
            resource_url,
            tunnel_url,
            port,
            shop,
            package_manager,
        } => {
            let args = serve::ServeArgs {
                resource_url,
                tunnel_url,
                port,
                shop,
                package_manager,
            };
            serve::handle(args, config).await
        }
    }
}
