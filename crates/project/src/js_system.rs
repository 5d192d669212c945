//! Running the JavaScript toolchain that hosts the extension dev server.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::str::FromStr;

use async_trait::async_trait;
use tracing::{error, info};

use crate::error::{ProjectError, Result};

/// Package managers the dev server can be started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PackageManager {
    Yarn,
    Npm,
}

impl PackageManager {
    pub const ALL: [PackageManager; 2] = [PackageManager::Yarn, PackageManager::Npm];

    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    /// Yarn when the project carries a `yarn.lock`, npm otherwise.
    pub fn detect(directory: &Path) -> Self {
        if directory.join("yarn.lock").is_file() {
            PackageManager::Yarn
        } else {
            PackageManager::Npm
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

impl FromStr for PackageManager {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "yarn" => Ok(PackageManager::Yarn),
            "npm" => Ok(PackageManager::Npm),
            other => Err(ProjectError::UnknownPackageManager(other.to_string())),
        }
    }
}

/// Command lines for the dev server, one per package manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationConfig {
    commands: BTreeMap<PackageManager, Vec<String>>,
}

impl InvocationConfig {
    /// Build the `server` script invocation for every package manager.
    pub fn server(flags: &[String]) -> Self {
        let mut commands = BTreeMap::new();

        let mut yarn = vec!["server".to_string()];
        yarn.extend_from_slice(flags);
        commands.insert(PackageManager::Yarn, yarn);

        let mut npm = vec!["run".to_string(), "server".to_string(), "--".to_string()];
        npm.extend_from_slice(flags);
        commands.insert(PackageManager::Npm, npm);

        Self { commands }
    }

    pub fn fetch(&self, package_manager: PackageManager) -> Option<&[String]> {
        self.commands.get(&package_manager).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PackageManager, &[String])> {
        self.commands.iter().map(|(pm, args)| (*pm, args.as_slice()))
    }
}

/// Something that can run an [`InvocationConfig`] and report success.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn call(
        &self,
        package_manager: PackageManager,
        config: &InvocationConfig,
    ) -> Result<bool>;
}

/// Spawns the package manager in the project root and waits for it to exit.
///
/// The wait is unbounded: a dev server that never exits keeps the command
/// running until the user interrupts it.
#[derive(Debug, Clone)]
pub struct JsSystem {
    directory: PathBuf,
}

impl JsSystem {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl ProcessRunner for JsSystem {
    async fn call(
        &self,
        package_manager: PackageManager,
        config: &InvocationConfig,
    ) -> Result<bool> {
        let args = config.fetch(package_manager).unwrap_or_default();
        info!(
            program = package_manager.program(),
            args = ?args,
            directory = %self.directory.display(),
            "Starting dev server"
        );

        let status = tokio::process::Command::new(package_manager.program())
            .args(args)
            .current_dir(&self.directory)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await;

        match status {
            Ok(status) => {
                if !status.success() {
                    error!(%status, "Dev server exited unsuccessfully");
                }
                Ok(status.success())
            }
            Err(e) => {
                error!(program = package_manager.program(), "Failed to spawn: {}", e);
                Ok(false)
            }
        }
    }
}
