//! Serving an extension locally through the JavaScript toolchain.

use std::fmt;

use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ProjectError, Result};
use crate::js_system::{InvocationConfig, PackageManager, ProcessRunner};
use crate::project::{EnvUpdate, ExtensionProject};
use crate::runtime::{Runtime, ServeFlag};
use crate::tasks::{EnsureDevStore, EnsureEnv};

pub const DEFAULT_PORT: u16 = 39351;

/// Where a single serve invocation currently is.
///
/// `Succeeded` and `Aborted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServePhase {
    Idle,
    ValidatingPreconditions,
    ResolvingResourceUrl,
    PersistingIfChanged,
    Invoking,
    Succeeded,
    Aborted,
}

impl ServePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ServePhase::Succeeded | ServePhase::Aborted)
    }
}

impl fmt::Display for ServePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Per-invocation knobs for [`ServeExtension`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeOptions {
    pub port: u16,
    pub tunnel_url: Option<Url>,
    pub resource_url: Option<String>,
    /// Detected from the project root when unset.
    pub package_manager: Option<PackageManager>,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            tunnel_url: None,
            resource_url: None,
            package_manager: None,
        }
    }
}

/// Validates a project, settles its resource URL and starts the dev server.
pub struct ServeExtension<'a> {
    runtime: Runtime,
    js_system: &'a dyn ProcessRunner,
    ensure_dev_store: &'a dyn EnsureDevStore,
    ensure_env: &'a dyn EnsureEnv,
    options: ServeOptions,
}

impl<'a> ServeExtension<'a> {
    pub fn new(
        runtime: Runtime,
        js_system: &'a dyn ProcessRunner,
        ensure_dev_store: &'a dyn EnsureDevStore,
        ensure_env: &'a dyn EnsureEnv,
        options: ServeOptions,
    ) -> Self {
        Self {
            runtime,
            js_system,
            ensure_dev_store,
            ensure_env,
            options,
        }
    }

    /// Run the whole serve sequence against `project`.
    ///
    /// Returns once the dev server process exits. A resource URL persisted
    /// before a failed launch stays persisted.
    pub async fn call(&self, project: &mut ExtensionProject) -> Result<()> {
        let mut phase = ServePhase::Idle;
        let result = self.run(project, &mut phase).await;

        match &result {
            Ok(()) => advance(&mut phase, ServePhase::Succeeded),
            Err(e) => {
                warn!(phase = %phase, "Serve aborted: {}", e);
                advance(&mut phase, ServePhase::Aborted);
            }
        }

        result
    }

    async fn run(&self, project: &mut ExtensionProject, phase: &mut ServePhase) -> Result<()> {
        advance(phase, ServePhase::ValidatingPreconditions);
        self.validate_env(project).await?;

        advance(phase, ServePhase::ResolvingResourceUrl);
        let resource_url = self.resolve_resource_url(project)?;

        advance(phase, ServePhase::PersistingIfChanged);
        self.persist_resource_url(project, resource_url.as_deref())
            .await?;

        advance(phase, ServePhase::Invoking);
        let config = self.invocation_config(project, resource_url.as_deref())?;
        let package_manager = self
            .options
            .package_manager
            .unwrap_or_else(|| PackageManager::detect(project.directory()));

        if !self.js_system.call(package_manager, &config).await? {
            return Err(ProjectError::LaunchFailure);
        }

        Ok(())
    }

    /// Ensure a dev store and a loadable env, then require the env record.
    pub async fn validate_env(&self, project: &mut ExtensionProject) -> Result<()> {
        self.ensure_dev_store.call(project).await?;
        self.ensure_env.call(project).await?;

        if project.env().is_none() {
            return Err(ProjectError::MissingProjectContext);
        }
        Ok(())
    }

    /// Explicit argument, then the persisted value, then the surface default.
    pub fn resolve_resource_url(&self, project: &ExtensionProject) -> Result<Option<String>> {
        if let Some(url) = &self.options.resource_url {
            return Ok(Some(url.clone()));
        }

        if let Some(url) = project.resource_url()?.filter(|url| !url.is_empty()) {
            return Ok(Some(url.to_string()));
        }

        if self.runtime.requires_resource_url() {
            return Ok(self.runtime.default_resource_url());
        }

        Ok(None)
    }

    /// Store `resolved` when it differs from the persisted value.
    ///
    /// Returns whether a write happened.
    pub async fn persist_resource_url(
        &self,
        project: &mut ExtensionProject,
        resolved: Option<&str>,
    ) -> Result<bool> {
        let Some(url) = resolved else {
            return Ok(false);
        };

        if project.resource_url()? == Some(url) {
            debug!(resource_url = url, "Resource URL unchanged");
            return Ok(false);
        }

        info!(resource_url = url, "Persisting resource URL");
        project
            .update_env_file(EnvUpdate::default().resource_url(url))
            .await?;
        Ok(true)
    }

    /// Dev server command lines for every package manager.
    pub fn invocation_config(
        &self,
        project: &ExtensionProject,
        resource_url: Option<&str>,
    ) -> Result<InvocationConfig> {
        Ok(InvocationConfig::server(
            &self.serve_flags(project, resource_url)?,
        ))
    }

    fn serve_flags(
        &self,
        project: &ExtensionProject,
        resource_url: Option<&str>,
    ) -> Result<Vec<String>> {
        let runtime = self.runtime;
        let mut flags = Vec::new();

        if runtime.supports(ServeFlag::Shop) {
            if let Some(shop) = project.shop() {
                flags.push(format!("--shop={shop}"));
            }
        }

        if runtime.supports(ServeFlag::ApiKey) {
            let (api_key, _) = project.app_credentials()?;
            flags.push(format!("--apiKey={api_key}"));
        }

        if runtime.supports(ServeFlag::Port) {
            flags.push(format!("--port={}", self.options.port));
        }

        if runtime.supports(ServeFlag::PublicUrl) {
            if let Some(url) = &self.options.tunnel_url {
                flags.push(format!("--publicUrl={url}"));
            }
        }

        if runtime.supports(ServeFlag::Name) {
            if let Some(title) = project.title()? {
                flags.push(format!("--name={title}"));
            }
        }

        if runtime.supports(ServeFlag::Uuid) {
            if let Some(uuid) = project.registration_uuid()? {
                flags.push(format!("--uuid={uuid}"));
            }
        }

        if runtime.supports(ServeFlag::ExtensionType) {
            if let Some(identifier) = project.specification_identifier() {
                flags.push(format!("--extensionType={identifier}"));
            }
        }

        if let Some(url) = resource_url {
            flags.push(format!("--resourceUrl={url}"));
        }

        Ok(flags)
    }
}

fn advance(phase: &mut ServePhase, next: ServePhase) {
    debug_assert!(!phase.is_terminal(), "serve already finished as {phase}");
    debug!(from = %phase, to = %next, "Serve phase");
    *phase = next;
}
