//! Extension project handle.
//!
//! An [`ExtensionProject`] is the explicit handle commands pass around: it
//! knows the project root, the CLI file written at creation time and the
//! cached env record, and answers the registration queries on top of them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::env_file::{EnvFile, EnvStore};
use crate::error::{ProjectError, Result};

pub const CLI_FILE_NAME: &str = ".storefront-cli.yml";
pub const PROJECT_TYPE: &str = "extension";

pub const TITLE_KEY: &str = "EXTENSION_TITLE";
pub const REGISTRATION_ID_KEY: &str = "EXTENSION_ID";
pub const REGISTRATION_UUID_KEY: &str = "EXTENSION_UUID";
pub const RESOURCE_URL_KEY: &str = "EXTENSION_RESOURCE_URL";

/// Contents of the project CLI file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub project_type: String,
    #[serde(default)]
    pub organization_id: Option<u64>,
    #[serde(
        rename = "EXTENSION_TYPE",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub specification_identifier: Option<String>,
}

impl ProjectConfig {
    pub async fn read(directory: &Path) -> Result<Option<Self>> {
        let path = directory.join(CLI_FILE_NAME);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ProjectError::io("read project file", path, e)),
        };

        serde_yaml::from_str(&content)
            .map(Some)
            .map_err(|source| ProjectError::InvalidProjectFile { path, source })
    }
}

/// Every field an env write can carry.
///
/// `None` fields are left out of the written file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFields {
    pub title: Option<String>,
    pub api_key: String,
    pub api_secret: String,
    pub shop: Option<String>,
    pub registration_id: Option<i64>,
    pub registration_uuid: Option<String>,
    pub resource_url: Option<String>,
}

/// Values to merge over the current env record. Set fields always win.
///
/// Optional fields are `Some(None)` to remove the key and `None` to keep
/// the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvUpdate {
    pub title: Option<Option<String>>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub shop: Option<Option<String>>,
    pub registration_id: Option<Option<i64>>,
    pub registration_uuid: Option<Option<String>>,
    pub resource_url: Option<Option<String>>,
}

impl EnvUpdate {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Some(title.into()));
        self
    }

    pub fn credentials(mut self, api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self.api_secret = Some(api_secret.into());
        self
    }

    pub fn shop(mut self, shop: impl Into<String>) -> Self {
        self.shop = Some(Some(shop.into()));
        self
    }

    pub fn registration_id(mut self, id: i64) -> Self {
        self.registration_id = Some(Some(id));
        self
    }

    pub fn registration_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.registration_uuid = Some(Some(uuid.into()));
        self
    }

    pub fn resource_url(mut self, url: impl Into<String>) -> Self {
        self.resource_url = Some(Some(url.into()));
        self
    }

    pub fn without_shop(mut self) -> Self {
        self.shop = Some(None);
        self
    }

    pub fn without_registration_id(mut self) -> Self {
        self.registration_id = Some(None);
        self
    }

    pub fn without_resource_url(mut self) -> Self {
        self.resource_url = Some(None);
        self
    }

    fn apply(self, current: EnvFields) -> EnvFields {
        EnvFields {
            title: self.title.unwrap_or(current.title),
            api_key: self.api_key.unwrap_or(current.api_key),
            api_secret: self.api_secret.unwrap_or(current.api_secret),
            shop: self.shop.unwrap_or(current.shop),
            registration_id: self.registration_id.unwrap_or(current.registration_id),
            registration_uuid: self.registration_uuid.unwrap_or(current.registration_uuid),
            resource_url: self.resource_url.unwrap_or(current.resource_url),
        }
    }
}

/// Placeholder registration uuid for projects not yet registered remotely.
pub fn generate_temporary_uuid() -> String {
    format!("dev-{}", uuid::Uuid::new_v4())
}

/// Handle on one extension project directory.
#[derive(Debug, Clone)]
pub struct ExtensionProject {
    directory: PathBuf,
    config: Option<ProjectConfig>,
    env: EnvStore,
    uuid_generator: fn() -> String,
}

impl ExtensionProject {
    /// Write the CLI file that marks `directory` as an extension project.
    pub async fn write_cli_file(directory: &Path, specification_identifier: &str) -> Result<()> {
        let config = ProjectConfig {
            project_type: PROJECT_TYPE.to_string(),
            organization_id: None,
            specification_identifier: Some(specification_identifier.to_string()),
        };

        let path = directory.join(CLI_FILE_NAME);
        let content = serde_yaml::to_string(&config)?;
        fs::write(&path, content)
            .await
            .map_err(|e| ProjectError::io("write project file", &path, e))?;

        info!(path = %path.display(), specification_identifier, "Wrote project file");
        Ok(())
    }

    /// Walk up from `start` to the nearest directory holding a CLI file.
    pub fn find_root(start: &Path) -> Result<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(CLI_FILE_NAME).is_file())
            .map(Path::to_path_buf)
            .ok_or_else(|| ProjectError::ProjectNotFound(start.to_path_buf()))
    }

    /// Load the project rooted at `directory`.
    pub async fn load(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        let config = ProjectConfig::read(&directory).await?;
        let env = EnvStore::open(&directory).await?;

        debug!(
            directory = %directory.display(),
            has_config = config.is_some(),
            has_env = env.read().is_some(),
            "Loaded extension project"
        );

        Ok(Self {
            directory,
            config,
            env,
            uuid_generator: generate_temporary_uuid,
        })
    }

    /// Load the project enclosing `start`.
    pub async fn discover(start: &Path) -> Result<Self> {
        Self::load(Self::find_root(start)?).await
    }

    /// Replace the generator used when a write has no registration uuid.
    pub fn with_uuid_generator(mut self, generator: fn() -> String) -> Self {
        self.uuid_generator = generator;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn env(&self) -> Option<&EnvFile> {
        self.env.read()
    }

    pub fn config(&self) -> Option<&ProjectConfig> {
        self.config.as_ref()
    }

    pub fn specification_identifier(&self) -> Option<&str> {
        self.config
            .as_ref()
            .and_then(|config| config.specification_identifier.as_deref())
    }

    /// Credentials present and non-blank, plus a valid registration id.
    pub fn is_registered(&self) -> bool {
        let Some(env) = self.env.read() else {
            return false;
        };

        is_present(env.api_key.as_deref())
            && is_present(env.secret.as_deref())
            && self.has_registration_id()
    }

    /// Whether the stored registration id is a positive integer.
    pub fn has_registration_id(&self) -> bool {
        match self.env.read().and_then(|env| env.extra(REGISTRATION_ID_KEY)) {
            Some(value) => is_integer_text(value) && leading_integer(value) > 0,
            None => false,
        }
    }

    /// Numeric registration id.
    ///
    /// A stored value that is not an integer coerces to its leading digits,
    /// or `0` when there are none, so "abc" reads as `0`. Digits beyond the
    /// `i64` range also read as `0`, so such an id is never registered. Check
    /// [`has_registration_id`](Self::has_registration_id) first.
    pub fn registration_id(&self) -> Result<i64> {
        Ok(self
            .extra_field(REGISTRATION_ID_KEY)?
            .map(leading_integer)
            .unwrap_or(0))
    }

    pub fn title(&self) -> Result<Option<&str>> {
        self.extra_field(TITLE_KEY)
    }

    pub fn registration_uuid(&self) -> Result<Option<&str>> {
        self.extra_field(REGISTRATION_UUID_KEY)
    }

    pub fn resource_url(&self) -> Result<Option<&str>> {
        self.extra_field(RESOURCE_URL_KEY)
    }

    pub fn shop(&self) -> Option<&str> {
        self.env.read().and_then(|env| env.shop.as_deref())
    }

    /// The application api key and secret.
    pub fn app_credentials(&self) -> Result<(&str, &str)> {
        let env = self.env.read().ok_or(ProjectError::MissingEnvFile)?;
        Ok((
            env.api_key.as_deref().unwrap_or_default(),
            env.secret.as_deref().unwrap_or_default(),
        ))
    }

    /// The derived fields of the current record.
    pub fn current_fields(&self) -> Result<EnvFields> {
        let env = self
            .env
            .read()
            .ok_or(ProjectError::MissingProjectContext)?;

        let registration_id = if self.has_registration_id() {
            Some(self.registration_id()?)
        } else {
            None
        };

        Ok(EnvFields {
            title: env.extra(TITLE_KEY).map(str::to_string),
            api_key: env.api_key.clone().unwrap_or_default(),
            api_secret: env.secret.clone().unwrap_or_default(),
            shop: env.shop.clone(),
            registration_id,
            registration_uuid: env.extra(REGISTRATION_UUID_KEY).map(str::to_string),
            resource_url: env.extra(RESOURCE_URL_KEY).map(str::to_string),
        })
    }

    /// Merge `updates` over the current record and persist the result.
    pub async fn update_env_file(&mut self, updates: EnvUpdate) -> Result<()> {
        let fields = updates.apply(self.current_fields()?);
        self.write_env_file(fields).await
    }

    /// Persist `fields` as the project's env file, then reload it.
    ///
    /// A missing or blank registration uuid is replaced by a generated one.
    pub async fn write_env_file(&mut self, fields: EnvFields) -> Result<()> {
        let registration_uuid = fields
            .registration_uuid
            .filter(|uuid| !uuid.trim().is_empty())
            .unwrap_or_else(|| (self.uuid_generator)());

        let env = EnvFile::new(fields.api_key, fields.api_secret)
            .with_shop(fields.shop)
            .with_extra(TITLE_KEY, fields.title)
            .with_extra(
                REGISTRATION_ID_KEY,
                fields.registration_id.map(|id| id.to_string()),
            )
            .with_extra(REGISTRATION_UUID_KEY, Some(registration_uuid))
            .with_extra(RESOURCE_URL_KEY, fields.resource_url);

        self.env.write(&env).await
    }

    pub async fn reload(&mut self) -> Result<()> {
        self.config = ProjectConfig::read(&self.directory).await?;
        self.env.reload().await
    }

    fn extra_field(&self, key: &str) -> Result<Option<&str>> {
        let env = self
            .env
            .read()
            .ok_or(ProjectError::MissingProjectContext)?;
        Ok(env.extra(key))
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Integer prefix of `value`: optional sign then digits, `0` when absent
/// or out of `i64` range.
fn leading_integer(value: &str) -> i64 {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => 0,
    }
}

/// True when `value` round-trips through integer coercion unchanged.
fn is_integer_text(value: &str) -> bool {
    leading_integer(value).to_string() == value
}
