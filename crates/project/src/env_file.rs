//! Persisted per-project environment record (`.env`).
//!
//! The record carries the application credentials, the target shop and an
//! open-ended map of extra fields. Absent values are never written, while an
//! empty string is written as `KEY=` and read back as `Some("")`.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::error::{ProjectError, Result};

pub const ENV_FILE_NAME: &str = ".env";

pub const API_KEY: &str = "SHOPIFY_API_KEY";
pub const API_SECRET: &str = "SHOPIFY_API_SECRET";
pub const SHOP: &str = "SHOP";

/// One parsed `.env` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    pub api_key: Option<String>,
    pub secret: Option<String>,
    pub shop: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl EnvFile {
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            secret: Some(secret.into()),
            ..Self::default()
        }
    }

    pub fn with_shop(mut self, shop: Option<String>) -> Self {
        self.shop = shop;
        self
    }

    /// Adds an extra field. `None` leaves the field out of the record.
    pub fn with_extra(mut self, key: &str, value: Option<String>) -> Self {
        match value {
            Some(value) => {
                self.extra.insert(key.to_string(), value);
            }
            None => {
                self.extra.remove(key);
            }
        }
        self
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    /// Parse dotenv content. Known credential keys are lifted out, the rest
    /// land in `extra`.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let mut env = EnvFile::default();

        for item in dotenvy::from_read_iter(content.as_bytes()) {
            let (key, value) = item.map_err(|source| ProjectError::InvalidEnvFile {
                path: path.to_path_buf(),
                source,
            })?;

            match key.as_str() {
                API_KEY => env.api_key = Some(value),
                API_SECRET => env.secret = Some(value),
                SHOP => env.shop = Some(value),
                _ => {
                    env.extra.insert(key, value);
                }
            }
        }

        Ok(env)
    }

    /// Read the env file at `path`. A missing file is `Ok(None)`.
    pub async fn read(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ProjectError::io("read env file", path, e)),
        };

        Self::parse(path, &content).map(Some)
    }

    /// Render the record in dotenv syntax.
    pub fn render(&self) -> String {
        let mut output = String::new();

        let credentials = [
            (API_KEY, self.api_key.as_deref()),
            (API_SECRET, self.secret.as_deref()),
            (SHOP, self.shop.as_deref()),
        ];
        for (key, value) in credentials {
            if let Some(value) = value {
                push_line(&mut output, key, value);
            }
        }

        for (key, value) in &self.extra {
            push_line(&mut output, key, value);
        }

        output
    }

    pub async fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())
            .await
            .map_err(|e| ProjectError::io("write env file", path, e))
    }
}

fn push_line(output: &mut String, key: &str, value: &str) {
    output.push_str(key);
    output.push('=');
    output.push_str(&encode_value(value));
    output.push('\n');
}

fn encode_value(value: &str) -> Cow<'_, str> {
    let plain = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_./:@+,".contains(c));
    if plain {
        return Cow::Borrowed(value);
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\'' => quoted.push_str("\\'"),
            '$' => quoted.push_str("\\$"),
            '\n' => quoted.push_str("\\n"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

/// Cached access to one project's env file.
///
/// The cache is refreshed after every write, so readers never observe a
/// record older than the last write made through this store.
#[derive(Debug, Clone)]
pub struct EnvStore {
    path: PathBuf,
    cached: Option<EnvFile>,
}

impl EnvStore {
    /// Open the store for `directory` and load whatever is on disk.
    pub async fn open(directory: impl AsRef<Path>) -> Result<Self> {
        let mut store = Self {
            path: directory.as_ref().join(ENV_FILE_NAME),
            cached: None,
        };
        store.reload().await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded record, `None` when the project has no env file.
    pub fn read(&self) -> Option<&EnvFile> {
        self.cached.as_ref()
    }

    /// Drop the cached copy and load the file again.
    pub async fn reload(&mut self) -> Result<()> {
        self.cached = EnvFile::read(&self.path).await?;
        debug!(path = %self.path.display(), present = self.cached.is_some(), "Loaded env file");
        Ok(())
    }

    pub async fn write(&mut self, env: &EnvFile) -> Result<()> {
        env.write(&self.path).await?;
        info!(path = %self.path.display(), "Wrote env file");
        self.reload().await
    }
}
