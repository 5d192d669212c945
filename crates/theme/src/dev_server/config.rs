//! `config.yml` reader for the theme dev server.
//!
//! The file holds one section per environment. Nothing is validated on load:
//! a missing section or key simply reads as its default.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{Result, ThemeConfigError};

pub const CONFIG_FILE_NAME: &str = "config.yml";
pub const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    root: PathBuf,
    attributes: Mapping,
}

impl Config {
    pub fn new(root: impl Into<PathBuf>, attributes: Mapping) -> Self {
        Self {
            root: root.into(),
            attributes,
        }
    }

    /// Load the `environment` section of `root/config.yml`.
    pub async fn from_path(root: impl AsRef<Path>, environment: &str) -> Result<Self> {
        let root = root.as_ref();
        let path = root.join(CONFIG_FILE_NAME);

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ThemeConfigError::Io {
                path: path.clone(),
                source,
            })?;
        let document: Value = serde_yaml::from_str(&content)
            .map_err(|source| ThemeConfigError::Yaml { path, source })?;

        let attributes = match document.get(environment) {
            Some(Value::Mapping(section)) => section.clone(),
            _ => {
                debug!(environment, "No theme config section, using defaults");
                Mapping::new()
            }
        };

        Ok(Self::new(root, attributes))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn to_map(&self) -> &Mapping {
        &self.attributes
    }

    pub fn password(&self) -> Option<String> {
        self.scalar("password")
    }

    pub fn theme_id(&self) -> Option<String> {
        self.scalar("theme_id")
    }

    pub fn store(&self) -> Option<String> {
        self.scalar("store")
    }

    pub fn ignore_files(&self) -> Vec<String> {
        self.list("ignore_files")
    }

    pub fn ignores(&self) -> Vec<String> {
        self.list("ignores")
    }

    fn scalar(&self, key: &str) -> Option<String> {
        self.attributes.get(key).and_then(scalar_to_string)
    }

    fn list(&self, key: &str) -> Vec<String> {
        match self.attributes.get(key) {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
            _ => Vec::new(),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
