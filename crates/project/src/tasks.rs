//! Setup steps that must pass before an extension can be served.
//!
//! Each step either returns `Ok(())` or aborts the whole command with the
//! error it raises. Nothing here retries.

use async_trait::async_trait;
use tracing::info;

use crate::error::{ProjectError, Result};
use crate::messages;
use crate::project::{EnvUpdate, ExtensionProject};

/// Makes sure a development store is associated with the project.
#[async_trait]
pub trait EnsureDevStore: Send + Sync {
    async fn call(&self, project: &mut ExtensionProject) -> Result<()>;
}

/// Makes sure the project's env record exists and is usable.
#[async_trait]
pub trait EnsureEnv: Send + Sync {
    async fn call(&self, project: &mut ExtensionProject) -> Result<()>;
}

/// Dev store step backed by an optional `--shop` value.
///
/// A shop passed on the command line is persisted when it differs from the
/// stored one. Without either the step aborts.
#[derive(Debug, Clone, Default)]
pub struct ShopFlagDevStore {
    shop: Option<String>,
}

impl ShopFlagDevStore {
    pub fn new(shop: Option<String>) -> Self {
        Self { shop }
    }
}

#[async_trait]
impl EnsureDevStore for ShopFlagDevStore {
    async fn call(&self, project: &mut ExtensionProject) -> Result<()> {
        if project.env().is_none() {
            return Err(ProjectError::MissingEnvFile);
        }

        if let Some(shop) = self.shop.as_deref() {
            if project.shop() != Some(shop) {
                info!(shop, "Selecting development store");
                project
                    .update_env_file(EnvUpdate::default().shop(shop))
                    .await?;
            }
            return Ok(());
        }

        if project.shop().is_none() {
            return Err(ProjectError::precondition(messages::MISSING_SHOP));
        }
        Ok(())
    }
}

/// Env step requiring the env file plus non-blank credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireCredentials;

#[async_trait]
impl EnsureEnv for RequireCredentials {
    async fn call(&self, project: &mut ExtensionProject) -> Result<()> {
        let (api_key, secret) = project.app_credentials()?;
        if api_key.trim().is_empty() || secret.trim().is_empty() {
            return Err(ProjectError::precondition(messages::MISSING_CREDENTIALS));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn load_project(content: Option<&str>) -> (TempDir, ExtensionProject) {
        let dir = TempDir::new().unwrap();
        if let Some(content) = content {
            std::fs::write(dir.path().join(".env"), content).unwrap();
        }
        let project = ExtensionProject::load(dir.path()).await.unwrap();
        (dir, project)
    }

    #[tokio::test]
    async fn test_shop_flag_is_persisted() {
        let (_dir, mut project) = load_project(Some("SHOPIFY_API_KEY=k\nEXTENSION_UUID=u\n")).await;

        ShopFlagDevStore::new(Some("dev.example.com".to_string()))
            .call(&mut project)
            .await
            .unwrap();

        assert_eq!(project.shop(), Some("dev.example.com"));
        assert_eq!(project.registration_uuid().unwrap(), Some("u"));
    }

    #[tokio::test]
    async fn test_missing_shop_aborts() {
        let (_dir, mut project) = load_project(Some("SHOPIFY_API_KEY=k\n")).await;

        let err = ShopFlagDevStore::default()
            .call(&mut project)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), messages::abort_line(messages::MISSING_SHOP));
    }

    #[tokio::test]
    async fn test_blank_credentials_abort() {
        let (_dir, mut project) = load_project(Some("SHOPIFY_API_KEY=k\nSHOPIFY_API_SECRET=\n")).await;
        let err = RequireCredentials.call(&mut project).await.unwrap_err();
        assert!(matches!(err, ProjectError::Precondition { .. }));

        let (_dir, mut project) = load_project(None).await;
        let err = RequireCredentials.call(&mut project).await.unwrap_err();
        assert!(matches!(err, ProjectError::MissingEnvFile));
    }
}
