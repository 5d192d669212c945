//! `extension connect`: persist credentials and registration values

use eyre::Result;
use storefront_project::{EnvFields, EnvUpdate, ExtensionProject};
use tracing::info;

use crate::utils::validation;

#[derive(Debug, Clone, Default)]
pub struct ConnectArgs {
    pub api_key: String,
    pub api_secret: String,
    pub shop: Option<String>,
    pub registration_id: Option<i64>,
    pub registration_uuid: Option<String>,
    pub title: Option<String>,
}

pub async fn handle(project: &mut ExtensionProject, args: ConnectArgs) -> Result<()> {
    connect(project, args).await?;

    println!("Success: Connected {}", project.directory().display());
    if !project.is_registered() {
        println!("   The extension is not registered yet; pass --registration-id once it is.");
    }
    Ok(())
}

/// Merge the values into an existing env record, or write a new one.
pub async fn connect(project: &mut ExtensionProject, args: ConnectArgs) -> Result<()> {
    let shop = args.shop.map(validation::validate_shop).transpose()?;
    let title = args.title.map(validation::validate_title).transpose()?;

    if project.env().is_none() {
        info!("No env file yet, writing a new one");
        project
            .write_env_file(EnvFields {
                title,
                api_key: args.api_key,
                api_secret: args.api_secret,
                shop,
                registration_id: args.registration_id,
                registration_uuid: args.registration_uuid,
                resource_url: None,
            })
            .await?;
        return Ok(());
    }

    let updates = EnvUpdate {
        title: title.map(Some),
        api_key: Some(args.api_key),
        api_secret: Some(args.api_secret),
        shop: shop.map(Some),
        registration_id: args.registration_id.map(Some),
        registration_uuid: args.registration_uuid.map(Some),
        resource_url: None,
    };
    project.update_env_file(updates).await?;
    Ok(())
}
