//! `extension serve`: run the extension's dev server

use eyre::Result;
use storefront_project::{
    JsSystem, PackageManager, Runtime, ServeExtension, ServeOptions, messages,
    tasks::{RequireCredentials, ShopFlagDevStore},
};
use tracing::info;
use url::Url;

use crate::config::Config;
use crate::utils::{current_project, validation};

#[derive(Debug, Clone, Default)]
pub struct ServeArgs {
    pub resource_url: Option<String>,
    pub tunnel_url: Option<Url>,
    pub port: Option<u16>,
    pub shop: Option<String>,
    pub package_manager: Option<String>,
}

/// Handle the serve command
pub async fn handle(args: ServeArgs, config: &Config) -> Result<()> {
    let mut project = current_project().await?;
    let runtime = Runtime::for_specification(project.specification_identifier().unwrap_or_default());

    let options = serve_options(args.clone(), config)?;
    let js_system = JsSystem::new(project.directory());
    let dev_store = ShopFlagDevStore::new(args.shop.map(validation::validate_shop).transpose()?);

    info!(%runtime, directory = %project.directory().display(), "Serving extension");
    println!("{}", messages::SERVE_FRAME_TITLE);

    ServeExtension::new(runtime, &js_system, &dev_store, &RequireCredentials, options)
        .call(&mut project)
        .await?;

    Ok(())
}

/// Command line values first, then the user configuration.
pub fn serve_options(args: ServeArgs, config: &Config) -> Result<ServeOptions> {
    let package_manager = match args.package_manager {
        Some(name) => Some(name.parse::<PackageManager>()?),
        None => config.package_manager()?,
    };

    Ok(ServeOptions {
        port: args.port.unwrap_or(config.serve.port),
        tunnel_url: args.tunnel_url,
        resource_url: args
            .resource_url
            .map(validation::validate_resource_url)
            .transpose()?,
        package_manager,
    })
}
