//! `theme config`

use eyre::Result;
use std::path::Path;
use storefront_theme::Config;

pub async fn handle_config(root: &Path, environment: &str) -> Result<()> {
    let config = Config::from_path(root, environment).await?;
    println!("{}", render(&config, environment)?);
    Ok(())
}

fn render(config: &Config, environment: &str) -> Result<String> {
    if config.to_map().is_empty() {
        return Ok(format!("No '{}' section in config.yml", environment));
    }

    let mut shown = config.to_map().clone();
    if shown.contains_key("password") {
        shown.insert("password".into(), "********".into());
    }

    Ok(serde_yaml::to_string(&shown)?.trim_end().to_string())
}
