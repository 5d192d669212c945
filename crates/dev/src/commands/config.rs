//! `config` subcommands

use eyre::Result;
use std::path::Path;

use super::ConfigCommands;
use crate::config::Config;

pub async fn handle(cmd: ConfigCommands, config_path: &Path) -> Result<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let config = Config::load_from(config_path).await?;
            println!("{}", config.get_value(&key)?);
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_from(config_path).await?;
            config.set_value(&key, &value)?;
            config.save_to(config_path).await?;
            println!("Success: Set {} = {}", key, value);
        }
        ConfigCommands::Show => {
            let config = Config::load_from(config_path).await?;
            println!("{}", config.show_all());
        }
        ConfigCommands::Reset => {
            Config::reset(config_path).await?;
            println!("Success: Configuration reset to defaults");
        }
    }

    Ok(())
}
