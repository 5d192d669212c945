//! `extension create`: lay down the CLI file and an initial env record

use eyre::Result;
use std::path::Path;
use storefront_project::{EnvFields, ExtensionProject, project::CLI_FILE_NAME};
use tokio::fs;

use crate::utils::{prompt_confirmation, validation};

pub async fn handle(directory: &Path, specification: String, title: String, force: bool) -> Result<()> {
    let specification = validation::validate_specification_identifier(specification)?;
    let title = validation::validate_title(title)?;

    if directory.join(CLI_FILE_NAME).exists()
        && !force
        && !prompt_confirmation(&format!(
            "A project already exists in {}. Overwrite it?",
            directory.display()
        ))?
    {
        println!("Error: Project creation cancelled");
        return Ok(());
    }

    println!("Creating extension '{}'...", title);
    create_project(directory, &specification, &title).await?;

    println!("Success: Extension '{}' created", title);
    println!("   Location: {}", directory.display());
    println!();
    println!("Next steps:");
    println!("   1. cd {}", directory.display());
    println!("   2. storefront extension connect --api-key <key> --api-secret <secret>");
    println!("   3. storefront extension serve");

    Ok(())
}

/// Write a fresh project into `directory`.
pub async fn create_project(
    directory: &Path,
    specification: &str,
    title: &str,
) -> Result<ExtensionProject> {
    fs::create_dir_all(directory).await?;
    ExtensionProject::write_cli_file(directory, specification).await?;

    let mut project = ExtensionProject::load(directory).await?;
    project
        .write_env_file(EnvFields {
            title: Some(title.to_string()),
            ..EnvFields::default()
        })
        .await?;

    Ok(project)
}
