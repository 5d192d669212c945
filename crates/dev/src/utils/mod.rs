//! Utility functions and helpers for the extension commands

use eyre::Result;
use std::io::{self, Write};
use std::path::Path;
use storefront_project::{ExtensionProject, ProjectError};

pub mod validation;

/// Load the extension project enclosing the current directory
pub async fn current_project() -> Result<ExtensionProject> {
    project_at(&std::env::current_dir()?).await
}

/// Load the extension project enclosing `start`.
///
/// Running outside any project reports the "wrong directory" abort rather
/// than a lookup failure.
pub async fn project_at(start: &Path) -> Result<ExtensionProject> {
    match ExtensionProject::discover(start).await {
        Ok(project) => Ok(project),
        Err(ProjectError::ProjectNotFound(_)) => Err(ProjectError::MissingProjectContext.into()),
        Err(e) => Err(e.into()),
    }
}

/// Prompt user for confirmation with a yes/no question
pub fn prompt_confirmation(message: &str) -> Result<bool> {
    print!("{} (y/N): ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let answer = input.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}
