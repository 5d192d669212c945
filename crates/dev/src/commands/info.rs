//! `extension info`

use eyre::Result;
use storefront_project::{ExtensionProject, Runtime};

pub fn handle(project: &ExtensionProject) -> Result<()> {
    println!("{}", render(project)?);
    Ok(())
}

pub fn render(project: &ExtensionProject) -> Result<String> {
    let specification = project.specification_identifier().unwrap_or_default();
    let runtime = Runtime::for_specification(specification);

    let registration = if project.has_registration_id() {
        project.registration_id()?.to_string()
    } else {
        "(not registered)".to_string()
    };

    Ok(format!(
        "Extension:\n\
         ├─ directory: {}\n\
         ├─ type: {} ({})\n\
         ├─ title: {}\n\
         ├─ shop: {}\n\
         ├─ registered: {}\n\
         ├─ registration id: {}\n\
         ├─ registration uuid: {}\n\
         └─ resource url: {}",
        project.directory().display(),
        if specification.is_empty() { "(unknown)" } else { specification },
        runtime,
        project.title()?.unwrap_or("(none)"),
        project.shop().unwrap_or("(none)"),
        project.is_registered(),
        registration,
        project.registration_uuid()?.unwrap_or("(none)"),
        project.resource_url()?.unwrap_or("(none)"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_render_unregistered_project() {
        let dir = TempDir::new().unwrap();
        let project =
            crate::commands::create::create_project(dir.path(), "CHECKOUT_UI_EXTENSION", "Cart")
                .await
                .unwrap();

        let output = render(&project).unwrap();
        assert!(output.contains("type: CHECKOUT_UI_EXTENSION (checkout_ui_extension)"));
        assert!(output.contains("registered: false"));
        assert!(output.contains("registration id: (not registered)"));
        assert!(output.contains("resource url: (none)"));
    }
}
