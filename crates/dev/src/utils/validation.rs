//! Validation utilities for extension commands

use eyre::{Result, eyre};

/// Validate and normalize an extension title
pub fn validate_title(title: String) -> Result<String> {
    let title = title.trim().to_string();

    if title.is_empty() {
        return Err(eyre!("Title cannot be empty"));
    }

    if title.chars().count() > 50 {
        return Err(eyre!("Title must be 50 characters or less"));
    }

    if title.chars().any(|c| c.is_control()) {
        return Err(eyre!("Title cannot contain control characters"));
    }

    Ok(title)
}

/// Validate and normalize a specification identifier such as `CHECKOUT_UI_EXTENSION`
pub fn validate_specification_identifier(identifier: String) -> Result<String> {
    let identifier = identifier.trim().to_uppercase().replace('-', "_");

    if identifier.is_empty() {
        return Err(eyre!("Extension type cannot be empty"));
    }

    if !identifier
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(eyre!(
            "Extension type must contain only letters, numbers, and underscores"
        ));
    }

    if identifier.starts_with('_') || identifier.ends_with('_') {
        return Err(eyre!("Extension type cannot start or end with underscore"));
    }

    Ok(identifier)
}

/// Validate a store domain
pub fn validate_shop(shop: String) -> Result<String> {
    let shop = shop
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_lowercase();

    if shop.is_empty() {
        return Err(eyre!("Shop cannot be empty"));
    }

    if !shop.contains('.') {
        return Err(eyre!("Shop must be a domain such as my-store.example.com"));
    }

    if !shop
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return Err(eyre!(
            "Shop must contain only letters, numbers, dashes, and dots"
        ));
    }

    Ok(shop)
}

/// Validate a resource URL, which must be a path on the store
pub fn validate_resource_url(url: String) -> Result<String> {
    let url = url.trim().to_string();

    if !url.starts_with('/') {
        return Err(eyre!("Resource URL must start with '/' (got '{}')", url));
    }

    Ok(url)
}
