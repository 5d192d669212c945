//! User-facing strings for the extension commands (en).

pub const MISSING_PROJECT_CONTEXT: &str = "Run the command inside the correct extension directory.";

pub const MISSING_ENV_FILE: &str =
    "Missing .env file. Run `storefront extension connect` to generate an .env file.";

pub const SERVE_FAILURE: &str = "Failed to run extension code.";

pub const SERVE_FRAME_TITLE: &str = "Serving extension...";

pub const MISSING_SHOP: &str =
    "No development store is set for this project. Pass --shop=<store domain> to select one.";

pub const MISSING_CREDENTIALS: &str =
    "Missing API key or secret. Run `storefront extension connect` to register the extension.";

/// Formats `message` as an abort line, the way every abort is shown to the user.
pub fn abort_line(message: &str) -> String {
    format!("✗ {message}")
}
