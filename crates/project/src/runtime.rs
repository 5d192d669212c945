//! Extension surfaces and what their local dev servers need.

use std::fmt;

/// Well-known path checkout UI extensions are previewed against.
pub const CHECKOUT_DEFAULT_RESOURCE_URL: &str = "/cart";

/// Flags a surface's dev server may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServeFlag {
    ApiKey,
    ExtensionType,
    Name,
    Port,
    PublicUrl,
    Shop,
    Uuid,
}

/// The extension surface a project targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Runtime {
    Admin,
    CheckoutPostPurchase,
    CheckoutUiExtension,
}

impl Runtime {
    pub const ALL: [Runtime; 3] = [
        Runtime::Admin,
        Runtime::CheckoutPostPurchase,
        Runtime::CheckoutUiExtension,
    ];

    /// Pick the surface for a project's specification identifier.
    pub fn for_specification(identifier: &str) -> Self {
        match identifier {
            "CHECKOUT_UI_EXTENSION" => Runtime::CheckoutUiExtension,
            "CHECKOUT_ARGO_EXTENSION" | "CHECKOUT_POST_PURCHASE" => Runtime::CheckoutPostPurchase,
            _ => Runtime::Admin,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Runtime::Admin => "admin",
            Runtime::CheckoutPostPurchase => "checkout_post_purchase",
            Runtime::CheckoutUiExtension => "checkout_ui_extension",
        }
    }

    pub fn requires_resource_url(&self) -> bool {
        matches!(self, Runtime::CheckoutUiExtension)
    }

    /// Default resource URL, only for surfaces that require one.
    pub fn default_resource_url(&self) -> Option<String> {
        match self {
            Runtime::CheckoutUiExtension => Some(CHECKOUT_DEFAULT_RESOURCE_URL.to_string()),
            Runtime::Admin | Runtime::CheckoutPostPurchase => None,
        }
    }

    pub fn supports(&self, flag: ServeFlag) -> bool {
        match self {
            Runtime::Admin => matches!(
                flag,
                ServeFlag::ApiKey
                    | ServeFlag::Name
                    | ServeFlag::Port
                    | ServeFlag::PublicUrl
                    | ServeFlag::Shop
                    | ServeFlag::Uuid
            ),
            Runtime::CheckoutPostPurchase => {
                matches!(flag, ServeFlag::ApiKey | ServeFlag::Port | ServeFlag::Shop)
            }
            Runtime::CheckoutUiExtension => true,
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
