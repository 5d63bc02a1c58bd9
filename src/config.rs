use std::time::Duration;

/// Attribute on `<html>` carrying the explicit theme override.
pub const THEME_ATTR: &str = "data-theme";
/// Marker attribute on the theme selector control.
pub const THEME_TOGGLE_SELECTOR: &str = "[data-theme-toggle]";
/// Attribute carrying the literal payload of a copy button.
pub const COPY_ATTR: &str = "data-copy";
pub const COPY_SELECTOR: &str = "[data-copy]";
pub const TOAST_SELECTOR: &str = ".toast";

pub const DEFAULT_STORAGE_KEY: &str = "apphub-theme";
pub const DEFAULT_TOAST_MS: u64 = 2400;

/// Constants the page scripts run with. Defaults match the portal's markup.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub storage_key: String,
    pub toast_active_class: String,
    pub toast_duration: Duration,
    pub copied_message: String,
    pub failed_message: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            toast_active_class: "active".to_string(),
            toast_duration: Duration::from_millis(DEFAULT_TOAST_MS),
            copied_message: "Copied to clipboard".to_string(),
            failed_message: "Copy failed".to_string(),
        }
    }
}
