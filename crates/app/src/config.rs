//! Client settings shared by every rendition of the dashboard.

use metricboard_domain::format::Locale;
use metricboard_domain::metrics::DEFAULT_PAGE_SIZE;
use serde::Deserialize;

/// Base URL used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Settings for the API client and the dashboard controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://127.0.0.1:8000`.
    pub api_base_url: String,
    /// Records requested per page.
    pub page_size: u32,
    /// Number and currency formatting.
    pub locale: Locale,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            locale: Locale::default(),
        }
    }
}
