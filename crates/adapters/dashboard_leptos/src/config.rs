//! Build-time configuration.
//!
//! The bundle has no runtime config file; the backend URL and locale are
//! baked in from `METRICBOARD_API_URL` and `METRICBOARD_LOCALE` when the
//! crate is compiled.

use metricboard_app::config::{ClientConfig, DEFAULT_API_BASE_URL};

pub fn client_config() -> ClientConfig {
    let defaults = ClientConfig::default();
    ClientConfig {
        api_base_url: option_env!("METRICBOARD_API_URL")
            .unwrap_or(DEFAULT_API_BASE_URL)
            .to_string(),
        locale: option_env!("METRICBOARD_LOCALE")
            .and_then(|tag| tag.parse().ok())
            .unwrap_or(defaults.locale),
        ..defaults
    }
}
