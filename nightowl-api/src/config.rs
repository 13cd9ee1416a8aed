//! Injected endpoint configuration.

use std::time::Duration;

/// Where the backend and the geocoder live. Constructed once from CLI
/// arguments and handed to the clients.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Backend base URL, no trailing slash (e.g. `http://127.0.0.1:8000`).
    pub base_url: String,
    /// Reverse-geocoder base URL, no trailing slash.
    pub geocode_url: String,
}

impl ApiConfig {
    pub const DEFAULT_GEOCODE_URL: &'static str = "https://nominatim.openstreetmap.org";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_slash(base_url.into()),
            geocode_url: Self::DEFAULT_GEOCODE_URL.to_string(),
        }
    }

    pub fn with_geocode_url(mut self, url: impl Into<String>) -> Self {
        self.geocode_url = trim_slash(url.into());
        self
    }
}

/// Continuous position source: a JSON endpoint polled at an interval.
#[derive(Clone, Debug)]
pub struct PositionConfig {
    /// Endpoint returning `{ "lat": .., "lon": .. }`.
    pub url: String,
    pub interval: Duration,
}

impl PositionConfig {
    pub const DEFAULT_URL: &'static str = "http://ip-api.com/json/";

    pub fn new(url: impl Into<String>, interval: Duration) -> Self {
        Self {
            url: url.into(),
            interval,
        }
    }
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_URL, Duration::from_secs(30))
    }
}

fn trim_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
