//! Reverse geocoding against a nominatim-compatible service.

use tracing::debug;

use nightowl_core::Coordinate;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::wire::ReverseDto;

#[derive(Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodeClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.geocode_url.clone(),
        }
    }

    /// Resolve a coordinate into a human-readable address string
    /// (road, locality, county, state - whatever the service knows).
    pub async fn reverse(&self, coordinate: Coordinate) -> Result<String, ApiError> {
        let url = format!(
            "{}/reverse?format=jsonv2&lat={}&lon={}",
            self.base_url, coordinate.lat, coordinate.lng
        );
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            body.truncate(300);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let dto: ReverseDto = response
            .json()
            .await
            .map_err(|e| ApiError::decode("reverse geocode", e.to_string()))?;
        let address = dto.display_address()?;
        debug!(%coordinate, %address, "reverse geocoded");
        Ok(address)
    }
}
