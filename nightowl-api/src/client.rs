//! Backend REST client.

use reqwest::multipart;
use tracing::debug;

use nightowl_core::{CreateRequest, Listing, ListingId, UserProfile};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::wire::{ListingDto, LoginBody, ProfileDto, SignupBody};

/// Client for the NightOwl backend. Cheap to clone; `reqwest::Client`
/// shares its connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        let response = self
            .http
            .post(self.url("/api/login/"))
            .json(&LoginBody { email, password })
            .send()
            .await?;
        let dto: ProfileDto = decode(response, "profile").await?;
        dto.try_into()
    }

    pub async fn signup_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, ApiError> {
        let body = SignupBody {
            name,
            email,
            password,
            address: None,
        };
        let response = self
            .http
            .post(self.url("/api/signup/user/"))
            .json(&body)
            .send()
            .await?;
        let dto: ProfileDto = decode(response, "profile").await?;
        dto.try_into()
    }

    pub async fn signup_host(
        &self,
        name: &str,
        email: &str,
        password: &str,
        address: &str,
    ) -> Result<UserProfile, ApiError> {
        let body = SignupBody {
            name,
            email,
            password,
            address: Some(address),
        };
        let response = self
            .http
            .post(self.url("/api/signup/host/"))
            .json(&body)
            .send()
            .await?;
        let dto: ProfileDto = decode(response, "profile").await?;
        dto.try_into()
    }

    /// Fetch the full listing feed.
    pub async fn fetch_listings(&self) -> Result<Vec<Listing>, ApiError> {
        let response = self.http.get(self.url("/api/export/")).send().await?;
        let dtos: Vec<ListingDto> = decode(response, "listing feed").await?;
        debug!(count = dtos.len(), "listing feed fetched");
        dtos.into_iter().map(Listing::try_from).collect()
    }

    /// Create a listing. Multipart: text fields plus an optional image
    /// file read from disk.
    pub async fn create_listing(&self, request: &CreateRequest) -> Result<Listing, ApiError> {
        let mut form = multipart::Form::new()
            .text("title", request.title.clone())
            .text("description", request.description.clone())
            .text("category", request.category.clone())
            .text("event_date", request.event_date.clone())
            .text("booking_link", request.booking_link.clone())
            .text("listing_type", "event")
            .text("latitude", request.coordinate.lat.to_string())
            .text("longitude", request.coordinate.lng.to_string())
            .text("address", request.address.clone())
            .text("host", request.host.to_string());

        if let Some(path) = &request.image_path {
            let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Image {
                path: path.clone(),
                source,
            })?;
            let file_name = std::path::Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            form = form.part("image", multipart::Part::bytes(bytes).file_name(file_name));
        }

        let response = self
            .http
            .post(self.url("/api/listings/"))
            .multipart(form)
            .send()
            .await?;
        let dto: ListingDto = decode(response, "listing").await?;
        dto.try_into()
    }

    /// Flip a vendor's open/closed state.
    pub async fn toggle_listing(&self, id: ListingId) -> Result<Listing, ApiError> {
        let response = self
            .http
            .post(self.url(&format!("/api/vendors/{id}/toggle/")))
            .send()
            .await?;
        let dto: ListingDto = decode(response, "listing").await?;
        dto.try_into()
    }
}

/// Map non-2xx to [`ApiError::Status`], then parse the JSON body.
async fn decode<D: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    context: &'static str,
) -> Result<D, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let mut body = response.text().await.unwrap_or_default();
        body.truncate(300);
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::decode(context, e.to_string()))
}
