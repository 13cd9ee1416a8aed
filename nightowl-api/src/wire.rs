//! Wire types: serde DTOs for every endpoint plus validating
//! conversions into domain types.
//!
//! The backend is permissive about optional fields, so most DTO fields
//! default; conversion is where the strictness lives. Coordinates are
//! range-checked and a bad value fails the whole decode with a typed
//! error instead of leaking into the map.

use serde::{Deserialize, Serialize};
use tracing::warn;

use nightowl_core::{Coordinate, HomeLocation, Listing, ListingId, ListingKind, Role, UserProfile};

use crate::error::ApiError;

// ============================================================================
// Listing feed
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ListingDto {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub listing_type: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub host: Option<i64>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub booking_link: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub expected_purchases: u32,
}

impl TryFrom<ListingDto> for Listing {
    type Error = ApiError;

    fn try_from(dto: ListingDto) -> Result<Self, ApiError> {
        let coordinate = Coordinate::new(dto.latitude, dto.longitude);
        if !coordinate.is_valid() {
            return Err(ApiError::decode(
                "listing",
                format!("listing {} has out-of-range coordinate {coordinate}", dto.id),
            ));
        }
        let kind = match dto.listing_type.as_deref() {
            None | Some("vendor") | Some("shop") => ListingKind::Vendor,
            Some("event") => ListingKind::Event,
            Some(other) => {
                return Err(ApiError::decode(
                    "listing",
                    format!("listing {} has unknown listing_type {other:?}", dto.id),
                ));
            }
        };
        Ok(Listing {
            id: ListingId(dto.id),
            kind,
            title: dto.title,
            category: dto.category.unwrap_or_else(|| "Other".to_string()),
            coordinate,
            address: dto.address.unwrap_or_default(),
            is_open: dto.is_open,
            host: dto.host,
            event_date: dto.event_date,
            booking_link: dto.booking_link,
            image_url: dto.image,
            expected_visits: dto.expected_purchases,
        })
    }
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignupBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub home_lat: Option<f64>,
    #[serde(default)]
    pub home_lng: Option<f64>,
    #[serde(default)]
    pub home_address: Option<String>,
    #[serde(default)]
    pub host_profile_id: Option<i64>,
}

impl TryFrom<ProfileDto> for UserProfile {
    type Error = ApiError;

    fn try_from(dto: ProfileDto) -> Result<Self, ApiError> {
        let role = match dto.role.to_ascii_lowercase().as_str() {
            "user" | "customer" => Role::Customer,
            "vendor" | "host" => Role::Host,
            other => {
                return Err(ApiError::decode(
                    "profile",
                    format!("unknown role {other:?}"),
                ));
            }
        };
        // The stored home address is an input to map-center resolution,
        // which treats invalid coordinates as absent; mirror that here
        // rather than failing the whole sign-in.
        let home = match (dto.home_lat, dto.home_lng) {
            (Some(lat), Some(lng)) => {
                let coordinate = Coordinate::new(lat, lng);
                if coordinate.is_valid() {
                    Some(HomeLocation {
                        coordinate,
                        address: dto.home_address.unwrap_or_default(),
                    })
                } else {
                    warn!(%coordinate, "profile home coordinate out of range, ignoring");
                    None
                }
            }
            _ => None,
        };
        Ok(UserProfile {
            id: dto.id,
            name: dto.name,
            email: dto.email,
            role,
            home,
            host_profile_id: dto.host_profile_id,
        })
    }
}

// ============================================================================
// Reverse geocoding (nominatim jsonv2)
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ReverseDto {
    #[serde(default)]
    pub address: Option<AddressDto>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddressDto {
    #[serde(default)]
    pub road: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub hamlet: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl ReverseDto {
    /// Best-effort display address: road, locality, county, state.
    pub fn display_address(self) -> Result<String, ApiError> {
        let addr = self.address.unwrap_or_default();
        let parts: Vec<String> = [
            addr.road.or(addr.street),
            addr.hamlet.or(addr.village).or(addr.town).or(addr.city),
            addr.county,
            addr.state,
        ]
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect();
        if parts.is_empty() {
            return Err(ApiError::decode(
                "reverse geocode",
                "response carried no address components",
            ));
        }
        Ok(parts.join(", "))
    }
}

// ============================================================================
// Position source
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct PositionDto {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl PositionDto {
    pub fn into_coordinate(self) -> Result<Coordinate, ApiError> {
        if self.status.as_deref() == Some("fail") {
            return Err(ApiError::decode(
                "position",
                self.message
                    .unwrap_or_else(|| "position source reported failure".to_string()),
            ));
        }
        let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
            return Err(ApiError::decode("position", "response carried no lat/lon"));
        };
        let coordinate = Coordinate::new(lat, lon);
        if !coordinate.is_valid() {
            return Err(ApiError::decode(
                "position",
                format!("coordinate out of range: {coordinate}"),
            ));
        }
        Ok(coordinate)
    }
}
