//! Listings and user profiles as served by the backend.

use crate::geo::Coordinate;

/// Backend primary key. Vendors and events share one keyspace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListingId(pub i64);

impl std::fmt::Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingKind {
    Vendor,
    Event,
}

impl ListingKind {
    pub fn label(&self) -> &'static str {
        match self {
            ListingKind::Vendor => "vendor",
            ListingKind::Event => "event",
        }
    }
}

/// One location-pinned listing: a shop that is open tonight or a one-off
/// event. The feed mixes both kinds.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    pub id: ListingId,
    pub kind: ListingKind,
    pub title: String,
    pub category: String,
    pub coordinate: Coordinate,
    pub address: String,
    pub is_open: bool,
    pub host: Option<i64>,
    pub event_date: Option<String>,
    pub booking_link: Option<String>,
    pub image_url: Option<String>,
    pub expected_visits: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Customer,
    Host,
}

/// Stored home (customers) or business (hosts) address.
#[derive(Clone, Debug, PartialEq)]
pub struct HomeLocation {
    pub coordinate: Coordinate,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub home: Option<HomeLocation>,
    /// Present for hosts; required to own listings.
    pub host_profile_id: Option<i64>,
}

/// Validated payload for `POST /api/listings/`, produced by the create
/// form once every required field and the draft location are present.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub event_date: String,
    pub booking_link: String,
    pub address: String,
    pub coordinate: Coordinate,
    pub host: i64,
    pub image_path: Option<String>,
}
