//! Network edge for NightOwl.
//!
//! Everything that talks to the outside world lives here: the backend
//! REST client, the nominatim reverse-geocoding client, and the
//! continuous position watch. Responses are parsed and validated into
//! `nightowl-core` types at this boundary; a malformed payload is a typed
//! [`ApiError::Decode`], never a half-populated value.
//!
//! All endpoints are configured through [`ApiConfig`] /
//! [`PositionConfig`] injected at construction; there are no ambient
//! base-URL constants.

pub mod client;
pub mod config;
pub mod error;
pub mod geocode;
pub mod position;
mod wire;

pub use client::ApiClient;
pub use config::{ApiConfig, PositionConfig};
pub use error::ApiError;
pub use geocode::GeocodeClient;
pub use position::{watch, PositionUpdate};
