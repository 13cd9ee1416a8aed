//! Domain state for NightOwl, a midnight vendor/event finder.
//!
//! This crate holds everything that can be reasoned about without I/O:
//!
//! - **Geo types and the location resolver**: the single authoritative
//!   map-center coordinate, chosen from live position fix, stored home
//!   address, and configured default by fixed precedence.
//! - **Listings model**: the unified vendor/event record served by the
//!   backend feed.
//! - **Application state and reducer**: an effect-emitting reducer in the
//!   Redux/Elm style. The reducer mutates [`AppState`] and declares
//!   [`Effect`]s; executing those effects (HTTP, position watch) is the
//!   binary crate's job.
//!
//! The draft-location lifecycle and the selection state live entirely in
//! the reducer: a map click while the create form is open sets the draft
//! (last write wins), submit consumes it, cancel discards it; selecting a
//! listing switches the panel to detail, and a listings refresh that drops
//! the selected id falls back to the list.

pub mod action;
pub mod effect;
pub mod geo;
pub mod listing;
pub mod reducer;
pub mod state;

pub use action::{Action, AuthField, FormField};
pub use effect::{DispatchResult, Effect, EffectStore};
pub use geo::{resolve, Coordinate, LocationSource, Resolved};
pub use listing::{
    CreateRequest, HomeLocation, Listing, ListingId, ListingKind, Role, UserProfile,
};
pub use reducer::reducer;
pub use state::{AppState, AuthForm, CreateError, CreateForm, GpsState, Mode, View};
