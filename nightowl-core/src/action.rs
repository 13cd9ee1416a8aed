//! Actions: every way the application state can change.
//!
//! Naming convention: intent actions trigger async work
//! (`ListingsFetch`), `Did` actions carry the outcome back
//! (`ListingsDidLoad`, `ListingsDidError`). Verbs go last.

use crate::geo::Coordinate;
use crate::listing::{Listing, ListingId, UserProfile};
use crate::state::Mode;

/// Text field of the login/signup form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
    Address,
}

/// Text field of the create-event form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Category,
    EventDate,
    BookingLink,
    Address,
    ImagePath,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Category => "Category",
            FormField::EventDate => "Event date",
            FormField::BookingLink => "Booking link",
            FormField::Address => "Address",
            FormField::ImagePath => "Image path",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Auth =====
    AuthFieldChange(AuthField, String),
    AuthFocusNext,
    AuthFocusPrev,
    AuthToggleSignup,
    AuthToggleRole,
    AuthSubmit,
    AuthDidComplete(UserProfile),
    AuthDidError(String),
    Logout,

    // ===== Listings =====
    ListingsFetch,
    ListingsDidLoad(Vec<Listing>),
    ListingsDidError(String),
    ListingSelect(ListingId),
    ListingDeselect,

    // ===== Customer list controls =====
    SearchOpen,
    SearchClose,
    SearchChange(String),
    CategoryCycle,

    // ===== Host =====
    ModeSet(Mode),
    ToggleListing(ListingId),
    ToggleDidComplete(Listing),
    ToggleDidError(String),

    // ===== Create-event form =====
    CreateFormOpen,
    CreateFormCancel,
    CreateFieldChange(FormField, String),
    CreateFocusNext,
    CreateFocusPrev,
    CreateSubmit,
    CreateDidComplete(Listing),
    CreateDidError(String),

    // ===== Map and location =====
    MapClick(Coordinate),
    MapZoomIn,
    MapZoomOut,
    GeocodeDidResolve {
        coordinate: Coordinate,
        address: String,
    },
    GeocodeDidError(String),
    GpsDidUpdate(Coordinate),
    GpsDidError(String),

    // ===== Global =====
    Tick,
    Quit,
}

impl Action {
    /// Action name for logging and filtering.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AuthFieldChange(..) => "AuthFieldChange",
            Action::AuthFocusNext => "AuthFocusNext",
            Action::AuthFocusPrev => "AuthFocusPrev",
            Action::AuthToggleSignup => "AuthToggleSignup",
            Action::AuthToggleRole => "AuthToggleRole",
            Action::AuthSubmit => "AuthSubmit",
            Action::AuthDidComplete(_) => "AuthDidComplete",
            Action::AuthDidError(_) => "AuthDidError",
            Action::Logout => "Logout",
            Action::ListingsFetch => "ListingsFetch",
            Action::ListingsDidLoad(_) => "ListingsDidLoad",
            Action::ListingsDidError(_) => "ListingsDidError",
            Action::ListingSelect(_) => "ListingSelect",
            Action::ListingDeselect => "ListingDeselect",
            Action::SearchOpen => "SearchOpen",
            Action::SearchClose => "SearchClose",
            Action::SearchChange(_) => "SearchChange",
            Action::CategoryCycle => "CategoryCycle",
            Action::ModeSet(_) => "ModeSet",
            Action::ToggleListing(_) => "ToggleListing",
            Action::ToggleDidComplete(_) => "ToggleDidComplete",
            Action::ToggleDidError(_) => "ToggleDidError",
            Action::CreateFormOpen => "CreateFormOpen",
            Action::CreateFormCancel => "CreateFormCancel",
            Action::CreateFieldChange(..) => "CreateFieldChange",
            Action::CreateFocusNext => "CreateFocusNext",
            Action::CreateFocusPrev => "CreateFocusPrev",
            Action::CreateSubmit => "CreateSubmit",
            Action::CreateDidComplete(_) => "CreateDidComplete",
            Action::CreateDidError(_) => "CreateDidError",
            Action::MapClick(_) => "MapClick",
            Action::MapZoomIn => "MapZoomIn",
            Action::MapZoomOut => "MapZoomOut",
            Action::GeocodeDidResolve { .. } => "GeocodeDidResolve",
            Action::GeocodeDidError(_) => "GeocodeDidError",
            Action::GpsDidUpdate(_) => "GpsDidUpdate",
            Action::GpsDidError(_) => "GpsDidError",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }

    /// Concise form for action logging; data-heavy payloads are
    /// summarized instead of dumped.
    pub fn summary(&self) -> String {
        match self {
            Action::ListingsDidLoad(listings) => {
                format!("ListingsDidLoad {{ count: {} }}", listings.len())
            }
            Action::AuthDidComplete(profile) => {
                format!("AuthDidComplete {{ id: {} }}", profile.id)
            }
            Action::AuthFieldChange(AuthField::Password, _) => {
                "AuthFieldChange(Password, ***)".to_string()
            }
            other => format!("{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_hides_password_and_payloads() {
        let a = Action::AuthFieldChange(AuthField::Password, "hunter2".into());
        assert!(!a.summary().contains("hunter2"));

        let a = Action::ListingsDidLoad(vec![]);
        assert_eq!(a.summary(), "ListingsDidLoad { count: 0 }");
    }
}
