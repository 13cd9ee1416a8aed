//! Application state, the single source of truth for rendering.
//!
//! Components receive `&AppState` through props; only the reducer mutates
//! it. Derived values (map center, selected listing) are computed on
//! demand so they can never go stale.

use crate::action::{AuthField, FormField};
use crate::geo::{resolve, Coordinate, Resolved};
use crate::listing::{CreateRequest, Listing, ListingId, Role, UserProfile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Auth,
    Main,
}

/// Which panel the main view shows. Host mode requires a host session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Customer,
    Host,
}

/// Latest state of the continuous position watch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GpsState {
    /// Most recent fix, if any arrived this session.
    pub last_fix: Option<Coordinate>,
    /// Last watch error, shown as a status line. Never blocks resolution.
    pub status: Option<String>,
}

/// Login/signup form.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthForm {
    pub is_signup: bool,
    pub role: Role,
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub focus: AuthField,
    pub error: Option<String>,
    pub submitting: bool,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self {
            is_signup: false,
            role: Role::Customer,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            address: String::new(),
            focus: AuthField::Email,
            error: None,
            submitting: false,
        }
    }
}

impl AuthForm {
    /// Fields reachable with tab for the current login/signup shape.
    pub fn fields(&self) -> &'static [AuthField] {
        if self.is_signup {
            &[
                AuthField::Name,
                AuthField::Email,
                AuthField::Password,
                AuthField::Address,
            ]
        } else {
            &[AuthField::Email, AuthField::Password]
        }
    }

    pub fn value(&self, field: AuthField) -> &str {
        match field {
            AuthField::Name => &self.name,
            AuthField::Email => &self.email,
            AuthField::Password => &self.password,
            AuthField::Address => &self.address,
        }
    }

    pub fn set_value(&mut self, field: AuthField, value: String) {
        match field {
            AuthField::Name => self.name = value,
            AuthField::Email => self.email = value,
            AuthField::Password => self.password = value,
            AuthField::Address => self.address = value,
        }
    }

    /// Client-side validation; returns the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.is_signup && self.name.trim().is_empty() {
            return Err("Full name is required".into());
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("A valid email address is required".into());
        }
        if self.password.is_empty() {
            return Err("Password is required".into());
        }
        Ok(())
    }
}

/// Validation failure from the create form. `field` is absent for
/// problems that are not tied to a text field (e.g. the draft location).
#[derive(Clone, Debug, PartialEq)]
pub struct CreateError {
    pub field: Option<FormField>,
    pub message: String,
}

impl CreateError {
    fn field(field: FormField, message: &str) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }
}

/// Create-event form, present in state only while open.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub event_date: String,
    pub booking_link: String,
    pub address: String,
    pub image_path: String,
    pub focus: FormField,
    pub error: Option<CreateError>,
    pub submitting: bool,
}

impl Default for CreateForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            event_date: String::new(),
            booking_link: String::new(),
            address: String::new(),
            image_path: String::new(),
            focus: FormField::Title,
            error: None,
            submitting: false,
        }
    }
}

impl CreateForm {
    pub const FIELDS: [FormField; 7] = [
        FormField::Title,
        FormField::Description,
        FormField::Category,
        FormField::EventDate,
        FormField::BookingLink,
        FormField::Address,
        FormField::ImagePath,
    ];

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Category => &self.category,
            FormField::EventDate => &self.event_date,
            FormField::BookingLink => &self.booking_link,
            FormField::Address => &self.address,
            FormField::ImagePath => &self.image_path,
        }
    }

    pub fn set_value(&mut self, field: FormField, value: String) {
        match field {
            FormField::Title => self.title = value,
            FormField::Description => self.description = value,
            FormField::Category => self.category = value,
            FormField::EventDate => self.event_date = value,
            FormField::BookingLink => self.booking_link = value,
            FormField::Address => self.address = value,
            FormField::ImagePath => self.image_path = value,
        }
    }

    /// Validate and assemble the request. Checked in display order, the
    /// draft location last; no network call happens unless this passes.
    pub fn validate(
        &self,
        draft: Option<Coordinate>,
        host: Option<i64>,
    ) -> Result<CreateRequest, CreateError> {
        if self.title.trim().is_empty() {
            return Err(CreateError::field(FormField::Title, "Event title is required"));
        }
        if self.description.trim().is_empty() {
            return Err(CreateError::field(
                FormField::Description,
                "Event description is required",
            ));
        }
        if self.event_date.trim().is_empty() {
            return Err(CreateError::field(
                FormField::EventDate,
                "Event date and time is required",
            ));
        }
        if self.booking_link.trim().is_empty() {
            return Err(CreateError::field(
                FormField::BookingLink,
                "Booking link is required",
            ));
        }
        let Some(coordinate) = draft else {
            return Err(CreateError {
                field: None,
                message: "Click on the map to choose the event location".into(),
            });
        };
        let Some(host) = host else {
            return Err(CreateError {
                field: None,
                message: "Only hosts can create events".into(),
            });
        };
        let category = if self.category.trim().is_empty() {
            "Other".to_string()
        } else {
            self.category.trim().to_string()
        };
        let image_path = if self.image_path.trim().is_empty() {
            None
        } else {
            Some(self.image_path.trim().to_string())
        };
        Ok(CreateRequest {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category,
            event_date: self.event_date.trim().to_string(),
            booking_link: self.booking_link.trim().to_string(),
            address: self.address.trim().to_string(),
            coordinate,
            host,
            image_path,
        })
    }
}

/// Everything the UI needs to render.
#[derive(Clone, Debug)]
pub struct AppState {
    pub view: View,
    pub mode: Mode,
    pub session: Option<UserProfile>,

    pub listings: Vec<Listing>,
    pub listings_loading: bool,
    /// Last fetch failure; the previous collection is retained.
    pub listings_notice: Option<String>,

    pub gps: GpsState,
    /// Uncommitted event location picked by clicking the map.
    pub draft_location: Option<Coordinate>,
    /// Focused listing; detail view derives from it by fresh lookup.
    pub selected: Option<ListingId>,

    pub auth: AuthForm,
    pub create: Option<CreateForm>,
    /// Toggle failures, shown inline in the host panel.
    pub host_notice: Option<String>,

    pub search: String,
    pub search_active: bool,
    pub category_filter: Option<String>,

    /// Vertical map span in degrees of latitude.
    pub map_span: f64,
    default_center: Coordinate,

    pub tick: u32,
}

impl AppState {
    pub const DEFAULT_SPAN: f64 = 0.08;
    pub const MIN_SPAN: f64 = 0.005;
    pub const MAX_SPAN: f64 = 1.28;

    /// `default_center` must already be validated (configuration error
    /// otherwise, caught when CLI arguments are parsed).
    pub fn new(default_center: Coordinate) -> Self {
        debug_assert!(default_center.is_valid());
        Self {
            view: View::Auth,
            mode: Mode::Customer,
            session: None,
            listings: Vec::new(),
            listings_loading: false,
            listings_notice: None,
            gps: GpsState::default(),
            draft_location: None,
            selected: None,
            auth: AuthForm::default(),
            create: None,
            host_notice: None,
            search: String::new(),
            search_active: false,
            category_filter: None,
            map_span: Self::DEFAULT_SPAN,
            default_center,
            tick: 0,
        }
    }

    pub fn default_center(&self) -> Coordinate {
        self.default_center
    }

    /// Stored home/business coordinate of the signed-in profile.
    pub fn home_coordinate(&self) -> Option<Coordinate> {
        self.session
            .as_ref()
            .and_then(|p| p.home.as_ref())
            .map(|h| h.coordinate)
    }

    /// The single authoritative map center, recomputed from the three
    /// competing sources on every call.
    pub fn map_center(&self) -> Resolved {
        resolve(self.gps.last_fix, self.home_coordinate(), self.default_center)
    }

    /// Fresh lookup of the selected listing. A refresh that removed the
    /// id yields `None` and the panel falls back to the list.
    pub fn selected_listing(&self) -> Option<&Listing> {
        let id = self.selected?;
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn contains_listing(&self, id: ListingId) -> bool {
        self.listings.iter().any(|l| l.id == id)
    }

    /// Customer-facing list, filtered by search text and category chip.
    pub fn visible_listings(&self) -> Vec<&Listing> {
        let needle = self.search.to_lowercase();
        self.listings
            .iter()
            .filter(|l| {
                needle.is_empty()
                    || l.title.to_lowercase().contains(&needle)
                    || l.category.to_lowercase().contains(&needle)
            })
            .filter(|l| match &self.category_filter {
                Some(cat) => &l.category == cat,
                None => true,
            })
            .collect()
    }

    /// Distinct categories present in the current feed, sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut cats: Vec<String> = self.listings.iter().map(|l| l.category.clone()).collect();
        cats.sort();
        cats.dedup();
        cats
    }

    /// Listings owned by the signed-in host.
    pub fn host_listings(&self) -> Vec<&Listing> {
        let host_id = self.session.as_ref().and_then(|p| p.host_profile_id);
        match host_id {
            Some(id) => self.listings.iter().filter(|l| l.host == Some(id)).collect(),
            None => Vec::new(),
        }
    }

    pub fn is_host(&self) -> bool {
        self.session
            .as_ref()
            .map(|p| p.role == Role::Host)
            .unwrap_or(false)
    }

    /// Whether any async operation wants the spinner animated.
    pub fn is_busy(&self) -> bool {
        self.listings_loading
            || self.auth.submitting
            || self.create.as_ref().map(|c| c.submitting).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::LocationSource;
    use crate::listing::{HomeLocation, ListingKind};

    fn listing(id: i64, title: &str) -> Listing {
        Listing {
            id: ListingId(id),
            kind: ListingKind::Vendor,
            title: title.into(),
            category: "Street Food".into(),
            coordinate: Coordinate::new(40.7128, -74.0060),
            address: "123 Neon Alley".into(),
            is_open: true,
            host: Some(7),
            event_date: None,
            booking_link: None,
            image_url: None,
            expected_visits: 12,
        }
    }

    fn state() -> AppState {
        AppState::new(Coordinate::new(28.6139, 77.2090))
    }

    #[test]
    fn map_center_uses_precedence() {
        let mut s = state();
        assert_eq!(s.map_center().source, LocationSource::Default);

        s.session = Some(UserProfile {
            id: 1,
            name: "Rider".into(),
            email: "r@example.com".into(),
            role: Role::Customer,
            home: Some(HomeLocation {
                coordinate: Coordinate::new(40.71, -74.00),
                address: "123 Neon Way".into(),
            }),
            host_profile_id: None,
        });
        let resolved = s.map_center();
        assert_eq!(resolved.source, LocationSource::Home);
        assert_eq!(resolved.coordinate, Coordinate::new(40.71, -74.00));

        s.gps.last_fix = Some(Coordinate::new(12.9, 77.6));
        assert_eq!(s.map_center().source, LocationSource::Gps);
    }

    #[test]
    fn selected_listing_is_fresh_lookup() {
        let mut s = state();
        s.listings = vec![listing(1, "Midnight Ramen"), listing(2, "Glow Tacos")];
        s.selected = Some(ListingId(2));
        assert_eq!(s.selected_listing().unwrap().title, "Glow Tacos");

        // Refresh drops id 2: the lookup must come back empty, not stale.
        s.listings = vec![listing(1, "Midnight Ramen")];
        assert!(s.selected_listing().is_none());
    }

    #[test]
    fn visible_listings_filters_search_and_category() {
        let mut s = state();
        let mut cafe = listing(3, "Lunar Coffee Bar");
        cafe.category = "Cafe".into();
        s.listings = vec![listing(1, "Midnight Ramen"), cafe];

        s.search = "lunar".into();
        assert_eq!(s.visible_listings().len(), 1);

        s.search.clear();
        s.category_filter = Some("Cafe".into());
        let visible = s.visible_listings();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Lunar Coffee Bar");
    }

    #[test]
    fn create_form_validates_in_display_order() {
        let form = CreateForm::default();
        let err = form.validate(None, Some(7)).unwrap_err();
        assert_eq!(err.field, Some(FormField::Title));

        let mut form = CreateForm {
            title: "Night Market".into(),
            description: "Street food until 3am".into(),
            event_date: "2026-08-15T22:00".into(),
            booking_link: "https://example.com/book".into(),
            ..CreateForm::default()
        };

        // Every text field present but no draft pin yet.
        let err = form.validate(None, Some(7)).unwrap_err();
        assert_eq!(err.field, None);
        assert!(err.message.contains("map"));

        form.category = "  ".into();
        let req = form
            .validate(Some(Coordinate::new(12.9, 77.6)), Some(7))
            .unwrap();
        assert_eq!(req.category, "Other");
        assert_eq!(req.coordinate, Coordinate::new(12.9, 77.6));
        assert_eq!(req.image_path, None);
    }

    #[test]
    fn auth_form_field_cycle_depends_on_shape() {
        let mut form = AuthForm::default();
        assert_eq!(form.fields().len(), 2);
        form.is_signup = true;
        assert_eq!(form.fields().len(), 4);
    }
}
