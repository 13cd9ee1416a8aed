//! The reducer: `(state, action) -> DispatchResult`.
//!
//! All state transitions happen here. Async outcomes arrive as `Did`
//! actions; failures become local UI state and never escape the loop.

use tracing::{debug, info, warn};

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::listing::Role;
use crate::state::{AppState, CreateError, CreateForm, Mode, View};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult {
    match action {
        // ===== Auth =====
        Action::AuthFieldChange(field, value) => {
            state.auth.set_value(field, value);
            state.auth.error = None;
            DispatchResult::changed()
        }

        Action::AuthFocusNext => {
            cycle_auth_focus(state, 1);
            DispatchResult::changed()
        }

        Action::AuthFocusPrev => {
            cycle_auth_focus(state, -1);
            DispatchResult::changed()
        }

        Action::AuthToggleSignup => {
            state.auth.is_signup = !state.auth.is_signup;
            state.auth.error = None;
            // Focus may point at a field the other shape does not have.
            if !state.auth.fields().contains(&state.auth.focus) {
                state.auth.focus = state.auth.fields()[0];
            }
            DispatchResult::changed()
        }

        Action::AuthToggleRole => {
            if state.auth.is_signup {
                state.auth.role = match state.auth.role {
                    Role::Customer => Role::Host,
                    Role::Host => Role::Customer,
                };
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::AuthSubmit => {
            if state.auth.submitting {
                return DispatchResult::unchanged();
            }
            if let Err(message) = state.auth.validate() {
                state.auth.error = Some(message);
                return DispatchResult::changed();
            }
            state.auth.submitting = true;
            let effect = if state.auth.is_signup {
                match state.auth.role {
                    Role::Host => Effect::SignupHost {
                        name: state.auth.name.clone(),
                        email: state.auth.email.clone(),
                        password: state.auth.password.clone(),
                        address: state.auth.address.clone(),
                    },
                    Role::Customer => Effect::SignupUser {
                        name: state.auth.name.clone(),
                        email: state.auth.email.clone(),
                        password: state.auth.password.clone(),
                    },
                }
            } else {
                Effect::Login {
                    email: state.auth.email.clone(),
                    password: state.auth.password.clone(),
                }
            };
            DispatchResult::changed_with(effect)
        }

        Action::AuthDidComplete(profile) => {
            info!(user = profile.id, role = ?profile.role, "signed in");
            state.mode = match profile.role {
                Role::Host => Mode::Host,
                Role::Customer => Mode::Customer,
            };
            state.session = Some(profile);
            state.view = View::Main;
            state.auth = Default::default();
            DispatchResult::changed_with_many(vec![
                Effect::FetchListings,
                Effect::StartPositionWatch,
            ])
        }

        Action::AuthDidError(message) => {
            state.auth.submitting = false;
            state.auth.error = Some(message);
            DispatchResult::changed()
        }

        Action::Logout => {
            state.session = None;
            state.view = View::Auth;
            state.mode = Mode::Customer;
            state.listings.clear();
            state.listings_loading = false;
            state.listings_notice = None;
            state.selected = None;
            state.draft_location = None;
            state.create = None;
            state.host_notice = None;
            state.search.clear();
            state.search_active = false;
            state.category_filter = None;
            state.gps = Default::default();
            DispatchResult::changed_with(Effect::StopPositionWatch)
        }

        // ===== Listings =====
        Action::ListingsFetch => {
            // The refresh interval keeps firing on the auth screen.
            if state.view != View::Main {
                return DispatchResult::unchanged();
            }
            state.listings_loading = true;
            state.listings_notice = None;
            DispatchResult::changed_with(Effect::FetchListings)
        }

        Action::ListingsDidLoad(listings) => {
            state.listings_loading = false;
            state.listings = listings;
            if let Some(id) = state.selected {
                if !state.contains_listing(id) {
                    debug!(%id, "selected listing vanished on refresh, back to list");
                    state.selected = None;
                }
            }
            DispatchResult::changed()
        }

        Action::ListingsDidError(message) => {
            warn!(%message, "listing refresh failed, keeping previous feed");
            state.listings_loading = false;
            state.listings_notice = Some(message);
            DispatchResult::changed()
        }

        Action::ListingSelect(id) => {
            if !state.contains_listing(id) {
                debug!(%id, "select ignored: id not in current feed");
                return DispatchResult::unchanged();
            }
            if state.selected == Some(id) {
                return DispatchResult::unchanged();
            }
            state.selected = Some(id);
            DispatchResult::changed()
        }

        Action::ListingDeselect => {
            if state.selected.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Customer list controls =====
        Action::SearchOpen => {
            state.search_active = true;
            DispatchResult::changed()
        }

        Action::SearchClose => {
            state.search_active = false;
            DispatchResult::changed()
        }

        Action::SearchChange(value) => {
            state.search = value;
            DispatchResult::changed()
        }

        Action::CategoryCycle => {
            let cats = state.categories();
            state.category_filter = match &state.category_filter {
                None => cats.first().cloned(),
                Some(current) => cats
                    .iter()
                    .position(|c| c == current)
                    .and_then(|i| cats.get(i + 1))
                    .cloned(),
            };
            DispatchResult::changed()
        }

        // ===== Host =====
        Action::ModeSet(mode) => {
            if mode == Mode::Host && !state.is_host() {
                return DispatchResult::unchanged();
            }
            if state.mode == mode {
                return DispatchResult::unchanged();
            }
            state.mode = mode;
            state.selected = None;
            state.create = None;
            state.draft_location = None;
            state.host_notice = None;
            DispatchResult::changed()
        }

        Action::ToggleListing(id) => {
            let owns = state.host_listings().iter().any(|l| l.id == id);
            if !owns {
                debug!(%id, "toggle ignored: not owned by this host");
                return DispatchResult::unchanged();
            }
            state.host_notice = None;
            DispatchResult::effect(Effect::ToggleListing(id))
        }

        Action::ToggleDidComplete(updated) => {
            match state.listings.iter_mut().find(|l| l.id == updated.id) {
                Some(slot) => {
                    *slot = updated;
                    DispatchResult::changed()
                }
                None => DispatchResult::unchanged(),
            }
        }

        Action::ToggleDidError(message) => {
            state.host_notice = Some(message);
            DispatchResult::changed()
        }

        // ===== Create-event form =====
        Action::CreateFormOpen => {
            if state.mode != Mode::Host || state.create.is_some() {
                return DispatchResult::unchanged();
            }
            state.create = Some(CreateForm::default());
            state.host_notice = None;
            DispatchResult::changed()
        }

        Action::CreateFormCancel => {
            if state.create.take().is_none() {
                return DispatchResult::unchanged();
            }
            // Discard the draft pin along with the form.
            state.draft_location = None;
            DispatchResult::changed()
        }

        Action::CreateFieldChange(field, value) => {
            let Some(form) = state.create.as_mut() else {
                return DispatchResult::unchanged();
            };
            form.set_value(field, value);
            form.error = None;
            DispatchResult::changed()
        }

        Action::CreateFocusNext => {
            cycle_create_focus(state, 1);
            DispatchResult::changed()
        }

        Action::CreateFocusPrev => {
            cycle_create_focus(state, -1);
            DispatchResult::changed()
        }

        Action::CreateSubmit => {
            let host = state.session.as_ref().and_then(|p| p.host_profile_id);
            let draft = state.draft_location;
            let Some(form) = state.create.as_mut() else {
                return DispatchResult::unchanged();
            };
            if form.submitting {
                return DispatchResult::unchanged();
            }
            match form.validate(draft, host) {
                Err(error) => {
                    form.error = Some(error);
                    DispatchResult::changed()
                }
                Ok(request) => {
                    form.submitting = true;
                    form.error = None;
                    DispatchResult::changed_with(Effect::CreateListing(request))
                }
            }
        }

        Action::CreateDidComplete(listing) => {
            info!(id = %listing.id, "event created");
            state.create = None;
            // Draft consumed by the successful submit.
            state.draft_location = None;
            state.listings.push(listing);
            DispatchResult::changed_with(Effect::FetchListings)
        }

        Action::CreateDidError(message) => {
            let Some(form) = state.create.as_mut() else {
                return DispatchResult::unchanged();
            };
            form.submitting = false;
            form.error = Some(CreateError {
                field: None,
                message,
            });
            DispatchResult::changed()
        }

        // ===== Map and location =====
        Action::MapClick(coordinate) => {
            // Clicks only mean "place the pin" while composing an event.
            if state.create.is_none() {
                return DispatchResult::unchanged();
            }
            if !coordinate.is_valid() {
                return DispatchResult::unchanged();
            }
            // Last write wins; a new click replaces the previous draft.
            state.draft_location = Some(coordinate);
            DispatchResult::changed_with(Effect::ReverseGeocode(coordinate))
        }

        Action::MapZoomIn => {
            let span = (state.map_span / 2.0).max(AppState::MIN_SPAN);
            if span == state.map_span {
                return DispatchResult::unchanged();
            }
            state.map_span = span;
            DispatchResult::changed()
        }

        Action::MapZoomOut => {
            let span = (state.map_span * 2.0).min(AppState::MAX_SPAN);
            if span == state.map_span {
                return DispatchResult::unchanged();
            }
            state.map_span = span;
            DispatchResult::changed()
        }

        Action::GeocodeDidResolve {
            coordinate,
            address,
        } => {
            // Value-level fence: the result names the coordinate it was
            // resolved for; a draft moved or cleared in the meantime makes
            // it stale.
            if state.draft_location != Some(coordinate) {
                debug!("stale geocode result dropped");
                return DispatchResult::unchanged();
            }
            match state.create.as_mut() {
                Some(form) => {
                    form.address = address;
                    DispatchResult::changed()
                }
                None => DispatchResult::unchanged(),
            }
        }

        Action::GeocodeDidError(message) => {
            // Best effort: the host can still type the address.
            warn!(%message, "reverse geocode failed");
            DispatchResult::unchanged()
        }

        Action::GpsDidUpdate(coordinate) => {
            if !coordinate.is_valid() {
                warn!(?coordinate, "discarding invalid position fix");
                return DispatchResult::unchanged();
            }
            if state.gps.last_fix.is_none() {
                info!(%coordinate, "position fix acquired");
            }
            if state.gps.last_fix == Some(coordinate) && state.gps.status.is_none() {
                return DispatchResult::unchanged();
            }
            state.gps.last_fix = Some(coordinate);
            state.gps.status = None;
            DispatchResult::changed()
        }

        Action::GpsDidError(message) => {
            // Non-fatal: resolution falls back to home/default.
            warn!(%message, "position watch error");
            if state.gps.status.as_deref() == Some(message.as_str()) {
                return DispatchResult::unchanged();
            }
            state.gps.status = Some(message);
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::Tick => {
            state.tick = state.tick.wrapping_add(1);
            if state.is_busy() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => {
            // Handled by the runtime's quit predicate.
            DispatchResult::unchanged()
        }
    }
}

fn cycle_auth_focus(state: &mut AppState, step: isize) {
    let fields = state.auth.fields();
    let len = fields.len() as isize;
    let current = fields
        .iter()
        .position(|f| *f == state.auth.focus)
        .unwrap_or(0) as isize;
    let next = (current + step).rem_euclid(len) as usize;
    state.auth.focus = fields[next];
}

fn cycle_create_focus(state: &mut AppState, step: isize) {
    let Some(form) = state.create.as_mut() else {
        return;
    };
    let fields = CreateForm::FIELDS;
    let len = fields.len() as isize;
    let current = fields.iter().position(|f| *f == form.focus).unwrap_or(0) as isize;
    let next = (current + step).rem_euclid(len) as usize;
    form.focus = fields[next];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::AuthField;
    use crate::geo::{Coordinate, LocationSource};
    use crate::listing::{HomeLocation, Listing, ListingId, ListingKind, Role, UserProfile};

    const DELHI: Coordinate = Coordinate::new(28.6139, 77.2090);

    fn listing(id: i64, host: Option<i64>) -> Listing {
        Listing {
            id: ListingId(id),
            kind: ListingKind::Vendor,
            title: format!("Stall {id}"),
            category: "Street Food".into(),
            coordinate: Coordinate::new(40.7128, -74.0060),
            address: "123 Neon Alley".into(),
            is_open: true,
            host,
            event_date: None,
            booking_link: None,
            image_url: None,
            expected_visits: 5,
        }
    }

    fn host_profile() -> UserProfile {
        UserProfile {
            id: 3,
            name: "Night Market Co".into(),
            email: "host@example.com".into(),
            role: Role::Host,
            home: Some(HomeLocation {
                coordinate: Coordinate::new(40.71, -74.00),
                address: "45 Moonlit Dr".into(),
            }),
            host_profile_id: Some(7),
        }
    }

    fn main_state() -> AppState {
        let mut state = AppState::new(DELHI);
        state.view = View::Main;
        state.session = Some(host_profile());
        state
    }

    fn open_create_form(state: &mut AppState) {
        state.mode = Mode::Host;
        assert!(reducer(state, Action::CreateFormOpen).changed);
    }

    // ===== Location resolver =====

    #[test]
    fn gps_error_never_blocks_resolution() {
        let mut state = main_state();
        let result = reducer(&mut state, Action::GpsDidError("permission denied".into()));
        assert!(result.changed);
        assert_eq!(state.gps.status.as_deref(), Some("permission denied"));
        // Home wins with no fix; never absent.
        let resolved = state.map_center();
        assert_eq!(resolved.source, LocationSource::Home);
        assert_eq!(resolved.coordinate, Coordinate::new(40.71, -74.00));
    }

    #[test]
    fn gps_fix_takes_over_and_clears_status() {
        let mut state = main_state();
        reducer(&mut state, Action::GpsDidError("timeout".into()));
        let fix = Coordinate::new(12.9, 77.6);
        assert!(reducer(&mut state, Action::GpsDidUpdate(fix)).changed);
        assert_eq!(state.gps.status, None);
        assert_eq!(state.map_center().coordinate, fix);
        assert_eq!(state.map_center().source, LocationSource::Gps);
    }

    #[test]
    fn invalid_fix_is_discarded() {
        let mut state = main_state();
        let result = reducer(&mut state, Action::GpsDidUpdate(Coordinate::new(99.0, 0.0)));
        assert!(!result.changed);
        assert_eq!(state.gps.last_fix, None);
    }

    #[test]
    fn repeated_identical_fix_does_not_rerender() {
        let mut state = main_state();
        let fix = Coordinate::new(12.9, 77.6);
        assert!(reducer(&mut state, Action::GpsDidUpdate(fix)).changed);
        assert!(!reducer(&mut state, Action::GpsDidUpdate(fix)).changed);
    }

    // ===== Draft lifecycle =====

    #[test]
    fn map_click_sets_draft_only_while_form_open() {
        let mut state = main_state();
        state.mode = Mode::Host;
        let spot = Coordinate::new(12.9, 77.6);

        // Form closed: click does nothing.
        assert!(!reducer(&mut state, Action::MapClick(spot)).changed);
        assert_eq!(state.draft_location, None);

        open_create_form(&mut state);
        let result = reducer(&mut state, Action::MapClick(spot));
        assert!(result.changed);
        assert_eq!(state.draft_location, Some(spot));
        assert_eq!(result.effects, vec![Effect::ReverseGeocode(spot)]);
    }

    #[test]
    fn new_click_overwrites_draft_last_write_wins() {
        let mut state = main_state();
        open_create_form(&mut state);
        reducer(&mut state, Action::MapClick(Coordinate::new(12.9, 77.6)));
        reducer(&mut state, Action::MapClick(Coordinate::new(12.95, 77.65)));
        assert_eq!(state.draft_location, Some(Coordinate::new(12.95, 77.65)));
    }

    #[test]
    fn cancel_discards_draft() {
        let mut state = main_state();
        open_create_form(&mut state);
        reducer(&mut state, Action::MapClick(Coordinate::new(12.9, 77.6)));
        let result = reducer(&mut state, Action::CreateFormCancel);
        assert!(result.changed);
        assert_eq!(state.create, None);
        assert_eq!(state.draft_location, None);
    }

    #[test]
    fn submit_without_draft_is_rejected_before_any_network_call() {
        let mut state = main_state();
        open_create_form(&mut state);
        {
            let form = state.create.as_mut().unwrap();
            form.title = "Night Market".into();
            form.description = "Food until 3am".into();
            form.event_date = "2026-08-15T22:00".into();
            form.booking_link = "https://example.com".into();
        }
        let result = reducer(&mut state, Action::CreateSubmit);
        assert!(result.changed);
        assert!(result.effects.is_empty(), "no network call without a draft");
        let err = state.create.as_ref().unwrap().error.as_ref().unwrap();
        assert!(err.message.contains("map"));
    }

    #[test]
    fn successful_submit_consumes_draft_and_refreshes() {
        let mut state = main_state();
        open_create_form(&mut state);
        let spot = Coordinate::new(12.9, 77.6);
        reducer(&mut state, Action::MapClick(spot));
        {
            let form = state.create.as_mut().unwrap();
            form.title = "Night Market".into();
            form.description = "Food until 3am".into();
            form.event_date = "2026-08-15T22:00".into();
            form.booking_link = "https://example.com".into();
        }
        let result = reducer(&mut state, Action::CreateSubmit);
        assert!(matches!(result.effects[..], [Effect::CreateListing(_)]));
        assert!(state.create.as_ref().unwrap().submitting);

        let mut created = listing(42, Some(7));
        created.kind = ListingKind::Event;
        let result = reducer(&mut state, Action::CreateDidComplete(created));
        assert_eq!(state.create, None);
        assert_eq!(state.draft_location, None, "draft consumed on success");
        assert!(result.effects.contains(&Effect::FetchListings));
    }

    #[test]
    fn create_error_keeps_form_and_draft() {
        let mut state = main_state();
        open_create_form(&mut state);
        reducer(&mut state, Action::MapClick(Coordinate::new(12.9, 77.6)));
        state.create.as_mut().unwrap().submitting = true;
        let result = reducer(&mut state, Action::CreateDidError("server said no".into()));
        assert!(result.changed);
        let form = state.create.as_ref().unwrap();
        assert!(!form.submitting);
        assert_eq!(form.error.as_ref().unwrap().message, "server said no");
        assert!(state.draft_location.is_some());
    }

    // ===== Geocode fencing =====

    #[test]
    fn geocode_result_applies_only_to_current_draft() {
        let mut state = main_state();
        open_create_form(&mut state);
        let first = Coordinate::new(12.9, 77.6);
        let second = Coordinate::new(12.95, 77.65);
        reducer(&mut state, Action::MapClick(first));
        reducer(&mut state, Action::MapClick(second));

        // Late result for the first click must be dropped.
        let stale = reducer(
            &mut state,
            Action::GeocodeDidResolve {
                coordinate: first,
                address: "Old Road".into(),
            },
        );
        assert!(!stale.changed);
        assert_eq!(state.create.as_ref().unwrap().address, "");

        let fresh = reducer(
            &mut state,
            Action::GeocodeDidResolve {
                coordinate: second,
                address: "MG Road, Bengaluru".into(),
            },
        );
        assert!(fresh.changed);
        assert_eq!(state.create.as_ref().unwrap().address, "MG Road, Bengaluru");
    }

    #[test]
    fn geocode_result_after_cancel_is_dropped() {
        let mut state = main_state();
        open_create_form(&mut state);
        let spot = Coordinate::new(12.9, 77.6);
        reducer(&mut state, Action::MapClick(spot));
        reducer(&mut state, Action::CreateFormCancel);
        let result = reducer(
            &mut state,
            Action::GeocodeDidResolve {
                coordinate: spot,
                address: "MG Road".into(),
            },
        );
        assert!(!result.changed);
    }

    // ===== Selection =====

    #[test]
    fn select_then_deselect_returns_to_list() {
        let mut state = main_state();
        state.listings = vec![listing(1, None), listing(2, None)];
        assert!(reducer(&mut state, Action::ListingSelect(ListingId(2))).changed);
        assert_eq!(state.selected, Some(ListingId(2)));
        assert!(reducer(&mut state, Action::ListingDeselect).changed);
        assert_eq!(state.selected, None);
        // Deselect again is a no-op.
        assert!(!reducer(&mut state, Action::ListingDeselect).changed);
    }

    #[test]
    fn select_unknown_id_is_defined_and_harmless() {
        let mut state = main_state();
        state.listings = vec![listing(1, None), listing(2, None)];
        let result = reducer(&mut state, Action::ListingSelect(ListingId(3)));
        assert!(!result.changed);
        assert_eq!(state.selected, None);
        assert!(state.selected_listing().is_none());
    }

    #[test]
    fn refresh_that_drops_selected_id_falls_back_to_list() {
        let mut state = main_state();
        state.listings = vec![listing(41, None), listing(42, None)];
        reducer(&mut state, Action::ListingSelect(ListingId(42)));

        let refreshed = vec![listing(41, None)];
        let result = reducer(&mut state, Action::ListingsDidLoad(refreshed));
        assert!(result.changed);
        assert_eq!(state.selected, None, "detail must not render a gone id");
        assert!(state.selected_listing().is_none());
    }

    // ===== Listings fetch =====

    #[test]
    fn fetch_failure_retains_previous_feed() {
        let mut state = main_state();
        state.listings = vec![listing(1, None)];
        reducer(&mut state, Action::ListingsFetch);
        let result = reducer(&mut state, Action::ListingsDidError("connection refused".into()));
        assert!(result.changed);
        assert_eq!(state.listings.len(), 1, "stale feed retained");
        assert!(state.listings_notice.is_some());
        assert!(!state.listings_loading);
    }

    #[test]
    fn fetch_is_ignored_on_auth_screen() {
        let mut state = AppState::new(DELHI);
        let result = reducer(&mut state, Action::ListingsFetch);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    // ===== Auth =====

    #[test]
    fn login_submit_validates_then_emits_effect() {
        let mut state = AppState::new(DELHI);
        let result = reducer(&mut state, Action::AuthSubmit);
        assert!(result.effects.is_empty());
        assert!(state.auth.error.is_some());

        reducer(
            &mut state,
            Action::AuthFieldChange(AuthField::Email, "owl@example.com".into()),
        );
        reducer(
            &mut state,
            Action::AuthFieldChange(AuthField::Password, "secret".into()),
        );
        let result = reducer(&mut state, Action::AuthSubmit);
        assert!(matches!(result.effects[..], [Effect::Login { .. }]));
        assert!(state.auth.submitting);
    }

    #[test]
    fn auth_complete_starts_watch_and_fetch() {
        let mut state = AppState::new(DELHI);
        let result = reducer(&mut state, Action::AuthDidComplete(host_profile()));
        assert_eq!(state.view, View::Main);
        assert_eq!(state.mode, Mode::Host);
        assert!(result.effects.contains(&Effect::FetchListings));
        assert!(result.effects.contains(&Effect::StartPositionWatch));
    }

    #[test]
    fn logout_releases_watch_and_clears_session_state() {
        let mut state = main_state();
        state.gps.last_fix = Some(Coordinate::new(12.9, 77.6));
        state.listings = vec![listing(1, None)];
        let result = reducer(&mut state, Action::Logout);
        assert_eq!(state.view, View::Auth);
        assert_eq!(state.session, None);
        assert!(state.listings.is_empty());
        assert_eq!(state.gps.last_fix, None);
        assert_eq!(result.effects, vec![Effect::StopPositionWatch]);
    }

    // ===== Host mode =====

    #[test]
    fn host_mode_requires_host_session() {
        let mut state = main_state();
        state.session.as_mut().unwrap().role = Role::Customer;
        state.session.as_mut().unwrap().host_profile_id = None;
        let result = reducer(&mut state, Action::ModeSet(Mode::Host));
        assert!(!result.changed);
        assert_eq!(state.mode, Mode::Customer);
    }

    #[test]
    fn toggle_only_for_owned_listings() {
        let mut state = main_state();
        state.mode = Mode::Host;
        state.listings = vec![listing(1, Some(7)), listing(2, Some(99))];

        let result = reducer(&mut state, Action::ToggleListing(ListingId(2)));
        assert!(result.effects.is_empty());

        let result = reducer(&mut state, Action::ToggleListing(ListingId(1)));
        assert_eq!(result.effects, vec![Effect::ToggleListing(ListingId(1))]);

        let mut updated = listing(1, Some(7));
        updated.is_open = false;
        reducer(&mut state, Action::ToggleDidComplete(updated));
        assert!(!state.listings[0].is_open);
    }

    // ===== Misc =====

    #[test]
    fn zoom_clamps_at_bounds() {
        let mut state = main_state();
        for _ in 0..32 {
            reducer(&mut state, Action::MapZoomIn);
        }
        assert_eq!(state.map_span, AppState::MIN_SPAN);
        assert!(!reducer(&mut state, Action::MapZoomIn).changed);

        for _ in 0..32 {
            reducer(&mut state, Action::MapZoomOut);
        }
        assert_eq!(state.map_span, AppState::MAX_SPAN);
        assert!(!reducer(&mut state, Action::MapZoomOut).changed);
    }

    #[test]
    fn tick_rerenders_only_while_busy() {
        let mut state = main_state();
        assert!(!reducer(&mut state, Action::Tick).changed);
        state.listings_loading = true;
        assert!(reducer(&mut state, Action::Tick).changed);
    }
}
