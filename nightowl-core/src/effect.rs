//! Effects and the effect-aware store.
//!
//! Effects are declarative descriptions of side work, not the work
//! itself: the reducer stays pure and returns them alongside the change
//! indicator; the runtime's effect handler turns them into keyed tasks
//! and subscriptions.

use tracing::debug;

use crate::action::Action;
use crate::geo::Coordinate;
use crate::listing::{CreateRequest, ListingId};
use crate::reducer::reducer;
use crate::state::AppState;

/// Side work declared by the reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Refresh the listing feed (`GET /api/export/`).
    FetchListings,
    Login {
        email: String,
        password: String,
    },
    SignupUser {
        name: String,
        email: String,
        password: String,
    },
    SignupHost {
        name: String,
        email: String,
        password: String,
        address: String,
    },
    /// Submit a validated create-event request (multipart).
    CreateListing(CreateRequest),
    ToggleListing(ListingId),
    /// Reverse-geocode the draft coordinate into a display address.
    ReverseGeocode(Coordinate),
    /// Open the continuous position watch for this session.
    StartPositionWatch,
    /// Release the position watch (logout / teardown).
    StopPositionWatch,
}

/// Result of dispatching an action: whether state changed (re-render
/// needed) plus any effects to process.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DispatchResult {
    pub changed: bool,
    pub effects: Vec<Effect>,
}

impl DispatchResult {
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed_with(effect: Effect) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn changed_with_many(effects: Vec<Effect>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }

    #[inline]
    pub fn effect(effect: Effect) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer that can emit effects.
pub type EffectReducer = fn(&mut AppState, Action) -> DispatchResult;

/// Centralized state container. Every mutation goes through
/// [`EffectStore::dispatch`], which also traces each action.
pub struct EffectStore {
    state: AppState,
    reducer: EffectReducer,
}

impl EffectStore {
    pub fn new(state: AppState, reducer: EffectReducer) -> Self {
        Self { state, reducer }
    }

    /// Store wired to the application reducer.
    pub fn for_app(state: AppState) -> Self {
        Self::new(state, reducer)
    }

    #[inline]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Use sparingly - prefer dispatching actions. Mainly useful for
    /// seeding state in tests.
    #[inline]
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let summary = action.summary();
        let result = (self.reducer)(&mut self.state, action);
        debug!(
            action = %summary,
            changed = result.changed,
            effects = result.effects.len(),
            "dispatched"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    #[test]
    fn dispatch_result_builders() {
        let r = DispatchResult::unchanged();
        assert!(!r.changed);
        assert!(!r.has_effects());

        let r = DispatchResult::changed_with(Effect::FetchListings);
        assert!(r.changed);
        assert_eq!(r.effects, vec![Effect::FetchListings]);

        let r = DispatchResult::effect(Effect::StopPositionWatch);
        assert!(!r.changed);
        assert!(r.has_effects());
    }

    #[test]
    fn store_routes_through_reducer() {
        let mut store = EffectStore::for_app(AppState::new(Coordinate::new(28.6139, 77.2090)));
        let result = store.dispatch(Action::MapZoomIn);
        assert!(result.changed);
        assert!(store.state().map_span < AppState::DEFAULT_SPAN);
    }
}
