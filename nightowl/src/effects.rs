//! Effect execution: every declared effect becomes a keyed task or a
//! subscription change.
//!
//! Task keys are the fencing policy: one key per logical request slot,
//! so a newer spawn always aborts the stale in-flight one. The geocode
//! slot additionally debounces, since drafts move in rapid clicks.

use std::time::Duration;

use nightowl_api::{ApiClient, GeocodeClient, PositionConfig, PositionUpdate};
use nightowl_core::{Action, Effect};
use tokio_stream::StreamExt;

use crate::runtime::EffectContext;
use crate::subscriptions::SubKey;

const GEOCODE_DEBOUNCE: Duration = Duration::from_millis(400);

pub struct EffectHandler {
    api: ApiClient,
    geocode: GeocodeClient,
    position: PositionConfig,
}

impl EffectHandler {
    pub fn new(api: ApiClient, geocode: GeocodeClient, position: PositionConfig) -> Self {
        Self {
            api,
            geocode,
            position,
        }
    }

    pub fn handle(&self, effect: Effect, ctx: &mut EffectContext) {
        match effect {
            Effect::FetchListings => {
                let api = self.api.clone();
                ctx.tasks().spawn("listings", async move {
                    match api.fetch_listings().await {
                        Ok(listings) => Action::ListingsDidLoad(listings),
                        Err(e) => Action::ListingsDidError(e.to_string()),
                    }
                });
            }

            Effect::Login { email, password } => {
                let api = self.api.clone();
                ctx.tasks().spawn("auth", async move {
                    match api.login(&email, &password).await {
                        Ok(profile) => Action::AuthDidComplete(profile),
                        Err(e) => Action::AuthDidError(e.to_string()),
                    }
                });
            }

            Effect::SignupUser {
                name,
                email,
                password,
            } => {
                let api = self.api.clone();
                ctx.tasks().spawn("auth", async move {
                    match api.signup_user(&name, &email, &password).await {
                        Ok(profile) => Action::AuthDidComplete(profile),
                        Err(e) => Action::AuthDidError(e.to_string()),
                    }
                });
            }

            Effect::SignupHost {
                name,
                email,
                password,
                address,
            } => {
                let api = self.api.clone();
                ctx.tasks().spawn("auth", async move {
                    match api.signup_host(&name, &email, &password, &address).await {
                        Ok(profile) => Action::AuthDidComplete(profile),
                        Err(e) => Action::AuthDidError(e.to_string()),
                    }
                });
            }

            Effect::CreateListing(request) => {
                let api = self.api.clone();
                ctx.tasks().spawn("create_listing", async move {
                    match api.create_listing(&request).await {
                        Ok(listing) => Action::CreateDidComplete(listing),
                        Err(e) => Action::CreateDidError(e.to_string()),
                    }
                });
            }

            Effect::ToggleListing(id) => {
                let api = self.api.clone();
                // Per-listing key: toggling two different listings may
                // overlap, re-toggling the same one fences.
                ctx.tasks().spawn(format!("toggle:{id}"), async move {
                    match api.toggle_listing(id).await {
                        Ok(listing) => Action::ToggleDidComplete(listing),
                        Err(e) => Action::ToggleDidError(e.to_string()),
                    }
                });
            }

            Effect::ReverseGeocode(coordinate) => {
                let geocode = self.geocode.clone();
                ctx.tasks().debounce("geocode", GEOCODE_DEBOUNCE, async move {
                    match geocode.reverse(coordinate).await {
                        Ok(address) => Action::GeocodeDidResolve {
                            coordinate,
                            address,
                        },
                        Err(e) => Action::GeocodeDidError(e.to_string()),
                    }
                });
            }

            Effect::StartPositionWatch => {
                let stream = nightowl_api::watch(self.position.clone()).map(|update| match update {
                    PositionUpdate::Fix(coordinate) => Action::GpsDidUpdate(coordinate),
                    PositionUpdate::Error(message) => Action::GpsDidError(message),
                });
                ctx.subscriptions().stream("position", stream);
            }

            Effect::StopPositionWatch => {
                ctx.subscriptions().cancel(&SubKey::new("position"));
            }
        }
    }
}
