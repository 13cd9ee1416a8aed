//! Continuous position watch.
//!
//! The closest portable equivalent of a device position watch: a JSON
//! geolocation endpoint polled at a fixed interval, exposed as a stream
//! of fix-or-error updates. The stream never ends on its own; the
//! subscriber releases it by dropping/aborting the subscription.

use std::time::Duration;

use tokio_stream::Stream;
use tracing::trace;

use nightowl_core::Coordinate;

use crate::config::PositionConfig;
use crate::error::ApiError;
use crate::wire::PositionDto;

/// One update from the watch: a fix, or a diagnostic the UI can show.
/// Errors are per-poll and non-fatal; the watch keeps going.
#[derive(Clone, Debug, PartialEq)]
pub enum PositionUpdate {
    Fix(Coordinate),
    Error(String),
}

/// Open the watch. The first poll happens immediately, then every
/// `config.interval`.
pub fn watch(config: PositionConfig) -> impl Stream<Item = PositionUpdate> {
    async_stream::stream! {
        let http = reqwest::Client::new();
        let mut interval = tokio::time::interval(config.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            match poll_once(&http, &config.url).await {
                Ok(coordinate) => {
                    trace!(%coordinate, "position fix");
                    yield PositionUpdate::Fix(coordinate);
                }
                Err(e) => yield PositionUpdate::Error(e.to_string()),
            }
        }
    }
}

async fn poll_once(http: &reqwest::Client, url: &str) -> Result<Coordinate, ApiError> {
    let response = http
        .get(url)
        .timeout(Duration::from_secs(10))
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        let mut body = response.text().await.unwrap_or_default();
        body.truncate(300);
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let dto: PositionDto = response
        .json()
        .await
        .map_err(|e| ApiError::decode("position", e.to_string()))?;
    dto.into_coordinate()
}
