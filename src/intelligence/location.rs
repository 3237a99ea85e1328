// ABOUTME: Driving distance and duration between two named places via OpenRouteService
// ABOUTME: Geocodes each place, requests a driving route, and reads the first segment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::environment::OrsApiConfig;
use crate::constants::{service_names, travel};
use crate::external::transport::JsonTransport;
use async_trait::async_trait;
use daybook_core::models::{Availability, TravelInfo, UnavailableReason};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

/// Resolves the driving route between two places
#[async_trait]
pub trait TravelLookup: Send + Sync {
    /// Driving distance and duration from `from` to `to`
    async fn lookup(&self, from: &str, to: &str) -> Availability<TravelInfo>;
}

/// Longitude/latitude pair as returned by the geocoder
pub type Coordinates = [f64; 2];

/// `OpenRouteService` travel client
pub struct OrsTravelClient {
    config: OrsApiConfig,
    transport: Arc<dyn JsonTransport>,
    geocode_cache: RwLock<HashMap<String, Coordinates>>,
}

impl OrsTravelClient {
    /// Create a new routing client over the given transport
    #[must_use]
    pub fn new(config: OrsApiConfig, transport: Arc<dyn JsonTransport>) -> Self {
        Self {
            config,
            transport,
            geocode_cache: RwLock::new(HashMap::new()),
        }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Coordinates of the first geocoding feature for `place`
    #[instrument(skip(self, api_key), fields(service = service_names::ORS, api_call = "geocode"))]
    async fn geocode(&self, place: &str, api_key: &str) -> Availability<Coordinates> {
        let key = place.trim().to_lowercase();
        if let Some(coords) = self.geocode_cache.read().await.get(&key) {
            debug!("Using cached coordinates for {}", place);
            return Availability::Available(*coords);
        }

        let url = format!("{}/geocode/search", self.base_url());
        let body = match self
            .transport
            .get_json(&url, &[("api_key", api_key), ("text", place)])
            .await
        {
            Ok(body) => body,
            Err(e) => return Availability::Unavailable(e.into()),
        };

        match first_feature_coordinates(&body) {
            Some(coords) => {
                self.geocode_cache.write().await.insert(key, coords);
                Availability::Available(coords)
            }
            None => Availability::Unavailable(UnavailableReason::PlaceNotFound {
                place: place.to_owned(),
            }),
        }
    }

    #[instrument(skip(self, api_key), fields(service = service_names::ORS, api_call = "directions"))]
    async fn directions(
        &self,
        from: Coordinates,
        to: Coordinates,
        api_key: &str,
    ) -> Availability<TravelInfo> {
        let url = format!("{}/v2/directions/{}", self.base_url(), travel::DRIVING_PROFILE);
        let body = json!({ "coordinates": [from, to] });
        match self
            .transport
            .post_json(&url, &[("Authorization", api_key)], &body)
            .await
        {
            Ok(response) => first_segment(&response).map_or(
                Availability::Unavailable(UnavailableReason::NoRoute),
                Availability::Available,
            ),
            Err(e) => Availability::Unavailable(e.into()),
        }
    }
}

#[async_trait]
impl TravelLookup for OrsTravelClient {
    #[instrument(skip(self), fields(service = service_names::ORS))]
    async fn lookup(&self, from: &str, to: &str) -> Availability<TravelInfo> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Availability::Unavailable(UnavailableReason::MissingApiKey);
        };

        let outcome = match self.geocode(from, api_key).await {
            Availability::Available(from_coords) => match self.geocode(to, api_key).await {
                Availability::Available(to_coords) => {
                    self.directions(from_coords, to_coords, api_key).await
                }
                Availability::Unavailable(reason) => Availability::Unavailable(reason),
            },
            Availability::Unavailable(reason) => Availability::Unavailable(reason),
        };

        match outcome.reason() {
            Some(reason) if reason.is_fault() => warn!("Travel lookup failed: {reason}"),
            Some(reason) => debug!("No travel data: {reason}"),
            None => debug!("Travel data found"),
        }
        outcome
    }
}

/// `features[0].geometry.coordinates` of a geocoding response
fn first_feature_coordinates(body: &Value) -> Option<Coordinates> {
    let coords = body
        .pointer("/features/0/geometry/coordinates")?
        .as_array()?;
    Some([coords.first()?.as_f64()?, coords.get(1)?.as_f64()?])
}

/// First route segment of a directions response, in either the JSON or GeoJSON shape
fn first_segment(body: &Value) -> Option<TravelInfo> {
    let segment = body
        .pointer("/routes/0/segments/0")
        .or_else(|| body.pointer("/features/0/properties/segments/0"))?;
    let distance = segment.get("distance")?.as_f64()?;
    let duration = segment.get("duration")?.as_f64()?;
    Some(TravelInfo::from_segment(distance, duration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_feature_coordinates() {
        let body = json!({"features": [{"geometry": {"coordinates": [78.47, 17.38]}}]});
        assert_eq!(first_feature_coordinates(&body), Some([78.47, 17.38]));
        assert_eq!(first_feature_coordinates(&json!({"features": []})), None);
    }

    #[test]
    fn test_first_segment_accepts_both_shapes() {
        let plain = json!({"routes": [{"segments": [{"distance": 10000.0, "duration": 1800.0}]}]});
        let geojson = json!({"features": [{"properties": {"segments": [
            {"distance": 10000.0, "duration": 1800.0}
        ]}}]});
        let expected = Some(TravelInfo::from_segment(10_000.0, 1_800.0));
        assert_eq!(first_segment(&plain), expected);
        assert_eq!(first_segment(&geojson), expected);
        assert_eq!(first_segment(&json!({"routes": []})), None);
    }
}
