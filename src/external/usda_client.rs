// ABOUTME: USDA FoodData Central client resolving a food name to calories and protein
// ABOUTME: Single-result search, description similarity gate, and a TTL cache per food
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! USDA `FoodData` Central nutrition lookup
//!
//! A lookup searches `/foods/search` with `pageSize=1`, checks that the top
//! result's description resembles the requested food (normalized Levenshtein
//! similarity of at least 0.5), and reads the nutrients named exactly
//! `Energy` and `Protein`.
//!
//! Lookups never fail past this boundary: every outcome is an
//! [`Availability`]. Found and "no match" answers are cached per lower-cased
//! food name; transport faults are not cached so the next entry retries.
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>

use crate::config::environment::UsdaApiConfig;
use crate::constants::{nutrition, service_names};
use crate::external::transport::JsonTransport;
use async_trait::async_trait;
use daybook_core::models::{Availability, NutritionInfo, UnavailableReason};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

/// Resolves a food name to nutrition facts
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    /// Look up calories and protein for `food`
    async fn lookup(&self, food: &str) -> Availability<NutritionInfo>;
}

/// USDA API search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

#[derive(Debug, Deserialize)]
struct SearchFood {
    #[serde(default)]
    description: String,
    #[serde(rename = "foodNutrients", default)]
    food_nutrients: Vec<SearchNutrient>,
}

#[derive(Debug, Deserialize)]
struct SearchNutrient {
    #[serde(rename = "nutrientName")]
    nutrient_name: Option<String>,
    #[serde(rename = "unitName")]
    unit_name: Option<String>,
    value: Option<f64>,
}

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

/// USDA `FoodData` Central nutrition client
pub struct UsdaNutritionClient {
    config: UsdaApiConfig,
    transport: Arc<dyn JsonTransport>,
    cache: Arc<RwLock<HashMap<String, CacheEntry<Availability<NutritionInfo>>>>>,
}

impl UsdaNutritionClient {
    /// Create a new USDA client over the given transport
    #[must_use]
    pub fn new(config: UsdaApiConfig, transport: Arc<dyn JsonTransport>) -> Self {
        Self {
            config,
            transport,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of cached outcomes (useful for monitoring)
    pub async fn cache_len(&self) -> usize {
        self.cache.read().await.len()
    }

    /// Clear the cache (useful for testing)
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    async fn cached(&self, key: &str) -> Option<Availability<NutritionInfo>> {
        let cache = self.cache.read().await;
        cache
            .get(key)
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| entry.data.clone())
    }

    async fn remember(&self, key: String, outcome: &Availability<NutritionInfo>) {
        if outcome.reason().is_some_and(UnavailableReason::is_fault) {
            return;
        }
        let mut cache = self.cache.write().await;
        cache.insert(
            key,
            CacheEntry {
                data: outcome.clone(),
                expires_at: Instant::now() + Duration::from_secs(self.config.cache_ttl_secs),
            },
        );
    }

    async fn search(&self, food: &str, api_key: &str) -> Availability<NutritionInfo> {
        let url = format!("{}/foods/search", self.config.base_url.trim_end_matches('/'));
        let body = match self
            .transport
            .get_json(
                &url,
                &[("query", food), ("pageSize", "1"), ("api_key", api_key)],
            )
            .await
        {
            Ok(body) => body,
            Err(e) => return Availability::Unavailable(e.into()),
        };

        match serde_json::from_value::<SearchResponse>(body) {
            Ok(response) => evaluate_top_result(food, response),
            Err(e) => Availability::Unavailable(UnavailableReason::Malformed {
                message: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl NutritionLookup for UsdaNutritionClient {
    #[instrument(skip(self), fields(service = service_names::USDA))]
    async fn lookup(&self, food: &str) -> Availability<NutritionInfo> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Availability::Unavailable(UnavailableReason::MissingApiKey);
        };

        let key = food.trim().to_lowercase();
        if let Some(hit) = self.cached(&key).await {
            debug!("Nutrition cache hit");
            return hit;
        }

        let outcome = self.search(food, api_key).await;
        match outcome.reason() {
            Some(reason) if reason.is_fault() => warn!("Nutrition lookup failed: {reason}"),
            Some(reason) => debug!("No nutrition data: {reason}"),
            None => debug!("Nutrition data found"),
        }
        self.remember(key, &outcome).await;
        outcome
    }
}

/// Apply the similarity gate and nutrient extraction to the top search result
fn evaluate_top_result(food: &str, response: SearchResponse) -> Availability<NutritionInfo> {
    let Some(top) = response.foods.into_iter().next() else {
        return Availability::Unavailable(UnavailableReason::NoMatch);
    };

    let score = description_similarity(food, &top.description);
    if score < nutrition::MIN_DESCRIPTION_SIMILARITY {
        return Availability::Unavailable(UnavailableReason::LowSimilarity {
            description: top.description,
            score,
        });
    }

    let calories = nutrient_value(&top.food_nutrients, nutrition::ENERGY_NUTRIENT);
    let protein = nutrient_value(&top.food_nutrients, nutrition::PROTEIN_NUTRIENT);
    NutritionInfo::from_values(calories, protein).map_or(
        Availability::Unavailable(UnavailableReason::MissingNutrients),
        Availability::Available,
    )
}

/// Normalized Levenshtein similarity of the lower-cased names, in `[0, 1]`
#[must_use]
pub fn description_similarity(food: &str, description: &str) -> f64 {
    strsim::normalized_levenshtein(
        &food.trim().to_lowercase(),
        &description.trim().to_lowercase(),
    )
}

/// Value of the nutrient named exactly `name`; with several entries the kcal one wins
fn nutrient_value(nutrients: &[SearchNutrient], name: &str) -> Option<f64> {
    let mut matching = nutrients
        .iter()
        .filter(|n| n.nutrient_name.as_deref() == Some(name) && n.value.is_some());
    let first = matching.clone().next()?;
    matching
        .find(|n| {
            n.unit_name
                .as_deref()
                .is_some_and(|unit| unit.eq_ignore_ascii_case("kcal"))
        })
        .unwrap_or(first)
        .value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> SearchResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_similarity_is_case_insensitive() {
        assert!((description_similarity("Rice", "rice") - 1.0).abs() < f64::EPSILON);
        assert!(description_similarity("egg", "Egg, whole, raw, fresh") < 0.5);
    }

    #[test]
    fn test_top_result_with_nutrients() {
        let outcome = evaluate_top_result(
            "milk",
            response(json!({"foods": [{
                "description": "Milk",
                "foodNutrients": [
                    {"nutrientName": "Protein", "unitName": "G", "value": 3.28},
                    {"nutrientName": "Energy", "unitName": "kJ", "value": 255.0},
                    {"nutrientName": "Energy", "unitName": "KCAL", "value": 61.0}
                ]
            }]})),
        );
        let info = outcome.into_option().unwrap();
        assert_eq!(info.calories, Some(61.0));
        assert_eq!(info.protein_g, Some(3.28));
    }

    #[test]
    fn test_names_must_match_exactly() {
        let outcome = evaluate_top_result(
            "dal",
            response(json!({"foods": [{
                "description": "Dal",
                "foodNutrients": [
                    {"nutrientName": "Energy (Atwater General Factors)", "value": 120.0},
                    {"nutrientName": "Protein, crude", "value": 9.0}
                ]
            }]})),
        );
        assert_eq!(
            outcome.reason(),
            Some(&UnavailableReason::MissingNutrients)
        );
    }

    #[test]
    fn test_empty_search_is_no_match() {
        let outcome = evaluate_top_result("poha", response(json!({"foods": []})));
        assert_eq!(outcome.reason(), Some(&UnavailableReason::NoMatch));
        let outcome = evaluate_top_result("poha", response(json!({})));
        assert_eq!(outcome.reason(), Some(&UnavailableReason::NoMatch));
    }
}
