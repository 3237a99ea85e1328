// ABOUTME: Diary enrichment pipeline: polish, extract, then look up nutrition and travel
// ABOUTME: Steps run in order; only a polisher failure stops an entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Diary Pipeline
//!
//! Turns raw diary text into a [`DiarySummary`]:
//!
//! 1. polish the text
//! 2. extract foods and places from the polished text
//! 3. one nutrition line per food, in extraction order
//! 4. a travel line for the first two places (or a notice for a single place)
//!
//! Lookups report through [`Availability`](daybook_core::models::Availability)
//! and fall back to fixed sentences, so a slow or failing upstream never
//! discards the entry.

use crate::errors::{AppError, AppResult};
use crate::external::usda_client::NutritionLookup;
use crate::intelligence::extractor::EntityExtractor;
use crate::intelligence::location::TravelLookup;
use crate::intelligence::polisher::TextPolisher;
use daybook_core::models::{Availability, DiarySummary, NutritionInfo, TravelInfo};
use std::sync::Arc;
use tracing::{info, instrument};

/// Orchestrates the enrichment of one diary entry
#[derive(Clone)]
pub struct DiaryPipeline {
    polisher: Arc<dyn TextPolisher>,
    extractor: EntityExtractor,
    nutrition: Arc<dyn NutritionLookup>,
    travel: Arc<dyn TravelLookup>,
}

impl DiaryPipeline {
    /// Assemble a pipeline from its components
    #[must_use]
    pub fn new(
        polisher: Arc<dyn TextPolisher>,
        extractor: EntityExtractor,
        nutrition: Arc<dyn NutritionLookup>,
        travel: Arc<dyn TravelLookup>,
    ) -> Self {
        Self {
            polisher,
            extractor,
            nutrition,
            travel,
        }
    }

    /// Process one entry
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for blank text, or the polisher's error
    #[instrument(skip(self, raw_text), fields(chars = raw_text.len()))]
    pub async fn process(&self, raw_text: &str) -> AppResult<DiarySummary> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(AppError::invalid_input("Diary entry cannot be empty"));
        }

        let polished_text = self.polisher.polish(text).await?;
        let entities = self.extractor.extract(&polished_text);

        let mut food_summaries = Vec::with_capacity(entities.foods.len());
        for food in &entities.foods {
            let line = match self.nutrition.lookup(food).await {
                Availability::Available(info) => info.summary_line(food),
                Availability::Unavailable(_) => NutritionInfo::not_found_line(food),
            };
            food_summaries.push(line);
        }

        let travel_summary = match entities.places.as_slice() {
            [] => None,
            [only] => Some(TravelInfo::single_place_line(only)),
            [from, to, ..] => Some(match self.travel.lookup(from, to).await {
                Availability::Available(info) => info.summary_line(from, to),
                Availability::Unavailable(_) => TravelInfo::unavailable_line(from, to),
            }),
        };

        info!(
            foods = entities.foods.len(),
            places = entities.places.len(),
            "Processed diary entry"
        );

        Ok(DiarySummary {
            polished_text,
            food_summaries,
            travel_summary,
        })
    }
}
