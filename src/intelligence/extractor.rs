// ABOUTME: Finds whitelisted foods and mentioned places in a diary entry
// ABOUTME: Deduplicated results that keep first-mention order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::foods;
use crate::intelligence::annotator::LanguageAnnotator;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Foods and places mentioned in one text, each deduplicated in first-mention order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedEntities {
    /// Whitelisted foods tagged as nouns
    pub foods: Vec<String>,
    /// Places recognized as GPE or LOC entities
    pub places: Vec<String>,
}

/// Entity extraction over a shared annotator
#[derive(Clone)]
pub struct EntityExtractor {
    annotator: Arc<dyn LanguageAnnotator>,
}

impl EntityExtractor {
    /// Create an extractor over a loaded annotator
    #[must_use]
    pub fn new(annotator: Arc<dyn LanguageAnnotator>) -> Self {
        Self { annotator }
    }

    /// Extract foods and places from `text`
    #[must_use]
    pub fn extract(&self, text: &str) -> ExtractedEntities {
        let lowered = text.to_lowercase();
        let annotation = self.annotator.annotate(&lowered);

        let mut entities = ExtractedEntities::default();
        for token in &annotation.tokens {
            if token.pos.is_nominal() && foods::is_whitelisted(&token.text) {
                push_unique(&mut entities.foods, &token.text);
            }
        }
        for span in &annotation.entities {
            if span.label.is_place() {
                push_unique(&mut entities.places, &span.text);
            }
        }

        debug!(
            foods = entities.foods.len(),
            places = entities.places.len(),
            "Extracted entities"
        );
        entities
    }
}

fn push_unique(items: &mut Vec<String>, item: &str) {
    if !items.iter().any(|existing| existing == item) {
        items.push(item.to_owned());
    }
}
