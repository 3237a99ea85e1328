// ABOUTME: Text understanding and enrichment services for diary entries
// ABOUTME: Polisher, annotator, entity extractor, and travel lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Everything the pipeline needs to understand an entry: the grammar polisher,
//! the part-of-speech/entity annotator, the food and place extractor, and the
//! routing lookup between mentioned places.

/// Part-of-speech tagging and gazetteer-based place recognition
pub mod annotator;
/// Food and place extraction
pub mod extractor;
/// Driving distance between places
pub mod location;
/// Grammar-correcting rewrite
pub mod polisher;

pub use annotator::{Annotation, EntityLabel, LanguageAnnotator, LexiconAnnotator, Pos};
pub use extractor::{EntityExtractor, ExtractedEntities};
pub use location::{OrsTravelClient, TravelLookup};
pub use polisher::{InferencePolisher, TextPolisher};
