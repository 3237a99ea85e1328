// ABOUTME: Structured result of processing one diary submission
// ABOUTME: Polished text, per-food nutrition lines, and an optional travel line
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Enrichment summary handed to the entry store and the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiarySummary {
    /// Grammar-corrected entry text
    pub polished_text: String,
    /// One line per recognized food, in extraction order
    pub food_summaries: Vec<String>,
    /// Travel sentence, absent when no place was mentioned
    pub travel_summary: Option<String>,
}
