// ABOUTME: Enrichment data models produced by the diary pipeline
// ABOUTME: Re-exports availability, nutrition, travel, and summary types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Records flowing out of the enrichment pipeline:
//!
//! - `Availability`: typed outcome of a best-effort remote lookup
//! - `NutritionInfo`: calories and protein for one food
//! - `TravelInfo`: driving distance and duration between two places
//! - `DiarySummary`: polished text plus human-readable enrichment lines

mod availability;
mod nutrition;
mod summary;
mod travel;

pub use availability::{Availability, UnavailableReason};
pub use nutrition::NutritionInfo;
pub use summary::DiarySummary;
pub use travel::TravelInfo;

/// Round to two decimal places
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Capitalize the first letter of every whitespace-separated word
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
