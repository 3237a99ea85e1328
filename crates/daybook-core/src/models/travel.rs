// ABOUTME: Driving distance and duration between two mentioned places
// ABOUTME: Includes the travel sentences shown alongside a diary entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{round2, title_case};
use serde::{Deserialize, Serialize};

/// Driving distance and duration for the first route segment between two places
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelInfo {
    /// Distance in kilometers, rounded to two decimals
    pub distance_km: f64,
    /// Duration in hours, rounded to two decimals
    pub duration_hr: f64,
}

impl TravelInfo {
    /// Convert a routing segment measured in meters and seconds
    #[must_use]
    pub fn from_segment(distance_m: f64, duration_s: f64) -> Self {
        Self {
            distance_km: round2(distance_m / 1000.0),
            duration_hr: round2(duration_s / 3600.0),
        }
    }

    /// Sentence describing a successful lookup
    #[must_use]
    pub fn summary_line(&self, from: &str, to: &str) -> String {
        format!(
            "Travel from {} to {}: {} km, about {} hours by car",
            title_case(from),
            title_case(to),
            self.distance_km,
            self.duration_hr
        )
    }

    /// Sentence used when the lookup produced no data
    #[must_use]
    pub fn unavailable_line(from: &str, to: &str) -> String {
        format!(
            "Could not retrieve travel info between {} and {}.",
            title_case(from),
            title_case(to)
        )
    }

    /// Notice used when exactly one place was mentioned
    #[must_use]
    pub fn single_place_line(place: &str) -> String {
        format!(
            "Only one place detected ({}); at least two are needed to calculate travel distance.",
            title_case(place)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_segment_converts_units() {
        let info = TravelInfo::from_segment(10_000.0, 1_800.0);
        assert!((info.distance_km - 10.0).abs() < f64::EPSILON);
        assert!((info.duration_hr - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_segment_rounds() {
        let info = TravelInfo::from_segment(144_876.3, 9_412.0);
        assert!((info.distance_km - 144.88).abs() < f64::EPSILON);
        assert!((info.duration_hr - 2.61).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sentences() {
        let info = TravelInfo::from_segment(10_000.0, 1_800.0);
        assert_eq!(
            info.summary_line("nalgonda", "hyderabad"),
            "Travel from Nalgonda to Hyderabad: 10 km, about 0.5 hours by car"
        );
        assert_eq!(
            TravelInfo::unavailable_line("nalgonda", "hyderabad"),
            "Could not retrieve travel info between Nalgonda and Hyderabad."
        );
        assert!(TravelInfo::single_place_line("pune").contains("Pune"));
    }
}
