// ABOUTME: Nutrition facts for a single recognized food
// ABOUTME: Calories and protein with the human-readable summary line
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{round2, title_case};
use serde::{Deserialize, Serialize};

/// Calories and protein for one food, as reported by the nutrition database.
///
/// At least one of the two values is known; a lookup that finds neither
/// produces no `NutritionInfo` at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    /// Energy in kcal, rounded to two decimals
    pub calories: Option<f64>,
    /// Protein in grams, rounded to two decimals
    pub protein_g: Option<f64>,
}

impl NutritionInfo {
    /// Build from raw nutrient values, rounding each to two decimals.
    ///
    /// Returns `None` when both values are missing.
    #[must_use]
    pub fn from_values(calories: Option<f64>, protein_g: Option<f64>) -> Option<Self> {
        if calories.is_none() && protein_g.is_none() {
            return None;
        }
        Some(Self {
            calories: calories.map(round2),
            protein_g: protein_g.map(round2),
        })
    }

    /// Summary line such as `Rice: 250.5 kcal, 12g protein`
    #[must_use]
    pub fn summary_line(&self, food: &str) -> String {
        format!(
            "{}: {} kcal, {}g protein",
            title_case(food),
            format_quantity(self.calories),
            format_quantity(self.protein_g)
        )
    }

    /// Summary line used when no nutrition data is available
    #[must_use]
    pub fn not_found_line(food: &str) -> String {
        format!("{}: Nutrition info not found", title_case(food))
    }
}

/// Shortest decimal form of a value (`12`, `250.5`), `?` when unknown
fn format_quantity(value: Option<f64>) -> String {
    value.map_or_else(|| "?".to_owned(), |v| format!("{v}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line_trims_trailing_zeros() {
        let info = NutritionInfo::from_values(Some(250.5), Some(12.0)).unwrap();
        assert_eq!(info.summary_line("rice"), "Rice: 250.5 kcal, 12g protein");
    }

    #[test]
    fn test_values_are_rounded() {
        let info = NutritionInfo::from_values(Some(52.3333), Some(0.2649)).unwrap();
        assert_eq!(info.calories, Some(52.33));
        assert_eq!(info.protein_g, Some(0.26));
    }

    #[test]
    fn test_unknown_nutrient_rendered_as_question_mark() {
        let info = NutritionInfo::from_values(None, Some(3.5)).unwrap();
        assert_eq!(info.summary_line("curd"), "Curd: ? kcal, 3.5g protein");
    }

    #[test]
    fn test_both_missing_is_none() {
        assert!(NutritionInfo::from_values(None, None).is_none());
    }

    #[test]
    fn test_not_found_line() {
        assert_eq!(
            NutritionInfo::not_found_line("poha"),
            "Poha: Nutrition info not found"
        );
    }
}
