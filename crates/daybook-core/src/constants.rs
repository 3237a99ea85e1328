// ABOUTME: Domain constants for diary enrichment
// ABOUTME: Food whitelist, place labels, similarity threshold, and model defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by the pipeline stage that uses them.

/// Food recognition
pub mod foods {
    /// Closed whitelist of recognized food words (exact, lower-case, no plurals)
    pub const FOOD_WHITELIST: &[&str] = &[
        "chapathi", "roti", "rice", "curd", "paneer", "banana", "egg", "bread", "butter", "milk",
        "dal", "sprouts", "cheese", "almonds", "cashews", "dates", "poha", "dosa", "idli",
    ];

    /// Returns true when `word` is a whitelisted food
    #[must_use]
    pub fn is_whitelisted(word: &str) -> bool {
        FOOD_WHITELIST.contains(&word)
    }
}

/// Nutrition lookup
pub mod nutrition {
    /// Minimum similarity between the requested food and the returned description
    pub const MIN_DESCRIPTION_SIMILARITY: f64 = 0.5;
    /// USDA nutrient name carrying calories
    pub const ENERGY_NUTRIENT: &str = "Energy";
    /// USDA nutrient name carrying protein grams
    pub const PROTEIN_NUTRIENT: &str = "Protein";
    /// Default USDA `FoodData` Central base URL
    pub const DEFAULT_USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
    /// Default cache TTL for nutrition lookups (24 hours)
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;
}

/// Travel lookup
pub mod travel {
    /// Default `OpenRouteService` base URL
    pub const DEFAULT_ORS_BASE_URL: &str = "https://api.openrouteservice.org";
    /// Routing profile used for directions
    pub const DRIVING_PROFILE: &str = "driving-car";
}

/// Text polishing model
pub mod polisher {
    /// Default inference endpoint base URL
    pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
    /// Default grammar-synthesis model
    pub const DEFAULT_MODEL: &str = "pszemraj/flan-t5-large-grammar-synthesis";
    /// Default upper bound on generated length
    pub const DEFAULT_MAX_LENGTH: u32 = 150;
    /// Default beam width
    pub const DEFAULT_NUM_BEAMS: u32 = 5;
}

/// Outbound HTTP
pub mod http {
    /// Default request timeout for every external call
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    /// Default connect timeout for every external call
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
}

#[cfg(test)]
mod tests {
    use super::foods::is_whitelisted;

    #[test]
    fn test_whitelist_is_exact() {
        assert!(is_whitelisted("rice"));
        assert!(is_whitelisted("idli"));
        assert!(!is_whitelisted("Rice"));
        assert!(!is_whitelisted("eggs"));
        assert!(!is_whitelisted("omelette"));
    }
}
