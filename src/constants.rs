// ABOUTME: Application constants for the Daybook server
// ABOUTME: Service names, ports, environment variable names, and env-backed defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Server-side constants. Domain constants (food whitelist, thresholds) live in
//! [`daybook_core::constants`].

use std::env;

pub use daybook_core::constants::{foods, http, nutrition, polisher, travel};

/// Service identifiers used in logs and user agents
pub mod service_names {
    /// Name of the server binary
    pub const DAYBOOK_SERVER: &str = "daybook-server";
    /// Label used for nutrition database errors and spans
    pub const USDA: &str = "USDA FoodData Central";
    /// Label used for routing/geocoding errors and spans
    pub const ORS: &str = "OpenRouteService";
    /// Label used for the text-rewriting model
    pub const POLISHER: &str = "Text polisher";
}

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
    /// Default bind host
    pub const DEFAULT_HOST: &str = "127.0.0.1";
}

/// Storage defaults
pub mod storage {
    /// Default SQLite database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:diary.db";
    /// Default page size for entry listings
    pub const DEFAULT_PAGE_SIZE: i64 = 50;
    /// Largest page size accepted from callers
    pub const MAX_PAGE_SIZE: i64 = 500;
}

/// Environment variable names
pub mod env_vars {
    /// HTTP port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Bind host
    pub const HOST: &str = "HOST";
    /// Database URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// USDA API key
    pub const USDA_API_KEY: &str = "USDA_API_KEY";
    /// USDA base URL override
    pub const USDA_BASE_URL: &str = "USDA_BASE_URL";
    /// Nutrition cache TTL in seconds
    pub const NUTRITION_CACHE_TTL_SECS: &str = "NUTRITION_CACHE_TTL_SECS";
    /// `OpenRouteService` API key
    pub const ORS_API_KEY: &str = "ORS_API_KEY";
    /// `OpenRouteService` base URL override
    pub const ORS_BASE_URL: &str = "ORS_BASE_URL";
    /// Text polisher inference base URL
    pub const POLISHER_BASE_URL: &str = "POLISHER_BASE_URL";
    /// Text polisher model id
    pub const POLISHER_MODEL: &str = "POLISHER_MODEL";
    /// Text polisher bearer token
    pub const POLISHER_API_KEY: &str = "POLISHER_API_KEY";
    /// Max generated length
    pub const POLISHER_MAX_LENGTH: &str = "POLISHER_MAX_LENGTH";
    /// Beam width
    pub const POLISHER_NUM_BEAMS: &str = "POLISHER_NUM_BEAMS";
    /// Whether to warm the polisher up at startup
    pub const POLISHER_WARMUP: &str = "POLISHER_WARMUP";
    /// Optional gazetteer file for place recognition
    pub const GAZETTEER_PATH: &str = "GAZETTEER_PATH";
    /// Outbound request timeout
    pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
    /// Outbound connect timeout
    pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "HTTP_CONNECT_TIMEOUT_SECS";
}

/// Environment-based configuration getters
pub mod env_config {
    use super::{env, env_vars, ports, storage};

    /// Get bind host from environment or default
    #[must_use]
    pub fn host() -> String {
        env::var(env_vars::HOST).unwrap_or_else(|_| ports::DEFAULT_HOST.to_owned())
    }

    /// Get database URL from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var(env_vars::DATABASE_URL)
            .unwrap_or_else(|_| storage::DEFAULT_DATABASE_URL.to_owned())
    }

    /// Read an optional secret, treating an empty value as unset
    #[must_use]
    pub fn optional_secret(key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.trim().is_empty())
    }
}
