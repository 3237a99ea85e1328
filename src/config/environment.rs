// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads ports, storage, API keys, model and timeout settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use crate::constants::{env_config, env_vars, http, nutrition, polisher, ports, travel};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// External service configuration
    pub external_services: ExternalServicesConfig,
    /// Text-rewriting model configuration
    pub polisher: PolisherConfig,
    /// Entity extraction configuration
    pub extractor: ExtractorConfig,
    /// Outbound HTTP client settings
    pub http_client: HttpClientConfig,
}

/// Entry store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL (e.g. `sqlite:diary.db`, `sqlite::memory:`)
    pub url: String,
}

/// Configuration of the enrichment services
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalServicesConfig {
    /// USDA `FoodData` Central
    pub usda: UsdaApiConfig,
    /// `OpenRouteService` geocoding and directions
    pub ors: OrsApiConfig,
}

/// USDA `FoodData` Central API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsdaApiConfig {
    /// API key; lookups are skipped when unset
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL (default: <https://api.nal.usda.gov/fdc/v1>)
    pub base_url: String,
    /// Cache TTL in seconds
    pub cache_ttl_secs: u64,
}

impl Default for UsdaApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: nutrition::DEFAULT_USDA_BASE_URL.to_owned(),
            cache_ttl_secs: nutrition::DEFAULT_CACHE_TTL_SECS,
        }
    }
}

/// `OpenRouteService` API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrsApiConfig {
    /// API key; lookups are skipped when unset
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL (default: <https://api.openrouteservice.org>)
    pub base_url: String,
}

impl Default for OrsApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: travel::DEFAULT_ORS_BASE_URL.to_owned(),
        }
    }
}

/// Text-rewriting model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolisherConfig {
    /// Inference endpoint base URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Bearer token for the inference endpoint
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Upper bound on generated length
    pub max_length: u32,
    /// Beam width
    pub num_beams: u32,
    /// Send a warm-up request at startup and refuse to start if it fails
    pub warmup: bool,
}

impl Default for PolisherConfig {
    fn default() -> Self {
        Self {
            base_url: polisher::DEFAULT_BASE_URL.to_owned(),
            model: polisher::DEFAULT_MODEL.to_owned(),
            api_key: None,
            max_length: polisher::DEFAULT_MAX_LENGTH,
            num_beams: polisher::DEFAULT_NUM_BEAMS,
            warmup: true,
        }
    }
}

/// Entity extraction settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Gazetteer file replacing the built-in place list
    pub gazetteer_path: Option<PathBuf>,
}

/// Outbound HTTP client timeouts
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: http::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: http::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = Self {
            host: env_config::host(),
            http_port: parse_env(env_vars::HTTP_PORT, ports::DEFAULT_HTTP_PORT)?,
            database: DatabaseConfig {
                url: env_config::database_url(),
            },
            external_services: ExternalServicesConfig {
                usda: UsdaApiConfig {
                    api_key: env_config::optional_secret(env_vars::USDA_API_KEY),
                    base_url: env_var_or(env_vars::USDA_BASE_URL, nutrition::DEFAULT_USDA_BASE_URL),
                    cache_ttl_secs: parse_env(
                        env_vars::NUTRITION_CACHE_TTL_SECS,
                        nutrition::DEFAULT_CACHE_TTL_SECS,
                    )?,
                },
                ors: OrsApiConfig {
                    api_key: env_config::optional_secret(env_vars::ORS_API_KEY),
                    base_url: env_var_or(env_vars::ORS_BASE_URL, travel::DEFAULT_ORS_BASE_URL),
                },
            },
            polisher: PolisherConfig {
                base_url: env_var_or(env_vars::POLISHER_BASE_URL, polisher::DEFAULT_BASE_URL),
                model: env_var_or(env_vars::POLISHER_MODEL, polisher::DEFAULT_MODEL),
                api_key: env_config::optional_secret(env_vars::POLISHER_API_KEY),
                max_length: parse_env(env_vars::POLISHER_MAX_LENGTH, polisher::DEFAULT_MAX_LENGTH)?,
                num_beams: parse_env(env_vars::POLISHER_NUM_BEAMS, polisher::DEFAULT_NUM_BEAMS)?,
                warmup: parse_env(env_vars::POLISHER_WARMUP, true)?,
            },
            extractor: ExtractorConfig {
                gazetteer_path: env::var(env_vars::GAZETTEER_PATH)
                    .ok()
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from),
            },
            http_client: HttpClientConfig {
                timeout_secs: parse_env(env_vars::HTTP_TIMEOUT_SECS, http::DEFAULT_TIMEOUT_SECS)?,
                connect_timeout_secs: parse_env(
                    env_vars::HTTP_CONNECT_TIMEOUT_SECS,
                    http::DEFAULT_CONNECT_TIMEOUT_SECS,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the services cannot work with
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        if self.polisher.num_beams == 0 {
            anyhow::bail!("{} must be at least 1", env_vars::POLISHER_NUM_BEAMS);
        }
        if self.polisher.max_length == 0 {
            anyhow::bail!("{} must be at least 1", env_vars::POLISHER_MAX_LENGTH);
        }
        if self.http_client.timeout_secs == 0 {
            anyhow::bail!("{} must be at least 1", env_vars::HTTP_TIMEOUT_SECS);
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Daybook Server Configuration:\n\
             - Bind: {}:{}\n\
             - Database: {}\n\
             - Nutrition Lookup (USDA): {}\n\
             - Travel Lookup (ORS): {}\n\
             - Polisher Model: {} (max_length={}, num_beams={})\n\
             - Gazetteer: {}\n\
             - HTTP Timeout: {}s (connect {}s)",
            self.host,
            self.http_port,
            self.database.url,
            enabled_label(self.external_services.usda.api_key.is_some()),
            enabled_label(self.external_services.ors.api_key.is_some()),
            self.polisher.model,
            self.polisher.max_length,
            self.polisher.num_beams,
            self.extractor
                .gazetteer_path
                .as_ref()
                .map_or_else(|| "built-in".to_owned(), |p| p.display().to_string()),
            self.http_client.timeout_secs,
            self.http_client.connect_timeout_secs,
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: ports::DEFAULT_HOST.to_owned(),
            http_port: ports::DEFAULT_HTTP_PORT,
            database: DatabaseConfig {
                url: crate::constants::storage::DEFAULT_DATABASE_URL.to_owned(),
            },
            external_services: ExternalServicesConfig::default(),
            polisher: PolisherConfig::default(),
            extractor: ExtractorConfig::default(),
            http_client: HttpClientConfig::default(),
        }
    }
}

const fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "Enabled"
    } else {
        "Disabled (no API key)"
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_summary_hides_secrets() {
        let mut config = ServerConfig::default();
        config.external_services.usda.api_key = Some("usda-secret".into());
        let summary = config.summary();
        assert!(summary.contains("Nutrition Lookup (USDA): Enabled"));
        assert!(summary.contains("Travel Lookup (ORS): Disabled"));
        assert!(!summary.contains("usda-secret"));
    }

    #[test]
    fn test_serialized_config_skips_api_keys() {
        let mut config = ServerConfig::default();
        config.external_services.ors.api_key = Some("ors-secret".into());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("ors-secret"));
    }

    #[test]
    fn test_validate_rejects_zero_beams() {
        let mut config = ServerConfig::default();
        config.polisher.num_beams = 0;
        assert!(config.validate().is_err());
        assert!(ServerConfig::default().validate().is_ok());
    }
}
