// ABOUTME: Shared HTTP client construction with timeout configuration
// ABOUTME: Every outbound call (nutrition, routing, polisher) goes through a bounded client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::environment::HttpClientConfig;
use crate::constants::service_names;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Create a new HTTP client with custom timeout settings
///
/// # Arguments
/// * `timeout_secs` - Request timeout in seconds
/// * `connect_timeout_secs` - Connection timeout in seconds
///
/// Falls back to a default client if the builder rejects the settings.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .user_agent(concat!("daybook/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(
                service = service_names::DAYBOOK_SERVER,
                "Falling back to default HTTP client: {e}"
            );
            Client::new()
        })
}

/// Create a client from the configured timeouts
#[must_use]
pub fn client_from_config(config: &HttpClientConfig) -> Client {
    create_client_with_timeout(config.timeout_secs, config.connect_timeout_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::http;

    #[test]
    fn test_client_from_default_config_builds() {
        let config = HttpClientConfig::default();
        assert_eq!(config.timeout_secs, http::DEFAULT_TIMEOUT_SECS);
        let _client = client_from_config(&config);
    }
}
