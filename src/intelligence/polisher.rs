// ABOUTME: Grammar-correcting text rewrite backed by a text2text-generation inference endpoint
// ABOUTME: Loaded once at startup with a warm-up request; a per-call failure halts the entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Text polishing
//!
//! The polisher sends the raw entry to a hosted sequence-to-sequence model
//! (`POST {base_url}/models/{model}`) and takes the single best beam-search
//! rewrite. Generation is bounded by `max_length` and uses `num_beams` with
//! early stopping.

use crate::config::environment::PolisherConfig;
use crate::constants::service_names;
use crate::errors::{AppError, AppResult};
use crate::external::transport::{JsonTransport, TransportError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, instrument};

/// Text used for the startup warm-up request
const WARMUP_TEXT: &str = "i has went to the market yesterday";

/// Rewrites diary text into grammatical prose
#[async_trait]
pub trait TextPolisher: Send + Sync {
    /// Return the single best rewrite of `text`
    async fn polish(&self, text: &str) -> AppResult<String>;
}

/// [`TextPolisher`] served by a remote inference endpoint
pub struct InferencePolisher {
    config: PolisherConfig,
    transport: Arc<dyn JsonTransport>,
}

impl InferencePolisher {
    /// Build the polisher and, when enabled, confirm the model answers
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceUnavailable` if the warm-up request fails
    pub async fn load(config: PolisherConfig, transport: Arc<dyn JsonTransport>) -> AppResult<Self> {
        let polisher = Self { config, transport };
        if polisher.config.warmup {
            polisher.polish(WARMUP_TEXT).await.map_err(|e| {
                AppError::service_unavailable(
                    service_names::POLISHER,
                    format!("model {} failed warm-up: {}", polisher.config.model, e.message),
                )
            })?;
            info!(model = %polisher.config.model, "Text polisher warmed up");
        }
        Ok(polisher)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body(&self, text: &str) -> Value {
        json!({
            "inputs": text,
            "parameters": {
                "max_length": self.config.max_length,
                "num_beams": self.config.num_beams,
                "early_stopping": true
            }
        })
    }
}

#[async_trait]
impl TextPolisher for InferencePolisher {
    #[instrument(skip(self, text), fields(service = service_names::POLISHER, chars = text.len()))]
    async fn polish(&self, text: &str) -> AppResult<String> {
        if text.trim().is_empty() {
            return Err(AppError::invalid_input("Text to polish cannot be empty"));
        }

        let bearer = self.config.api_key.as_ref().map(|key| format!("Bearer {key}"));
        let headers: Vec<(&str, &str)> = bearer
            .as_deref()
            .map(|value| vec![("Authorization", value)])
            .unwrap_or_default();

        let response = self
            .transport
            .post_json(&self.endpoint(), &headers, &self.request_body(text))
            .await
            .map_err(transport_error)?;

        parse_generated_text(&response)
    }
}

fn transport_error(error: TransportError) -> AppError {
    match error {
        TransportError::Status(503) => AppError::service_unavailable(
            service_names::POLISHER,
            "model is loading or unavailable (HTTP 503)",
        ),
        other => AppError::external_service(service_names::POLISHER, other.to_string()),
    }
}

/// Extract `generated_text` from `[{"generated_text": ...}]` (or a bare object)
fn parse_generated_text(response: &Value) -> AppResult<String> {
    if let Some(message) = response.get("error").and_then(Value::as_str) {
        return Err(AppError::external_service(service_names::POLISHER, message));
    }

    let generated = response
        .pointer("/0/generated_text")
        .or_else(|| response.get("generated_text"))
        .and_then(Value::as_str)
        .map(str::trim)
        .ok_or_else(|| {
            AppError::external_service(
                service_names::POLISHER,
                "response carries no generated_text",
            )
        })?;

    if generated.is_empty() {
        return Err(AppError::external_service(
            service_names::POLISHER,
            "model returned an empty rewrite",
        ));
    }
    Ok(generated.to_owned())
}
