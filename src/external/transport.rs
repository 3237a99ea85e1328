// ABOUTME: JSON-over-HTTP transport seam used by the remote lookup clients
// ABOUTME: A reqwest implementation for production, swappable for scripted transports in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use daybook_core::models::UnavailableReason;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single JSON request
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response (connect failure, timeout)
    #[error("request failed: {0}")]
    Request(String),
    /// The upstream answered with a non-success status
    #[error("HTTP {0}")]
    Status(u16),
    /// The body was not valid JSON
    #[error("invalid JSON body: {0}")]
    Decode(String),
}

impl From<TransportError> for UnavailableReason {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Request(message) => Self::Transport { message },
            TransportError::Status(code) => Self::Status { code },
            TransportError::Decode(message) => Self::Malformed { message },
        }
    }
}

/// Minimal JSON request surface shared by the lookup clients
#[async_trait]
pub trait JsonTransport: Send + Sync {
    /// `GET url?query`, decoding the body as JSON
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, TransportError>;

    /// `POST url` with a JSON body and extra headers, decoding the response as JSON
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, TransportError>;
}

/// [`JsonTransport`] backed by a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wrap a configured client
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    async fn decode(response: reqwest::Response) -> Result<Value, TransportError> {
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl JsonTransport for ReqwestTransport {
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, TransportError> {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_map_to_fault_reasons() {
        let status: UnavailableReason = TransportError::Status(500).into();
        assert_eq!(status, UnavailableReason::Status { code: 500 });
        assert!(status.is_fault());

        let decode: UnavailableReason = TransportError::Decode("eof".into()).into();
        assert!(matches!(decode, UnavailableReason::Malformed { .. }));
    }
}
