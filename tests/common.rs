// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Scripted transports, stub pipeline components, and in-memory resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `daybook`

use anyhow::Result;
use async_trait::async_trait;
use daybook::config::environment::ServerConfig;
use daybook::database::EntryStore;
use daybook::errors::{AppError, AppResult};
use daybook::external::transport::{JsonTransport, TransportError};
use daybook::external::usda_client::NutritionLookup;
use daybook::intelligence::annotator::LexiconAnnotator;
use daybook::intelligence::extractor::EntityExtractor;
use daybook::intelligence::location::TravelLookup;
use daybook::intelligence::polisher::TextPolisher;
use daybook::models::{Availability, NutritionInfo, TravelInfo, UnavailableReason};
use daybook::pipeline::DiaryPipeline;
use daybook::resources::ServerResources;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Transports
// ============================================================================

/// A request seen by [`ScriptedTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

type Responder = dyn Fn(&RecordedRequest) -> Result<Value, TransportError> + Send + Sync;

/// Transport answering from a closure and recording every request
pub struct ScriptedTransport {
    responder: Box<Responder>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new(
        responder: impl Fn(&RecordedRequest) -> Result<Value, TransportError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Transport that always fails with the given status
    pub fn failing_with_status(code: u16) -> Arc<Self> {
        Self::new(move |_| Err(TransportError::Status(code)))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn answer(&self, request: RecordedRequest) -> Result<Value, TransportError> {
        let result = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        result
    }
}

#[async_trait]
impl JsonTransport for ScriptedTransport {
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, TransportError> {
        self.answer(RecordedRequest {
            method: "GET",
            url: url.to_owned(),
            params: query
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            body: None,
        })
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> Result<Value, TransportError> {
        self.answer(RecordedRequest {
            method: "POST",
            url: url.to_owned(),
            params: headers
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            body: Some(body.clone()),
        })
    }
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

// ============================================================================
// Pipeline component stubs
// ============================================================================

/// Polisher that returns its input unchanged
pub struct EchoPolisher;

#[async_trait]
impl TextPolisher for EchoPolisher {
    async fn polish(&self, text: &str) -> AppResult<String> {
        Ok(text.to_owned())
    }
}

/// Polisher that always fails
pub struct FailingPolisher;

#[async_trait]
impl TextPolisher for FailingPolisher {
    async fn polish(&self, _text: &str) -> AppResult<String> {
        Err(AppError::external_service("Text polisher", "HTTP 500"))
    }
}

/// Nutrition lookup answering from a fixed table; unknown foods are `NoMatch`
#[derive(Default)]
pub struct TableNutrition {
    table: HashMap<String, NutritionInfo>,
    calls: Mutex<Vec<String>>,
}

impl TableNutrition {
    pub fn with(mut self, food: &str, calories: Option<f64>, protein: Option<f64>) -> Self {
        let info = NutritionInfo::from_values(calories, protein).unwrap();
        self.table.insert(food.to_owned(), info);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NutritionLookup for TableNutrition {
    async fn lookup(&self, food: &str) -> Availability<NutritionInfo> {
        self.calls.lock().unwrap().push(food.to_owned());
        self.table.get(food).copied().map_or(
            Availability::Unavailable(UnavailableReason::NoMatch),
            Availability::Available,
        )
    }
}

/// Travel lookup that counts calls and returns a fixed outcome
pub struct CountingTravel {
    outcome: Availability<TravelInfo>,
    calls: AtomicUsize,
    last: Mutex<Option<(String, String)>>,
}

impl CountingTravel {
    pub fn returning(outcome: Availability<TravelInfo>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_pair(&self) -> Option<(String, String)> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl TravelLookup for CountingTravel {
    async fn lookup(&self, from: &str, to: &str) -> Availability<TravelInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((from.to_owned(), to.to_owned()));
        self.outcome.clone()
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Extractor over the built-in gazetteer
pub fn test_extractor() -> EntityExtractor {
    EntityExtractor::new(Arc::new(LexiconAnnotator::load(None).unwrap()))
}

/// Pipeline with an echo polisher and the given lookups
pub fn test_pipeline(
    nutrition: Arc<dyn NutritionLookup>,
    travel: Arc<dyn TravelLookup>,
) -> DiaryPipeline {
    DiaryPipeline::new(Arc::new(EchoPolisher), test_extractor(), nutrition, travel)
}

/// Resources over an in-memory store and the given pipeline
pub async fn test_resources(pipeline: DiaryPipeline) -> Result<Arc<ServerResources>> {
    init_test_logging();
    let store = EntryStore::connect("sqlite::memory:").await?;
    Ok(Arc::new(ServerResources::new(
        Arc::new(ServerConfig::default()),
        store,
        pipeline,
    )))
}
