// ABOUTME: Route module organization for the Daybook HTTP API
// ABOUTME: Merges health and diary entry routes and applies tracing, CORS, and body limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Daybook server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the pipeline and the entry store.

/// Diary entry routes
pub mod entries;
/// Health check and readiness routes
pub mod health;

pub use entries::EntryRoutes;
pub use health::HealthRoutes;

use crate::resources::ServerResources;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the complete application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(EntryRoutes::routes(resources))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
