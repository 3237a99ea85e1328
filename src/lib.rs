// ABOUTME: Main library entry point for the Daybook diary enrichment service
// ABOUTME: Polishes diary entries and annotates them with nutrition and travel facts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Daybook
//!
//! A diary service. Each submitted entry is rewritten into grammatical prose,
//! scanned for foods and places, and enriched with calories/protein per food
//! and the driving distance between the first two places mentioned.
//!
//! ## Architecture
//!
//! - **Intelligence**: text polisher, annotator, entity extractor, travel lookup
//! - **External**: USDA nutrition client and the JSON transport seam
//! - **Pipeline**: orders the steps and turns lookups into summary sentences
//! - **Database**: SQLite entry store
//! - **Routes**: JSON HTTP API over the pipeline and the store
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use daybook::config::environment::ServerConfig;
//! use daybook::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = ServerResources::initialize(config).await?;
//!     let summary = resources.pipeline.process("i eat rice in hyderabad").await?;
//!     println!("{}", summary.polished_text);
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// Entry persistence
pub mod database;

/// Unified error handling
pub mod errors;

/// External API clients and transport
pub mod external;

/// Polisher, annotator, extractor, and travel lookup
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Enrichment pipeline
pub mod pipeline;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// Shared utilities
pub mod utils;

pub use daybook_core::models;
