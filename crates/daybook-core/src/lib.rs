// ABOUTME: Core types and constants for the Daybook diary enrichment service
// ABOUTME: Foundation crate with error handling, enrichment models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Daybook Core
//!
//! Shared types for the Daybook service. This crate changes rarely and carries
//! no I/O of its own.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Nutrition, travel and summary records produced by the pipeline
//! - **constants**: Whitelists, thresholds and sentence templates

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Enrichment data models (nutrition, travel, lookup availability, summaries)
pub mod models;

/// Domain constants (food whitelist, similarity threshold, defaults)
pub mod constants;
