// ABOUTME: Error handling for the Daybook server crate
// ABOUTME: Re-exports the unified error types defined in daybook-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! All fallible operations return [`AppResult`]. Errors render as
//! `{"error": {"code", "message"}}` with an HTTP status derived from the code.

pub use daybook_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails};
