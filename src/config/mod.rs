// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-driven configuration for storage, lookups, models, and timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Daybook server

/// Environment and server configuration
pub mod environment;

pub use environment::ServerConfig;
