// ABOUTME: External API client modules (USDA FoodData Central) and the JSON transport seam
// ABOUTME: Provides nutrition lookups with caching over a swappable HTTP transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External API Clients

pub mod transport;
pub mod usda_client;

// Re-export commonly used types
pub use transport::{JsonTransport, ReqwestTransport, TransportError};
pub use usda_client::{NutritionLookup, UsdaNutritionClient};
