// ABOUTME: Database module for diary entry persistence
// ABOUTME: SQLite-backed entry store with date-range queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! Processed diary entries are stored in a single SQLite table. Food summaries
//! are kept as a JSON array column; timestamps are fixed-width RFC 3339 UTC
//! strings so that date-range filters can compare them directly.

mod entries;

pub use entries::{group_by_day, DayGroup, DiaryEntry, EntryStore};
