// ABOUTME: Diary entry route handlers: submit, list, browse by day, edit, delete, preview
// ABOUTME: Each write runs the enrichment pipeline before touching the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::storage;
use crate::database::{group_by_day, DayGroup, DiaryEntry};
use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of entry submission, edit and preview requests
#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    /// Raw diary text
    pub entry: Option<String>,
}

impl EntryRequest {
    /// The trimmed entry text
    fn text(&self) -> Result<&str, AppError> {
        let text = self
            .entry
            .as_deref()
            .ok_or_else(|| AppError::missing_field("entry"))?
            .trim();
        if text.is_empty() {
            return Err(AppError::invalid_input("Diary entry cannot be empty"));
        }
        Ok(text)
    }
}

/// Pagination for entry listing
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    /// Page size, clamped to `1..=MAX_PAGE_SIZE`
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Entries to skip
    #[serde(default)]
    pub offset: i64,
}

const fn default_limit() -> i64 {
    storage::DEFAULT_PAGE_SIZE
}

/// Calendar-date range; `to` defaults to today and `from` to the week ending at `to`
#[derive(Debug, Deserialize)]
pub struct ByDayQuery {
    /// First day (inclusive)
    pub from: Option<NaiveDate>,
    /// Last day (inclusive)
    pub to: Option<NaiveDate>,
}

/// One page of entries
#[derive(Debug, Serialize, Deserialize)]
pub struct EntryListResponse {
    /// Entries newest first
    pub entries: Vec<DiaryEntry>,
    /// Number of entries in this page
    pub count: usize,
}

/// Entries grouped by day
#[derive(Debug, Serialize, Deserialize)]
pub struct DaysResponse {
    /// First day of the range
    pub from: NaiveDate,
    /// Last day of the range
    pub to: NaiveDate,
    /// Days that have entries, newest first
    pub days: Vec<DayGroup>,
}

// ============================================================================
// Entry Routes
// ============================================================================

/// Diary entry routes handler
pub struct EntryRoutes;

impl EntryRoutes {
    /// Create all diary entry routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/entries",
                post(Self::create_entry).get(Self::list_entries),
            )
            .route("/api/entries/by-day", get(Self::entries_by_day))
            .route(
                "/api/entries/:entry_id",
                get(Self::get_entry)
                    .put(Self::update_entry)
                    .delete(Self::delete_entry),
            )
            .route("/api/preview", post(Self::preview))
            .with_state(resources)
    }

    /// Process and store a new entry
    async fn create_entry(
        State(resources): State<Arc<ServerResources>>,
        WithRejection(Json(request), _): WithRejection<Json<EntryRequest>, AppError>,
    ) -> Result<Response, AppError> {
        let text = request.text()?;
        let summary = resources.pipeline.process(text).await?;
        let entry = resources.store.create(text, &summary).await?;
        info!(entry_id = entry.id, "Created diary entry");
        Ok((StatusCode::CREATED, Json(entry)).into_response())
    }

    /// List entries newest first
    async fn list_entries(
        State(resources): State<Arc<ServerResources>>,
        WithRejection(Query(query), _): WithRejection<Query<ListEntriesQuery>, AppError>,
    ) -> Result<Response, AppError> {
        let entries = resources.store.list(query.limit, query.offset).await?;
        let count = entries.len();
        Ok((StatusCode::OK, Json(EntryListResponse { entries, count })).into_response())
    }

    /// Entries within a date range, grouped by day
    async fn entries_by_day(
        State(resources): State<Arc<ServerResources>>,
        WithRejection(Query(query), _): WithRejection<Query<ByDayQuery>, AppError>,
    ) -> Result<Response, AppError> {
        let to = query.to.unwrap_or_else(|| Utc::now().date_naive());
        let from = query
            .from
            .unwrap_or_else(|| to.checked_sub_days(Days::new(6)).unwrap_or(to));
        let entries = resources.store.list_between(from, to).await?;
        let days = group_by_day(entries);
        Ok((StatusCode::OK, Json(DaysResponse { from, to, days })).into_response())
    }

    /// Get a single entry
    async fn get_entry(
        State(resources): State<Arc<ServerResources>>,
        WithRejection(Path(entry_id), _): WithRejection<Path<i64>, AppError>,
    ) -> Result<Response, AppError> {
        let entry = resources
            .store
            .get(entry_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Diary entry {entry_id}")))?;
        Ok((StatusCode::OK, Json(entry)).into_response())
    }

    /// Re-process and replace an entry
    async fn update_entry(
        State(resources): State<Arc<ServerResources>>,
        WithRejection(Path(entry_id), _): WithRejection<Path<i64>, AppError>,
        WithRejection(Json(request), _): WithRejection<Json<EntryRequest>, AppError>,
    ) -> Result<Response, AppError> {
        let text = request.text()?;
        if resources.store.get(entry_id).await?.is_none() {
            return Err(AppError::not_found(format!("Diary entry {entry_id}")));
        }
        let summary = resources.pipeline.process(text).await?;
        let entry = resources
            .store
            .update(entry_id, text, &summary)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Diary entry {entry_id}")))?;
        info!(entry_id, "Updated diary entry");
        Ok((StatusCode::OK, Json(entry)).into_response())
    }

    /// Delete an entry
    async fn delete_entry(
        State(resources): State<Arc<ServerResources>>,
        WithRejection(Path(entry_id), _): WithRejection<Path<i64>, AppError>,
    ) -> Result<Response, AppError> {
        if !resources.store.delete(entry_id).await? {
            return Err(AppError::not_found(format!("Diary entry {entry_id}")));
        }
        info!(entry_id, "Deleted diary entry");
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Run the pipeline without storing anything
    async fn preview(
        State(resources): State<Arc<ServerResources>>,
        WithRejection(Json(request), _): WithRejection<Json<EntryRequest>, AppError>,
    ) -> Result<Response, AppError> {
        let summary = resources.pipeline.process(request.text()?).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }
}
