// ABOUTME: SQLite persistence for processed diary entries
// ABOUTME: CRUD, newest-first listing, calendar-date range queries, and day grouping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::storage;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Days, NaiveDate, SecondsFormat, Utc};
use daybook_core::models::DiarySummary;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

// ============================================================================
// Record Types
// ============================================================================

/// A stored diary entry with its enrichment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Row id
    pub id: i64,
    /// Text as submitted (trimmed)
    pub raw_text: String,
    /// Grammar-corrected text
    pub polished_text: String,
    /// One nutrition line per recognized food
    pub food_summaries: Vec<String>,
    /// Travel sentence, if any place was mentioned
    pub travel_summary: Option<String>,
    /// When the entry was first stored
    pub created_at: DateTime<Utc>,
    /// When the entry was last re-processed
    pub updated_at: DateTime<Utc>,
}

impl DiaryEntry {
    /// UTC calendar date the entry was written on
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// The enrichment part of the entry
    #[must_use]
    pub fn summary(&self) -> DiarySummary {
        DiarySummary {
            polished_text: self.polished_text.clone(),
            food_summaries: self.food_summaries.clone(),
            travel_summary: self.travel_summary.clone(),
        }
    }
}

/// Entries written on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayGroup {
    /// UTC calendar date
    pub date: NaiveDate,
    /// Entries of that day, newest first
    pub entries: Vec<DiaryEntry>,
}

/// Group entries by UTC calendar date, keeping the order of first appearance
#[must_use]
pub fn group_by_day(entries: Vec<DiaryEntry>) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    for entry in entries {
        let date = entry.day();
        match groups.iter_mut().find(|group| group.date == date) {
            Some(group) => group.entries.push(entry),
            None => groups.push(DayGroup {
                date,
                entries: vec![entry],
            }),
        }
    }
    groups
}

// ============================================================================
// Entry Store
// ============================================================================

const SELECT_COLUMNS: &str =
    "SELECT id, raw_text, polished_text, food_summaries, travel_summary, created_at, updated_at FROM diary_entries";

/// Diary entry persistence
#[derive(Clone)]
pub struct EntryStore {
    pool: SqlitePool,
}

impl EntryStore {
    /// Wrap an existing pool (schema must already exist)
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database, creating the file and schema if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the database cannot be opened
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL {database_url}: {e}")))?
            .create_if_missing(true);

        // Every connection to an in-memory database is a separate database
        let in_memory = database_url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open {database_url}: {e}")))?;

        let store = Self::new(pool);
        store.migrate().await?;
        info!("Entry store ready at {}", database_url);
        Ok(store)
    }

    /// Create the entries table and its index
    ///
    /// # Errors
    ///
    /// Returns an error if the schema statements fail
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS diary_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                raw_text TEXT NOT NULL,
                polished_text TEXT NOT NULL,
                food_summaries TEXT NOT NULL DEFAULT '[]',
                travel_summary TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create diary_entries: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_diary_entries_created_at ON diary_entries(created_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create created_at index: {e}")))?;

        Ok(())
    }

    /// Store a processed entry
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create(&self, raw_text: &str, summary: &DiarySummary) -> AppResult<DiaryEntry> {
        self.create_at(raw_text, summary, Utc::now()).await
    }

    /// Store a processed entry with an explicit creation time
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_at(
        &self,
        raw_text: &str,
        summary: &DiarySummary,
        created_at: DateTime<Utc>,
    ) -> AppResult<DiaryEntry> {
        let foods = serde_json::to_string(&summary.food_summaries)?;
        let timestamp = format_timestamp(created_at);

        let result = sqlx::query(
            r"
            INSERT INTO diary_entries (raw_text, polished_text, food_summaries, travel_summary, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ",
        )
        .bind(raw_text)
        .bind(&summary.polished_text)
        .bind(&foods)
        .bind(&summary.travel_summary)
        .bind(&timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create diary entry: {e}")))?;

        let id = result.last_insert_rowid();
        debug!(entry_id = id, "Stored diary entry");

        self.get(id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Diary entry {id} vanished after insert")))
    }

    /// Get an entry by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get(&self, id: i64) -> AppResult<Option<DiaryEntry>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get diary entry: {e}")))?;

        row.as_ref().map(row_to_entry).transpose()
    }

    /// List entries newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<DiaryEntry>> {
        let limit = limit.clamp(1, storage::MAX_PAGE_SIZE);
        let offset = offset.max(0);

        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list diary entries: {e}")))?;

        rows.iter().map(row_to_entry).collect()
    }

    /// Entries written between two UTC calendar dates (inclusive), newest first
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `from` is after `to`, or a database error
    pub async fn list_between(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<DiaryEntry>> {
        if from > to {
            return Err(AppError::invalid_input(format!(
                "Start date {from} is after end date {to}"
            )));
        }
        let lower = format_timestamp(start_of_day(from));
        let upper = to
            .checked_add_days(Days::new(1))
            .map(|next| format_timestamp(start_of_day(next)));

        let rows = match upper {
            Some(upper) => {
                sqlx::query(&format!(
                    "{SELECT_COLUMNS} WHERE created_at >= $1 AND created_at < $2 ORDER BY created_at DESC, id DESC"
                ))
                .bind(&lower)
                .bind(upper)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "{SELECT_COLUMNS} WHERE created_at >= $1 ORDER BY created_at DESC, id DESC"
                ))
                .bind(&lower)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to list diary entries by date: {e}")))?;

        rows.iter().map(row_to_entry).collect()
    }

    /// Replace an entry's text and enrichment
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update(
        &self,
        id: i64,
        raw_text: &str,
        summary: &DiarySummary,
    ) -> AppResult<Option<DiaryEntry>> {
        let foods = serde_json::to_string(&summary.food_summaries)?;
        let now = format_timestamp(Utc::now());

        let result = sqlx::query(
            r"
            UPDATE diary_entries
            SET raw_text = $1, polished_text = $2, food_summaries = $3, travel_summary = $4, updated_at = $5
            WHERE id = $6
            ",
        )
        .bind(raw_text)
        .bind(&summary.polished_text)
        .bind(&foods)
        .bind(&summary.travel_summary)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update diary entry: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    /// Delete an entry, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM diary_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete diary entry: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Check the database answers
    ///
    /// # Errors
    ///
    /// Returns an error if the probe query fails
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }
}

/// Fixed-width RFC 3339 so lexical order matches chronological order
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid stored timestamp '{raw}': {e}")))
}

fn row_to_entry(row: &SqliteRow) -> AppResult<DiaryEntry> {
    let column = |e: sqlx::Error| AppError::database(format!("Failed to decode diary entry: {e}"));
    let foods: String = row.try_get("food_summaries").map_err(column)?;
    let created_at: String = row.try_get("created_at").map_err(column)?;
    let updated_at: String = row.try_get("updated_at").map_err(column)?;

    Ok(DiaryEntry {
        id: row.try_get("id").map_err(column)?,
        raw_text: row.try_get("raw_text").map_err(column)?,
        polished_text: row.try_get("polished_text").map_err(column)?,
        food_summaries: serde_json::from_str(&foods)?,
        travel_summary: row.try_get("travel_summary").map_err(column)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
