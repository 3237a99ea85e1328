// ABOUTME: Integration tests for the SQLite entry store
// ABOUTME: CRUD round trips, ordering, date-range filtering, and day grouping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::{NaiveDate, TimeZone, Utc};
use daybook::database::{group_by_day, EntryStore};
use daybook::errors::ErrorCode;
use daybook::models::DiarySummary;

fn summary(text: &str) -> DiarySummary {
    DiarySummary {
        polished_text: text.to_owned(),
        food_summaries: vec![
            "Rice: 250.5 kcal, 12g protein".to_owned(),
            "Dal: Nutrition info not found".to_owned(),
        ],
        travel_summary: Some("Only one place detected (Pune); at least two are needed to calculate travel distance.".to_owned()),
    }
}

async fn store() -> Result<EntryStore> {
    common::init_test_logging();
    Ok(EntryStore::connect("sqlite::memory:").await?)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_create_and_get_round_trip() -> Result<()> {
    let store = store().await?;
    let created = store.create("had rice in pune", &summary("Had rice in Pune.")).await?;

    let fetched = store.get(created.id).await?.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.raw_text, "had rice in pune");
    assert_eq!(fetched.summary(), summary("Had rice in Pune."));
    assert_eq!(fetched.created_at, fetched.updated_at);

    assert!(store.get(created.id + 100).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_missing_travel_summary_round_trips_as_none() -> Result<()> {
    let store = store().await?;
    let mut plain = summary("Quiet day.");
    plain.travel_summary = None;
    plain.food_summaries.clear();

    let created = store.create("quiet day", &plain).await?;
    let fetched = store.get(created.id).await?.unwrap();
    assert_eq!(fetched.travel_summary, None);
    assert!(fetched.food_summaries.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_list_is_newest_first_with_paging() -> Result<()> {
    let store = store().await?;
    for day in 1..=3 {
        let at = Utc.with_ymd_and_hms(2025, 5, day, 8, 0, 0).unwrap();
        store
            .create_at(&format!("day {day}"), &summary("x"), at)
            .await?;
    }

    let all = store.list(10, 0).await?;
    let texts: Vec<&str> = all.iter().map(|e| e.raw_text.as_str()).collect();
    assert_eq!(texts, vec!["day 3", "day 2", "day 1"]);

    let page = store.list(1, 1).await?;
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].raw_text, "day 2");
    Ok(())
}

#[tokio::test]
async fn test_list_between_is_inclusive_and_groups_by_day() -> Result<()> {
    let store = store().await?;
    let times = [
        Utc.with_ymd_and_hms(2025, 6, 9, 23, 59, 59).unwrap(),
        Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 6, 10, 18, 30, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 6, 11, 23, 59, 59).unwrap(),
        Utc.with_ymd_and_hms(2025, 6, 12, 0, 0, 0).unwrap(),
    ];
    for (i, at) in times.iter().enumerate() {
        store.create_at(&format!("entry {i}"), &summary("x"), *at).await?;
    }

    let entries = store.list_between(date(2025, 6, 10), date(2025, 6, 11)).await?;
    let texts: Vec<&str> = entries.iter().map(|e| e.raw_text.as_str()).collect();
    assert_eq!(texts, vec!["entry 3", "entry 2", "entry 1"]);

    let days = group_by_day(entries);
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, date(2025, 6, 11));
    assert_eq!(days[1].date, date(2025, 6, 10));
    assert_eq!(days[1].entries.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_list_between_rejects_inverted_range() -> Result<()> {
    let store = store().await?;
    let err = store
        .list_between(date(2025, 6, 11), date(2025, 6, 10))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_update_and_delete() -> Result<()> {
    let store = store().await?;
    let created = store
        .create_at(
            "first draft",
            &summary("First draft."),
            Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        )
        .await?;

    let mut revised = summary("Second draft.");
    revised.travel_summary = None;
    let updated = store.update(created.id, "second draft", &revised).await?.unwrap();
    assert_eq!(updated.raw_text, "second draft");
    assert_eq!(updated.travel_summary, None);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    assert!(store.update(9999, "nope", &revised).await?.is_none());

    assert!(store.delete(created.id).await?);
    assert!(!store.delete(created.id).await?);
    assert!(store.get(created.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_file_database_is_created() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("diary.db");
    let url = format!("sqlite:{}", path.display());

    let store = EntryStore::connect(&url).await?;
    store.create("persisted", &summary("Persisted.")).await?;
    assert!(path.exists());

    let reopened = EntryStore::connect(&url).await?;
    assert_eq!(reopened.list(10, 0).await?.len(), 1);
    Ok(())
}
