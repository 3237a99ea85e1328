// ABOUTME: Integration tests for the diary enrichment pipeline with stubbed components
// ABOUTME: Food lines, travel lines for zero/one/two places, and failure policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{test_extractor, test_pipeline, CountingTravel, FailingPolisher, TableNutrition};
use daybook::errors::ErrorCode;
use daybook::models::{Availability, TravelInfo, UnavailableReason};
use daybook::pipeline::DiaryPipeline;
use std::sync::Arc;

fn route() -> Availability<TravelInfo> {
    Availability::Available(TravelInfo::from_segment(10_000.0, 1_800.0))
}

#[tokio::test]
async fn test_food_lines_follow_extraction_order() {
    let nutrition = Arc::new(TableNutrition::default().with("rice", Some(250.5), Some(12.0)));
    let pipeline = test_pipeline(nutrition.clone(), CountingTravel::returning(route()));

    let summary = pipeline
        .process("Had rice, then poha, then rice again.")
        .await
        .unwrap();

    assert_eq!(
        summary.food_summaries,
        vec![
            "Rice: 250.5 kcal, 12g protein",
            "Poha: Nutrition info not found"
        ]
    );
    assert_eq!(nutrition.calls(), vec!["rice", "poha"]);
}

#[tokio::test]
async fn test_zero_places_never_calls_travel() {
    let travel = CountingTravel::returning(route());
    let pipeline = test_pipeline(Arc::new(TableNutrition::default()), travel.clone());

    let summary = pipeline.process("Ate idli at home.").await.unwrap();

    assert_eq!(summary.travel_summary, None);
    assert_eq!(travel.calls(), 0);
}

#[tokio::test]
async fn test_one_place_emits_notice() {
    let travel = CountingTravel::returning(route());
    let pipeline = test_pipeline(Arc::new(TableNutrition::default()), travel.clone());

    let summary = pipeline.process("A quiet day in Pune.").await.unwrap();

    assert_eq!(
        summary.travel_summary.as_deref(),
        Some("Only one place detected (Pune); at least two are needed to calculate travel distance.")
    );
    assert_eq!(travel.calls(), 0);
}

#[tokio::test]
async fn test_two_places_use_first_two_mentions() {
    let travel = CountingTravel::returning(route());
    let pipeline = test_pipeline(Arc::new(TableNutrition::default()), travel.clone());

    let summary = pipeline
        .process("Drove from Nalgonda to Hyderabad, then on to Warangal.")
        .await
        .unwrap();

    assert_eq!(
        summary.travel_summary.as_deref(),
        Some("Travel from Nalgonda to Hyderabad: 10 km, about 0.5 hours by car")
    );
    assert_eq!(travel.calls(), 1);
    assert_eq!(
        travel.last_pair(),
        Some(("nalgonda".to_owned(), "hyderabad".to_owned()))
    );
}

#[tokio::test]
async fn test_failed_travel_lookup_is_soft() {
    let travel = CountingTravel::returning(Availability::Unavailable(UnavailableReason::Status {
        code: 502,
    }));
    let pipeline = test_pipeline(Arc::new(TableNutrition::default()), travel);

    let summary = pipeline
        .process("Ate curd in Nalgonda and dal in Hyderabad.")
        .await
        .unwrap();

    assert_eq!(
        summary.travel_summary.as_deref(),
        Some("Could not retrieve travel info between Nalgonda and Hyderabad.")
    );
    assert_eq!(summary.food_summaries.len(), 2);
}

#[tokio::test]
async fn test_polisher_failure_halts_processing() {
    let nutrition = Arc::new(TableNutrition::default());
    let travel = CountingTravel::returning(route());
    let pipeline = DiaryPipeline::new(
        Arc::new(FailingPolisher),
        test_extractor(),
        nutrition.clone(),
        travel.clone(),
    );

    let err = pipeline.process("rice in Pune and Goa").await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(nutrition.calls().is_empty());
    assert_eq!(travel.calls(), 0);
}

#[tokio::test]
async fn test_blank_entry_is_invalid_input() {
    let pipeline = test_pipeline(
        Arc::new(TableNutrition::default()),
        CountingTravel::returning(route()),
    );
    let err = pipeline.process(" \n\t ").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}
