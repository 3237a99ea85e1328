// ABOUTME: Shared server resources built once at startup and injected into route handlers
// ABOUTME: Loads the models, wires the lookup clients, and opens the entry store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::environment::ServerConfig;
use crate::database::EntryStore;
use crate::errors::AppResult;
use crate::external::transport::{JsonTransport, ReqwestTransport};
use crate::external::usda_client::UsdaNutritionClient;
use crate::intelligence::annotator::LexiconAnnotator;
use crate::intelligence::extractor::EntityExtractor;
use crate::intelligence::location::OrsTravelClient;
use crate::intelligence::polisher::InferencePolisher;
use crate::pipeline::DiaryPipeline;
use crate::utils::http_client::client_from_config;
use std::sync::Arc;
use tracing::info;

/// Everything a request handler needs
pub struct ServerResources {
    /// Configuration the server was started with
    pub config: Arc<ServerConfig>,
    /// Diary entry persistence
    pub store: EntryStore,
    /// Enrichment pipeline shared by every request
    pub pipeline: DiaryPipeline,
}

impl ServerResources {
    /// Assemble resources from already-built parts
    #[must_use]
    pub const fn new(config: Arc<ServerConfig>, store: EntryStore, pipeline: DiaryPipeline) -> Self {
        Self {
            config,
            store,
            pipeline,
        }
    }

    /// Build all resources from configuration
    ///
    /// # Errors
    ///
    /// Fails if the gazetteer cannot be loaded, the polisher warm-up fails,
    /// or the database cannot be opened
    pub async fn initialize(config: ServerConfig) -> AppResult<Self> {
        let transport: Arc<dyn JsonTransport> =
            Arc::new(ReqwestTransport::new(client_from_config(&config.http_client)));

        let annotator = LexiconAnnotator::load(config.extractor.gazetteer_path.as_deref())?;
        info!("Annotator loaded with {} places", annotator.gazetteer_len());

        let polisher = InferencePolisher::load(config.polisher.clone(), Arc::clone(&transport)).await?;

        let pipeline = DiaryPipeline::new(
            Arc::new(polisher),
            EntityExtractor::new(Arc::new(annotator)),
            Arc::new(UsdaNutritionClient::new(
                config.external_services.usda.clone(),
                Arc::clone(&transport),
            )),
            Arc::new(OrsTravelClient::new(
                config.external_services.ors.clone(),
                transport,
            )),
        );

        let store = EntryStore::connect(&config.database.url).await?;

        Ok(Self::new(Arc::new(config), store, pipeline))
    }
}
