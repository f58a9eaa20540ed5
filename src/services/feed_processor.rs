use chrono::Utc;
use serde_json::Value;

use crate::config::PanelSettings;
use crate::domain::{InvocationResponse, Payload};
use crate::errors::FeederResult;
use crate::services::retention_pruner::{CleanupReport, RetentionPruner};
use crate::services::store_writer::StoreWriter;
use crate::sources::FeedSource;
use crate::storage::traits::PanelFeedRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The source had nothing; store and cleanup were skipped
    NoData,
    Stored {
        record_id: String,
        items_stored: usize,
        cleanup: CleanupReport,
    },
}

/// Runs one fetch, store, prune pass for a panel.
pub struct FeedProcessor<S: FeedSource, R: PanelFeedRepository> {
    source: S,
    repository: R,
    panel: PanelSettings,
}

impl<S: FeedSource, R: PanelFeedRepository> FeedProcessor<S, R> {
    pub fn new(source: S, repository: R, panel: PanelSettings) -> Self {
        Self {
            source,
            repository,
            panel,
        }
    }

    pub fn process(&self) -> FeederResult<ProcessOutcome> {
        let panel_name = &self.panel.panel_name;
        let limit = self.panel.max_results;
        tracing::info!(panel = %panel_name, max_results = limit, "Starting feed processing");

        let mut items = self.source.fetch(limit)?;
        tracing::info!(panel = %panel_name, fetched = items.len(), "Fetched items");

        if items.len() > limit {
            tracing::warn!(
                panel = %panel_name,
                fetched = items.len(),
                max_results = limit,
                "Source returned more items than requested, truncating"
            );
            items.truncate(limit);
        }

        if items.is_empty() {
            tracing::warn!(panel = %panel_name, "No data fetched");
            return Ok(ProcessOutcome::NoData);
        }

        let payload = Payload::new(items, Utc::now());
        let items_stored = payload.items_count();

        let record_id = StoreWriter::new(&self.repository, &self.panel).store(payload)?;
        let cleanup = RetentionPruner::new(&self.repository).prune();

        tracing::info!(panel = %panel_name, items_stored, "Successfully processed panel");

        Ok(ProcessOutcome::Stored {
            record_id,
            items_stored,
            cleanup,
        })
    }

    /// Entry point for a scheduled trigger. Never fails: every error ends up
    /// in a `status: "failed"` response.
    pub fn handle(&self, event: &Value) -> InvocationResponse {
        tracing::debug!(event = %event, "Invocation received");
        let panel_name = &self.panel.panel_name;

        match self.process() {
            Ok(ProcessOutcome::NoData) => InvocationResponse::no_data(panel_name),
            Ok(ProcessOutcome::Stored { items_stored, .. }) => {
                InvocationResponse::stored(panel_name, items_stored, Utc::now())
            }
            Err(e) => {
                tracing::error!(panel = %panel_name, error = ?e, "Error processing panel");
                InvocationResponse::failed(panel_name, &e.to_string(), Utc::now())
            }
        }
    }
}
