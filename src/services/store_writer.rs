use chrono::Utc;

use crate::config::PanelSettings;
use crate::domain::{NewPanelRecord, Payload};
use crate::errors::FeederResult;
use crate::storage::traits::PanelFeedRepository;

/// Persists one payload as one `panel_feed` row.
pub struct StoreWriter<'a, R: PanelFeedRepository> {
    repository: &'a R,
    panel: &'a PanelSettings,
}

impl<'a, R: PanelFeedRepository> StoreWriter<'a, R> {
    pub fn new(repository: &'a R, panel: &'a PanelSettings) -> Self {
        Self { repository, panel }
    }

    /// Returns the generated record id. Errors are logged and propagated.
    pub fn store(&self, payload: Payload) -> FeederResult<String> {
        let record = NewPanelRecord::new(
            self.panel.panel_name.clone(),
            self.panel.source_feed.clone(),
            payload,
            Utc::now(),
        );

        match self.repository.insert(&record) {
            Ok(record_id) => {
                tracing::info!(record_id = %record_id, "Stored feed data");
                Ok(record_id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Database error while storing feed data");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeedItem;
    use crate::errors::FeederError;
    use crate::storage::traits::MockPanelFeedRepository;
    use serde_json::json;

    fn payload(n: usize) -> Payload {
        let items = (0..n).map(|i| FeedItem::new(json!({ "id": i }))).collect();
        Payload::new(items, Utc::now())
    }

    #[test]
    fn test_store_tags_record_with_panel() {
        let mut repo = MockPanelFeedRepository::new();
        repo.expect_insert()
            .withf(|record| {
                record.panel_name == "security_news_rss"
                    && record.source_feed == "rss_feed"
                    && record.payload.items_count() == 2
            })
            .times(1)
            .returning(|_| Ok("17".to_string()));

        let panel = PanelSettings::default();
        let id = StoreWriter::new(&repo, &panel).store(payload(2)).unwrap();

        assert_eq!(id, "17");
    }

    #[test]
    fn test_store_propagates_errors() {
        let mut repo = MockPanelFeedRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(FeederError::Database(rusqlite::Error::InvalidQuery)));

        let panel = PanelSettings::default();
        let result = StoreWriter::new(&repo, &panel).store(payload(1));

        assert!(matches!(result, Err(FeederError::Database(_))));
    }
}
