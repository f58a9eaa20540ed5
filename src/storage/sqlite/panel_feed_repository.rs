use chrono::{DateTime, Utc};

use crate::domain::NewPanelRecord;
use crate::errors::FeederResult;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::PanelFeedRepository;

pub struct SqlitePanelFeedRepository {
    storage: SqliteStorage,
}

impl SqlitePanelFeedRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl PanelFeedRepository for SqlitePanelFeedRepository {
    fn insert(&self, record: &NewPanelRecord) -> FeederResult<String> {
        let payload = serde_json::to_string(&record.payload)?;

        let mut conn = self.storage.connection()?;
        let tx = conn.transaction()?;

        let inserted = tx.query_row(
            "INSERT INTO panel_feed (panel_name, source_feed, payload, collected_at) VALUES (?1, ?2, ?3, ?4) RETURNING id",
            (
                &record.panel_name,
                &record.source_feed,
                &payload,
                record.collected_at.naive_utc(),
            ),
            |row| row.get::<_, i64>(0),
        );

        match inserted {
            Ok(id) => {
                tx.commit()?;
                Ok(id.to_string())
            }
            Err(e) => {
                tx.rollback().ok();
                Err(e.into())
            }
        }
    }

    fn delete_collected_before(&self, cutoff: DateTime<Utc>) -> FeederResult<u64> {
        let mut conn = self.storage.connection()?;
        let tx = conn.transaction()?;

        match tx.execute(
            "DELETE FROM panel_feed WHERE collected_at < ?1",
            [cutoff.naive_utc()],
        ) {
            Ok(deleted) => {
                tx.commit()?;
                Ok(deleted as u64)
            }
            Err(e) => {
                tx.rollback().ok();
                Err(e.into())
            }
        }
    }
}
