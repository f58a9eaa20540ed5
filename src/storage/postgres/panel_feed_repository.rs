use chrono::{DateTime, Utc};
use postgres::types::Json;

use crate::domain::NewPanelRecord;
use crate::errors::FeederResult;
use crate::storage::postgres::PostgresStorage;
use crate::storage::traits::PanelFeedRepository;

// The id column type belongs to the dashboard schema, so it is read back as text.
const INSERT_SQL: &str = "
    INSERT INTO dashboard.panel_feed
    (panel_name, source_feed, payload, collected_at)
    VALUES ($1, $2, $3, $4)
    RETURNING id::text
";

const DELETE_SQL: &str = "
    DELETE FROM dashboard.panel_feed
    WHERE collected_at < $1
";

pub struct PostgresPanelFeedRepository {
    storage: PostgresStorage,
}

impl PostgresPanelFeedRepository {
    pub fn new(storage: PostgresStorage) -> Self {
        Self { storage }
    }
}

impl PanelFeedRepository for PostgresPanelFeedRepository {
    fn insert(&self, record: &NewPanelRecord) -> FeederResult<String> {
        let mut client = self.storage.connect()?;
        let mut tx = client.transaction()?;

        let inserted = tx.query_one(
            INSERT_SQL,
            &[
                &record.panel_name,
                &record.source_feed,
                &Json(&record.payload),
                &record.collected_at.naive_utc(),
            ],
        );

        match inserted {
            Ok(row) => {
                let id: String = row.try_get(0)?;
                tx.commit()?;
                Ok(id)
            }
            Err(e) => {
                tx.rollback().ok();
                Err(e.into())
            }
        }
    }

    fn delete_collected_before(&self, cutoff: DateTime<Utc>) -> FeederResult<u64> {
        let mut client = self.storage.connect()?;
        let mut tx = client.transaction()?;

        match tx.execute(DELETE_SQL, &[&cutoff.naive_utc()]) {
            Ok(deleted) => {
                tx.commit()?;
                Ok(deleted)
            }
            Err(e) => {
                tx.rollback().ok();
                Err(e.into())
            }
        }
    }
}
