use chrono::{DateTime, Utc};

use crate::domain::Payload;

/// A `panel_feed` row before the database assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPanelRecord {
    pub panel_name: String,
    pub source_feed: String,
    pub payload: Payload,
    pub collected_at: DateTime<Utc>,
}

impl NewPanelRecord {
    pub fn new(
        panel_name: String,
        source_feed: String,
        payload: Payload,
        collected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            panel_name,
            source_feed,
            payload,
            collected_at,
        }
    }
}
