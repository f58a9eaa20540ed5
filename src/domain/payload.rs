use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::FeedItem;

/// Batch wrapper persisted as the `payload` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    items: Vec<FeedItem>,
    items_count: usize,
    fetched_at: DateTime<Utc>,
}

impl Payload {
    pub fn new(items: Vec<FeedItem>, fetched_at: DateTime<Utc>) -> Self {
        let items_count = items.len();
        Self {
            items,
            items_count,
            fetched_at,
        }
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn items_count(&self) -> usize {
        self.items_count
    }
}
