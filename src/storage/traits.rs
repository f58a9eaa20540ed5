use chrono::{DateTime, Utc};

use crate::domain::NewPanelRecord;
use crate::errors::FeederResult;

#[cfg_attr(test, mockall::automock)]
pub trait PanelFeedRepository: Send + Sync {
    /// Insert one record in its own transaction and return the generated id.
    /// Nothing is written when this fails.
    fn insert(&self, record: &NewPanelRecord) -> FeederResult<String>;

    /// Delete every record collected strictly before `cutoff`.
    fn delete_collected_before(&self, cutoff: DateTime<Utc>) -> FeederResult<u64>;
}

impl PanelFeedRepository for Box<dyn PanelFeedRepository> {
    fn insert(&self, record: &NewPanelRecord) -> FeederResult<String> {
        self.as_ref().insert(record)
    }

    fn delete_collected_before(&self, cutoff: DateTime<Utc>) -> FeederResult<u64> {
        self.as_ref().delete_collected_before(cutoff)
    }
}
