use crate::domain::FeedItem;
use crate::errors::FeederResult;

#[cfg_attr(test, mockall::automock)]
pub trait FeedSource: Send + Sync {
    /// Fetch up to `limit` items from the feed
    fn fetch(&self, limit: usize) -> FeederResult<Vec<FeedItem>>;
}

impl FeedSource for Box<dyn FeedSource> {
    fn fetch(&self, limit: usize) -> FeederResult<Vec<FeedItem>> {
        self.as_ref().fetch(limit)
    }
}
