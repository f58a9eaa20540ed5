use crate::domain::FeedItem;
use crate::errors::FeederResult;
use crate::sources::traits::FeedSource;

/// Stand-in for a feed integration that has not been written yet.
///
/// Always returns an empty batch, which the processor reports as
/// "No new data available" without touching the database.
pub struct PlaceholderSource {
    source_feed: String,
}

impl PlaceholderSource {
    pub fn new(source_feed: impl Into<String>) -> Self {
        Self {
            source_feed: source_feed.into(),
        }
    }
}

impl FeedSource for PlaceholderSource {
    fn fetch(&self, limit: usize) -> FeederResult<Vec<FeedItem>> {
        tracing::debug!(
            source = %self.source_feed,
            limit,
            "No feed integration configured, returning empty batch"
        );
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_no_items() {
        let source = PlaceholderSource::new("rss_feed");
        assert!(source.fetch(100).unwrap().is_empty());
    }
}
