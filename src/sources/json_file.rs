use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::domain::FeedItem;
use crate::errors::{FeederError, FeederResult};
use crate::sources::traits::FeedSource;

/// Reads a batch of items from a local JSON array file.
///
/// Useful for dry runs against a local database and for replaying a
/// captured batch.
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

impl FeedSource for JsonFileSource {
    fn fetch(&self, limit: usize) -> FeederResult<Vec<FeedItem>> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| FeederError::Fetch(format!("{}: {}", self.name, e)))?;

        let items = match serde_json::from_str::<Value>(&content)? {
            Value::Array(items) => items,
            _ => {
                return Err(FeederError::Fetch(format!(
                    "{}: expected a JSON array of items",
                    self.name
                )))
            }
        };

        Ok(items.into_iter().take(limit).map(FeedItem::new).collect())
    }
}
