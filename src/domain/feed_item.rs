use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One unit of feed content.
///
/// The shape belongs to whichever source produced it, so it is carried as
/// raw JSON and stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedItem(Value);

impl FeedItem {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_as_inner_value() {
        let item = FeedItem::new(json!({"title": "CVE-2024-3094", "severity": "critical"}));
        let encoded = serde_json::to_value(&item).unwrap();
        assert_eq!(encoded, json!({"title": "CVE-2024-3094", "severity": "critical"}));
    }

    #[test]
    fn test_scalar_items_are_allowed() {
        let item: FeedItem = serde_json::from_str("\"plain text headline\"").unwrap();
        assert_eq!(item.as_value(), &json!("plain text headline"));
    }
}
