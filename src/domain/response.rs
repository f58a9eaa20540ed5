use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const NO_DATA_MESSAGE: &str = "No new data available";

/// HTTP-style result of one invocation.
///
/// `body` is itself a JSON document encoded as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn no_data(panel_name: &str) -> Self {
        Self {
            status_code: 200,
            body: json!({
                "panel_name": panel_name,
                "items_stored": 0,
                "status": "success",
                "message": NO_DATA_MESSAGE,
            })
            .to_string(),
        }
    }

    pub fn stored(panel_name: &str, items_stored: usize, timestamp: DateTime<Utc>) -> Self {
        Self {
            status_code: 200,
            body: json!({
                "panel_name": panel_name,
                "items_stored": items_stored,
                "status": "success",
                "timestamp": timestamp.to_rfc3339(),
            })
            .to_string(),
        }
    }

    pub fn failed(panel_name: &str, error: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            status_code: 500,
            body: json!({
                "panel_name": panel_name,
                "error": error,
                "status": "failed",
                "timestamp": timestamp.to_rfc3339(),
            })
            .to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// Decode `body` back into JSON
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}
