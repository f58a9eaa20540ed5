use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "panel-feeder")]
#[command(about = "Collect a threat-intelligence feed into a dashboard panel table")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one fetch, store and cleanup pass and print the invocation result
    Run {
        /// Trigger event as JSON (passed through, not interpreted)
        #[arg(long, env = "PANEL_FEEDER_EVENT")]
        event: Option<String>,
    },

    /// Delete records older than the retention window
    Prune,
}

/// Decode the trigger event. Input that is not JSON is kept as a string,
/// since the event is only passed through.
pub fn parse_event(raw: Option<&str>) -> Value {
    match raw {
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
        None => Value::Null,
    }
}
