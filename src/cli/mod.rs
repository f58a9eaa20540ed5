mod commands;

pub use commands::{parse_event, Cli, Commands};
