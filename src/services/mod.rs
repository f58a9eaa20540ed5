pub mod feed_processor;
pub mod store_writer;
pub mod retention_pruner;

pub use feed_processor::{FeedProcessor, ProcessOutcome};
pub use store_writer::StoreWriter;
pub use retention_pruner::{CleanupReport, RetentionPruner, RETENTION_DAYS};
