mod connection;
mod panel_feed_repository;

pub use connection::SqliteStorage;
pub use panel_feed_repository::SqlitePanelFeedRepository;
