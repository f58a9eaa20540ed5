mod connection;
mod panel_feed_repository;
mod tls;

pub use connection::PostgresStorage;
pub use panel_feed_repository::PostgresPanelFeedRepository;
