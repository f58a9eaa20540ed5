pub mod traits;
pub mod retry;
pub mod sqlite;
pub mod postgres;

pub use traits::PanelFeedRepository;
pub use retry::RetryPolicy;
pub use self::sqlite::{SqliteStorage, SqlitePanelFeedRepository};
pub use self::postgres::{PostgresStorage, PostgresPanelFeedRepository};
