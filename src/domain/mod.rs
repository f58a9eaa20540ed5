pub mod feed_item;
pub mod payload;
pub mod record;
pub mod response;

pub use feed_item::FeedItem;
pub use payload::Payload;
pub use record::NewPanelRecord;
pub use response::{InvocationResponse, NO_DATA_MESSAGE};
