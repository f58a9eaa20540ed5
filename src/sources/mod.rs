pub mod traits;
pub mod placeholder;
pub mod json_file;

pub use traits::FeedSource;
pub use placeholder::PlaceholderSource;
pub use json_file::JsonFileSource;
