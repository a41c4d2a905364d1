pub mod catalog;
pub mod media;
pub mod stream;

pub use catalog::CatalogVideo;
pub use media::{CachePolicy, FileType, MediaFormat};
pub use stream::StreamName;
