//! Music catalog search and resolution

pub mod resolver;
pub mod search;
pub mod ytmusic;

pub use resolver::CatalogResolver;
pub use search::{SearchResult, SongSearch};
pub use ytmusic::YtMusicClient;
