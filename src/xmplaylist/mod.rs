//! xmplaylist.com metadata API and its local cache

pub mod cache;
pub mod client;
pub mod models;

pub use cache::JsonCache;
pub use client::{PlaylistSource, XmPlaylistClient};
