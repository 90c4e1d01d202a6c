//! External collaborators of the post list.
//!
//! - [`FeedClient`]: paged remote feed ([`RedditClient`] over HTTP)
//! - [`SavedPostStore`]: local bookmarks ([`SqliteSavedStore`])
//! - [`ThumbnailCache`]: bounded in-memory cache of post thumbnails

mod feed_client;
mod saved_store;
mod thumbnail_cache;

pub use feed_client::{parse_listing, FeedClient, FeedError, PageRequest, RedditClient};
pub use saved_store::{SavedPostStore, SqliteSavedStore, StoreError};
pub use thumbnail_cache::ThumbnailCache;

#[cfg(test)]
pub use feed_client::MockFeedClient;
#[cfg(test)]
pub use saved_store::MockSavedPostStore;
