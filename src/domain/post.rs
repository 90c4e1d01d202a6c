//! Posts, feed pages and pagination cursors.

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier of a post as assigned by the feed (e.g. `t3_1abcde`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single feed post. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Feed-assigned identity.
    pub id: PostId,
    /// Post title.
    pub title: String,
    /// Author handle, without any `u/` prefix.
    pub author: String,
    /// Self text. Empty for link posts.
    pub body: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Thumbnail image location, if the feed provided a usable one.
    pub image_url: Option<String>,
    /// Link back to the post on the feed's site.
    pub permalink: Option<String>,
}

impl Post {
    /// Case-insensitive substring match against the title.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn title_contains(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
    }
}

/// One page of feed results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedPage {
    /// Posts in feed order.
    pub posts: Vec<Post>,
    /// Continuation token for the next page. `None` means the feed is exhausted.
    pub next_cursor: Option<String>,
}

/// Where the next page load starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageCursor {
    /// Nothing fetched yet; the first request carries no cursor.
    #[default]
    Start,
    /// Continue after the given token.
    After(String),
    /// The feed reported no further pages.
    Exhausted,
}

impl PageCursor {
    /// The cursor to send with the next request, if any.
    pub fn as_param(&self) -> Option<&str> {
        match self {
            PageCursor::After(token) => Some(token),
            PageCursor::Start | PageCursor::Exhausted => None,
        }
    }

    /// Whether further page loads are pointless.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, PageCursor::Exhausted)
    }

    /// The cursor that follows a page carrying `next`.
    pub fn advance(next: Option<String>) -> Self {
        match next {
            Some(token) if !token.is_empty() => PageCursor::After(token),
            _ => PageCursor::Exhausted,
        }
    }
}

/// Downloaded thumbnail bytes for a post image.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    /// Source URL.
    pub url: String,
    /// Raw encoded image data.
    pub data: Bytes,
}

impl Thumbnail {
    /// Size of the encoded image in KiB, rounded up.
    pub fn size_kib(&self) -> usize {
        self.data.len().div_ceil(1024)
    }
}
