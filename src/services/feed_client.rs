//! Paged feed client.
//!
//! [`RedditClient`] reads subreddit listings:
//! `GET {base}/r/{source}/{sort}.json?limit={limit}&after={cursor}`.
//! The listing envelope is `{ "data": { "children": [{ "data": {..} }], "after": ".." } }`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::FeedConfig;
use crate::domain::{FeedPage, Post, PostId};

/// Errors from fetching or decoding a feed page.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Connection, TLS or timeout failure.
    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("feed returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    /// The body was not a listing.
    #[error("could not decode feed listing: {0}")]
    Decode(#[from] serde_json::Error),
    /// The configured base URL or a derived URL is invalid.
    #[error("invalid feed URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Parameters of one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Feed source (subreddit name).
    pub source: String,
    /// Maximum posts to return.
    pub limit: usize,
    /// Continuation cursor, `None` for the first page.
    pub cursor: Option<String>,
}

/// A remote source of paged posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Fetches one page of posts.
    async fn fetch_page(&self, request: PageRequest) -> Result<FeedPage, FeedError>;
}

/// HTTP client for Reddit listings.
pub struct RedditClient {
    http: reqwest::Client,
    base_url: Url,
    sort: String,
}

impl RedditClient {
    /// Builds a client from the feed configuration.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url(&config.api_base_url)?,
            sort: config.sort.clone(),
        })
    }

    /// Returns the listing URL for a request.
    pub fn listing_url(&self, request: &PageRequest) -> Result<Url, FeedError> {
        let mut url = self
            .base_url
            .join(&format!("r/{}/{}.json", request.source, self.sort))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &request.limit.to_string());
            query.append_pair("raw_json", "1");
            if let Some(cursor) = &request.cursor {
                query.append_pair("after", cursor);
            }
        }

        Ok(url)
    }
}

// `Url::join` replaces the last path segment unless the base ends in a slash.
fn base_url(raw: &str) -> Result<Url, FeedError> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl FeedClient for RedditClient {
    async fn fetch_page(&self, request: PageRequest) -> Result<FeedPage, FeedError> {
        let url = self.listing_url(&request)?;
        tracing::debug!(%url, "Fetching feed page");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        parse_listing(&body, &self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: RawPost,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    name: String,
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    permalink: Option<String>,
}

impl RawPost {
    fn into_post(self, base_url: &Url) -> Post {
        // Reddit uses sentinel words ("self", "default", "nsfw", ...) for missing thumbnails.
        let image_url = self
            .thumbnail
            .filter(|thumb| thumb.starts_with("http://") || thumb.starts_with("https://"));

        let permalink = self.permalink.and_then(|path| {
            base_url
                .join(path.trim_start_matches('/'))
                .ok()
                .map(String::from)
        });

        Post {
            id: PostId::from(self.name),
            title: self.title,
            author: self.author,
            body: self.selftext,
            created_at: DateTime::<Utc>::from_timestamp(self.created_utc as i64, 0)
                .unwrap_or_default(),
            image_url,
            permalink,
        }
    }
}

/// Decodes a listing body into a [`FeedPage`].
pub fn parse_listing(body: &[u8], base_url: &Url) -> Result<FeedPage, FeedError> {
    let listing: Listing = serde_json::from_slice(body)?;
    let posts = listing
        .data
        .children
        .into_iter()
        .map(|child| child.data.into_post(base_url))
        .collect();

    Ok(FeedPage {
        posts,
        next_cursor: listing.data.after,
    })
}
