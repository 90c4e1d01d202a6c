//! In-memory cache for post thumbnails.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use bytes::Bytes;
use futures::future::join_all;
use lru::LruCache;

use crate::config::FeedConfig;
use crate::domain::Thumbnail;
use crate::services::FeedError;

/// Bounded LRU of downloaded thumbnails keyed by URL.
pub struct ThumbnailCache {
    http: reqwest::Client,
    entries: Mutex<LruCache<String, Bytes>>,
}

impl ThumbnailCache {
    /// Creates a cache sized from the configuration.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(http, config.thumbnail_cache_entries))
    }

    /// Creates a cache around an existing HTTP client.
    pub fn with_client(http: reqwest::Client, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            http,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns a cached thumbnail without touching the network.
    pub fn get(&self, url: &str) -> Option<Thumbnail> {
        let mut entries = self.entries.lock().ok()?;
        entries.get(url).map(|data| Thumbnail {
            url: url.to_string(),
            data: data.clone(),
        })
    }

    fn insert(&self, url: &str, data: Bytes) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(url.to_string(), data);
        }
    }

    /// Returns the thumbnail at `url`, downloading it on a cache miss.
    pub async fn fetch(&self, url: &str) -> Result<Thumbnail, FeedError> {
        if let Some(hit) = self.get(url) {
            return Ok(hit);
        }

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let data = response.bytes().await?;
        self.insert(url, data.clone());
        Ok(Thumbnail {
            url: url.to_string(),
            data,
        })
    }

    /// Downloads every uncached URL concurrently. Returns the URLs that were added.
    ///
    /// Failures are logged and skipped; rows without a thumbnail show a placeholder.
    pub async fn prefetch<I>(&self, urls: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let missing: Vec<String> = urls
            .into_iter()
            .filter(|url| self.get(url).is_none())
            .collect();
        if missing.is_empty() {
            return Vec::new();
        }

        let results = join_all(missing.iter().map(|url| self.fetch(url))).await;
        let mut added = Vec::new();
        for (url, result) in missing.into_iter().zip(results) {
            match result {
                Ok(_) => added.push(url),
                Err(err) => tracing::debug!(%url, error = %err, "Thumbnail download failed"),
            }
        }
        added
    }
}
