//! Background thumbnail downloads for the rows on screen.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::services::ThumbnailCache;

/// Starts thumbnail downloads and remembers what was already tried.
///
/// A URL is downloaded at most once while in flight. Failed URLs stay
/// recorded and are never retried; their rows keep the placeholder. Loaded
/// URLs are forgotten so they can be fetched again after cache eviction.
pub struct ThumbnailRequests {
    cache: Arc<ThumbnailCache>,
    attempted: HashSet<String>,
    loaded: mpsc::UnboundedSender<Vec<String>>,
}

impl ThumbnailRequests {
    /// Creates the tracker plus the stream of finished batches (loaded URLs only).
    pub fn new(cache: Arc<ThumbnailCache>) -> (Self, mpsc::UnboundedReceiver<Vec<String>>) {
        let (loaded, rx) = mpsc::unbounded_channel();
        let requests = Self {
            cache,
            attempted: HashSet::new(),
            loaded,
        };
        (requests, rx)
    }

    /// Starts downloading the URLs that are neither cached nor already tried.
    /// Returns how many downloads were started.
    pub fn request(&mut self, urls: impl IntoIterator<Item = String>) -> usize {
        let urls: Vec<String> = urls
            .into_iter()
            .filter(|url| self.cache.get(url).is_none() && self.attempted.insert(url.clone()))
            .collect();
        if urls.is_empty() {
            return 0;
        }

        let started = urls.len();
        let cache = Arc::clone(&self.cache);
        let loaded = self.loaded.clone();
        tokio::spawn(async move {
            let done = cache.prefetch(urls).await;
            let _ = loaded.send(done);
        });
        started
    }

    /// Records a finished batch.
    pub fn finished(&mut self, loaded: Vec<String>) {
        for url in loaded {
            self.attempted.remove(&url);
        }
    }
}
