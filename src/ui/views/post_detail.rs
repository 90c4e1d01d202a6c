//! Post detail view.
//!
//! Shows one post in full and lets the user save or unsave it. Changes are
//! written to the saved store first, then reported to the list.

use chrono::{DateTime, Utc};

use crate::app::{DetailRequest, UpdateNotifier};
use crate::domain::Post;
use crate::services::{SavedPostStore, StoreError};
use crate::ui::components::wrap_clamped;

use super::post_row::relative_time;

const BODY_MAX_LINES: usize = 200;

/// Detail view for a single post.
#[derive(Debug)]
pub struct PostDetail {
    post: Post,
    saved: bool,
    notifier: UpdateNotifier,
}

impl PostDetail {
    /// Opens the detail view, reading the post's saved state from `store`.
    pub fn open(request: DetailRequest, store: &dyn SavedPostStore) -> Result<Self, StoreError> {
        let saved = store.is_saved(&request.post.id)?;
        Ok(Self {
            post: request.post,
            saved,
            notifier: request.notifier,
        })
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Saves or unsaves the post and tells the list. Returns the new saved state.
    pub fn toggle_saved(&mut self, store: &dyn SavedPostStore) -> Result<bool, StoreError> {
        if self.saved {
            store.unsave(&self.post.id)?;
        } else {
            store.save(&self.post)?;
        }
        self.saved = !self.saved;
        tracing::info!(post = %self.post.id, saved = self.saved, "Saved state changed");

        if !self.notifier.post_updated(self.post.clone()) {
            tracing::debug!("List closed before the update arrived");
        }
        Ok(self.saved)
    }

    /// Renders the post at `width` columns.
    pub fn render(&self, width: usize, now: DateTime<Utc>) -> String {
        let mut out = wrap_clamped(&self.post.title, width, usize::MAX);
        out.push(format!(
            "by {} · {}{}",
            self.post.author,
            relative_time(self.post.created_at, now),
            if self.saved { " · ★ saved" } else { "" }
        ));
        if let Some(link) = &self.post.permalink {
            out.push(link.clone());
        }
        if let Some(image) = &self.post.image_url {
            out.push(format!("image: {image}"));
        }
        out.push("─".repeat(width));

        // keep paragraph breaks, wrap each paragraph on its own
        for paragraph in self.post.body.split("\n\n") {
            let lines = wrap_clamped(paragraph, width, BODY_MAX_LINES);
            if lines.is_empty() {
                continue;
            }
            out.extend(lines);
            out.push(String::new());
        }
        out.join("\n").trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ListEvent;
    use crate::domain::PostId;
    use crate::services::{MockSavedPostStore, SqliteSavedStore};
    use tokio::sync::mpsc;

    fn post() -> Post {
        Post {
            id: PostId::from("t3_detail"),
            title: "Xcode 16 tips".to_string(),
            author: "swiftie".to_string(),
            body: "First paragraph.\n\nSecond paragraph.".to_string(),
            created_at: Utc::now(),
            image_url: None,
            permalink: Some("https://www.reddit.com/r/ios/comments/detail/".to_string()),
        }
    }

    fn request() -> (DetailRequest, mpsc::UnboundedReceiver<ListEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let request = DetailRequest {
            post: post(),
            notifier: UpdateNotifier::new(tx),
        };
        (request, rx)
    }

    #[test]
    fn toggle_saves_then_unsaves_and_notifies() {
        let store = SqliteSavedStore::open_in_memory().unwrap();
        let (request, mut rx) = request();
        let mut detail = PostDetail::open(request, &store).unwrap();
        assert!(!detail.is_saved());

        assert!(detail.toggle_saved(&store).unwrap());
        assert!(store.is_saved(&post().id).unwrap());
        assert!(matches!(rx.try_recv(), Ok(ListEvent::DetailUpdated(p)) if p.id == post().id));

        assert!(!detail.toggle_saved(&store).unwrap());
        assert!(!store.is_saved(&post().id).unwrap());
        assert!(matches!(rx.try_recv(), Ok(ListEvent::DetailUpdated(_))));
    }

    #[test]
    fn opening_reads_saved_state() {
        let store = SqliteSavedStore::open_in_memory().unwrap();
        store.save(&post()).unwrap();
        let (request, _rx) = request();

        let detail = PostDetail::open(request, &store).unwrap();
        assert!(detail.is_saved());
        assert_eq!(detail.post().title, "Xcode 16 tips");
    }

    #[test]
    fn failed_save_does_not_notify() {
        let mut store = MockSavedPostStore::new();
        store.expect_is_saved().returning(|_| Ok(false));
        store.expect_save().returning(|_| Err(StoreError::Unavailable));
        let (request, mut rx) = request();

        let mut detail = PostDetail::open(request, &store).unwrap();
        assert!(detail.toggle_saved(&store).is_err());
        assert!(!detail.is_saved());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_list_still_saves() {
        let store = SqliteSavedStore::open_in_memory().unwrap();
        let (request, rx) = request();
        drop(rx);

        let mut detail = PostDetail::open(request, &store).unwrap();
        assert!(detail.toggle_saved(&store).unwrap());
        assert!(store.is_saved(&post().id).unwrap());
    }

    #[test]
    fn render_shows_paragraphs_and_saved_marker() {
        let store = SqliteSavedStore::open_in_memory().unwrap();
        store.save(&post()).unwrap();
        let (request, _rx) = request();
        let detail = PostDetail::open(request, &store).unwrap();

        let text = detail.render(40, Utc::now());
        assert!(text.starts_with("Xcode 16 tips\nby swiftie · just now · ★ saved"));
        assert!(text.contains("First paragraph.\n\nSecond paragraph."));
    }
}
