//! Main window.
//!
//! Composes the post list and the detail view into one screen, maps
//! [`Action`]s onto them and turns list input into session commands.

use chrono::{DateTime, Utc};

use crate::app::{Action, DetailRequest, ListCommand, ListSnapshot, ViewMode, KEY_HELP};
use crate::config::FeedConfig;
use crate::domain::Thumbnail;
use crate::services::SavedPostStore;

use super::{PostDetail, PostList};

/// What the caller should do after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Redraw and keep going.
    Continue,
    /// Forward the command to the list session.
    Send(ListCommand),
    /// Leave the application.
    Quit,
}

/// Top-level screen state.
#[derive(Debug)]
pub struct MainWindow {
    list: PostList,
    detail: Option<PostDetail>,
    snapshot: ListSnapshot,
    source: String,
    width: usize,
    toast: Option<String>,
    show_help: bool,
}

impl MainWindow {
    pub fn new(config: &FeedConfig, snapshot: ListSnapshot) -> Self {
        let mut list = PostList::new(config.viewport_rows, config.wrap_width);
        list.sync(&snapshot);
        Self {
            list,
            detail: None,
            snapshot,
            source: config.source.clone(),
            width: config.wrap_width,
            toast: None,
            show_help: false,
        }
    }

    pub fn snapshot(&self) -> &ListSnapshot {
        &self.snapshot
    }

    pub fn detail(&self) -> Option<&PostDetail> {
        self.detail.as_ref()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.list.focused_index()
    }

    /// Shows a one-off message under the current view.
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(message.into());
    }

    /// Adopts the latest list snapshot.
    pub fn set_snapshot(&mut self, snapshot: ListSnapshot) {
        self.list.sync(&snapshot);
        self.snapshot = snapshot;
    }

    /// Shows the post from a session detail request.
    pub fn open_detail(&mut self, request: DetailRequest, store: &dyn SavedPostStore) {
        match PostDetail::open(request, store) {
            Ok(detail) => self.detail = Some(detail),
            Err(err) => {
                tracing::warn!(error = %err, "Could not open post");
                self.toast = Some(format!("Could not open post: {err}"));
            }
        }
    }

    /// Image URLs of rows currently on screen.
    pub fn visible_image_urls(&self) -> Vec<String> {
        self.list
            .visible_range()
            .filter_map(|i| self.snapshot.posts.get(i))
            .filter_map(|post| post.image_url.clone())
            .collect()
    }

    /// Applies a user action.
    pub fn handle_action(&mut self, action: Action, store: &dyn SavedPostStore) -> Flow {
        self.toast = None;
        if action == Action::Help {
            self.show_help = !self.show_help;
            return Flow::Continue;
        }
        if self.detail.is_some() {
            self.handle_detail_action(action, store);
            return Flow::Continue;
        }

        match action {
            Action::Quit => Flow::Quit,
            Action::NextPost => {
                self.list.focus_next();
                Flow::Send(self.list.scroll_command())
            }
            Action::PreviousPost => {
                self.list.focus_previous();
                Flow::Send(self.list.scroll_command())
            }
            Action::OpenPost => match self.list.focused_index() {
                Some(index) => Flow::Send(ListCommand::SelectRow(index)),
                None => Flow::Continue,
            },
            Action::ToggleSavedView => Flow::Send(ListCommand::ToggleSaved),
            Action::LoadMore => Flow::Send(ListCommand::LoadNextPage),
            Action::Search(text) if self.snapshot.mode == ViewMode::Saved => {
                Flow::Send(ListCommand::SearchChanged(text))
            }
            Action::CancelSearch if self.snapshot.mode == ViewMode::Saved => {
                Flow::Send(ListCommand::SearchCancelled)
            }
            Action::Search(_) | Action::CancelSearch => {
                self.toast = Some("Search works in the saved view (press b)".to_string());
                Flow::Continue
            }
            Action::ToggleSave => {
                self.toast = Some("Open a post to save it".to_string());
                Flow::Continue
            }
            Action::Help => Flow::Continue,
        }
    }

    fn handle_detail_action(&mut self, action: Action, store: &dyn SavedPostStore) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };
        match action {
            Action::Quit => self.detail = None,
            Action::ToggleSave => match detail.toggle_saved(store) {
                Ok(true) => self.toast = Some("Saved".to_string()),
                Ok(false) => self.toast = Some("Removed from saved".to_string()),
                Err(err) => {
                    tracing::warn!(error = %err, "Could not update saved posts");
                    self.toast = Some(format!("Could not update saved posts: {err}"));
                }
            },
            _ => self.toast = Some("Press q to go back".to_string()),
        }
    }

    /// Renders the whole screen.
    pub fn render(
        &self,
        thumbnail: impl Fn(&str) -> Option<Thumbnail>,
        now: DateTime<Utc>,
    ) -> String {
        let mut out = match &self.detail {
            Some(detail) => detail.render(self.width, now),
            None => self.list.render(&self.snapshot, &self.source, thumbnail, now),
        };
        out.push_str("\n\n");
        if let Some(toast) = &self.toast {
            out.push_str(toast);
            out.push('\n');
        }
        if self.show_help {
            for (key, description) in KEY_HELP {
                out.push_str(&format!("  {key:<8} {description}\n"));
            }
        } else if self.detail.is_some() {
            out.push_str("s save/unsave · q back · ? help\n");
        } else {
            out.push_str("j/k move · o open · b saved · /text search · q quit · ? help\n");
        }
        out
    }
}
