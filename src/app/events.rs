//! Messages flowing into the list session.
//!
//! Views talk to the session only through these messages: user input arrives
//! as [`ListCommand`]s, detail views report changes through an
//! [`UpdateNotifier`], and background work (page fetches, debounce timers)
//! posts its results back as [`ListEvent`]s.

use tokio::sync::mpsc;

use crate::domain::{FeedPage, Post};
use crate::services::FeedError;

use super::state::SearchTicket;

/// User input for the post list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListCommand {
    /// Load the next feed page.
    LoadNextPage,
    /// Switch between the feed and the saved list.
    ToggleSaved,
    /// The search input changed.
    SearchChanged(String),
    /// The search input was cancelled.
    SearchCancelled,
    /// The list scrolled.
    Scrolled {
        offset: f32,
        content_height: f32,
        viewport_height: f32,
    },
    /// A row was selected for the detail view.
    SelectRow(usize),
    /// Stop the session.
    Shutdown,
}

/// Everything the session loop reacts to.
#[derive(Debug)]
pub enum ListEvent {
    /// Input from the list view.
    Command(ListCommand),
    /// A detail view changed a post's saved state.
    DetailUpdated(Post),
    /// A feed fetch finished.
    PageLoaded(Result<FeedPage, FeedError>),
    /// A debounce timer fired.
    SearchDebounced(SearchTicket),
}

impl From<ListCommand> for ListEvent {
    fn from(command: ListCommand) -> Self {
        ListEvent::Command(command)
    }
}

/// A post handed to the detail view, with the channel to report changes on.
#[derive(Debug)]
pub struct DetailRequest {
    /// The selected post.
    pub post: Post,
    /// Where to report save/unsave.
    pub notifier: UpdateNotifier,
}

/// Lets a detail view tell the list that a post's saved state changed.
#[derive(Debug, Clone)]
pub struct UpdateNotifier {
    tx: mpsc::UnboundedSender<ListEvent>,
}

impl UpdateNotifier {
    pub(crate) fn new(tx: mpsc::UnboundedSender<ListEvent>) -> Self {
        Self { tx }
    }

    /// Reports a changed post. Returns `false` if the list is gone.
    pub fn post_updated(&self, post: Post) -> bool {
        self.tx.send(ListEvent::DetailUpdated(post)).is_ok()
    }
}
