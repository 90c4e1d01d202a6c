//! Post list view.
//!
//! Displays a virtualized list of posts for the current view mode and
//! reports scroll positions back to the list session.

use std::ops::Range;

use chrono::{DateTime, Utc};

use crate::app::{ListCommand, ListSnapshot, ViewMode};
use crate::domain::Thumbnail;
use crate::ui::components::ListViewport;

use super::post_row::{PostRow, ROW_HEIGHT};

const FOCUS_MARKER: &str = "▌ ";
const NO_MARKER: &str = "  ";

/// Scroll and focus state of the post list.
#[derive(Debug, Clone)]
pub struct PostList {
    viewport: ListViewport,
    focused_index: usize,
    mode: ViewMode,
    width: usize,
}

impl PostList {
    /// Creates a list showing `viewport_rows` lines of `width` columns.
    pub fn new(viewport_rows: usize, width: usize) -> Self {
        Self {
            viewport: ListViewport::new(0)
                .with_item_height(ROW_HEIGHT as f32)
                .with_viewport_height(viewport_rows as f32),
            focused_index: 0,
            mode: ViewMode::Feed,
            width,
        }
    }

    /// Adopts a new snapshot: resets position on mode change, clamps focus otherwise.
    pub fn sync(&mut self, snapshot: &ListSnapshot) {
        if snapshot.mode != self.mode {
            self.mode = snapshot.mode;
            self.focused_index = 0;
            self.viewport.scroll_offset = 0.0;
        }
        self.viewport.set_item_count(snapshot.posts.len());
        if self.focused_index >= snapshot.posts.len() {
            self.focused_index = snapshot.posts.len().saturating_sub(1);
        }
    }

    /// Index of the focused row, if the list is not empty.
    pub fn focused_index(&self) -> Option<usize> {
        (self.viewport.item_count > 0).then_some(self.focused_index)
    }

    /// Moves focus down one row. Returns whether it moved.
    pub fn focus_next(&mut self) -> bool {
        if self.focused_index + 1 >= self.viewport.item_count {
            return false;
        }
        self.focused_index += 1;
        self.viewport.scroll_to_item(self.focused_index);
        true
    }

    /// Moves focus up one row. Returns whether it moved.
    pub fn focus_previous(&mut self) -> bool {
        if self.focused_index == 0 {
            return false;
        }
        self.focused_index -= 1;
        self.viewport.scroll_to_item(self.focused_index);
        true
    }

    /// The current scroll position as a session command.
    pub fn scroll_command(&self) -> ListCommand {
        ListCommand::Scrolled {
            offset: self.viewport.scroll_offset,
            content_height: self.viewport.total_height(),
            viewport_height: self.viewport.viewport_height,
        }
    }

    /// Rows that need rendering.
    pub fn visible_range(&self) -> Range<usize> {
        self.viewport.visible_range()
    }

    /// Renders the header, visible rows and footer.
    pub fn render(
        &self,
        snapshot: &ListSnapshot,
        source: &str,
        thumbnail: impl Fn(&str) -> Option<Thumbnail>,
        now: DateTime<Utc>,
    ) -> String {
        let mut out = Vec::new();
        out.push(header(snapshot, source));
        if let Some(search) = &snapshot.search {
            out.push(format!("Search: {search}▏"));
        }
        if let Some(error) = &snapshot.error {
            out.push(format!("! {error}"));
        }
        out.push("─".repeat(self.width));

        if snapshot.posts.is_empty() {
            out.push(empty_state(snapshot).to_string());
        }

        let row_width = self.width.saturating_sub(FOCUS_MARKER.chars().count());
        for index in self.visible_range() {
            let Some(post) = snapshot.posts.get(index) else {
                break;
            };
            let thumb = post.image_url.as_deref().and_then(&thumbnail);
            let row = PostRow::build(post, thumb.as_ref(), row_width, now);
            let marker = if index == self.focused_index {
                FOCUS_MARKER
            } else {
                NO_MARKER
            };
            for line in row.lines() {
                out.push(format!("{marker}{line}"));
            }
            out.push(String::new());
        }

        if let Some(footer) = footer(snapshot) {
            out.push(footer.to_string());
        }
        out.join("\n")
    }
}

fn header(snapshot: &ListSnapshot, source: &str) -> String {
    let noun = if snapshot.posts.len() == 1 { "post" } else { "posts" };
    let mut header = format!(
        "/r/{source} · {} · {} {noun}",
        snapshot.mode.title(),
        snapshot.posts.len()
    );
    if snapshot.loading && snapshot.mode == ViewMode::Feed {
        header.push_str(" · loading…");
    }
    header
}

fn empty_state(snapshot: &ListSnapshot) -> &'static str {
    match snapshot.mode {
        ViewMode::Feed if snapshot.loading => "Loading...",
        ViewMode::Feed => "No posts",
        ViewMode::Saved if snapshot.search.as_deref().is_some_and(|s| !s.is_empty()) => {
            "No saved posts match"
        }
        ViewMode::Saved => "No saved posts yet",
    }
}

fn footer(snapshot: &ListSnapshot) -> Option<&'static str> {
    match snapshot.mode {
        ViewMode::Feed if snapshot.exhausted && !snapshot.posts.is_empty() => {
            Some("· end of feed ·")
        }
        _ => None,
    }
}
