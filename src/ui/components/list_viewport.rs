//! Virtualized list geometry.
//!
//! Tracks which fixed-height items fall inside a scrolling viewport so only
//! those rows are rendered. Units are whatever the view uses (terminal rows
//! for the line-mode front end).

use std::ops::Range;

/// Scroll state of a list of equally sized items.
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewport {
    /// Number of items in the list.
    pub item_count: usize,
    /// Height of a single item.
    pub item_height: f32,
    /// Height of the visible area.
    pub viewport_height: f32,
    /// Distance scrolled from the top.
    pub scroll_offset: f32,
}

impl ListViewport {
    /// Creates a viewport over `item_count` items scrolled to the top.
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            item_height: 1.0,
            viewport_height: 0.0,
            scroll_offset: 0.0,
        }
    }

    pub fn with_item_height(mut self, height: f32) -> Self {
        self.item_height = height;
        self
    }

    pub fn with_viewport_height(mut self, height: f32) -> Self {
        self.viewport_height = height;
        self
    }

    /// Updates the item count, keeping the scroll offset in range.
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Height of all items together.
    pub fn total_height(&self) -> f32 {
        self.item_count as f32 * self.item_height
    }

    /// Top edge of the item at `index`.
    pub fn item_offset(&self, index: usize) -> f32 {
        index as f32 * self.item_height
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> f32 {
        (self.total_height() - self.viewport_height).max(0.0)
    }

    /// Scrolls the minimum amount needed to show the item at `index`.
    pub fn scroll_to_item(&mut self, index: usize) {
        let top = self.item_offset(index);
        let bottom = top + self.item_height;
        if top < self.scroll_offset {
            self.scroll_offset = top;
        } else if bottom > self.scroll_offset + self.viewport_height {
            self.scroll_offset = (bottom - self.viewport_height).max(0.0);
        }
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Items at least partly visible.
    pub fn visible_range(&self) -> Range<usize> {
        if self.item_count == 0 || self.item_height <= 0.0 {
            return 0..0;
        }
        let first = (self.scroll_offset / self.item_height).floor() as usize;
        let last = ((self.scroll_offset + self.viewport_height) / self.item_height).ceil() as usize;

        let end = last.min(self.item_count);
        first.min(end)..end
    }
}
