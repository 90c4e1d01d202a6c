//! Single post row.
//!
//! A row is a fixed-size thumbnail slot (image or placeholder, rounded box)
//! beside the title (two lines at most), the author, a three-line body
//! preview and a relative timestamp. Building a row is a pure function of the
//! post, its thumbnail and the current time.

use chrono::{DateTime, Utc};

use crate::domain::{Post, Thumbnail};
use crate::ui::components::{fit_width, wrap_clamped};

/// Columns taken by the thumbnail slot, including its border.
pub const THUMBNAIL_WIDTH: usize = 10;
/// Lines taken by the thumbnail slot.
pub const THUMBNAIL_HEIGHT: usize = 3;
/// Maximum title lines.
pub const TITLE_MAX_LINES: usize = 2;
/// Maximum body preview lines.
pub const BODY_MAX_LINES: usize = 3;
/// Lines a row occupies in the list, including the blank separator.
pub const ROW_HEIGHT: usize = TITLE_MAX_LINES + 1 + BODY_MAX_LINES + 1 + 1;

const GUTTER: &str = " ";

/// What fills the thumbnail slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailSlot {
    /// A downloaded image of the given size.
    Image { kib: usize },
    /// No image available.
    Placeholder,
}

impl ThumbnailSlot {
    fn lines(&self) -> [String; THUMBNAIL_HEIGHT] {
        let inner = THUMBNAIL_WIDTH - 2;
        let label = match self {
            ThumbnailSlot::Image { kib } => format!("{kib} KiB"),
            ThumbnailSlot::Placeholder => "▨".to_string(),
        };
        let label_len = label.chars().count().min(inner);
        let left = (inner - label_len) / 2;
        let middle = format!(
            "│{}{}│",
            " ".repeat(left),
            fit_width(&label, inner - left)
        );
        [
            format!("╭{}╮", "─".repeat(inner)),
            middle,
            format!("╰{}╯", "─".repeat(inner)),
        ]
    }
}

/// A laid-out post row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    /// Thumbnail slot contents.
    pub thumbnail: ThumbnailSlot,
    /// Wrapped title, one or two lines.
    pub title: Vec<String>,
    /// Author line.
    pub author: String,
    /// Wrapped body preview, zero to three lines.
    pub body: Vec<String>,
    /// Relative timestamp.
    pub timestamp: String,
}

impl PostRow {
    /// Lays out `post` for a row that is `width` columns wide in total.
    pub fn build(
        post: &Post,
        thumbnail: Option<&Thumbnail>,
        width: usize,
        now: DateTime<Utc>,
    ) -> Self {
        let text_width = text_width(width);
        let thumbnail = match thumbnail {
            Some(thumb) => ThumbnailSlot::Image {
                kib: thumb.size_kib(),
            },
            None => ThumbnailSlot::Placeholder,
        };

        let mut title = wrap_clamped(&post.title, text_width, TITLE_MAX_LINES);
        if title.is_empty() {
            title.push("(untitled)".to_string());
        }

        Self {
            thumbnail,
            title,
            author: fit_width(&format!("by {}", post.author), text_width)
                .trim_end()
                .to_string(),
            body: wrap_clamped(&post.body, text_width, BODY_MAX_LINES),
            timestamp: relative_time(post.created_at, now),
        }
    }

    /// Renders the row as text lines, thumbnail slot first.
    pub fn lines(&self) -> Vec<String> {
        let text: Vec<&str> = self
            .title
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.author.as_str()))
            .chain(self.body.iter().map(String::as_str))
            .chain(std::iter::once(self.timestamp.as_str()))
            .collect();

        let slot = self.thumbnail.lines();
        let blank = " ".repeat(THUMBNAIL_WIDTH);
        let height = text.len().max(THUMBNAIL_HEIGHT);

        (0..height)
            .map(|i| {
                let left = slot.get(i).map(String::as_str).unwrap_or(&blank);
                let right = text.get(i).copied().unwrap_or("");
                format!("{left}{GUTTER}{right}").trim_end().to_string()
            })
            .collect()
    }
}

fn text_width(width: usize) -> usize {
    width.saturating_sub(THUMBNAIL_WIDTH + GUTTER.len()).max(8)
}

/// Human relative time such as `just now`, `5 minutes ago` or `2 years ago`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let (count, unit) = if minutes < 60 {
        (minutes, "minute")
    } else if hours < 24 {
        (hours, "hour")
    } else if days < 30 {
        (days, "day")
    } else if days < 365 {
        (days / 30, "month")
    } else {
        (days / 365, "year")
    };

    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    use crate::domain::PostId;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 20, 12, 0, 0).unwrap()
    }

    fn post(title: &str, body: &str) -> Post {
        Post {
            id: PostId::from("t3_row"),
            title: title.to_string(),
            author: "appledev".to_string(),
            body: body.to_string(),
            created_at: now() - Duration::hours(3),
            image_url: None,
            permalink: None,
        }
    }

    #[test]
    fn relative_time_buckets() {
        let at = |d: Duration| relative_time(now() - d, now());
        assert_eq!(at(Duration::seconds(5)), "just now");
        assert_eq!(at(Duration::seconds(-30)), "just now");
        assert_eq!(at(Duration::minutes(1)), "1 minute ago");
        assert_eq!(at(Duration::minutes(45)), "45 minutes ago");
        assert_eq!(at(Duration::hours(3)), "3 hours ago");
        assert_eq!(at(Duration::days(1)), "1 day ago");
        assert_eq!(at(Duration::days(65)), "2 months ago");
        assert_eq!(at(Duration::days(800)), "2 years ago");
    }

    #[test]
    fn placeholder_row_layout() {
        let row = PostRow::build(&post("Short title", "Body"), None, 40, now());
        assert_eq!(row.thumbnail, ThumbnailSlot::Placeholder);

        assert_eq!(
            row.lines(),
            vec![
                "╭────────╮ Short title",
                "│   ▨    │ by appledev",
                "╰────────╯ Body",
                "           3 hours ago",
            ]
        );
    }

    #[test]
    fn thumbnail_shows_size() {
        let thumb = Thumbnail {
            url: "https://example.com/t.jpg".to_string(),
            data: Bytes::from(vec![0u8; 12 * 1024]),
        };
        let row = PostRow::build(&post("T", ""), Some(&thumb), 40, now());

        assert_eq!(row.thumbnail, ThumbnailSlot::Image { kib: 12 });
        assert_eq!(row.lines()[1], "│ 12 KiB │ by appledev");
    }

    #[test]
    fn title_and_body_are_clamped() {
        let long = "word ".repeat(50);
        let row = PostRow::build(&post(&long, &long), None, 40, now());

        assert_eq!(row.title.len(), TITLE_MAX_LINES);
        assert_eq!(row.body.len(), BODY_MAX_LINES);
        assert!(row.title[1].ends_with('…'));
        assert!(row.lines().len() < ROW_HEIGHT);
    }

    #[test]
    fn lines_fit_requested_width() {
        let long = "antidisestablishmentarianism ".repeat(5);
        let row = PostRow::build(&post(&long, &long), None, 40, now());
        for line in row.lines() {
            assert!(line.chars().count() <= 40, "too wide: {line:?}");
        }
    }

    #[test]
    fn building_is_pure() {
        let p = post("Same", "Same body");
        assert_eq!(
            PostRow::build(&p, None, 50, now()),
            PostRow::build(&p, None, 50, now())
        );
    }
}
