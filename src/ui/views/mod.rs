//! Application views.
//!
//! Each view owns its own presentation state and renders to plain text.

mod main_window;
mod post_detail;
mod post_list;
mod post_row;

pub use main_window::{Flow, MainWindow};
pub use post_detail::PostDetail;
pub use post_list::PostList;
pub use post_row::{relative_time, PostRow, ThumbnailSlot, ROW_HEIGHT};
