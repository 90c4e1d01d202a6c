//! Core domain types shared by the services, the list controller and the views.

mod post;

pub use post::{FeedPage, PageCursor, Post, PostId, Thumbnail};
