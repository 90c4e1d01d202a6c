//! # subfeed
//!
//! A line-mode terminal reader for a paged subreddit feed, with locally saved
//! posts and title search over them.
//!
//! ## Architecture
//!
//! ```text
//! FeedClient → ListSession (ListController) → MainWindow
//!                     ↑                            │
//!              SavedPostStore  ←── PostDetail ─────┘
//! ```
//!
//! - [`services`]: HTTP feed client, SQLite saved-post store, thumbnail cache
//! - [`app`]: list controller, session event loop, debounce, run loop
//! - [`ui`]: viewport geometry, post rows, list and detail views
//! - [`config`]: JSON settings with defaults
//! - [`domain`]: posts, pages and cursors

pub mod app;
pub mod config;
pub mod domain;
pub mod services;
pub mod ui;

pub use app::App;
pub use config::FeedConfig;
