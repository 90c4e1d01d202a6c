//! Terminal user interface.
//!
//! - `components`: viewport geometry and text wrapping
//! - `views`: the main window, post list, post rows and detail view

pub mod components;
pub mod views;

pub use views::{Flow, MainWindow, PostDetail, PostList, PostRow};
