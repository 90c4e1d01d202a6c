//! Reusable layout primitives.
//!
//! Components here are pure geometry and text helpers; views compose them
//! into screens.

mod list_viewport;
mod text;

pub use list_viewport::ListViewport;
pub use text::{fit_width, wrap_clamped};
