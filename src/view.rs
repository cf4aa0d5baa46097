//! View binding: the widget state a player renders, driven by user gestures
//! and by service events marshaled onto the UI thread.

mod format;
mod model;

pub use format::format_mmss;
pub use model::*;
