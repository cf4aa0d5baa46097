//! Playlist module: track model, playlist initialization and directory scanning.

mod model;
mod scan;

pub use model::*;
pub use scan::scan;
