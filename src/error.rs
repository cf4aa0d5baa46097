//! Recoverable playback errors.
//!
//! Neither kind is fatal: the view binding reacts to both by dismissing its
//! loading indicator.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// The playlist has no tracks to act on.
    #[error("playlist is empty")]
    EmptyPlaylist,

    /// The service could not open or decode a track's source.
    #[error("cannot open {path:?}: {reason}")]
    InvalidPath { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, PlayerError>;
