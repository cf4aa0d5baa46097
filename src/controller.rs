//! Playback controller: owns the playlist and playback flags and drives the
//! bound media service and the notification surface.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
