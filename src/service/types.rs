//! Service-facing types: the `MediaService` seam, the events a service
//! reports, and the commands the audio thread understands.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::playlist::Track;

/// A bound media-playback service.
///
/// Calls are fire-and-forget; outcomes come back as [`PlayerEvent`]s.
pub trait MediaService {
    /// Start `track`, or continue it if it is the paused current track.
    fn play(&mut self, track: &Track);
    fn pause(&mut self);
    fn stop(&mut self);
    fn seek_to(&mut self, position: Duration);
    /// The track the service is currently holding, if any.
    fn current_track(&self) -> Option<Track>;
    /// Release the service. No calls are valid afterwards.
    fn destroy(&mut self);
}

/// Events reported by the service, in the order the service observes them.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// The service finished binding and accepts calls.
    Bound,
    /// A new track is loaded; `duration` is zero when unknown.
    Prepared { duration: Duration },
    /// The current track played to its end.
    Completed,
    Paused,
    Playing,
    /// A paused track continued.
    Resumed,
    TimeUpdated(Duration),
    TitleChanged(String),
    /// The track's source could not be opened or decoded.
    InvalidPath { track: Track, reason: String },
}

#[derive(Debug)]
pub enum ServiceCmd {
    Play(Track),
    Pause,
    Stop,
    SeekTo(Duration),
    /// Stop playback and end the audio thread.
    Quit,
}

pub type CurrentHandle = Arc<Mutex<Option<Track>>>;
