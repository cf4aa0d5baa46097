//! `PlaybackController`: playlist, current index, play/pause flags, and the
//! single pending play that waits for the service to bind.

use std::time::Duration;

use tracing::{debug, info};

use crate::error::{PlayerError, Result};
use crate::notification::Notifier;
use crate::playlist::{Playlist, Track, TrackId};
use crate::service::MediaService;

/// Coarse playback status, as mirrored to the notification surface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Snapshot of the controller's playback state.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    pub current: Option<Track>,
    pub playing: bool,
    pub paused: bool,
    pub index: usize,
}

impl PlaybackState {
    pub fn status(&self) -> PlaybackStatus {
        if self.playing {
            PlaybackStatus::Playing
        } else if self.paused {
            PlaybackStatus::Paused
        } else {
            PlaybackStatus::Stopped
        }
    }
}

/// What a request to start a track turned into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Handed to the bound service.
    Started,
    /// Parked until the service binds.
    Deferred,
}

/// Outcome of removing a track.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Removal {
    NotFound,
    /// Playback was not affected.
    Removed,
    /// The removed track was playing, or was the last one; the display must reset.
    ResetDisplay,
}

pub struct PlaybackController<S, N> {
    playlist: Playlist,
    current: Option<Track>,
    index: usize,
    playing: bool,
    paused: bool,
    service: Option<S>,
    pending: Option<Track>,
    notifier: N,
    notification_created: bool,
}

impl<S: MediaService, N: Notifier> PlaybackController<S, N> {
    /// Create an unbound controller over `playlist`.
    pub fn new(playlist: Playlist, notifier: N) -> Self {
        Self {
            playlist,
            current: None,
            index: 0,
            playing: false,
            paused: false,
            service: None,
            pending: None,
            notifier,
            notification_created: false,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_bound(&self) -> bool {
        self.service.is_some()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current: self.current.clone(),
            playing: self.playing,
            paused: self.paused,
            index: self.index,
        }
    }

    /// Attach the bound service and replay the pending play, if any.
    /// Returns `None` when nothing was pending.
    pub fn bind(&mut self, service: S) -> Result<Option<Dispatch>> {
        self.service = Some(service);
        info!("media service bound");

        match self.pending.take() {
            Some(track) => {
                debug!(track = %track.id, "replaying deferred play");
                self.play(&track).map(Some)
            }
            None => Ok(None),
        }
    }

    /// The service went away; playback is neither playing nor paused.
    pub fn unbind(&mut self) {
        self.service = None;
        self.playing = false;
        self.paused = false;
        self.update_notification();
    }

    /// Start `track`, or park it if the service has not bound yet.
    pub fn play(&mut self, track: &Track) -> Result<Dispatch> {
        if self.playlist.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }

        let Some(service) = self.service.as_mut() else {
            debug!(track = %track.id, "service unbound, deferring play");
            self.pending = Some(track.clone());
            return Ok(Dispatch::Deferred);
        };

        service.play(track);
        self.current = Some(track.clone());
        self.sync_index();
        self.playing = true;
        self.paused = false;
        debug!(track = %track.id, index = self.index, "playing");

        if !self.notification_created {
            self.notifier.create(&track.title);
            self.notification_created = true;
        }
        self.update_notification();
        Ok(Dispatch::Started)
    }

    /// Play the track after the current one, wrapping to the first.
    pub fn next(&mut self) -> Result<Dispatch> {
        let len = self.playlist.len();
        if len == 0 {
            return Err(PlayerError::EmptyPlaylist);
        }

        let target = match self.current {
            Some(_) if self.index + 1 < len => self.index + 1,
            _ => 0,
        };
        self.switch_to(target)
    }

    /// Play the track before the current one, wrapping to the last.
    pub fn previous(&mut self) -> Result<Dispatch> {
        let len = self.playlist.len();
        if len == 0 {
            return Err(PlayerError::EmptyPlaylist);
        }

        let target = match self.current {
            Some(_) if self.index > 0 => self.index - 1,
            Some(_) => len - 1,
            None => 0,
        };
        self.switch_to(target)
    }

    fn switch_to(&mut self, index: usize) -> Result<Dispatch> {
        let Some(track) = self.playlist.get(index).cloned() else {
            return Err(PlayerError::EmptyPlaylist);
        };
        if let Some(service) = self.service.as_mut() {
            service.stop();
        }
        self.play(&track)
    }

    /// Pause the current track. A no-op unless something is playing.
    pub fn pause(&mut self) {
        if self.current.is_none() || !self.playing {
            return;
        }
        if let Some(service) = self.service.as_mut() {
            service.pause();
        }
        self.playing = false;
        self.paused = true;
        self.update_notification();
    }

    /// Continue the current track, or start the first one if nothing is current.
    pub fn resume(&mut self) -> Result<Dispatch> {
        let track = match (&self.current, self.playlist.first()) {
            (_, None) => return Err(PlayerError::EmptyPlaylist),
            (Some(current), _) => current.clone(),
            (None, Some(first)) => first.clone(),
        };
        self.play(&track)
    }

    pub fn seek(&mut self, position: Duration) {
        if let Some(service) = self.service.as_mut() {
            service.seek_to(position);
        }
    }

    pub fn add_track(&mut self, track: Track) -> TrackId {
        self.playlist.add(track)
    }

    pub fn remove_track(&mut self, id: TrackId) -> Removal {
        if !self.playlist.contains(id) {
            return Removal::NotFound;
        }

        let is_current = self
            .service
            .as_ref()
            .and_then(|s| s.current_track())
            .or_else(|| self.current.clone())
            .is_some_and(|t| t.id == id);

        self.playlist.remove(id);

        if self.playlist.is_empty() {
            if let Some(service) = self.service.as_mut() {
                service.stop();
            }
            self.current = None;
            self.pending = None;
            self.index = 0;
            self.playing = false;
            self.paused = false;
            self.update_notification();
            return Removal::ResetDisplay;
        }

        if is_current && self.playing {
            self.pause();
            self.sync_index();
            return Removal::ResetDisplay;
        }

        self.sync_index();
        Removal::Removed
    }

    /// Show the notification for the current track.
    pub fn create_notification(&mut self) {
        if let Some(track) = self.current.as_ref() {
            self.notifier.create(&track.title);
            self.notification_created = true;
            self.update_notification();
        }
    }

    /// Push the current status and track to the notification.
    pub fn update_notification(&mut self) {
        let status = self.state().status();
        self.notifier.update(status, self.current.as_ref());
    }

    /// Tear down: stop and release the service, remove the notification.
    pub fn kill(&mut self) {
        if let Some(mut service) = self.service.take() {
            service.stop();
            service.destroy();
        }
        self.notifier.destroy();
        self.notification_created = false;
        self.pending = None;
        self.playing = false;
        self.paused = false;
        info!("playback controller killed");
    }

    /// Recompute `index` from the current track's identity. Keeps the old
    /// index when the current track is no longer in the playlist.
    fn sync_index(&mut self) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        if let Some(i) = self.playlist.index_of(current.id) {
            self.index = i;
        } else {
            self.index = self.index.min(self.playlist.len().saturating_sub(1));
        }
    }
}
