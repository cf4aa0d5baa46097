//! `PlayerView`: displayed widget state plus the gesture and event handlers
//! that keep it in sync with the controller.

use std::time::Duration;

use tracing::{debug, warn};

use crate::controller::{Dispatch, PlaybackController, Removal};
use crate::error::Result;
use crate::notification::Notifier;
use crate::playlist::{Track, TrackId};
use crate::service::{MediaService, PlayerEvent};

use super::format::format_mmss;

/// Face of the play/pause button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlayButton {
    /// Tapping starts or continues playback.
    #[default]
    Play,
    /// Tapping pauses.
    Pause,
}

/// What the widget currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Display {
    pub title: String,
    /// Seek-bar progress.
    pub elapsed: Duration,
    /// Seek-bar range.
    pub duration: Duration,
    pub button: PlayButton,
    /// Loading indicator; prev/next are disabled while it shows.
    pub loading: bool,
    /// Last error surfaced to the user.
    pub message: Option<String>,
}

impl Display {
    pub fn elapsed_label(&self) -> String {
        format_mmss(self.elapsed)
    }

    pub fn duration_label(&self) -> String {
        format_mmss(self.duration)
    }

    /// Seek-bar fill in `0.0..=1.0`.
    pub fn progress_ratio(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn controls_enabled(&self) -> bool {
        !self.loading
    }
}

pub struct PlayerView<S, N> {
    controller: PlaybackController<S, N>,
    display: Display,
}

impl<S: MediaService, N: Notifier> PlayerView<S, N> {
    pub fn new(controller: PlaybackController<S, N>) -> Self {
        Self {
            controller,
            display: Display::default(),
        }
    }

    pub fn controller(&self) -> &PlaybackController<S, N> {
        &self.controller
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    /// Hand the bound service to the controller; a parked play starts now.
    pub fn bind(&mut self, service: S) {
        match self.controller.bind(service) {
            Ok(Some(dispatch)) => self.settle(Ok(dispatch)),
            Ok(None) => debug!("bound with nothing pending"),
            Err(e) => self.settle(Err(e)),
        }
    }

    /// The service went away: nothing plays until it binds again.
    pub fn unbind(&mut self) {
        self.controller.unbind();
        self.dismiss_loading();
        self.display.button = PlayButton::Play;
        self.display.message = Some("audio service stopped".to_string());
    }

    /// Repaint from a service event. Must run on the UI thread.
    pub fn handle_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Bound => {}
            PlayerEvent::Prepared { duration } => {
                self.dismiss_loading();
                self.reset_info();
                self.display.duration = duration;
            }
            PlayerEvent::Completed => {
                self.reset_info();
                let result = self.controller.next();
                self.settle(result);
            }
            PlayerEvent::Paused => self.display.button = PlayButton::Play,
            PlayerEvent::Playing => {
                self.dismiss_loading();
                self.display.button = PlayButton::Pause;
            }
            PlayerEvent::Resumed => self.dismiss_loading(),
            PlayerEvent::TimeUpdated(position) => self.display.elapsed = position,
            PlayerEvent::TitleChanged(title) => self.display.title = title,
            PlayerEvent::InvalidPath { track, reason } => {
                warn!(track = %track.id, %reason, "track source is invalid");
                self.dismiss_loading();
                self.display.message = Some(format!("cannot play {}: {}", track.title, reason));
            }
        }
    }

    /// Play/pause button: the current face decides what a tap does.
    pub fn tap_play(&mut self) {
        if self.display.button == PlayButton::Pause {
            self.pause();
        } else {
            self.show_loading();
            let result = self.controller.resume();
            self.settle(result);
        }
    }

    pub fn tap_next(&mut self) {
        if self.controller.current_track().is_none() {
            return;
        }
        self.reset_info();
        self.show_loading();
        let result = self.controller.next();
        self.settle(result);
    }

    pub fn tap_previous(&mut self) {
        self.reset_info();
        self.show_loading();
        let result = self.controller.previous();
        self.settle(result);
    }

    pub fn pause(&mut self) {
        self.controller.pause();
    }

    /// Play `track`, appending it to the playlist if it is not there yet.
    pub fn play_track(&mut self, track: Track) {
        self.show_loading();
        let id = self.controller.add_track(track);
        let Some(track) = self
            .controller
            .playlist()
            .index_of(id)
            .and_then(|i| self.controller.playlist().get(i))
            .cloned()
        else {
            self.dismiss_loading();
            return;
        };
        let result = self.controller.play(&track);
        self.settle(result);
    }

    pub fn add_track(&mut self, track: Track) -> TrackId {
        self.controller.add_track(track)
    }

    pub fn remove_track(&mut self, id: TrackId) {
        if self.controller.remove_track(id) == Removal::ResetDisplay {
            self.reset_info();
            self.display.button = PlayButton::Play;
        }
    }

    /// The user grabbed the seek bar.
    pub fn begin_seek(&mut self) {
        self.show_loading();
    }

    /// The user dragged the seek bar to `position`.
    pub fn drag_seek(&mut self, position: Duration) {
        let position = if self.display.duration.is_zero() {
            position
        } else {
            position.min(self.display.duration)
        };
        self.display.elapsed = position;
        self.controller.seek(position);
    }

    pub fn end_seek(&mut self) {
        self.dismiss_loading();
    }

    /// Seek relative to the displayed position, as one keyboard step on the bar.
    pub fn nudge_seek(&mut self, delta: Duration, forward: bool) {
        let target = if forward {
            self.display.elapsed.saturating_add(delta)
        } else {
            self.display.elapsed.saturating_sub(delta)
        };
        self.begin_seek();
        self.drag_seek(target);
        self.end_seek();
    }

    pub fn kill(&mut self) {
        self.controller.kill();
        self.reset_info();
        self.display.button = PlayButton::Play;
    }

    fn settle(&mut self, result: Result<Dispatch>) {
        match result {
            Ok(dispatch) => debug!(?dispatch, "playback request handled"),
            Err(e) => {
                warn!(error = %e, "playback request failed");
                self.dismiss_loading();
                self.display.message = Some(e.to_string());
            }
        }
    }

    fn show_loading(&mut self) {
        self.display.loading = true;
        self.display.message = None;
    }

    fn dismiss_loading(&mut self) {
        self.display.loading = false;
    }

    fn reset_info(&mut self) {
        self.display.elapsed = Duration::ZERO;
        self.display.duration = Duration::ZERO;
        self.display.title.clear();
    }
}
