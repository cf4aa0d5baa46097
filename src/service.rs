//! Media-playback service: the `MediaService` seam and its rodio-backed
//! implementation running on a dedicated audio thread.

mod sink;
mod thread;
mod types;

use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::AudioSettings;
use crate::playlist::Track;

pub use types::{CurrentHandle, MediaService, PlayerEvent, ServiceCmd};

use thread::spawn_service_thread;

pub struct AudioService {
    tx: Sender<ServiceCmd>,
    current: CurrentHandle,
    join: Option<JoinHandle<()>>,
}

impl AudioService {
    /// Start binding. The returned handle is only usable once the audio thread
    /// has reported [`PlayerEvent::Bound`] on `events`.
    pub fn connect(events: Sender<PlayerEvent>, settings: &AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<ServiceCmd>();
        let current: CurrentHandle = Arc::new(Mutex::new(None));
        let tick = Duration::from_millis(settings.tick_ms.max(1));

        let join = spawn_service_thread(rx, events, current.clone(), tick);

        Self {
            tx,
            current,
            join: Some(join),
        }
    }

    fn send(&self, cmd: ServiceCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!(cmd = ?e.0, "audio thread is gone");
        }
    }

    fn set_current(&self, track: Option<Track>) {
        if let Ok(mut c) = self.current.lock() {
            *c = track;
        }
    }
}

impl MediaService for AudioService {
    fn play(&mut self, track: &Track) {
        self.set_current(Some(track.clone()));
        self.send(ServiceCmd::Play(track.clone()));
    }

    fn pause(&mut self) {
        self.send(ServiceCmd::Pause);
    }

    fn stop(&mut self) {
        self.set_current(None);
        self.send(ServiceCmd::Stop);
    }

    fn seek_to(&mut self, position: Duration) {
        self.send(ServiceCmd::SeekTo(position));
    }

    fn current_track(&self) -> Option<Track> {
        self.current.lock().ok().and_then(|c| c.clone())
    }

    fn destroy(&mut self) {
        let _ = self.tx.send(ServiceCmd::Quit);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
        debug!("audio service destroyed");
    }
}

impl Drop for AudioService {
    fn drop(&mut self) {
        if self.join.is_some() {
            self.destroy();
        }
    }
}

#[cfg(test)]
mod tests;
