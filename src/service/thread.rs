use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use crate::playlist::Track;

use super::sink::{create_sink, open_source, resolve_duration};
use super::types::{CurrentHandle, PlayerEvent, ServiceCmd};

/// State owned by the audio thread.
struct AudioLoop {
    stream: OutputStream,
    events: Sender<PlayerEvent>,
    current: CurrentHandle,
    sink: Option<Sink>,
    playing: Option<Track>,
    paused: bool,
}

impl AudioLoop {
    fn emit(&self, event: PlayerEvent) {
        // The UI may already be gone during teardown.
        let _ = self.events.send(event);
    }

    fn set_current(&self, track: Option<Track>) {
        if let Ok(mut c) = self.current.lock() {
            *c = track;
        }
    }

    fn play(&mut self, track: Track) {
        let same = self.playing.as_ref().is_some_and(|t| t.id == track.id);
        // Replaying the loaded track continues it rather than restarting.
        if same && self.sink.is_some() {
            if self.paused {
                if let Some(s) = self.sink.as_ref() {
                    s.play();
                }
                self.paused = false;
            }
            self.emit(PlayerEvent::Resumed);
            self.emit(PlayerEvent::Playing);
            return;
        }

        self.stop();

        let source = match open_source(&track) {
            Ok(source) => source,
            Err(e) => {
                warn!(track = %track.id, error = %e, "cannot play track");
                self.set_current(None);
                self.emit(PlayerEvent::InvalidPath {
                    reason: e.to_string(),
                    track,
                });
                return;
            }
        };

        let (sink, decoded) = create_sink(&self.stream, source);
        let duration = resolve_duration(decoded, track.duration);
        sink.play();
        debug!(track = %track.id, title = %track.title, ?duration, "prepared track");

        self.sink = Some(sink);
        self.paused = false;
        // Prepared resets the displayed info, so the title follows it.
        self.emit(PlayerEvent::Prepared { duration });
        self.emit(PlayerEvent::TitleChanged(track.title.clone()));
        self.emit(PlayerEvent::Playing);
        self.set_current(Some(track.clone()));
        self.playing = Some(track);
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
            self.paused = true;
            self.emit(PlayerEvent::Paused);
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.playing = None;
        self.paused = false;
    }

    fn seek_to(&mut self, position: Duration) {
        let Some(s) = self.sink.as_ref() else {
            return;
        };
        if let Err(e) = s.try_seek(position) {
            warn!(error = %e, ?position, "seek failed");
            return;
        }
        self.emit(PlayerEvent::TimeUpdated(position));
    }

    fn tick(&mut self) {
        if self.paused {
            return;
        }
        let Some(s) = self.sink.as_ref() else {
            return;
        };

        if s.empty() {
            self.sink = None;
            self.emit(PlayerEvent::Completed);
        } else {
            let pos = s.get_pos();
            self.emit(PlayerEvent::TimeUpdated(pos));
        }
    }
}

/// Spawn the audio thread. `Bound` is emitted once the output device is open;
/// if it cannot be opened the thread exits without binding.
pub(super) fn spawn_service_thread(
    rx: Receiver<ServiceCmd>,
    events: Sender<PlayerEvent>,
    current: CurrentHandle,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                error!(error = %e, "no audio output device, service stays unbound");
                return;
            }
        };
        // rodio logs to stderr when the stream is dropped, which would tear the TUI.
        stream.log_on_drop(false);

        let mut audio = AudioLoop {
            stream,
            events,
            current,
            sink: None,
            playing: None,
            paused: false,
        };
        audio.emit(PlayerEvent::Bound);

        loop {
            match rx.recv_timeout(tick) {
                Ok(ServiceCmd::Play(track)) => audio.play(track),
                Ok(ServiceCmd::Pause) => audio.pause(),
                Ok(ServiceCmd::Stop) => audio.stop(),
                Ok(ServiceCmd::SeekTo(pos)) => audio.seek_to(pos),
                Ok(ServiceCmd::Quit) => {
                    audio.stop();
                    break;
                }
                Err(RecvTimeoutError::Timeout) => audio.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        debug!("audio thread finished");
    })
}
