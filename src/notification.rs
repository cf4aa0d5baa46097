//! System notification surface.
//!
//! The controller drives a [`Notifier`]; the concrete one publishes playback
//! state over MPRIS so desktop media widgets mirror the player, and forwards
//! their buttons back as [`ControlCmd`]s.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use tracing::{debug, error};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::controller::PlaybackStatus;
use crate::playlist::Track;

pub trait Notifier {
    /// Show the notification for `title`.
    fn create(&mut self, title: &str);
    /// Refresh content after a play/track change or pause/resume.
    fn update(&mut self, status: PlaybackStatus, track: Option<&Track>);
    fn destroy(&mut self);
}

/// A disabled notification surface.
impl<N: Notifier> Notifier for Option<N> {
    fn create(&mut self, title: &str) {
        if let Some(n) = self {
            n.create(title);
        }
    }

    fn update(&mut self, status: PlaybackStatus, track: Option<&Track>) {
        if let Some(n) = self {
            n.update(status, track);
        }
    }

    fn destroy(&mut self) {
        if let Some(n) = self {
            n.destroy();
        }
    }
}

/// Remote commands arriving from the notification surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Next,
    Prev,
}

#[derive(Debug, Default)]
struct SharedState {
    visible: bool,
    playback: PlaybackStatus,
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    url: Option<String>,
    length_micros: Option<i64>,
    track_id: Option<OwnedObjectPath>,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    fn set_track(s: &mut SharedState, track: Option<&Track>) {
        let Some(track) = track else {
            s.title = None;
            s.artist = None;
            s.album = None;
            s.url = None;
            s.length_micros = None;
            s.track_id = None;
            return;
        };

        s.title = Some(track.title.clone());
        s.artist = track.artist.clone();
        s.album = track.album.clone();
        s.url = Some(format!("file://{}", track.source.display()));
        s.length_micros = track.duration.map(|d| d.as_micros().min(i64::MAX as u128) as i64);
        s.track_id = ObjectPath::try_from(format!("/org/mpris/MediaPlayer2/track/{}", track.id))
            .ok()
            .map(OwnedObjectPath::from);
    }
}

impl Notifier for MprisHandle {
    fn create(&mut self, title: &str) {
        if let Ok(mut s) = self.state.lock() {
            s.visible = true;
            s.title = Some(title.to_string());
        }
        debug!(title, "notification created");
    }

    fn update(&mut self, status: PlaybackStatus, track: Option<&Track>) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = status;
            Self::set_track(&mut s, track);
        }
    }

    fn destroy(&mut self) {
        if let Ok(mut s) = self.state.lock() {
            *s = SharedState::default();
        }
        debug!("notification destroyed");
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "spindle"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

fn owned(value: Value<'_>) -> Option<OwnedValue> {
    OwnedValue::try_from(value).ok()
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        if !s.visible {
            return "Stopped";
        }
        match s.playback {
            PlaybackStatus::Stopped => "Stopped",
            PlaybackStatus::Playing => "Playing",
            PlaybackStatus::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };
        if !s.visible {
            return map;
        }

        let mut put = |key: &str, value: Option<OwnedValue>| {
            if let Some(v) = value {
                map.insert(key.to_string(), v);
            }
        };

        put(
            "mpris:trackid",
            s.track_id
                .as_ref()
                .and_then(|p| owned(Value::from(p.clone().into_inner()))),
        );
        put(
            "xesam:title",
            owned(Value::from(s.title.clone().unwrap_or_default())),
        );
        put(
            "xesam:artist",
            s.artist.clone().and_then(|a| owned(Value::from(vec![a]))),
        );
        put(
            "xesam:album",
            s.album.clone().and_then(|a| owned(Value::from(a))),
        );
        put("xesam:url", s.url.clone().and_then(|u| owned(Value::from(u))));
        put(
            "mpris:length",
            s.length_micros.and_then(|l| owned(Value::from(l))),
        );
        map
    }
}

/// Register the MPRIS endpoint on the session bus from a background thread.
///
/// Failing to reach the bus is logged and leaves the handle working as a
/// local, unpublished state holder.
pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let path = "/org/mpris/MediaPlayer2";

            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    error!(error = %e, "MPRIS: failed to connect to session bus");
                    return;
                }
            };

            if let Err(e) = connection
                .request_name("org.mpris.MediaPlayer2.spindle")
                .await
            {
                error!(error = %e, "MPRIS: failed to acquire name");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server.at(path, RootIface { tx: tx.clone() }).await {
                error!(error = %e, "MPRIS: failed to register root iface");
                return;
            }

            if let Err(e) = object_server
                .at(
                    path,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                error!(error = %e, "MPRIS: failed to register player iface");
                return;
            }

            // Keep the service alive.
            loop {
                Timer::after(std::time::Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}
