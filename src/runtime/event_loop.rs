use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, warn};

use crate::config;
use crate::notification::{ControlCmd, MprisHandle};
use crate::service::{AudioService, PlayerEvent};
use crate::ui;
use crate::view::{PlayButton, PlayerView};

type View = PlayerView<AudioService, Option<MprisHandle>>;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Service handle waiting for the audio thread to report `Bound`.
    pub binding: Option<AudioService>,
    /// Cursor in the playlist pane.
    pub selected: usize,
    /// The audio thread has exited and its event channel is closed.
    pub service_gone: bool,
}

impl EventLoopState {
    pub fn new(binding: AudioService) -> Self {
        Self {
            binding: Some(binding),
            selected: 0,
            service_gone: false,
        }
    }

    fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

/// Main terminal event loop: drains service events and remote commands onto
/// the view, draws, and handles keys. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    view: &mut View,
    events: &Receiver<PlayerEvent>,
    control_rx: &Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if !state.service_gone {
            loop {
                match events.try_recv() {
                    Ok(ev) => handle_player_event(ev, view, state),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        handle_service_gone(view, state);
                        break;
                    }
                }
            }
        }

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, view) {
                return Ok(());
            }
        }

        terminal.draw(|f| {
            ui::draw(
                f,
                view,
                state.selected,
                &settings.ui,
                settings.audio.seek_step_seconds,
            )
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, view, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_player_event(ev: PlayerEvent, view: &mut View, state: &mut EventLoopState) {
    if ev == PlayerEvent::Bound {
        if let Some(service) = state.binding.take() {
            view.bind(service);
        }
        return;
    }
    view.handle_event(ev);
}

fn handle_service_gone(view: &mut View, state: &mut EventLoopState) {
    state.service_gone = true;
    state.binding = None;
    if view.controller().is_bound() {
        warn!("audio thread exited, unbinding");
        view.unbind();
    }
}

/// Returns `true` when the remote asked to quit.
fn handle_control_cmd(cmd: ControlCmd, view: &mut View) -> bool {
    debug!(?cmd, "remote command");
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            if view.display().button == PlayButton::Play {
                view.tap_play();
            }
        }
        ControlCmd::Pause => {
            if view.display().button == PlayButton::Pause {
                view.pause();
            }
        }
        ControlCmd::PlayPause => view.tap_play(),
        ControlCmd::Next => {
            if view.display().controls_enabled() {
                view.tap_next();
            }
        }
        ControlCmd::Prev => {
            if view.display().controls_enabled() {
                view.tap_previous();
            }
        }
    }
    false
}

/// Returns `true` when the user asked to quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    view: &mut View,
    state: &mut EventLoopState,
) -> bool {
    let step = Duration::from_secs(settings.audio.seek_step_seconds);
    let len = view.controller().playlist().len();

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('j') | KeyCode::Down => {
            if state.selected + 1 < len {
                state.selected += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.selected = state.selected.saturating_sub(1);
        }
        KeyCode::Enter => {
            if let Some(track) = view.controller().playlist().get(state.selected).cloned() {
                view.play_track(track);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => view.tap_play(),
        // prev/next are disabled while the loading indicator shows
        KeyCode::Char('l') | KeyCode::Right if view.display().controls_enabled() => {
            view.tap_next();
        }
        KeyCode::Char('h') | KeyCode::Left if view.display().controls_enabled() => {
            view.tap_previous();
        }
        KeyCode::Char('L') => view.nudge_seek(step, true),
        KeyCode::Char('H') => view.nudge_seek(step, false),
        KeyCode::Char('d') => {
            if let Some(id) = view.controller().playlist().get(state.selected).map(|t| t.id) {
                view.remove_track(id);
                state.clamp_selection(view.controller().playlist().len());
            }
        }
        _ => {}
    }
    false
}
