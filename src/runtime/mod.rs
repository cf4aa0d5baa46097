use std::env;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::controller::PlaybackController;
use crate::logging;
use crate::notification::{self, ControlCmd};
use crate::service::{AudioService, PlayerEvent};
use crate::view::PlayerView;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback) = settings::load_settings();
    let log_file = logging::init(&settings.logging);
    if let Some(msg) = fallback {
        warn!("{msg}");
    }
    info!(log_file = ?log_file, "spindle starting");

    let inputs = startup::classify_args(env::args().skip(1));
    let playlist = startup::build_playlist(&inputs.dirs, &settings.playlist);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let notifier = settings
        .notification
        .enabled
        .then(|| notification::spawn_mpris(control_tx.clone()));

    // Binding completes asynchronously; the handle is held until `Bound` arrives.
    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();
    let binding = AudioService::connect(event_tx, &settings.audio);

    let mut view: PlayerView<AudioService, _> =
        PlayerView::new(PlaybackController::new(playlist, notifier));
    for file in &inputs.files {
        view.add_track(startup::file_track(file));
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::new(binding);
    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut view,
        &event_rx,
        &control_rx,
        &mut state,
    );

    view.kill();
    drop(state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("spindle stopped");
    run_result
}
