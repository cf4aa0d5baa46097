//! UI rendering helpers for the terminal user interface.
//!
//! Draws the player widget (title, seek bar, duration labels, transport
//! controls) above the playlist using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::config::UiSettings;
use crate::controller::PlaybackStatus;
use crate::notification::Notifier;
use crate::service::MediaService;
use crate::view::{Display, PlayButton, PlayerView};

/// Render the controls help text, incorporating the seek step.
fn controls_text(seek_step_seconds: u64) -> String {
    [
        "[j/k] up/down".to_string(),
        "[enter] play selected".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] seek -/+{}s", seek_step_seconds),
        "[d] remove".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Transport row: previous, play/pause (or the loading indicator), next.
fn transport_text(display: &Display) -> String {
    let center = if display.loading {
        "  ...  "
    } else {
        match display.button {
            PlayButton::Play => "[ play ]",
            PlayButton::Pause => "[pause ]",
        }
    };
    let (prev, next) = if display.controls_enabled() {
        ("[ |< ]", "[ >| ]")
    } else {
        ("      ", "      ")
    };
    format!("{prev}  {center}  {next}")
}

fn status_label(status: PlaybackStatus) -> &'static str {
    match status {
        PlaybackStatus::Stopped => "stopped",
        PlaybackStatus::Playing => "playing",
        PlaybackStatus::Paused => "paused",
    }
}

/// Render the entire UI into `frame` from the view's displayed state.
pub fn draw<S: MediaService, N: Notifier>(
    frame: &mut Frame,
    view: &PlayerView<S, N>,
    selected: usize,
    ui_settings: &UiSettings,
    seek_step_seconds: u64,
) {
    let display = view.display();
    let controller = view.controller();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" spindle ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Player widget
    {
        let block = Block::bordered()
            .padding(Padding {
                left: 1,
                right: 1,
                top: 0,
                bottom: 0,
            })
            .title(format!(" now playing [{}] ", status_label(controller.state().status())));
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let title = if display.title.is_empty() {
            "-".to_string()
        } else {
            display.title.clone()
        };
        frame.render_widget(Paragraph::new(title).bold(), rows[0]);

        let seek_bar = Gauge::default()
            .ratio(display.progress_ratio())
            .label(format!(
                "{} / {}",
                display.elapsed_label(),
                display.duration_label()
            ));
        frame.render_widget(seek_bar, rows[1]);

        frame.render_widget(
            Paragraph::new(transport_text(display)).alignment(Alignment::Center),
            rows[2],
        );

        if let Some(msg) = &display.message {
            frame.render_widget(Paragraph::new(msg.as_str()).italic(), rows[3]);
        }
    }

    // Playlist
    {
        let current = controller.current_track().map(|t| t.id);
        let items: Vec<ListItem> = controller
            .playlist()
            .iter()
            .map(|t| {
                let marker = if Some(t.id) == current { "* " } else { "  " };
                ListItem::new(format!("{}{}", marker, t.display()))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if !controller.playlist().is_empty() {
            state.select(Some(selected.min(controller.playlist().len() - 1)));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let footer = Paragraph::new(controls_text(seek_step_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
