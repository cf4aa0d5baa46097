//! Utilities for opening a `Track`'s source and wrapping it in a `rodio` sink.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::PlayerError;
use crate::playlist::Track;

pub(super) type TrackSource = Decoder<BufReader<File>>;

/// Open and decode `track.source`, mapping any failure to `InvalidPath`.
pub(super) fn open_source(track: &Track) -> Result<TrackSource, PlayerError> {
    let invalid = |reason: String| PlayerError::InvalidPath {
        path: track.source.clone(),
        reason,
    };

    let file = File::open(&track.source).map_err(|e| invalid(e.to_string()))?;
    Decoder::new(BufReader::new(file)).map_err(|e| invalid(e.to_string()))
}

/// Reported duration: the decoder's if it knows, else the tagged one, else zero.
pub(super) fn resolve_duration(decoded: Option<Duration>, tagged: Option<Duration>) -> Duration {
    decoded.or(tagged).unwrap_or(Duration::ZERO)
}

/// Create a paused `Sink` playing `source`, returning it with the source's duration.
pub(super) fn create_sink(stream: &OutputStream, source: TrackSource) -> (Sink, Option<Duration>) {
    let duration = source.total_duration();
    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    (sink, duration)
}
