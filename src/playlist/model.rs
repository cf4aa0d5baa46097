//! `Track` and `Playlist`.
//!
//! A playlist hands out track ids and keeps track positions contiguous
//! (`0..len`) across every mutation.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single playable audio item.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    /// Where the service opens the audio from.
    pub source: PathBuf,
    /// Ordinal position inside the owning playlist. `None` until added.
    pub position: Option<usize>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
}

impl Track {
    /// Create an unplaced track; the playlist assigns its id and position.
    pub fn new(title: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            id: TrackId::default(),
            title: title.into(),
            source: source.into(),
            position: None,
            artist: None,
            album: None,
            duration: None,
        }
    }

    /// `Artist - Title` when an artist is known, otherwise the title.
    pub fn display(&self) -> String {
        match self.artist.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => format!("{} - {}", a, self.title),
            _ => self.title.clone(),
        }
    }
}

/// Ordered collection of tracks.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    next_id: u64,
}

impl Playlist {
    /// Build a playlist from `tracks`.
    ///
    /// If the first track already carries a position the list is treated as
    /// restored from storage and keeps its ids; otherwise, or when restored
    /// ids collide, ids and positions are assigned in order.
    pub fn new(tracks: Vec<Track>) -> Self {
        let already_placed = tracks.first().is_some_and(|t| t.position.is_some());
        if !already_placed {
            return Self::renumbered(tracks);
        }

        let mut seen = HashSet::with_capacity(tracks.len());
        if !tracks.iter().all(|t| seen.insert(t.id)) {
            warn!("restored playlist has duplicate track ids, renumbering");
            return Self::renumbered(tracks);
        }

        let next_id = tracks.iter().map(|t| t.id.0).max().map_or(0, |m| m + 1);
        let mut playlist = Self { tracks, next_id };
        playlist.reposition();
        playlist
    }

    /// Titles become `"<label> 1"`, `"<label> 2"`, ...
    pub fn anonymous(tracks: Vec<Track>, label: &str) -> Self {
        let mut playlist = Self::renumbered(tracks);
        for (i, t) in playlist.tracks.iter_mut().enumerate() {
            t.title = format!("{} {}", label, i + 1);
        }
        playlist
    }

    /// Every track gets the same `title`.
    pub fn with_title(tracks: Vec<Track>, title: &str) -> Self {
        let mut playlist = Self::renumbered(tracks);
        for t in playlist.tracks.iter_mut() {
            t.title = title.to_string();
        }
        playlist
    }

    fn renumbered(mut tracks: Vec<Track>) -> Self {
        for (i, t) in tracks.iter_mut().enumerate() {
            t.id = TrackId(i as u64);
            t.position = Some(i);
        }
        Self {
            next_id: tracks.len() as u64,
            tracks,
        }
    }

    fn reposition(&mut self) {
        for (i, t) in self.tracks.iter_mut().enumerate() {
            t.position = Some(i);
        }
    }

    /// Append `track` and return its id.
    ///
    /// A track whose source is already present is not added twice; the
    /// existing id is returned instead.
    pub fn add(&mut self, mut track: Track) -> TrackId {
        if let Some(existing) = self.find_source(&track.source) {
            return existing.id;
        }

        let id = TrackId(self.next_id);
        self.next_id += 1;
        track.id = id;
        track.position = Some(self.tracks.len());
        self.tracks.push(track);
        id
    }

    /// Remove the track with `id`, renumbering the ones after it.
    pub fn remove(&mut self, id: TrackId) -> Option<Track> {
        let i = self.index_of(id)?;
        let mut removed = self.tracks.remove(i);
        removed.position = None;
        self.reposition();
        Some(removed)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn find_source(&self, source: &Path) -> Option<&Track> {
        self.tracks.iter().find(|t| t.source == source)
    }

    pub fn index_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn first(&self) -> Option<&Track> {
        self.tracks.first()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }
}
