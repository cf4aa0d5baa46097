use std::collections::HashSet;
use std::path::Path;

use lofty::file::TaggedFile;
use lofty::prelude::*;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::config::PlaylistSettings;

use super::model::Track;

/// Which directory entries become tracks.
struct EntryFilter {
    extensions: HashSet<String>,
    include_hidden: bool,
}

impl EntryFilter {
    fn new(settings: &PlaylistSettings) -> Self {
        let extensions = settings
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self {
            extensions,
            include_hidden: settings.include_hidden,
        }
    }

    fn is_audio(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
    }

    /// Whether the walk may descend into (or yield) `entry`. The root is always kept.
    fn admits(&self, entry: &DirEntry) -> bool {
        if self.include_hidden || entry.depth() == 0 {
            return true;
        }
        !entry.file_name().to_string_lossy().starts_with('.')
    }

    fn accepts(&self, entry: &DirEntry) -> bool {
        entry.path().is_file() && self.is_audio(entry.path())
    }
}

fn non_blank(value: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn apply_tags(track: &mut Track, tagged: &TaggedFile) {
    track.duration = Some(tagged.properties().duration());

    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return;
    };
    if let Some(title) = non_blank(tag.title()) {
        track.title = title;
    }
    track.artist = non_blank(tag.artist());
    track.album = non_blank(tag.album());
}

/// A track for `path`, titled from its tags or else its file stem.
fn read_track(path: &Path) -> Track {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "UNKNOWN".to_string());
    let mut track = Track::new(stem, path);

    // Unreadable tags are fine: the service reports undecodable sources on play.
    match lofty::read_from_path(path) {
        Ok(tagged) => apply_tags(&mut track, &tagged),
        Err(e) => trace!(path = %path.display(), error = %e, "no tags"),
    }
    track
}

/// Collect unplaced tracks under `dir`, sorted case-insensitively by display text.
pub fn scan(dir: &Path, settings: &PlaylistSettings) -> Vec<Track> {
    let filter = EntryFilter::new(settings);

    let max_depth = match (settings.recursive, settings.max_depth) {
        (false, _) => 1,
        (true, Some(d)) => d,
        (true, None) => usize::MAX,
    };

    let mut tracks: Vec<Track> = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|e| filter.admits(e))
        .filter_map(Result::ok)
        .filter(|e| filter.accepts(e))
        .map(|e| read_track(e.path()))
        .collect();

    tracks.sort_by_cached_key(|t| t.display().to_lowercase());
    debug!(dir = %dir.display(), count = tracks.len(), "scanned directory");
    tracks
}
