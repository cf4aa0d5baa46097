use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{PlaylistSettings, TitleMode};
use crate::playlist::{self, Playlist, Track};

/// Command-line inputs split into directories to scan and single files.
#[derive(Debug, Default, PartialEq)]
pub struct Inputs {
    pub dirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

/// Sort the arguments; with none, the working directory is scanned.
pub fn classify_args<I: IntoIterator<Item = String>>(args: I) -> Inputs {
    let mut inputs = Inputs::default();
    for arg in args {
        let path = PathBuf::from(arg);
        if path.is_file() {
            inputs.files.push(path);
        } else {
            inputs.dirs.push(path);
        }
    }
    if inputs.dirs.is_empty() && inputs.files.is_empty() {
        inputs
            .dirs
            .push(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    }
    inputs
}

/// Build the initial playlist from `dirs`, titled per `settings.title_mode`.
pub fn build_playlist(dirs: &[PathBuf], settings: &PlaylistSettings) -> Playlist {
    let mut tracks = Vec::new();
    for dir in dirs {
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "not a directory, skipping");
            continue;
        }
        tracks.extend(playlist::scan(dir, settings));
    }

    let playlist = match settings.title_mode {
        TitleMode::Tagged => Playlist::new(tracks),
        TitleMode::Anonymous => Playlist::anonymous(tracks, &settings.label),
        TitleMode::Custom => Playlist::with_title(tracks, &settings.custom_title),
    };
    info!(tracks = playlist.len(), mode = ?settings.title_mode, "playlist ready");
    playlist
}

/// A track for a file given directly on the command line.
pub fn file_track(path: &Path) -> Track {
    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN");
    Track::new(title, path)
}
