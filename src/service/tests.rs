use std::time::Duration;

use super::sink::{open_source, resolve_duration};
use crate::error::PlayerError;
use crate::playlist::Track;

#[test]
fn open_source_reports_missing_file_as_invalid_path() {
    let track = Track::new("Gone", "/definitely/not/here.mp3");
    match open_source(&track) {
        Err(PlayerError::InvalidPath { path, .. }) => {
            assert_eq!(path, std::path::PathBuf::from("/definitely/not/here.mp3"));
        }
        other => panic!("expected InvalidPath, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn open_source_reports_undecodable_file_as_invalid_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.mp3");
    std::fs::write(&path, b"this is not audio").unwrap();

    let track = Track::new("Garbage", &path);
    assert!(matches!(
        open_source(&track),
        Err(PlayerError::InvalidPath { .. })
    ));
}

#[test]
fn resolve_duration_prefers_decoder_then_tags() {
    let a = Duration::from_secs(3);
    let b = Duration::from_secs(7);
    assert_eq!(resolve_duration(Some(a), Some(b)), a);
    assert_eq!(resolve_duration(None, Some(b)), b);
    assert_eq!(resolve_duration(None, None), Duration::ZERO);
}
