use std::time::Duration;

use super::*;
use crate::error::PlayerError;
use crate::playlist::{Playlist, Track, TrackId};
use crate::testing::{Call, FakeNotifier, FakeService, Notice, playlist_of};

type Controller = PlaybackController<FakeService, FakeNotifier>;

fn bound(titles: &[&str]) -> (Controller, std::rc::Rc<std::cell::RefCell<Vec<Call>>>) {
    let (notifier, _) = FakeNotifier::recording();
    let mut c = Controller::new(playlist_of(titles), notifier);
    let (service, calls) = FakeService::recording();
    c.bind(service).unwrap();
    (c, calls)
}

fn track(c: &Controller, i: usize) -> Track {
    c.playlist().get(i).cloned().unwrap()
}

fn current_title(c: &Controller) -> Option<&str> {
    c.current_track().map(|t| t.title.as_str())
}

#[test]
fn play_on_empty_playlist_fails() {
    let (mut c, calls) = bound(&[]);
    let err = c.play(&Track::new("A", "/a.mp3")).unwrap_err();
    assert_eq!(err, PlayerError::EmptyPlaylist);
    assert!(calls.borrow().is_empty());
    assert!(!c.is_playing());
}

#[test]
fn play_sets_flags_and_index_by_identity() {
    let (mut c, calls) = bound(&["A", "B", "C"]);
    let b = track(&c, 1);

    assert_eq!(c.play(&b), Ok(Dispatch::Started));
    assert_eq!(c.current_index(), 1);
    assert!(c.is_playing());
    assert!(!c.is_paused());
    assert_eq!(*calls.borrow(), vec![Call::Play("B".into())]);
}

#[test]
fn next_on_last_index_wraps_to_first() {
    let (mut c, calls) = bound(&["A", "B", "C"]);
    let last = track(&c, 2);
    c.play(&last).unwrap();
    calls.borrow_mut().clear();

    c.next().unwrap();
    assert_eq!(c.current_index(), 0);
    assert_eq!(current_title(&c), Some("A"));
    assert_eq!(*calls.borrow(), vec![Call::Stop, Call::Play("A".into())]);
}

#[test]
fn previous_on_first_index_wraps_to_last() {
    let (mut c, _) = bound(&["A", "B", "C"]);
    let first = track(&c, 0);
    c.play(&first).unwrap();

    c.previous().unwrap();
    assert_eq!(c.current_index(), 2);
    assert_eq!(current_title(&c), Some("C"));
}

#[test]
fn next_and_previous_step_through_neighbors() {
    let (mut c, _) = bound(&["A", "B", "C"]);
    let first = track(&c, 0);
    c.play(&first).unwrap();

    c.next().unwrap();
    assert_eq!(current_title(&c), Some("B"));
    c.next().unwrap();
    assert_eq!(current_title(&c), Some("C"));
    c.previous().unwrap();
    assert_eq!(current_title(&c), Some("B"));
    assert!(c.is_playing());
}

#[test]
fn next_without_current_starts_first_track() {
    let (mut c, _) = bound(&["A", "B"]);
    c.next().unwrap();
    assert_eq!(current_title(&c), Some("A"));
}

#[test]
fn next_and_previous_on_empty_playlist_fail() {
    let (mut c, _) = bound(&[]);
    assert_eq!(c.next(), Err(PlayerError::EmptyPlaylist));
    assert_eq!(c.previous(), Err(PlayerError::EmptyPlaylist));
}

#[test]
fn play_before_bind_defers_exactly_one_play() {
    let (notifier, _) = FakeNotifier::recording();
    let mut c = Controller::new(playlist_of(&["A", "B"]), notifier);
    let a = track(&c, 0);
    let b = track(&c, 1);

    assert_eq!(c.play(&a), Ok(Dispatch::Deferred));
    // A later request replaces the parked one.
    assert_eq!(c.play(&b), Ok(Dispatch::Deferred));
    assert!(c.has_pending());
    assert!(!c.is_playing());

    let (service, calls) = FakeService::recording();
    c.bind(service).unwrap();

    assert!(!c.has_pending());
    assert_eq!(*calls.borrow(), vec![Call::Play("B".into())]);
    assert_eq!(current_title(&c), Some("B"));
    assert!(c.is_playing());
}

#[test]
fn bind_without_pending_plays_nothing() {
    let (_, calls) = bound(&["A"]);
    assert!(calls.borrow().is_empty());
}

#[test]
fn pause_then_resume_restores_flags_and_keeps_track() {
    let (mut c, calls) = bound(&["A", "B"]);
    let b = track(&c, 1);
    c.play(&b).unwrap();

    c.pause();
    assert!(!c.is_playing());
    assert!(c.is_paused());
    assert_eq!(c.state().status(), PlaybackStatus::Paused);

    c.resume().unwrap();
    assert!(c.is_playing());
    assert!(!c.is_paused());
    assert_eq!(current_title(&c), Some("B"));
    assert_eq!(c.current_index(), 1);
    assert_eq!(
        *calls.borrow(),
        vec![Call::Play("B".into()), Call::Pause, Call::Play("B".into())]
    );
}

#[test]
fn resume_without_current_starts_first_and_fails_when_empty() {
    let (mut c, _) = bound(&["A", "B"]);
    c.resume().unwrap();
    assert_eq!(current_title(&c), Some("A"));

    let (mut empty, _) = bound(&[]);
    assert_eq!(empty.resume(), Err(PlayerError::EmptyPlaylist));
}

#[test]
fn seek_forwards_only_when_bound() {
    let (notifier, _) = FakeNotifier::recording();
    let mut c = Controller::new(playlist_of(&["A"]), notifier);
    c.seek(Duration::from_secs(3));

    let (service, calls) = FakeService::recording();
    c.bind(service).unwrap();
    c.seek(Duration::from_secs(4));
    assert_eq!(*calls.borrow(), vec![Call::SeekTo(Duration::from_secs(4))]);
}

#[test]
fn removing_only_track_stops_and_clears() {
    let (mut c, calls) = bound(&["A"]);
    let a = track(&c, 0);
    c.play(&a).unwrap();

    assert_eq!(c.remove_track(a.id), Removal::ResetDisplay);
    assert!(c.playlist().is_empty());
    assert!(c.current_track().is_none());
    assert!(!c.is_playing());
    assert!(!c.is_paused());
    assert_eq!(calls.borrow().last(), Some(&Call::Stop));
}

#[test]
fn removing_playing_track_pauses_and_other_tracks_do_not() {
    let (mut c, calls) = bound(&["A", "B", "C"]);
    let b = track(&c, 1);
    let c_track = track(&c, 2);
    c.play(&b).unwrap();

    assert_eq!(c.remove_track(c_track.id), Removal::Removed);
    assert!(c.is_playing());
    assert_eq!(c.current_index(), 1);

    assert_eq!(c.remove_track(b.id), Removal::ResetDisplay);
    assert!(c.is_paused());
    assert_eq!(calls.borrow().last(), Some(&Call::Pause));
    assert_eq!(c.remove_track(TrackId(99)), Removal::NotFound);
}

#[test]
fn removal_before_current_shifts_index() {
    let (mut c, _) = bound(&["A", "B", "C"]);
    let a = track(&c, 0);
    let cc = track(&c, 2);
    c.play(&cc).unwrap();

    c.remove_track(a.id);
    assert_eq!(c.current_index(), 1);
    assert_eq!(current_title(&c), Some("C"));
}

#[test]
fn example_playlist_next_from_c_plays_a() {
    let (mut c, _) = bound(&["A", "B", "C"]);
    let cc = track(&c, 2);
    c.play(&cc).unwrap();
    assert_eq!(c.current_index(), 2);

    c.next().unwrap();
    assert_eq!(current_title(&c), Some("A"));
    assert_eq!(c.current_index(), 0);
}

#[test]
fn notification_is_created_once_and_refreshed_on_changes() {
    let (notifier, notices) = FakeNotifier::recording();
    let mut c = Controller::new(playlist_of(&["A", "B"]), notifier);
    let (service, _) = FakeService::recording();
    c.bind(service).unwrap();

    let a = track(&c, 0);
    c.play(&a).unwrap();
    c.next().unwrap();
    c.pause();

    assert_eq!(
        *notices.borrow(),
        vec![
            Notice::Create("A".into()),
            Notice::Update(PlaybackStatus::Playing, Some("A".into())),
            Notice::Update(PlaybackStatus::Playing, Some("B".into())),
            Notice::Update(PlaybackStatus::Paused, Some("B".into())),
        ]
    );
}

#[test]
fn unbind_clears_both_flags_and_kill_tears_down() {
    let (notifier, notices) = FakeNotifier::recording();
    let mut c = Controller::new(playlist_of(&["A"]), notifier);
    let (service, calls) = FakeService::recording();
    c.bind(service).unwrap();
    let a = track(&c, 0);
    c.play(&a).unwrap();

    c.kill();
    assert!(!c.is_bound());
    assert!(!c.is_playing());
    assert_eq!(
        calls.borrow()[calls.borrow().len() - 2..],
        [Call::Stop, Call::Destroy]
    );
    assert_eq!(notices.borrow().last(), Some(&Notice::Destroy));

    let (service, _) = FakeService::recording();
    c.bind(service).unwrap();
    c.play(&a).unwrap();
    c.unbind();
    assert!(!c.is_playing());
    assert!(!c.is_paused());
    assert_eq!(c.state().status(), PlaybackStatus::Stopped);
}

#[test]
fn add_track_extends_playlist_used_by_next() {
    let (notifier, _) = FakeNotifier::recording();
    let mut c = Controller::new(Playlist::default(), notifier);
    let (service, _) = FakeService::recording();
    c.bind(service).unwrap();

    c.add_track(Track::new("A", "/a.mp3"));
    c.add_track(Track::new("B", "/b.mp3"));
    c.next().unwrap();
    c.next().unwrap();
    assert_eq!(current_title(&c), Some("B"));
}

#[test]
fn explicit_notification_calls_need_a_current_track() {
    let (notifier, notices) = FakeNotifier::recording();
    let mut c = Controller::new(playlist_of(&["A"]), notifier);
    c.create_notification();
    assert!(notices.borrow().is_empty());

    let (service, _) = FakeService::recording();
    c.bind(service).unwrap();
    let a = track(&c, 0);
    c.play(&a).unwrap();
    notices.borrow_mut().clear();

    c.create_notification();
    c.update_notification();
    assert_eq!(
        *notices.borrow(),
        vec![
            Notice::Create("A".into()),
            Notice::Update(PlaybackStatus::Playing, Some("A".into())),
            Notice::Update(PlaybackStatus::Playing, Some("A".into())),
        ]
    );
}

#[test]
fn pause_with_nothing_playing_changes_nothing() {
    let (notifier, notices) = FakeNotifier::recording();
    let mut c = Controller::new(playlist_of(&["A"]), notifier);

    c.pause();
    assert!(!c.is_paused());
    assert!(!c.is_playing());
    assert_eq!(c.state().status(), PlaybackStatus::Stopped);
    assert!(notices.borrow().is_empty());

    let (service, calls) = FakeService::recording();
    c.bind(service).unwrap();
    c.pause();
    assert!(!c.is_paused());
    assert!(calls.borrow().is_empty());
}

#[test]
fn pausing_twice_only_reaches_the_service_once() {
    let (mut c, calls) = bound(&["A"]);
    let a = track(&c, 0);
    c.play(&a).unwrap();

    c.pause();
    c.pause();
    assert!(c.is_paused());
    assert_eq!(*calls.borrow(), vec![Call::Play("A".into()), Call::Pause]);
}

#[test]
fn bind_reports_whether_a_deferred_play_ran() {
    let (notifier, _) = FakeNotifier::recording();
    let mut c = Controller::new(playlist_of(&["A"]), notifier);
    let (service, _) = FakeService::recording();
    assert_eq!(c.bind(service), Ok(None));

    let (notifier, _) = FakeNotifier::recording();
    let mut c = Controller::new(playlist_of(&["A"]), notifier);
    let a = track(&c, 0);
    c.play(&a).unwrap();
    let (service, _) = FakeService::recording();
    assert_eq!(c.bind(service), Ok(Some(Dispatch::Started)));
}
