//! Recording fakes for the service and notification seams.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::controller::PlaybackStatus;
use crate::notification::Notifier;
use crate::playlist::{Playlist, Track};
use crate::service::MediaService;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Play(String),
    Pause,
    Stop,
    SeekTo(Duration),
    Destroy,
}

/// A service that records calls into a log shared with the test.
#[derive(Default)]
pub struct FakeService {
    pub calls: Rc<RefCell<Vec<Call>>>,
    current: Option<Track>,
}

impl FakeService {
    pub fn recording() -> (Self, Rc<RefCell<Vec<Call>>>) {
        let service = Self::default();
        let calls = service.calls.clone();
        (service, calls)
    }
}

impl MediaService for FakeService {
    fn play(&mut self, track: &Track) {
        self.current = Some(track.clone());
        self.calls.borrow_mut().push(Call::Play(track.title.clone()));
    }

    fn pause(&mut self) {
        self.calls.borrow_mut().push(Call::Pause);
    }

    fn stop(&mut self) {
        self.current = None;
        self.calls.borrow_mut().push(Call::Stop);
    }

    fn seek_to(&mut self, position: Duration) {
        self.calls.borrow_mut().push(Call::SeekTo(position));
    }

    fn current_track(&self) -> Option<Track> {
        self.current.clone()
    }

    fn destroy(&mut self) {
        self.calls.borrow_mut().push(Call::Destroy);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Create(String),
    Update(PlaybackStatus, Option<String>),
    Destroy,
}

#[derive(Default)]
pub struct FakeNotifier {
    pub notices: Rc<RefCell<Vec<Notice>>>,
}

impl FakeNotifier {
    pub fn recording() -> (Self, Rc<RefCell<Vec<Notice>>>) {
        let notifier = Self::default();
        let notices = notifier.notices.clone();
        (notifier, notices)
    }
}

impl Notifier for FakeNotifier {
    fn create(&mut self, title: &str) {
        self.notices.borrow_mut().push(Notice::Create(title.to_string()));
    }

    fn update(&mut self, status: PlaybackStatus, track: Option<&Track>) {
        self.notices
            .borrow_mut()
            .push(Notice::Update(status, track.map(|t| t.title.clone())));
    }

    fn destroy(&mut self) {
        self.notices.borrow_mut().push(Notice::Destroy);
    }
}

pub fn playlist_of(titles: &[&str]) -> Playlist {
    Playlist::new(
        titles
            .iter()
            .map(|t| Track::new(*t, format!("/music/{t}.mp3")))
            .collect(),
    )
}
