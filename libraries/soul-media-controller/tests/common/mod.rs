//! Shared test doubles for the media controller tests

#![allow(dead_code)]

use soul_media_controller::{
    EventListener, ListenerId, MediaController, MediaControllerConfig, MediaControllerError,
    MediaElement, MediaErrorCode, MediaEventKind, MediaView, Result,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

/// Commands received by [`MockMedia`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Play,
    Pause,
    Unpause,
}

/// Scriptable media element
///
/// With `fire_on_command` set it behaves like a browser element: `play`
/// fires `play` + `playing`, `pause` fires `pause`.
pub struct MockMedia {
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub muted: bool,
    pub default_playback_rate: f64,
    pub playback_rate: f64,
    pub src: String,
    pub error: Option<MediaErrorCode>,
    pub fail_seeks: bool,
    pub fire_on_command: bool,

    pub calls: Vec<Call>,
    pub seeks: Vec<f64>,
    pub rate_writes: Vec<f64>,
    pub mute_writes: usize,
    pub listeners_added: usize,

    next_id: u64,
    listeners: Vec<(MediaEventKind, ListenerId, EventListener)>,
}

pub type SharedMock = Rc<RefCell<MockMedia>>;

impl MockMedia {
    pub fn new() -> Self {
        Self {
            current_time: 0.0,
            duration: f64::NAN,
            volume: 1.0,
            muted: false,
            default_playback_rate: 1.0,
            playback_rate: 1.0,
            src: String::new(),
            error: None,
            fail_seeks: false,
            fire_on_command: true,
            calls: Vec::new(),
            seeks: Vec::new(),
            rate_writes: Vec::new(),
            mute_writes: 0,
            listeners_added: 0,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn shared(self) -> SharedMock {
        Rc::new(RefCell::new(self))
    }

    /// Fire `kind` to every listener installed for it
    pub fn fire(&mut self, kind: MediaEventKind) {
        for (installed, _, listener) in &mut self.listeners {
            if *installed == kind {
                listener(kind);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listener_count_for(&self, kind: MediaEventKind) -> usize {
        self.listeners.iter().filter(|(k, _, _)| *k == kind).count()
    }
}

impl MediaElement for MockMedia {
    fn play(&mut self) {
        self.calls.push(Call::Play);
        if self.fire_on_command {
            self.fire(MediaEventKind::Play);
            self.fire(MediaEventKind::Playing);
        }
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
        if self.fire_on_command {
            self.fire(MediaEventKind::Pause);
        }
    }

    fn unpause(&mut self) {
        self.calls.push(Call::Unpause);
        if self.fire_on_command {
            self.fire(MediaEventKind::Play);
            self.fire(MediaEventKind::Playing);
        }
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, time: f64) -> Result<()> {
        if self.fail_seeks {
            return Err(MediaControllerError::Seek {
                position: time,
                reason: "not seekable".to_string(),
            });
        }
        self.seeks.push(time);
        self.current_time = time;
        Ok(())
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.mute_writes += 1;
        self.muted = muted;
    }

    fn default_playback_rate(&self) -> f64 {
        self.default_playback_rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate_writes.push(rate);
        self.playback_rate = rate;
    }

    fn src(&self) -> String {
        self.src.clone()
    }

    fn error(&self) -> Option<MediaErrorCode> {
        self.error
    }

    fn add_event_listener(&mut self, kind: MediaEventKind, listener: EventListener) -> ListenerId {
        self.next_id += 1;
        self.listeners_added += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((kind, id, listener));
        id
    }

    fn remove_event_listener(&mut self, kind: MediaEventKind, id: ListenerId) {
        self.listeners
            .retain(|(installed, existing, _)| !(*installed == kind && *existing == id));
    }
}

/// What the view has been told
#[derive(Debug, Default)]
pub struct ViewState {
    pub looping: bool,
    pub poster: Option<String>,
    pub poster_writes: usize,
}

pub struct MockView(pub Rc<RefCell<ViewState>>);

impl MediaView for MockView {
    fn set_loop(&mut self, looping: bool) {
        self.0.borrow_mut().looping = looping;
    }

    fn set_poster(&mut self, poster: Option<&str>) {
        let mut state = self.0.borrow_mut();
        state.poster = poster.map(str::to_string);
        state.poster_writes += 1;
    }
}

/// Controller bound to `media`
pub fn controller(media: &SharedMock, config: MediaControllerConfig) -> MediaController {
    MediaController::new(media.clone(), config)
}

/// Controller with autoplay off, already through `loadedmetadata`
pub fn loaded_controller(media: &SharedMock) -> MediaController {
    let mut controller = controller(media, MediaControllerConfig::default());
    media.borrow_mut().fire(MediaEventKind::LoadedMetadata);
    controller.process_events();
    controller.drain_events();
    controller
}

/// Controller that is currently playing
pub fn playing_controller(media: &SharedMock) -> MediaController {
    let mut controller = loaded_controller(media);
    controller.play();
    controller.process_events();
    controller.drain_events();
    controller
}

// ===== Log capture =====

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a debug-level subscriber and return everything it logged
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    (result, logs)
}
