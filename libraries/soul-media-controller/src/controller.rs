//! Media controller - playback state over a media element
//!
//! Tracks status, position, duration, volume, mute, repeat and playback
//! rate, forwards commands to the element, and turns element events into
//! status transitions plus state change notifications.

use crate::{
    element::{MediaView, SharedMediaElement},
    events::{ControllerEvent, MediaErrorCode, MediaEventKind, StateChangeCause},
    subscriptions::Subscriptions,
    types::{
        MediaControllerConfig, PlaybackStatus, DEFAULT_VOLUME, FAST_FORWARD_RATE, REWIND_RATE,
        VOLUME_STEP,
    },
};
use std::rc::Rc;
use tracing::{debug, error, warn, Span};

type StateObserver = Box<dyn FnMut(&ControllerEvent)>;

/// Observable controller over a single media element
///
/// Status transitions:
/// - `Empty -> Stopped`: metadata loaded without autoplay
/// - `-> Playing`: element fires `play` or `playing`
/// - `Playing -> Paused`: element fires `pause` (ignored while `Stopped`)
/// - `-> Stopped`: `stop()`, or element fires `ended`, `abort`, `emptied`, `error`
///
/// Commands never set `Playing`/`Paused` directly; the element's events do.
pub struct MediaController {
    media: SharedMediaElement,
    view: Option<Box<dyn MediaView>>,
    config: MediaControllerConfig,
    span: Span,
    subscriptions: Subscriptions,

    status: PlaybackStatus,
    position: f64,
    duration: Option<f64>,
    playback_rate: f64,
    repeat: bool,
    last_time_update: f64,
    last_error: Option<MediaErrorCode>,

    observers: Vec<StateObserver>,
    pending_events: Vec<ControllerEvent>,
}

impl MediaController {
    /// Create a controller bound to `media`
    ///
    /// Subscribes to every [`MediaEventKind`] on the element.
    pub fn new(media: SharedMediaElement, config: MediaControllerConfig) -> Self {
        let mut subscriptions = Subscriptions::new();
        subscriptions.install(&mut *media.borrow_mut());

        Self {
            media,
            view: None,
            config,
            span: tracing::debug_span!("media_controller"),
            subscriptions,
            status: PlaybackStatus::Empty,
            position: 0.0,
            duration: None,
            playback_rate: 1.0,
            repeat: false,
            last_time_update: 0.0,
            last_error: None,
            observers: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    /// Log under `span` instead of the default `media_controller` span
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Attach the UI element that carries `loop` and `poster`
    #[must_use]
    pub fn with_view(mut self, view: Box<dyn MediaView>) -> Self {
        self.set_view(view);
        self
    }

    pub fn set_view(&mut self, view: Box<dyn MediaView>) {
        self.view = Some(view);
    }

    // ===== Element Binding =====

    /// The bound media element
    pub fn media(&self) -> &SharedMediaElement {
        &self.media
    }

    /// Bind a different media element
    ///
    /// Listeners are removed from the old element and installed on the new
    /// one. Events queued by the old element are discarded. Binding the
    /// element that is already bound does nothing.
    pub fn set_media(&mut self, media: SharedMediaElement) {
        if same_element(&self.media, &media) {
            return;
        }

        self.subscriptions.remove(&mut *self.media.borrow_mut());
        self.media = media;
        self.subscriptions.install(&mut *self.media.borrow_mut());
        self.last_time_update = 0.0;

        debug!(parent: &self.span, src = %self.media.borrow().src(), "Bound new media element");
    }

    /// Number of listeners installed on the bound element
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    // ===== Status & Attributes =====

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if status == self.status {
            return;
        }
        debug!(parent: &self.span, from = %self.status, to = %status, "Status changed");
        self.status = status;
        self.notify(StateChangeCause::Status);
    }

    /// Last known playback position in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Move to `time` and seek the element there
    pub fn set_position(&mut self, time: f64) {
        self.position = time;
        self.set_current_time(time);
    }

    /// Record `time` as the position without seeking the element
    ///
    /// Used when the element itself reported the time.
    pub fn sync_position(&mut self, time: f64) {
        self.position = time;
    }

    /// Media duration in seconds, once known
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Record the media duration; NaN is rejected
    pub fn set_duration(&mut self, time: f64) {
        if time.is_nan() {
            debug!(parent: &self.span, "Rejected duration: not a number");
            return;
        }
        debug!(parent: &self.span, duration = time, "Duration set");
        self.duration = Some(time);
    }

    /// Element's current time in seconds
    pub fn current_time(&self) -> f64 {
        self.media.borrow().current_time()
    }

    /// Seek the element
    ///
    /// Dropped (with an error log) while the element's duration is unknown.
    /// Seek failures are logged, never returned.
    pub fn set_current_time(&mut self, time: f64) {
        let (duration, current) = {
            let media = self.media.borrow();
            (media.duration(), media.current_time())
        };
        if duration.is_nan() {
            error!(parent: &self.span, "Cannot set current time: duration is not valid");
            return;
        }

        debug!(parent: &self.span, current, new = time, "Seeking");
        let result = self.media.borrow_mut().set_current_time(time);
        if let Err(e) = result {
            error!(parent: &self.span, current, "Seek failed: {}", e);
        }
    }

    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    /// Set the playback rate, forwarding it to the element when it changes
    pub fn set_playback_rate(&mut self, rate: f64) {
        if self.playback_rate != rate {
            self.playback_rate = rate;
            self.media.borrow_mut().set_playback_rate(rate);
        }
    }

    /// Most recent error reported by the element since metadata last loaded
    pub fn last_error(&self) -> Option<MediaErrorCode> {
        self.last_error
    }

    // ===== Configuration =====

    pub fn config(&self) -> &MediaControllerConfig {
        &self.config
    }

    pub fn autoplay(&self) -> bool {
        self.config.autoplay
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.config.autoplay = autoplay;
    }

    pub fn poster_src(&self) -> Option<&str> {
        self.config.poster_src.as_deref()
    }

    pub fn set_poster_src(&mut self, poster_src: Option<String>) {
        self.config.poster_src = poster_src;
    }

    // ===== Playback Commands =====

    /// Restart playback from the beginning
    ///
    /// Status follows once the element fires `play`/`playing`.
    pub fn play(&mut self) {
        debug!(parent: &self.span, "play()");
        let result = self.media.borrow_mut().set_current_time(0.0);
        if let Err(e) = result {
            error!(parent: &self.span, "Failed to rewind before play: {}", e);
        }
        self.media.borrow_mut().play();
    }

    pub fn pause(&mut self) {
        debug!(parent: &self.span, "pause()");
        self.media.borrow_mut().pause();
    }

    /// Resume from the current position
    pub fn unpause(&mut self) {
        debug!(parent: &self.span, "unpause()");
        self.media.borrow_mut().unpause();
    }

    /// Pause when playing, play otherwise
    ///
    /// Returns `true` when the call starts playback. The playback rate is
    /// reset to the element's default rate either way.
    pub fn play_pause(&mut self) -> bool {
        let playing = self.is_playing();
        debug!(parent: &self.span, playing, "play_pause()");

        let rate = self.media.borrow().default_playback_rate();
        self.set_playback_rate(rate);

        if playing {
            self.pause();
        } else {
            self.play();
        }
        !playing
    }

    /// Play backwards at 4x; only while playing
    pub fn rewind(&mut self) {
        if self.is_playing() {
            debug!(parent: &self.span, "rewind()");
            self.set_playback_rate(REWIND_RATE);
        }
    }

    /// Play forwards at 4x; only while playing
    pub fn fast_forward(&mut self) {
        if self.is_playing() {
            debug!(parent: &self.span, "fast_forward()");
            self.set_playback_rate(FAST_FORWARD_RATE);
        }
    }

    /// Stop playback and return to the start
    pub fn stop(&mut self) {
        debug!(parent: &self.span, "stop()");
        if self.is_playing() {
            debug!(parent: &self.span, "Stopping while playing: pausing first");
            self.pause();
        }
        self.set_status(PlaybackStatus::Stopped);
        self.last_time_update = 0.0;
        self.set_position(0.0);
    }

    /// Stop unless already stopped
    pub fn reset(&mut self) {
        debug!(parent: &self.span, "reset()");
        if self.status != PlaybackStatus::Stopped {
            self.stop();
        }
    }

    /// Apply the configured poster, or clear it
    pub fn show_poster(&mut self) {
        match self.view.as_mut() {
            Some(view) => view.set_poster(self.config.poster_src.as_deref()),
            None => debug!(parent: &self.span, "show_poster(): no view attached"),
        }
    }

    // ===== Repeat =====

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// Set the repeat flag, mirroring it to the view's `loop` attribute
    pub fn set_repeat(&mut self, repeat: bool) {
        if repeat == self.repeat {
            return;
        }
        self.repeat = repeat;
        if let Some(view) = self.view.as_mut() {
            view.set_loop(repeat);
        }
        self.notify(StateChangeCause::Repeat);
    }

    pub fn toggle_repeat(&mut self) {
        self.set_repeat(!self.repeat);
    }

    // ===== Volume =====

    /// Volume in `0..=100`
    pub fn volume(&self) -> f64 {
        self.media.borrow().volume() * 100.0
    }

    /// Set the volume in `0..=100`
    ///
    /// Out-of-range values are clamped. `None` and NaN fall back to 50.
    /// Always notifies, even when the value is unchanged.
    pub fn set_volume(&mut self, volume: impl Into<Option<f64>>) {
        let volume = match volume.into() {
            Some(v) if !v.is_nan() => v.clamp(0.0, 100.0),
            _ => DEFAULT_VOLUME,
        };
        self.media.borrow_mut().set_volume(volume / 100.0);
        self.notify(StateChangeCause::Volume);
    }

    pub fn volume_increase(&mut self) {
        self.set_volume(self.volume() + VOLUME_STEP);
    }

    pub fn volume_decrease(&mut self) {
        self.set_volume(self.volume() - VOLUME_STEP);
    }

    pub fn muted(&self) -> bool {
        self.media.borrow().muted()
    }

    pub fn set_muted(&mut self, muted: bool) {
        if muted != self.muted() {
            self.media.borrow_mut().set_muted(muted);
        }
    }

    pub fn toggle_mute(&mut self) {
        let muted = self.muted();
        self.set_muted(!muted);
    }

    // ===== Element Events =====

    /// Run the handlers for every event the bound element has fired
    ///
    /// Returns the number of events handled.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(kind) = self.subscriptions.next_event() {
            self.handle_event(kind);
            handled += 1;
        }
        handled
    }

    /// Whether the element has fired events not yet processed
    pub fn has_queued_media_events(&self) -> bool {
        self.subscriptions.queued() > 0
    }

    /// Handle one element event directly
    ///
    /// For hosts that route element events themselves instead of relying
    /// on the installed listeners.
    pub fn handle_event(&mut self, kind: MediaEventKind) {
        match kind {
            MediaEventKind::LoadedMetadata => self.on_loaded_metadata(),
            MediaEventKind::TimeUpdate => self.on_time_update(),
            MediaEventKind::Play | MediaEventKind::Playing => {
                debug!(parent: &self.span, event = kind.name(), "Element is playing");
                self.set_status(PlaybackStatus::Playing);
            }
            MediaEventKind::Pause => self.on_pause(),
            MediaEventKind::Ended => self.on_ended(),
            MediaEventKind::Abort | MediaEventKind::Emptied => {
                debug!(parent: &self.span, event = kind.name(), "Element stopped");
                self.set_status(PlaybackStatus::Stopped);
            }
            MediaEventKind::Error => self.on_error(),
        }
    }

    fn on_loaded_metadata(&mut self) {
        let duration = self.media.borrow().duration();
        debug!(
            parent: &self.span,
            playing = self.is_playing(),
            duration,
            "loadedmetadata"
        );
        if duration.is_nan() {
            debug!(parent: &self.span, "loadedmetadata: duration is not valid");
            return;
        }

        self.last_error = None;
        self.last_time_update = 0.0;
        self.set_duration(duration);
        if self.config.autoplay {
            debug!(parent: &self.span, "loadedmetadata: autoplay");
            self.play();
        } else {
            self.set_status(PlaybackStatus::Stopped);
        }
    }

    fn on_time_update(&mut self) {
        // A trailing timeupdate after stop() would restore the old position
        if self.status == PlaybackStatus::Stopped {
            return;
        }

        let current = self.media.borrow().current_time();
        if let Some(threshold) = self.config.time_update_threshold {
            if (self.last_time_update - current).abs() < threshold {
                return;
            }
            self.last_time_update = current;
        }
        self.sync_position(current);
    }

    fn on_pause(&mut self) {
        if self.status == PlaybackStatus::Stopped {
            debug!(parent: &self.span, "pause event while stopped: ignored");
            return;
        }
        self.set_status(PlaybackStatus::Paused);
    }

    fn on_ended(&mut self) {
        debug!(parent: &self.span, "ended");
        // The element only fires `play` again once it is paused
        self.media.borrow_mut().pause();
        self.set_status(PlaybackStatus::Stopped);
    }

    fn on_error(&mut self) {
        let (code, src) = {
            let media = self.media.borrow();
            (media.error(), media.src())
        };
        self.set_status(PlaybackStatus::Stopped);

        if let Some(code) = code {
            error!(parent: &self.span, ?code, "{}", code.message(&src));
            self.last_error = Some(code);
        }
    }

    // ===== Notifications =====

    /// Register a callback for state change notifications
    ///
    /// Once an observer is registered, notifications are delivered to the
    /// observers only and no longer queued for [`drain_events`](Self::drain_events).
    pub fn on_state_change(&mut self, observer: impl FnMut(&ControllerEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Take the notifications emitted since the last drain
    ///
    /// Only filled while no observer is registered.
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn notify(&mut self, cause: StateChangeCause) {
        let event = ControllerEvent::StateChanged { cause };
        if self.observers.is_empty() {
            self.pending_events.push(event);
            return;
        }
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}

impl Drop for MediaController {
    fn drop(&mut self) {
        match self.media.try_borrow_mut() {
            Ok(mut media) => self.subscriptions.remove(&mut *media),
            Err(_) => warn!(
                parent: &self.span,
                listeners = self.subscriptions.len(),
                "Media element busy during drop: listeners left installed"
            ),
        }
    }
}

fn same_element(a: &SharedMediaElement, b: &SharedMediaElement) -> bool {
    std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
}
