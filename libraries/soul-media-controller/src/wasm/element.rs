//! `HTMLMediaElement` bindings

use crate::{
    element::{EventListener, ListenerId, MediaElement, MediaView, SharedMediaElement},
    error::{MediaControllerError, Result},
    events::{MediaErrorCode, MediaEventKind},
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Event, HtmlMediaElement, HtmlVideoElement};

type DomListener = Closure<dyn FnMut(Event)>;
type RejectionHandler = Closure<dyn FnMut(JsValue)>;

/// A DOM media element driven by the controller
///
/// Keeps every installed DOM closure alive until it is removed (or the
/// wrapper is dropped).
pub struct WebMediaElement {
    element: HtmlMediaElement,
    next_id: u64,
    listeners: HashMap<ListenerId, (MediaEventKind, DomListener)>,
    /// Shared by every `play()` promise; must outlive pending promises
    play_rejected: RejectionHandler,
}

impl WebMediaElement {
    pub fn new(element: HtmlMediaElement) -> Self {
        let play_rejected = Closure::wrap(Box::new(|reason: JsValue| {
            tracing::warn!("HTMLMediaElement.play() was rejected: {:?}", reason);
        }) as Box<dyn FnMut(JsValue)>);

        Self {
            element,
            next_id: 0,
            listeners: HashMap::new(),
            play_rejected,
        }
    }

    /// Wrap into the shared handle the controller binds to
    pub fn into_shared(self) -> SharedMediaElement {
        Rc::new(RefCell::new(self))
    }

    pub fn element(&self) -> &HtmlMediaElement {
        &self.element
    }

    fn detach(&self, kind: MediaEventKind, listener: &DomListener) {
        if let Err(e) = self
            .element
            .remove_event_listener_with_callback(kind.name(), listener.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to remove {} listener: {:?}", kind.name(), e);
        }
    }
}

impl MediaElement for WebMediaElement {
    fn play(&mut self) {
        // A blocked autoplay fires no media event, only rejects the promise
        match self.element.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.play_rejected);
            }
            Err(e) => tracing::error!("HTMLMediaElement.play() threw: {:?}", e),
        }
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            tracing::error!("HTMLMediaElement.pause() threw: {:?}", e);
        }
    }

    fn unpause(&mut self) {
        self.play();
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&mut self, time: f64) -> Result<()> {
        if !time.is_finite() {
            return Err(MediaControllerError::InvalidTime(time));
        }
        self.element.set_current_time(time);
        Ok(())
    }

    fn duration(&self) -> f64 {
        self.element.duration()
    }

    fn volume(&self) -> f64 {
        self.element.volume()
    }

    fn set_volume(&mut self, volume: f64) {
        self.element.set_volume(volume);
    }

    fn muted(&self) -> bool {
        self.element.muted()
    }

    fn set_muted(&mut self, muted: bool) {
        self.element.set_muted(muted);
    }

    fn default_playback_rate(&self) -> f64 {
        self.element.default_playback_rate()
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.element.set_playback_rate(rate);
    }

    fn src(&self) -> String {
        self.element.src()
    }

    fn error(&self) -> Option<MediaErrorCode> {
        self.element
            .error()
            .map(|error| MediaErrorCode::from_code(error.code()))
    }

    fn add_event_listener(&mut self, kind: MediaEventKind, listener: EventListener) -> ListenerId {
        let mut listener = listener;
        let closure: DomListener =
            Closure::wrap(Box::new(move |_event: Event| listener(kind)) as Box<dyn FnMut(Event)>);

        if let Err(e) = self
            .element
            .add_event_listener_with_callback(kind.name(), closure.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to add {} listener: {:?}", kind.name(), e);
        }

        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.insert(id, (kind, closure));
        id
    }

    fn remove_event_listener(&mut self, kind: MediaEventKind, id: ListenerId) {
        if let Some((installed, closure)) = self.listeners.remove(&id) {
            debug_assert_eq!(installed, kind);
            self.detach(installed, &closure);
        }
    }
}

impl Drop for WebMediaElement {
    fn drop(&mut self) {
        for (kind, closure) in self.listeners.values() {
            self.detach(*kind, closure);
        }
    }
}

/// The DOM element presenting the media
///
/// `poster` only exists on `<video>`; on `<audio>` it is ignored.
pub struct WebMediaView {
    element: HtmlMediaElement,
}

impl WebMediaView {
    pub fn new(element: HtmlMediaElement) -> Self {
        Self { element }
    }
}

impl MediaView for WebMediaView {
    fn set_loop(&mut self, looping: bool) {
        self.element.set_loop(looping);
    }

    fn set_poster(&mut self, poster: Option<&str>) {
        let Some(video) = self.element.dyn_ref::<HtmlVideoElement>() else {
            tracing::debug!("Poster ignored: element is not a <video>");
            return;
        };
        match poster {
            Some(src) => video.set_poster(src),
            None => {
                if let Err(e) = video.remove_attribute("poster") {
                    tracing::warn!("Failed to clear poster: {:?}", e);
                }
            }
        }
    }
}
