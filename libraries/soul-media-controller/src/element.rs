//! Platform-agnostic media element traits
//!
//! Abstracts the playback primitive (browser `<audio>`/`<video>`, a native
//! player, a test double) and the UI element that displays it.

use crate::error::Result;
use crate::events::{MediaErrorCode, MediaEventKind};
use std::cell::RefCell;
use std::rc::Rc;

/// Callback installed on a media element for one event kind
pub type EventListener = Box<dyn FnMut(MediaEventKind)>;

/// Shared handle to a media element
///
/// The host keeps a clone to drive the element; the controller keeps one
/// to forward commands. Identity of the handle identifies the element.
pub type SharedMediaElement = Rc<RefCell<dyn MediaElement>>;

/// Handle returned by [`MediaElement::add_event_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The playback primitive wrapped by the controller
///
/// Times are in seconds. `volume` is in `0.0..=1.0`. `duration` is NaN
/// until metadata is known, mirroring `HTMLMediaElement`.
///
/// Implementations may invoke listeners synchronously from inside a
/// command (e.g. `pause` firing `pause`). Listeners installed by the
/// controller only enqueue, so this is safe.
pub trait MediaElement {
    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Resume playback without resetting the position
    fn unpause(&mut self);

    /// Current playback position
    fn current_time(&self) -> f64;

    /// Seek
    fn set_current_time(&mut self, time: f64) -> Result<()>;

    /// Total duration (NaN when unknown)
    fn duration(&self) -> f64;

    /// Volume in `0.0..=1.0`
    fn volume(&self) -> f64;

    fn set_volume(&mut self, volume: f64);

    fn muted(&self) -> bool;

    fn set_muted(&mut self, muted: bool);

    /// Rate the element considers normal speed
    fn default_playback_rate(&self) -> f64;

    fn set_playback_rate(&mut self, rate: f64);

    /// Current source URL (empty when none selected)
    fn src(&self) -> String;

    /// Most recent error, if any
    fn error(&self) -> Option<MediaErrorCode>;

    /// Install a listener for `kind`
    fn add_event_listener(&mut self, kind: MediaEventKind, listener: EventListener) -> ListenerId;

    /// Remove a listener previously installed for `kind`
    ///
    /// Unknown ids are ignored.
    fn remove_event_listener(&mut self, kind: MediaEventKind, id: ListenerId);
}

/// The UI element presenting the media
pub trait MediaView {
    /// Set or clear the `loop` attribute
    fn set_loop(&mut self, looping: bool);

    /// Set the poster image, or clear it with `None`
    fn set_poster(&mut self, poster: Option<&str>);
}
