//! Soul Player - Media Controller
//!
//! Observable playback state over a native audio/video element, for UI
//! bindings (play/pause buttons, scrubbers, volume sliders).
//!
//! This crate provides:
//! - Playback status state machine (Empty, Stopped, Playing, Paused)
//! - Position, duration, playback rate, repeat, volume and mute properties
//! - Translation of element events into status transitions
//! - State change notifications (callbacks and a drainable queue)
//! - Hot-swapping the wrapped element with exact listener teardown
//!
//! # Architecture
//!
//! The element itself is a black box behind [`MediaElement`]; the view
//! carrying `loop`/`poster` sits behind [`MediaView`]. A browser backend
//! over `web_sys::HtmlMediaElement` is available with the `wasm` feature.
//!
//! Everything runs on one thread. Element listeners only enqueue; call
//! [`MediaController::process_events`] from the host's event loop.
//!
//! # Example
//!
//! ```rust
//! use soul_media_controller::{
//!     EventListener, ListenerId, MediaController, MediaControllerConfig, MediaElement,
//!     MediaErrorCode, MediaEventKind, PlaybackStatus, Result,
//! };
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! // A silent element that reports a two-minute track
//! struct SilentElement {
//!     volume: f64,
//!     muted: bool,
//! }
//!
//! impl MediaElement for SilentElement {
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn unpause(&mut self) {}
//!     fn current_time(&self) -> f64 { 0.0 }
//!     fn set_current_time(&mut self, _time: f64) -> Result<()> { Ok(()) }
//!     fn duration(&self) -> f64 { 120.0 }
//!     fn volume(&self) -> f64 { self.volume }
//!     fn set_volume(&mut self, volume: f64) { self.volume = volume; }
//!     fn muted(&self) -> bool { self.muted }
//!     fn set_muted(&mut self, muted: bool) { self.muted = muted; }
//!     fn default_playback_rate(&self) -> f64 { 1.0 }
//!     fn set_playback_rate(&mut self, _rate: f64) {}
//!     fn src(&self) -> String { "track.ogg".to_string() }
//!     fn error(&self) -> Option<MediaErrorCode> { None }
//!     fn add_event_listener(&mut self, _kind: MediaEventKind, _listener: EventListener) -> ListenerId {
//!         ListenerId(0)
//!     }
//!     fn remove_event_listener(&mut self, _kind: MediaEventKind, _id: ListenerId) {}
//! }
//!
//! let element = Rc::new(RefCell::new(SilentElement { volume: 1.0, muted: false }));
//! let mut controller = MediaController::new(element, MediaControllerConfig::default());
//! assert_eq!(controller.status(), PlaybackStatus::Empty);
//!
//! // The host routes element events to the controller
//! controller.handle_event(MediaEventKind::LoadedMetadata);
//! assert_eq!(controller.status(), PlaybackStatus::Stopped);
//! assert_eq!(controller.duration(), Some(120.0));
//!
//! controller.set_volume(150.0);
//! assert_eq!(controller.volume(), 100.0);
//! ```

mod controller;
mod element;
mod error;
mod events;
mod subscriptions;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use controller::MediaController;
pub use element::{EventListener, ListenerId, MediaElement, MediaView, SharedMediaElement};
pub use error::{MediaControllerError, Result};
pub use events::{ControllerEvent, MediaErrorCode, MediaEventKind, StateChangeCause};
pub use types::{MediaControllerConfig, PlaybackStatus};
