//! Core types for the media controller

use serde::{Deserialize, Serialize};

/// Minimum position delta (seconds) between two accepted `timeupdate`
/// refreshes when throttling is enabled
pub const DEFAULT_TIME_UPDATE_THRESHOLD: f64 = 0.25;

/// Volume used when the caller writes an unset (or NaN) volume
pub const DEFAULT_VOLUME: f64 = 50.0;

/// Step applied by `volume_increase` / `volume_decrease`
pub const VOLUME_STEP: f64 = 10.0;

/// Playback rate applied by `fast_forward`
pub const FAST_FORWARD_RATE: f64 = 4.0;

/// Playback rate applied by `rewind`
pub const REWIND_RATE: f64 = -4.0;

/// Coarse playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// Media loaded, not playing, positioned at the start
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-media
    Paused,

    /// No metadata loaded yet
    #[default]
    Empty,
}

impl PlaybackStatus {
    /// Lowercase name, as shown to UI bindings
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Empty => "empty",
        }
    }
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a media controller
///
/// Every field has a default, so a partial document deserializes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaControllerConfig {
    /// Start playing as soon as metadata loads (default: false)
    pub autoplay: bool,

    /// Poster image applied by `show_poster` (default: none)
    pub poster_src: Option<String>,

    /// Throttle for `timeupdate` refreshes, in seconds (default: none)
    ///
    /// `None` refreshes the position on every `timeupdate` event.
    pub time_update_threshold: Option<f64>,
}
