//! Media events
//!
//! Two directions:
//! - [`MediaEventKind`]: events fired by the wrapped media element
//! - [`ControllerEvent`]: notifications the controller emits for UI bindings

use serde::{Deserialize, Serialize};

/// Events the controller subscribes to on the media element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaEventKind {
    /// Duration and dimensions are known
    LoadedMetadata,
    /// Current time advanced (periodic)
    TimeUpdate,
    /// Playback was requested
    Play,
    /// Playback actually started or resumed
    Playing,
    /// Playback paused
    Pause,
    /// Loading was aborted
    Abort,
    /// Loading or playback failed; detail is on the element
    Error,
    /// The element was reset to the empty state
    Emptied,
    /// Playback reached the end
    Ended,
}

impl MediaEventKind {
    /// Every kind the controller listens for, in subscription order
    pub const ALL: [MediaEventKind; 9] = [
        MediaEventKind::LoadedMetadata,
        MediaEventKind::TimeUpdate,
        MediaEventKind::Play,
        MediaEventKind::Playing,
        MediaEventKind::Pause,
        MediaEventKind::Abort,
        MediaEventKind::Error,
        MediaEventKind::Emptied,
        MediaEventKind::Ended,
    ];

    /// DOM event name
    pub fn name(self) -> &'static str {
        match self {
            Self::LoadedMetadata => "loadedmetadata",
            Self::TimeUpdate => "timeupdate",
            Self::Play => "play",
            Self::Playing => "playing",
            Self::Pause => "pause",
            Self::Abort => "abort",
            Self::Error => "error",
            Self::Emptied => "emptied",
            Self::Ended => "ended",
        }
    }
}

/// Error reported by the media element, classified by code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaErrorCode {
    /// Fetching was aborted at the user's request (code 1)
    Aborted,
    /// Network failure while fetching (code 2)
    Network,
    /// Decoding failed (code 3)
    Decode,
    /// Source missing or its format is not supported (code 4)
    SrcNotSupported,
    /// Any other code
    Unknown(u16),
}

impl MediaErrorCode {
    /// Classify a raw `MediaError.code`
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::Aborted,
            2 => Self::Network,
            3 => Self::Decode,
            4 => Self::SrcNotSupported,
            other => Self::Unknown(other),
        }
    }

    /// Human-readable description
    ///
    /// `src` is the element's current source; an unsupported-source error
    /// with an empty `src` means nothing was selected.
    pub fn message(self, src: &str) -> String {
        match self {
            Self::Aborted => "Media playback was aborted by the user".to_string(),
            Self::Network => "A network error interrupted the media download".to_string(),
            Self::Decode => {
                "Media playback stopped: the data is corrupt or uses unsupported features"
                    .to_string()
            }
            Self::SrcNotSupported if src.is_empty() => "No media has been selected".to_string(),
            Self::SrcNotSupported => format!(
                "Media at {} could not be loaded: the server or network failed, or the format is not supported",
                src
            ),
            Self::Unknown(code) => format!("An unknown media error occurred (code {})", code),
        }
    }
}

/// Which observable property triggered a state change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateChangeCause {
    /// Playback status changed
    Status,
    /// Repeat flag changed
    Repeat,
    /// Volume was written
    Volume,
}

/// Notifications emitted by the controller
///
/// Carries no state: observers re-read the controller's properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerEvent {
    /// Observable state changed
    StateChanged {
        /// What changed
        cause: StateChangeCause,
    },
}
