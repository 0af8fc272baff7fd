//! Transport Events
//!
//! Event-based communication for UI synchronization.
//! Events are queued by the transport and drained by the caller after each
//! operation:
//! - State changes (play/pause, including the end-of-track stop)
//! - Seeks and skips
//! - Position updates (every tick while playing)
//! - Volume changes

use serde::{Deserialize, Serialize};

/// Events emitted by the transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransportEvent {
    /// Play state changed
    StateChanged {
        /// The new play state
        state: PlayState,
    },

    /// Position moved by a seek or skip
    Seeked {
        /// Position before the intent
        from_secs: f64,
        /// Position after clamping
        to_secs: f64,
    },

    /// Position advanced by a tick
    PositionUpdate {
        /// Current playback position
        position_secs: f64,
        /// Total track duration
        duration_secs: f64,
    },

    /// A tick reached the end of the track; position is back at zero and
    /// the transport is paused
    TrackFinished,

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
    },
}

/// Two-state play state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayState {
    /// Clock advancing
    Playing,
    /// Clock stopped
    Paused,
}

impl From<bool> for PlayState {
    fn from(is_playing: bool) -> Self {
        if is_playing {
            PlayState::Playing
        } else {
            PlayState::Paused
        }
    }
}

impl PlayState {
    /// Lowercase name, as used by the JS bindings
    pub fn as_str(self) -> &'static str {
        match self {
            PlayState::Playing => "playing",
            PlayState::Paused => "paused",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_state_conversion() {
        assert_eq!(PlayState::from(true), PlayState::Playing);
        assert_eq!(PlayState::from(false), PlayState::Paused);
        assert_eq!(PlayState::Playing.as_str(), "playing");
    }

    #[test]
    fn test_event_serialization() {
        let event = TransportEvent::StateChanged {
            state: PlayState::Paused,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"StateChanged":{"state":"paused"}}"#);
    }
}
