//! Transport intents
//!
//! Every user input that touches playback resolves to exactly one
//! [`Intent`], which the transport applies with clamping.

use serde::{Deserialize, Serialize};

/// A named request to change transport state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// Flip between playing and paused
    TogglePlayPause,

    /// Force the play state
    SetPlaying(bool),

    /// Jump to a fraction of the track (clamped to `[0, 1]`)
    SeekToFraction(f64),

    /// Move by a signed number of seconds (clamped to the track)
    Skip(f64),

    /// Advance the clock by a fixed logical delta
    Tick(f64),
}

/// What applying an intent did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentOutcome {
    /// Position changed (or was re-clamped) by a seek or skip
    Moved,

    /// Play state after a toggle or explicit set
    PlayState {
        /// New value of the playing flag
        is_playing: bool,
    },

    /// Tick applied while playing
    Advanced,

    /// Tick crossed the end of the track
    Finished,

    /// Tick while paused
    Idle,
}
