//! Core types for transport management

use crate::error::{Result, TransportError};
use crate::format::format_time;
use serde::{Deserialize, Serialize};

/// Default track length (3:33)
pub const DEFAULT_DURATION_SECS: f64 = 213.0;

/// Snapshot of the transport state
///
/// This is what the presentation layer reads after any operation. It is a
/// plain copy, so holding one never keeps the transport borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Current position in seconds, always within `[0, duration]`
    pub position: f64,

    /// Track length in seconds
    pub duration: f64,

    /// Whether the clock is advancing
    pub is_playing: bool,

    /// Volume (0-100). Carried for the UI, not read by any operation.
    pub volume: u8,
}

impl PlaybackState {
    /// Position as an `M:SS` label
    pub fn position_label(&self) -> String {
        format_time(self.position)
    }

    /// Duration as an `M:SS` label
    pub fn duration_label(&self) -> String {
        format_time(self.duration)
    }

    /// Progress bar value (0-100)
    pub fn progress_percent(&self) -> f64 {
        self.position / self.duration * 100.0
    }

    /// Position sits on the start boundary
    ///
    /// Lets a UI disable "rewind" without the transport reporting clamps.
    pub fn at_start(&self) -> bool {
        self.position <= 0.0
    }

    /// Position sits on the end boundary
    pub fn at_end(&self) -> bool {
        self.position >= self.duration
    }
}

/// Notification timings (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Delay before a new notification becomes visible (default: 10)
    pub enter_delay_ms: u64,

    /// Time from show until the notification starts leaving (default: 3000)
    pub display_ms: u64,

    /// Length of the leave phase before removal (default: 300)
    pub exit_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enter_delay_ms: 10,
            display_ms: 3000,
            exit_ms: 300,
        }
    }
}

/// Configuration for the transport and its collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Track length in seconds (default: 213.0)
    pub duration_secs: f64,

    /// Timer period in milliseconds (default: 100)
    pub tick_interval_ms: u64,

    /// Logical advance per tick in seconds (default: 0.1)
    ///
    /// Applied as-is on every tick, independent of real elapsed time.
    pub tick_delta_secs: f64,

    /// Arrow-key skip magnitude in seconds (default: 5.0)
    pub keyboard_skip_secs: f64,

    /// Rewind/forward button skip magnitude in seconds (default: 15.0)
    pub button_skip_secs: f64,

    /// Initial volume (0-100, default: 100)
    pub volume: u8,

    /// Notification timings
    pub notification: NotificationConfig,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            tick_interval_ms: 100,
            tick_delta_secs: 0.1,
            keyboard_skip_secs: 5.0,
            button_skip_secs: 15.0,
            volume: 100,
            notification: NotificationConfig::default(),
        }
    }
}

impl TransportConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(TransportError::InvalidDuration(self.duration_secs));
        }

        if self.tick_interval_ms == 0 {
            return Err(TransportError::InvalidConfig(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }

        for (name, value) in [
            ("tick_delta_secs", self.tick_delta_secs),
            ("keyboard_skip_secs", self.keyboard_skip_secs),
            ("button_skip_secs", self.button_skip_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TransportError::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number of seconds (got {value})"
                )));
            }
        }

        if self.volume > 100 {
            return Err(TransportError::InvalidConfig(format!(
                "volume must be 0-100 (got {})",
                self.volume
            )));
        }

        Ok(())
    }
}
