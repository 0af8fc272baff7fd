//! Transport state machine
//!
//! Owns playback position, duration and the playing flag. Two states,
//! Playing and Paused; seek and skip are valid in both, and `tick` is the
//! only operation whose effect depends on the current state.

use std::collections::VecDeque;

use tracing::{debug, info, trace};

use crate::{
    error::{Result, TransportError},
    events::{PlayState, TransportEvent},
    intent::{Intent, IntentOutcome},
    types::{PlaybackState, TransportConfig, DEFAULT_DURATION_SECS},
};

/// Oldest events are dropped past this many undrained entries
const MAX_PENDING_EVENTS: usize = 1024;

/// Simulated playback clock with clamped transport controls
#[derive(Debug, Clone)]
pub struct Transport {
    position: f64,
    duration: f64,
    is_playing: bool,
    volume: u8,

    pending_events: VecDeque<TransportEvent>,
}

impl Default for Transport {
    fn default() -> Self {
        Self::paused_at_zero(DEFAULT_DURATION_SECS, 100)
    }
}

impl Transport {
    /// Create a transport from configuration
    ///
    /// Starts paused at position zero.
    pub fn new(config: &TransportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::paused_at_zero(config.duration_secs, config.volume))
    }

    /// Create a transport for a track of the given length
    pub fn with_duration(duration_secs: f64) -> Result<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(TransportError::InvalidDuration(duration_secs));
        }
        Ok(Self::paused_at_zero(duration_secs, 100))
    }

    fn paused_at_zero(duration: f64, volume: u8) -> Self {
        Self {
            position: 0.0,
            duration,
            is_playing: false,
            volume,
            pending_events: VecDeque::new(),
        }
    }

    // ===== Intents =====

    /// Apply any intent
    ///
    /// Each intent maps onto exactly one transport operation.
    pub fn apply(&mut self, intent: Intent) -> IntentOutcome {
        debug!(?intent, "Applying transport intent");

        match intent {
            Intent::TogglePlayPause => IntentOutcome::PlayState {
                is_playing: self.toggle_play_pause(),
            },
            Intent::SetPlaying(playing) => {
                self.set_playing(playing);
                IntentOutcome::PlayState {
                    is_playing: self.is_playing,
                }
            }
            Intent::SeekToFraction(fraction) => {
                self.seek_to_fraction(fraction);
                IntentOutcome::Moved
            }
            Intent::Skip(delta) => {
                self.skip(delta);
                IntentOutcome::Moved
            }
            Intent::Tick(delta) => self.tick(delta),
        }
    }

    /// Advance the clock by `delta_secs` while playing
    ///
    /// Reaching or passing the end of the track resets position to zero and
    /// pauses (end-of-track stop, never a loop). No-op while paused.
    /// Negative or NaN deltas do not move the clock.
    pub fn tick(&mut self, delta_secs: f64) -> IntentOutcome {
        if !self.is_playing {
            return IntentOutcome::Idle;
        }

        if delta_secs > 0.0 {
            self.position += delta_secs;
        }

        if self.position >= self.duration {
            info!(duration = self.duration, "Track finished, stopping transport");
            self.position = 0.0;
            self.is_playing = false;
            self.emit(TransportEvent::TrackFinished);
            self.emit_state_changed();
            return IntentOutcome::Finished;
        }

        trace!(position = self.position, "Tick");
        self.emit(TransportEvent::PositionUpdate {
            position_secs: self.position,
            duration_secs: self.duration,
        });
        IntentOutcome::Advanced
    }

    /// Seek to a fraction of the track
    ///
    /// Out-of-range fractions are clamped silently; NaN seeks to the start.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        let target = if fraction.is_nan() {
            0.0
        } else {
            fraction * self.duration
        };
        self.move_to(target);
    }

    /// Seek by progress-bar value (0-100)
    pub fn seek_to_percent(&mut self, percent: f64) {
        self.seek_to_fraction(percent / 100.0);
    }

    /// Move by a signed number of seconds, clamped to `[0, duration]`
    ///
    /// Landing on the end does not stop playback; the next tick does.
    pub fn skip(&mut self, delta_secs: f64) {
        if delta_secs.is_nan() {
            return;
        }
        self.move_to(self.position + delta_secs);
    }

    /// Flip the play state and return the new value
    pub fn toggle_play_pause(&mut self) -> bool {
        self.is_playing = !self.is_playing;
        self.emit_state_changed();
        self.is_playing
    }

    /// Set the play state explicitly
    pub fn set_playing(&mut self, playing: bool) {
        if self.is_playing != playing {
            self.is_playing = playing;
            self.emit_state_changed();
        }
    }

    // ===== Volume =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume = level.min(100);
        self.emit(TransportEvent::VolumeChanged { level: self.volume });
    }

    // ===== State Queries =====

    /// Copy of the current state
    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            position: self.position,
            duration: self.duration,
            is_playing: self.is_playing,
            volume: self.volume,
        }
    }

    /// Current position in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Track length in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Whether the clock is advancing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Current play state
    pub fn play_state(&self) -> PlayState {
        PlayState::from(self.is_playing)
    }

    /// Current volume (0-100)
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Progress bar value (0-100)
    pub fn progress_percent(&self) -> f64 {
        self.position / self.duration * 100.0
    }

    // ===== Events =====

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<TransportEvent> {
        self.pending_events.drain(..).collect()
    }

    /// Number of queued events
    pub fn pending_event_count(&self) -> usize {
        self.pending_events.len()
    }

    fn move_to(&mut self, target: f64) {
        let from = self.position;
        self.position = target.clamp(0.0, self.duration);
        debug!(from, to = self.position, "Transport position moved");
        self.emit(TransportEvent::Seeked {
            from_secs: from,
            to_secs: self.position,
        });
    }

    fn emit_state_changed(&mut self) {
        self.emit(TransportEvent::StateChanged {
            state: self.play_state(),
        });
    }

    fn emit(&mut self, event: TransportEvent) {
        if self.pending_events.len() == MAX_PENDING_EVENTS {
            self.pending_events.pop_front();
        }
        self.pending_events.push_back(event);
    }
}
