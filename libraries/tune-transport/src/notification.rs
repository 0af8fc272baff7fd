//! Transient notifications
//!
//! A single slot: showing a notification replaces whatever is on screen.
//! The lifecycle runs on logical milliseconds fed in by the caller, so the
//! same clock that drives the transport can drive it.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::NotificationConfig;

/// Visual style of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Neutral message
    #[default]
    Info,
    /// Confirmation of an action
    Success,
}

/// A message to show the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    /// Info notification
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }

    /// Success notification
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }
}

/// Where a notification is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPhase {
    /// Inserted, not yet shown
    Entering,
    /// Fully shown
    Visible,
    /// Fading out
    Leaving,
}

impl NotificationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationPhase::Entering => "entering",
            NotificationPhase::Visible => "visible",
            NotificationPhase::Leaving => "leaving",
        }
    }
}

/// Lifecycle steps kept until drained; oldest dropped past this
const MAX_PENDING_CHANGES: usize = 64;

/// A lifecycle step, reported so a front end can restyle or remove the
/// element without running timers of its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "notification", rename_all = "lowercase")]
pub enum NoticeChange {
    /// Enter delay elapsed; a zero delay starts visible and skips this step
    Visible(Notification),
    /// Display time elapsed, fade-out started
    Leaving(Notification),
    /// Gone from the slot, by expiry or by being replaced
    Removed(Notification),
}

impl NoticeChange {
    /// The notification this step belongs to
    pub fn notification(&self) -> &Notification {
        match self {
            NoticeChange::Visible(n) | NoticeChange::Leaving(n) | NoticeChange::Removed(n) => n,
        }
    }
}

#[derive(Debug, Clone)]
struct Active {
    notification: Notification,
    age_ms: u64,
}

/// Holds at most one notification
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    config: NotificationConfig,
    active: Option<Active>,
    changes: VecDeque<NoticeChange>,
}

impl NotificationCenter {
    /// Create a notification center with the given timings
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            active: None,
            changes: VecDeque::new(),
        }
    }

    /// Show a notification, replacing the current one immediately
    ///
    /// A replaced notification skips its leave phase and is reported as
    /// removed straight away.
    pub fn show(&mut self, notification: Notification) {
        if let Some(previous) = self.active.take() {
            debug!(message = %previous.notification.message, "Replacing notification");
            self.record(NoticeChange::Removed(previous.notification));
        }
        self.active = Some(Active {
            notification,
            age_ms: 0,
        });
    }

    /// Advance the lifecycle clock
    ///
    /// Returns the notification that was removed, if this step expired it.
    /// Every phase boundary crossed on the way is recorded for
    /// [`drain_changes`](Self::drain_changes), in order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Option<Notification> {
        let config = self.config;
        let lifetime = config.display_ms + config.exit_ms;

        let active = self.active.as_mut()?;
        let before = active.age_ms;
        active.age_ms = before.saturating_add(elapsed_ms);
        let after = active.age_ms;
        let notification = active.notification.clone();

        let crossed = |boundary: u64| before < boundary && boundary <= after;
        if crossed(config.enter_delay_ms) && config.enter_delay_ms < config.display_ms {
            self.record(NoticeChange::Visible(notification.clone()));
        }
        if crossed(config.display_ms) && config.display_ms < lifetime {
            self.record(NoticeChange::Leaving(notification.clone()));
        }

        if after >= lifetime {
            self.active = None;
            self.record(NoticeChange::Removed(notification.clone()));
            Some(notification)
        } else {
            None
        }
    }

    /// Take the lifecycle steps recorded since the last drain
    pub fn drain_changes(&mut self) -> Vec<NoticeChange> {
        self.changes.drain(..).collect()
    }

    /// Current notification and its phase
    pub fn current(&self) -> Option<(&Notification, NotificationPhase)> {
        self.active
            .as_ref()
            .map(|active| (&active.notification, self.phase_at(active.age_ms)))
    }

    /// Dismiss without waiting for the lifecycle
    pub fn clear(&mut self) {
        if let Some(active) = self.active.take() {
            self.record(NoticeChange::Removed(active.notification));
        }
    }

    /// Whether a notification is in the slot
    pub fn is_showing(&self) -> bool {
        self.active.is_some()
    }

    fn record(&mut self, change: NoticeChange) {
        if self.changes.len() >= MAX_PENDING_CHANGES {
            self.changes.pop_front();
        }
        self.changes.push_back(change);
    }

    fn phase_at(&self, age_ms: u64) -> NotificationPhase {
        if age_ms >= self.config.display_ms {
            NotificationPhase::Leaving
        } else if age_ms >= self.config.enter_delay_ms {
            NotificationPhase::Visible
        } else {
            NotificationPhase::Entering
        }
    }
}
