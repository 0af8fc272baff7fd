//! Input dispatcher
//!
//! Ties a [`Transport`], its [`Bindings`] and the [`NotificationCenter`]
//! together. The presentation layer hands every raw input and every timer
//! tick to the dispatcher, one at a time, and renders from the snapshot.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    bindings::{Action, Bindings, Input, Key},
    error::Result,
    intent::{Intent, IntentOutcome},
    notification::{NoticeChange, Notification, NotificationCenter},
    transport::Transport,
    types::{PlaybackState, TransportConfig},
};

/// Result of handling one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dispatch {
    /// Outcome of the intent, when the input carried one
    pub outcome: Option<IntentOutcome>,

    /// Notification shown as a result, if any
    pub notice: Option<Notification>,
}

impl Dispatch {
    /// Input had no binding
    pub fn ignored() -> Self {
        Self {
            outcome: None,
            notice: None,
        }
    }

    /// Whether the input did anything
    pub fn is_ignored(&self) -> bool {
        self.outcome.is_none() && self.notice.is_none()
    }
}

/// Play/pause notice for the new play state
pub fn toggle_notice(is_playing: bool) -> Notification {
    if is_playing {
        Notification::info("▶ Playing...")
    } else {
        Notification::info("⏸ Paused")
    }
}

/// Routes inputs and ticks into the transport
#[derive(Debug, Clone)]
pub struct Dispatcher {
    transport: Transport,
    bindings: Bindings,
    notifications: NotificationCenter,
    tick_delta_secs: f64,
    tick_interval_ms: u64,
}

impl Default for Dispatcher {
    fn default() -> Self {
        let config = TransportConfig::default();
        Self {
            transport: Transport::default(),
            bindings: Bindings::from_config(&config),
            notifications: NotificationCenter::new(config.notification),
            tick_delta_secs: config.tick_delta_secs,
            tick_interval_ms: config.tick_interval_ms,
        }
    }
}

impl Dispatcher {
    /// Build a dispatcher with the default bindings for this configuration
    pub fn new(config: &TransportConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
            bindings: Bindings::from_config(config),
            notifications: NotificationCenter::new(config.notification),
            tick_delta_secs: config.tick_delta_secs,
            tick_interval_ms: config.tick_interval_ms,
        })
    }

    /// Replace the bindings table
    pub fn with_bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Handle one raw input
    pub fn handle(&mut self, input: &Input) -> Dispatch {
        let Some(action) = self.bindings.resolve(input) else {
            debug!(?input, "Input has no binding");
            return Dispatch::ignored();
        };

        self.perform(action)
    }

    /// Handle a keydown
    ///
    /// Space only toggles when the key went to the page body, so a space
    /// typed into a text field never plays or pauses. Other keys act from
    /// any target.
    pub fn handle_key(&mut self, key: Key, from_body: bool) -> Dispatch {
        if key == Key::Space && !from_body {
            debug!("Space outside the page body left to its target");
            return Dispatch::ignored();
        }

        self.handle(&Input::Key(key))
    }

    /// Apply an intent directly, with the same notices as a bound input
    pub fn intent(&mut self, intent: Intent) -> Dispatch {
        self.perform(Action::Intent(intent))
    }

    /// One timer step: fixed logical delta for the transport, fixed
    /// interval for the notification lifecycle
    ///
    /// Notification steps crossed here are collected by
    /// [`drain_notice_changes`](Self::drain_notice_changes).
    pub fn tick(&mut self) -> IntentOutcome {
        self.notifications.advance(self.tick_interval_ms);
        self.transport.tick(self.tick_delta_secs)
    }

    fn perform(&mut self, action: Action) -> Dispatch {
        let outcome = action.intent().map(|intent| self.transport.apply(intent));

        let notice = match (&action, outcome) {
            (Action::Notify(notice) | Action::IntentWithNotice(_, notice), _) => {
                Some(notice.clone())
            }
            (Action::Intent(Intent::TogglePlayPause), Some(IntentOutcome::PlayState { is_playing })) => {
                Some(toggle_notice(is_playing))
            }
            _ => None,
        };

        if let Some(ref notice) = notice {
            self.notifications.show(notice.clone());
        }

        Dispatch { outcome, notice }
    }

    /// Current transport snapshot
    pub fn snapshot(&self) -> PlaybackState {
        self.transport.snapshot()
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Notification lifecycle steps since the last drain
    pub fn drain_notice_changes(&mut self) -> Vec<NoticeChange> {
        self.notifications.drain_changes()
    }

    /// Timer period in milliseconds
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::TransportButton;
    use crate::notification::NotificationPhase;

    #[test]
    fn space_toggles_with_notice() {
        let mut dispatcher = Dispatcher::default();

        let dispatch = dispatcher.handle(&Input::Key(Key::Space));
        assert_eq!(
            dispatch.outcome,
            Some(IntentOutcome::PlayState { is_playing: true })
        );
        assert_eq!(dispatch.notice.unwrap().message, "▶ Playing...");

        let dispatch = dispatcher.handle(&Input::TransportButton(TransportButton::PlayPause));
        assert_eq!(dispatch.notice.unwrap().message, "⏸ Paused");
        assert!(!dispatcher.snapshot().is_playing);
    }

    #[test]
    fn space_in_a_text_field_does_not_toggle() {
        let mut dispatcher = Dispatcher::default();

        let dispatch = dispatcher.handle_key(Key::Space, false);
        assert!(dispatch.is_ignored());
        assert!(!dispatcher.snapshot().is_playing);
        assert!(!dispatcher.notifications().is_showing());

        let dispatch = dispatcher.handle_key(Key::Space, true);
        assert_eq!(
            dispatch.outcome,
            Some(IntentOutcome::PlayState { is_playing: true })
        );
    }

    #[test]
    fn arrow_keys_act_from_any_target() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.handle_key(Key::ArrowRight, false);
        dispatcher.handle_key(Key::ArrowRight, true);
        dispatcher.handle_key(Key::ArrowLeft, false);
        assert_eq!(dispatcher.snapshot().position, 5.0);
    }

    #[test]
    fn arrow_keys_skip_silently() {
        let mut dispatcher = Dispatcher::default();
        let dispatch = dispatcher.handle(&Input::Key(Key::ArrowRight));
        assert_eq!(dispatch.outcome, Some(IntentOutcome::Moved));
        assert!(dispatch.notice.is_none());
        assert_eq!(dispatcher.snapshot().position, 5.0);
        assert!(!dispatcher.notifications().is_showing());
    }

    #[test]
    fn rewind_button_clamps_and_notifies() {
        let mut dispatcher = Dispatcher::default();
        let dispatch = dispatcher.handle(&Input::TransportButton(TransportButton::Rewind));
        assert_eq!(dispatcher.snapshot().position, 0.0);
        assert_eq!(dispatch.notice.unwrap().message, "⏮ Rewinding...");

        let (shown, phase) = dispatcher.notifications().current().unwrap();
        assert_eq!(shown.message, "⏮ Rewinding...");
        assert_eq!(phase, NotificationPhase::Entering);
    }

    #[test]
    fn unbound_input_is_ignored() {
        let mut dispatcher = Dispatcher::default();
        let dispatch = dispatcher.handle(&Input::Key(Key::Other("KeyZ".to_string())));
        assert!(dispatch.is_ignored());
        assert_eq!(dispatcher.snapshot(), Dispatcher::default().snapshot());
    }

    #[test]
    fn ticks_drive_clock_and_notifications() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.handle(&Input::Key(Key::Space));

        for _ in 0..10 {
            assert_eq!(dispatcher.tick(), IntentOutcome::Advanced);
        }
        assert!((dispatcher.snapshot().position - 1.0).abs() < 1e-9);
        assert_eq!(
            dispatcher.notifications().current().unwrap().1,
            NotificationPhase::Visible
        );

        // 3300ms total lifetime at 100ms per tick
        for _ in 0..23 {
            dispatcher.tick();
        }
        assert!(!dispatcher.notifications().is_showing());
    }

    #[test]
    fn ticks_report_notice_leaving_and_removal() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.handle(&Input::TransportButton(TransportButton::Shuffle));
        let shuffle = Notification::info("Shuffle ON");

        let mut leaving_at = None;
        let mut removed_at = None;
        for tick in 1..=40u64 {
            dispatcher.tick();
            for change in dispatcher.drain_notice_changes() {
                match change {
                    NoticeChange::Leaving(notice) => {
                        assert_eq!(notice, shuffle);
                        leaving_at = Some(tick * dispatcher.tick_interval_ms());
                    }
                    NoticeChange::Removed(notice) => {
                        assert_eq!(notice, shuffle);
                        removed_at = Some(tick * dispatcher.tick_interval_ms());
                    }
                    NoticeChange::Visible(_) => {}
                }
            }
        }

        assert_eq!(leaving_at, Some(3000));
        assert_eq!(removed_at, Some(3300));
    }

    #[test]
    fn new_notice_reports_the_replaced_one_removed() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.handle(&Input::TransportButton(TransportButton::Shuffle));
        dispatcher.handle(&Input::TransportButton(TransportButton::Repeat));

        assert_eq!(
            dispatcher.drain_notice_changes(),
            vec![NoticeChange::Removed(Notification::info("Shuffle ON"))]
        );
        assert_eq!(
            dispatcher.notifications().current().unwrap().0.message,
            "Repeat mode activated"
        );
    }

    #[test]
    fn direct_toggle_intent_also_notifies() {
        let mut dispatcher = Dispatcher::default();
        let dispatch = dispatcher.intent(Intent::TogglePlayPause);
        assert_eq!(dispatch.notice, Some(toggle_notice(true)));

        let dispatch = dispatcher.intent(Intent::Skip(3.0));
        assert!(dispatch.notice.is_none());
    }
}
