//! WASM-compatible transport wrapper

use crate::{
    bindings::{ControlIcon, Input, Key, NavLink, TransportButton},
    dispatch::{Dispatch, Dispatcher},
    events::TransportEvent,
    format::format_time,
    intent::Intent,
    notification::{NoticeChange, Notification, NotificationKind, NotificationPhase},
    types::TransportConfig,
};
use js_sys::Function;
use wasm_bindgen::prelude::*;

/// WASM-compatible transport
///
/// This wraps the core dispatcher with a JavaScript-friendly API. The page
/// calls `tick()` from its `setInterval` and forwards DOM events through
/// the `handle*` methods.
#[wasm_bindgen]
pub struct WasmTransport {
    inner: Dispatcher,

    // Event callbacks
    on_state_change: Option<Function>,
    on_position: Option<Function>,
    on_track_finished: Option<Function>,
    on_notification: Option<Function>,
    on_notification_phase: Option<Function>,
    on_notification_hidden: Option<Function>,
}

#[wasm_bindgen]
impl WasmTransport {
    /// Create a transport for a track of `duration_secs` seconds
    #[wasm_bindgen(constructor)]
    pub fn new(duration_secs: f64) -> Result<WasmTransport, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config = TransportConfig {
            duration_secs,
            ..Default::default()
        };
        let inner = Dispatcher::new(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            inner,
            on_state_change: None,
            on_position: None,
            on_track_finished: None,
            on_notification: None,
            on_notification_phase: None,
            on_notification_hidden: None,
        })
    }

    // ===== Transport Control =====

    /// Flip play/pause, returns the new playing flag
    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&mut self) -> bool {
        self.run(Intent::TogglePlayPause);
        self.inner.transport().is_playing()
    }

    /// Set play state explicitly
    #[wasm_bindgen(js_name = setPlaying)]
    pub fn set_playing(&mut self, playing: bool) {
        self.run(Intent::SetPlaying(playing));
    }

    /// Seek by fraction (0.0 - 1.0, clamped)
    #[wasm_bindgen(js_name = seekToFraction)]
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        self.run(Intent::SeekToFraction(fraction));
    }

    /// Seek by progress bar value (0 - 100, clamped)
    #[wasm_bindgen(js_name = seekToPercent)]
    pub fn seek_to_percent(&mut self, percent: f64) {
        let dispatch = self.inner.handle(&Input::ProgressInput(percent));
        self.after(&dispatch);
    }

    /// Skip by signed seconds (clamped)
    pub fn skip(&mut self, delta_secs: f64) {
        self.run(Intent::Skip(delta_secs));
    }

    /// One timer step
    pub fn tick(&mut self) {
        self.inner.tick();
        self.flush_events();
        self.flush_notice_changes();
    }

    // ===== Raw Input =====

    /// Forward a `keydown` by its `KeyboardEvent.code`
    ///
    /// Pass `e.target === document.body` as `from_body`: Space is left to
    /// its target otherwise. Returns true when the key did something, so
    /// the page can call `preventDefault()`.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, code: &str, from_body: bool) -> bool {
        let dispatch = self.inner.handle_key(Key::from_code(code), from_body);
        self.after(&dispatch);
        !dispatch.is_ignored()
    }

    /// Forward a click on transport button `index` (0-4)
    #[wasm_bindgen(js_name = handleTransportButton)]
    pub fn handle_transport_button(&mut self, index: usize) -> bool {
        match TransportButton::from_index(index) {
            Some(button) => self.input(&Input::TransportButton(button)),
            None => false,
        }
    }

    /// Forward a click on control icon `index` (0-4)
    #[wasm_bindgen(js_name = handleControlIcon)]
    pub fn handle_control_icon(&mut self, index: usize) -> bool {
        match ControlIcon::from_index(index) {
            Some(icon) => self.input(&Input::ControlIcon(icon)),
            None => false,
        }
    }

    /// Forward a badge click by its label
    #[wasm_bindgen(js_name = handleBadge)]
    pub fn handle_badge(&mut self, label: &str) -> bool {
        self.input(&Input::Badge(label.to_string()))
    }

    /// Forward a card click
    #[wasm_bindgen(js_name = handleCard)]
    pub fn handle_card(&mut self, title: Option<String>) -> bool {
        self.input(&Input::Card { title })
    }

    /// Forward a click on the search link
    #[wasm_bindgen(js_name = handleSearch)]
    pub fn handle_search(&mut self) -> bool {
        self.input(&Input::NavLink(NavLink::Search))
    }

    /// Forward a click on a link without destination
    #[wasm_bindgen(js_name = handlePlaceholderLink)]
    pub fn handle_placeholder_link(&mut self) -> bool {
        self.input(&Input::NavLink(NavLink::Placeholder))
    }

    /// Forward a click on the install button
    #[wasm_bindgen(js_name = handleInstall)]
    pub fn handle_install(&mut self) -> bool {
        self.input(&Input::InstallButton)
    }

    // ===== State Queries =====

    /// Current state ("playing" | "paused")
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        self.inner.transport().play_state().as_str().to_string()
    }

    /// Whether playing
    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.transport().is_playing()
    }

    /// Current position in seconds
    #[wasm_bindgen(js_name = getPosition)]
    pub fn get_position(&self) -> f64 {
        self.inner.transport().position()
    }

    /// Track length in seconds
    #[wasm_bindgen(js_name = getDuration)]
    pub fn get_duration(&self) -> f64 {
        self.inner.transport().duration()
    }

    /// Progress bar value (0 - 100)
    #[wasm_bindgen(js_name = progressPercent)]
    pub fn progress_percent(&self) -> f64 {
        self.inner.transport().progress_percent()
    }

    /// Position as `M:SS`
    #[wasm_bindgen(js_name = formatPosition)]
    pub fn format_position(&self) -> String {
        format_time(self.inner.transport().position())
    }

    /// Duration as `M:SS`
    #[wasm_bindgen(js_name = formatDuration)]
    pub fn format_duration(&self) -> String {
        format_time(self.inner.transport().duration())
    }

    /// Message of the notification on screen, if any
    #[wasm_bindgen(js_name = currentNotification)]
    pub fn current_notification(&self) -> Option<String> {
        self.inner
            .notifications()
            .current()
            .map(|(notice, _)| notice.message.clone())
    }

    /// Phase of the notification on screen ("entering" | "visible" | "leaving")
    #[wasm_bindgen(js_name = notificationPhase)]
    pub fn notification_phase(&self) -> Option<String> {
        self.inner
            .notifications()
            .current()
            .map(|(_, phase)| phase.as_str().to_string())
    }

    // ===== Event Listeners =====

    /// Register state change callback, called with "playing" | "paused"
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&mut self, callback: Function) {
        self.on_state_change = Some(callback);
    }

    /// Register position callback, called with (position, duration)
    #[wasm_bindgen(js_name = onPosition)]
    pub fn on_position(&mut self, callback: Function) {
        self.on_position = Some(callback);
    }

    /// Register end-of-track callback
    #[wasm_bindgen(js_name = onTrackFinished)]
    pub fn on_track_finished(&mut self, callback: Function) {
        self.on_track_finished = Some(callback);
    }

    /// Register notification callback, called with (message, kind)
    #[wasm_bindgen(js_name = onNotification)]
    pub fn on_notification(&mut self, callback: Function) {
        self.on_notification = Some(callback);
    }

    /// Register notification phase callback, called with (message, phase)
    /// when a notice becomes "visible" or starts "leaving"
    #[wasm_bindgen(js_name = onNotificationPhase)]
    pub fn on_notification_phase(&mut self, callback: Function) {
        self.on_notification_phase = Some(callback);
    }

    /// Register removal callback, called with the message once the notice
    /// has faded out or been replaced
    #[wasm_bindgen(js_name = onNotificationHidden)]
    pub fn on_notification_hidden(&mut self, callback: Function) {
        self.on_notification_hidden = Some(callback);
    }

    // ===== Internal Event Emitters =====

    fn run(&mut self, intent: Intent) {
        let dispatch = self.inner.intent(intent);
        self.after(&dispatch);
    }

    fn input(&mut self, input: &Input) -> bool {
        let dispatch = self.inner.handle(input);
        self.after(&dispatch);
        !dispatch.is_ignored()
    }

    fn after(&mut self, dispatch: &Dispatch) {
        self.flush_events();
        // Replaced notice goes first, then its successor is shown
        self.flush_notice_changes();
        if let Some(ref notice) = dispatch.notice {
            self.emit_notification(notice);
        }
    }

    fn flush_events(&mut self) {
        for event in self.inner.transport_mut().drain_events() {
            match event {
                TransportEvent::StateChanged { state } => {
                    if let Some(ref cb) = self.on_state_change {
                        cb.call1(&JsValue::NULL, &JsValue::from_str(state.as_str()))
                            .ok();
                    }
                }
                TransportEvent::PositionUpdate {
                    position_secs,
                    duration_secs,
                } => self.emit_position(position_secs, duration_secs),
                TransportEvent::Seeked { to_secs, .. } => {
                    self.emit_position(to_secs, self.inner.transport().duration());
                }
                TransportEvent::TrackFinished => {
                    if let Some(ref cb) = self.on_track_finished {
                        cb.call0(&JsValue::NULL).ok();
                    }
                    self.emit_position(0.0, self.inner.transport().duration());
                }
                TransportEvent::VolumeChanged { .. } => {}
            }
        }
    }

    fn flush_notice_changes(&mut self) {
        for change in self.inner.drain_notice_changes() {
            match change {
                NoticeChange::Visible(notice) => {
                    self.emit_phase(&notice, NotificationPhase::Visible);
                }
                NoticeChange::Leaving(notice) => {
                    self.emit_phase(&notice, NotificationPhase::Leaving);
                }
                NoticeChange::Removed(notice) => {
                    if let Some(ref cb) = self.on_notification_hidden {
                        cb.call1(&JsValue::NULL, &JsValue::from_str(&notice.message))
                            .ok();
                    }
                }
            }
        }
    }

    fn emit_phase(&self, notice: &Notification, phase: NotificationPhase) {
        if let Some(ref cb) = self.on_notification_phase {
            cb.call2(
                &JsValue::NULL,
                &JsValue::from_str(&notice.message),
                &JsValue::from_str(phase.as_str()),
            )
            .ok();
        }
    }

    fn emit_position(&self, position: f64, duration: f64) {
        if let Some(ref cb) = self.on_position {
            cb.call2(
                &JsValue::NULL,
                &JsValue::from_f64(position),
                &JsValue::from_f64(duration),
            )
            .ok();
        }
    }

    fn emit_notification(&self, notice: &Notification) {
        if let Some(ref cb) = self.on_notification {
            let kind = match notice.kind {
                NotificationKind::Info => "info",
                NotificationKind::Success => "success",
            };
            cb.call2(
                &JsValue::NULL,
                &JsValue::from_str(&notice.message),
                &JsValue::from_str(kind),
            )
            .ok();
        }
    }
}
