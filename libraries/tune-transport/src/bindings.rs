//! Input bindings
//!
//! The mapping from raw presentation input to transport intents and
//! notifications, kept as data so it can be inspected, remapped and tested
//! without any input surface attached.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{intent::Intent, notification::Notification, types::TransportConfig};

/// Keyboard key, by DOM `KeyboardEvent.code`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Parse a DOM key code (`"Space"`, `"ArrowLeft"`, ...)
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => Key::Space,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }
}

/// The five transport buttons, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportButton {
    Shuffle,
    Rewind,
    PlayPause,
    Forward,
    Repeat,
}

impl TransportButton {
    /// Button at a position in the control bar
    pub fn from_index(index: usize) -> Option<Self> {
        const ORDER: [TransportButton; 5] = [
            TransportButton::Shuffle,
            TransportButton::Rewind,
            TransportButton::PlayPause,
            TransportButton::Forward,
            TransportButton::Repeat,
        ];
        ORDER.get(index).copied()
    }
}

/// Secondary control icons next to the now-playing info
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlIcon {
    Like,
    PlayNext,
    Lyrics,
    Queue,
    Share,
}

impl ControlIcon {
    /// Icon at a position in the icon row
    pub fn from_index(index: usize) -> Option<Self> {
        const ORDER: [ControlIcon; 5] = [
            ControlIcon::Like,
            ControlIcon::PlayNext,
            ControlIcon::Lyrics,
            ControlIcon::Queue,
            ControlIcon::Share,
        ];
        ORDER.get(index).copied()
    }
}

/// Navigation links without a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavLink {
    Search,
    Placeholder,
}

/// Raw input from the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Input {
    Key(Key),
    TransportButton(TransportButton),
    ControlIcon(ControlIcon),
    NavLink(NavLink),
    InstallButton,
    /// Badge button, by its visible label
    Badge(String),
    /// Album/playlist card, by its title if it has one
    Card { title: Option<String> },
    /// Progress bar input, value in 0-100
    ProgressInput(f64),
}

/// Inputs with a fixed identity, looked up in the table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Key(Key),
    TransportButton(TransportButton),
    ControlIcon(ControlIcon),
    NavLink(NavLink),
    InstallButton,
}

/// What an input resolves to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Intent(Intent),
    Notify(Notification),
    IntentWithNotice(Intent, Notification),
}

impl Action {
    /// The intent carried by this action, if any
    pub fn intent(&self) -> Option<Intent> {
        match self {
            Action::Intent(intent) | Action::IntentWithNotice(intent, _) => Some(*intent),
            Action::Notify(_) => None,
        }
    }

    /// The fixed notice carried by this action, if any
    pub fn notice(&self) -> Option<&Notification> {
        match self {
            Action::Notify(notice) | Action::IntentWithNotice(_, notice) => Some(notice),
            Action::Intent(_) => None,
        }
    }
}

/// How a badge label is matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelMatch {
    Exact(String),
    Contains(String),
}

impl LabelMatch {
    fn matches(&self, label: &str) -> bool {
        match self {
            LabelMatch::Exact(text) => label == text,
            LabelMatch::Contains(text) => label.contains(text.as_str()),
        }
    }
}

/// Input → action table
#[derive(Debug, Clone)]
pub struct Bindings {
    controls: HashMap<Control, Action>,
    badges: Vec<(LabelMatch, Notification)>,
}

impl Default for Bindings {
    fn default() -> Self {
        Self::from_config(&TransportConfig::default())
    }
}

impl Bindings {
    /// Empty table; every input resolves to nothing
    pub fn empty() -> Self {
        Self {
            controls: HashMap::new(),
            badges: Vec::new(),
        }
    }

    /// Default table, with skip sizes taken from configuration
    pub fn from_config(config: &TransportConfig) -> Self {
        let keyboard = config.keyboard_skip_secs;
        let button = config.button_skip_secs;

        let mut bindings = Self::empty();

        bindings.bind(Control::Key(Key::Space), Action::Intent(Intent::TogglePlayPause));
        bindings.bind(Control::Key(Key::ArrowRight), Action::Intent(Intent::Skip(keyboard)));
        bindings.bind(Control::Key(Key::ArrowLeft), Action::Intent(Intent::Skip(-keyboard)));

        let buttons = [
            (
                TransportButton::Shuffle,
                Action::Notify(Notification::info("Shuffle ON")),
            ),
            (
                TransportButton::Rewind,
                Action::IntentWithNotice(Intent::Skip(-button), Notification::info("⏮ Rewinding...")),
            ),
            (TransportButton::PlayPause, Action::Intent(Intent::TogglePlayPause)),
            (
                TransportButton::Forward,
                Action::IntentWithNotice(Intent::Skip(button), Notification::info("⏭ Skipping...")),
            ),
            (
                TransportButton::Repeat,
                Action::Notify(Notification::info("Repeat mode activated")),
            ),
        ];
        for (button, action) in buttons {
            bindings.bind(Control::TransportButton(button), action);
        }

        let icons = [
            (ControlIcon::Like, "Added to Liked Songs ❤"),
            (ControlIcon::PlayNext, "Playing next..."),
            (ControlIcon::Lyrics, "Lyrics view"),
            (ControlIcon::Queue, "Queue updated"),
            (ControlIcon::Share, "Sharing song..."),
        ];
        for (icon, message) in icons {
            bindings.bind(
                Control::ControlIcon(icon),
                Action::Notify(Notification::info(message)),
            );
        }

        bindings.bind(
            Control::NavLink(NavLink::Search),
            Action::Notify(Notification::info("Search feature - Coming soon!")),
        );
        bindings.bind(
            Control::NavLink(NavLink::Placeholder),
            Action::Notify(Notification::info("Navigation feature - Coming soon!")),
        );
        bindings.bind(
            Control::InstallButton,
            Action::Notify(Notification::success("Installing Spotify Web Player...")),
        );

        bindings.badges = vec![
            (
                LabelMatch::Exact("Create Playlist".to_string()),
                Notification::success("Creating new playlist..."),
            ),
            (
                LabelMatch::Exact("Browse Podcasts".to_string()),
                Notification::success("Browsing podcasts..."),
            ),
            (
                LabelMatch::Contains("Explore Premium".to_string()),
                Notification::success("Redirecting to Premium..."),
            ),
            (
                LabelMatch::Contains("Install App".to_string()),
                Notification::info("App installation information"),
            ),
        ];

        bindings
    }

    /// Bind a control, returning the action it replaced
    pub fn bind(&mut self, control: Control, action: Action) -> Option<Action> {
        self.controls.insert(control, action)
    }

    /// Remove a control's binding
    pub fn unbind(&mut self, control: &Control) -> Option<Action> {
        self.controls.remove(control)
    }

    /// Add a badge rule; earlier rules win
    pub fn bind_badge(&mut self, rule: LabelMatch, notice: Notification) {
        self.badges.push((rule, notice));
    }

    /// Look up a fixed control
    pub fn get(&self, control: &Control) -> Option<&Action> {
        self.controls.get(control)
    }

    /// Number of bound controls
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Whether no control is bound
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Resolve an input to its action
    ///
    /// Unknown keys and unmatched badges resolve to `None`.
    pub fn resolve(&self, input: &Input) -> Option<Action> {
        match input {
            Input::Key(key) => self.get(&Control::Key(key.clone())).cloned(),
            Input::TransportButton(button) => {
                self.get(&Control::TransportButton(*button)).cloned()
            }
            Input::ControlIcon(icon) => self.get(&Control::ControlIcon(*icon)).cloned(),
            Input::NavLink(link) => self.get(&Control::NavLink(*link)).cloned(),
            Input::InstallButton => self.get(&Control::InstallButton).cloned(),
            Input::Badge(label) => {
                let label = label.trim();
                self.badges
                    .iter()
                    .find(|(rule, _)| rule.matches(label))
                    .map(|(_, notice)| Action::Notify(notice.clone()))
            }
            Input::Card { title } => {
                let title = title.as_deref().unwrap_or("Unknown");
                Some(Action::Notify(Notification::info(format!("Playing: {}", title))))
            }
            Input::ProgressInput(value) => {
                Some(Action::Intent(Intent::SeekToFraction(value / 100.0)))
            }
        }
    }
}
