//! Tune Player - Transport
//!
//! Platform-agnostic transport state machine for Tune Player.
//!
//! This crate provides:
//! - Simulated playback clock (fixed logical delta per tick)
//! - Play/pause toggling with end-of-track stop
//! - Seek by fraction and skip by seconds, silently clamped to the track
//! - `M:SS` time labels
//! - Input → intent bindings kept as a data table
//! - Single-slot transient notifications
//!
//! # Architecture
//!
//! `tune-transport` has no timer and no input surface of its own:
//! - No dependency on tokio (see `tune-session` for the clock task)
//! - No dependency on a DOM (see the `wasm` feature for JS bindings)
//!
//! The presentation layer forwards raw input and timer ticks, and reads
//! [`PlaybackState`] snapshots back.
//!
//! # Example: Transport
//!
//! ```rust
//! use tune_transport::Transport;
//!
//! let mut transport = Transport::default();
//! assert!(transport.toggle_play_pause());
//!
//! for _ in 0..10 {
//!     transport.tick(0.1);
//! }
//! transport.skip(15.0);
//! assert!((transport.position() - 16.0).abs() < 1e-9);
//!
//! transport.seek_to_fraction(1.0);
//! transport.tick(0.1);
//! assert_eq!(transport.position(), 0.0);
//! assert!(!transport.is_playing());
//! ```
//!
//! # Example: Dispatching Input
//!
//! ```rust
//! use tune_transport::{Dispatcher, Input, Key, TransportConfig};
//!
//! let mut dispatcher = Dispatcher::new(&TransportConfig::default()).unwrap();
//!
//! let dispatch = dispatcher.handle(&Input::Key(Key::Space));
//! assert_eq!(dispatch.notice.unwrap().message, "▶ Playing...");
//!
//! dispatcher.handle(&Input::Key(Key::ArrowRight));
//! assert_eq!(dispatcher.snapshot().position_label(), "0:05");
//! ```

mod bindings;
mod dispatch;
mod error;
pub mod events;
mod format;
mod intent;
mod notification;
mod transport;
pub mod types;
pub mod wasm;

// Public exports
pub use bindings::{
    Action, Bindings, Control, ControlIcon, Input, Key, LabelMatch, NavLink, TransportButton,
};
pub use dispatch::{toggle_notice, Dispatch, Dispatcher};
pub use error::{Result, TransportError};
pub use events::{PlayState, TransportEvent};
pub use format::format_time;
pub use intent::{Intent, IntentOutcome};
pub use notification::{
    NoticeChange, Notification, NotificationCenter, NotificationKind, NotificationPhase,
};
pub use transport::Transport;
pub use types::{NotificationConfig, PlaybackState, TransportConfig};
