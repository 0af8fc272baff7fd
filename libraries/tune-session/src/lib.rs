//! Tune Player - Session
//!
//! Runs the transport on a tokio task: a fixed-interval clock plus a
//! command channel for presentation input, processed one at a time.
//!
//! # Example
//!
//! ```rust,no_run
//! use tune_session::Session;
//! use tune_transport::{Input, Key, TransportConfig};
//!
//! # async fn demo() -> tune_session::Result<()> {
//! let session = Session::spawn(&TransportConfig::default())?;
//! let handle = session.handle();
//!
//! handle.input(Input::Key(Key::Space)).await?;
//! let mut state = handle.watch();
//! state.changed().await.ok();
//! println!("{} / {}", state.borrow().position_label(), state.borrow().duration_label());
//!
//! session.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod error;
mod session;

pub use error::{Result, SessionError};
pub use session::{Session, SessionEvent, SessionHandle};
