//! WASM bindings for tune-transport
//!
//! This module provides WebAssembly bindings for the transport dispatcher,
//! so a browser page can drive it from its own event listeners and timer.

#[cfg(feature = "wasm")]
pub mod transport;

#[cfg(feature = "wasm")]
pub use transport::WasmTransport;
