//! Platform abstraction layer
//!
//! Native builds drive a [`crate::Session`] directly (see `main.rs`). On the
//! web the page script owns the frame loop, input events and canvas drawing,
//! and talks to the game through the `WebGame` binding.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebGame;
