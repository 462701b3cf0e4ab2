//! # tidings-std
//!
//! Standard implementations for the Tidings multicast callback registry.
//!
//! This crate provides:
//! - **Event container**: [`Event`], with [`AttachPolicy`] for re-attach behaviour
//! - **Testing utilities**: [`testing::CallLog`], [`testing::CallRecorder`]
//!
//! With the `tracing` feature (on by default) attach, detach and emit are
//! instrumented with `tracing` events.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use tidings_core;

// Modules
mod event;
pub mod testing;

pub use event::{AttachPolicy, Event};
