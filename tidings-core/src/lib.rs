//! # tidings-core
//!
//! Core traits for the Tidings multicast callback registry.
//!
//! This crate has minimal dependencies and holds the type-erasure and
//! identity layer that the event container in `tidings-std` is built on.
//!
//! # Layers
//!
//! ## Signature ([`Signature`])
//!
//! The fixed call shape of an event, written as a function pointer type
//! such as `fn(i32) -> i32`. A signature knows its argument tuple, its
//! output and the matching method pointer type for any receiver.
//!
//! ## Identity ([`FnKey`], [`Identity`])
//!
//! Subscribers are told apart by the function they call and, for methods,
//! the receiver they are bound to. Function keys are read from the bytes of
//! the pointer value, never from an integer cast.
//!
//! ## Receivers ([`Receiver`], [`Handle`])
//!
//! Methods are bound to a receiver through a weak handle. The registry never
//! owns the receiver; a receiver dropped while still attached surfaces as an
//! [`InvokeError`] at call time.
//!
//! ## Invokables ([`Invokable`])
//!
//! The closed set of subscriber kinds: [`FnInvokable`] for free functions
//! and [`MethodInvokable`] for methods bound to a receiver.
//!
//! # Error Types
//!
//! - [`TidingsError`] - Top-level error type
//! - [`InvokeError`] - Errors raised while calling a subscriber

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod identity;
mod invokable;
mod receiver;
mod signature;

// Re-exports
pub use error::{BoxError, InvokeError, TidingsError};
pub use identity::{FnKey, Identity};
pub use invokable::{BoxInvokable, FnInvokable, Invokable, MethodInvokable};
pub use receiver::{Handle, Receiver};
pub use signature::Signature;
