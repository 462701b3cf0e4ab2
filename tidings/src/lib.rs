//! # tidings - Typed, In-Process Multicast Callbacks
//!
//! `tidings` lets independent callers attach free functions, or methods bound
//! to an object, to an [`Event`] of a fixed signature. Emitting the event
//! calls every subscriber once, in registration order, on the caller's
//! thread, and yields the last subscriber's result.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use tidings::prelude::*;
//!
//! fn double(val: i32) -> i32 {
//!     val * 2
//! }
//!
//! fn triple(val: i32) -> i32 {
//!     val * 3
//! }
//!
//! let mut event = Event::<fn(i32) -> i32>::new();
//! event.attach(double);
//! assert_eq!(event.notify(3).unwrap(), 6);
//!
//! event.attach(triple);
//! assert_eq!(event.notify(4).unwrap(), 12);
//!
//! event.detach(triple);
//! assert_eq!(event.notify(4).unwrap(), 8);
//! ```
//!
//! ## Identity
//!
//! A subscriber is identified by its function and, for methods, by the
//! receiver it is bound to. Attaching an identity that is already present
//! replaces it in place (see [`AttachPolicy`]); detaching one that is not
//! present does nothing.
//!
//! Receivers are held through weak handles. The event never keeps a
//! receiver alive, and emitting after a bound receiver was dropped fails
//! with [`InvokeError::ReceiverDropped`].
//!
//! ## Function addresses
//!
//! Identity relies on function pointer values. Rust does not promise that a
//! function has a single address across codegen units, nor that two
//! identical functions have different ones, so attach and detach a given
//! function from the same crate.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use tidings_core::{
    // Error types
    BoxError,
    // Invokables
    BoxInvokable,
    FnInvokable,
    // Identity
    FnKey,
    // Receivers
    Handle,
    Identity,
    Invokable,
    InvokeError,
    MethodInvokable,
    Receiver,
    // Signature
    Signature,
    TidingsError,
};

// Event container
pub use tidings_std::{AttachPolicy, Event};

/// Testing utilities.
pub mod testing {
    pub use tidings_std::testing::{CallLog, CallRecorder};
}

/// Prelude module - common imports for Tidings.
///
/// # Usage
///
/// ```rust
/// use tidings::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{AttachPolicy, Event, InvokeError, Receiver, Signature, TidingsError};
}
