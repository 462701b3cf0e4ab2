//! Error types for Tidings.
//!
//! - [`TidingsError`] - Top-level error type for all Tidings operations
//! - [`InvokeError`] - Errors raised while calling a subscriber

use crate::identity::FnKey;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Tidings operations.
#[derive(Error, Debug)]
pub enum TidingsError {
    /// A subscriber could not be invoked.
    #[error("invoke error: {0}")]
    Invoke(#[from] InvokeError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors raised while calling a subscriber.
///
/// These are programming errors rather than transient conditions: a fan-out
/// stops at the first one and hands it to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// The receiver a method was bound to has been dropped.
    #[error("receiver at {receiver:#x} was dropped while method {method} was still attached")]
    ReceiverDropped {
        /// Key of the method that could not be called.
        method: FnKey,
        /// Address the receiver lived at.
        receiver: usize,
    },
}

impl From<BoxError> for TidingsError {
    fn from(err: BoxError) -> Self {
        TidingsError::Custom(err)
    }
}
