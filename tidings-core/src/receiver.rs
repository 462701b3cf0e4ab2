//! # Receivers
//!
//! A method subscriber is bound to a receiver it does not own. The binding
//! is held through a weak [`Handle`], so attaching never extends the
//! receiver's lifetime. A receiver dropped while still bound is detected
//! when the method is called.
//!
//! While a weak handle exists its allocation is not released, so the
//! receiver address stays unique for as long as the binding is registered.

use std::{
    rc::{self, Rc},
    sync::{self, Arc},
};

/// A non-owning handle to a receiver.
pub trait Handle: Clone + 'static {
    /// The receiver type.
    type Target: ?Sized + 'static;

    /// Address of the receiver, used as the receiver half of an identity.
    fn address(&self) -> usize;

    /// Run `f` on the receiver, or return `None` if it has been dropped.
    fn with<R>(&self, f: impl FnOnce(&Self::Target) -> R) -> Option<R>;

    /// Whether the receiver is still alive.
    fn is_live(&self) -> bool;
}

impl<T: ?Sized + 'static> Handle for rc::Weak<T> {
    type Target = T;

    fn address(&self) -> usize {
        self.as_ptr().cast::<()>() as usize
    }

    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.upgrade().map(|receiver| f(&receiver))
    }

    fn is_live(&self) -> bool {
        self.strong_count() > 0
    }
}

impl<T: ?Sized + 'static> Handle for sync::Weak<T> {
    type Target = T;

    fn address(&self) -> usize {
        self.as_ptr().cast::<()>() as usize
    }

    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.upgrade().map(|receiver| f(&receiver))
    }

    fn is_live(&self) -> bool {
        self.strong_count() > 0
    }
}

/// Anything a method can be bound to: a shared pointer or a weak one.
///
/// Strong pointers are downgraded on attach; the registry only ever keeps
/// the weak [`Handle`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a receiver",
    label = "expected `Rc<T>`, `Arc<T>` or a `Weak` pointing at one",
    note = "Receivers are bound through weak handles so the event never owns them."
)]
pub trait Receiver {
    /// The receiver type.
    type Target: ?Sized + 'static;
    /// The weak handle stored by the registry.
    type Handle: Handle<Target = Self::Target>;

    /// A weak handle to the receiver.
    fn handle(&self) -> Self::Handle;

    /// Address of the receiver.
    fn address(&self) -> usize;
}

impl<T: ?Sized + 'static> Receiver for Rc<T> {
    type Target = T;
    type Handle = rc::Weak<T>;

    fn handle(&self) -> rc::Weak<T> {
        Rc::downgrade(self)
    }

    fn address(&self) -> usize {
        Rc::as_ptr(self).cast::<()>() as usize
    }
}

impl<T: ?Sized + 'static> Receiver for rc::Weak<T> {
    type Target = T;
    type Handle = rc::Weak<T>;

    fn handle(&self) -> rc::Weak<T> {
        self.clone()
    }

    fn address(&self) -> usize {
        Handle::address(self)
    }
}

impl<T: ?Sized + 'static> Receiver for Arc<T> {
    type Target = T;
    type Handle = sync::Weak<T>;

    fn handle(&self) -> sync::Weak<T> {
        Arc::downgrade(self)
    }

    fn address(&self) -> usize {
        Arc::as_ptr(self).cast::<()>() as usize
    }
}

impl<T: ?Sized + 'static> Receiver for sync::Weak<T> {
    type Target = T;
    type Handle = sync::Weak<T>;

    fn handle(&self) -> sync::Weak<T> {
        self.clone()
    }

    fn address(&self) -> usize {
        Handle::address(self)
    }
}
