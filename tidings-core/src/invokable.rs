//! # Invokables
//!
//! An invokable is one subscriber: a callable of a fixed [`Signature`]
//! together with the [`Identity`] used to find it again.
//!
//! The set of subscriber kinds is closed. [`FnInvokable`] wraps a free
//! function (or an associated function, which is the same thing);
//! [`MethodInvokable`] wraps a method bound to a receiver through a weak
//! [`Handle`]. [`Invokable`] is sealed and cannot be implemented outside
//! this crate.

use crate::{
    error::InvokeError,
    identity::Identity,
    receiver::{Handle, Receiver},
    signature::Signature,
};
use std::{
    fmt,
    hash::{Hash, Hasher},
};

mod sealed {
    pub trait Sealed {}
}

/// A type-erased subscriber of signature `S`.
pub trait Invokable<S: Signature>: sealed::Sealed {
    /// Call the subscriber.
    fn invoke(&self, args: S::Args) -> Result<S::Output, InvokeError>;

    /// The identity this subscriber is registered under.
    fn identity(&self) -> Identity;

    /// Whether the subscriber can still be called.
    ///
    /// Always `true` for free functions; for methods, whether the receiver
    /// is still alive.
    fn is_live(&self) -> bool {
        true
    }
}

/// A boxed invokable, as stored by an event.
pub type BoxInvokable<S> = Box<dyn Invokable<S>>;

impl<S: Signature> PartialEq for dyn Invokable<S> {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl<S: Signature> Eq for dyn Invokable<S> {}

impl<S: Signature> Hash for dyn Invokable<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl<S: Signature> fmt::Debug for dyn Invokable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invokable")
            .field("identity", &self.identity())
            .field("live", &self.is_live())
            .finish()
    }
}

// ============================================================================
// Free functions
// ============================================================================

/// A free function subscriber.
#[derive(Clone, Copy)]
pub struct FnInvokable<S> {
    func: S,
}

impl<S: Signature> FnInvokable<S> {
    /// Wrap a function pointer.
    pub fn new(func: S) -> Self {
        Self { func }
    }

    /// Identity of `func` without wrapping it.
    pub fn identity_of(func: S) -> Identity {
        Identity::function(func.key())
    }
}

impl<S: Signature> sealed::Sealed for FnInvokable<S> {}

impl<S: Signature> Invokable<S> for FnInvokable<S> {
    fn invoke(&self, args: S::Args) -> Result<S::Output, InvokeError> {
        Ok(self.func.call(args))
    }

    fn identity(&self) -> Identity {
        Self::identity_of(self.func)
    }
}

// ============================================================================
// Methods bound to a receiver
// ============================================================================

/// A method subscriber bound to a receiver it does not own.
///
/// The method may be declared on the receiver type itself, or on a type `B`
/// the receiver converts to with [`AsRef`]. Either way the identity pairs the
/// method with the receiver's own address.
pub struct MethodInvokable<S: Signature, H: Handle, B: ?Sized + 'static> {
    method: S::Method<B>,
    project: fn(&H::Target) -> &B,
    receiver: H,
}

fn project_self<T: ?Sized>(receiver: &T) -> &T {
    receiver
}

fn project_as_ref<T, B>(receiver: &T) -> &B
where
    T: AsRef<B> + ?Sized,
    B: ?Sized,
{
    receiver.as_ref()
}

impl<S: Signature, H: Handle> MethodInvokable<S, H, H::Target> {
    /// Bind a method of the receiver's own type.
    pub fn new<R>(receiver: &R, method: S::Method<H::Target>) -> Self
    where
        R: Receiver<Handle = H, Target = H::Target>,
    {
        Self {
            method,
            project: project_self::<H::Target>,
            receiver: receiver.handle(),
        }
    }
}

impl<S: Signature, H: Handle, B: ?Sized + 'static> MethodInvokable<S, H, B>
where
    H::Target: AsRef<B>,
{
    /// Bind a method declared on `B` to a receiver that converts to `B`.
    pub fn upcast<R>(receiver: &R, method: S::Method<B>) -> Self
    where
        R: Receiver<Handle = H, Target = H::Target>,
    {
        Self {
            method,
            project: project_as_ref::<H::Target, B>,
            receiver: receiver.handle(),
        }
    }
}

impl<S: Signature, H: Handle, B: ?Sized + 'static> MethodInvokable<S, H, B> {
    /// Identity of `method` bound to `receiver` without wrapping it.
    pub fn identity_of<R: Receiver + ?Sized>(receiver: &R, method: S::Method<B>) -> Identity {
        Identity::bound(S::method_key::<B>(method), receiver.address())
    }
}

impl<S: Signature, H: Handle, B: ?Sized + 'static> sealed::Sealed for MethodInvokable<S, H, B> {}

impl<S: Signature, H: Handle, B: ?Sized + 'static> Invokable<S> for MethodInvokable<S, H, B> {
    fn invoke(&self, args: S::Args) -> Result<S::Output, InvokeError> {
        self.receiver
            .with(|receiver| S::call_method::<B>(self.method, (self.project)(receiver), args))
            .ok_or_else(|| InvokeError::ReceiverDropped {
                method: S::method_key::<B>(self.method),
                receiver: self.receiver.address(),
            })
    }

    fn identity(&self) -> Identity {
        Identity::bound(S::method_key::<B>(self.method), self.receiver.address())
    }

    fn is_live(&self) -> bool {
        self.receiver.is_live()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        cell::Cell,
        rc::{self, Rc},
        sync::{self, Arc},
    };

    type Unary = fn(i32) -> i32;

    fn double(val: i32) -> i32 {
        val * 2
    }

    fn triple(val: i32) -> i32 {
        val * 3
    }

    struct Halver {
        calls: Cell<u32>,
    }

    impl Halver {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
            }
        }

        fn half(&self, val: i32) -> i32 {
            self.calls.set(self.calls.get() + 1);
            val / 2
        }
    }

    struct Shape {
        sides: i32,
    }

    impl Shape {
        fn scaled(&self, val: i32) -> i32 {
            self.sides * val
        }
    }

    struct Square {
        shape: Shape,
    }

    impl AsRef<Shape> for Square {
        fn as_ref(&self) -> &Shape {
            &self.shape
        }
    }

    #[test]
    fn test_fn_invokable_forwards() {
        let invokable = FnInvokable::<Unary>::new(double);
        assert_eq!(invokable.invoke((3,)), Ok(6));
    }

    #[test]
    fn test_fn_identity_is_stable() {
        let a = FnInvokable::<Unary>::new(double);
        let b = FnInvokable::<Unary>::new(double);
        let c = FnInvokable::<Unary>::new(triple);
        assert_eq!(a.identity(), b.identity());
        assert_ne!(a.identity(), c.identity());
        assert_eq!(a.identity(), FnInvokable::<Unary>::identity_of(double));
    }

    #[test]
    fn test_method_invokable_forwards() {
        let halver = Rc::new(Halver::new());
        let invokable =
            MethodInvokable::<Unary, rc::Weak<Halver>, Halver>::new(&halver, Halver::half);
        assert_eq!(invokable.invoke((8,)), Ok(4));
        assert_eq!(halver.calls.get(), 1);
        assert!(invokable.is_live());
    }

    #[test]
    fn test_method_invokable_does_not_own_receiver() {
        let halver = Rc::new(Halver::new());
        let _invokable =
            MethodInvokable::<Unary, rc::Weak<Halver>, Halver>::new(&halver, Halver::half);
        assert_eq!(Rc::strong_count(&halver), 1);
    }

    #[test]
    fn test_method_invokable_dropped_receiver() {
        let halver = Rc::new(Halver::new());
        let address = Receiver::address(&halver);
        let invokable =
            MethodInvokable::<Unary, rc::Weak<Halver>, Halver>::new(&halver, Halver::half);
        drop(halver);

        assert!(!invokable.is_live());
        match invokable.invoke((8,)) {
            Err(InvokeError::ReceiverDropped { receiver, .. }) => assert_eq!(receiver, address),
            other => panic!("expected ReceiverDropped, got {other:?}"),
        }
    }

    #[test]
    fn test_method_identity_per_receiver() {
        let first = Rc::new(Halver::new());
        let second = Rc::new(Halver::new());
        let a = MethodInvokable::<Unary, rc::Weak<Halver>, Halver>::new(&first, Halver::half);
        let b = MethodInvokable::<Unary, rc::Weak<Halver>, Halver>::new(&second, Halver::half);
        assert_ne!(a.identity(), b.identity());
        assert_eq!(
            a.identity(),
            MethodInvokable::<Unary, rc::Weak<Halver>, Halver>::identity_of(&first, Halver::half)
        );
    }

    #[test]
    fn test_upcast_invokable() {
        let square = Arc::new(Square {
            shape: Shape { sides: 4 },
        });
        let invokable =
            MethodInvokable::<Unary, sync::Weak<Square>, Shape>::upcast(&square, Shape::scaled);
        assert_eq!(invokable.invoke((2,)), Ok(8));

        let identity = invokable.identity();
        assert_eq!(identity.receiver(), Some(Receiver::address(&square)));
    }

    #[test]
    fn test_dyn_equality_by_identity() {
        let halver = Rc::new(Halver::new());
        let free: BoxInvokable<Unary> = Box::new(FnInvokable::<Unary>::new(double));
        let free_again: BoxInvokable<Unary> = Box::new(FnInvokable::<Unary>::new(double));
        let bound: BoxInvokable<Unary> = Box::new(MethodInvokable::<
            Unary,
            rc::Weak<Halver>,
            Halver,
        >::new(&halver, Halver::half));

        assert!(*free == *free_again);
        assert!(*free != *bound);
    }
}
