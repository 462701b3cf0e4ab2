//! The event container.
//!
//! An [`Event`] owns the subscribers of one [`Signature`] and calls all of
//! them, in registration order, each time it is emitted.
//!
//! Subscribers are kept in a `Vec` with a side index from [`Identity`] to
//! position. Attach and lookups are O(1) on average; detach is O(n) because
//! later entries shift down to keep registration order.

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
};
use tidings_core::{
    BoxInvokable, FnInvokable, Identity, InvokeError, MethodInvokable, Receiver, Signature,
};

/// What `attach` does when the identity is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttachPolicy {
    /// Replace the stored subscriber in place; it keeps its position.
    #[default]
    Replace,
    /// Keep the subscriber that was registered first.
    KeepFirst,
}

/// A multicast callback registry of signature `S`.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use tidings_std::Event;
///
/// fn double(val: i32) -> i32 {
///     val * 2
/// }
///
/// struct Halver;
///
/// impl Halver {
///     fn half(&self, val: i32) -> i32 {
///         val / 2
///     }
/// }
///
/// let mut event = Event::<fn(i32) -> i32>::named("resize");
/// event.attach(double);
/// assert_eq!(event.notify(3).unwrap(), 6);
///
/// let halver = Rc::new(Halver);
/// event.attach_method(&halver, Halver::half);
/// assert_eq!(event.notify(8).unwrap(), 4);
/// ```
pub struct Event<S: Signature> {
    name: &'static str,
    policy: AttachPolicy,
    entries: Vec<BoxInvokable<S>>,
    index: HashMap<Identity, usize>,
}

impl<S: Signature> Event<S> {
    /// Create an empty event.
    pub fn new() -> Self {
        Self::named("event")
    }

    /// Create an empty event with a name used in log output.
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            policy: AttachPolicy::default(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Set the re-attach policy.
    pub fn with_policy(mut self, policy: AttachPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The event's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The re-attach policy.
    pub fn policy(&self) -> AttachPolicy {
        self.policy
    }

    // ------------------------------------------------------------------------
    // Attach
    // ------------------------------------------------------------------------

    /// Attach a free function.
    pub fn attach(&mut self, func: S) {
        self.insert(Box::new(FnInvokable::new(func)));
    }

    /// Attach a method bound to `receiver`.
    ///
    /// Only a weak handle to the receiver is kept. If the receiver is dropped
    /// while still attached, emitting fails with
    /// [`InvokeError::ReceiverDropped`].
    pub fn attach_method<R: Receiver>(&mut self, receiver: &R, method: S::Method<R::Target>) {
        self.insert(Box::new(
            MethodInvokable::<S, R::Handle, R::Target>::new(receiver, method),
        ));
    }

    /// Attach a method declared on `B` to a receiver that converts to `B`.
    ///
    /// The identity pairs `method` with the receiver's own address, so the
    /// same base method can be bound to many receivers.
    pub fn attach_as<B, R>(&mut self, receiver: &R, method: S::Method<B>)
    where
        B: ?Sized + 'static,
        R: Receiver,
        R::Target: AsRef<B>,
    {
        self.insert(Box::new(MethodInvokable::<S, R::Handle, B>::upcast(
            receiver, method,
        )));
    }

    fn insert(&mut self, invokable: BoxInvokable<S>) {
        match self.index.entry(invokable.identity()) {
            Entry::Occupied(slot) => match self.policy {
                AttachPolicy::Replace => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(event = %self.name, identity = %slot.key(), "Replacing subscriber");
                    self.entries[*slot.get()] = invokable;
                }
                AttachPolicy::KeepFirst => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(event = %self.name, identity = %slot.key(), "Subscriber already attached");
                }
            },
            Entry::Vacant(slot) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(event = %self.name, identity = %slot.key(), "Attaching subscriber");
                slot.insert(self.entries.len());
                self.entries.push(invokable);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Detach
    // ------------------------------------------------------------------------

    /// Detach a free function.
    ///
    /// Returns whether it was attached. Detaching something that is not
    /// attached is a no-op.
    pub fn detach(&mut self, func: S) -> bool {
        self.remove(&FnInvokable::identity_of(func))
    }

    /// Detach a method bound to `receiver`.
    pub fn detach_method<R: Receiver>(&mut self, receiver: &R, method: S::Method<R::Target>) -> bool {
        self.remove(&MethodInvokable::<S, R::Handle, R::Target>::identity_of(
            receiver, method,
        ))
    }

    /// Detach a base method bound to `receiver` with [`attach_as`](Self::attach_as).
    pub fn detach_as<B, R>(&mut self, receiver: &R, method: S::Method<B>) -> bool
    where
        B: ?Sized + 'static,
        R: Receiver,
    {
        self.remove(&MethodInvokable::<S, R::Handle, B>::identity_of(
            receiver, method,
        ))
    }

    fn remove(&mut self, identity: &Identity) -> bool {
        let Some(position) = self.index.remove(identity) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(event = %self.name, %identity, "Subscriber not attached");
            return false;
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(event = %self.name, %identity, "Detaching subscriber");

        self.entries.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        true
    }

    /// Detach every subscriber.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Drop method subscribers whose receiver is gone.
    ///
    /// Returns how many were removed.
    pub fn retain_live(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.is_live());
        let removed = before - self.entries.len();
        if removed > 0 {
            #[cfg(feature = "tracing")]
            tracing::debug!(event = %self.name, removed, "Dropped subscribers with dead receivers");
            self.reindex();
        }
        removed
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.identity(), position))
            .collect();
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    /// Number of attached subscribers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the free function is attached.
    pub fn contains(&self, func: S) -> bool {
        self.index.contains_key(&FnInvokable::identity_of(func))
    }

    /// Whether the method is attached to `receiver`.
    pub fn contains_method<R: Receiver>(&self, receiver: &R, method: S::Method<R::Target>) -> bool {
        self.index
            .contains_key(&MethodInvokable::<S, R::Handle, R::Target>::identity_of(receiver, method))
    }

    /// Identities of the attached subscribers, in delivery order.
    pub fn identities(&self) -> impl Iterator<Item = Identity> + '_ {
        self.entries.iter().map(|entry| entry.identity())
    }

    // ------------------------------------------------------------------------
    // Emit
    // ------------------------------------------------------------------------

    /// Call every subscriber once, in registration order.
    ///
    /// Returns the result of the last subscriber, or `S::Output::default()`
    /// when nothing is attached. The first error stops the fan-out; the
    /// subscribers after it are not called.
    pub fn emit(&self, args: S::Args) -> Result<S::Output, InvokeError>
    where
        S::Args: Clone,
        S::Output: Default,
    {
        Ok(self.emit_last(args)?.unwrap_or_default())
    }

    /// Call every subscriber once, returning `None` when nothing is attached.
    pub fn emit_last(&self, args: S::Args) -> Result<Option<S::Output>, InvokeError>
    where
        S::Args: Clone,
    {
        #[cfg(feature = "tracing")]
        tracing::trace!(event = %self.name, subscribers = self.entries.len(), "Emitting");

        let Some((last, rest)) = self.entries.split_last() else {
            return Ok(None);
        };

        for entry in rest {
            entry.invoke(args.clone()).inspect_err(|err| self.aborted(err))?;
        }
        last.invoke(args)
            .inspect_err(|err| self.aborted(err))
            .map(Some)
    }

    fn aborted(&self, err: &InvokeError) {
        #[cfg(feature = "tracing")]
        tracing::warn!(event = %self.name, error = %err, "Fan-out aborted");

        #[cfg(not(feature = "tracing"))]
        {
            let _ = err;
        }
    }
}

impl<S: Signature> Default for Event<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Signature> fmt::Debug for Event<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("subscribers", &self.entries)
            .finish()
    }
}

// ============================================================================
// notify - emit with the arguments spelled out
// ============================================================================

macro_rules! impl_notify {
    ($($arg:ident),*) => {
        impl<Ret: Default + 'static, $($arg: Clone + 'static),*> Event<fn($($arg),*) -> Ret> {
            /// Emit with the arguments passed directly rather than as a tuple.
            #[allow(non_snake_case, clippy::too_many_arguments)]
            pub fn notify(&self, $($arg: $arg),*) -> Result<Ret, InvokeError> {
                self.emit(($($arg,)*))
            }
        }
    };
}

impl_notify!();
impl_notify!(A1);
impl_notify!(A1, A2);
impl_notify!(A1, A2, A3);
impl_notify!(A1, A2, A3, A4);
impl_notify!(A1, A2, A3, A4, A5);
impl_notify!(A1, A2, A3, A4, A5, A6);
impl_notify!(A1, A2, A3, A4, A5, A6, A7);
impl_notify!(A1, A2, A3, A4, A5, A6, A7, A8);
