//! # Subscriber Identity
//!
//! Two subscribers are the same subscriber when they call the same function
//! and, for methods, are bound to the same receiver. [`Identity`] captures
//! that pair and is what attach and detach match on.
//!
//! Function pointers are keyed by the bytes of their representation
//! ([`FnKey`]). Method pointers in other languages can span more than one
//! machine word, and the key makes no assumption about the width of the
//! pointer it was read from.

use smallvec::SmallVec;
use std::{
    fmt,
    hash::{DefaultHasher, Hash, Hasher},
    mem, slice,
};

/// Golden-ratio constant of the boost-style hash combine.
const HASH_MIX: u64 = 0x9e37_79b9;

/// Opaque key read from the byte representation of a function pointer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FnKey(SmallVec<[u8; 16]>);

impl FnKey {
    /// Read the key of a function pointer value.
    ///
    /// Only called with function pointer types. They are plain addresses
    /// with no padding, so every byte of the value is initialized.
    pub(crate) fn of_fn_ptr<F: Copy + 'static>(func: F) -> Self {
        let ptr = (&func as *const F).cast::<u8>();
        // SAFETY: `ptr` points at a live, fully initialized `F` on the stack
        // and the slice covers exactly `size_of::<F>()` bytes of it.
        let bytes = unsafe { slice::from_raw_parts(ptr, mem::size_of::<F>()) };
        Self(SmallVec::from_slice(bytes))
    }

    /// The raw bytes of the key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn hash_value(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}

impl fmt::Debug for FnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnKey({self})")
    }
}

impl fmt::Display for FnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        // most significant byte first, as an address is usually printed
        let mut bytes = self.0.clone();
        if cfg!(target_endian = "little") {
            bytes.reverse();
        }
        for byte in &bytes {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// The `(function, receiver)` pair that tells subscribers apart.
///
/// Free functions carry no receiver; a free-function identity is never
/// equal to a method identity, even for the same key.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    func: FnKey,
    receiver: Option<usize>,
}

impl Identity {
    /// Identity of a free function.
    pub fn function(func: FnKey) -> Self {
        Self {
            func,
            receiver: None,
        }
    }

    /// Identity of a method bound to the receiver at `receiver`.
    pub fn bound(func: FnKey, receiver: usize) -> Self {
        Self {
            func,
            receiver: Some(receiver),
        }
    }

    /// The function key.
    pub fn func(&self) -> &FnKey {
        &self.func
    }

    /// The receiver address, if this is a method identity.
    pub fn receiver(&self) -> Option<usize> {
        self.receiver
    }

    /// Whether this identity names a method bound to a receiver.
    pub fn is_bound(&self) -> bool {
        self.receiver.is_some()
    }

    /// Combined hash of the function key and the receiver address.
    ///
    /// Used to bucket candidates only; equality is always checked as well.
    pub fn mixed_hash(&self) -> u64 {
        let func_hash = self.func.hash_value();
        let Some(receiver) = self.receiver else {
            return func_hash;
        };

        let mut hasher = DefaultHasher::new();
        receiver.hash(&mut hasher);
        let receiver_hash = hasher.finish();

        func_hash
            ^ receiver_hash
                .wrapping_add(HASH_MIX)
                .wrapping_add(func_hash << 6)
                .wrapping_add(func_hash >> 2)
    }
}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.mixed_hash());
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("func", &self.func)
            .field("receiver", &self.receiver.map(|addr| format!("{addr:#x}")))
            .finish()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.receiver {
            Some(receiver) => write!(f, "{} @ {receiver:#x}", self.func),
            None => write!(f, "{}", self.func),
        }
    }
}
