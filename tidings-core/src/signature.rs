//! Call signatures.
//!
//! An event's signature is written as a function pointer type, the way the
//! event is declared: `Event<fn(i32) -> i32>`, `Event<fn()>`. Signatures are
//! implemented for zero to eight by-value arguments.

use crate::identity::FnKey;

mod sealed {
    pub trait Sealed {}
}

/// The fixed call shape `fn(A1, .., An) -> Output` of an event.
///
/// Each signature also names the method pointer type that matches it for a
/// receiver of type `T`: `fn(&T, A1, .., An) -> Output`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a supported event signature",
    label = "expected a function pointer type such as `fn(i32) -> i32`",
    note = "Signatures take up to eight arguments by value; borrowed arguments are not supported."
)]
pub trait Signature: sealed::Sealed + Copy + 'static {
    /// The argument list as a tuple.
    type Args;
    /// The value returned by one call.
    type Output;
    /// Method pointer type for a receiver of type `T`.
    type Method<T: ?Sized + 'static>: Copy + 'static;

    /// Call the function with the given arguments.
    fn call(self, args: Self::Args) -> Self::Output;

    /// Call a method on `receiver` with the given arguments.
    fn call_method<T: ?Sized + 'static>(
        method: Self::Method<T>,
        receiver: &T,
        args: Self::Args,
    ) -> Self::Output;

    /// Key of this function pointer.
    fn key(self) -> FnKey;

    /// Key of a method pointer.
    fn method_key<T: ?Sized + 'static>(method: Self::Method<T>) -> FnKey;
}

macro_rules! impl_signature {
    ($($arg:ident),*) => {
        impl<Ret: 'static, $($arg: 'static),*> sealed::Sealed for fn($($arg),*) -> Ret {}

        impl<Ret: 'static, $($arg: 'static),*> Signature for fn($($arg),*) -> Ret {
            type Args = ($($arg,)*);
            type Output = Ret;
            type Method<T: ?Sized + 'static> = fn(&T, $($arg),*) -> Ret;

            #[allow(non_snake_case)]
            fn call(self, ($($arg,)*): Self::Args) -> Ret {
                (self)($($arg),*)
            }

            #[allow(non_snake_case)]
            fn call_method<T: ?Sized + 'static>(
                method: Self::Method<T>,
                receiver: &T,
                ($($arg,)*): Self::Args,
            ) -> Ret {
                method(receiver, $($arg),*)
            }

            fn key(self) -> FnKey {
                FnKey::of_fn_ptr(self)
            }

            fn method_key<T: ?Sized + 'static>(method: Self::Method<T>) -> FnKey {
                FnKey::of_fn_ptr(method)
            }
        }
    };
}

impl_signature!();
impl_signature!(A1);
impl_signature!(A1, A2);
impl_signature!(A1, A2, A3);
impl_signature!(A1, A2, A3, A4);
impl_signature!(A1, A2, A3, A4, A5);
impl_signature!(A1, A2, A3, A4, A5, A6);
impl_signature!(A1, A2, A3, A4, A5, A6, A7);
impl_signature!(A1, A2, A3, A4, A5, A6, A7, A8);

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        base: i32,
    }

    impl Counter {
        fn offset(&self, val: i32) -> i32 {
            self.base + val
        }

        fn sum(&self, a: i32, b: i32, c: i32) -> i32 {
            self.base + a + b + c
        }
    }

    fn double(val: i32) -> i32 {
        val * 2
    }

    fn answer() -> u8 {
        42
    }

    fn concat(a: String, b: String) -> String {
        a + &b
    }

    #[test]
    fn test_call_unary() {
        let sig: fn(i32) -> i32 = double;
        assert_eq!(sig.call((21,)), 42);
    }

    #[test]
    fn test_call_nullary() {
        let sig: fn() -> u8 = answer;
        assert_eq!(sig.call(()), 42);
    }

    #[test]
    fn test_call_owned_arguments() {
        let sig: fn(String, String) -> String = concat;
        assert_eq!(sig.call(("ab".into(), "cd".into())), "abcd");
    }

    #[test]
    fn test_call_method() {
        let counter = Counter { base: 10 };
        let out = <fn(i32) -> i32>::call_method::<Counter>(Counter::offset, &counter, (5,));
        assert_eq!(out, 15);

        let out =
            <fn(i32, i32, i32) -> i32>::call_method::<Counter>(Counter::sum, &counter, (1, 2, 3));
        assert_eq!(out, 16);
    }

    #[test]
    fn test_method_key_differs_from_function_key() {
        let func: fn(i32) -> i32 = double;
        let method_key = <fn(i32) -> i32>::method_key::<Counter>(Counter::offset);
        assert_ne!(func.key(), method_key);
        assert_eq!(
            method_key,
            <fn(i32) -> i32>::method_key::<Counter>(Counter::offset)
        );
    }
}
