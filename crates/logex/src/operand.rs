//! crates/logex/src/operand.rs
//! Message operands and the joining rules of the plain and `ln` call shapes.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

/// A value that can appear in a plain or `ln` logging call.
///
/// The plain shape inserts a space between two adjacent operands only when
/// neither of them is a string, so each operand reports whether it counts as
/// one.
pub trait Operand: fmt::Display {
    /// Reports whether the operand is string-like for joining purposes.
    fn is_string(&self) -> bool {
        false
    }
}

impl Operand for str {
    fn is_string(&self) -> bool {
        true
    }
}

impl Operand for String {
    fn is_string(&self) -> bool {
        true
    }
}

impl Operand for Cow<'_, str> {
    fn is_string(&self) -> bool {
        true
    }
}

impl Operand for fmt::Arguments<'_> {
    fn is_string(&self) -> bool {
        true
    }
}

impl<T: Operand + ?Sized> Operand for &T {
    fn is_string(&self) -> bool {
        (**self).is_string()
    }
}

macro_rules! non_string_operands {
    ($($ty:ty),* $(,)?) => {
        $(impl Operand for $ty {})*
    };
}

non_string_operands!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

/// The argument list of a plain or `ln` logging call.
///
/// Implemented for single operands, tuples of up to eight operands, and
/// slices or arrays of `&dyn Operand`.
pub trait Values {
    /// Calls `f` once per operand, in order.
    fn visit(&self, f: &mut dyn FnMut(&dyn Operand));
}

impl Values for str {
    fn visit(&self, f: &mut dyn FnMut(&dyn Operand)) {
        f(&self);
    }
}

impl Values for fmt::Arguments<'_> {
    fn visit(&self, f: &mut dyn FnMut(&dyn Operand)) {
        f(self);
    }
}

impl<T: Values + ?Sized> Values for &T {
    fn visit(&self, f: &mut dyn FnMut(&dyn Operand)) {
        (**self).visit(f);
    }
}

impl Values for () {
    fn visit(&self, _f: &mut dyn FnMut(&dyn Operand)) {}
}

impl Values for [&dyn Operand] {
    fn visit(&self, f: &mut dyn FnMut(&dyn Operand)) {
        for operand in self {
            f(*operand);
        }
    }
}

impl<const N: usize> Values for [&dyn Operand; N] {
    fn visit(&self, f: &mut dyn FnMut(&dyn Operand)) {
        self.as_slice().visit(f);
    }
}

macro_rules! single_operand_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Values for $ty {
                fn visit(&self, f: &mut dyn FnMut(&dyn Operand)) {
                    f(self);
                }
            }
        )*
    };
}

single_operand_values!(
    String, Cow<'_, str>, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64, bool, char,
);

macro_rules! tuple_values {
    ($($name:ident => $idx:tt),+) => {
        impl<$($name: Operand),+> Values for ($($name,)+) {
            fn visit(&self, f: &mut dyn FnMut(&dyn Operand)) {
                $(f(&self.$idx);)+
            }
        }
    };
}

tuple_values!(A => 0);
tuple_values!(A => 0, B => 1);
tuple_values!(A => 0, B => 1, C => 2);
tuple_values!(A => 0, B => 1, C => 2, D => 3);
tuple_values!(A => 0, B => 1, C => 2, D => 3, E => 4);
tuple_values!(A => 0, B => 1, C => 2, D => 3, E => 4, F => 5);
tuple_values!(A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6);
tuple_values!(A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7);

/// Joins operands the way the plain call shape does: a space separates two
/// adjacent operands only when neither is a string.
///
/// # Examples
///
/// ```
/// assert_eq!(logex::sprint(&("disk", "low")), "disklow");
/// assert_eq!(logex::sprint(&(1, 2)), "1 2");
/// assert_eq!(logex::sprint(&("code=", 42)), "code=42");
/// ```
pub fn sprint<V: Values + ?Sized>(values: &V) -> String {
    let mut out = String::new();
    let mut previous_was_string = None;
    values.visit(&mut |operand| {
        let is_string = operand.is_string();
        if previous_was_string == Some(false) && !is_string {
            out.push(' ');
        }
        let _ = write!(out, "{operand}");
        previous_was_string = Some(is_string);
    });
    out
}

/// Joins operands the way the `ln` call shape does: a space always separates
/// adjacent operands.
///
/// # Examples
///
/// ```
/// assert_eq!(logex::sprintln(&("disk", "low")), "disk low");
/// assert_eq!(logex::sprintln(&("code=", 42)), "code= 42");
/// ```
pub fn sprintln<V: Values + ?Sized>(values: &V) -> String {
    let mut out = String::new();
    let mut first = true;
    values.visit(&mut |operand| {
        if !first {
            out.push(' ');
        }
        let _ = write!(out, "{operand}");
        first = false;
    });
    out
}
