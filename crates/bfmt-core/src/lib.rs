//! # bfmt-core
//!
//! Allocation-free template formatting into caller-provided byte buffers.
//!
//! Templates use brace specifiers in the form
//! `{[index]:[[$fill]align][flags][width][.precision][type]}` rendered
//! against a typed argument list:
//!
//! ```
//! use bfmt_core::{args, format};
//!
//! let mut out = [0u8; 64];
//! let n = format("Hello, {:s}! code {:#06x}", &mut out, &args!["world", 42]);
//! assert_eq!(&out[..n], b"Hello, world! code 0x002a");
//! ```
//!
//! The engine never allocates and never writes past the buffer it is given:
//! output that does not fit is dropped and the returned count reflects only
//! what was written. Arguments are consumed in strictly increasing slot
//! order; templates whose specifiers reference slots out of order are
//! handled by an internal two-pass mode with a bounded specifier table.
//!
//! Custom type tokens (up to [`MAX_TYPES`] of them, [`MAX_TYPE_LEN`] bytes
//! each) can be registered on a [`FormatContext`]; their formatter routines
//! receive the context back and may render nested templates with
//! [`FormatContext::write`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod align;
pub mod buffer;
pub mod engine;
pub mod float;
pub mod num;
pub mod parse;
pub mod registry;
pub mod spec;
pub mod text;
pub mod value;

pub use buffer::FmtBuffer;
pub use engine::{FormatContext, format};
pub use registry::{Formatter, Resolution, TypeFormatFn, TypeRegistry};
pub use spec::{Align, Count, Flags, Spec};
pub use value::{ArgStream, ArgType, Value};

/// Maximum number of argument slots one call can reference.
pub const MAX_ARGS: usize = 16;
/// Maximum number of specifiers tracked once two-pass mode is active.
pub const MAX_SPECS: usize = 32;
/// Maximum field width and maximum computed precision; larger requests
/// clamp here.
pub const MAX_WIDTH: u32 = 256;
/// Maximum number of registered custom types per context.
pub const MAX_TYPES: usize = 128;
/// Maximum byte length of a custom type name.
pub const MAX_TYPE_LEN: usize = 16;

/// Builds a fixed-size [`Value`] array from plain Rust expressions:
///
/// ```
/// use bfmt_core::{args, format};
///
/// let mut out = [0u8; 32];
/// let n = format("{:d}, {:.1f}", &mut out, &args![42, 2.5]);
/// assert_eq!(&out[..n], b"42, 2.5");
/// ```
#[macro_export]
macro_rules! args {
    () => {
        [$crate::Value::Null; 0]
    };
    ($($arg:expr),+ $(,)?) => {
        [$($crate::Value::from($arg)),+]
    };
}
