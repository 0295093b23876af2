//! Typed argument values and the consume-once argument stream.
//!
//! The engine never random-accesses the caller's argument list. Values are
//! pulled through [`ArgStream`] in strictly increasing slot order, once each;
//! a specifier that references a slot ahead of the read position is what
//! forces the engine into two-pass mode.

use core::any::Any;
use core::fmt;

/// Size class describing how a specifier's value occupies an argument slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArgType {
    /// No value consumed (alignment-only specifiers).
    #[default]
    None,
    /// 4-byte integer slot: `d u b o x X c` and computed widths/precisions.
    Int32,
    /// 8-byte integer slot: the `ll`-prefixed conversions.
    Int64,
    /// Pointer-width integer slot: the `z`-prefixed conversions.
    Size,
    /// 8-byte float slot: `f` and `F`.
    Double,
    /// Pointer slot: `s`, `p`, and by-reference custom types.
    Pointer,
}

/// One argument value as supplied by the caller.
///
/// Mismatches between a slot's value and the specifier that consumes it
/// degrade to neutral readings (zero, `(null)`) rather than failing.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    /// Absent value.
    Null,
    Int(i32),
    Long(i64),
    Size(usize),
    Float(f64),
    Str(&'a str),
    /// By-reference aggregate for registered custom types.
    Ref(&'a dyn Any),
}

impl<'a> Value<'a> {
    /// Signed integer view. Non-integer variants read as 0.
    pub fn as_i64(self) -> i64 {
        match self {
            Value::Int(v) => i64::from(v),
            Value::Long(v) => v,
            Value::Size(v) => v as i64,
            _ => 0,
        }
    }

    /// Unsigned integer view. 4-byte values are zero-extended, so `Int(-1)`
    /// reads as `0xFFFF_FFFF`; strings and references read as addresses,
    /// which is what the `p` conversion renders.
    pub fn as_u64(self) -> u64 {
        match self {
            Value::Int(v) => u64::from(v as u32),
            Value::Long(v) => v as u64,
            Value::Size(v) => v as u64,
            Value::Str(s) => s.as_ptr() as usize as u64,
            Value::Ref(r) => r as *const dyn Any as *const () as usize as u64,
            Value::Null | Value::Float(_) => 0,
        }
    }

    /// Float view. Non-float variants read as 0.0.
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Float(v) => v,
            _ => 0.0,
        }
    }

    /// String view; `None` for null or non-string values.
    pub fn as_str(self) -> Option<&'a str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Low byte of the integer view, for the `c` conversion.
    pub fn low_byte(self) -> u8 {
        (self.as_u64() & 0xFF) as u8
    }

    /// Non-negative clamped view for computed widths and precisions.
    /// Negative values read as 0, oversized ones as `MAX_WIDTH`.
    pub fn as_count(self) -> u32 {
        let v = self.as_i64();
        if v <= 0 {
            0
        } else {
            (v as u64).min(u64::from(crate::MAX_WIDTH)) as u32
        }
    }

    /// Downcast view for by-reference custom aggregates.
    pub fn downcast_ref<T: 'static>(self) -> Option<&'a T> {
        match self {
            Value::Ref(r) => r.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::Long(v) => f.debug_tuple("Long").field(v).finish(),
            Value::Size(v) => f.debug_tuple("Size").field(v).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Ref(_) => f.write_str("Ref(..)"),
        }
    }
}

impl From<i32> for Value<'_> {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value<'_> {
    fn from(v: u32) -> Self {
        Value::Int(v as i32)
    }
}

impl From<i64> for Value<'_> {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<u64> for Value<'_> {
    fn from(v: u64) -> Self {
        Value::Long(v as i64)
    }
}

impl From<usize> for Value<'_> {
    fn from(v: usize) -> Self {
        Value::Size(v)
    }
}

impl From<f64> for Value<'_> {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value<'_> {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<u8> for Value<'_> {
    fn from(v: u8) -> Self {
        Value::Int(i32::from(v))
    }
}

impl From<char> for Value<'_> {
    fn from(v: char) -> Self {
        Value::Int(v as i32)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Value::Str(v)
    }
}

impl<'a> From<Option<&'a str>> for Value<'a> {
    fn from(v: Option<&'a str>) -> Self {
        match v {
            Some(s) => Value::Str(s),
            None => Value::Null,
        }
    }
}

/// Strictly-ordered, consume-once cursor over the caller's argument list.
///
/// Slots can only be read in increasing order and only once. Slots past the
/// end of the list read as [`Value::Null`].
#[derive(Debug)]
pub struct ArgStream<'a> {
    args: &'a [Value<'a>],
    cursor: usize,
}

impl<'a> ArgStream<'a> {
    pub fn new(args: &'a [Value<'a>]) -> Self {
        Self { args, cursor: 0 }
    }

    /// Number of slots consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// Pulls the next slot.
    pub fn pull(&mut self) -> Value<'a> {
        let v = self.args.get(self.cursor).copied().unwrap_or(Value::Null);
        self.cursor += 1;
        v
    }
}
