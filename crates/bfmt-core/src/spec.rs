//! Specifier data model.
//!
//! One `{...}` occurrence flows through three stages: parsed (grammar fields
//! only, [`ParsedSpec`]), resolved (formatter and size class attached), and
//! loaded (argument values filled in). [`Spec`] carries the last two stages
//! and is what formatters receive.

use crate::registry::Formatter;
use crate::value::{ArgType, Value};

/// Flags parsed from a specifier. Any combination in any order is valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// `#`: alternate form (numeric base prefix, whole-float truncation).
    pub alt_form: bool,
    /// `!`: uppercase rendering.
    pub uppercase: bool,
    /// `0`: pad to field width with zeros placed after sign and prefix.
    pub zero_pad: bool,
    /// `+`: always emit a sign for signed conversions.
    pub force_sign: bool,
    /// ` `: emit a space before non-negative signed values.
    pub space_sign: bool,
}

/// Placement of a rendered value inside a wider field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A width or precision: absent, literal, or supplied by an argument slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    None,
    Fixed(u32),
    FromArg(usize),
}

/// Raw grammar fields for one valid specifier, straight from the parser.
#[derive(Debug, Clone, Copy)]
pub struct ParsedSpec<'a> {
    /// Argument slot for the value (explicit digits or the implicit counter).
    pub index: usize,
    pub flags: Flags,
    pub width: Count,
    pub precision: Count,
    pub align: Align,
    /// Padding byte, space unless overridden by `$<byte>` or the `0` flag.
    pub fill: u8,
    /// Trailing type token; empty for alignment-only specifiers.
    pub token: &'a [u8],
}

/// A specifier carried through resolution, storage, and value loading.
///
/// Stored by value in the bounded two-pass table, so everything here is
/// `Copy` and fixed-size. `end` records where in the template the specifier
/// finished, which is what lets the second pass resume after it without
/// re-parsing.
#[derive(Debug, Clone, Copy)]
pub struct Spec<'a> {
    pub token: &'a [u8],
    pub flags: Flags,
    pub align: Align,
    pub fill: u8,
    pub index: usize,
    pub width: Count,
    pub precision: Count,
    /// Selected by resolution; `None` means the token matched nothing.
    pub formatter: Option<Formatter>,
    /// Size class of the value slot.
    pub arg_type: ArgType,
    /// Value pulled from the argument stream.
    pub value: Value<'a>,
    /// Width after argument resolution, clamped to `MAX_WIDTH`. 0 means none.
    pub width_val: u32,
    /// Precision after argument resolution; `None` means unspecified.
    pub prec_val: Option<u32>,
    /// Template offset just past the closing brace (replay resume point).
    pub end: usize,
    /// False for malformed specifiers stored only to be skipped on replay.
    pub valid: bool,
}

impl<'a> Spec<'a> {
    /// Lifts parser output into an unresolved specifier.
    pub(crate) fn from_parsed(parsed: &ParsedSpec<'a>, end: usize) -> Self {
        Self {
            token: parsed.token,
            flags: parsed.flags,
            align: parsed.align,
            fill: parsed.fill,
            index: parsed.index,
            width: parsed.width,
            precision: parsed.precision,
            formatter: None,
            arg_type: ArgType::None,
            value: Value::Null,
            width_val: 0,
            prec_val: None,
            end,
            valid: true,
        }
    }

    /// Placeholder for a malformed specifier; only `end` matters.
    pub(crate) const fn invalid(end: usize) -> Self {
        Self {
            token: b"",
            flags: Flags {
                alt_form: false,
                uppercase: false,
                zero_pad: false,
                force_sign: false,
                space_sign: false,
            },
            align: Align::Left,
            fill: b' ',
            index: 0,
            width: Count::None,
            precision: Count::None,
            formatter: None,
            arg_type: ArgType::None,
            value: Value::Null,
            width_val: 0,
            prec_val: None,
            end,
            valid: false,
        }
    }
}
