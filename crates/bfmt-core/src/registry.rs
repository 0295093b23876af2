//! Type token resolution and the custom type registry.
//!
//! Resolution is exact-match over the whole token: built-ins first, then a
//! first-match linear scan of the registered custom types. Unknown tokens
//! resolve to nothing and the engine emits a diagnostic for them.

use crate::buffer::FmtBuffer;
use crate::engine::FormatContext;
use crate::spec::Spec;
use crate::value::ArgType;
use crate::{MAX_TYPE_LEN, MAX_TYPES};

/// Formatter routine for a registered custom type.
///
/// Receives the owning context (so the routine can render nested templates
/// through [`FormatContext::write`]), the output buffer, and the resolved
/// specifier. Returns the number of bytes actually written.
pub type TypeFormatFn = fn(&FormatContext, &mut FmtBuffer<'_>, &Spec<'_>) -> usize;

/// Closed set of built-in formatters plus the custom dispatch slot.
#[derive(Debug, Clone, Copy)]
pub enum Formatter {
    /// Alignment and padding only (empty type token).
    Padding,
    Signed,
    Unsigned,
    Binary,
    Octal,
    Hex,
    Float,
    Str,
    Char,
    Custom(TypeFormatFn),
}

impl Formatter {
    /// Runs the formatter against a fully-loaded specifier.
    pub fn run(self, ctx: &FormatContext, buf: &mut FmtBuffer<'_>, spec: &Spec<'_>) -> usize {
        match self {
            Formatter::Padding => crate::align::apply(buf, spec, b""),
            Formatter::Signed => crate::num::format_signed(buf, spec),
            Formatter::Unsigned => crate::num::format_unsigned(buf, spec),
            Formatter::Binary => crate::num::format_binary(buf, spec),
            Formatter::Octal => crate::num::format_octal(buf, spec),
            Formatter::Hex => crate::num::format_hex(buf, spec),
            Formatter::Float => crate::float::format_float(buf, spec),
            Formatter::Str => crate::text::format_str(buf, spec),
            Formatter::Char => crate::text::format_char(buf, spec),
            Formatter::Custom(f) => f(ctx, buf, spec),
        }
    }
}

/// Outcome of resolving a type token.
#[derive(Debug, Clone, Copy)]
pub struct Resolution {
    pub formatter: Formatter,
    pub arg_type: ArgType,
    /// Uppercase-alias tokens (`X`, `F`) force the uppercase flag.
    pub uppercase: bool,
    /// The `p` token forces the alternate form for its `0x` prefix.
    pub alt_form: bool,
}

impl Resolution {
    const fn new(formatter: Formatter, arg_type: ArgType) -> Self {
        Self {
            formatter,
            arg_type,
            uppercase: false,
            alt_form: false,
        }
    }

    const fn upper(mut self) -> Self {
        self.uppercase = true;
        self
    }
}

fn resolve_builtin(token: &[u8]) -> Option<Resolution> {
    let resolution = match token {
        b"" => Resolution::new(Formatter::Padding, ArgType::None),
        b"d" => Resolution::new(Formatter::Signed, ArgType::Int32),
        b"u" => Resolution::new(Formatter::Unsigned, ArgType::Int32),
        b"b" => Resolution::new(Formatter::Binary, ArgType::Int32),
        b"o" => Resolution::new(Formatter::Octal, ArgType::Int32),
        b"x" => Resolution::new(Formatter::Hex, ArgType::Int32),
        b"X" => Resolution::new(Formatter::Hex, ArgType::Int32).upper(),
        b"zd" => Resolution::new(Formatter::Signed, ArgType::Size),
        b"zu" => Resolution::new(Formatter::Unsigned, ArgType::Size),
        b"zb" => Resolution::new(Formatter::Binary, ArgType::Size),
        b"zo" => Resolution::new(Formatter::Octal, ArgType::Size),
        b"zx" => Resolution::new(Formatter::Hex, ArgType::Size),
        b"zX" => Resolution::new(Formatter::Hex, ArgType::Size).upper(),
        b"lld" => Resolution::new(Formatter::Signed, ArgType::Int64),
        b"llu" => Resolution::new(Formatter::Unsigned, ArgType::Int64),
        b"llb" => Resolution::new(Formatter::Binary, ArgType::Int64),
        b"llo" => Resolution::new(Formatter::Octal, ArgType::Int64),
        b"llx" => Resolution::new(Formatter::Hex, ArgType::Int64),
        b"llX" => Resolution::new(Formatter::Hex, ArgType::Int64).upper(),
        b"f" => Resolution::new(Formatter::Float, ArgType::Double),
        b"F" => Resolution::new(Formatter::Float, ArgType::Double).upper(),
        b"s" => Resolution::new(Formatter::Str, ArgType::Pointer),
        b"c" => Resolution::new(Formatter::Char, ArgType::Int32),
        b"p" => {
            let mut r = Resolution::new(Formatter::Hex, ArgType::Pointer);
            r.alt_form = true;
            r
        }
        _ => return None,
    };
    Some(resolution)
}

#[derive(Debug, Clone, Copy)]
struct TypeEntry {
    name: [u8; MAX_TYPE_LEN],
    name_len: u8,
    formatter: TypeFormatFn,
    arg_type: ArgType,
}

impl TypeEntry {
    fn name_bytes(&self) -> &[u8] {
        &self.name[..usize::from(self.name_len)]
    }
}

/// Append-only table of custom specifier types.
///
/// Capacity is fixed at [`MAX_TYPES`]. Registration past capacity, with an
/// empty name, or with a name longer than [`MAX_TYPE_LEN`] bytes is silently
/// ignored; compare [`TypeRegistry::len`] against [`TypeRegistry::capacity`]
/// when that matters. Duplicate names are accepted and the earliest
/// registration wins at resolution time.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    entries: [Option<TypeEntry>; MAX_TYPES],
    len: usize,
}

impl TypeRegistry {
    pub const fn new() -> Self {
        Self {
            entries: [None; MAX_TYPES],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        MAX_TYPES
    }

    /// Registers `name` with its slot size class and formatter routine.
    pub fn register(&mut self, name: &str, arg_type: ArgType, formatter: TypeFormatFn) {
        let bytes = name.as_bytes();
        if bytes.is_empty() || bytes.len() > MAX_TYPE_LEN || self.len >= MAX_TYPES {
            return;
        }
        let mut stored = [0u8; MAX_TYPE_LEN];
        stored[..bytes.len()].copy_from_slice(bytes);
        self.entries[self.len] = Some(TypeEntry {
            name: stored,
            name_len: bytes.len() as u8,
            formatter,
            arg_type,
        });
        self.len += 1;
    }

    /// Resolves a type token. Built-in names cannot be shadowed.
    pub fn resolve(&self, token: &[u8]) -> Option<Resolution> {
        if let Some(resolution) = resolve_builtin(token) {
            return Some(resolution);
        }
        if token.len() > MAX_TYPE_LEN {
            return None;
        }
        for entry in self.entries[..self.len].iter().flatten() {
            if entry.name_bytes() == token {
                return Some(Resolution::new(
                    Formatter::Custom(entry.formatter),
                    entry.arg_type,
                ));
            }
        }
        None
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &FormatContext, _: &mut FmtBuffer<'_>, _: &Spec<'_>) -> usize {
        0
    }

    #[test]
    fn test_builtin_tokens_resolve() {
        let registry = TypeRegistry::new();
        for token in [
            "", "d", "u", "b", "o", "x", "X", "zd", "zu", "zb", "zo", "zx", "zX", "lld", "llu",
            "llb", "llo", "llx", "llX", "f", "F", "s", "c", "p",
        ] {
            assert!(
                registry.resolve(token.as_bytes()).is_some(),
                "token {token:?} should resolve"
            );
        }
    }

    #[test]
    fn test_uppercase_aliases_set_flag() {
        let registry = TypeRegistry::new();
        assert!(registry.resolve(b"X").unwrap().uppercase);
        assert!(registry.resolve(b"F").unwrap().uppercase);
        assert!(!registry.resolve(b"x").unwrap().uppercase);
    }

    #[test]
    fn test_pointer_forces_alt_form() {
        let registry = TypeRegistry::new();
        let resolution = registry.resolve(b"p").unwrap();
        assert!(resolution.alt_form);
        assert_eq!(resolution.arg_type, ArgType::Pointer);
    }

    #[test]
    fn test_unknown_token_does_not_resolve() {
        let registry = TypeRegistry::new();
        assert!(registry.resolve(b"q").is_none());
        assert!(registry.resolve(b"dd").is_none());
        assert!(registry.resolve(b"ld").is_none());
    }

    #[test]
    fn test_exact_match_only() {
        let mut registry = TypeRegistry::new();
        registry.register("vec", ArgType::Pointer, noop);
        assert!(registry.resolve(b"vec").is_some());
        assert!(registry.resolve(b"ve").is_none());
        assert!(registry.resolve(b"vec3").is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        fn one(_: &FormatContext, buf: &mut FmtBuffer<'_>, _: &Spec<'_>) -> usize {
            buf.write(b"1")
        }
        fn two(_: &FormatContext, buf: &mut FmtBuffer<'_>, _: &Spec<'_>) -> usize {
            buf.write(b"2")
        }
        let mut registry = TypeRegistry::new();
        registry.register("t", ArgType::None, one);
        registry.register("t", ArgType::None, two);
        let resolution = registry.resolve(b"t").unwrap();
        let ctx = FormatContext::new();
        let mut raw = [0u8; 4];
        let mut buf = FmtBuffer::new(&mut raw);
        let spec = Spec::invalid(0);
        resolution.formatter.run(&ctx, &mut buf, &spec);
        assert_eq!(buf.as_bytes(), b"1");
    }

    #[test]
    fn test_rejected_registrations() {
        let mut registry = TypeRegistry::new();
        registry.register("", ArgType::None, noop);
        assert_eq!(registry.len(), 0);
        registry.register("averylongtypenamepastthecap", ArgType::None, noop);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_capacity_saturates() {
        let mut registry = TypeRegistry::new();
        for i in 0..MAX_TYPES + 10 {
            let name = format!("t{i}");
            registry.register(&name, ArgType::None, noop);
        }
        assert_eq!(registry.len(), registry.capacity());
        assert!(registry.resolve(b"t0").is_some());
        assert!(registry.resolve(b"t127").is_some());
        assert!(registry.resolve(b"t128").is_none());
    }
}
