//! Template scanning and the single-pass/two-pass formatting engine.
//!
//! A template is copied byte for byte except for `{...}` specifiers and the
//! `{{` escape. Arguments are consumed through a strictly-ordered stream, so
//! as long as every specifier only needs slots at or behind the read
//! position the engine renders in a single forward scan. The first specifier
//! that references a slot ahead of the next implicit position switches the
//! scan into two-pass mode: from that point specifiers are parsed, resolved,
//! and stored (bounded by `MAX_SPECS`) without emitting anything, the
//! argument stream is drained into a slot table, and a second scan replays
//! the stored specifiers interleaved with the literal text, resuming after
//! each one at its recorded end offset.
//!
//! Malformed specifiers emit nothing in either mode. A well-formed specifier
//! whose type token matches neither a built-in nor a registered custom type
//! emits a `{bad type: <token>}` diagnostic instead of its value.

use crate::buffer::FmtBuffer;
use crate::parse::{ArgCounters, parse_spec};
use crate::registry::{Formatter, TypeFormatFn, TypeRegistry};
use crate::spec::{Count, ParsedSpec, Spec};
use crate::value::{ArgStream, ArgType, Value};
use crate::{MAX_ARGS, MAX_SPECS, MAX_WIDTH};

/// Staging area for one value before width alignment.
const SCRATCH_LEN: usize = MAX_WIDTH as usize + 1;

static EMPTY_CONTEXT: FormatContext = FormatContext::new();

/// Formats `template` into `out` with the built-in types only.
///
/// Shorthand for [`FormatContext::format`] on a context with an empty
/// custom type registry.
pub fn format(template: &str, out: &mut [u8], args: &[Value<'_>]) -> usize {
    EMPTY_CONTEXT.format(template, out, args)
}

/// Formatting context owning a private custom type registry.
///
/// Registration takes `&mut self` and formatting takes `&self`, so a context
/// can be shared freely (including across threads) once its registrations
/// are done.
#[derive(Debug, Clone)]
pub struct FormatContext {
    registry: TypeRegistry,
}

impl FormatContext {
    pub const fn new() -> Self {
        Self {
            registry: TypeRegistry::new(),
        }
    }

    /// Registers a custom specifier type. Registration past capacity or with
    /// an empty or overlong name is silently ignored; see
    /// [`TypeRegistry::register`].
    pub fn register_type(&mut self, name: &str, arg_type: ArgType, formatter: TypeFormatFn) {
        self.registry.register(name, arg_type, formatter);
    }

    /// Read access to the registry, for length and capacity checks.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Formats `template` into `out`, consuming `args` in slot order.
    ///
    /// `out` is zeroed up front and its final byte stays reserved as a NUL
    /// terminator. Returns the number of bytes actually written; when the
    /// output does not fit, the return is the truncated count, never the
    /// would-be length.
    pub fn format(&self, template: &str, out: &mut [u8], args: &[Value<'_>]) -> usize {
        let mut buf = FmtBuffer::new(out);
        self.write(&mut buf, template, args)
    }

    /// Formats into an existing buffer, appending at its cursor. This is the
    /// entry point custom formatters use to render nested templates through
    /// the same context. Returns the bytes written by this call alone.
    pub fn write<'a>(
        &self,
        buf: &mut FmtBuffer<'_>,
        template: &'a str,
        args: &'a [Value<'a>],
    ) -> usize {
        let tpl = template.as_bytes();
        let start = buf.written();
        let mut stream = ArgStream::new(args);
        let mut slots = [Value::Null; MAX_ARGS];
        let mut counters = ArgCounters::default();
        let mut table = [Spec::invalid(0); MAX_SPECS];
        let mut stored = 0;
        let mut two_pass = false;
        let mut switch_pos = 0;

        // ---- first scan ----
        let mut pos = 0;
        while pos < tpl.len() {
            if !two_pass && buf.is_full() {
                break;
            }
            let byte = tpl[pos];
            if byte != b'{' {
                if !two_pass {
                    buf.write_byte(byte);
                }
                pos += 1;
                continue;
            }
            if tpl.get(pos + 1) == Some(&b'{') {
                if !two_pass {
                    buf.write_byte(b'{');
                }
                pos += 2;
                continue;
            }
            if two_pass && stored >= MAX_SPECS {
                // Table full: replay what is stored, the rest stays literal.
                break;
            }

            let spec_start = pos;
            let (parsed, consumed) = parse_spec(&tpl[pos..], MAX_ARGS, &mut counters);
            pos += consumed;
            let mut spec = match parsed {
                Some(p) => self.resolve_spec(&p, pos),
                None => Spec::invalid(pos),
            };

            if spec.valid && !two_pass && counters.referenced > counters.next_implicit + 1 {
                // Slot referenced ahead of the stream: defer everything
                // from this specifier on to the second pass.
                two_pass = true;
                switch_pos = spec_start;
            }

            if two_pass {
                table[stored] = spec;
                stored += 1;
                continue;
            }
            if !spec.valid {
                continue;
            }
            if spec.formatter.is_none() {
                write_bad_type(buf, spec.token);
                continue;
            }
            if spec.arg_type == ArgType::None {
                self.emit(buf, &spec);
                continue;
            }

            while stream.consumed() < counters.referenced {
                let slot = stream.consumed();
                slots[slot] = stream.pull();
            }
            load_values(&mut spec, &slots);
            self.emit(buf, &spec);
        }

        if !two_pass {
            return buf.written() - start;
        }

        // ---- batch load ----
        while stream.consumed() < counters.referenced {
            let slot = stream.consumed();
            slots[slot] = stream.pull();
        }

        // ---- replay ----
        let mut pos = switch_pos;
        let mut next = 0;
        while pos < tpl.len() && !buf.is_full() {
            if tpl[pos] != b'{' {
                buf.write_byte(tpl[pos]);
                pos += 1;
                continue;
            }
            if tpl.get(pos + 1) == Some(&b'{') {
                buf.write_byte(b'{');
                pos += 2;
                continue;
            }
            if next >= stored {
                break;
            }
            let mut spec = table[next];
            next += 1;
            pos = spec.end;
            if !spec.valid {
                continue;
            }
            if spec.formatter.is_none() {
                write_bad_type(buf, spec.token);
                continue;
            }
            load_values(&mut spec, &slots);
            self.emit(buf, &spec);
        }

        // Anything past the point where the table filled renders verbatim.
        while pos < tpl.len() && !buf.is_full() {
            buf.write_byte(tpl[pos]);
            pos += 1;
        }

        buf.written() - start
    }

    /// Attaches formatter and size class to a parsed specifier. Literal
    /// widths and precisions resolve here; computed ones wait for the slots.
    fn resolve_spec<'a>(&self, parsed: &ParsedSpec<'a>, end: usize) -> Spec<'a> {
        let mut spec = Spec::from_parsed(parsed, end);
        if let Some(resolution) = self.registry.resolve(parsed.token) {
            spec.formatter = Some(resolution.formatter);
            spec.arg_type = resolution.arg_type;
            if resolution.uppercase {
                spec.flags.uppercase = true;
            }
            if resolution.alt_form {
                spec.flags.alt_form = true;
            }
        }
        if let Count::Fixed(w) = parsed.width {
            spec.width_val = w;
        }
        if let Count::Fixed(p) = parsed.precision {
            spec.prec_val = Some(p);
        }
        spec
    }

    /// Renders one fully-loaded specifier. Strings and empty types align
    /// their spans directly and are never cut short; every other formatter
    /// with a width stages through a scratch buffer first, which caps a
    /// staged value at `MAX_WIDTH` bytes.
    fn emit(&self, buf: &mut FmtBuffer<'_>, spec: &Spec<'_>) {
        let Some(formatter) = spec.formatter else {
            return;
        };
        match formatter {
            Formatter::Padding => {
                crate::align::apply(buf, spec, b"");
            }
            Formatter::Str => {
                crate::align::apply(buf, spec, crate::text::str_span(spec));
            }
            _ if spec.width_val > 0 => {
                let mut scratch = [0u8; SCRATCH_LEN];
                let mut staged = FmtBuffer::new(&mut scratch);
                formatter.run(self, &mut staged, spec);
                crate::align::apply(buf, spec, staged.as_bytes());
            }
            _ => {
                formatter.run(self, buf, spec);
            }
        }
    }
}

impl Default for FormatContext {
    fn default() -> Self {
        Self::new()
    }
}

fn load_values<'a>(spec: &mut Spec<'a>, slots: &[Value<'a>; MAX_ARGS]) {
    spec.value = slots[spec.index];
    if let Count::FromArg(slot) = spec.width {
        spec.width_val = slots[slot].as_count();
    }
    if let Count::FromArg(slot) = spec.precision {
        spec.prec_val = Some(slots[slot].as_count());
    }
}

/// Unknown-token diagnostic, emitted in place of the specifier's value.
fn write_bad_type(buf: &mut FmtBuffer<'_>, token: &[u8]) {
    buf.write(b"{bad type: ");
    buf.write(token);
    buf.write_byte(b'}');
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn run(template: &str, args: &[Value<'_>]) -> String {
        let mut out = [0u8; 512];
        let n = format(template, &mut out, args);
        String::from_utf8(out[..n].to_vec()).unwrap()
    }

    #[test]
    fn test_uppercase_alias_merges_into_flags() {
        let ctx = FormatContext::new();
        let parsed_upper = crate::spec::ParsedSpec {
            index: 0,
            flags: crate::spec::Flags::default(),
            width: Count::None,
            precision: Count::None,
            align: crate::spec::Align::Left,
            fill: b' ',
            token: b"X",
        };
        let spec = ctx.resolve_spec(&parsed_upper, 0);
        assert!(spec.flags.uppercase);
        assert_eq!(spec.arg_type, ArgType::Int32);
    }

    #[test]
    fn test_staging_caps_custom_content_at_max_width() {
        fn wide(_: &FormatContext, buf: &mut FmtBuffer<'_>, _: &Spec<'_>) -> usize {
            buf.write_repeat(b'x', 400)
        }
        let mut ctx = FormatContext::new();
        ctx.register_type("wide", ArgType::None, wide);
        let mut out = [0u8; 512];
        let n = ctx.format("{:5wide}", &mut out, &[]);
        assert_eq!(n, MAX_WIDTH as usize);

        // Without a width nothing is staged, so nothing is capped.
        let n = ctx.format("{:wide}", &mut out, &[]);
        assert_eq!(n, 400);
    }

    #[test]
    fn test_unknown_token_diagnostic() {
        assert_eq!(run("{:nope}", &[Value::Int(1)]), "{bad type: nope}");
    }

    #[test]
    fn test_truncation_returns_written_count() {
        let mut out = [0u8; 8];
        let n = format("{:d}{:d}", &mut out, &[Value::Int(1234), Value::Int(5678)]);
        assert_eq!(n, 7);
        assert_eq!(&out[..n], b"1234567");
        assert_eq!(out[7], 0);
    }
}
