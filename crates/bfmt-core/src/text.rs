//! String and character rendering.

use crate::buffer::FmtBuffer;
use crate::spec::Spec;

/// Literal shown for null string values, regardless of precision.
const NULL_STR: &[u8] = b"(null)";

/// Selects the byte span a string specifier renders: the `(null)` fallback
/// for absent values, otherwise the string capped at a nonzero precision.
pub(crate) fn str_span<'a>(spec: &Spec<'a>) -> &'a [u8] {
    let Some(s) = spec.value.as_str() else {
        return NULL_STR;
    };
    let bytes = s.as_bytes();
    match spec.prec_val {
        Some(p) if p > 0 => &bytes[..bytes.len().min(p as usize)],
        _ => bytes,
    }
}

pub fn format_str(buf: &mut FmtBuffer<'_>, spec: &Spec<'_>) -> usize {
    buf.write(str_span(spec))
}

/// Renders the low byte of the value; NUL becomes the two-byte escape `\0`
/// so text consumers never see an embedded zero.
pub fn format_char(buf: &mut FmtBuffer<'_>, spec: &Spec<'_>) -> usize {
    let byte = spec.value.low_byte();
    if byte == 0 {
        buf.write(b"\\0")
    } else {
        buf.write_byte(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn spec_for(value: Value<'static>) -> Spec<'static> {
        let mut spec = Spec::invalid(0);
        spec.value = value;
        spec
    }

    fn render(spec: &Spec<'_>, f: fn(&mut FmtBuffer<'_>, &Spec<'_>) -> usize) -> Vec<u8> {
        let mut raw = [0u8; 64];
        let mut buf = FmtBuffer::new(&mut raw);
        f(&mut buf, spec);
        buf.as_bytes().to_vec()
    }

    #[test]
    fn test_str_plain_and_null() {
        assert_eq!(render(&spec_for(Value::Str("world")), format_str), b"world");
        assert_eq!(render(&spec_for(Value::Null), format_str), b"(null)");
    }

    #[test]
    fn test_str_precision_caps_length() {
        let mut spec = spec_for(Value::Str("hello"));
        spec.prec_val = Some(3);
        assert_eq!(render(&spec, format_str), b"hel");
        // Precision 0 means uncapped, and a cap never extends a string.
        spec.prec_val = Some(0);
        assert_eq!(render(&spec, format_str), b"hello");
        spec.prec_val = Some(99);
        assert_eq!(render(&spec, format_str), b"hello");
    }

    #[test]
    fn test_null_ignores_precision() {
        let mut spec = spec_for(Value::Null);
        spec.prec_val = Some(2);
        assert_eq!(render(&spec, format_str), b"(null)");
    }

    #[test]
    fn test_char_low_byte() {
        assert_eq!(render(&spec_for(Value::Int(0x41)), format_char), b"A");
        assert_eq!(render(&spec_for(Value::Int(0x141)), format_char), b"A");
    }

    #[test]
    fn test_char_nul_escapes() {
        assert_eq!(render(&spec_for(Value::Int(0)), format_char), b"\\0");
    }
}
