//! Floating-point rendering.
//!
//! Works on the IEEE-754 bit layout directly: specials are classified from
//! the raw exponent and mantissa fields, finite values are split into whole
//! and fractional integers and rendered through the decimal digit engine.
//! The fraction is scaled by a power of ten, so precision caps at the widest
//! power that fits alongside the rounding increment in 64 bits.

use crate::buffer::FmtBuffer;
use crate::num::{DECIMAL, DIGITS_MAX, render_digits};
use crate::spec::Spec;

/// Precision used when the specifier does not give one.
pub const PRECISION_DEFAULT: u32 = 6;
/// Largest honored precision; larger requests clamp here.
pub const PRECISION_MAX: u32 = 9;

const EXP_MASK: u64 = 0x7FF;
const FRAC_MASK: u64 = (1 << 52) - 1;
/// Values at or above 2^52 have no fractional bits.
const WHOLE_ONLY: f64 = 4_503_599_627_370_496.0;

const POW10: [u64; 10] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

pub fn format_float(buf: &mut FmtBuffer<'_>, spec: &Spec<'_>) -> usize {
    let start = buf.written();
    let bits = spec.value.as_f64().to_bits();
    let sign = bits >> 63 != 0;
    let exp = (bits >> 52) & EXP_MASK;
    let frac_bits = bits & FRAC_MASK;

    let width = spec.width_val as usize;
    let prec = spec.prec_val.unwrap_or(PRECISION_DEFAULT).min(PRECISION_MAX) as usize;

    if sign {
        buf.write_byte(b'-');
    } else if spec.flags.force_sign {
        buf.write_byte(b'+');
    } else if spec.flags.space_sign {
        buf.write_byte(b' ');
    }

    // The all-ones exponent encodes NaN (nonzero mantissa) and infinity.
    if exp == EXP_MASK {
        let text: &[u8] = match (frac_bits != 0, spec.flags.uppercase) {
            (true, true) => b"NAN",
            (true, false) => b"nan",
            (false, true) => b"INF",
            (false, false) => b"inf",
        };
        buf.write(text);
        return buf.written() - start;
    }

    if exp == 0 && frac_bits == 0 {
        buf.write_byte(b'0');
        if !spec.flags.alt_form && prec > 0 {
            buf.write_byte(b'.');
            buf.write_repeat(b'0', prec);
        }
        return buf.written() - start;
    }

    let magnitude = f64::from_bits(bits & (EXP_MASK << 52 | FRAC_MASK));
    let scale = POW10[prec];

    let (mut whole, mut fraction) = if magnitude >= WHOLE_ONLY {
        (magnitude as u64, 0)
    } else {
        let whole = magnitude as u64;
        let scaled = (magnitude - whole as f64) * scale as f64;
        let mut fraction = scaled as u64;
        let delta = scaled - fraction as f64;
        // Round half to even on the last kept digit.
        if delta > 0.5 {
            fraction += 1;
        } else if delta == 0.5 {
            let last_kept_odd = if prec == 0 {
                whole & 1 == 1
            } else {
                fraction & 1 == 1
            };
            if last_kept_odd {
                fraction += 1;
            }
        }
        (whole, fraction)
    };
    if fraction >= scale {
        fraction = 0;
        whole += 1;
    }

    // The alternate form drops the fraction when it rounds to exactly zero;
    // precision 0 leaves nothing to print either way.
    let show_fraction = prec > 0 && !(fraction == 0 && spec.flags.alt_form);

    let mut scratch = [0u8; DIGITS_MAX];
    let whole_len = render_digits(whole, &mut scratch, &DECIMAL);

    let lead = buf.written() - start;
    let content = whole_len + if show_fraction { 1 + prec } else { 0 };
    if spec.flags.zero_pad && width > content + lead {
        buf.write_repeat(b'0', width - content - lead);
    }

    buf.write(&scratch[..whole_len]);
    if show_fraction {
        buf.write_byte(b'.');
        let mut frac_scratch = [0u8; DIGITS_MAX];
        let frac_len = render_digits(fraction, &mut frac_scratch, &DECIMAL);
        // The fraction is exactly `prec` digits, leading zeros included.
        buf.write_repeat(b'0', prec - frac_len);
        buf.write(&frac_scratch[..frac_len]);
    }
    buf.written() - start
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn spec_for(value: f64) -> Spec<'static> {
        let mut spec = Spec::invalid(0);
        spec.value = Value::Float(value);
        spec
    }

    fn render(spec: &Spec<'_>) -> String {
        let mut raw = [0u8; 300];
        let mut buf = FmtBuffer::new(&mut raw);
        format_float(&mut buf, spec);
        String::from_utf8(buf.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn test_default_precision_is_six() {
        assert_eq!(render(&spec_for(3.5)), "3.500000");
        assert_eq!(render(&spec_for(0.0)), "0.000000");
    }

    #[test]
    fn test_basic_two_digit_precision() {
        let mut spec = spec_for(3.14);
        spec.prec_val = Some(2);
        assert_eq!(render(&spec), "3.14");
        spec.value = Value::Float(-3.14);
        assert_eq!(render(&spec), "-3.14");
    }

    #[test]
    fn test_fraction_keeps_leading_zeros() {
        let mut spec = spec_for(0.05);
        spec.prec_val = Some(2);
        assert_eq!(render(&spec), "0.05");
        spec.value = Value::Float(1.002);
        spec.prec_val = Some(3);
        assert_eq!(render(&spec), "1.002");
    }

    #[test]
    fn test_round_half_to_even() {
        let mut spec = spec_for(0.125);
        spec.prec_val = Some(2);
        assert_eq!(render(&spec), "0.12");
        spec.value = Value::Float(0.135);
        assert_eq!(render(&spec), "0.14");
    }

    #[test]
    fn test_rounding_carries_into_whole() {
        let mut spec = spec_for(0.99);
        spec.prec_val = Some(1);
        assert_eq!(render(&spec), "1.0");
        spec.value = Value::Float(9.999);
        spec.prec_val = Some(2);
        assert_eq!(render(&spec), "10.00");
    }

    #[test]
    fn test_zero_precision_rounds_to_whole() {
        let mut spec = spec_for(2.5);
        spec.prec_val = Some(0);
        assert_eq!(render(&spec), "2");
        spec.value = Value::Float(3.5);
        assert_eq!(render(&spec), "4");
        spec.value = Value::Float(2.7);
        assert_eq!(render(&spec), "3");
    }

    #[test]
    fn test_precision_clamps_at_nine() {
        let mut spec = spec_for(0.5);
        spec.prec_val = Some(30);
        assert_eq!(render(&spec), "0.500000000");
    }

    #[test]
    fn test_specials() {
        assert_eq!(render(&spec_for(f64::NAN)), "nan");
        assert_eq!(render(&spec_for(f64::INFINITY)), "inf");
        assert_eq!(render(&spec_for(f64::NEG_INFINITY)), "-inf");

        let mut spec = spec_for(f64::NAN);
        spec.flags.uppercase = true;
        assert_eq!(render(&spec), "NAN");
        spec.value = Value::Float(f64::INFINITY);
        assert_eq!(render(&spec), "INF");
    }

    #[test]
    fn test_signed_zero_keeps_sign() {
        assert_eq!(render(&spec_for(-0.0)), "-0.000000");
    }

    #[test]
    fn test_alt_form_drops_zero_fraction() {
        let mut spec = spec_for(3.0);
        spec.flags.alt_form = true;
        spec.prec_val = Some(1);
        assert_eq!(render(&spec), "3");
        spec.value = Value::Float(3.1);
        assert_eq!(render(&spec), "3.1");
        // Rounding down to a zero fraction also drops it.
        spec.value = Value::Float(3.04);
        assert_eq!(render(&spec), "3");
    }

    #[test]
    fn test_force_and_space_sign() {
        let mut spec = spec_for(3.5);
        spec.flags.force_sign = true;
        spec.prec_val = Some(1);
        assert_eq!(render(&spec), "+3.5");
        spec.flags.force_sign = false;
        spec.flags.space_sign = true;
        assert_eq!(render(&spec), " 3.5");
        spec.value = Value::Float(f64::INFINITY);
        assert_eq!(render(&spec), " inf");
    }

    #[test]
    fn test_zero_flag_pads_inside_sign() {
        let mut spec = spec_for(-3.5);
        spec.flags.zero_pad = true;
        spec.prec_val = Some(2);
        spec.width_val = 8;
        assert_eq!(render(&spec), "-0003.50");
    }

    #[test]
    fn test_subnormal_renders_as_zero_fraction() {
        let mut spec = spec_for(f64::MIN_POSITIVE / 2.0);
        spec.prec_val = Some(3);
        assert_eq!(render(&spec), "0.000");
    }

    #[test]
    fn test_large_whole_values() {
        let mut spec = spec_for(1e15);
        spec.prec_val = Some(1);
        assert_eq!(render(&spec), "1000000000000000.0");
    }
}
