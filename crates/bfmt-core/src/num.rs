//! Integer rendering for bases 2, 8, 10, and 16.
//!
//! All conversions share one routine: sign, then alternate-form prefix, then
//! precision zeros, then zero-flag field zeros, then the digits. Digits are
//! produced least-significant-first into a stack scratch and reversed, so
//! nothing here allocates.

use crate::MAX_WIDTH;
use crate::buffer::FmtBuffer;
use crate::spec::Spec;

/// Base descriptor: radix, digit alphabet, alternate-form prefix.
pub(crate) struct NumFormat {
    base: u64,
    digits: &'static [u8],
    prefix: &'static [u8],
}

const BINARY: NumFormat = NumFormat {
    base: 2,
    digits: b"01",
    prefix: b"0b",
};
const OCTAL: NumFormat = NumFormat {
    base: 8,
    digits: b"01234567",
    prefix: b"0o",
};
pub(crate) const DECIMAL: NumFormat = NumFormat {
    base: 10,
    digits: b"0123456789",
    prefix: b"",
};
const HEX_LOWER: NumFormat = NumFormat {
    base: 16,
    digits: b"0123456789abcdef",
    prefix: b"0x",
};
const HEX_UPPER: NumFormat = NumFormat {
    base: 16,
    digits: b"0123456789ABCDEF",
    prefix: b"0X",
};

/// Worst case is u64::MAX in binary.
pub(crate) const DIGITS_MAX: usize = 64;

/// Renders `value` into `scratch` and returns the digit count.
pub(crate) fn render_digits(
    mut value: u64,
    scratch: &mut [u8; DIGITS_MAX],
    format: &NumFormat,
) -> usize {
    if value == 0 {
        scratch[0] = b'0';
        return 1;
    }
    let mut count = 0;
    while value > 0 {
        scratch[count] = format.digits[(value % format.base) as usize];
        value /= format.base;
        count += 1;
    }
    scratch[..count].reverse();
    count
}

fn format_integer(
    buf: &mut FmtBuffer<'_>,
    spec: &Spec<'_>,
    signed: bool,
    format: &NumFormat,
) -> usize {
    let start = buf.written();
    let width = spec.width_val.min(MAX_WIDTH) as usize;

    let mut negative = false;
    let magnitude = if signed {
        let v = spec.value.as_i64();
        negative = v < 0;
        v.unsigned_abs()
    } else {
        spec.value.as_u64()
    };

    if negative {
        buf.write_byte(b'-');
    } else if spec.flags.force_sign {
        buf.write_byte(b'+');
    } else if spec.flags.space_sign {
        buf.write_byte(b' ');
    }

    if spec.flags.alt_form {
        buf.write(format.prefix);
    }

    let mut scratch = [0u8; DIGITS_MAX];
    let len = render_digits(magnitude, &mut scratch, format);

    // Precision is a minimum digit count; the shortfall fills with zeros.
    let precision = spec.prec_val.unwrap_or(0) as usize;
    if precision > len {
        buf.write_repeat(b'0', precision - len);
    }

    // The zero flag pads to the field width inside the sign and prefix.
    let lead = buf.written() - start;
    if spec.flags.zero_pad && width > len + lead {
        buf.write_repeat(b'0', width - len - lead);
    }

    buf.write(&scratch[..len]);
    buf.written() - start
}

pub fn format_signed(buf: &mut FmtBuffer<'_>, spec: &Spec<'_>) -> usize {
    format_integer(buf, spec, true, &DECIMAL)
}

pub fn format_unsigned(buf: &mut FmtBuffer<'_>, spec: &Spec<'_>) -> usize {
    format_integer(buf, spec, false, &DECIMAL)
}

pub fn format_binary(buf: &mut FmtBuffer<'_>, spec: &Spec<'_>) -> usize {
    format_integer(buf, spec, false, &BINARY)
}

pub fn format_octal(buf: &mut FmtBuffer<'_>, spec: &Spec<'_>) -> usize {
    format_integer(buf, spec, false, &OCTAL)
}

pub fn format_hex(buf: &mut FmtBuffer<'_>, spec: &Spec<'_>) -> usize {
    let format = if spec.flags.uppercase {
        &HEX_UPPER
    } else {
        &HEX_LOWER
    };
    format_integer(buf, spec, false, format)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
