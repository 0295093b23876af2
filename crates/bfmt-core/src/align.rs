//! Field-width padding.

use crate::buffer::FmtBuffer;
use crate::spec::{Align, Spec};

/// Pads `content` to the specifier's width with its fill byte.
///
/// Spans already at or past the width are written unpadded; nothing is ever
/// truncated here.
pub fn apply(buf: &mut FmtBuffer<'_>, spec: &Spec<'_>, content: &[u8]) -> usize {
    let start = buf.written();
    let width = spec.width_val as usize;
    if content.len() >= width {
        buf.write(content);
        return buf.written() - start;
    }
    let padding = width - content.len();
    match spec.align {
        Align::Left => {
            buf.write(content);
            buf.write_repeat(spec.fill, padding);
        }
        Align::Right => {
            buf.write_repeat(spec.fill, padding);
            buf.write(content);
        }
        Align::Center => {
            // An odd leftover byte lands on the right.
            buf.write_repeat(spec.fill, padding / 2);
            buf.write(content);
            buf.write_repeat(spec.fill, padding - padding / 2);
        }
    }
    buf.written() - start
}
