//! Specifier parsing.
//!
//! Grammar for one specifier:
//!
//! ```text
//! {[index]:[[$fill]align][flags][width][.precision][type]}
//! ```
//!
//! One sub-parser per grammar element, all advancing a shared byte cursor.
//! Between elements the closing brace may appear at any point and jumps
//! straight to the (then empty) type token. A malformed specifier consumes
//! everything through the next `}` (or the rest of the input) and reports
//! nothing to emit; argument counters are committed only on success.

use crate::spec::{Align, Count, Flags, ParsedSpec};

/// Running argument counters threaded through a full template scan.
///
/// `next_implicit` advances only when a specifier uses the implicit form for
/// its index, width, or precision. `referenced` tracks `max slot + 1` over
/// every slot any specifier has named so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArgCounters {
    pub next_implicit: usize,
    pub referenced: usize,
}

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}

/// Parses one specifier starting at its opening `{`.
///
/// Returns the parsed fields (`None` when malformed) plus the number of
/// template bytes consumed, including both braces for a well-formed
/// specifier and the recovery span for a malformed one.
pub fn parse_spec<'a>(
    input: &'a [u8],
    max_args: usize,
    counters: &mut ArgCounters,
) -> (Option<ParsedSpec<'a>>, usize) {
    debug_assert_eq!(input.first(), Some(&b'{'));
    let mut cur = Cursor { buf: input, pos: 1 };
    let mut scratch = *counters;

    match parse_body(&mut cur, max_args, &mut scratch) {
        Some(parsed) => {
            let mut max_slot = parsed.index;
            if let Count::FromArg(slot) = parsed.width {
                max_slot = max_slot.max(slot);
            }
            if let Count::FromArg(slot) = parsed.precision {
                max_slot = max_slot.max(slot);
            }
            scratch.referenced = scratch.referenced.max(max_slot + 1);
            *counters = scratch;
            (Some(parsed), cur.pos)
        }
        None => (None, recovery_span(input)),
    }
}

fn parse_body<'a>(
    cur: &mut Cursor<'a>,
    max_args: usize,
    counters: &mut ArgCounters,
) -> Option<ParsedSpec<'a>> {
    let mut index = 0;
    let mut flags = Flags::default();
    let mut width = Count::None;
    let mut precision = Count::None;
    let mut align = Align::Left;
    let mut fill = b' ';

    'elements: {
        // `{}` keeps index 0 without touching the implicit counter.
        if at_close(cur)? {
            break 'elements;
        }
        index = parse_index(cur, max_args, counters)?;
        match cur.peek()? {
            b'}' => break 'elements,
            b':' => cur.bump(),
            _ => return None,
        }
        if at_close(cur)? {
            break 'elements;
        }
        parse_fill_align(cur, &mut fill, &mut align)?;
        if at_close(cur)? {
            break 'elements;
        }
        parse_flags(cur, &mut flags, &mut fill);
        if at_close(cur)? {
            break 'elements;
        }
        width = parse_count(cur, max_args, counters)?;
        if at_close(cur)? {
            break 'elements;
        }
        precision = parse_precision(cur, max_args, counters)?;
    }

    let token = parse_token(cur)?;
    Some(ParsedSpec {
        index,
        flags,
        width,
        precision,
        align,
        fill,
        token,
    })
}

/// `Some(true)` when the closing brace is next, `None` at end of input.
fn at_close(cur: &Cursor<'_>) -> Option<bool> {
    cur.peek().map(|b| b == b'}')
}

fn parse_index(cur: &mut Cursor<'_>, max_args: usize, counters: &mut ArgCounters) -> Option<usize> {
    if cur.peek().is_some_and(|b| b.is_ascii_digit()) {
        let index = read_int(cur) as usize;
        if index >= max_args {
            return None;
        }
        return Some(index);
    }
    let index = counters.next_implicit;
    if index >= max_args {
        return None;
    }
    counters.next_implicit += 1;
    Some(index)
}

/// `$<byte>` names an explicit fill and must be followed by an alignment
/// character; a bare alignment character is also accepted here.
fn parse_fill_align(cur: &mut Cursor<'_>, fill: &mut u8, align: &mut Align) -> Option<()> {
    if cur.eat(b'$') {
        *fill = cur.peek()?;
        cur.bump();
        if !matches!(cur.peek(), Some(b'<' | b'^' | b'>')) {
            return None;
        }
    }
    match cur.peek() {
        Some(b'<') => {
            *align = Align::Left;
            cur.bump();
        }
        Some(b'^') => {
            *align = Align::Center;
            cur.bump();
        }
        Some(b'>') => {
            *align = Align::Right;
            cur.bump();
        }
        _ => {}
    }
    Some(())
}

fn parse_flags(cur: &mut Cursor<'_>, flags: &mut Flags, fill: &mut u8) {
    loop {
        match cur.peek() {
            Some(b'#') => flags.alt_form = true,
            Some(b'!') => flags.uppercase = true,
            Some(b'0') => {
                flags.zero_pad = true;
                *fill = b'0';
            }
            Some(b'+') => flags.force_sign = true,
            Some(b' ') => flags.space_sign = true,
            _ => return,
        }
        cur.bump();
    }
}

/// Shared width/precision grammar: literal digits, `*` with an explicit slot,
/// or a bare `*` consuming the implicit counter.
fn parse_count(cur: &mut Cursor<'_>, max_args: usize, counters: &mut ArgCounters) -> Option<Count> {
    if cur.peek().is_some_and(|b| b.is_ascii_digit()) {
        return Some(Count::Fixed(read_int(cur).min(crate::MAX_WIDTH)));
    }
    if !cur.eat(b'*') {
        return Some(Count::None);
    }
    // End of input directly after `*` is malformed.
    cur.peek()?;
    if cur.peek().is_some_and(|b| b.is_ascii_digit()) {
        let slot = read_int(cur) as usize;
        if slot >= max_args {
            return None;
        }
        return Some(Count::FromArg(slot));
    }
    let slot = counters.next_implicit;
    if slot >= max_args {
        return None;
    }
    counters.next_implicit += 1;
    Some(Count::FromArg(slot))
}

fn parse_precision(
    cur: &mut Cursor<'_>,
    max_args: usize,
    counters: &mut ArgCounters,
) -> Option<Count> {
    if !cur.eat(b'.') {
        return Some(Count::None);
    }
    match parse_count(cur, max_args, counters)? {
        // A dot with no count after it is malformed.
        Count::None => None,
        count => Some(count),
    }
}

/// Everything up to the closing brace is the type token.
fn parse_token<'a>(cur: &mut Cursor<'a>) -> Option<&'a [u8]> {
    let start = cur.pos;
    while let Some(byte) = cur.peek() {
        if byte == b'}' {
            let token = &cur.buf[start..cur.pos];
            cur.bump();
            return Some(token);
        }
        cur.bump();
    }
    None
}

/// Saturating decimal read; the caller clamps or bounds the result.
fn read_int(cur: &mut Cursor<'_>) -> u32 {
    let mut value = 0u32;
    while let Some(byte) = cur.peek() {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value
            .saturating_mul(10)
            .saturating_add(u32::from(byte - b'0'));
        cur.bump();
    }
    value
}

/// Length of a malformed span: everything through the next `}`, or the rest
/// of the input when no closing brace exists.
fn recovery_span(input: &[u8]) -> usize {
    match input.iter().position(|&b| b == b'}') {
        Some(i) => i + 1,
        None => input.len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_ARGS;

    fn parse(input: &str) -> (Option<ParsedSpec<'_>>, usize, ArgCounters) {
        let mut counters = ArgCounters::default();
        let (parsed, used) = parse_spec(input.as_bytes(), MAX_ARGS, &mut counters);
        (parsed, used, counters)
    }

    #[test]
    fn test_empty_braces_reference_slot_zero() {
        let (parsed, used, counters) = parse("{}");
        let parsed = parsed.unwrap();
        assert_eq!(parsed.index, 0);
        assert_eq!(parsed.token, b"");
        assert_eq!(used, 2);
        // Slot 0 is referenced but the implicit counter does not advance.
        assert_eq!(counters.next_implicit, 0);
        assert_eq!(counters.referenced, 1);
    }

    #[test]
    fn test_implicit_index_advances_counter() {
        let (parsed, _, counters) = parse("{:d}");
        assert_eq!(parsed.unwrap().index, 0);
        assert_eq!(counters.next_implicit, 1);
        assert_eq!(counters.referenced, 1);
    }

    #[test]
    fn test_explicit_index_leaves_counter() {
        let (parsed, _, counters) = parse("{7:d}");
        assert_eq!(parsed.unwrap().index, 7);
        assert_eq!(counters.next_implicit, 0);
        assert_eq!(counters.referenced, 8);
    }

    #[test]
    fn test_fill_and_align() {
        let (parsed, _, _) = parse("{:$*^10d}");
        let parsed = parsed.unwrap();
        assert_eq!(parsed.fill, b'*');
        assert_eq!(parsed.align, Align::Center);
        assert_eq!(parsed.width, Count::Fixed(10));
        assert_eq!(parsed.token, b"d");
    }

    #[test]
    fn test_bare_align_keeps_space_fill() {
        let (parsed, _, _) = parse("{:>5s}");
        let parsed = parsed.unwrap();
        assert_eq!(parsed.fill, b' ');
        assert_eq!(parsed.align, Align::Right);
    }

    #[test]
    fn test_all_flags_any_order() {
        let (parsed, _, _) = parse("{:#!0+ d}");
        let parsed = parsed.unwrap();
        assert!(parsed.flags.alt_form);
        assert!(parsed.flags.uppercase);
        assert!(parsed.flags.zero_pad);
        assert!(parsed.flags.force_sign);
        assert!(parsed.flags.space_sign);
        // The zero flag overrides the fill byte.
        assert_eq!(parsed.fill, b'0');
    }

    #[test]
    fn test_width_literal_clamps() {
        let (parsed, _, _) = parse("{:9999d}");
        assert_eq!(parsed.unwrap().width, Count::Fixed(crate::MAX_WIDTH));
    }

    #[test]
    fn test_width_from_implicit_slot() {
        let (parsed, _, counters) = parse("{:*d}");
        let parsed = parsed.unwrap();
        assert_eq!(parsed.index, 0);
        assert_eq!(parsed.width, Count::FromArg(1));
        assert_eq!(counters.next_implicit, 2);
        assert_eq!(counters.referenced, 2);
    }

    #[test]
    fn test_width_from_explicit_slot() {
        let (parsed, _, counters) = parse("{1:*0b}");
        let parsed = parsed.unwrap();
        assert_eq!(parsed.index, 1);
        assert_eq!(parsed.width, Count::FromArg(0));
        assert_eq!(counters.next_implicit, 0);
        assert_eq!(counters.referenced, 2);
    }

    #[test]
    fn test_precision_literal_and_computed() {
        let (parsed, _, _) = parse("{:.3s}");
        assert_eq!(parsed.unwrap().precision, Count::Fixed(3));

        let (parsed, _, counters) = parse("{:.*f}");
        assert_eq!(parsed.unwrap().precision, Count::FromArg(1));
        assert_eq!(counters.next_implicit, 2);
    }

    #[test]
    fn test_empty_type_with_width_only() {
        let (parsed, used, _) = parse("{:10}");
        let parsed = parsed.unwrap();
        assert_eq!(parsed.width, Count::Fixed(10));
        assert_eq!(parsed.token, b"");
        assert_eq!(used, 5);
    }

    #[test]
    fn test_multibyte_tokens() {
        let (parsed, _, _) = parse("{:lld}");
        assert_eq!(parsed.unwrap().token, b"lld");
        let (parsed, _, _) = parse("{:vec3}");
        assert_eq!(parsed.unwrap().token, b"vec3");
    }

    #[test]
    fn test_fill_without_align_is_malformed() {
        let (parsed, used, counters) = parse("{:$x}");
        assert!(parsed.is_none());
        assert_eq!(used, 5);
        assert_eq!(counters, ArgCounters::default());
    }

    #[test]
    fn test_index_out_of_range_is_malformed() {
        let (parsed, used, _) = parse("{99:d}");
        assert!(parsed.is_none());
        assert_eq!(used, 6);
    }

    #[test]
    fn test_dot_without_count_is_malformed() {
        let (parsed, used, counters) = parse("{:.}");
        assert!(parsed.is_none());
        assert_eq!(used, 4);
        // The implicit index consumed during the attempt rolls back.
        assert_eq!(counters.next_implicit, 0);
    }

    #[test]
    fn test_unterminated_spec_is_malformed() {
        let (parsed, used, _) = parse("{:d");
        assert!(parsed.is_none());
        assert_eq!(used, 3);
    }

    #[test]
    fn test_recovery_consumes_through_close() {
        let (parsed, used, _) = parse("{:$x}tail");
        assert!(parsed.is_none());
        assert_eq!(used, 5);
    }

    #[test]
    fn test_bare_star_width_then_close() {
        // `*` followed by `}` still consumes an implicit width slot.
        let (parsed, _, counters) = parse("{:*}");
        let parsed = parsed.unwrap();
        assert_eq!(parsed.width, Count::FromArg(1));
        assert_eq!(parsed.token, b"");
        assert_eq!(counters.next_implicit, 2);
    }

    #[test]
    fn test_colon_required_after_index() {
        let (parsed, used, _) = parse("{0d}");
        assert!(parsed.is_none());
        assert_eq!(used, 4);
    }
}
