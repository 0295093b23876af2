#![no_main]
use bfmt_core::{Value, args, format};
use libfuzzer_sys::fuzz_target;

// Arbitrary template bytes against a fixed argument set. Formatting must
// never panic, never write past the buffer, and must leave the reserved
// terminator byte intact.
fuzz_target!(|data: &[u8]| {
    let Ok(template) = core::str::from_utf8(data) else {
        return;
    };
    let values = args![42, -7i64, 3.125, "fuzz", 0usize, Value::Null];

    let mut out = [0u8; 256];
    let n = format(template, &mut out, &values);
    assert!(n < out.len());
    assert_eq!(out[n], 0);

    // Degenerate buffers accept nothing.
    let mut tiny = [0u8; 1];
    assert_eq!(format(template, &mut tiny, &values), 0);
});
