#![no_main]
use bfmt_core::{MAX_WIDTH, Value, format};
use libfuzzer_sys::fuzz_target;

// Steers fuzzer bytes into computed width and precision slots. Whatever the
// slots hold, the rendered field may never exceed the clamped width and the
// buffer bound must hold.
fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let width = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let precision = i32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    let payload = i64::from_le_bytes([
        data.get(8).copied().unwrap_or(0),
        data.get(9).copied().unwrap_or(0),
        data.get(10).copied().unwrap_or(0),
        data.get(11).copied().unwrap_or(0),
        0,
        0,
        0,
        0,
    ]);

    let values = [Value::Long(payload), Value::Int(width), Value::Int(precision)];
    let mut out = [0u8; 1024];

    // Clamped width caps the aligned field; a clamped precision can still
    // add its zeros and a sign on top.
    let n = format("{0:*1.*2lld}", &mut out, &values);
    assert!(n <= MAX_WIDTH as usize + 24);
    assert_eq!(out[n], 0);

    // Same slots feeding a reordered template must consume in index order
    // and terminate.
    let n = format("{2:d} {0:*1llx} {1:d}", &mut out, &values);
    assert!(n < out.len());
});
