//! Bounded byte sink for formatted output.
//!
//! Every engine write lands here. The buffer owns no storage: it borrows a
//! caller slice, reserves the final byte for a NUL terminator, and silently
//! drops whatever does not fit. Writers report how many bytes were actually
//! accepted, so truncation is observable without being fatal.

/// Fixed-capacity write cursor over a caller-owned byte region.
///
/// Construction zeroes the region, so the byte after the last accepted write
/// is always a NUL terminator. Usable capacity is `region length - 1`; a
/// zero-length region accepts nothing.
#[derive(Debug)]
pub struct FmtBuffer<'a> {
    data: &'a mut [u8],
    pos: usize,
    cap: usize,
}

impl<'a> FmtBuffer<'a> {
    /// Wraps `data`, zeroing it and reserving one byte for the terminator.
    pub fn new(data: &'a mut [u8]) -> Self {
        data.fill(0);
        let cap = data.len().saturating_sub(1);
        Self { data, pos: 0, cap }
    }

    /// True once the usable capacity is exhausted.
    pub fn is_full(&self) -> bool {
        self.pos >= self.cap
    }

    /// Bytes accepted so far.
    pub fn written(&self) -> usize {
        self.pos
    }

    /// Bytes still accepted before writes start dropping.
    pub fn remaining(&self) -> usize {
        self.cap - self.pos
    }

    /// Writes as much of `bytes` as fits; returns the accepted count.
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(self.remaining());
        self.data[self.pos..self.pos + n].copy_from_slice(&bytes[..n]);
        self.pos += n;
        n
    }

    /// Writes one byte if it fits; returns the accepted count (0 or 1).
    pub fn write_byte(&mut self, byte: u8) -> usize {
        if self.is_full() {
            return 0;
        }
        self.data[self.pos] = byte;
        self.pos += 1;
        1
    }

    /// Writes `count` copies of `byte`; returns the accepted count.
    pub fn write_repeat(&mut self, byte: u8, count: usize) -> usize {
        let n = count.min(self.remaining());
        self.data[self.pos..self.pos + n].fill(byte);
        self.pos += n;
        n
    }

    /// The accepted output so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.pos]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
