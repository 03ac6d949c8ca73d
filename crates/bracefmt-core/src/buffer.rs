//! Growable output buffer.
//!
//! Contiguous byte storage backing one in-flight formatting call.
//! Logical size and physical capacity are tracked separately; when a
//! reallocation is needed the capacity grows to at least 1.5x its
//! previous value so appends stay O(1) amortized.
//!
//! The buffer never appends an implicit NUL terminator; callers that
//! need one use [`OutBuf::to_bytes_with_nul`].

/// Contract for zero-allocation encoders that write directly into
/// reserved buffer space.
///
/// `append_to` returns the number of bytes written, or `None` when the
/// destination slice is too small to hold the encoding.
pub trait AppendTransaction {
    /// Upper bound on the bytes `append_to` will write.
    fn max_len(&self) -> usize;

    /// Writes the encoding into `dest`.
    fn append_to(&self, dest: &mut [u8]) -> Option<usize>;
}

/// Append-only byte buffer with amortized growth.
#[derive(Debug, Default)]
pub struct OutBuf {
    data: Vec<u8>,
}

impl OutBuf {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Logical size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Physical capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Borrowed view of the contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Discards the contents, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Consumes the buffer, returning the contents.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Copy of the contents with a single NUL byte appended. The logical
    /// contents never include the terminator.
    pub fn to_bytes_with_nul(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() + 1);
        out.extend_from_slice(&self.data);
        out.push(0);
        out
    }

    /// Ensures room for `additional` more bytes. On reallocation the new
    /// capacity is `max(needed, capacity + capacity / 2)`.
    pub fn reserve(&mut self, additional: usize) {
        let needed = self.data.len() + additional;
        if needed > self.data.capacity() {
            let target = needed.max(self.data.capacity() + self.data.capacity() / 2);
            self.data.reserve_exact(target - self.data.len());
        }
    }

    /// Grows the logical size by `n` zeroed bytes and returns the new
    /// region for in-place field assembly.
    pub fn grow(&mut self, n: usize) -> &mut [u8] {
        self.reserve(n);
        let start = self.data.len();
        self.data.resize(start + n, 0);
        &mut self.data[start..]
    }

    pub fn push(&mut self, byte: u8) {
        self.reserve(1);
        self.data.push(byte);
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        self.data.extend_from_slice(bytes);
    }

    /// Optimistically appends a zero-allocation encoder's output: grows
    /// by the encoder's maximum, lets it write in place, then trims to
    /// the bytes actually produced.
    pub fn append_transaction<T: AppendTransaction>(&mut self, t: &T) {
        let start = self.data.len();
        let max = t.max_len();
        self.reserve(max);
        self.data.resize(start + max, 0);
        let written = t.append_to(&mut self.data[start..]).unwrap_or(0);
        self.data.truncate(start + written);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_len() {
        let mut buf = OutBuf::new();
        buf.append(b"hello");
        buf.push(b'!');
        assert_eq!(buf.as_bytes(), b"hello!");
        assert_eq!(buf.len(), 6);
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_growth_factor_at_least_1_5x() {
        let mut buf = OutBuf::new();
        buf.grow(64);
        let before = buf.capacity();
        // one byte past capacity forces a reallocation
        buf.grow(before - buf.len() + 1);
        assert!(buf.capacity() >= before + before / 2);
    }

    #[test]
    fn test_grow_returns_new_region() {
        let mut buf = OutBuf::new();
        buf.append(b"ab");
        let region = buf.grow(3);
        assert_eq!(region.len(), 3);
        region.copy_from_slice(b"cde");
        assert_eq!(buf.as_bytes(), b"abcde");
    }

    #[test]
    fn test_nul_materializer_leaves_len_unchanged() {
        let mut buf = OutBuf::new();
        buf.append(b"abc");
        let with_nul = buf.to_bytes_with_nul();
        assert_eq!(with_nul, b"abc\0");
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut buf = OutBuf::with_capacity(64);
        buf.append(b"data");
        let cap = buf.capacity();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), cap);
    }

    struct FixedWrite(&'static [u8]);

    impl AppendTransaction for FixedWrite {
        fn max_len(&self) -> usize {
            self.0.len()
        }
        fn append_to(&self, dest: &mut [u8]) -> Option<usize> {
            dest[..self.0.len()].copy_from_slice(self.0);
            Some(self.0.len())
        }
    }

    #[test]
    fn test_append_transaction() {
        let mut buf = OutBuf::new();
        buf.append(b"x=");
        buf.append_transaction(&FixedWrite(b"ff"));
        assert_eq!(buf.as_bytes(), b"x=ff");
    }
}
