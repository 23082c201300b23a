//! Memory search: memchr.
//!
//! Safe Rust implementation operating on byte slices. It backs the
//! `__memchr_chk` export.

/// Scans the first `n` bytes of `haystack` for the byte `needle`.
///
/// Equivalent to C `memchr`. Returns the index of the first occurrence,
/// or `None` if not found. Only `min(n, haystack.len())` bytes are examined.
pub fn memchr(haystack: &[u8], needle: u8, n: usize) -> Option<usize> {
    let count = n.min(haystack.len());
    haystack[..count].iter().position(|&b| b == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memchr_found() {
        assert_eq!(memchr(&[10, 20, 30, 40], 30, 4), Some(2));
        assert_eq!(memchr(b"hello", b'h', 5), Some(0));
        assert_eq!(memchr(b"hello", b'o', 5), Some(4));
    }

    #[test]
    fn test_memchr_first_occurrence_wins() {
        assert_eq!(memchr(b"abcabc", b'c', 6), Some(2));
    }

    #[test]
    fn test_memchr_not_found() {
        assert_eq!(memchr(b"hello", b'z', 5), None);
    }

    #[test]
    fn test_memchr_respects_n() {
        assert_eq!(memchr(b"hello", b'o', 4), None);
        assert_eq!(memchr(b"hello", b'h', 0), None);
    }

    #[test]
    fn test_memchr_n_beyond_slice() {
        assert_eq!(memchr(b"hi", b'i', 100), Some(1));
        assert_eq!(memchr(b"", 0, 8), None);
    }

    #[test]
    fn test_memchr_nul_byte() {
        assert_eq!(memchr(b"ab\0cd", 0, 5), Some(2));
    }
}
