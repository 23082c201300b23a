//! ABI layer for fortified `<string.h>` functions.

use std::ffi::{c_int, c_void};

// ---------------------------------------------------------------------------
// __memchr_chk
// ---------------------------------------------------------------------------

abi_fn! {
    /// Fortified `memchr`. Locates the first occurrence of byte `c` in the
    /// first `n` bytes of `s`.
    ///
    /// Returns a pointer to the matching byte, or null if not found. Only the
    /// low 8 bits of `c` are significant. `_buf_size` is never compared
    /// against `n`. The scan stops at the first match, so an `n` larger than
    /// the region (up to `usize::MAX`) is fine when `c` occurs inside it.
    ///
    /// # Safety
    ///
    /// Caller must ensure `s` is readable up to the first occurrence of `c`,
    /// or for `n` bytes when `c` does not occur.
    fn __memchr_chk(s: *const c_void, c: c_int, n: usize, _buf_size: usize) -> *mut c_void {
        unsafe { libc::memchr(s, c, n) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(region: &[u8], idx: usize) -> *mut c_void {
        region[idx..].as_ptr().cast_mut().cast()
    }

    fn search(region: &[u8], c: c_int, n: usize, buf_size: usize) -> *mut c_void {
        unsafe { __memchr_chk(region.as_ptr().cast(), c, n, buf_size) }
    }

    #[test]
    fn finds_byte_at_offset() {
        let region = [10u8, 20, 30, 40];
        let hit = search(&region, 30, 4, 4);
        assert_eq!(hit, at(&region, 2));
    }

    #[test]
    fn small_declared_size_is_ignored() {
        let region = [10u8, 20, 30, 40];
        let hit = search(&region, 30, 4, 1);
        assert_eq!(hit, at(&region, 2));
    }

    #[test]
    fn missing_byte_is_null() {
        let region = *b"abcdef";
        assert!(search(&region, b'z' as c_int, region.len(), region.len()).is_null());
    }

    #[test]
    fn match_past_n_is_null() {
        let region = *b"abcdef";
        assert!(search(&region, b'f' as c_int, 5, 6).is_null());
    }

    #[test]
    fn zero_length_is_null() {
        let region = *b"abc";
        assert!(search(&region, b'a' as c_int, 0, 3).is_null());
    }

    #[test]
    fn only_low_byte_of_needle_counts() {
        let region = [0x00u8, 0x41, 0xFF];
        assert_eq!(search(&region, 0x141, 3, 0), at(&region, 1));
        assert_eq!(search(&region, -1, 3, 0), at(&region, 2));
    }
}
