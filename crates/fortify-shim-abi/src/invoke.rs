//! Safe entry points into the exported shims.
//!
//! These call the real `extern "C"` symbols with arguments derived from Rust
//! slices, so the harness, benches and fuzzers exercise exactly what a C
//! caller links against without writing `unsafe` themselves.

use std::ffi::c_int;
use std::io;

use crate::{__memchr_chk, __poll_chk};

/// Run `__memchr_chk` over `haystack`, returning the match offset.
///
/// `n` is clamped to the slice length so the call never reads past the
/// borrow. `declared` is forwarded verbatim as the declared buffer size.
pub fn memchr_chk_in(haystack: &[u8], c: c_int, n: usize, declared: usize) -> Option<usize> {
    let n = n.min(haystack.len());
    // SAFETY: `haystack` is valid for `n <= haystack.len()` bytes.
    let hit = unsafe { __memchr_chk(haystack.as_ptr().cast(), c, n, declared) };
    if hit.is_null() {
        None
    } else {
        Some(hit as usize - haystack.as_ptr() as usize)
    }
}

/// Run `__poll_chk` over `entries`.
///
/// Returns the ready count, or the OS error `poll` reported through errno
/// when the call produced the `-1` sentinel. `declared` is forwarded verbatim
/// as the declared array size.
pub fn poll_chk_in(
    entries: &mut [libc::pollfd],
    timeout_ms: c_int,
    declared: usize,
) -> io::Result<usize> {
    // SAFETY: `entries` is valid for reads and writes of `entries.len()` items.
    let rc = unsafe {
        __poll_chk(
            entries.as_mut_ptr(),
            entries.len() as libc::nfds_t,
            timeout_ms,
            declared,
        )
    };
    if rc < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(rc as usize)
    }
}

/// Call `__poll_chk` with a null array and `nfds` entries.
///
/// With a nonzero count this trips the failure path of `poll` (`EFAULT`, or
/// `EINVAL` once `nfds` exceeds `RLIMIT_NOFILE`). Nothing is dereferenced on
/// the Rust side.
pub fn poll_chk_unbacked(nfds: libc::nfds_t, timeout_ms: c_int) -> io::Result<usize> {
    // SAFETY: the kernel validates the null pointer; no Rust memory is touched.
    let rc = unsafe { __poll_chk(std::ptr::null_mut(), nfds, timeout_ms, 0) };
    if rc < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(rc as usize)
    }
}

/// A watch entry for `fd` requesting `events`, with `revents` cleared.
#[must_use]
pub fn watch(fd: c_int, events: i16) -> libc::pollfd {
    libc::pollfd {
        fd,
        events,
        revents: 0,
    }
}
