//! ABI layer for fortified I/O multiplexing.
//!
//! `__poll_chk` forwards to the platform `poll`. Return value and errno are
//! exactly what `poll` produced.

use std::ffi::c_int;

// ---------------------------------------------------------------------------
// __poll_chk
// ---------------------------------------------------------------------------

abi_fn! {
    /// Fortified `poll`. Waits for events on `nfds` entries of `fds`.
    ///
    /// Returns the number of entries with a nonzero `revents`, `0` on timeout,
    /// or `-1` with errno set (`EINTR`, `EINVAL`, `EFAULT`, `ENOMEM`). A
    /// negative `timeout` blocks indefinitely. `_fds_size` is never compared
    /// against `nfds`.
    ///
    /// # Safety
    ///
    /// Caller must ensure `fds` is valid for reads and writes of `nfds`
    /// entries.
    fn __poll_chk(
        fds: *mut libc::pollfd,
        nfds: libc::nfds_t,
        timeout: c_int,
        _fds_size: usize,
    ) -> c_int {
        unsafe { libc::poll(fds, nfds, timeout) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn empty_set_times_out() {
        let start = Instant::now();
        let rc = unsafe { __poll_chk(std::ptr::null_mut(), 0, 20, 0) };
        assert_eq!(rc, 0);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn immediate_timeout_does_not_block() {
        let start = Instant::now();
        let rc = unsafe { __poll_chk(std::ptr::null_mut(), 0, 0, 0) };
        assert_eq!(rc, 0);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn bad_pointer_reports_failure_sentinel() {
        let rc = unsafe { __poll_chk(std::ptr::null_mut(), 1, 0, 0) };
        assert_eq!(rc, -1);
        assert_eq!(
            std::io::Error::last_os_error().raw_os_error(),
            Some(libc::EFAULT)
        );
    }
}
