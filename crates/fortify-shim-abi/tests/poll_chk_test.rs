//! Integration tests for the exported `__poll_chk`.
//!
//! Run: cargo test -p fortify-shim-abi --test poll_chk_test

use std::io::Write;
use std::os::fd::AsRawFd;
use std::os::unix::net::UnixStream;
use std::time::{Duration, Instant};

use fortify_shim_abi::__poll_chk;
use fortify_shim_abi::invoke::{poll_chk_in, poll_chk_unbacked, watch};

#[test]
fn empty_wait_returns_zero_after_timeout() {
    let start = Instant::now();
    let ready = poll_chk_in(&mut [], 50, 0).unwrap();
    let elapsed = start.elapsed();
    assert_eq!(ready, 0);
    assert!(elapsed >= Duration::from_millis(50), "elapsed={elapsed:?}");
}

#[test]
fn ready_entry_returns_promptly_with_zero_timeout() {
    let (mut tx, rx) = UnixStream::pair().unwrap();
    tx.write_all(b"ping").unwrap();

    let mut entries = [watch(rx.as_raw_fd(), libc::POLLIN)];
    let start = Instant::now();
    let ready = poll_chk_in(&mut entries, 0, 0).unwrap();
    assert_eq!(ready, 1);
    assert_ne!(entries[0].revents & libc::POLLIN, 0);
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn count_matches_nonzero_revents() {
    let (mut tx_a, rx_a) = UnixStream::pair().unwrap();
    let (_tx_b, rx_b) = UnixStream::pair().unwrap();
    tx_a.write_all(b"x").unwrap();

    let mut entries = [
        watch(rx_a.as_raw_fd(), libc::POLLIN),
        watch(rx_b.as_raw_fd(), libc::POLLIN),
        watch(-1, libc::POLLIN),
    ];
    let ready = poll_chk_in(&mut entries, 0, 1).unwrap();
    let nonzero = fortify_shim_core::poll::ready_count(entries.iter().map(|e| e.revents));
    assert_eq!(ready, nonzero);
    assert_eq!(ready, 1);
}

#[test]
fn declared_size_does_not_limit_entries() {
    let (mut tx, rx) = UnixStream::pair().unwrap();
    tx.write_all(b"x").unwrap();
    let fd = rx.as_raw_fd();

    for declared in [0usize, 1, usize::MAX] {
        let mut entries = [watch(fd, libc::POLLIN), watch(fd, libc::POLLIN)];
        let rc = unsafe { __poll_chk(entries.as_mut_ptr(), 2, 0, declared) };
        assert_eq!(rc, 2, "declared={declared}");
    }
}

#[test]
fn failures_surface_as_sentinel_with_errno() {
    let err = poll_chk_unbacked(u32::MAX as libc::nfds_t, 0).unwrap_err();
    assert_eq!(err.raw_os_error(), Some(libc::EINVAL));

    let err = poll_chk_unbacked(1, 0).unwrap_err();
    assert_eq!(err.raw_os_error(), Some(libc::EFAULT));
}
