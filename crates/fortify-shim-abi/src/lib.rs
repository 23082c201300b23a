//! # fortify-shim-abi
//!
//! extern "C" exports of fortified libc symbols that Android NDK API 28 stub
//! libraries do not provide.
//!
//! The crate builds as a `cdylib` and a `staticlib` for the final link, and as
//! an `rlib` for tests and tooling. The exports are:
//!
//! ```text
//! __memchr_chk(s, c, n, buf_size)      -> memchr(s, c, n)
//! __poll_chk(fds, nfds, timeout, size) -> poll(fds, nfds, timeout)
//! ```
//!
//! The declared-size argument is accepted and ignored. The shims add no bounds
//! checks, no logging and no state. Both forward to unfortified primitives,
//! so exporting them from a test binary cannot recurse into the host libc's
//! own `_chk` variants.

#[macro_use]
mod macros;

pub mod invoke;
pub mod poll_abi;
pub mod string_abi;

pub use poll_abi::__poll_chk;
pub use string_abi::__memchr_chk;
