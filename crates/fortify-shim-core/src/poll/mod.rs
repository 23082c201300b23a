//! Multiplexed wait helpers.
//!
//! Classifiers for `<poll.h>` arguments and results. The wait itself is performed by
//! the platform `poll`; these helpers describe its inputs and results.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Timeout
// ---------------------------------------------------------------------------

/// Interpretation of the signed millisecond timeout passed to `poll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitTimeout {
    /// Any negative value: block until an entry is ready or a signal arrives.
    Infinite,
    /// Zero: check readiness and return immediately.
    Immediate,
    /// Block for at most this many milliseconds.
    Millis(u32),
}

impl WaitTimeout {
    /// Classify a raw `poll` timeout.
    #[must_use]
    pub const fn from_raw(timeout_ms: i32) -> Self {
        if timeout_ms < 0 {
            Self::Infinite
        } else if timeout_ms == 0 {
            Self::Immediate
        } else {
            Self::Millis(timeout_ms as u32)
        }
    }

    /// Canonical raw value (`-1` for infinite).
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Infinite => -1,
            Self::Immediate => 0,
            Self::Millis(ms) => {
                if ms > i32::MAX as u32 {
                    i32::MAX
                } else {
                    ms as i32
                }
            }
        }
    }

    /// Upper bound on how long the wait may block, `None` when unbounded.
    #[must_use]
    pub const fn as_duration(self) -> Option<Duration> {
        match self {
            Self::Infinite => None,
            Self::Immediate => Some(Duration::ZERO),
            Self::Millis(ms) => Some(Duration::from_millis(ms as u64)),
        }
    }
}

// ---------------------------------------------------------------------------
// Readiness
// ---------------------------------------------------------------------------

/// Returns true if a returned event mask marks its entry as ready.
#[must_use]
pub const fn is_ready(revents: i16) -> bool {
    revents != 0
}

/// Number of entries with a nonzero returned mask.
///
/// A successful `poll` returns exactly this count for the array it filled in.
pub fn ready_count<I>(revents: I) -> usize
where
    I: IntoIterator<Item = i16>,
{
    revents.into_iter().filter(|&r| is_ready(r)).count()
}
