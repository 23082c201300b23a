//! Behavioural properties of the exported shims.
//!
//! Each [`Property`] drives the real `extern "C"` symbols through the safe
//! wrappers in `fortify_shim_abi::invoke` and reports a [`PropertyResult`].
//! Randomized properties draw from a SplitMix64 stream so a seed reproduces
//! a run exactly.

use std::ffi::c_int;
use std::io::{ErrorKind, Write};
use std::os::fd::AsRawFd;
use std::os::unix::net::UnixStream;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use fortify_shim_abi::invoke::{memchr_chk_in, poll_chk_in, poll_chk_unbacked, watch};
use fortify_shim_core::fortify::FortifiedSymbol;
use fortify_shim_core::poll::{WaitTimeout, ready_count};

use crate::config::HarnessConfig;
use crate::structured_log::Outcome;

/// A checkable behaviour of one exported symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// The search returns the first occurrence inside the first `n` bytes.
    FirstOccurrence,
    /// No occurrence inside the first `n` bytes yields null.
    AbsentIsNull,
    /// The declared buffer size never changes the search result.
    DeclaredSizeIgnored,
    /// An empty wait with timeout `T` returns 0 no earlier than `T`.
    EmptyWaitTimesOut,
    /// A zero-timeout wait over a ready entry returns a positive count at once.
    ReadyEntryPrompt,
    /// `[10, 20, 30, 40]`, byte 30, n = 4, declared size 1 gives index 2.
    ConcreteSearch,
    /// Empty set with a 50 ms timeout returns 0 after about 50 ms.
    ConcreteEmptyWait,
    /// Invalid arguments surface as `-1` with errno from `poll`.
    WaitFailureSentinel,
}

impl Property {
    pub const ALL: [Self; 8] = [
        Self::FirstOccurrence,
        Self::AbsentIsNull,
        Self::DeclaredSizeIgnored,
        Self::EmptyWaitTimesOut,
        Self::ReadyEntryPrompt,
        Self::ConcreteSearch,
        Self::ConcreteEmptyWait,
        Self::WaitFailureSentinel,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::FirstOccurrence => "first_occurrence",
            Self::AbsentIsNull => "absent_is_null",
            Self::DeclaredSizeIgnored => "declared_size_ignored",
            Self::EmptyWaitTimesOut => "empty_wait_times_out",
            Self::ReadyEntryPrompt => "ready_entry_prompt",
            Self::ConcreteSearch => "concrete_search",
            Self::ConcreteEmptyWait => "concrete_empty_wait",
            Self::WaitFailureSentinel => "wait_failure_sentinel",
        }
    }

    /// Exported symbol the property exercises.
    #[must_use]
    pub const fn symbol(self) -> FortifiedSymbol {
        match self {
            Self::FirstOccurrence
            | Self::AbsentIsNull
            | Self::DeclaredSizeIgnored
            | Self::ConcreteSearch => FortifiedSymbol::MemchrChk,
            Self::EmptyWaitTimesOut
            | Self::ReadyEntryPrompt
            | Self::ConcreteEmptyWait
            | Self::WaitFailureSentinel => FortifiedSymbol::PollChk,
        }
    }

    /// Whether the property consults the seeded input stream.
    #[must_use]
    pub const fn randomized(self) -> bool {
        matches!(
            self,
            Self::FirstOccurrence | Self::AbsentIsNull | Self::DeclaredSizeIgnored
        )
    }
}

/// Result of checking one property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyResult {
    pub property: Property,
    pub outcome: Outcome,
    pub cases: u32,
    pub detail: String,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errno: Option<i32>,
}

impl PropertyResult {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Pass
    }
}

// ---------------------------------------------------------------------------
// Input stream
// ---------------------------------------------------------------------------

/// SplitMix64 generator for reproducible regions.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `0..bound`. `bound` must be nonzero.
    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }

    pub fn byte(&mut self) -> u8 {
        self.next_u64() as u8
    }
}

/// Seed for one property: the root seed mixed with the property index.
fn property_seed(root: u64, property: Property) -> u64 {
    let index = Property::ALL
        .iter()
        .position(|p| *p == property)
        .unwrap_or(0) as u64;
    root ^ index.wrapping_mul(0xA076_1D64_78BD_642F)
}

/// A region of `len` bytes none of which equal `avoid`.
fn region_without(rng: &mut SplitMix64, len: usize, avoid: u8) -> Vec<u8> {
    (0..len)
        .map(|_| {
            let b = rng.byte();
            if b == avoid { b.wrapping_add(1) } else { b }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

type Check = Result<u32, String>;

fn check_first_occurrence(config: &HarnessConfig, rng: &mut SplitMix64) -> Check {
    let max_len = config.max_region_len.max(1);
    for _ in 0..config.trials {
        let len = 1 + rng.below(max_len);
        let needle = rng.byte();
        let pos = rng.below(len);
        let mut region = region_without(rng, len, needle);
        region[pos] = needle;
        let n = pos + 1 + rng.below(len - pos);
        // Set high bits too: only the low byte may count.
        let c = c_int::from(needle) | 0x7F00;
        let got = memchr_chk_in(&region, c, n, len);
        if got != Some(pos) {
            return Err(format!(
                "len={len} needle={needle:#04x} pos={pos} n={n}: got {got:?}"
            ));
        }
    }
    Ok(config.trials)
}

fn check_absent_is_null(config: &HarnessConfig, rng: &mut SplitMix64) -> Check {
    let max_len = config.max_region_len.max(1);
    for _ in 0..config.trials {
        let len = 1 + rng.below(max_len);
        let needle = rng.byte();
        let n = rng.below(len + 1);
        let mut region = region_without(rng, len, needle);
        // A match just past the searched prefix must stay invisible.
        if n < len {
            region[n] = needle;
        }
        let got = memchr_chk_in(&region, c_int::from(needle), n, len);
        if got.is_some() {
            return Err(format!(
                "len={len} needle={needle:#04x} n={n}: expected null, got {got:?}"
            ));
        }
    }
    Ok(config.trials)
}

fn check_declared_size_ignored(config: &HarnessConfig, rng: &mut SplitMix64) -> Check {
    let max_len = config.max_region_len.max(1);
    let mut cases = 0;
    for _ in 0..config.trials {
        let len = 1 + rng.below(max_len);
        let region: Vec<u8> = (0..len).map(|_| rng.byte()).collect();
        let needle = rng.byte();
        let n = rng.below(len + 1);
        let baseline = memchr_chk_in(&region, c_int::from(needle), n, n);
        let declared_sizes = [0, 1, n / 2, n.saturating_sub(1), len, usize::MAX];
        for declared in declared_sizes {
            cases += 1;
            let got = memchr_chk_in(&region, c_int::from(needle), n, declared);
            if got != baseline {
                return Err(format!(
                    "n={n} declared={declared}: got {got:?}, baseline {baseline:?}"
                ));
            }
        }
    }
    Ok(cases)
}

fn check_empty_wait(wait: WaitTimeout, tolerance: Duration) -> Check {
    let Some(timeout) = wait.as_duration() else {
        return Err("an empty wait without a timeout never returns".to_string());
    };
    let deadline = timeout + tolerance;
    let start = Instant::now();
    let rc = poll_chk_in(&mut [], wait.as_raw(), 0).map_err(|e| format!("poll failed: {e}"))?;
    let elapsed = start.elapsed();
    if rc != 0 {
        return Err(format!("expected 0 ready entries, got {rc}"));
    }
    if elapsed < timeout {
        return Err(format!("returned after {elapsed:?}, before the {timeout:?} timeout"));
    }
    if elapsed > deadline {
        return Err(format!("returned after {elapsed:?}, past the {deadline:?} deadline"));
    }
    Ok(1)
}

fn check_ready_entry_prompt(config: &HarnessConfig) -> Check {
    let (mut tx, rx) = UnixStream::pair().map_err(|e| format!("socketpair: {e}"))?;
    tx.write_all(b"ready").map_err(|e| format!("priming write: {e}"))?;

    let mut entries = [watch(rx.as_raw_fd(), libc::POLLIN), watch(-1, libc::POLLIN)];
    let start = Instant::now();
    let rc = poll_chk_in(&mut entries, 0, 0).map_err(|e| format!("poll failed: {e}"))?;
    let elapsed = start.elapsed();

    let nonzero = ready_count(entries.iter().map(|e| e.revents));
    if rc == 0 {
        return Err("ready entry reported as not ready".to_string());
    }
    if rc != nonzero {
        return Err(format!("returned {rc} but {nonzero} entries have revents"));
    }
    if entries[0].revents & libc::POLLIN == 0 {
        return Err(format!("revents {:#x} lacks POLLIN", entries[0].revents));
    }
    if elapsed > config.tolerance() {
        return Err(format!("zero-timeout wait took {elapsed:?}"));
    }
    Ok(1)
}

fn check_concrete_search() -> Check {
    let region = [10u8, 20, 30, 40];
    match memchr_chk_in(&region, 30, 4, 1) {
        Some(2) => Ok(1),
        other => Err(format!("expected index 2, got {other:?}")),
    }
}

/// Returns the errno observed on success so it can be logged.
fn check_failure_sentinel() -> Result<(u32, i32), String> {
    // Beyond any RLIMIT_NOFILE, rejected before the array is read.
    let over_limit = u32::MAX as libc::nfds_t;
    match poll_chk_unbacked(over_limit, 0) {
        Ok(rc) => Err(format!("expected failure sentinel, got {rc}")),
        Err(err) if err.kind() == ErrorKind::InvalidInput => Ok((1, libc::EINVAL)),
        Err(err) => Err(format!("expected EINVAL, got {err}")),
    }
}

/// Check one property under `config`.
#[must_use]
pub fn run_property(property: Property, config: &HarnessConfig) -> PropertyResult {
    let mut rng = SplitMix64::new(property_seed(config.seed, property));
    let start = Instant::now();
    let mut errno = None;
    let checked = match property {
        Property::FirstOccurrence => check_first_occurrence(config, &mut rng),
        Property::AbsentIsNull => check_absent_is_null(config, &mut rng),
        Property::DeclaredSizeIgnored => check_declared_size_ignored(config, &mut rng),
        Property::EmptyWaitTimesOut => check_empty_wait(config.wait_timeout(), config.tolerance()),
        Property::ReadyEntryPrompt => check_ready_entry_prompt(config),
        Property::ConcreteSearch => check_concrete_search(),
        Property::ConcreteEmptyWait => {
            check_empty_wait(WaitTimeout::Millis(50), config.tolerance())
        }
        Property::WaitFailureSentinel => check_failure_sentinel().map(|(cases, e)| {
            errno = Some(e);
            cases
        }),
    };
    let duration_ms = start.elapsed().as_millis() as u64;

    match checked {
        Ok(cases) => PropertyResult {
            property,
            outcome: Outcome::Pass,
            cases,
            detail: format!("{} held over {cases} case(s)", property.id()),
            duration_ms,
            errno,
        },
        Err(detail) => PropertyResult {
            property,
            outcome: Outcome::Fail,
            cases: 0,
            detail,
            duration_ms,
            errno,
        },
    }
}

/// Check every property in declaration order.
#[must_use]
pub fn run_all(config: &HarnessConfig) -> Vec<PropertyResult> {
    Property::ALL
        .into_iter()
        .map(|p| run_property(p, config))
        .collect()
}
