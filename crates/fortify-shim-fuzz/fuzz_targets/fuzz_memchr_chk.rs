#![no_main]
use libfuzzer_sys::fuzz_target;

use fortify_shim_abi::invoke::memchr_chk_in;
use fortify_shim_core::string::mem;

fuzz_target!(|data: &[u8]| {
    // Layout: needle, n (u16 LE), declared (u16 LE), region...
    if data.len() < 5 {
        return;
    }
    let needle = data[0];
    let n = usize::from(u16::from_le_bytes([data[1], data[2]]));
    let declared = usize::from(u16::from_le_bytes([data[3], data[4]]));
    let region = &data[5..];

    let expected = mem::memchr(region, needle, n);
    let got = memchr_chk_in(region, i32::from(needle), n, declared);
    assert_eq!(got, expected);
    // The declared size must never matter.
    assert_eq!(memchr_chk_in(region, i32::from(needle), n, usize::MAX), expected);
    if let Some(idx) = got {
        assert_eq!(region[idx], needle);
        assert!(!region[..idx].contains(&needle));
    }
});
