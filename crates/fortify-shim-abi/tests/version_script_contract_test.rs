//! Contract test: the linker version script exports exactly the fortified
//! symbols in the manifest, and nothing else.
//!
//! Run: cargo test -p fortify-shim-abi --test version_script_contract_test

use std::collections::BTreeSet;
use std::path::Path;

use fortify_shim_core::fortify::FortifiedSymbol;

fn version_script() -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("version_scripts/fortify_shim.map");
    std::fs::read_to_string(&path).unwrap()
}

fn section(script: &str, label: &str) -> BTreeSet<String> {
    let mut in_section = false;
    let mut out = BTreeSet::new();
    for line in script.lines().map(str::trim) {
        if line.starts_with('{') || line.starts_with('}') {
            in_section = false;
            continue;
        }
        if line.ends_with(':') {
            in_section = line.trim_end_matches(':') == label;
            continue;
        }
        if in_section && let Some(sym) = line.strip_suffix(';') {
            out.insert(sym.trim().to_string());
        }
    }
    out
}

#[test]
fn globals_match_manifest() {
    let globals = section(&version_script(), "global");
    let manifest: BTreeSet<String> = FortifiedSymbol::ALL
        .iter()
        .map(|s| s.name().to_string())
        .collect();
    assert_eq!(globals, manifest);
}

#[test]
fn everything_else_is_local() {
    let locals = section(&version_script(), "local");
    assert_eq!(locals, BTreeSet::from(["*".to_string()]));
}

#[test]
fn manifest_symbols_resolve_in_rlib() {
    // Taking the address forces the exports to exist with the C signatures.
    let memchr_chk: unsafe extern "C" fn(
        *const std::ffi::c_void,
        std::ffi::c_int,
        usize,
        usize,
    ) -> *mut std::ffi::c_void = fortify_shim_abi::__memchr_chk;
    let poll_chk: unsafe extern "C" fn(
        *mut libc::pollfd,
        libc::nfds_t,
        std::ffi::c_int,
        usize,
    ) -> std::ffi::c_int = fortify_shim_abi::__poll_chk;
    assert_ne!(memchr_chk as usize, 0);
    assert_ne!(poll_chk as usize, 0);
}
