//! Benchmarks for fortify-shim live under `benches/`.
//!
//! The shims forward straight to unfortified primitives, so the benches
//! compare each export against the primitive it wraps.
