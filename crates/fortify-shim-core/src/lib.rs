//! # fortify-shim-core
//!
//! Safe Rust primitives behind the fortify-shim exported symbols.
//!
//! The ABI crate turns raw C arguments into slices and hands them to the
//! functions here. Nothing in this crate touches raw pointers.

#![deny(unsafe_code)]

pub mod fortify;
pub mod poll;
pub mod string;
