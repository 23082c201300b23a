//! Conformance harness for fortify-shim.
//!
//! This crate provides:
//! - Property checks: drive the exported `__memchr_chk` / `__poll_chk` with
//!   generated inputs and compare against the unfortified contract
//! - Structured logging: JSONL records plus a SHA-256 artifact index
//! - Reports: JSON and markdown summaries of a verification run
//! - Symbol manifest: machine-readable description of the exports

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod manifest;
pub mod properties;
pub mod report;
pub mod structured_log;

pub use config::HarnessConfig;
pub use error::HarnessError;
pub use properties::{Property, PropertyResult};
pub use report::VerificationReport;
