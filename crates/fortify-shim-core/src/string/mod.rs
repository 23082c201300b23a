//! `<string.h>` primitives.

pub mod mem;
