//! Command implementations shared by the HALFLOOP-24 toolkit's binaries.
//!
//! Each `halfloop-*` executable is a thin `main.rs` over one module here,
//! the way the hash-tool binary used to split `check`/`hash` from its own
//! `main.rs`.

pub mod commands;
