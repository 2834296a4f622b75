//! HALFLOOP-24 cryptanalysis toolkit.
//!
//! This crate implements the differential meet-in-the-middle key-recovery
//! pipeline, the bit-sliced brute-force completion of the remaining key
//! bits, and the boomerang-distinguisher byte-recovery attack against the
//! HALFLOOP-24 tweakable block cipher, alongside the cipher primitives,
//! tweak codec, and tuple file format they all share.

pub mod attack;
pub mod bitslice;
pub mod boomerang;
pub mod cipher;
pub mod driver;
pub mod error;
pub mod generator;
pub mod logging;
pub mod pairs;
pub mod random;
pub mod tuple;
pub mod tweak;

pub use error::{HalfloopError, Result};
