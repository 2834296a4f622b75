//! Error Model
//!
//! Flat error enum mirroring the original toolkit's `halfloop_result_t`
//! status codes, with an [`HalfloopError::exit_code`] mapping for CLI use.

use thiserror::Error;

/// Everything that can go wrong while parsing, attacking, or verifying
/// HALFLOOP-24 material.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalfloopError {
    /// A caller supplied an argument outside its valid domain (out-of-range
    /// tweak field, non-zero top byte of a 24-bit state, zero boomerang
    /// mask, and so on).
    #[error("bad argument: {0}")]
    BadArgument(String),

    /// A file could not be opened or read.
    #[error("file error: {0}")]
    FileError(#[from] std::io::Error),

    /// Input ended before the expected amount of data was read.
    #[error("unexpected end of file")]
    EndOfFile,

    /// A line in an input file did not match the expected format.
    #[error("format error: {0}")]
    FormatError(String),

    /// A code path that depends on a platform feature not compiled in.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// An invariant the implementation itself is responsible for was
    /// violated (self-test failure, impossible candidate count, and so on).
    #[error("internal error: {0}")]
    InternalError(String),

    /// Allocation failed.
    #[error("memory error")]
    MemoryError,

    /// A search completed without finding what it was looking for (no
    /// surviving candidate key, no boomerang match for a key byte).
    #[error("failure: {0}")]
    Failure(String),

    /// The random number source could not be read.
    #[error("entropy source error: {0}")]
    NetworkError(#[from] getrandom::Error),

    /// A caller requested early termination of a long-running search (not
    /// currently reachable from any public entry point, kept for
    /// enumeration symmetry with the original status codes).
    #[error("quit requested")]
    Quit,
}

impl HalfloopError {
    /// Maps an error to the process exit code the original command-line
    /// tools used for the equivalent `halfloop_result_t` value.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::BadArgument(_) => 1,
            Self::FileError(_) => 2,
            Self::EndOfFile => 3,
            Self::FormatError(_) => 4,
            Self::NotImplemented(_) => 5,
            Self::InternalError(_) => 6,
            Self::MemoryError => 7,
            Self::Failure(_) => 8,
            Self::NetworkError(_) => 10,
            Self::Quit => 9,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HalfloopError>;
