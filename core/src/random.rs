//! Cryptographically secure random generation, used wherever the original
//! toolkit read from `/dev/urandom`.

use crate::error::Result;

/// Fills `buf` with random bytes from the OS entropy source.
///
/// # Errors
/// Returns [`crate::error::HalfloopError::NetworkError`] if the entropy
/// source cannot be read.
pub fn random_bytes(buf: &mut [u8]) -> Result<()> {
    getrandom::getrandom(buf)?;
    Ok(())
}

/// Draws a random `u32`.
///
/// # Errors
/// Returns [`crate::error::HalfloopError::NetworkError`] if the entropy
/// source cannot be read.
pub fn random_u32() -> Result<u32> {
    let mut buf = [0u8; 4];
    random_bytes(&mut buf)?;
    Ok(u32::from_ne_bytes(buf))
}

/// Draws a random `u64`.
///
/// # Errors
/// Returns [`crate::error::HalfloopError::NetworkError`] if the entropy
/// source cannot be read.
pub fn random_u64() -> Result<u64> {
    let mut buf = [0u8; 8];
    random_bytes(&mut buf)?;
    Ok(u64::from_ne_bytes(buf))
}

/// Draws a random `u128`.
///
/// # Errors
/// Returns [`crate::error::HalfloopError::NetworkError`] if the entropy
/// source cannot be read.
pub fn random_u128() -> Result<u128> {
    let mut buf = [0u8; 16];
    random_bytes(&mut buf)?;
    Ok(u128::from_ne_bytes(buf))
}

/// Draws a random non-zero `u8`, retrying on zero.
///
/// # Errors
/// Returns [`crate::error::HalfloopError::NetworkError`] if the entropy
/// source cannot be read.
pub fn random_nonzero_u8() -> Result<u8> {
    loop {
        let mut buf = [0u8; 1];
        random_bytes(&mut buf)?;
        if buf[0] != 0 {
            return Ok(buf[0]);
        }
    }
}
