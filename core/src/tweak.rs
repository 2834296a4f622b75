//! Tweak codec.
//!
//! A HALFLOOP-24 tweak packs the ALE link-establishment frame's
//! month/day/time/word/frequency fields into a 64-bit value. This module
//! parses that layout and validates it, and rebuilds it from structured
//! fields.

use crate::error::{HalfloopError, Result};

/// The days-in-month table used to validate [`TweakFields::day`] against
/// [`TweakFields::month`]. Always treats February as having 29 days, as the
/// original format carries no year.
const DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// The structured fields packed into a 64-bit tweak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweakFields {
    /// Month, 1-12.
    pub month: u32,
    /// Day of month, 1 to the number of days in `month`.
    pub day: u32,
    /// Minutes since midnight, 0-1439.
    pub coarse_time: u32,
    /// Seconds within the current minute, 0-59.
    pub fine_time: u32,
    /// ALE link word, 0-255.
    pub word: u32,
    /// Reserved field, must be zero.
    pub zero: u32,
    /// Frequency in Hz, quantized to 100 Hz steps, 100 to 999_999_900.
    pub frequency_hz: u32,
}

impl TweakFields {
    fn validate(self) -> Result<()> {
        let days = DAYS_IN_MONTH
            .get(self.month.wrapping_sub(1) as usize)
            .copied();
        let valid = matches!(days, Some(d) if self.month >= 1 && self.month <= 12 && self.day >= 1 && self.day <= d)
            && self.coarse_time < 1440
            && self.fine_time < 60
            && self.word <= 255
            && self.zero == 0
            && self.frequency_hz > 0
            && self.frequency_hz < 1_000_000_000
            && self.frequency_hz % 100 == 0;
        if valid {
            Ok(())
        } else {
            Err(HalfloopError::FormatError(format!(
                "tweak fields out of range: {self:?}"
            )))
        }
    }
}

/// Unpacks a 64-bit tweak into its structured fields.
///
/// # Errors
/// Returns [`HalfloopError::FormatError`] if any BCD frequency nibble is not
/// a decimal digit, or if the unpacked fields fail range validation.
pub fn parse_tweak(tweak: u64) -> Result<TweakFields> {
    let mut frequency_hz: u32 = 0;
    for i in 0..7 {
        frequency_hz *= 10;
        let d = (tweak >> (24 - i * 4)) & 0xf;
        if d >= 10 {
            return Err(HalfloopError::FormatError(format!(
                "tweak {tweak:#018x} has a non-decimal BCD frequency nibble"
            )));
        }
        frequency_hz += d as u32;
    }
    frequency_hz *= 100;

    let fields = TweakFields {
        month: (tweak >> 60) as u32,
        day: ((tweak >> 55) & 0x1f) as u32,
        coarse_time: ((tweak >> 44) & 0x7ff) as u32,
        fine_time: ((tweak >> 38) & 0x3f) as u32,
        word: ((tweak >> 30) & 0xff) as u32,
        zero: ((tweak >> 28) & 0x3) as u32,
        frequency_hz,
    };
    fields.validate()?;
    Ok(fields)
}

/// Packs structured fields into a 64-bit tweak.
///
/// # Errors
/// Returns [`HalfloopError::FormatError`] if `fields` fails range validation.
pub fn create_tweak(fields: TweakFields) -> Result<u64> {
    fields.validate()?;
    let mut tweak = u64::from(fields.month) << 60;
    tweak |= u64::from(fields.day) << 55;
    tweak |= u64::from(fields.coarse_time) << 44;
    tweak |= u64::from(fields.fine_time) << 38;
    tweak |= u64::from(fields.word) << 30;
    tweak |= u64::from(fields.zero) << 28;

    let mut frequency = fields.frequency_hz / 100;
    for i in 0..7u64 {
        tweak |= u64::from(frequency % 10) << (i * 4);
        frequency /= 10;
    }
    Ok(tweak)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TweakFields {
        TweakFields {
            month: 6,
            day: 15,
            coarse_time: 720,
            fine_time: 30,
            word: 17,
            zero: 0,
            frequency_hz: 7_654_300,
        }
    }

    #[test]
    fn round_trips_through_create_and_parse() {
        let fields = sample();
        let packed = create_tweak(fields).unwrap();
        assert_eq!(parse_tweak(packed).unwrap(), fields);
    }

    #[test]
    fn rejects_month_out_of_range() {
        let mut fields = sample();
        fields.month = 13;
        assert!(create_tweak(fields).is_err());
    }

    #[test]
    fn rejects_day_beyond_month_length() {
        let mut fields = sample();
        fields.month = 4;
        fields.day = 31;
        assert!(create_tweak(fields).is_err());
    }

    #[test]
    fn rejects_nonzero_reserved_field() {
        let mut fields = sample();
        fields.zero = 1;
        assert!(create_tweak(fields).is_err());
    }

    #[test]
    fn rejects_non_decimal_bcd_nibble() {
        // bit 24..28 set to 0xa, an invalid BCD digit for the most significant
        // frequency nibble.
        let tweak = 0x0000_0000_0a00_0000_u64 | (6u64 << 60) | (15u64 << 55);
        assert!(parse_tweak(tweak).is_err());
    }

    #[test]
    fn coarse_time_above_1023_round_trips() {
        let mut fields = sample();
        fields.coarse_time = 1439;
        let packed = create_tweak(fields).unwrap();
        assert_eq!(parse_tweak(packed).unwrap(), fields);
    }

    #[test]
    fn frequency_must_be_a_multiple_of_100() {
        let packed = create_tweak(sample()).unwrap();
        let fields = parse_tweak(packed).unwrap();
        assert_eq!(fields.frequency_hz % 100, 0);
    }
}
