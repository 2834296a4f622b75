#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The tweak CLI accepts an arbitrary argv string as hex; parsing that
    // string and then the resulting tweak must never panic.
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(tweak) = u64::from_str_radix(text.trim(), 16) {
            let _ = halfloop_core::tweak::parse_tweak(tweak);
        }
    }
});
