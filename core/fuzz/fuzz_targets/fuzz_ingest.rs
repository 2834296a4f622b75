#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The tuple-file parser must never panic on arbitrary bytes, well-formed
    // UTF-8 or not: malformed lines are silently skipped.
    let _ = halfloop_core::tuple::read_tuples(data);
});
