//! Fuzz target for raw result normalization.
//!
//! This fuzzer feeds arbitrary byte sequences through JSON parsing and
//! every result-shape normalizer, checking for panics, crashes, or hangs.
//!
//! Run with:
//!   cargo +nightly fuzz run normalize_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use taskviz::normalize::fuzz_normalize_bytes;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    fuzz_normalize_bytes(data);
});
