//! Fuzz target for location-token stream parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the token scanner and
//! chunker, checking for panics, crashes, or hangs.
//!
//! Run with:
//!   cargo +nightly fuzz run loc_stream_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use taskviz::normalize::loc_tokens::parse_location_stream;
use taskviz::normalize::ChunkPolicy;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid OOM on very large inputs.
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = parse_location_stream(text, ChunkPolicy::default());
    }
});
