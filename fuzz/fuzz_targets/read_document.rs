#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full document decoder entry point.
//
// Calls `read_document(data)` on arbitrary input bytes.
// Catches bugs in:
// - Length prefix and terminator validation
// - Tag dispatch and every value reader
// - Nested document / array recursion and the depth guard
// - Array index normalization
// - Slicing past the end of the buffer
fuzz_target!(|data: &[u8]| {
    if let Ok((_, rest)) = bson_decoder::read_document(data) {
        assert!(rest.len() < data.len());
    }
});
