#![no_main]

use libfuzzer_sys::fuzz_target;
use bson_wire::binary::read_binary;
use bson_wire::frame::DocumentFrame;
use bson_wire::text::{read_cstring, read_string};

// Fuzz target: wire-level readers in isolation.
//
// Every reader must either fail or return a remainder that is a suffix
// of its input.
fuzz_target!(|data: &[u8]| {
    if let Ok((_, rest)) = read_cstring(data) {
        assert!(rest.len() < data.len());
    }
    if let Ok((_, rest)) = read_string(data) {
        assert!(rest.len() + 5 <= data.len());
    }
    if let Ok((_, rest)) = read_binary(data) {
        assert!(rest.len() + 5 <= data.len());
    }
    if let Ok((frame, rest)) = DocumentFrame::read_from(data) {
        assert_eq!(frame.len() + rest.len(), data.len());
    }
});
