#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: `_id` fast path.
//
// The raw scan must never panic and must agree with the full decoder
// whenever both succeed: same span length, same `_id`. Without an `_id`
// every element is decoded, so the full decoder must accept it too.
fuzz_target!(|data: &[u8]| {
    let Ok((raw, raw_rest)) = bson_decoder::read_raw_document(data) else {
        return;
    };
    match bson_decoder::read_document(data) {
        Ok((doc, full_rest)) => {
            assert_eq!(raw_rest.len(), full_rest.len());
            assert_eq!(raw.id(), doc.get(bson_decoder::ID_KEY));
        }
        Err(err) => assert!(raw.id().is_some(), "raw scan accepted {err}"),
    }
});
