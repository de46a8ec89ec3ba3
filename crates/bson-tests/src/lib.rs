//! Shared fixtures for the integration tests and benchmarks.
//!
//! Fixtures are hand-assembled hex so they pin the wire format
//! independently of the encoder. Each constant notes the document it
//! spells out.

use bson_types::{Document, ObjectId, Value};

/// `{"hello": "world"}`
pub const HELLO_WORLD: &str = "160000000268656c6c6f0006000000776f726c640000";

/// `{"_id": ObjectId(00..0b), "name": "ada", "tags": ["a", "b"],
///   "meta": {"visits": NumberLong(7), "admin": true}}`
pub const USER: &str = concat!(
    "64000000",
    "075f696400000102030405060708090a0b",
    "026e616d65000400000061646100",
    "0474616773001700000002300002000000610002310002000000620000",
    "036d657461001d000000127669736974730007000000000000000861646d696e000100",
    "00",
);

/// One element of every supported type, in tag order.
pub const ALL_TYPES: &str = concat!(
    "e9000000",
    "01646f75626c6500000000000000f83f",
    "02737472696e6700020000007300",
    "03646f63756d656e74000500000000",
    "046172726179000c0000001030000100000000",
    "0562696e617279000200000003cafe",
    "06756e646566696e656400",
    "076f626a656374496400000102030405060708090a0b",
    "08626f6f6c0000",
    "0964617465007b98f73e5d010000",
    "0a6e756c6c00",
    "0b7265676578005e612e2a006900",
    "0d636f6465000700000078203d3e207800",
    "0e73796d626f6c000400000073796d00",
    "10696e74333200d6ffffff",
    "12696e743634000000000000010000",
    "ff6d696e4b657900",
    "7f6d61784b657900",
    "00",
);

/// `{"name": "anon", "n": 3}`
pub const NO_ID: &str = "1b000000026e616d650005000000616e6f6e00106e000300000000";

/// `{"flag": <bool byte 0x02>}`
pub const INVALID_BOOLEAN: &str = "0c00000008666c6167000200";

/// `{"x": <tag 0x99>}`
pub const UNKNOWN_TAG: &str = "0800000099780000";

/// `{"s": <string declaring 3 bytes, "abc" with no terminator>}`
pub const STRING_LENGTH_MISMATCH: &str = "0f0000000273000300000061626300";

/// `{"a": <array keyed "0", "1", "3">}`
pub const ARRAY_GAP: &str = "220000000461001a0000001030000000000010310001000000103300030000000000";

/// `{"_id": ObjectId(00..0b), "flag": <bool byte 0x05>, "odd": <tag 0x99>}`
pub const ID_THEN_GARBAGE: &str = "22000000075f696400000102030405060708090a0b08666c61670005996f64640000";

/// The object id used by every fixture: bytes `0x00..=0x0B`.
pub const FIXTURE_OID: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Decode a fixture's hex.
///
/// # Panics
///
/// Panics if `hex` is not valid hex; fixtures are compile-time constants.
#[must_use]
pub fn fixture(hex: &str) -> Vec<u8> {
    hex::decode(hex).unwrap_or_else(|e| panic!("bad fixture hex: {e}"))
}

/// The document spelled out by [`USER`].
#[must_use]
pub fn user_document() -> Document {
    Document::new()
        .with("_id", ObjectId::from_bytes(FIXTURE_OID))
        .with("name", "ada")
        .with("tags", vec![Value::from("a"), Value::from("b")])
        .with(
            "meta",
            Document::new().with("visits", 7i64).with("admin", true),
        )
}

/// A document of `fields` mixed scalar and nested fields, with `_id`
/// first. Used by the benchmarks.
#[must_use]
pub fn wide_document(fields: usize) -> Document {
    let mut doc = Document::with_capacity(fields + 1);
    doc.push("_id", ObjectId::from_bytes(FIXTURE_OID));
    for i in 0..fields {
        let key = format!("field_{i}");
        let value = match i % 4 {
            0 => Value::from(format!("value number {i}")),
            1 => Value::from(i64::try_from(i).unwrap_or(i64::MAX)),
            2 => Value::from(vec![Value::from(1.5), Value::from(true), Value::Null]),
            _ => Value::from(Document::new().with("nested", "x").with("n", 1)),
        };
        doc.push(key, value);
    }
    doc
}
