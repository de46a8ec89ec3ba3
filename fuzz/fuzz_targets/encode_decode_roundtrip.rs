#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use bson_decoder::{decode_document, read_raw_document, ID_KEY};
use bson_encoder::BsonEncoder;
use bson_types::{Binary, BinarySubtype, Document, ObjectId, Regex, UtcDateTime, Value};

const MAX_DEPTH: usize = 8;

#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Double(f64),
    String(String),
    Document(Vec<(String, FuzzValue)>),
    Array(Vec<FuzzValue>),
    Binary { subtype_id: u8, bytes: Vec<u8> },
    Undefined,
    ObjectId([u8; 12]),
    Boolean(bool),
    DateTime(i64),
    Null,
    Regex { pattern: String, options: String },
    JavaScript(String),
    Symbol(String),
    Int32(i32),
    Int64(i64),
    MinKey,
    MaxKey,
}

/// Keys and regex parts are cstrings; strip NULs so the encoder accepts them.
fn cstring(s: String) -> String {
    s.replace('\0', "")
}

fn subtype_from_id(id: u8) -> BinarySubtype {
    match id % 4 {
        0 => BinarySubtype::Generic,
        1 => BinarySubtype::Function,
        2 => BinarySubtype::Uuid,
        _ => BinarySubtype::Md5,
    }
}

fn to_document(fields: Vec<(String, FuzzValue)>, depth: usize) -> Document {
    fields
        .into_iter()
        .map(|(k, v)| (cstring(k), to_value(v, depth)))
        .collect()
}

fn to_value(value: FuzzValue, depth: usize) -> Value {
    match value {
        // NaN never compares equal; keep every other bit pattern.
        FuzzValue::Double(v) if v.is_nan() => Value::Double(0.0),
        FuzzValue::Double(v) => Value::Double(v),
        FuzzValue::String(s) => Value::String(s),
        FuzzValue::Document(_) | FuzzValue::Array(_) if depth >= MAX_DEPTH => Value::Null,
        FuzzValue::Document(fields) => Value::Document(to_document(fields, depth + 1)),
        FuzzValue::Array(items) => {
            Value::Array(items.into_iter().map(|v| to_value(v, depth + 1)).collect())
        }
        FuzzValue::Binary { subtype_id, bytes } => {
            Value::Binary(Binary::new(subtype_from_id(subtype_id), bytes))
        }
        FuzzValue::Undefined => Value::Undefined,
        FuzzValue::ObjectId(bytes) => Value::ObjectId(ObjectId::from_bytes(bytes)),
        FuzzValue::Boolean(b) => Value::Boolean(b),
        FuzzValue::DateTime(ms) => Value::DateTime(UtcDateTime::from_millis(ms)),
        FuzzValue::Null => Value::Null,
        FuzzValue::Regex { pattern, options } => {
            Value::Regex(Regex::new(cstring(pattern), cstring(options)))
        }
        FuzzValue::JavaScript(s) => Value::JavaScript(s),
        FuzzValue::Symbol(s) => Value::Symbol(s),
        FuzzValue::Int32(v) => Value::Int32(v),
        FuzzValue::Int64(v) => Value::Int64(v),
        FuzzValue::MinKey => Value::MinKey,
        FuzzValue::MaxKey => Value::MaxKey,
    }
}

// Fuzz target: structured encode → decode roundtrip.
//
// Builds an arbitrary document, encodes it, and checks that the full
// decoder returns an equal document and the fast path finds the same
// `_id`.
fuzz_target!(|fields: Vec<(String, FuzzValue)>| {
    let doc = to_document(fields, 1);
    let Ok(bytes) = BsonEncoder::new().encode(&doc) else {
        return;
    };

    let decoded = decode_document(&bytes).expect("encoded document must decode");
    assert_eq!(decoded, doc);

    let (raw, rest) = read_raw_document(&bytes).expect("encoded document must scan");
    assert!(rest.is_empty());
    assert_eq!(raw.id(), doc.get(ID_KEY));
});
