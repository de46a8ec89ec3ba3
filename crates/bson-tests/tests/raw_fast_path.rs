//! The `_id` fast path.
//!
//! `read_raw_document` slices one document, scans only as far as the
//! first `_id`, and hands back the untouched byte span for a later full
//! decode.

use bson_decoder::{
    BsonDecoder, DocumentStream, ElementReader, ErrorKind, ID_KEY, read_document,
    read_raw_document,
};
use bson_encoder::BsonEncoder;
use bson_tests::{
    ARRAY_GAP, FIXTURE_OID, ID_THEN_GARBAGE, INVALID_BOOLEAN, NO_ID, USER, fixture,
    user_document, wide_document,
};
use bson_types::{Document, ObjectId, Value};

/// Walk a document the way the fast path does, counting elements
/// located before `_id` is reached.
fn scanned_before_id(reader: &mut ElementReader<'_, '_>) -> (usize, Option<Value>) {
    let mut scanned = 0;
    while let Some(element) = reader.next_element().unwrap() {
        scanned += 1;
        if element.key == ID_KEY {
            return (scanned, Some(reader.decode(&element).unwrap()));
        }
    }
    (scanned, None)
}

#[test]
fn leading_id_is_returned() {
    let bytes = fixture(USER);
    let (raw, rest) = read_raw_document(&bytes).unwrap();
    assert_eq!(raw.id(), Some(&Value::ObjectId(ObjectId::from_bytes(FIXTURE_OID))));
    assert_eq!(raw.span(), bytes.as_slice());
    assert!(rest.is_empty());
}

#[test]
fn later_elements_are_never_materialized() {
    // Full decode rejects the element after `_id`; the fast path never
    // reaches it.
    let bytes = fixture(ID_THEN_GARBAGE);
    assert_eq!(read_document(&bytes).unwrap_err().kind(), ErrorKind::InvalidBooleanByte);

    let (raw, _) = read_raw_document(&bytes).unwrap();
    assert_eq!(raw.id(), Some(&Value::ObjectId(ObjectId::from_bytes(FIXTURE_OID))));
}

#[test]
fn scan_stops_at_first_element_when_id_leads() {
    let bytes = BsonEncoder::new().encode(&wide_document(500)).unwrap();
    let decoder = BsonDecoder::default();
    let (mut reader, _) = decoder.elements(&bytes).unwrap();

    let (scanned, id) = scanned_before_id(&mut reader);
    assert_eq!(scanned, 1);
    assert!(id.is_some());
    assert!(reader.remaining().len() > bytes.len() / 2);
}

#[test]
fn absent_id_is_not_an_error() {
    let mut bytes = fixture(NO_ID);
    let doc_len = bytes.len();
    bytes.extend(fixture(USER));

    let (raw, rest) = read_raw_document(&bytes).unwrap();
    assert!(raw.id().is_none());
    assert_eq!(raw.len(), doc_len);
    assert_eq!(rest, fixture(USER).as_slice());
}

#[test]
fn trailing_id_after_nested_fields() {
    let doc = Document::new()
        .with("meta", Document::new().with("tags", vec![Value::from("x")]))
        .with("flag", true)
        .with("_id", 99i64);
    let bytes = BsonEncoder::new().encode(&doc).unwrap();
    let (raw, _) = read_raw_document(&bytes).unwrap();
    assert_eq!(raw.id(), Some(&Value::Int64(99)));
}

#[test]
fn structural_errors_before_id_propagate() {
    // {"s": <string length 0x40 with 3 bytes present>, "_id": 1}
    let mut body = vec![0x02, b's', 0x00, 0x40, 0x00, 0x00, 0x00, b'a', b'b', 0x00];
    body.extend_from_slice(&[0x10, b'_', b'i', b'd', 0x00, 0x01, 0x00, 0x00, 0x00]);
    let mut bytes = u32::try_from(body.len() + 5).unwrap().to_le_bytes().to_vec();
    bytes.extend(body);
    bytes.push(0x00);

    let err = read_raw_document(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TruncatedInput);
}

#[test]
fn value_errors_before_id_match_full_decode() {
    // Neither fixture has an `_id`, so every element is decoded on the way.
    for hex in [INVALID_BOOLEAN, ARRAY_GAP] {
        let bytes = fixture(hex);
        let full = read_document(&bytes).unwrap_err().kind();
        let raw = read_raw_document(&bytes).unwrap_err().kind();
        assert_eq!(raw, full, "{hex}");
    }
}

#[test]
fn deferred_full_decode_matches() {
    let bytes = fixture(USER);
    let raw = read_raw_document(&bytes).unwrap().0.into_owned();
    drop(bytes);

    assert_eq!(raw.to_document().unwrap(), user_document());
}

#[tokio::test]
async fn stream_of_raw_documents() {
    let encoder = BsonEncoder::new();
    let mut bytes = Vec::new();
    for i in 0..10 {
        let doc = Document::new().with("_id", i).with("payload", "x".repeat(i as usize * 10));
        encoder.encode_into(&doc, &mut bytes).unwrap();
    }

    let mut stream = DocumentStream::new(bytes.as_slice());
    let mut ids = Vec::new();
    while let Some(raw) = stream.next_raw().await {
        ids.push(raw.unwrap().id().and_then(Value::as_i32));
    }
    assert_eq!(ids, (0..10).map(Some).collect::<Vec<_>>());
}
