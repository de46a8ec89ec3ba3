use bson_types::{Document, Value};
use bson_wire::BooleanEncoding;
use bson_wire::binary::write_binary;
use bson_wire::frame::{begin_document, finish_document};
use bson_wire::primitives::{write_f64, write_i32, write_i64, write_u8};
use bson_wire::text::{write_cstring, write_string};

use crate::error::EncodeError;

/// Default ceiling on an encoded document's size (16 MiB).
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 16 * 1024 * 1024;

/// Encoder configuration.
///
/// `boolean_encoding` must match the peer's decoder for booleans to
/// survive a round trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderOptions {
    pub boolean_encoding: BooleanEncoding,
    pub max_document_size: usize,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            boolean_encoding: BooleanEncoding::Standard,
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
        }
    }
}

impl EncoderOptions {
    #[must_use]
    pub fn with_boolean_encoding(mut self, boolean_encoding: BooleanEncoding) -> Self {
        self.boolean_encoding = boolean_encoding;
        self
    }

    #[must_use]
    pub fn with_max_document_size(mut self, max_document_size: usize) -> Self {
        self.max_document_size = max_document_size;
        self
    }
}

/// Writes documents in the same grammar the decoder reads.
///
/// Every document is written as a length prefix, its elements in
/// order, and a trailing zero; the prefix is back-patched once the body
/// is in place. Arrays are written as documents keyed `"0"` through
/// `"N-1"`. `Generic` binaries are always written with subtype 0x00.
///
/// # Usage
///
/// ```rust
/// use bson_encoder::BsonEncoder;
/// use bson_types::Document;
///
/// let doc = Document::new().with("hello", "world");
/// let bytes = BsonEncoder::new().encode(&doc).unwrap();
/// assert_eq!(bytes.len(), 22);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BsonEncoder {
    options: EncoderOptions,
}

impl BsonEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: EncoderOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Encode one document into a fresh buffer.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::KeyContainsNul`] for a key with a zero byte.
    /// - [`EncodeError::CStringContainsNul`] for a regex part with a
    ///   zero byte.
    /// - [`EncodeError::DocumentTooLarge`] if the result exceeds
    ///   `max_document_size`.
    pub fn encode(&self, doc: &Document) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::new();
        self.encode_into(doc, &mut buf)?;
        Ok(buf)
    }

    /// Append one encoded document to `buf`, returning its size.
    ///
    /// On error `buf` may hold a partial document after its original
    /// contents.
    ///
    /// # Errors
    ///
    /// See [`encode`](Self::encode).
    pub fn encode_into(&self, doc: &Document, buf: &mut Vec<u8>) -> Result<usize, EncodeError> {
        let size = self.write_document(doc, buf)?;
        if size > self.options.max_document_size {
            return Err(EncodeError::DocumentTooLarge {
                size,
                limit: self.options.max_document_size,
            });
        }
        Ok(size)
    }

    /// Encode one document and write it to `writer`.
    ///
    /// # Errors
    ///
    /// Any error from [`encode`](Self::encode), or
    /// [`EncodeError::Io`] if the write fails.
    pub fn write_to<W: std::io::Write>(
        &self,
        doc: &Document,
        writer: &mut W,
    ) -> Result<usize, EncodeError> {
        let bytes = self.encode(doc)?;
        writer.write_all(&bytes)?;
        Ok(bytes.len())
    }

    fn write_document(&self, doc: &Document, buf: &mut Vec<u8>) -> Result<usize, EncodeError> {
        let start = begin_document(buf);
        for (key, value) in doc.iter() {
            self.write_element(key, value, buf)?;
        }
        Ok(finish_document(buf, start)?)
    }

    fn write_array(&self, items: &[Value], buf: &mut Vec<u8>) -> Result<usize, EncodeError> {
        let start = begin_document(buf);
        for (index, item) in items.iter().enumerate() {
            self.write_element(&index.to_string(), item, buf)?;
        }
        Ok(finish_document(buf, start)?)
    }

    fn write_element(&self, key: &str, value: &Value, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
        if key.as_bytes().contains(&0) {
            return Err(EncodeError::KeyContainsNul {
                key: key.to_string(),
            });
        }
        write_u8(buf, value.element_type().tag());
        write_cstring(buf, key);
        self.write_value(value, buf)
    }

    fn write_value(&self, value: &Value, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
        match value {
            Value::Double(v) => write_f64(buf, *v),
            Value::String(s) | Value::JavaScript(s) | Value::Symbol(s) => write_string(buf, s)?,
            Value::Document(doc) => {
                self.write_document(doc, buf)?;
            }
            Value::Array(items) => {
                self.write_array(items, buf)?;
            }
            Value::Binary(bin) => write_binary(buf, bin.subtype, &bin.bytes)?,
            Value::ObjectId(id) => buf.extend_from_slice(&id.bytes()),
            Value::Boolean(b) => write_u8(buf, self.options.boolean_encoding.encode(*b)),
            Value::DateTime(dt) => write_i64(buf, dt.millis()),
            Value::Regex(re) => {
                write_checked_cstring(buf, &re.pattern)?;
                write_checked_cstring(buf, &re.options)?;
            }
            Value::Int32(v) => write_i32(buf, *v),
            Value::Int64(v) => write_i64(buf, *v),
            Value::Undefined | Value::Null | Value::MinKey | Value::MaxKey => {}
        }
        Ok(())
    }
}

fn write_checked_cstring(buf: &mut Vec<u8>, value: &str) -> Result<(), EncodeError> {
    if value.as_bytes().contains(&0) {
        return Err(EncodeError::CStringContainsNul {
            value: value.to_string(),
        });
    }
    write_cstring(buf, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson_decoder::{BsonDecoder, DecoderOptions, decode_document};
    use bson_types::{Binary, BinarySubtype, ObjectId, Regex, UtcDateTime};

    #[test]
    fn hello_world_bytes() {
        let doc = Document::new().with("hello", "world");
        let bytes = BsonEncoder::new().encode(&doc).unwrap();
        assert_eq!(
            bytes,
            b"\x16\x00\x00\x00\x02hello\x00\x06\x00\x00\x00world\x00\x00"
        );
    }

    #[test]
    fn empty_document_is_five_bytes() {
        let bytes = BsonEncoder::new().encode(&Document::new()).unwrap();
        assert_eq!(bytes, [5, 0, 0, 0, 0]);
    }

    #[test]
    fn array_keys_are_indices() {
        let doc = Document::new().with("a", vec![Value::from(true), Value::Null]);
        let bytes = BsonEncoder::new().encode(&doc).unwrap();
        #[rustfmt::skip]
        let expected = [
            20, 0, 0, 0,
            0x04, b'a', 0,
                12, 0, 0, 0,
                0x08, b'0', 0, 1,
                0x0A, b'1', 0,
                0,
            0,
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn multi_digit_array_keys() {
        let items: Vec<Value> = (0..12i32).map(Value::from).collect();
        let doc = Document::new().with("a", items.clone());
        let bytes = BsonEncoder::new().encode(&doc).unwrap();

        let key_11 = b"\x1011\x00";
        assert!(bytes.windows(key_11.len()).any(|w| w == key_11));
        assert_eq!(decode_document(&bytes).unwrap().get("a"), Some(&Value::Array(items)));
    }

    #[test]
    fn every_variant_round_trips() {
        let doc = Document::new()
            .with("_id", ObjectId::from_bytes([9; 12]))
            .with("d", -0.5)
            .with("s", "text with \0 inside")
            .with("o", Document::new().with("deep", vec![Value::from(1), Value::from("x")]))
            .with("bin", Binary::new(BinarySubtype::Function, vec![1, 2, 3]))
            .with("u", Value::Undefined)
            .with("t", true)
            .with("f", false)
            .with("date", UtcDateTime::from_millis(-1))
            .with("n", Value::Null)
            .with("re", Regex::new("^x$", "ms"))
            .with("js", Value::JavaScript("return 1".into()))
            .with("sym", Value::Symbol("s".into()))
            .with("i", i32::MIN)
            .with("l", i64::MAX)
            .with("min", Value::MinKey)
            .with("max", Value::MaxKey);

        let bytes = BsonEncoder::new().encode(&doc).unwrap();
        assert_eq!(decode_document(&bytes).unwrap(), doc);
    }

    #[test]
    fn inverted_booleans_round_trip_with_matching_decoder() {
        let options = EncoderOptions::default().with_boolean_encoding(BooleanEncoding::Inverted);
        let doc = Document::new().with("t", true).with("f", false);
        let bytes = BsonEncoder::with_options(options).encode(&doc).unwrap();

        let decoder = BsonDecoder::new(
            DecoderOptions::default().with_boolean_encoding(BooleanEncoding::Inverted),
        );
        assert_eq!(decoder.decode_document(&bytes).unwrap(), doc);

        let standard = decode_document(&bytes).unwrap();
        assert_eq!(standard.get("t"), Some(&Value::Boolean(false)));
    }

    #[test]
    fn nul_in_key_rejected() {
        let doc = Document::new().with("a\0b", 1);
        let err = BsonEncoder::new().encode(&doc).unwrap_err();
        assert!(matches!(err, EncodeError::KeyContainsNul { ref key } if key == "a\0b"));
    }

    #[test]
    fn nul_in_regex_rejected() {
        let doc = Document::new().with("r", Regex::new("a\0", ""));
        let err = BsonEncoder::new().encode(&doc).unwrap_err();
        assert!(matches!(err, EncodeError::CStringContainsNul { .. }));
    }

    #[test]
    fn size_limit_enforced() {
        let options = EncoderOptions::default().with_max_document_size(16);
        let doc = Document::new().with("s", "more than sixteen bytes");
        let err = BsonEncoder::with_options(options).encode(&doc).unwrap_err();
        assert!(matches!(err, EncodeError::DocumentTooLarge { limit: 16, .. }));
    }

    #[test]
    fn encode_into_appends() {
        let encoder = BsonEncoder::new();
        let mut buf = vec![0xEE];
        let size = encoder.encode_into(&Document::new().with("n", 1), &mut buf).unwrap();
        assert_eq!(size, buf.len() - 1);
        assert_eq!(buf[0], 0xEE);
    }

    #[test]
    fn write_to_reports_bytes_written() {
        let mut out = Vec::new();
        let written = BsonEncoder::new()
            .write_to(&Document::new().with("k", "v"), &mut out)
            .unwrap();
        assert_eq!(written, out.len());
    }
}
