use bson_types::{Binary, Document, ElementType, ObjectId, Regex, UtcDateTime, Value};
use bson_wire::binary::read_binary;
use bson_wire::element_type::OBJECT_ID_LEN;
use bson_wire::frame::DocumentFrame;
use bson_wire::primitives::{read_array, read_f64, read_i32, read_i64, read_u8};
use bson_wire::text::{read_cstring, read_string};

use crate::array::to_sequence;
use crate::config::DecoderOptions;
use crate::element::{ElementReader, read_element_header};
use crate::error::DecodeError;

/// Synchronous document decoder over an in-memory buffer.
///
/// Decoding is a pure function of the input bytes and the options: the
/// buffer is never mutated, nothing is cached between calls, and a
/// `BsonDecoder` can be shared freely across threads.
///
/// Data flows one way:
///
/// ```text
///   bytes ─► read_document ─► DocumentFrame (size + terminator)
///                  │
///                  └─► read_element × N ─► tag + key ─► read_value
///                                                         │
///                      Document / Array ◄── recurse ──────┘
///                      (Array then goes through to_sequence)
/// ```
///
/// Every `read_*` method returns the decoded value together with the
/// unconsumed remainder of the buffer, so a caller holding several
/// concatenated documents can walk them one after another.
///
/// # Example
///
/// ```rust
/// use bson_decoder::BsonDecoder;
/// use bson_encoder::BsonEncoder;
/// use bson_types::Document;
///
/// let bytes = BsonEncoder::new()
///     .encode(&Document::new().with("hello", "world"))
///     .unwrap();
///
/// let (doc, rest) = BsonDecoder::default().read_document(&bytes).unwrap();
/// assert_eq!(doc.get("hello").and_then(|v| v.as_str()), Some("world"));
/// assert!(rest.is_empty());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BsonDecoder {
    options: DecoderOptions,
}

impl BsonDecoder {
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decode one document from the front of `buf`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Wire`] for truncation, bad lengths, a missing
    ///   terminator, an unknown binary subtype, or invalid UTF-8.
    /// - [`DecodeError::DocumentTooLarge`] if the declared size is over
    ///   the configured maximum.
    /// - [`DecodeError::UnsupportedTypeTag`],
    ///   [`DecodeError::InvalidBooleanByte`],
    ///   [`DecodeError::ArrayIndexMismatch`], or
    ///   [`DecodeError::NestingTooDeep`] from the element bodies.
    pub fn read_document<'a>(&self, buf: &'a [u8]) -> Result<(Document, &'a [u8]), DecodeError> {
        self.read_document_at(buf, 0)
    }

    /// Decode a buffer that must hold exactly one document.
    ///
    /// # Errors
    ///
    /// All errors from [`read_document`](Self::read_document), plus
    /// [`DecodeError::TrailingData`] if bytes follow the document.
    pub fn decode_document(&self, buf: &[u8]) -> Result<Document, DecodeError> {
        let (doc, rest) = self.read_document(buf)?;
        if !rest.is_empty() {
            return Err(DecodeError::TrailingData {
                extra_bytes: rest.len(),
            });
        }
        Ok(doc)
    }

    /// Decode a single `(key, value)` element from the front of `buf`.
    ///
    /// The element is treated as sitting directly inside a top-level
    /// document for depth accounting.
    ///
    /// # Errors
    ///
    /// Same as [`read_document`](Self::read_document).
    pub fn read_element<'a>(
        &self,
        buf: &'a [u8],
    ) -> Result<((String, Value), &'a [u8]), DecodeError> {
        self.read_element_at(buf, 1)
    }

    /// Open a lazy element reader over one document at the front of
    /// `buf`.
    ///
    /// Only the document envelope is validated up front; elements are
    /// walked on demand. Returns the reader and the bytes after the
    /// document.
    ///
    /// # Errors
    ///
    /// Envelope errors ([`DecodeError::Wire`],
    /// [`DecodeError::DocumentTooLarge`]).
    pub fn elements<'a>(
        &self,
        buf: &'a [u8],
    ) -> Result<(ElementReader<'_, 'a>, &'a [u8]), DecodeError> {
        let (frame, rest) = self.read_frame(buf)?;
        Ok((ElementReader::new(self, frame.body, 1), rest))
    }

    // ── Internals ───────────────────────────────────────────────────────

    /// Read and size-check a top-level document envelope.
    pub(crate) fn read_frame<'a>(
        &self,
        buf: &'a [u8],
    ) -> Result<(DocumentFrame<'a>, &'a [u8]), DecodeError> {
        let (frame, rest) = DocumentFrame::read_from(buf)?;
        if frame.len() > self.options.max_document_size {
            return Err(DecodeError::DocumentTooLarge {
                size: frame.len(),
                limit: self.options.max_document_size,
            });
        }
        Ok((frame, rest))
    }

    /// Step one level deeper, failing once past `max_depth`.
    pub(crate) fn enter(&self, depth: usize) -> Result<usize, DecodeError> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            return Err(DecodeError::NestingTooDeep {
                limit: self.options.max_depth,
            });
        }
        Ok(depth)
    }

    /// `depth` is the nesting level of the document that contains this
    /// one (0 for a top-level read).
    fn read_document_at<'a>(
        &self,
        buf: &'a [u8],
        depth: usize,
    ) -> Result<(Document, &'a [u8]), DecodeError> {
        let depth = self.enter(depth)?;
        let (frame, rest) = if depth == 1 {
            self.read_frame(buf)?
        } else {
            DocumentFrame::read_from(buf)?
        };

        let mut doc = Document::new();
        let mut body = frame.body;
        while !body.is_empty() {
            let ((key, value), next) = self.read_element_at(body, depth)?;
            doc.push(key, value);
            body = next;
        }
        Ok((doc, rest))
    }

    /// `depth` is the nesting level of the document the element lives in.
    fn read_element_at<'a>(
        &self,
        buf: &'a [u8],
        depth: usize,
    ) -> Result<((String, Value), &'a [u8]), DecodeError> {
        let (element_type, key, rest) = read_element_header(buf)?;
        let (value, rest) = self.read_value(element_type, rest, depth)?;
        Ok(((key.to_string(), value), rest))
    }

    /// Dispatch on the element type and materialize its value.
    pub(crate) fn read_value<'a>(
        &self,
        element_type: ElementType,
        buf: &'a [u8],
        depth: usize,
    ) -> Result<(Value, &'a [u8]), DecodeError> {
        let decoded = match element_type {
            ElementType::Double => {
                let (v, rest) = read_f64(buf)?;
                (Value::Double(v), rest)
            }
            ElementType::String => {
                let (s, rest) = read_string(buf)?;
                (Value::String(s.to_string()), rest)
            }
            ElementType::Document => {
                let (doc, rest) = self.read_document_at(buf, depth)?;
                (Value::Document(doc), rest)
            }
            ElementType::Array => {
                let (doc, rest) = self.read_document_at(buf, depth)?;
                (Value::Array(to_sequence(doc)?), rest)
            }
            ElementType::Binary => {
                let ((subtype, payload), rest) = read_binary(buf)?;
                (Value::Binary(Binary::new(subtype, payload)), rest)
            }
            ElementType::Undefined => (Value::Undefined, buf),
            ElementType::ObjectId => {
                let (bytes, rest) = read_array::<OBJECT_ID_LEN>(buf)?;
                (Value::ObjectId(ObjectId::from_bytes(bytes)), rest)
            }
            ElementType::Boolean => {
                let (byte, rest) = read_u8(buf)?;
                let value = self
                    .options
                    .boolean_encoding
                    .decode(byte)
                    .ok_or(DecodeError::InvalidBooleanByte { value: byte })?;
                (Value::Boolean(value), rest)
            }
            ElementType::DateTime => {
                let (millis, rest) = read_i64(buf)?;
                (Value::DateTime(UtcDateTime::from_millis(millis)), rest)
            }
            ElementType::Null => (Value::Null, buf),
            ElementType::Regex => {
                let (pattern, rest) = read_cstring(buf)?;
                let (options, rest) = read_cstring(rest)?;
                (Value::Regex(Regex::new(pattern, options)), rest)
            }
            ElementType::JavaScript => {
                let (code, rest) = read_string(buf)?;
                (Value::JavaScript(code.to_string()), rest)
            }
            ElementType::Symbol => {
                let (sym, rest) = read_string(buf)?;
                (Value::Symbol(sym.to_string()), rest)
            }
            ElementType::Int32 => {
                let (v, rest) = read_i32(buf)?;
                (Value::Int32(v), rest)
            }
            ElementType::Int64 => {
                let (v, rest) = read_i64(buf)?;
                (Value::Int64(v), rest)
            }
            ElementType::MinKey => (Value::MinKey, buf),
            ElementType::MaxKey => (Value::MaxKey, buf),
        };
        Ok(decoded)
    }
}

/// Decode one document with default options. See
/// [`BsonDecoder::read_document`].
///
/// # Errors
///
/// See [`BsonDecoder::read_document`].
pub fn read_document(buf: &[u8]) -> Result<(Document, &[u8]), DecodeError> {
    BsonDecoder::default().read_document(buf)
}

/// Decode exactly one document with default options. See
/// [`BsonDecoder::decode_document`].
///
/// # Errors
///
/// See [`BsonDecoder::decode_document`].
pub fn decode_document(buf: &[u8]) -> Result<Document, DecodeError> {
    BsonDecoder::default().decode_document(buf)
}

/// Decode one element with default options. See
/// [`BsonDecoder::read_element`].
///
/// # Errors
///
/// See [`BsonDecoder::read_element`].
pub fn read_element(buf: &[u8]) -> Result<((String, Value), &[u8]), DecodeError> {
    BsonDecoder::default().read_element(buf)
}
