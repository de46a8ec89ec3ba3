use std::borrow::Cow;

use bson_types::{Document, Value};

use crate::decoder::BsonDecoder;
use crate::error::DecodeError;

/// Key looked up by the raw fast path.
pub const ID_KEY: &str = "_id";

/// A document kept as its encoded bytes, plus its `_id` if one was
/// found.
///
/// The span borrows from the input buffer; call
/// [`into_owned`](Self::into_owned) to keep it beyond the buffer's
/// lifetime. [`to_document`](Self::to_document) performs the deferred
/// full decode.
#[derive(Clone, Debug, PartialEq)]
pub struct RawDocument<'a> {
    bytes: Cow<'a, [u8]>,
    id: Option<Value>,
}

impl<'a> RawDocument<'a> {
    /// The complete document bytes, length prefix and terminator
    /// included.
    #[must_use]
    pub fn span(&self) -> &[u8] {
        &self.bytes
    }

    /// The `_id` value, or `None` if the document has no such key.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a scanned document; the span holds at least the
    /// five envelope bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Detach from the input buffer by copying the span.
    #[must_use]
    pub fn into_owned(self) -> RawDocument<'static> {
        RawDocument {
            bytes: Cow::Owned(self.bytes.into_owned()),
            id: self.id,
        }
    }

    /// Fully decode the retained span with default options.
    ///
    /// # Errors
    ///
    /// Any error from [`BsonDecoder::decode_document`]; fields past the
    /// `_id` were never visited during the scan and may still be
    /// rejected here.
    pub fn to_document(&self) -> Result<Document, DecodeError> {
        self.to_document_with(&BsonDecoder::default())
    }

    /// Fully decode the retained span with the given decoder.
    ///
    /// # Errors
    ///
    /// See [`to_document`](Self::to_document).
    pub fn to_document_with(&self, decoder: &BsonDecoder) -> Result<Document, DecodeError> {
        decoder.decode_document(&self.bytes)
    }
}

impl BsonDecoder {
    /// Slice one document off `buf` and decode only its `_id`.
    ///
    /// Elements are decoded one at a time, in order, and the scan stops
    /// at the first `_id`. Elements after it are not visited at all. A
    /// missing `_id` is not an error.
    ///
    /// # Errors
    ///
    /// - Envelope errors, as for [`read_document`](Self::read_document).
    /// - Any error the full decoder raises for an element before `_id`,
    ///   or for the `_id` value itself.
    pub fn read_raw_document<'a>(
        &self,
        buf: &'a [u8],
    ) -> Result<(RawDocument<'a>, &'a [u8]), DecodeError> {
        let span_len = buf.len();
        let (mut reader, rest) = self.elements(buf)?;
        let span = &buf[..span_len - rest.len()];

        let mut id = None;
        while let Some(element) = reader.next_element()? {
            let value = reader.decode(&element)?;
            if element.key == ID_KEY {
                id = Some(value);
                break;
            }
        }

        let raw = RawDocument {
            bytes: Cow::Borrowed(span),
            id,
        };
        Ok((raw, rest))
    }
}

/// Raw fast path with default options. See
/// [`BsonDecoder::read_raw_document`].
///
/// # Errors
///
/// See [`BsonDecoder::read_raw_document`].
pub fn read_raw_document(buf: &[u8]) -> Result<(RawDocument<'_>, &[u8]), DecodeError> {
    BsonDecoder::default().read_raw_document(buf)
}
