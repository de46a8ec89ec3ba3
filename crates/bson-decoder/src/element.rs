use bson_types::{ElementType, Value};
use bson_wire::binary::read_binary;
use bson_wire::element_type::OBJECT_ID_LEN;
use bson_wire::frame::DocumentFrame;
use bson_wire::primitives::{read_u8, take_bytes};
use bson_wire::text::{read_cstring, read_string};

use crate::decoder::BsonDecoder;
use crate::error::DecodeError;

/// Read an element's tag and key, leaving the value bytes unread.
///
/// The key is read before the tag is checked so the cursor position on
/// error matches the full decoder.
///
/// # Errors
///
/// - [`DecodeError::Wire`] if the tag byte or key is truncated or the
///   key is not UTF-8.
/// - [`DecodeError::UnsupportedTypeTag`] if the tag is not in the table.
pub fn read_element_header(buf: &[u8]) -> Result<(ElementType, &str, &[u8]), DecodeError> {
    let (tag, rest) = read_u8(buf)?;
    let (key, rest) = read_cstring(rest)?;
    let element_type = ElementType::from_tag(tag).ok_or(DecodeError::UnsupportedTypeTag { tag })?;
    Ok((element_type, key, rest))
}

/// One element located by an [`ElementReader`], value still encoded.
///
/// `value` covers exactly the value bytes: for a nested document or
/// array that is the whole length-prefixed frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawElement<'a> {
    pub element_type: ElementType,
    pub key: &'a str,
    pub value: &'a [u8],
}

/// Cursor over the elements of one document body.
///
/// Each step reads a tag and key and then skips the value by structure
/// alone: fixed widths, length prefixes, cstring terminators, and
/// nested frames. Skipping still validates what it walks over, so a
/// truncated or malformed element fails the scan even when the caller
/// never asks for its value. Boolean bytes are not interpreted while
/// skipping.
///
/// ```text
///   let (mut reader, rest) = decoder.elements(buf)?;
///   while let Some(element) = reader.next_element()? {
///       if element.key == "_id" {
///           let id = reader.decode(&element)?;
///           break;
///       }
///   }
/// ```
pub struct ElementReader<'d, 'a> {
    decoder: &'d BsonDecoder,
    body: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'d, 'a> ElementReader<'d, 'a> {
    /// `depth` is the nesting level of the document that owns `body`.
    pub(crate) fn new(decoder: &'d BsonDecoder, body: &'a [u8], depth: usize) -> Self {
        Self {
            decoder,
            body,
            pos: 0,
            depth,
        }
    }

    /// Locate the next element, or `None` once the body is exhausted.
    ///
    /// # Errors
    ///
    /// Any structural failure in the element's header or value bytes.
    /// The reader should not be used after an error.
    pub fn next_element(&mut self) -> Result<Option<RawElement<'a>>, DecodeError> {
        let remaining = &self.body[self.pos..];
        if remaining.is_empty() {
            return Ok(None);
        }

        let (element_type, key, after_key) = read_element_header(remaining)?;
        let rest = skip_value(self.decoder, element_type, after_key, self.depth)?;
        let value = &after_key[..after_key.len() - rest.len()];

        self.pos = self.body.len() - rest.len();
        Ok(Some(RawElement {
            element_type,
            key,
            value,
        }))
    }

    /// Fully decode a located element's value.
    ///
    /// # Errors
    ///
    /// Any error the full decoder would raise for these value bytes.
    pub fn decode(&self, element: &RawElement<'a>) -> Result<Value, DecodeError> {
        let (value, _) = self
            .decoder
            .read_value(element.element_type, element.value, self.depth)?;
        Ok(value)
    }

    /// Byte offset of the next element within the body.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Body bytes not yet scanned.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.body[self.pos..]
    }
}

/// Step past one value without materializing it.
fn skip_value<'a>(
    decoder: &BsonDecoder,
    element_type: ElementType,
    buf: &'a [u8],
    depth: usize,
) -> Result<&'a [u8], DecodeError> {
    let rest = match element_type {
        ElementType::Double | ElementType::DateTime | ElementType::Int64 => take_bytes(buf, 8)?.1,
        ElementType::Int32 => take_bytes(buf, 4)?.1,
        ElementType::Boolean => take_bytes(buf, 1)?.1,
        ElementType::ObjectId => take_bytes(buf, OBJECT_ID_LEN)?.1,
        ElementType::String | ElementType::JavaScript | ElementType::Symbol => read_string(buf)?.1,
        ElementType::Binary => read_binary(buf)?.1,
        ElementType::Regex => {
            let (_, rest) = read_cstring(buf)?;
            read_cstring(rest)?.1
        }
        ElementType::Document | ElementType::Array => {
            let depth = decoder.enter(depth)?;
            let (frame, rest) = DocumentFrame::read_from(buf)?;
            let mut body = frame.body;
            while !body.is_empty() {
                let (nested_type, _, after_key) = read_element_header(body)?;
                body = skip_value(decoder, nested_type, after_key, depth)?;
            }
            rest
        }
        ElementType::Undefined | ElementType::Null | ElementType::MinKey | ElementType::MaxKey => {
            buf
        }
    };
    Ok(rest)
}
