use bson_types::{Document, Value};

use crate::error::DecodeError;

/// Convert an array-shaped document into its ordered values.
///
/// Keys must be exactly `"0"`, `"1"`, ..., `"N-1"` in that order. Keys
/// are compared as strings, so `"01"` or `"+1"` do not match index 1.
///
/// # Errors
///
/// [`DecodeError::ArrayIndexMismatch`] at the first key that breaks the
/// sequence, carrying the expected index and the key actually found.
pub fn to_sequence(doc: Document) -> Result<Vec<Value>, DecodeError> {
    let mut values = Vec::with_capacity(doc.len());

    for (index, (key, value)) in doc.into_iter().enumerate() {
        if key != index.to_string() {
            return Err(DecodeError::ArrayIndexMismatch {
                expected: index,
                found: key,
            });
        }
        values.push(value);
    }
    Ok(values)
}
