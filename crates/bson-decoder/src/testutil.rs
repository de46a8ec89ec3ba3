//! Hand-assembled byte builders for unit tests.
//!
//! These write the grammar directly instead of going through the
//! encoder, so tests can produce deliberately malformed input.

/// Wrap element bytes in a length prefix and terminator.
pub fn doc(body: &[u8]) -> Vec<u8> {
    let size = u32::try_from(body.len() + 5).unwrap();
    let mut out = size.to_le_bytes().to_vec();
    out.extend_from_slice(body);
    out.push(0x00);
    out
}

/// One element: tag, key, raw value bytes.
pub fn elem(tag: u8, key: &str, value: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    out.extend_from_slice(key.as_bytes());
    out.push(0x00);
    out.extend_from_slice(value);
    out
}

/// A length-prefixed string value.
pub fn string(text: &str) -> Vec<u8> {
    let len = u32::try_from(text.len() + 1).unwrap();
    let mut out = len.to_le_bytes().to_vec();
    out.extend_from_slice(text.as_bytes());
    out.push(0x00);
    out
}

/// Concatenate element byte vectors.
pub fn body(elements: &[Vec<u8>]) -> Vec<u8> {
    elements.concat()
}
