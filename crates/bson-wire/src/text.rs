use crate::error::WireError;
use crate::primitives::{read_u32, take_bytes, write_u32};

/// Read a null-terminated string (keys, regex pattern and options).
///
/// ```text
///   bytes… │ 0x00
/// ```
///
/// The scan stops at the first zero byte, so the returned string can
/// never contain an embedded NUL. The remainder starts just after the
/// terminator.
///
/// # Errors
///
/// - [`WireError::TruncatedInput`] if no zero byte is present.
/// - [`WireError::InvalidUtf8`] if the bytes before it are not UTF-8.
pub fn read_cstring(buf: &[u8]) -> Result<(&str, &[u8]), WireError> {
    let nul = buf
        .iter()
        .position(|&b| b == 0)
        .ok_or(WireError::TruncatedInput {
            needed: buf.len() + 1,
            available: buf.len(),
        })?;
    let text = std::str::from_utf8(&buf[..nul]).map_err(|_| WireError::InvalidUtf8)?;
    Ok((text, &buf[nul + 1..]))
}

/// Read a length-prefixed string.
///
/// ```text
/// ┌──────────────┬──────────────────────┬──────┐
/// │ len (u32 LE) │ UTF-8 [len - 1]      │ 0x00 │
/// └──────────────┴──────────────────────┴──────┘
/// ```
///
/// The length counts the trailing terminator, so the smallest legal
/// value is 1 (the empty string).
///
/// # Errors
///
/// - [`WireError::TruncatedInput`] if fewer than `4 + len` bytes remain.
/// - [`WireError::MalformedLength`] if `len` is zero or the byte at
///   `4 + len - 1` is not the terminator.
/// - [`WireError::InvalidUtf8`] if the content is not UTF-8.
pub fn read_string(buf: &[u8]) -> Result<(&str, &[u8]), WireError> {
    let (declared, rest) = read_u32(buf)?;
    if declared == 0 {
        return Err(WireError::MalformedLength { declared });
    }
    let len = declared as usize;
    if rest.len() < len {
        return Err(WireError::TruncatedInput {
            needed: len.saturating_add(4),
            available: buf.len(),
        });
    }
    let (body, rest) = take_bytes(rest, len)?;
    let (content, terminator) = body.split_at(len - 1);
    if terminator != [0x00] {
        return Err(WireError::MalformedLength { declared });
    }
    let text = std::str::from_utf8(content).map_err(|_| WireError::InvalidUtf8)?;
    Ok((text, rest))
}

/// Append a null-terminated string.
///
/// The caller must have rejected strings containing NUL; the encoder
/// does this before any bytes are written.
pub fn write_cstring(buf: &mut Vec<u8>, text: &str) {
    debug_assert!(!text.as_bytes().contains(&0));
    buf.extend_from_slice(text.as_bytes());
    buf.push(0x00);
}

/// Append a length-prefixed string.
///
/// # Errors
///
/// [`WireError::MalformedLength`] if the string plus terminator does
/// not fit a `u32` length.
pub fn write_string(buf: &mut Vec<u8>, text: &str) -> Result<(), WireError> {
    let len = u32::try_from(text.len() + 1).map_err(|_| WireError::MalformedLength {
        declared: u32::MAX,
    })?;
    write_u32(buf, len);
    buf.extend_from_slice(text.as_bytes());
    buf.push(0x00);
    Ok(())
}
