use crate::error::WireError;

// Every reader here follows the same shape: take a slice, return the
// parsed value together with the unconsumed remainder. Callers thread
// the remainder into the next read instead of tracking offsets.

/// Split `n` bytes off the front of `buf`.
///
/// # Errors
///
/// [`WireError::TruncatedInput`] if `buf` holds fewer than `n` bytes.
pub fn take_bytes(buf: &[u8], n: usize) -> Result<(&[u8], &[u8]), WireError> {
    if buf.len() < n {
        return Err(WireError::TruncatedInput {
            needed: n,
            available: buf.len(),
        });
    }
    Ok(buf.split_at(n))
}

/// Read exactly `N` bytes into a fixed array.
fn take_array<const N: usize>(buf: &[u8]) -> Result<([u8; N], &[u8]), WireError> {
    let (head, rest) = take_bytes(buf, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(head);
    Ok((out, rest))
}

/// Read a single byte.
///
/// # Errors
///
/// [`WireError::TruncatedInput`] on an empty buffer.
pub fn read_u8(buf: &[u8]) -> Result<(u8, &[u8]), WireError> {
    let (&byte, rest) = buf.split_first().ok_or(WireError::TruncatedInput {
        needed: 1,
        available: 0,
    })?;
    Ok((byte, rest))
}

/// Read a little-endian `u32` (length prefixes).
///
/// # Errors
///
/// [`WireError::TruncatedInput`] if fewer than 4 bytes remain.
pub fn read_u32(buf: &[u8]) -> Result<(u32, &[u8]), WireError> {
    let (bytes, rest) = take_array::<4>(buf)?;
    Ok((u32::from_le_bytes(bytes), rest))
}

/// Read a little-endian `i32`.
///
/// # Errors
///
/// [`WireError::TruncatedInput`] if fewer than 4 bytes remain.
pub fn read_i32(buf: &[u8]) -> Result<(i32, &[u8]), WireError> {
    let (bytes, rest) = take_array::<4>(buf)?;
    Ok((i32::from_le_bytes(bytes), rest))
}

/// Read a little-endian `i64`.
///
/// # Errors
///
/// [`WireError::TruncatedInput`] if fewer than 8 bytes remain.
pub fn read_i64(buf: &[u8]) -> Result<(i64, &[u8]), WireError> {
    let (bytes, rest) = take_array::<8>(buf)?;
    Ok((i64::from_le_bytes(bytes), rest))
}

/// Read a little-endian IEEE-754 double.
///
/// # Errors
///
/// [`WireError::TruncatedInput`] if fewer than 8 bytes remain.
pub fn read_f64(buf: &[u8]) -> Result<(f64, &[u8]), WireError> {
    let (bytes, rest) = take_array::<8>(buf)?;
    Ok((f64::from_le_bytes(bytes), rest))
}

/// Read a fixed-size array of raw bytes (object ids).
///
/// # Errors
///
/// [`WireError::TruncatedInput`] if fewer than `N` bytes remain.
pub fn read_array<const N: usize>(buf: &[u8]) -> Result<([u8; N], &[u8]), WireError> {
    take_array::<N>(buf)
}

// ── Writers ───────────────────────────────────────────────────────────
//
// Writers append to a `Vec<u8>` and cannot fail; length overflow is the
// encoder's concern because only it knows the full document size.

pub fn write_u8(buf: &mut Vec<u8>, value: u8) {
    buf.push(value);
}

pub fn write_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_i32(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_i64(buf: &mut Vec<u8>, value: i64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_f64(buf: &mut Vec<u8>, value: f64) {
    buf.extend_from_slice(&value.to_le_bytes());
}
