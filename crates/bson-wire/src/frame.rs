use crate::error::WireError;
use crate::primitives::read_u32;

/// Size of the little-endian length prefix that opens every document.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Smallest legal document: length prefix plus the trailing zero.
pub const MIN_DOCUMENT_SIZE: usize = 5;

/// The byte envelope of one document.
///
/// ```text
/// ┌──────────────────┬─────────────────────────────┬──────┐
/// │ size (u32 LE)    │ body [size - 5]             │ 0x00 │
/// └──────────────────┴─────────────────────────────┴──────┘
///   ◄─────────────────────── size ──────────────────────►
/// ```
///
/// `size` counts itself and the terminator. Reading a frame validates
/// only the envelope; the body is handed back untouched so the caller
/// can decode it fully or scan it lazily.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DocumentFrame<'a> {
    /// All `size` bytes of the document, prefix and terminator included.
    pub span: &'a [u8],

    /// The element bytes between the prefix and the terminator.
    pub body: &'a [u8],
}

impl<'a> DocumentFrame<'a> {
    /// Slice one document frame off the front of `buf`.
    ///
    /// Returns the frame and the bytes that follow it.
    ///
    /// # Errors
    ///
    /// - [`WireError::TruncatedInput`] if the prefix is short or declares
    ///   more bytes than `buf` holds.
    /// - [`WireError::MalformedLength`] if the declared size is below 5.
    /// - [`WireError::MalformedTerminator`] if the final byte is not zero.
    pub fn read_from(buf: &'a [u8]) -> Result<(Self, &'a [u8]), WireError> {
        let (declared, _) = read_u32(buf)?;
        let size = declared as usize;
        if size < MIN_DOCUMENT_SIZE {
            return Err(WireError::MalformedLength { declared });
        }
        if buf.len() < size {
            return Err(WireError::TruncatedInput {
                needed: size,
                available: buf.len(),
            });
        }

        let (span, rest) = buf.split_at(size);
        let terminator = span[size - 1];
        if terminator != 0x00 {
            return Err(WireError::MalformedTerminator { found: terminator });
        }

        let body = &span[LENGTH_PREFIX_SIZE..size - 1];
        Ok((Self { span, body }, rest))
    }

    /// Total encoded size, equal to the declared prefix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.span.len()
    }

    /// True when the body holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Read the declared size of the next document without validating it.
///
/// Connection readers use this to learn how many bytes to wait for.
/// Returns `None` while fewer than four bytes are buffered.
#[must_use]
pub fn peek_document_len(buf: &[u8]) -> Option<u32> {
    read_u32(buf).ok().map(|(len, _)| len)
}

/// Reserve a length prefix for a document about to be written.
///
/// Returns the offset of the prefix, to be handed to
/// [`finish_document`] once the body is in place.
pub fn begin_document(buf: &mut Vec<u8>) -> usize {
    let start = buf.len();
    buf.extend_from_slice(&[0u8; LENGTH_PREFIX_SIZE]);
    start
}

/// Write the terminator and back-patch the length prefix.
///
/// Returns the finished document's size.
///
/// # Errors
///
/// [`WireError::MalformedLength`] if the document exceeds `u32::MAX`.
pub fn finish_document(buf: &mut Vec<u8>, start: usize) -> Result<usize, WireError> {
    buf.push(0x00);
    let size = buf.len() - start;
    let declared = u32::try_from(size).map_err(|_| WireError::MalformedLength {
        declared: u32::MAX,
    })?;
    buf[start..start + LENGTH_PREFIX_SIZE].copy_from_slice(&declared.to_le_bytes());
    Ok(size)
}
