/// Byte-level failures raised by the primitive readers and writers.
///
/// Every reader in this crate checks the declared length against the
/// bytes actually available before slicing, so a malformed or
/// truncated buffer surfaces as one of these variants rather than an
/// out-of-bounds panic.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Fewer bytes are available than a length field (or a fixed-width
    /// value) requires.
    #[error("truncated input: needed {needed} bytes, {available} available")]
    TruncatedInput { needed: usize, available: usize },

    /// A declared length is impossible for its field, or disagrees with
    /// where the terminating zero byte actually sits.
    #[error("malformed length prefix: {declared}")]
    MalformedLength { declared: u32 },

    /// The byte that must close a document was not zero.
    #[error("malformed terminator: expected 0x00, got {found:#04X}")]
    MalformedTerminator { found: u8 },

    /// Binary subtype byte outside the recognized set.
    #[error("unsupported binary subtype {subtype:#04X}")]
    UnsupportedSubtype { subtype: u8 },

    /// A string or key contained bytes that are not valid UTF-8.
    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,
}
