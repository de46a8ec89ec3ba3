use bson_wire::WireError;

/// Errors that can occur while decoding documents.
///
/// Every reader fails fast: the first structural problem aborts the
/// whole document and is returned here. There is no partial result and
/// no retry.
///
/// ```text
///   DecodeError
///   ├── UnsupportedTypeTag     ← tag byte not in the dispatch table
///   ├── InvalidBooleanByte     ← boolean value byte other than 0/1
///   ├── ArrayIndexMismatch     ← array keys are not "0".."N-1" in order
///   ├── NestingTooDeep         ← embedded documents beyond max_depth
///   ├── TrailingData           ← bytes left after a whole-buffer decode
///   ├── DocumentTooLarge       ← declared size above max_document_size
///   ├── Wire(WireError)        ← truncation, lengths, terminators,
///   │                            subtypes, UTF-8
///   └── Io(std::io::Error)     ← from the async document stream
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The tag byte opening an element has no reader.
    ///
    /// The value width of an unknown tag is unknowable, so the element
    /// cannot be skipped; the byte is carried for diagnostics.
    #[error("unsupported element type tag {tag:#04X}")]
    UnsupportedTypeTag { tag: u8 },

    /// A boolean element's value byte was neither 0 nor 1.
    #[error("invalid boolean byte {value:#04X}")]
    InvalidBooleanByte { value: u8 },

    /// An array-shaped document broke the sequential index rule.
    ///
    /// `found` is the offending key; gaps, repeats, reordering, and
    /// non-numeric keys all land here.
    #[error("array index mismatch: expected key \"{expected}\", found {found:?}")]
    ArrayIndexMismatch { expected: usize, found: String },

    /// Embedded documents or arrays nested deeper than the configured
    /// limit.
    #[error("nesting exceeds maximum depth of {limit}")]
    NestingTooDeep { limit: usize },

    /// Bytes remained after a decode that had to consume its input
    /// exactly.
    #[error("unexpected data after document ({extra_bytes} bytes)")]
    TrailingData { extra_bytes: usize },

    /// A document's declared size exceeds the configured maximum.
    #[error("document of {size} bytes exceeds limit {limit}")]
    DocumentTooLarge { size: usize, limit: usize },

    /// A byte-level failure from `bson-wire`.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// An I/O error from the reader behind a [`DocumentStream`](crate::DocumentStream).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Flat classification of a [`DecodeError`].
///
/// Lets a connection layer pick a protocol response without matching
/// through the nested [`WireError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TruncatedInput,
    MalformedLength,
    MalformedTerminator,
    UnsupportedTypeTag,
    UnsupportedSubtype,
    ArrayIndexMismatch,
    InvalidBooleanByte,
    InvalidUtf8,
    NestingTooDeep,
    TrailingData,
    DocumentTooLarge,
    Io,
}

impl DecodeError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedTypeTag { .. } => ErrorKind::UnsupportedTypeTag,
            Self::InvalidBooleanByte { .. } => ErrorKind::InvalidBooleanByte,
            Self::ArrayIndexMismatch { .. } => ErrorKind::ArrayIndexMismatch,
            Self::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
            Self::TrailingData { .. } => ErrorKind::TrailingData,
            Self::DocumentTooLarge { .. } => ErrorKind::DocumentTooLarge,
            Self::Wire(wire) => match wire {
                WireError::TruncatedInput { .. } => ErrorKind::TruncatedInput,
                WireError::MalformedLength { .. } => ErrorKind::MalformedLength,
                WireError::MalformedTerminator { .. } => ErrorKind::MalformedTerminator,
                WireError::UnsupportedSubtype { .. } => ErrorKind::UnsupportedSubtype,
                WireError::InvalidUtf8 => ErrorKind::InvalidUtf8,
            },
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_errors_classify_through_wrapper() {
        let err = DecodeError::from(WireError::MalformedTerminator { found: 1 });
        assert_eq!(err.kind(), ErrorKind::MalformedTerminator);

        let err = DecodeError::from(WireError::TruncatedInput {
            needed: 10,
            available: 2,
        });
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);

        let err = DecodeError::from(WireError::InvalidUtf8);
        assert_eq!(err.kind(), ErrorKind::InvalidUtf8);
    }

    #[test]
    fn stream_io_classifies_as_io() {
        let err = DecodeError::from(std::io::Error::from(std::io::ErrorKind::UnexpectedEof));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn display_carries_tag() {
        let err = DecodeError::UnsupportedTypeTag { tag: 0x99 };
        assert_eq!(err.to_string(), "unsupported element type tag 0x99");
    }

    #[test]
    fn display_array_mismatch() {
        let err = DecodeError::ArrayIndexMismatch {
            expected: 2,
            found: "3".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "array index mismatch: expected key \"2\", found \"3\""
        );
    }
}
