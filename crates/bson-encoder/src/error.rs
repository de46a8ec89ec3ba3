use bson_wire::WireError;

/// Errors that can occur while encoding documents.
///
/// ```text
///   EncodeError
///   ├── KeyContainsNul       ← key cannot be written as a cstring
///   ├── CStringContainsNul   ← regex pattern/options with a zero byte
///   ├── DocumentTooLarge     ← finished document above the size limit
///   ├── Wire(WireError)      ← length overflow from bson-wire
///   └── Io(std::io::Error)   ← from the writer passed to write_to
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("key {key:?} contains a NUL byte")]
    KeyContainsNul { key: String },

    #[error("cstring value {value:?} contains a NUL byte")]
    CStringContainsNul { value: String },

    #[error("encoded document of {size} bytes exceeds limit {limit}")]
    DocumentTooLarge { size: usize, limit: usize },

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
