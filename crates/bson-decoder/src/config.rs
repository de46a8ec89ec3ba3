use bson_wire::BooleanEncoding;

/// Default nesting limit for embedded documents and arrays.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Default ceiling on a single document's declared size (16 MiB).
pub const DEFAULT_MAX_DOCUMENT_SIZE: usize = 16 * 1024 * 1024;

/// Decoder configuration.
///
/// ```text
/// ┌───────────────────┬──────────────────────────────────────────────┐
/// │ Field             │ Purpose                                      │
/// ├───────────────────┼──────────────────────────────────────────────┤
/// │ max_depth         │ Reject documents nested deeper than this     │
/// │ max_document_size │ Reject a top-level document above this size  │
/// │ boolean_encoding  │ Byte mapping for boolean values              │
/// └───────────────────┴──────────────────────────────────────────────┘
/// ```
///
/// The top-level document is depth 1; each embedded document or array
/// adds one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderOptions {
    pub max_depth: usize,
    pub max_document_size: usize,
    pub boolean_encoding: BooleanEncoding,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
            boolean_encoding: BooleanEncoding::Standard,
        }
    }
}

impl DecoderOptions {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_max_document_size(mut self, max_document_size: usize) -> Self {
        self.max_document_size = max_document_size;
        self
    }

    #[must_use]
    pub fn with_boolean_encoding(mut self, boolean_encoding: BooleanEncoding) -> Self {
        self.boolean_encoding = boolean_encoding;
        self
    }
}
