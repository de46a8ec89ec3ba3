/// Errors raised while constructing model values from text.
///
/// Decoding from bytes never produces these; they come from parsing
/// human-supplied input such as a hex object id in extended JSON.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
  /// An object id string was not exactly 24 hex digits.
  #[error("invalid object id {input:?}: expected 24 hex digits")]
  InvalidObjectId { input: String },
}
