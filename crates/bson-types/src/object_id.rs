use std::fmt;

use bson_wire::element_type::OBJECT_ID_LEN;

use crate::error::TypeError;

/// A 12-byte object identifier.
///
/// The bytes are opaque: no timestamp, counter, or machine fields are
/// extracted. Equality and ordering are plain byte comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
  #[must_use]
  pub fn from_bytes(bytes: [u8; OBJECT_ID_LEN]) -> Self {
    Self(bytes)
  }

  #[must_use]
  pub fn bytes(&self) -> [u8; OBJECT_ID_LEN] {
    self.0
  }

  /// Parse a 24-digit hex string (either case).
  ///
  /// # Errors
  ///
  /// [`TypeError::InvalidObjectId`] on wrong length or non-hex digits.
  pub fn parse_str(input: &str) -> Result<Self, TypeError> {
    let mut bytes = [0u8; OBJECT_ID_LEN];
    hex::decode_to_slice(input, &mut bytes).map_err(|_| TypeError::InvalidObjectId {
      input: input.to_string(),
    })?;
    Ok(Self(bytes))
  }

  /// Lowercase 24-digit hex form.
  #[must_use]
  pub fn to_hex(&self) -> String {
    hex::encode(self.0)
  }
}

impl fmt::Display for ObjectId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_hex())
  }
}

impl From<[u8; OBJECT_ID_LEN]> for ObjectId {
  fn from(bytes: [u8; OBJECT_ID_LEN]) -> Self {
    Self(bytes)
  }
}
