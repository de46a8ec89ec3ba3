use bson_wire::BinarySubtype;

/// A binary blob with its subtype.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Binary {
  pub subtype: BinarySubtype,
  pub bytes: Vec<u8>,
}

impl Binary {
  #[must_use]
  pub fn new(subtype: BinarySubtype, bytes: impl Into<Vec<u8>>) -> Self {
    Self {
      subtype,
      bytes: bytes.into(),
    }
  }

  #[must_use]
  pub fn generic(bytes: impl Into<Vec<u8>>) -> Self {
    Self::new(BinarySubtype::Generic, bytes)
  }
}
