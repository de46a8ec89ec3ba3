use bson_wire::element_type as tag;

/// The value type named by an element's tag byte.
///
/// ```text
/// ┌──────┬─────────────┬────────────────────────────────────┐
/// │ Tag  │ Variant     │ Value layout                       │
/// ├──────┼─────────────┼────────────────────────────────────┤
/// │ 0x01 │ Double      │ f64 LE                             │
/// │ 0x02 │ String      │ u32 len + UTF-8 + 0x00             │
/// │ 0x03 │ Document    │ embedded document                  │
/// │ 0x04 │ Array       │ document keyed "0".."N-1"          │
/// │ 0x05 │ Binary      │ u32 len + subtype + payload        │
/// │ 0x06 │ Undefined   │ (none)                             │
/// │ 0x07 │ ObjectId    │ 12 raw bytes                       │
/// │ 0x08 │ Boolean     │ one byte, 0 or 1                   │
/// │ 0x09 │ DateTime    │ i64 LE milliseconds since epoch    │
/// │ 0x0A │ Null        │ (none)                             │
/// │ 0x0B │ Regex       │ cstring pattern + cstring options  │
/// │ 0x0D │ JavaScript  │ string                             │
/// │ 0x0E │ Symbol      │ string                             │
/// │ 0x10 │ Int32       │ i32 LE                             │
/// │ 0x12 │ Int64       │ i64 LE                             │
/// │ 0xFF │ MinKey      │ (none)                             │
/// │ 0x7F │ MaxKey      │ (none)                             │
/// └──────┴─────────────┴────────────────────────────────────┘
/// ```
///
/// There is no catch-all variant: a tag outside this table cannot be
/// skipped safely because its value width is unknown, so the decoder
/// rejects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
  Double,
  String,
  Document,
  Array,
  Binary,
  Undefined,
  ObjectId,
  Boolean,
  DateTime,
  Null,
  Regex,
  JavaScript,
  Symbol,
  Int32,
  Int64,
  MinKey,
  MaxKey,
}

impl ElementType {
  /// Every variant in tag order, for tables and tests.
  pub const ALL: [Self; 17] = [
    Self::Double,
    Self::String,
    Self::Document,
    Self::Array,
    Self::Binary,
    Self::Undefined,
    Self::ObjectId,
    Self::Boolean,
    Self::DateTime,
    Self::Null,
    Self::Regex,
    Self::JavaScript,
    Self::Symbol,
    Self::Int32,
    Self::Int64,
    Self::MinKey,
    Self::MaxKey,
  ];

  /// Look up a tag byte. Returns `None` for bytes outside the table.
  #[must_use]
  pub fn from_tag(byte: u8) -> Option<Self> {
    let ty = match byte {
      tag::DOUBLE => Self::Double,
      tag::STRING => Self::String,
      tag::DOCUMENT => Self::Document,
      tag::ARRAY => Self::Array,
      tag::BINARY => Self::Binary,
      tag::UNDEFINED => Self::Undefined,
      tag::OBJECT_ID => Self::ObjectId,
      tag::BOOLEAN => Self::Boolean,
      tag::DATE_TIME => Self::DateTime,
      tag::NULL => Self::Null,
      tag::REGEX => Self::Regex,
      tag::JAVASCRIPT => Self::JavaScript,
      tag::SYMBOL => Self::Symbol,
      tag::INT32 => Self::Int32,
      tag::INT64 => Self::Int64,
      tag::MIN_KEY => Self::MinKey,
      tag::MAX_KEY => Self::MaxKey,
      _ => return None,
    };
    Some(ty)
  }

  /// The tag byte written before this element's key.
  #[must_use]
  pub fn tag(self) -> u8 {
    match self {
      Self::Double => tag::DOUBLE,
      Self::String => tag::STRING,
      Self::Document => tag::DOCUMENT,
      Self::Array => tag::ARRAY,
      Self::Binary => tag::BINARY,
      Self::Undefined => tag::UNDEFINED,
      Self::ObjectId => tag::OBJECT_ID,
      Self::Boolean => tag::BOOLEAN,
      Self::DateTime => tag::DATE_TIME,
      Self::Null => tag::NULL,
      Self::Regex => tag::REGEX,
      Self::JavaScript => tag::JAVASCRIPT,
      Self::Symbol => tag::SYMBOL,
      Self::Int32 => tag::INT32,
      Self::Int64 => tag::INT64,
      Self::MinKey => tag::MIN_KEY,
      Self::MaxKey => tag::MAX_KEY,
    }
  }

  /// Short lowercase name used in reports.
  #[must_use]
  pub fn name(self) -> &'static str {
    match self {
      Self::Double => "double",
      Self::String => "string",
      Self::Document => "document",
      Self::Array => "array",
      Self::Binary => "binary",
      Self::Undefined => "undefined",
      Self::ObjectId => "objectId",
      Self::Boolean => "bool",
      Self::DateTime => "date",
      Self::Null => "null",
      Self::Regex => "regex",
      Self::JavaScript => "javascript",
      Self::Symbol => "symbol",
      Self::Int32 => "int",
      Self::Int64 => "long",
      Self::MinKey => "minKey",
      Self::MaxKey => "maxKey",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn all_tags_roundtrip() {
    for ty in ElementType::ALL {
      assert_eq!(
        ElementType::from_tag(ty.tag()),
        Some(ty),
        "tag mismatch for {ty:?}"
      );
    }
  }

  #[test]
  fn table_has_seventeen_distinct_tags() {
    let mut tags: Vec<u8> = ElementType::ALL.iter().map(|t| t.tag()).collect();
    tags.sort_unstable();
    tags.dedup();
    assert_eq!(tags.len(), 17);
  }

  #[test]
  fn gaps_in_table_are_unknown() {
    for byte in [0x00, 0x0C, 0x0F, 0x11, 0x13, 0x99, 0xFE] {
      assert_eq!(ElementType::from_tag(byte), None, "byte {byte:#04X}");
    }
  }

  #[test]
  fn sentinel_tags() {
    assert_eq!(ElementType::from_tag(0xFF), Some(ElementType::MinKey));
    assert_eq!(ElementType::from_tag(0x7F), Some(ElementType::MaxKey));
  }
}
