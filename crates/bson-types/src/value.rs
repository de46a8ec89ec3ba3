use crate::binary::Binary;
use crate::datetime::UtcDateTime;
use crate::document::Document;
use crate::element_type::ElementType;
use crate::object_id::ObjectId;

/// A regular expression as carried on the wire: two cstrings.
///
/// Neither part is compiled or validated; options are kept in the
/// order they were written.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Regex {
  pub pattern: String,
  pub options: String,
}

impl Regex {
  #[must_use]
  pub fn new(pattern: impl Into<String>, options: impl Into<String>) -> Self {
    Self {
      pattern: pattern.into(),
      options: options.into(),
    }
  }
}

/// A decoded element value, one variant per tag.
///
/// Values are immutable once built by the decoder. `Array` holds the
/// normalized sequence, never the keyed document it was encoded as.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  Double(f64),
  String(String),
  Document(Document),
  Array(Vec<Value>),
  Binary(Binary),
  Undefined,
  ObjectId(ObjectId),
  Boolean(bool),
  DateTime(UtcDateTime),
  Null,
  Regex(Regex),
  JavaScript(String),
  Symbol(String),
  Int32(i32),
  Int64(i64),
  MinKey,
  MaxKey,
}

impl Value {
  /// The tag this value is written with.
  #[must_use]
  pub fn element_type(&self) -> ElementType {
    match self {
      Self::Double(_) => ElementType::Double,
      Self::String(_) => ElementType::String,
      Self::Document(_) => ElementType::Document,
      Self::Array(_) => ElementType::Array,
      Self::Binary(_) => ElementType::Binary,
      Self::Undefined => ElementType::Undefined,
      Self::ObjectId(_) => ElementType::ObjectId,
      Self::Boolean(_) => ElementType::Boolean,
      Self::DateTime(_) => ElementType::DateTime,
      Self::Null => ElementType::Null,
      Self::Regex(_) => ElementType::Regex,
      Self::JavaScript(_) => ElementType::JavaScript,
      Self::Symbol(_) => ElementType::Symbol,
      Self::Int32(_) => ElementType::Int32,
      Self::Int64(_) => ElementType::Int64,
      Self::MinKey => ElementType::MinKey,
      Self::MaxKey => ElementType::MaxKey,
    }
  }

  #[must_use]
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::String(s) => Some(s),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_document(&self) -> Option<&Document> {
    match self {
      Self::Document(d) => Some(d),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_array(&self) -> Option<&[Value]> {
    match self {
      Self::Array(items) => Some(items),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Self::Boolean(b) => Some(*b),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_i32(&self) -> Option<i32> {
    match self {
      Self::Int32(v) => Some(*v),
      _ => None,
    }
  }

  /// Integer view across both widths.
  #[must_use]
  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Self::Int32(v) => Some(i64::from(*v)),
      Self::Int64(v) => Some(*v),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_f64(&self) -> Option<f64> {
    match self {
      Self::Double(v) => Some(*v),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_object_id(&self) -> Option<ObjectId> {
    match self {
      Self::ObjectId(id) => Some(*id),
      _ => None,
    }
  }

  #[must_use]
  pub fn is_null(&self) -> bool {
    matches!(self, Self::Null)
  }
}

// ── Conversions ───────────────────────────────────────────────────────

impl From<f64> for Value {
  fn from(v: f64) -> Self {
    Self::Double(v)
  }
}

impl From<i32> for Value {
  fn from(v: i32) -> Self {
    Self::Int32(v)
  }
}

impl From<i64> for Value {
  fn from(v: i64) -> Self {
    Self::Int64(v)
  }
}

impl From<bool> for Value {
  fn from(v: bool) -> Self {
    Self::Boolean(v)
  }
}

impl From<&str> for Value {
  fn from(v: &str) -> Self {
    Self::String(v.to_string())
  }
}

impl From<String> for Value {
  fn from(v: String) -> Self {
    Self::String(v)
  }
}

impl From<Document> for Value {
  fn from(v: Document) -> Self {
    Self::Document(v)
  }
}

impl From<Vec<Value>> for Value {
  fn from(v: Vec<Value>) -> Self {
    Self::Array(v)
  }
}

impl From<Binary> for Value {
  fn from(v: Binary) -> Self {
    Self::Binary(v)
  }
}

impl From<ObjectId> for Value {
  fn from(v: ObjectId) -> Self {
    Self::ObjectId(v)
  }
}

impl From<UtcDateTime> for Value {
  fn from(v: UtcDateTime) -> Self {
    Self::DateTime(v)
  }
}

impl From<Regex> for Value {
  fn from(v: Regex) -> Self {
    Self::Regex(v)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn element_type_matches_variant() {
    let cases = [
      (Value::from(1.5), ElementType::Double),
      (Value::from("x"), ElementType::String),
      (Value::from(Document::new()), ElementType::Document),
      (Value::Array(vec![]), ElementType::Array),
      (Value::Undefined, ElementType::Undefined),
      (Value::from(true), ElementType::Boolean),
      (Value::Null, ElementType::Null),
      (Value::from(Regex::new("a+", "i")), ElementType::Regex),
      (Value::JavaScript("f()".into()), ElementType::JavaScript),
      (Value::Symbol("s".into()), ElementType::Symbol),
      (Value::from(7i32), ElementType::Int32),
      (Value::from(7i64), ElementType::Int64),
      (Value::MinKey, ElementType::MinKey),
      (Value::MaxKey, ElementType::MaxKey),
    ];
    for (value, expected) in cases {
      assert_eq!(value.element_type(), expected, "{value:?}");
    }
  }

  #[test]
  fn integer_view_spans_widths() {
    assert_eq!(Value::Int32(-4).as_i64(), Some(-4));
    assert_eq!(Value::Int64(1 << 40).as_i64(), Some(1 << 40));
    assert_eq!(Value::Double(1.0).as_i64(), None);
  }

  #[test]
  fn accessors_reject_other_variants() {
    let v = Value::from("text");
    assert_eq!(v.as_str(), Some("text"));
    assert!(v.as_document().is_none());
    assert!(v.as_bool().is_none());
    assert!(!v.is_null());
  }
}
