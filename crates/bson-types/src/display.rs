//! Shell-style text rendering of values and documents.
//!
//! ```text
//! { "_id": ObjectId("000102030405060708090a0b"), "n": 1, "tags": ["a", "b"] }
//! ```
//!
//! Strings and keys are quoted with Rust escaping, so the output is
//! single-line and unambiguous. This is for humans and snapshots; use
//! the CLI's extended-JSON output when a machine needs to read it back.

use std::fmt::{self, Write as _};

use crate::document::Document;
use crate::value::Value;

impl fmt::Display for Document {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_empty() {
      return f.write_str("{}");
    }
    f.write_str("{ ")?;
    for (i, (key, value)) in self.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      write!(f, "{key:?}: {value}")?;
    }
    f.write_str(" }")
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Double(v) => write!(f, "{v:?}"),
      Self::String(s) => write!(f, "{s:?}"),
      Self::Document(d) => write!(f, "{d}"),
      Self::Array(items) => {
        f.write_char('[')?;
        for (i, item) in items.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{item}")?;
        }
        f.write_char(']')
      }
      Self::Binary(bin) => write!(
        f,
        "BinData({}, \"{}\")",
        bin.subtype.name(),
        hex::encode(&bin.bytes)
      ),
      Self::Undefined => f.write_str("undefined"),
      Self::ObjectId(id) => write!(f, "ObjectId(\"{id}\")"),
      Self::Boolean(b) => write!(f, "{b}"),
      Self::DateTime(dt) => write!(f, "{dt}"),
      Self::Null => f.write_str("null"),
      Self::Regex(re) => write!(f, "/{}/{}", re.pattern, re.options),
      Self::JavaScript(code) => write!(f, "Code({code:?})"),
      Self::Symbol(sym) => write!(f, "Symbol({sym:?})"),
      Self::Int32(v) => write!(f, "{v}"),
      Self::Int64(v) => write!(f, "NumberLong({v})"),
      Self::MinKey => f.write_str("MinKey"),
      Self::MaxKey => f.write_str("MaxKey"),
    }
  }
}
