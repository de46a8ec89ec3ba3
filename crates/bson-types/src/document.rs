use crate::value::Value;

/// An ordered sequence of key/value elements.
///
/// Decode order is preserved exactly. Duplicate keys are legal on the
/// wire and are kept side by side; [`get`](Self::get) returns the first
/// occurrence and [`get_all`](Self::get_all) exposes every one, leaving
/// any last-wins policy to the caller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
  elements: Vec<(String, Value)>,
}

impl Document {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      elements: Vec::with_capacity(capacity),
    }
  }

  /// Append an element, keeping any existing element with the same key.
  pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
    self.elements.push((key.into(), value.into()));
  }

  /// Builder form of [`push`](Self::push).
  #[must_use]
  pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
    self.push(key, value);
    self
  }

  /// First value stored under `key`.
  #[must_use]
  pub fn get(&self, key: &str) -> Option<&Value> {
    self
      .elements
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v)
  }

  /// Every value stored under `key`, in decode order.
  pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
    self
      .elements
      .iter()
      .filter(move |(k, _)| k == key)
      .map(|(_, v)| v)
  }

  #[must_use]
  pub fn contains_key(&self, key: &str) -> bool {
    self.get(key).is_some()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.elements.iter().map(|(k, v)| (k.as_str(), v))
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.elements.iter().map(|(k, _)| k.as_str())
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.elements.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.elements.is_empty()
  }
}

impl IntoIterator for Document {
  type Item = (String, Value);
  type IntoIter = std::vec::IntoIter<(String, Value)>;

  fn into_iter(self) -> Self::IntoIter {
    self.elements.into_iter()
  }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self {
      elements: iter
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect(),
    }
  }
}
