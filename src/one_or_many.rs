use serde::de::{DeserializeOwned, Error as DeError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A vector wrapper that serializes a single element as itself, and anything
/// else as an array.
///
/// HAL allows both `"rel": {...}` and `"rel": [{...}, ...]`, this type reads
/// either and writes the shortest form unless forced to use an array.
///
/// ```
/// use rustic_hal::{HalLink, OneOrMany};
/// use serde_json::to_string;
///
/// let mut v = OneOrMany::new();
/// v.push(HalLink::new("http://test.com"));
/// assert_eq!(to_string(&v).unwrap(), r#"{"href":"http://test.com"}"#);
///
/// v.push(HalLink::new("http://test2.com"));
/// assert_eq!(
///     to_string(&v).unwrap(),
///     r#"[{"href":"http://test.com"},{"href":"http://test2.com"}]"#
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct OneOrMany<T> {
    force_many: bool,
    content: Vec<T>,
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self { force_many: false, content: Vec::new() }
    }
}

impl<T> OneOrMany<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize as an array even when there is only one element (or none).
    pub fn force_many(&mut self) -> &mut Self {
        self.force_many = true;
        self
    }

    pub fn is_forced_many(&self) -> bool {
        self.force_many
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The first element, if any.
    pub fn single(&self) -> Option<&T> {
        self.content.first()
    }

    pub fn many(&self) -> &[T] {
        &self.content
    }

    pub fn push(&mut self, value: T) {
        self.content.push(value);
    }

    pub fn with(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.content.iter_mut()
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(content: Vec<T>) -> Self {
        Self { force_many: false, content }
    }
}
impl<T> FromIterator<T> for OneOrMany<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}
impl<T> IntoIterator for OneOrMany<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}
impl<'a, T> IntoIterator for &'a OneOrMany<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.content.iter()
    }
}

impl<T: Serialize> Serialize for OneOrMany<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.content.as_slice() {
            [] if !self.force_many => serializer.serialize_unit(),
            [single] if !self.force_many => single.serialize(serializer),
            all => all.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for OneOrMany<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Buffer first: an element may itself be an array or an object, so
        // the shape can only be decided at the top level.
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self::new()),
            Value::Array(items) => {
                let content = items
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<Result<Vec<T>, _>>()
                    .map_err(D::Error::custom)?;
                Ok(Self { force_many: true, content })
            },
            value => {
                let single = serde_json::from_value(value).map_err(D::Error::custom)?;
                Ok(Self { force_many: false, content: vec![single] })
            },
        }
    }
}
