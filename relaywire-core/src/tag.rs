//! Event tags

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A tag: a name followed by positional values, e.g. `["e", <id>, <relay>]`
///
/// Always holds at least the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    values: Vec<String>,
}

impl Tag {
    /// Build a tag from its name and payload
    pub fn new<I, S>(name: impl Into<String>, payload: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values = vec![name.into()];
        values.extend(payload.into_iter().map(Into::into));
        Tag { values }
    }

    /// Build a tag from its full value list; `None` if the list is empty
    pub fn from_values<I, S>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        (!values.is_empty()).then_some(Tag { values })
    }

    /// `["e", <event id>, <relay>?]`
    pub fn event(event_id: impl Into<String>, relay: Option<&str>) -> Self {
        let event_id: String = event_id.into();
        Tag::new("e", std::iter::once(event_id).chain(relay.map(String::from)))
    }

    /// `["p", <pubkey>, <relay>?]`
    pub fn public_key(public_key: impl Into<String>, relay: Option<&str>) -> Self {
        let public_key: String = public_key.into();
        Tag::new("p", std::iter::once(public_key).chain(relay.map(String::from)))
    }

    /// `["d", <identifier>]`
    pub fn identifier(identifier: impl Into<String>) -> Self {
        let identifier: String = identifier.into();
        Tag::new("d", [identifier])
    }

    /// First element of the tag
    pub fn name(&self) -> &str {
        &self.values[0]
    }

    /// Everything after the name
    pub fn payload(&self) -> &[String] {
        &self.values[1..]
    }

    /// First payload value, the one filters match against
    pub fn content(&self) -> Option<&str> {
        self.values.get(1).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.values
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.values.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<String>::deserialize(deserializer)?;
        Tag::from_values(values).ok_or_else(|| D::Error::custom("missing required tag name"))
    }
}
