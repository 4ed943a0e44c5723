//! Subscription filters
//!
//! A filter has fixed fields (`ids`, `authors`, `kinds`, `since`, `until`,
//! `limit`) plus any number of single-letter tag filters written as `"#e"`,
//! `"#p"` and so on. Tag filters are kept in key order; repeated keys are
//! grouped by appending their values.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::event::Event;
use crate::kind::Kind;
use crate::timestamp::Timestamp;

/// An immutable subscription filter; construct with [`Filter::builder`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    ids: Option<Vec<String>>,
    authors: Option<Vec<String>>,
    kinds: Option<Vec<Kind>>,
    since: Option<Timestamp>,
    until: Option<Timestamp>,
    limit: Option<u64>,
    tags: BTreeMap<String, Vec<String>>,
}

impl Filter {
    pub fn builder() -> FilterBuilder {
        FilterBuilder::new()
    }

    pub fn ids(&self) -> Option<&[String]> {
        self.ids.as_deref()
    }

    pub fn authors(&self) -> Option<&[String]> {
        self.authors.as_deref()
    }

    pub fn kinds(&self) -> Option<&[Kind]> {
        self.kinds.as_deref()
    }

    pub fn since(&self) -> Option<Timestamp> {
        self.since
    }

    pub fn until(&self) -> Option<Timestamp> {
        self.until
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Tag filters keyed by tag name, without the `#`
    pub fn tags(&self) -> &BTreeMap<String, Vec<String>> {
        &self.tags
    }

    /// Values for one tag filter
    pub fn tag(&self, key: &str) -> Option<&[String]> {
        self.tags.get(key).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        *self == Filter::default()
    }

    /// Whether an event satisfies every condition of the filter
    ///
    /// `limit` only bounds the initial query and is not checked here.
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(ids) = &self.ids {
            match &event.id {
                Some(id) if ids.contains(id) => {}
                _ => return false,
            }
        }
        if let Some(authors) = &self.authors {
            if !authors.contains(&event.pubkey) {
                return false;
            }
        }
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&event.kind) {
                return false;
            }
        }
        if self.since.is_some_and(|since| event.created_at < since) {
            return false;
        }
        if self.until.is_some_and(|until| event.created_at > until) {
            return false;
        }

        self.tags.iter().all(|(key, values)| {
            event.tags.iter().any(|tag| {
                tag.name() == key && tag.content().is_some_and(|v| values.iter().any(|x| x == v))
            })
        })
    }
}

impl Serialize for Filter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if let Some(ids) = &self.ids {
            map.serialize_entry("ids", ids)?;
        }
        if let Some(authors) = &self.authors {
            map.serialize_entry("authors", authors)?;
        }
        if let Some(kinds) = &self.kinds {
            map.serialize_entry("kinds", kinds)?;
        }
        if let Some(since) = &self.since {
            map.serialize_entry("since", since)?;
        }
        if let Some(until) = &self.until {
            map.serialize_entry("until", until)?;
        }
        if let Some(limit) = &self.limit {
            map.serialize_entry("limit", limit)?;
        }
        for (key, values) in &self.tags {
            map.serialize_entry(&format!("#{}", key), values)?;
        }
        map.end()
    }
}

struct FilterVisitor;

impl<'de> Visitor<'de> for FilterVisitor {
    type Value = Filter;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a filter object")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut builder = FilterBuilder::new();

        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                "ids" => builder.filter.ids = Some(access.next_value()?),
                "authors" => builder.filter.authors = Some(access.next_value()?),
                "kinds" => builder.filter.kinds = Some(access.next_value()?),
                "since" => builder.filter.since = Some(access.next_value()?),
                "until" => builder.filter.until = Some(access.next_value()?),
                "limit" => builder.filter.limit = Some(access.next_value()?),
                _ => match key.strip_prefix('#') {
                    Some(tag) => {
                        let values: Vec<String> = access.next_value()?;
                        builder = builder.tag(tag, values);
                    }
                    None => {
                        access.next_value::<IgnoredAny>()?;
                    }
                },
            }
        }

        Ok(builder.build())
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FilterVisitor)
    }
}

/// Fluent builder for [`Filter`]
///
/// Repeated calls for the same list field or tag key append values.
///
/// ```
/// use relaywire_core::{Filter, Kind};
///
/// let filter = Filter::builder()
///     .kind(Kind::TEXT_NOTE)
///     .tag("t", ["nostr"])
///     .limit(20)
///     .build();
///
/// assert_eq!(
///     serde_json::to_string(&filter).unwrap(),
///     r##"{"kinds":[1],"limit":20,"#t":["nostr"]}"##
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    filter: Filter,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter
            .ids
            .get_or_insert_with(Vec::new)
            .extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        let id: String = id.into();
        self.ids([id])
    }

    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter
            .authors
            .get_or_insert_with(Vec::new)
            .extend(authors.into_iter().map(Into::into));
        self
    }

    pub fn author(self, author: impl Into<String>) -> Self {
        let author: String = author.into();
        self.authors([author])
    }

    pub fn kinds<I>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = Kind>,
    {
        self.filter
            .kinds
            .get_or_insert_with(Vec::new)
            .extend(kinds);
        self
    }

    pub fn kind(self, kind: Kind) -> Self {
        self.kinds([kind])
    }

    pub fn since(mut self, since: Timestamp) -> Self {
        self.filter.since = Some(since);
        self
    }

    pub fn until(mut self, until: Timestamp) -> Self {
        self.filter.until = Some(until);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.filter.limit = Some(limit);
        self
    }

    /// Add values for a tag filter keyed by tag name
    ///
    /// A leading `#` on `key` is dropped. An empty value list leaves the filter unchanged.
    pub fn tag<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            let key = key.into();
            let key = match key.strip_prefix('#') {
                Some(name) => name.to_string(),
                None => key,
            };
            self.filter
                .tags
                .entry(key)
                .or_default()
                .extend(values);
        }
        self
    }

    pub fn build(self) -> Filter {
        self.filter
    }
}
