//! Builder pattern for Event construction

use crate::error::SignError;
use crate::event::Event;
use crate::keys::KeyPair;
use crate::kind::Kind;
use crate::tag::Tag;
use crate::timestamp::Timestamp;

/// Fluent builder for constructing unsigned or signed events
///
/// # Example
///
/// ```
/// use relaywire_core::{EventBuilder, Kind, KeyPair};
///
/// let keys = KeyPair::generate()?;
/// let event = EventBuilder::new()
///     .kind(Kind::TEXT_NOTE)
///     .content("Hello, Nostr!")
///     .tag("t", ["intro"])
///     .sign(&keys)?;
///
/// assert_eq!(event.tags.len(), 1);
/// assert!(event.is_valid());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct EventBuilder {
    pubkey: String,
    created_at: Option<Timestamp>,
    kind: Kind,
    tags: Vec<Tag>,
    content: String,
}

impl EventBuilder {
    /// Create a new builder: kind 1, empty content, no tags
    pub fn new() -> Self {
        Self {
            pubkey: String::new(),
            created_at: None,
            kind: Kind::TEXT_NOTE,
            tags: Vec::new(),
            content: String::new(),
        }
    }

    /// Set the author's hex public key
    pub fn pubkey<S: Into<String>>(mut self, pubkey: S) -> Self {
        self.pubkey = pubkey.into();
        self
    }

    /// Set the creation timestamp; defaults to the time of `build`
    pub fn created_at(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.created_at = Some(timestamp.into());
        self
    }

    pub fn kind(mut self, kind: impl Into<Kind>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn content<S: Into<String>>(mut self, content: S) -> Self {
        self.content = content.into();
        self
    }

    /// Add a tag from its name and payload
    pub fn tag<I, S>(mut self, name: impl Into<String>, payload: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.push(Tag::new(name, payload));
        self
    }

    /// Add a tag from a Tag instance
    pub fn add_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Replace all tags
    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Build the unsigned event
    pub fn build(self) -> Event {
        Event::new(
            self.pubkey,
            self.created_at.unwrap_or_else(Timestamp::now),
            self.kind,
            self.tags,
            self.content,
        )
    }

    /// Build the event with the key pair's public key and sign it
    pub fn sign(self, key_pair: &KeyPair) -> Result<Event, SignError> {
        let mut event = self.pubkey(key_pair.public_key()).build();
        event.sign(key_pair)?;
        Ok(event)
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
