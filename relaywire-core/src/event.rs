//! The signed event record
//!
//! Serialization follows the NIP-01 object layout. `id` and `sig` are omitted
//! while an event is unsigned.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IdentifierError, SignError, ValidationError};
use crate::identity;
use crate::keys::KeyPair;
use crate::kind::Kind;
use crate::nip19::{self, EventPointer};
use crate::tag::Tag;
use crate::timestamp::Timestamp;

/// A Nostr event
///
/// Created unsigned (`id` and `sig` both `None`) and filled in by
/// [`Event::sign`], which sets both or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Lowercase hex sha256 of the canonical serialization
    pub id: Option<String>,
    /// Lowercase hex x-only public key of the author
    pub pubkey: String,
    pub created_at: Timestamp,
    pub kind: Kind,
    pub tags: Vec<Tag>,
    pub content: String,
    /// Lowercase hex Schnorr signature over the id
    pub sig: Option<String>,
}

impl Event {
    /// Create an unsigned event
    pub fn new(
        pubkey: impl Into<String>,
        created_at: Timestamp,
        kind: Kind,
        tags: Vec<Tag>,
        content: impl Into<String>,
    ) -> Self {
        Event {
            id: None,
            pubkey: pubkey.into(),
            created_at,
            kind,
            tags,
            content: content.into(),
            sig: None,
        }
    }

    pub fn is_signed(&self) -> bool {
        self.id.is_some() && self.sig.is_some()
    }

    /// Sign in place; see [`identity::sign`]
    pub fn sign(&mut self, key_pair: &KeyPair) -> Result<(), SignError> {
        identity::sign(self, key_pair)
    }

    /// See [`identity::has_valid_id`]
    pub fn has_valid_id(&self) -> bool {
        identity::has_valid_id(self)
    }

    /// See [`identity::is_valid`]
    pub fn is_valid(&self) -> bool {
        identity::is_valid(self)
    }

    /// See [`identity::verify`]
    pub fn verify(&self) -> Result<(), ValidationError> {
        identity::verify(self)
    }

    /// Tags with the given name, in order
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags.iter().filter(move |tag| tag.name() == name)
    }

    /// `note1…` for this event's id
    pub fn encode_note(&self) -> Result<String, IdentifierError> {
        let id = self.id.as_deref().ok_or(IdentifierError::MissingField("id"))?;
        nip19::encode_note(id)
    }

    /// `nevent1…` pointing at this event, with its author and kind
    pub fn encode_nevent(&self, relays: &[String]) -> Result<String, IdentifierError> {
        let id = self.id.clone().ok_or(IdentifierError::MissingField("id"))?;
        nip19::encode_nevent(&EventPointer {
            id,
            relays: relays.to_vec(),
            author: Some(self.pubkey.clone()),
            kind: Some(u32::from(self.kind.as_u16())),
        })
    }

    /// Compact JSON object form
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Serialize for Event {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let len = 5 + usize::from(self.id.is_some()) + usize::from(self.sig.is_some());
        let mut state = serializer.serialize_struct("Event", len)?;
        if let Some(id) = &self.id {
            state.serialize_field("id", id)?;
        } else {
            state.skip_field("id")?;
        }
        state.serialize_field("pubkey", &self.pubkey)?;
        state.serialize_field("created_at", &self.created_at)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("tags", &self.tags)?;
        state.serialize_field("content", &self.content)?;
        if let Some(sig) = &self.sig {
            state.serialize_field("sig", sig)?;
        } else {
            state.skip_field("sig")?;
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct EventHelper {
            #[serde(default)]
            id: Option<String>,
            pubkey: String,
            created_at: Timestamp,
            kind: Kind,
            tags: Vec<Tag>,
            content: String,
            #[serde(default)]
            sig: Option<String>,
        }

        let helper = EventHelper::deserialize(deserializer)?;

        Ok(Event {
            id: helper.id,
            pubkey: helper.pubkey,
            created_at: helper.created_at,
            kind: helper.kind,
            tags: helper.tags,
            content: helper.content,
            sig: helper.sig,
        })
    }
}

/// Pretty-printed JSON
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "<invalid Event>"),
        }
    }
}
