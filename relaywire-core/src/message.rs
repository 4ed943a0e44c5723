//! Client and relay messages
//!
//! Both directions are JSON arrays whose first element names the message type
//! and whose remaining elements are positional:
//!
//! - client to relay: `EVENT`, `REQ`, `CLOSE`
//! - relay to client: `EVENT`, `OK`, `EOSE`, `CLOSED`, `NOTICE`, `AUTH`
//!
//! Relay messages with any other type decode into [`RelayMessage::Other`].

use serde::de::DeserializeOwned;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use tracing::debug;

use crate::error::DecodeError;
use crate::event::Event;
use crate::filter::Filter;
use crate::subscription::Subscription;

/// Messages sent from client to relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// `["EVENT", <event>]`
    Event(Event),
    /// `["REQ", <subscription id>, <filter>...]`
    Subscribe(Subscription),
    /// `["CLOSE", <subscription id>]`
    Unsubscribe(String),
}

impl ClientMessage {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        let message = Positional::parse(json)?;

        match message.kind.as_str() {
            "EVENT" => {
                let message = message.named("EVENT");
                Ok(ClientMessage::Event(message.field(1, "event")?))
            }
            "REQ" => {
                let message = message.named("REQ");
                let id: String = message.field(1, "subscription_id")?;
                let filters = (2..message.len())
                    .map(|position| message.field::<Filter>(position, "filter"))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ClientMessage::Subscribe(Subscription::with_id(id, filters)))
            }
            "CLOSE" => {
                let message = message.named("CLOSE");
                Ok(ClientMessage::Unsubscribe(
                    message.field(1, "subscription_id")?,
                ))
            }
            _ => Err(DecodeError::UnknownType(message.kind)),
        }
    }
}

impl Serialize for ClientMessage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ClientMessage::Event(event) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element("EVENT")?;
                seq.serialize_element(event)?;
                seq.end()
            }
            ClientMessage::Subscribe(subscription) => {
                let mut seq = serializer.serialize_seq(Some(2 + subscription.filters.len()))?;
                seq.serialize_element("REQ")?;
                seq.serialize_element(&subscription.id)?;
                for filter in &subscription.filters {
                    seq.serialize_element(filter)?;
                }
                seq.end()
            }
            ClientMessage::Unsubscribe(id) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element("CLOSE")?;
                seq.serialize_element(id)?;
                seq.end()
            }
        }
    }
}

/// Messages sent from relay to client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayMessage {
    /// `["EVENT", <subscription id>, <event>]`
    Event {
        subscription_id: String,
        event: Event,
    },
    /// `["OK", <event id>, <accepted>, <message>]`
    Ok {
        event_id: String,
        accepted: bool,
        message: String,
    },
    /// `["EOSE", <subscription id>]`
    Eose(String),
    /// `["CLOSED", <subscription id>, <message>]`
    Closed {
        subscription_id: String,
        message: String,
    },
    /// `["NOTICE", <message>]`
    Notice(String),
    /// `["AUTH", <challenge>]`
    Auth(String),
    /// Any other message: the type followed by every remaining element
    ///
    /// Elements that are not strings are kept as compact JSON text, so
    /// re-encoding writes them back as strings: `["COUNT","s",3]` becomes
    /// `["COUNT","s","3"]`.
    Other(Vec<String>),
}

impl RelayMessage {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode a relay message; unknown types never fail
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        let message = Positional::parse(json)?;

        match message.kind.as_str() {
            "EVENT" => {
                let message = message.named("EVENT");
                Ok(RelayMessage::Event {
                    subscription_id: message.field(1, "subscription_id")?,
                    event: message.field(2, "event")?,
                })
            }
            "OK" => {
                let message = message.named("OK");
                Ok(RelayMessage::Ok {
                    event_id: message.field(1, "event_id")?,
                    accepted: message.field(2, "accepted")?,
                    message: message.field(3, "message")?,
                })
            }
            "EOSE" => {
                let message = message.named("EOSE");
                Ok(RelayMessage::Eose(message.field(1, "subscription_id")?))
            }
            "CLOSED" => {
                let message = message.named("CLOSED");
                Ok(RelayMessage::Closed {
                    subscription_id: message.field(1, "subscription_id")?,
                    message: message.field(2, "message")?,
                })
            }
            "NOTICE" => {
                let message = message.named("NOTICE");
                Ok(RelayMessage::Notice(message.field(1, "message")?))
            }
            "AUTH" => {
                let message = message.named("AUTH");
                Ok(RelayMessage::Auth(message.field(1, "challenge")?))
            }
            _ => {
                debug!("Unknown relay message type {:?}", message.kind);
                Ok(RelayMessage::Other(message.into_tokens()))
            }
        }
    }
}

impl Serialize for RelayMessage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RelayMessage::Event {
                subscription_id,
                event,
            } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element("EVENT")?;
                seq.serialize_element(subscription_id)?;
                seq.serialize_element(event)?;
                seq.end()
            }
            RelayMessage::Ok {
                event_id,
                accepted,
                message,
            } => {
                let mut seq = serializer.serialize_seq(Some(4))?;
                seq.serialize_element("OK")?;
                seq.serialize_element(event_id)?;
                seq.serialize_element(accepted)?;
                seq.serialize_element(message)?;
                seq.end()
            }
            RelayMessage::Eose(subscription_id) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element("EOSE")?;
                seq.serialize_element(subscription_id)?;
                seq.end()
            }
            RelayMessage::Closed {
                subscription_id,
                message,
            } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element("CLOSED")?;
                seq.serialize_element(subscription_id)?;
                seq.serialize_element(message)?;
                seq.end()
            }
            RelayMessage::Notice(message) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element("NOTICE")?;
                seq.serialize_element(message)?;
                seq.end()
            }
            RelayMessage::Auth(challenge) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element("AUTH")?;
                seq.serialize_element(challenge)?;
                seq.end()
            }
            RelayMessage::Other(tokens) => tokens.serialize(serializer),
        }
    }
}

/// A message split into its type and raw positional elements
///
/// Each element keeps its original JSON text, so it is decoded exactly once
/// with the type its position calls for.
struct Positional<'a> {
    name: &'static str,
    kind: String,
    items: Vec<&'a RawValue>,
}

impl<'a> Positional<'a> {
    fn parse(json: &'a str) -> Result<Self, DecodeError> {
        let items: Vec<&RawValue> = serde_json::from_str(json).map_err(|e| {
            if e.is_data() {
                DecodeError::NotAnArray
            } else {
                DecodeError::Json(e)
            }
        })?;
        let first = items.first().ok_or(DecodeError::NotAnArray)?;
        let kind: String =
            serde_json::from_str(first.get()).map_err(|_| DecodeError::InvalidDiscriminator)?;

        Ok(Positional {
            name: "unknown",
            kind,
            items,
        })
    }

    fn named(self, name: &'static str) -> Self {
        Positional { name, ..self }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn field<T: DeserializeOwned>(
        &self,
        position: usize,
        field: &'static str,
    ) -> Result<T, DecodeError> {
        let raw = self.items.get(position).ok_or(DecodeError::MissingField {
            message: self.name,
            field,
            position,
        })?;
        serde_json::from_str(raw.get()).map_err(|e| DecodeError::InvalidField {
            message: self.name,
            field,
            reason: e.to_string(),
        })
    }

    fn into_tokens(self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.items.len());
        tokens.push(self.kind);
        tokens.extend(self.items[1..].iter().map(|raw| token_text(raw)));
        tokens
    }
}

fn token_text(raw: &RawValue) -> String {
    if let Ok(text) = serde_json::from_str::<String>(raw.get()) {
        return text;
    }
    match serde_json::from_str::<serde_json::Value>(raw.get()) {
        Ok(value) => value.to_string(),
        Err(_) => raw.get().to_string(),
    }
}
