//! NIP-19 shareable identifiers
//!
//! `note`, `npub` and `nsec` wrap a raw 32-byte value. `nevent`, `nprofile`
//! and `naddr` wrap a TLV stream (see [`crate::tlv`]) and may carry relay hints.
//!
//! # Example
//!
//! ```
//! use relaywire_core::nip19::{self, ProfilePointer};
//!
//! let pointer = ProfilePointer {
//!     public_key: "3bf0c63fcb93463407af97a5e5ee64fa883d107ef9e558472c4eb9aaaefa459d".into(),
//!     relays: vec!["wss://r.x.com".into()],
//! };
//! let text = nip19::encode_nprofile(&pointer)?;
//! assert_eq!(nip19::decode_nprofile(&text)?, pointer);
//! # Ok::<(), relaywire_core::error::IdentifierError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bech32::{self, LengthLimit};
use crate::error::IdentifierError;
use crate::tlv;

pub const NOTE_PREFIX: &str = "note";
pub const NEVENT_PREFIX: &str = "nevent";
pub const NPROFILE_PREFIX: &str = "nprofile";
pub const NADDR_PREFIX: &str = "naddr";
pub const NPUB_PREFIX: &str = "npub";
pub const NSEC_PREFIX: &str = "nsec";

/// Pointer to a profile, decoded from `nprofile`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePointer {
    #[serde(rename = "pubkey")]
    pub public_key: String,
    pub relays: Vec<String>,
}

/// Pointer to an event, decoded from `nevent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPointer {
    pub id: String,
    pub relays: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<u32>,
}

/// Pointer to an addressable event, decoded from `naddr`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPointer {
    #[serde(rename = "pubkey")]
    pub public_key: String,
    pub relays: Vec<String>,
    pub kind: u32,
    /// The `d` tag of the target; empty for plain replaceable events
    pub identifier: String,
}

/// Any decoded shareable identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nip19 {
    Note(String),
    Event(EventPointer),
    Profile(ProfilePointer),
    Address(EntityPointer),
    PublicKey(String),
    SecretKey(String),
}

impl Nip19 {
    /// Decode any identifier, dispatching on its prefix
    pub fn decode(text: &str) -> Result<Self, IdentifierError> {
        let hrp = text
            .rfind('1')
            .map(|pos| text[..pos].to_ascii_lowercase())
            .unwrap_or_default();

        match hrp.as_str() {
            NOTE_PREFIX => decode_note(text).map(Nip19::Note),
            NEVENT_PREFIX => decode_nevent(text).map(Nip19::Event),
            NPROFILE_PREFIX => decode_nprofile(text).map(Nip19::Profile),
            NADDR_PREFIX => decode_naddr(text).map(Nip19::Address),
            NPUB_PREFIX => decode_npub(text).map(Nip19::PublicKey),
            NSEC_PREFIX => decode_nsec(text).map(Nip19::SecretKey),
            _ => Err(IdentifierError::WrongPrefix {
                expected: "note, nevent, nprofile, naddr, npub or nsec".to_string(),
                found: hrp,
            }),
        }
    }

    /// Encode back to bech32 text
    pub fn encode(&self) -> Result<String, IdentifierError> {
        match self {
            Nip19::Note(id) => encode_note(id),
            Nip19::Event(pointer) => encode_nevent(pointer),
            Nip19::Profile(pointer) => encode_nprofile(pointer),
            Nip19::Address(pointer) => encode_naddr(pointer),
            Nip19::PublicKey(key) => encode_npub(key),
            Nip19::SecretKey(key) => encode_nsec(key),
        }
    }
}

impl FromStr for Nip19 {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Nip19::decode(s)
    }
}

impl fmt::Display for Nip19 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.encode() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "<invalid identifier>"),
        }
    }
}

// ============================================================================
// Raw 32-byte forms
// ============================================================================

/// Encode a hex event id as `note1…`
pub fn encode_note(id: &str) -> Result<String, IdentifierError> {
    encode_raw(NOTE_PREFIX, "id", id)
}

/// Decode `note1…` into a hex event id
pub fn decode_note(text: &str) -> Result<String, IdentifierError> {
    decode_raw(NOTE_PREFIX, "id", text)
}

/// Encode a hex public key as `npub1…`
pub fn encode_npub(public_key: &str) -> Result<String, IdentifierError> {
    encode_raw(NPUB_PREFIX, "pubkey", public_key)
}

/// Decode `npub1…` into a hex public key
pub fn decode_npub(text: &str) -> Result<String, IdentifierError> {
    decode_raw(NPUB_PREFIX, "pubkey", text)
}

/// Encode a hex secret key as `nsec1…`
pub fn encode_nsec(secret_key: &str) -> Result<String, IdentifierError> {
    encode_raw(NSEC_PREFIX, "secret key", secret_key)
}

/// Decode `nsec1…` into a hex secret key
pub fn decode_nsec(text: &str) -> Result<String, IdentifierError> {
    decode_raw(NSEC_PREFIX, "secret key", text)
}

fn encode_raw(hrp: &str, field: &'static str, value: &str) -> Result<String, IdentifierError> {
    let bytes = hex_32(field, value)?;
    Ok(bech32::encode(hrp, &bytes)?)
}

fn decode_raw(hrp: &str, field: &'static str, text: &str) -> Result<String, IdentifierError> {
    let data = decode_payload(hrp, text)?;
    if data.is_empty() {
        return Err(IdentifierError::MissingField(field));
    }
    Ok(hex::encode(fixed_32(field, &data)?))
}

// ============================================================================
// TLV forms
// ============================================================================

/// Encode an [`EventPointer`] as `nevent1…`
pub fn encode_nevent(pointer: &EventPointer) -> Result<String, IdentifierError> {
    let mut buffer = Vec::new();
    tlv::write_entry(&mut buffer, tlv::DEFAULT, &hex_32("id", &pointer.id)?)?;
    write_relays(&mut buffer, &pointer.relays)?;
    if let Some(author) = &pointer.author {
        tlv::write_entry(&mut buffer, tlv::AUTHOR, &hex_32("author", author)?)?;
    }
    if let Some(kind) = pointer.kind {
        tlv::write_entry(&mut buffer, tlv::KIND, &kind.to_be_bytes())?;
    }
    Ok(bech32::encode(NEVENT_PREFIX, &buffer)?)
}

/// Decode `nevent1…`
pub fn decode_nevent(text: &str) -> Result<EventPointer, IdentifierError> {
    let data = decode_payload(NEVENT_PREFIX, text)?;

    let mut id = None;
    let mut relays = Vec::new();
    let mut author = None;
    let mut kind = None;

    for (t, value) in tlv::entries(&data) {
        match t {
            tlv::DEFAULT => id = Some(hex::encode(fixed_32("id", value)?)),
            tlv::RELAY => relays.push(utf8("relay", value)?),
            tlv::AUTHOR => author = Some(hex::encode(fixed_32("author", value)?)),
            tlv::KIND => kind = Some(kind_value(value)?),
            _ => {}
        }
    }

    Ok(EventPointer {
        id: id.ok_or(IdentifierError::MissingField("id"))?,
        relays,
        author,
        kind,
    })
}

/// Encode a [`ProfilePointer`] as `nprofile1…`
pub fn encode_nprofile(pointer: &ProfilePointer) -> Result<String, IdentifierError> {
    let mut buffer = Vec::new();
    tlv::write_entry(&mut buffer, tlv::DEFAULT, &hex_32("pubkey", &pointer.public_key)?)?;
    write_relays(&mut buffer, &pointer.relays)?;
    Ok(bech32::encode(NPROFILE_PREFIX, &buffer)?)
}

/// Decode `nprofile1…`
pub fn decode_nprofile(text: &str) -> Result<ProfilePointer, IdentifierError> {
    let data = decode_payload(NPROFILE_PREFIX, text)?;

    let mut public_key = None;
    let mut relays = Vec::new();

    for (t, value) in tlv::entries(&data) {
        match t {
            tlv::DEFAULT => public_key = Some(hex::encode(fixed_32("pubkey", value)?)),
            tlv::RELAY => relays.push(utf8("relay", value)?),
            _ => {}
        }
    }

    Ok(ProfilePointer {
        public_key: public_key.ok_or(IdentifierError::MissingField("pubkey"))?,
        relays,
    })
}

/// Encode an [`EntityPointer`] as `naddr1…`
pub fn encode_naddr(pointer: &EntityPointer) -> Result<String, IdentifierError> {
    let mut buffer = Vec::new();
    tlv::write_entry(&mut buffer, tlv::DEFAULT, pointer.identifier.as_bytes())?;
    write_relays(&mut buffer, &pointer.relays)?;
    tlv::write_entry(&mut buffer, tlv::AUTHOR, &hex_32("pubkey", &pointer.public_key)?)?;
    tlv::write_entry(&mut buffer, tlv::KIND, &pointer.kind.to_be_bytes())?;
    Ok(bech32::encode(NADDR_PREFIX, &buffer)?)
}

/// Decode `naddr1…`
pub fn decode_naddr(text: &str) -> Result<EntityPointer, IdentifierError> {
    let data = decode_payload(NADDR_PREFIX, text)?;

    let mut identifier = None;
    let mut relays = Vec::new();
    let mut public_key = None;
    let mut kind = None;

    for (t, value) in tlv::entries(&data) {
        match t {
            tlv::DEFAULT => identifier = Some(utf8("identifier", value)?),
            tlv::RELAY => relays.push(utf8("relay", value)?),
            tlv::AUTHOR => public_key = Some(hex::encode(fixed_32("pubkey", value)?)),
            tlv::KIND => kind = Some(kind_value(value)?),
            _ => {}
        }
    }

    Ok(EntityPointer {
        public_key: public_key.ok_or(IdentifierError::MissingField("pubkey"))?,
        relays,
        kind: kind.ok_or(IdentifierError::MissingField("kind"))?,
        identifier: identifier.unwrap_or_default(),
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn decode_payload(hrp: &str, text: &str) -> Result<Vec<u8>, IdentifierError> {
    let wrong_prefix = || IdentifierError::WrongPrefix {
        expected: hrp.to_string(),
        found: text.chars().take_while(|c| *c != '1').collect(),
    };

    if !text
        .get(..hrp.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(hrp))
    {
        return Err(wrong_prefix());
    }

    let decoded = bech32::decode(text, LengthLimit::Unlimited)?;
    // "nevent" also prefixes an hrp like "neventx"
    if decoded.hrp != hrp {
        return Err(wrong_prefix());
    }
    Ok(decoded.data)
}

fn write_relays(buffer: &mut Vec<u8>, relays: &[String]) -> Result<(), IdentifierError> {
    for relay in relays {
        tlv::write_entry(buffer, tlv::RELAY, relay.as_bytes())?;
    }
    Ok(())
}

fn hex_32(field: &'static str, value: &str) -> Result<[u8; 32], IdentifierError> {
    let bytes = hex::decode(value).map_err(|_| IdentifierError::InvalidHex(field))?;
    fixed_32(field, &bytes)
}

fn fixed_32(field: &'static str, value: &[u8]) -> Result<[u8; 32], IdentifierError> {
    value.try_into().map_err(|_| IdentifierError::InvalidLength {
        field,
        expected: 32,
        actual: value.len(),
    })
}

fn kind_value(value: &[u8]) -> Result<u32, IdentifierError> {
    let bytes: [u8; 4] = value.try_into().map_err(|_| IdentifierError::InvalidLength {
        field: "kind",
        expected: 4,
        actual: value.len(),
    })?;
    Ok(u32::from_be_bytes(bytes))
}

fn utf8(field: &'static str, value: &[u8]) -> Result<String, IdentifierError> {
    String::from_utf8(value.to_vec()).map_err(|_| IdentifierError::InvalidUtf8(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBKEY: &str = "3bf0c63fcb93463407af97a5e5ee64fa883d107ef9e558472c4eb9aaaefa459d";
    const EVENT_ID: &str = "f603166e0fdb6a0329e3998280ecad0e54d89f5f8bc20d1f259a41983aca9dfb";

    #[test]
    fn test_nprofile_reference_vector() {
        let text = "nprofile1qqsrhuxx8l9ex335q7he0f09aej04zpazpl0ne2cgukyawd24mayt8gpp4mhxue69uhhytnc9e3k7mgpz4mhxue69uhkg6nzv9ejuumpv34kytnrdaksjlyr9p";

        let pointer = decode_nprofile(text).unwrap();
        assert_eq!(pointer.public_key, PUBKEY);
        assert_eq!(pointer.relays, vec!["wss://r.x.com", "wss://djbas.sadkb.com"]);

        assert_eq!(encode_nprofile(&pointer).unwrap(), text);
    }

    #[test]
    fn test_nevent_reference_vector() {
        let pointer = EventPointer {
            id: EVENT_ID.to_string(),
            relays: vec!["wss://nostr.wine/".to_string()],
            author: Some(PUBKEY.to_string()),
            kind: Some(1),
        };
        let expected = "nevent1qqs0vqckdc8ak6sr983enq5qajksu4xcna0chssdruje5svc8t9fm7cpz9mhxue69uhkummnw3ezuamfdejj7q3q80cvv07tjdrrgpa0j7j7tmnyl2yr6yr7l8j4s3evf6u64th6gkwsxpqqqqqqzx53pea";

        assert_eq!(encode_nevent(&pointer).unwrap(), expected);
        assert_eq!(decode_nevent(expected).unwrap(), pointer);
    }

    #[test]
    fn test_nevent_minimal() {
        let text = "nevent1qqs0vqckdc8ak6sr983enq5qajksu4xcna0chssdruje5svc8t9fm7crkgh27";
        let pointer = decode_nevent(text).unwrap();

        assert_eq!(pointer.id, EVENT_ID);
        assert!(pointer.relays.is_empty());
        assert_eq!(pointer.author, None);
        assert_eq!(pointer.kind, None);
    }

    #[test]
    fn test_naddr_reference_vector() {
        let text = "naddr1qq9x67fdv9e8g6trd3jsz9mhwden5te0wfjkccte9ejhsctdwpkx2tnrdaksygpm7rrrljungc6q0tuh5hj7ue863q73qlheu4vywtzwhx42a7j9n5psgqqqw4rsc5ggs6";
        let pointer = decode_naddr(text).unwrap();

        assert_eq!(pointer.identifier, "my-article");
        assert_eq!(pointer.relays, vec!["wss://relay.example.com"]);
        assert_eq!(pointer.public_key, PUBKEY);
        assert_eq!(pointer.kind, 30023);

        assert_eq!(encode_naddr(&pointer).unwrap(), text);
    }

    #[test]
    fn test_note_round_trip() {
        let text = "note17cp3vms0md4qx20rnxpgpm9dpe2d386l30pq68e9nfqeswk2nhasgvrk8y";
        assert_eq!(decode_note(text).unwrap(), EVENT_ID);
        assert_eq!(encode_note(EVENT_ID).unwrap(), text);
    }

    #[test]
    fn test_wrong_prefix_rejected_before_decoding() {
        let text = "note17cp3vms0md4qx20rnxpgpm9dpe2d386l30pq68e9nfqeswk2nhasgvrk8y";
        assert!(matches!(
            decode_nevent(text),
            Err(IdentifierError::WrongPrefix { .. })
        ));
        assert!(matches!(
            decode_npub(text),
            Err(IdentifierError::WrongPrefix { .. })
        ));
    }

    #[test]
    fn test_longer_hrp_sharing_prefix_rejected() {
        let text = bech32::encode("neventx", &[0u8; 4]).unwrap();
        assert!(matches!(
            decode_nevent(&text),
            Err(IdentifierError::WrongPrefix { .. })
        ));
    }

    #[test]
    fn test_nevent_without_id_is_missing_field() {
        let mut buffer = Vec::new();
        tlv::write_entry(&mut buffer, tlv::RELAY, b"wss://relay.example.com").unwrap();
        let text = bech32::encode(NEVENT_PREFIX, &buffer).unwrap();

        assert_eq!(
            decode_nevent(&text),
            Err(IdentifierError::MissingField("id"))
        );
    }

    #[test]
    fn test_nprofile_without_pubkey_is_missing_field() {
        let text = bech32::encode(NPROFILE_PREFIX, &[]).unwrap();
        assert_eq!(
            decode_nprofile(&text),
            Err(IdentifierError::MissingField("pubkey"))
        );
    }

    #[test]
    fn test_naddr_requires_author_and_kind() {
        let mut buffer = Vec::new();
        tlv::write_entry(&mut buffer, tlv::DEFAULT, b"slug").unwrap();
        tlv::write_entry(&mut buffer, tlv::KIND, &30023u32.to_be_bytes()).unwrap();
        let text = bech32::encode(NADDR_PREFIX, &buffer).unwrap();
        assert_eq!(
            decode_naddr(&text),
            Err(IdentifierError::MissingField("pubkey"))
        );

        let mut buffer = Vec::new();
        tlv::write_entry(&mut buffer, tlv::AUTHOR, &[1u8; 32]).unwrap();
        let text = bech32::encode(NADDR_PREFIX, &buffer).unwrap();
        assert_eq!(
            decode_naddr(&text),
            Err(IdentifierError::MissingField("kind"))
        );
    }

    #[test]
    fn test_unknown_tlv_types_skipped() {
        let mut buffer = Vec::new();
        tlv::write_entry(&mut buffer, 42, b"from the future").unwrap();
        tlv::write_entry(&mut buffer, tlv::DEFAULT, &[0xab; 32]).unwrap();
        let text = bech32::encode(NPROFILE_PREFIX, &buffer).unwrap();

        let pointer = decode_nprofile(&text).unwrap();
        assert_eq!(pointer.public_key, "ab".repeat(32));
        assert!(pointer.relays.is_empty());
    }

    #[test]
    fn test_short_pubkey_rejected() {
        let mut buffer = Vec::new();
        tlv::write_entry(&mut buffer, tlv::DEFAULT, &[1u8; 31]).unwrap();
        let text = bech32::encode(NPROFILE_PREFIX, &buffer).unwrap();

        assert_eq!(
            decode_nprofile(&text),
            Err(IdentifierError::InvalidLength {
                field: "pubkey",
                expected: 32,
                actual: 31
            })
        );
    }

    #[test]
    fn test_encode_rejects_bad_hex() {
        let pointer = ProfilePointer {
            public_key: "not hex".to_string(),
            relays: vec![],
        };
        assert_eq!(
            encode_nprofile(&pointer),
            Err(IdentifierError::InvalidHex("pubkey"))
        );
    }

    #[test]
    fn test_encode_rejects_oversized_relay() {
        let pointer = ProfilePointer {
            public_key: PUBKEY.to_string(),
            relays: vec![format!("wss://{}.example.com", "a".repeat(300))],
        };
        assert!(matches!(
            encode_nprofile(&pointer),
            Err(IdentifierError::ValueTooLong(_))
        ));
    }

    #[test]
    fn test_nip19_dispatch() {
        let decoded: Nip19 = "npub1fdl779qq4tnsz8e3y8quha37w2hrpme9pcx6z60ql4yyylelk72qplz85a"
            .parse()
            .unwrap();
        assert_eq!(
            decoded,
            Nip19::PublicKey(
                "4b7fef1400aae7011f3121c1cbf63e72ae30ef250e0da169e0fd48427f3fb794".to_string()
            )
        );
        assert_eq!(
            decoded.to_string(),
            "npub1fdl779qq4tnsz8e3y8quha37w2hrpme9pcx6z60ql4yyylelk72qplz85a"
        );

        assert!(matches!(
            Nip19::decode("lnbc1qqqqqqqqqq"),
            Err(IdentifierError::WrongPrefix { .. })
        ));
    }
}
