//! Relaywire Core Library
//!
//! Core primitives of the Nostr signed-event protocol: canonical event
//! serialization and identity, Schnorr signing and validation, bech32/TLV
//! shareable identifiers, the client/relay message protocol, and a concurrent
//! vanity key search.
//!
//! # Features
//!
//! - NIP-01 events with canonical id computation and BIP-340 signatures
//! - `is_valid` as a total predicate, with `verify` for the failure reason
//! - NIP-19 identifiers: `note`, `nevent`, `nprofile`, `naddr`, `npub`, `nsec`
//! - Hand-written positional encoding for `ClientMessage` and `RelayMessage`
//! - Filters with grouped `#x` tag conditions and local matching
//! - Multi-worker key search with cooperative cancellation
//! - NIP-11 relay information documents
//!
//! # Examples
//!
//! ## Signing and sharing an event
//!
//! ```
//! use relaywire_core::{EventBuilder, KeyPair, Kind};
//!
//! let keys = KeyPair::generate()?;
//! let event = EventBuilder::new()
//!     .kind(Kind::TEXT_NOTE)
//!     .content("Hello, Nostr!")
//!     .sign(&keys)?;
//!
//! assert!(event.is_valid());
//! let nevent = event.encode_nevent(&["wss://relay.example.com".to_string()])?;
//! assert!(nevent.starts_with("nevent1"));
//! # Ok::<(), relaywire_core::Error>(())
//! ```
//!
//! ## Talking to a relay
//!
//! ```
//! use relaywire_core::{ClientMessage, Filter, Kind, RelayMessage, Subscription};
//!
//! let filter = Filter::builder().kind(Kind::TEXT_NOTE).limit(10).build();
//! let req = ClientMessage::Subscribe(Subscription::with_id("feed", vec![filter]));
//! assert_eq!(req.to_json()?, r#"["REQ","feed",{"kinds":[1],"limit":10}]"#);
//!
//! let reply = RelayMessage::from_json(r#"["EOSE","feed"]"#)?;
//! assert_eq!(reply, RelayMessage::Eose("feed".to_string()));
//! # Ok::<(), relaywire_core::Error>(())
//! ```
//!
//! ## Decoding a shareable identifier
//!
//! ```
//! use relaywire_core::Nip19;
//!
//! let entity = Nip19::decode("npub1fdl779qq4tnsz8e3y8quha37w2hrpme9pcx6z60ql4yyylelk72qplz85a")?;
//! assert_eq!(
//!     entity,
//!     Nip19::PublicKey("4b7fef1400aae7011f3121c1cbf63e72ae30ef250e0da169e0fd48427f3fb794".to_string())
//! );
//! # Ok::<(), relaywire_core::Error>(())
//! ```

// Public modules
pub mod bech32;
pub mod builder;
pub mod config;
pub mod crypto;
pub mod error;
pub mod event;
pub mod filter;
pub mod identity;
pub mod keys;
pub mod kind;
pub mod message;
pub mod nip19;
pub mod relay_info;
pub mod search;
pub mod subscription;
pub mod tag;
pub mod timestamp;
pub mod tlv;

// Re-export commonly used types and functions
pub use builder::EventBuilder;
pub use config::SearchConfig;
pub use error::{Error, Result};
pub use event::Event;
pub use filter::{Filter, FilterBuilder};
pub use keys::KeyPair;
pub use kind::{Kind, KindClass};
pub use message::{ClientMessage, RelayMessage};
pub use nip19::{EntityPointer, EventPointer, Nip19, ProfilePointer};
pub use relay_info::RelayInfo;
pub use search::{SearchTarget, search, search_with_cancel};
pub use subscription::Subscription;
pub use tag::Tag;
pub use timestamp::Timestamp;
