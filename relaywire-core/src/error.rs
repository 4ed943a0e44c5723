//! Error types for relaywire-core

use thiserror::Error;

/// Result type alias for relaywire-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// JSON parsing or encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Relay/client message decoding error
    #[error("Message decoding failed: {0}")]
    Decode(#[from] DecodeError),

    /// Bech32 text decoding error
    #[error("Bech32 error: {0}")]
    Bech32(#[from] Bech32Error),

    /// Shareable identifier error
    #[error("Identifier error: {0}")]
    Identifier(#[from] IdentifierError),

    /// Key import error
    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    /// Event signing error
    #[error("Signing failed: {0}")]
    Sign(#[from] SignError),

    /// Validation error
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Key search error
    #[error("Key search failed: {0}")]
    Search(#[from] SearchError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while decoding positional client/relay messages
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The text is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level value is not a nonempty array
    #[error("message must be a nonempty JSON array")]
    NotAnArray,

    /// The first array element is not a string
    #[error("message discriminator must be a string")]
    InvalidDiscriminator,

    /// The discriminator is not a known client message type
    #[error("unknown message type: {0}")]
    UnknownType(String),

    /// A required positional field is missing
    #[error("{message} message is missing field {field} at position {position}")]
    MissingField {
        message: &'static str,
        field: &'static str,
        position: usize,
    },

    /// A positional field has the wrong shape
    #[error("{message} message has invalid {field}: {reason}")]
    InvalidField {
        message: &'static str,
        field: &'static str,
        reason: String,
    },
}

/// Bech32 encoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Bech32Error {
    /// A character outside printable ASCII or the bech32 charset
    #[error("invalid character {0:?} at position {1}")]
    InvalidChar(char, usize),

    /// Upper and lower case characters mixed in one string
    #[error("mixed case string")]
    MixedCase,

    /// No `1` separator between the prefix and the data part
    #[error("missing separator")]
    MissingSeparator,

    /// Human-readable prefix is empty or not printable ASCII
    #[error("invalid human-readable prefix")]
    InvalidHrp,

    /// Data part shorter than the checksum
    #[error("data part too short")]
    TooShort,

    /// Checksum did not verify
    #[error("invalid checksum")]
    InvalidChecksum,

    /// String exceeds the enforced length limit
    #[error("string length {0} exceeds limit of {1}")]
    TooLong(usize, usize),

    /// Trailing bits do not repack into whole bytes
    #[error("invalid padding")]
    InvalidPadding,
}

/// Shareable identifier (NIP-19) errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The text does not start with the expected prefix
    #[error("wrong prefix: expected {expected}, got {found}")]
    WrongPrefix { expected: String, found: String },

    /// A mandatory TLV field was not present
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A fixed-size field has the wrong length
    #[error("invalid length for {field}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A TLV value does not fit in a single length byte
    #[error("TLV value of {0} bytes exceeds 255 byte limit")]
    ValueTooLong(usize),

    /// Invalid hex encoding
    #[error("invalid hex for {0}")]
    InvalidHex(&'static str),

    /// Text field is not valid UTF-8
    #[error("invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),

    /// Underlying bech32 failure
    #[error(transparent)]
    Bech32(#[from] Bech32Error),
}

/// Key import and generation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Invalid hex encoding
    #[error("invalid hex encoding")]
    InvalidHex,

    /// Wrong byte length for a key
    #[error("invalid key length: expected 32 bytes, got {0}")]
    InvalidLength(usize),

    /// Bytes are not a valid secp256k1 secret key
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    /// Bech32 text has the wrong prefix
    #[error("wrong bech32 prefix: expected {expected}, got {found}")]
    WrongPrefix { expected: String, found: String },

    /// Underlying bech32 failure
    #[error(transparent)]
    Bech32(#[from] Bech32Error),

    /// The random number generator failed
    #[error("random generation failed: {0}")]
    Random(String),
}

/// Event signing errors
#[derive(Error, Debug)]
pub enum SignError {
    /// The event's pubkey is not the signing key's public key
    #[error("event pubkey {event} does not match signing key {key}")]
    PubkeyMismatch { event: String, key: String },

    /// Canonical serialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reasons an event fails validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Event has no id
    #[error("event has no id")]
    MissingId,

    /// Event has no signature
    #[error("event has no signature")]
    MissingSignature,

    /// Event has no pubkey
    #[error("event has no pubkey")]
    MissingPubkey,

    /// Event ID does not match computed hash
    #[error("Event ID mismatch: expected {expected}, got {actual}")]
    EventIdMismatch { expected: String, actual: String },

    /// Invalid hex encoding
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    /// Pubkey is not a valid x-only key
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Signature verification failed
    #[error("Signature verification failed: {0}")]
    InvalidSignature(String),

    /// Canonical serialization failed
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Invalid key search parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchInputError {
    /// Prefix or suffix is empty
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// Prefix or suffix contains characters outside its charset
    #[error("{kind} contains invalid character {character:?}")]
    InvalidCharacter { kind: &'static str, character: char },

    /// Requested more leading zero bits than a key has
    #[error("leading zero bits must be at most 256, got {0}")]
    TooManyBits(u16),

    /// Requested prefix or suffix longer than the encoded key
    #[error("{kind} of {len} characters is longer than the encoded key")]
    TooLong { kind: &'static str, len: usize },
}

/// Key search errors
#[derive(Error, Debug)]
pub enum SearchError {
    /// Search parameters were rejected before any work started
    #[error("invalid search input: {0}")]
    InvalidInput(#[from] SearchInputError),

    /// A worker failed to generate a key
    #[error("key generation failed: {0}")]
    Key(#[from] KeyError),

    /// The caller cancelled the search
    #[error("search cancelled")]
    Cancelled,

    /// A worker task panicked or was aborted
    #[error("worker failed: {0}")]
    WorkerFailed(String),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing failed: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configured value out of range
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
