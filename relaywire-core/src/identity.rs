//! Canonical event serialization, event ids and signatures
//!
//! The id of an event is the SHA-256 of the compact JSON array
//! `[0,pubkey,created_at,kind,tags,content]`; the signature is a BIP-340
//! Schnorr signature over that id.

use tracing::debug;

use crate::crypto;
use crate::error::{SignError, ValidationError};
use crate::event::Event;
use crate::keys::KeyPair;

/// Canonical UTF-8 bytes hashed to form the event id
///
/// `serde_json` writes the compact form with `/` unescaped and control
/// characters escaped, which is exactly the NIP-01 serialization.
pub fn canonical_bytes(event: &Event) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&(
        0u8,
        &event.pubkey,
        event.created_at,
        event.kind,
        &event.tags,
        &event.content,
    ))
}

/// Lowercase hex SHA-256 of the canonical bytes
pub fn compute_id(event: &Event) -> serde_json::Result<String> {
    let bytes = canonical_bytes(event)?;
    Ok(hex::encode(crypto::sha256(&bytes)))
}

/// Sign an event in place
///
/// The event's `pubkey` must be the key pair's public key. On success both
/// `id` and `sig` are set; on failure the event is left untouched.
pub fn sign(event: &mut Event, key_pair: &KeyPair) -> Result<(), SignError> {
    let key = key_pair.public_key();
    if event.pubkey != key {
        return Err(SignError::PubkeyMismatch {
            event: event.pubkey.clone(),
            key,
        });
    }

    let digest = crypto::sha256(&canonical_bytes(event)?);
    let signature = key_pair.sign_digest(&digest);

    event.id = Some(hex::encode(digest));
    event.sig = Some(hex::encode(signature));
    Ok(())
}

/// Whether the stored id matches the recomputed one
pub fn has_valid_id(event: &Event) -> bool {
    match (&event.id, compute_id(event)) {
        (Some(id), Ok(computed)) => *id == computed,
        _ => false,
    }
}

/// Whether the event carries a correct id and a valid signature
///
/// Total: malformed input of any kind yields `false`.
pub fn is_valid(event: &Event) -> bool {
    match verify(event) {
        Ok(()) => true,
        Err(e) => {
            debug!("Rejected event {:?}: {}", event.id, e);
            false
        }
    }
}

/// Check an event, returning the first reason it is invalid
pub fn verify(event: &Event) -> Result<(), ValidationError> {
    let id = match event.id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(ValidationError::MissingId),
    };
    let sig = match event.sig.as_deref() {
        Some(sig) if !sig.is_empty() => sig,
        _ => return Err(ValidationError::MissingSignature),
    };
    if event.pubkey.is_empty() {
        return Err(ValidationError::MissingPubkey);
    }

    let computed = compute_id(event).map_err(|e| ValidationError::Serialization(e.to_string()))?;
    if computed != id {
        return Err(ValidationError::EventIdMismatch {
            expected: id.to_string(),
            actual: computed,
        });
    }

    let digest: [u8; 32] = decode_hex(id, "id")?;
    let public_key: [u8; 32] = decode_hex(&event.pubkey, "pubkey")?;
    let signature: [u8; 64] = decode_hex(sig, "sig")?;

    if !crypto::is_valid_public_key(&public_key) {
        return Err(ValidationError::InvalidPublicKey(event.pubkey.clone()));
    }
    if !crypto::verify_schnorr(&public_key, &digest, &signature) {
        return Err(ValidationError::InvalidSignature(
            "Signature verification failed".to_string(),
        ));
    }

    Ok(())
}

fn decode_hex<const N: usize>(value: &str, field: &str) -> Result<[u8; N], ValidationError> {
    let mut bytes = [0u8; N];
    hex::decode_to_slice(value, &mut bytes).map_err(|_| {
        ValidationError::InvalidHex(format!(
            "{} must be {} hex characters, got: {}",
            field,
            N * 2,
            value
        ))
    })?;
    Ok(bytes)
}
