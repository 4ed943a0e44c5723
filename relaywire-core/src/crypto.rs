//! Hashing and Schnorr signature primitives
//!
//! Curve arithmetic is delegated to the `secp256k1` crate (global context) and
//! hashing to `sha2`. Nothing else in the crate touches either library directly.

use secp256k1::{Keypair, Message, SECP256K1, SecretKey, XOnlyPublicKey, schnorr};
use sha2::{Digest, Sha256};

/// SHA-256 of `data`
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Derive the x-only public key for a secret key
pub fn derive_public_key(secret_key: &SecretKey) -> [u8; 32] {
    let (xonly, _parity) = secret_key.x_only_public_key(SECP256K1);
    xonly.serialize()
}

/// BIP-340 sign a 32-byte digest
pub fn sign_schnorr(keypair: &Keypair, digest: &[u8; 32]) -> [u8; 64] {
    let message = Message::from_digest(*digest);
    SECP256K1.sign_schnorr(&message, keypair).serialize()
}

/// BIP-340 verify a signature over a 32-byte digest
///
/// Returns `false` when the public key does not parse as an x-only key or the
/// signature bytes are malformed; never panics.
pub fn verify_schnorr(public_key: &[u8; 32], digest: &[u8; 32], signature: &[u8; 64]) -> bool {
    let Ok(public_key) = XOnlyPublicKey::from_slice(public_key) else {
        return false;
    };
    let Ok(signature) = schnorr::Signature::from_slice(signature) else {
        return false;
    };
    let message = Message::from_digest(*digest);
    SECP256K1
        .verify_schnorr(&signature, &message, &public_key)
        .is_ok()
}

/// Check that 32 bytes are a valid x-only public key
pub fn is_valid_public_key(public_key: &[u8; 32]) -> bool {
    XOnlyPublicKey::from_slice(public_key).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sign_then_verify() {
        let secret = SecretKey::from_slice(&[0x42; 32]).unwrap();
        let keypair = Keypair::from_secret_key(SECP256K1, &secret);
        let digest = sha256(b"relaywire");

        let signature = sign_schnorr(&keypair, &digest);
        let public_key = derive_public_key(&secret);

        assert!(verify_schnorr(&public_key, &digest, &signature));

        let other = sha256(b"something else");
        assert!(!verify_schnorr(&public_key, &other, &signature));
    }

    #[test]
    fn test_verify_rejects_garbage_key() {
        // above the field prime
        let bad_key = [0xff; 32];
        assert!(!is_valid_public_key(&bad_key));
        assert!(!verify_schnorr(&bad_key, &[0; 32], &[0; 64]));
    }
}
