//! Secret/public key pairs

use std::fmt;
use std::str::FromStr;

use secp256k1::rand::{RngCore, thread_rng};
use secp256k1::{Keypair, SECP256K1, SecretKey};

use crate::bech32::{self, LengthLimit};
use crate::crypto;
use crate::error::KeyError;
use crate::nip19::{NPUB_PREFIX, NSEC_PREFIX};

/// A secp256k1 secret key and its x-only public key
#[derive(Clone)]
pub struct KeyPair {
    keypair: Keypair,
    public_key: [u8; 32],
}

impl KeyPair {
    /// Generate a fresh random key pair
    pub fn generate() -> Result<Self, KeyError> {
        let mut rng = thread_rng();
        let mut bytes = [0u8; 32];
        loop {
            rng.try_fill_bytes(&mut bytes)
                .map_err(|e| KeyError::Random(e.to_string()))?;
            // zero or not below the curve order: draw again
            if let Ok(secret_key) = SecretKey::from_slice(&bytes) {
                return Ok(Self::from_secret_key(&secret_key));
            }
        }
    }

    /// Import a raw 32-byte secret key
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != 32 {
            return Err(KeyError::InvalidLength(bytes.len()));
        }
        let secret_key =
            SecretKey::from_slice(bytes).map_err(|e| KeyError::InvalidSecretKey(e.to_string()))?;
        Ok(Self::from_secret_key(&secret_key))
    }

    /// Import a hex encoded secret key
    pub fn from_hex(secret_key: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(secret_key).map_err(|_| KeyError::InvalidHex)?;
        Self::from_secret_bytes(&bytes)
    }

    /// Import an `nsec1…` secret key
    pub fn from_bech32(nsec: &str) -> Result<Self, KeyError> {
        let decoded = bech32::decode(nsec, LengthLimit::Enforced)?;
        if decoded.hrp != NSEC_PREFIX {
            return Err(KeyError::WrongPrefix {
                expected: NSEC_PREFIX.to_string(),
                found: decoded.hrp,
            });
        }
        Self::from_secret_bytes(&decoded.data)
    }

    fn from_secret_key(secret_key: &SecretKey) -> Self {
        let keypair = Keypair::from_secret_key(SECP256K1, secret_key);
        KeyPair {
            keypair,
            public_key: crypto::derive_public_key(secret_key),
        }
    }

    /// Lowercase hex x-only public key
    pub fn public_key(&self) -> String {
        hex::encode(self.public_key)
    }

    pub fn public_key_bytes(&self) -> &[u8; 32] {
        &self.public_key
    }

    /// Lowercase hex secret key
    pub fn secret_key(&self) -> String {
        hex::encode(self.keypair.secret_bytes())
    }

    /// `npub1…` form of the public key
    pub fn npub(&self) -> Result<String, KeyError> {
        Ok(bech32::encode(NPUB_PREFIX, &self.public_key)?)
    }

    /// `nsec1…` form of the secret key
    pub fn nsec(&self) -> Result<String, KeyError> {
        Ok(bech32::encode(NSEC_PREFIX, &self.keypair.secret_bytes())?)
    }

    /// Schnorr-sign a 32-byte digest
    pub fn sign_digest(&self, digest: &[u8; 32]) -> [u8; 64] {
        crypto::sign_schnorr(&self.keypair, digest)
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.keypair.secret_bytes() == other.keypair.secret_bytes()
    }
}

impl Eq for KeyPair {}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Accepts either an `nsec1…` string or a hex secret key
impl FromStr for KeyPair {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let is_nsec = s
            .get(..NSEC_PREFIX.len() + 1)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("nsec1"));
        if is_nsec {
            Self::from_bech32(s)
        } else {
            Self::from_hex(s)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NSEC: &str = "nsec1r7uh0ryrf0n7z3l4qumzevw9q2s57us4wzqrendpavtjn7uvy5rs9szssa";
    const SECRET: &str = "1fb9778c834be7e147f507362cb1c502a14f721570803ccda1eb1729fb8c2507";
    const PUBKEY: &str = "4b7fef1400aae7011f3121c1cbf63e72ae30ef250e0da169e0fd48427f3fb794";
    const NPUB: &str = "npub1fdl779qq4tnsz8e3y8quha37w2hrpme9pcx6z60ql4yyylelk72qplz85a";

    #[test]
    fn test_import_nsec() {
        let key_pair = KeyPair::from_bech32(NSEC).unwrap();
        assert_eq!(key_pair.secret_key(), SECRET);
        assert_eq!(key_pair.public_key(), PUBKEY);
        assert_eq!(key_pair.npub().unwrap(), NPUB);
        assert_eq!(key_pair.nsec().unwrap(), NSEC);
    }

    #[test]
    fn test_import_hex_matches_nsec() {
        let from_hex = KeyPair::from_hex(SECRET).unwrap();
        let from_nsec: KeyPair = NSEC.parse().unwrap();
        assert_eq!(from_hex, from_nsec);
    }

    #[test]
    fn test_wrong_prefix() {
        let result = KeyPair::from_bech32(NPUB);
        assert_eq!(
            result.unwrap_err(),
            KeyError::WrongPrefix {
                expected: "nsec".to_string(),
                found: "npub".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(KeyPair::from_hex("xyz").unwrap_err(), KeyError::InvalidHex);
        assert_eq!(
            KeyPair::from_hex("abcd").unwrap_err(),
            KeyError::InvalidLength(2)
        );
        assert!(matches!(
            KeyPair::from_secret_bytes(&[0u8; 32]),
            Err(KeyError::InvalidSecretKey(_))
        ));
    }

    #[test]
    fn test_generate_distinct() {
        let a = KeyPair::generate().unwrap();
        let b = KeyPair::generate().unwrap();
        assert_ne!(a, b);
        assert_eq!(a.public_key().len(), 64);
    }

    #[test]
    fn test_debug_hides_secret() {
        let key_pair = KeyPair::from_hex(SECRET).unwrap();
        let debug = format!("{:?}", key_pair);
        assert!(debug.contains(PUBKEY));
        assert!(!debug.contains(SECRET));
    }

    #[test]
    fn test_signature_verifies() {
        let key_pair = KeyPair::generate().unwrap();
        let digest = crypto::sha256(b"payload");
        let signature = key_pair.sign_digest(&digest);
        assert!(crypto::verify_schnorr(
            key_pair.public_key_bytes(),
            &digest,
            &signature
        ));
    }
}
