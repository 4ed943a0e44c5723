//! Brute-force key search for vanity and proof-of-work public keys
//!
//! Workers run as blocking tasks in a [`JoinSet`], each generating random key
//! pairs until one satisfies the target. The first worker to finish decides
//! the outcome; the shared [`CancellationToken`] is then cancelled so every
//! other worker stops at its next iteration.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::bech32::CHARSET;
use crate::config::SearchConfig;
use crate::error::{KeyError, SearchError, SearchInputError};
use crate::keys::KeyPair;

/// Length of the data part of an `npub`, checksum included
const NPUB_DATA_LENGTH: usize = 58;
const NPUB_HRP_LENGTH: usize = "npub1".len();

/// What a generated public key must look like
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    /// At least this many leading zero bits in the raw public key
    LeadingZeroBits(u16),
    /// Hex public key starts with this
    HexPrefix(String),
    /// Hex public key ends with this
    HexSuffix(String),
    /// `npub` data part (after `npub1`) starts with this
    Bech32Prefix(String),
    /// `npub` data part ends with this
    Bech32Suffix(String),
}

impl SearchTarget {
    /// Check the target, returning it with patterns lowercased
    pub fn normalized(&self) -> Result<Self, SearchInputError> {
        match self {
            SearchTarget::LeadingZeroBits(bits) => {
                if *bits > 256 {
                    return Err(SearchInputError::TooManyBits(*bits));
                }
                Ok(SearchTarget::LeadingZeroBits(*bits))
            }
            SearchTarget::HexPrefix(p) => normalize(p, "hex prefix", 64, is_hex_char).map(SearchTarget::HexPrefix),
            SearchTarget::HexSuffix(s) => normalize(s, "hex suffix", 64, is_hex_char).map(SearchTarget::HexSuffix),
            SearchTarget::Bech32Prefix(p) => {
                normalize(p, "bech32 prefix", NPUB_DATA_LENGTH, is_bech32_char).map(SearchTarget::Bech32Prefix)
            }
            SearchTarget::Bech32Suffix(s) => {
                normalize(s, "bech32 suffix", NPUB_DATA_LENGTH, is_bech32_char).map(SearchTarget::Bech32Suffix)
            }
        }
    }

    pub fn validate(&self) -> Result<(), SearchInputError> {
        self.normalized().map(|_| ())
    }

    /// Whether a key pair satisfies the target
    ///
    /// Patterns are compared as given; call on a [`normalized`](Self::normalized) target.
    pub fn matches(&self, key_pair: &KeyPair) -> bool {
        match self {
            SearchTarget::LeadingZeroBits(bits) => {
                leading_zero_bits(key_pair.public_key_bytes()) >= u32::from(*bits)
            }
            SearchTarget::HexPrefix(p) => key_pair.public_key().starts_with(p.as_str()),
            SearchTarget::HexSuffix(s) => key_pair.public_key().ends_with(s.as_str()),
            SearchTarget::Bech32Prefix(p) => {
                npub_data(key_pair).is_some_and(|data| data.starts_with(p.as_str()))
            }
            SearchTarget::Bech32Suffix(s) => {
                npub_data(key_pair).is_some_and(|data| data.ends_with(s.as_str()))
            }
        }
    }
}

impl fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchTarget::LeadingZeroBits(bits) => write!(f, "{} leading zero bits", bits),
            SearchTarget::HexPrefix(p) => write!(f, "hex prefix {:?}", p),
            SearchTarget::HexSuffix(s) => write!(f, "hex suffix {:?}", s),
            SearchTarget::Bech32Prefix(p) => write!(f, "npub prefix {:?}", p),
            SearchTarget::Bech32Suffix(s) => write!(f, "npub suffix {:?}", s),
        }
    }
}

fn normalize(
    pattern: &str,
    kind: &'static str,
    max_len: usize,
    allowed: fn(char) -> bool,
) -> Result<String, SearchInputError> {
    if pattern.is_empty() {
        return Err(SearchInputError::Empty(kind));
    }
    let pattern = pattern.to_ascii_lowercase();
    if let Some(character) = pattern.chars().find(|c| !allowed(*c)) {
        return Err(SearchInputError::InvalidCharacter { kind, character });
    }
    if pattern.len() > max_len {
        return Err(SearchInputError::TooLong {
            kind,
            len: pattern.len(),
        });
    }
    Ok(pattern)
}

fn is_hex_char(c: char) -> bool {
    c.is_ascii_digit() || ('a'..='f').contains(&c)
}

fn is_bech32_char(c: char) -> bool {
    c.is_ascii() && CHARSET.contains(&(c as u8))
}

fn npub_data(key_pair: &KeyPair) -> Option<String> {
    let npub = key_pair.npub().ok()?;
    npub.get(NPUB_HRP_LENGTH..).map(str::to_string)
}

/// Count the leading zero bits of a byte string
pub fn leading_zero_bits(bytes: &[u8]) -> u32 {
    let mut bits = 0;
    for byte in bytes {
        if *byte == 0 {
            bits += 8;
        } else {
            bits += byte.leading_zeros();
            break;
        }
    }
    bits
}

/// Search until a key pair matching `target` is found
///
/// Runs until a match is found; there is no internal timeout.
pub async fn search(target: &SearchTarget, config: &SearchConfig) -> Result<KeyPair, SearchError> {
    search_with_cancel(target, config, CancellationToken::new()).await
}

/// Like [`search`], stopping with [`SearchError::Cancelled`] once `cancel` fires
pub async fn search_with_cancel(
    target: &SearchTarget,
    config: &SearchConfig,
    cancel: CancellationToken,
) -> Result<KeyPair, SearchError> {
    run_search(target, config, cancel, |_| KeyPair::generate()).await
}

/// Worker `i` draws its candidates from `generate(i)`
async fn run_search(
    target: &SearchTarget,
    config: &SearchConfig,
    cancel: CancellationToken,
    generate: fn(usize) -> Result<KeyPair, KeyError>,
) -> Result<KeyPair, SearchError> {
    let target = Arc::new(target.normalized()?);
    let workers = config.worker_count();
    let progress_interval = config.progress_interval;
    let token = cancel.child_token();
    // blocking workers outlive an aborted JoinSet; stop them if this future is dropped
    let _guard = token.clone().drop_guard();

    info!("Starting key search for {} with {} workers", target, workers);
    let started = Instant::now();

    let mut tasks = JoinSet::new();
    for worker in 0..workers {
        let target = Arc::clone(&target);
        let token = token.clone();
        tasks.spawn_blocking(move || {
            run_worker(worker, &target, &token, progress_interval, generate)
        });
    }

    let outcome = loop {
        let Some(joined) = tasks.join_next().await else {
            break Err(SearchError::Cancelled);
        };
        match joined {
            Ok(Ok(Some((key_pair, attempts)))) => {
                info!(
                    "Found key {} after {} attempts in {:.2?}",
                    key_pair.public_key(),
                    attempts,
                    started.elapsed()
                );
                break Ok(key_pair);
            }
            Ok(Ok(None)) => {
                if cancel.is_cancelled() {
                    break Err(SearchError::Cancelled);
                }
            }
            Ok(Err(e)) => {
                warn!("Key search worker failed: {}", e);
                break Err(SearchError::Key(e));
            }
            Err(e) => {
                warn!("Key search worker task failed: {}", e);
                break Err(SearchError::WorkerFailed(e.to_string()));
            }
        }
    };

    token.cancel();
    tasks.abort_all();
    while tasks.join_next().await.is_some() {}

    outcome
}

/// `Ok(None)` when cancelled before finding a match
fn run_worker(
    worker: usize,
    target: &SearchTarget,
    token: &CancellationToken,
    progress_interval: u64,
    generate: fn(usize) -> Result<KeyPair, KeyError>,
) -> Result<Option<(KeyPair, u64)>, KeyError> {
    let mut attempts: u64 = 0;

    while !token.is_cancelled() {
        let key_pair = generate(worker)?;
        attempts += 1;

        if target.matches(&key_pair) {
            debug!("Worker {} matched after {} attempts", worker, attempts);
            return Ok(Some((key_pair, attempts)));
        }
        if progress_interval > 0 && attempts % progress_interval == 0 {
            debug!("Worker {} tried {} keys", worker, attempts);
        }
    }

    debug!("Worker {} stopped after {} attempts", worker, attempts);
    Ok(None)
}
