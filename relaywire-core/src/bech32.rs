//! Bech32 text encoding (BIP-173 checksum, not bech32m)
//!
//! Shareable identifiers built from TLV streams are routinely longer than the
//! 90 character limit BIP-173 places on addresses, so decoding takes a
//! [`LengthLimit`] switch.

use crate::error::Bech32Error;

/// The 32 symbols of the data part, indexed by 5-bit value
pub const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Maximum string length when the limit is enforced
pub const MAX_LENGTH: usize = 90;

const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];
const CHECKSUM_LENGTH: usize = 6;
const SEPARATOR: char = '1';

/// Whether [`decode`] enforces [`MAX_LENGTH`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthLimit {
    #[default]
    Enforced,
    Unlimited,
}

/// A decoded bech32 string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Human-readable prefix, lowercased
    pub hrp: String,
    /// Payload repacked into 8-bit bytes
    pub data: Vec<u8>,
}

/// Encode `data` under `hrp`
///
/// # Example
///
/// ```
/// use relaywire_core::bech32;
///
/// let text = bech32::encode("note", &[0u8; 32])?;
/// assert!(text.starts_with("note1"));
/// # Ok::<(), relaywire_core::error::Bech32Error>(())
/// ```
pub fn encode(hrp: &str, data: &[u8]) -> Result<String, Bech32Error> {
    if hrp.is_empty() || !hrp.bytes().all(|b| (33..=126).contains(&b)) {
        return Err(Bech32Error::InvalidHrp);
    }
    let hrp = hrp.to_ascii_lowercase();

    let values = convert_bits(data, 8, 5, true)?;
    let checksum = create_checksum(&hrp, &values);

    let mut out = String::with_capacity(hrp.len() + 1 + values.len() + CHECKSUM_LENGTH);
    out.push_str(&hrp);
    out.push(SEPARATOR);
    for value in values.iter().chain(checksum.iter()) {
        out.push(CHARSET[*value as usize] as char);
    }
    Ok(out)
}

/// Decode a bech32 string into its prefix and 8-bit payload
pub fn decode(text: &str, limit: LengthLimit) -> Result<Decoded, Bech32Error> {
    if limit == LengthLimit::Enforced && text.len() > MAX_LENGTH {
        return Err(Bech32Error::TooLong(text.len(), MAX_LENGTH));
    }

    let mut has_lower = false;
    let mut has_upper = false;
    for (i, c) in text.chars().enumerate() {
        if !(33..=126).contains(&(c as u32)) {
            return Err(Bech32Error::InvalidChar(c, i));
        }
        has_lower |= c.is_ascii_lowercase();
        has_upper |= c.is_ascii_uppercase();
    }
    if has_lower && has_upper {
        return Err(Bech32Error::MixedCase);
    }

    // all characters are ASCII past this point, so byte offsets are char offsets
    let text = text.to_ascii_lowercase();
    let pos = text.rfind(SEPARATOR).ok_or(Bech32Error::MissingSeparator)?;
    if pos == 0 {
        return Err(Bech32Error::InvalidHrp);
    }
    if text.len() - pos - 1 < CHECKSUM_LENGTH {
        return Err(Bech32Error::TooShort);
    }

    let hrp = &text[..pos];
    let mut values = Vec::with_capacity(text.len() - pos - 1);
    for (i, b) in text.bytes().enumerate().skip(pos + 1) {
        let value = CHARSET
            .iter()
            .position(|&c| c == b)
            .ok_or(Bech32Error::InvalidChar(b as char, i))?;
        values.push(value as u8);
    }

    if !verify_checksum(hrp, &values) {
        return Err(Bech32Error::InvalidChecksum);
    }

    values.truncate(values.len() - CHECKSUM_LENGTH);
    let data = convert_bits(&values, 5, 8, false)?;

    Ok(Decoded {
        hrp: hrp.to_string(),
        data,
    })
}

/// Regroup a bit stream from `from`-bit to `to`-bit words
///
/// With `pad`, leftover bits are zero-filled into a final word. Without it,
/// leftovers must be fewer than `from` bits and all zero.
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, Bech32Error> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max_value: u32 = (1 << to) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);

    for &value in data {
        let value = value as u32;
        if value >> from != 0 {
            return Err(Bech32Error::InvalidPadding);
        }
        acc = (acc << from) | value;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max_value) != 0 {
        return Err(Bech32Error::InvalidPadding);
    }

    Ok(out)
}

fn polymod(values: impl IntoIterator<Item = u8>) -> u32 {
    let mut chk: u32 = 1;
    for value in values {
        let top = chk >> 25;
        chk = ((chk & 0x1ff_ffff) << 5) ^ value as u32;
        for (i, g) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= g;
            }
        }
    }
    chk
}

fn hrp_expand(hrp: &str) -> impl Iterator<Item = u8> + '_ {
    hrp.bytes()
        .map(|b| b >> 5)
        .chain(std::iter::once(0))
        .chain(hrp.bytes().map(|b| b & 0x1f))
}

fn verify_checksum(hrp: &str, values: &[u8]) -> bool {
    polymod(hrp_expand(hrp).chain(values.iter().copied())) == 1
}

fn create_checksum(hrp: &str, values: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let pm = polymod(
        hrp_expand(hrp)
            .chain(values.iter().copied())
            .chain([0u8; CHECKSUM_LENGTH]),
    ) ^ 1;

    let mut checksum = [0u8; CHECKSUM_LENGTH];
    for (i, slot) in checksum.iter_mut().enumerate() {
        *slot = ((pm >> (5 * (5 - i))) & 0x1f) as u8;
    }
    checksum
}
