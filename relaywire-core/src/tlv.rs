//! Type-length-value records used inside shareable identifiers
//!
//! Each entry is one type byte, one length byte and `length` value bytes.

use crate::error::IdentifierError;

/// Main payload: event id, public key, or addressable identifier
pub const DEFAULT: u8 = 0;
/// Relay URL hint, UTF-8
pub const RELAY: u8 = 1;
/// Author public key, 32 bytes
pub const AUTHOR: u8 = 2;
/// Event kind, big-endian u32
pub const KIND: u8 = 3;

/// Largest value a single entry can carry
pub const MAX_VALUE_LENGTH: usize = u8::MAX as usize;

/// Read the entry at the start of `buffer`
///
/// Returns `None` when the buffer ends before a full entry, which callers treat
/// as the end of the stream.
pub fn read_entry(buffer: &[u8]) -> Option<(u8, &[u8])> {
    let [kind, length, rest @ ..] = buffer else {
        return None;
    };
    let value = rest.get(..*length as usize)?;
    Some((*kind, value))
}

/// Append an entry to `buffer`
///
/// Values longer than [`MAX_VALUE_LENGTH`] are rejected; the buffer is left
/// untouched in that case.
pub fn write_entry(buffer: &mut Vec<u8>, kind: u8, value: &[u8]) -> Result<(), IdentifierError> {
    let length = u8::try_from(value.len()).map_err(|_| IdentifierError::ValueTooLong(value.len()))?;
    buffer.reserve(2 + value.len());
    buffer.push(kind);
    buffer.push(length);
    buffer.extend_from_slice(value);
    Ok(())
}

/// Iterate over the entries of a TLV stream until it is exhausted or truncated
pub fn entries(buffer: &[u8]) -> Entries<'_> {
    Entries { remaining: buffer }
}

/// Iterator returned by [`entries`]
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    remaining: &'a [u8],
}

impl<'a> Iterator for Entries<'a> {
    type Item = (u8, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let (kind, value) = read_entry(self.remaining)?;
        self.remaining = &self.remaining[2 + value.len()..];
        Some((kind, value))
    }
}
