//! Low-level field encoders.
//!
//! All integers are big-endian. Variable-length values carry a `u16` length
//! prefix. Every function appends to `out` and never rewinds it; callers that
//! need atomicity encode into a fresh buffer.

use crate::crypto::{base58_decode, base58_decode_fixed, base64_decode, keys::ADDRESS_LEN};
use crate::errors::{TesseraError, TesseraResult};
use crate::model::{ChainId, DataEntry, DataValue};

/// Leading byte of an encoded alias recipient.
pub const ALIAS_VERSION: u8 = 2;

/// Prefix of alias recipients in JSON (`alias:<chain>:<name>`).
pub const ALIAS_PREFIX: &str = "alias:";

pub fn put_byte(out: &mut Vec<u8>, v: u8) {
    out.push(v);
}

pub fn put_bool(out: &mut Vec<u8>, v: bool) {
    out.push(u8::from(v));
}

pub fn put_short(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

pub fn put_long(out: &mut Vec<u8>, v: i64) {
    out.extend_from_slice(&v.to_be_bytes());
}

/// `u16` length followed by the bytes.
pub fn put_len_prefixed(out: &mut Vec<u8>, bytes: &[u8]) -> TesseraResult<()> {
    let len = u16::try_from(bytes.len()).map_err(|_| {
        TesseraError::serialization(format!(
            "value of {} bytes exceeds the u16 length prefix",
            bytes.len()
        ))
    })?;
    put_short(out, len);
    out.extend_from_slice(bytes);
    Ok(())
}

/// Length-prefixed UTF-8.
pub fn put_string(out: &mut Vec<u8>, s: &str) -> TesseraResult<()> {
    put_len_prefixed(out, s.as_bytes())
}

/// Raw bytes of a base58 value that must decode to exactly `N` bytes.
pub fn put_base58_fixed<const N: usize>(out: &mut Vec<u8>, s: &str) -> TesseraResult<()> {
    out.extend_from_slice(&base58_decode_fixed::<N>(s)?);
    Ok(())
}

/// Length-prefixed bytes of a base58 value.
pub fn put_base58_blob(out: &mut Vec<u8>, s: &str) -> TesseraResult<()> {
    put_len_prefixed(out, &base58_decode(s)?)
}

/// Length-prefixed bytes of a base64 value.
pub fn put_base64_blob(out: &mut Vec<u8>, s: &str) -> TesseraResult<()> {
    put_len_prefixed(out, &base64_decode(s)?)
}

/// `0x00`, or `0x01` followed by the value.
pub fn put_option<T>(
    out: &mut Vec<u8>,
    value: Option<T>,
    put: impl FnOnce(&mut Vec<u8>, T) -> TesseraResult<()>,
) -> TesseraResult<()> {
    match value {
        None => {
            put_byte(out, 0);
            Ok(())
        }
        Some(v) => {
            put_byte(out, 1);
            put(out, v)
        }
    }
}

/// An address (26 raw bytes) or an alias (`0x02`, chain byte, name).
pub fn put_recipient(out: &mut Vec<u8>, recipient: &str) -> TesseraResult<()> {
    if let Some(rest) = recipient.strip_prefix(ALIAS_PREFIX) {
        let (chain, name) = parse_alias(rest)?;
        put_byte(out, ALIAS_VERSION);
        put_byte(out, chain.byte());
        return put_string(out, name);
    }
    put_base58_fixed::<ADDRESS_LEN>(out, recipient)
}

/// Split `<chain>:<name>` of an alias recipient.
pub fn parse_alias(rest: &str) -> TesseraResult<(ChainId, &str)> {
    let (chain, name) = rest
        .split_once(':')
        .ok_or_else(|| TesseraError::invalid_argument(format!("malformed alias: {rest}")))?;
    let chain = ChainId::parse(chain)
        .ok_or_else(|| TesseraError::invalid_argument(format!("malformed alias chain: {chain}")))?;
    Ok((chain, name))
}

/// Type tag followed by the value encoding of one data entry.
pub fn put_data_value(out: &mut Vec<u8>, value: &DataValue) -> TesseraResult<()> {
    put_byte(out, value.tag());
    match value {
        DataValue::Integer(v) => put_long(out, *v),
        DataValue::Boolean(v) => put_bool(out, *v),
        DataValue::Binary(v) => put_base64_blob(out, v)?,
        DataValue::String(v) => put_string(out, v)?,
    }
    Ok(())
}

/// Entry count as `u16`.
pub fn put_entry_count(out: &mut Vec<u8>, entries: &[DataEntry]) -> TesseraResult<()> {
    let n = u16::try_from(entries.len()).map_err(|_| {
        TesseraError::serialization(format!("too many data entries: {}", entries.len()))
    })?;
    put_short(out, n);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::base58_encode;

    #[test]
    fn integers_are_big_endian() {
        let mut out = Vec::new();
        put_short(&mut out, 0x0102);
        put_long(&mut out, 100_000);
        assert_eq!(out, vec![1, 2, 0, 0, 0, 0, 0, 1, 0x86, 0xa0]);
    }

    #[test]
    fn strings_are_length_prefixed() {
        let mut out = Vec::new();
        put_string(&mut out, "abc").unwrap();
        assert_eq!(out, vec![0, 3, b'a', b'b', b'c']);
    }

    #[test]
    fn oversized_value_is_rejected() {
        let mut out = Vec::new();
        let big = vec![0u8; u16::MAX as usize + 1];
        assert!(put_len_prefixed(&mut out, &big).is_err());
    }

    #[test]
    fn option_flag() {
        let mut out = Vec::new();
        put_option(&mut out, None::<&str>, |o, s| put_base58_fixed::<4>(o, s)).unwrap();
        let id = base58_encode(&[9, 9, 9, 9]);
        put_option(&mut out, Some(id.as_str()), |o, s| put_base58_fixed::<4>(o, s)).unwrap();
        assert_eq!(out, vec![0, 1, 9, 9, 9, 9]);
    }

    #[test]
    fn alias_recipient() {
        let mut out = Vec::new();
        put_recipient(&mut out, "alias:T:merry").unwrap();
        assert_eq!(out, vec![2, b'T', 0, 5, b'm', b'e', b'r', b'r', b'y']);
    }

    #[test]
    fn data_values() {
        let mut out = Vec::new();
        put_data_value(&mut out, &DataValue::Boolean(false)).unwrap();
        put_data_value(&mut out, &DataValue::Binary("base64:AQID".into())).unwrap();
        assert_eq!(out, vec![1, 0, 2, 0, 3, 1, 2, 3]);
    }
}
