//! Cryptographic and encoding primitives.
//!
//! The rest of the crate treats these as black boxes with fixed contracts:
//! - `hash(bytes)`: SHA-256, 32-byte digest
//! - base58 / base64 encode and decode
//! - `sign_bytes`, `verify_signature`, `public_key`, `address` (see [`keys`])
//!
//! Content ids are `base58(hash(canonical bytes))`.

pub mod keys;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::errors::{TesseraError, TesseraResult};

pub use keys::{
    address, address_from_seed, is_valid_address, public_key, sign_bytes, verify_signature,
};

/// Digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// Prefix accepted (and emitted) on base64 strings in JSON payloads.
pub const BASE64_PREFIX: &str = "base64:";

/// Hash raw bytes.
pub fn hash(bytes: &[u8]) -> [u8; DIGEST_LEN] {
    let mut h = Sha256::new();
    h.update(bytes);
    h.finalize().into()
}

/// Hash raw bytes and return the base58 content id.
pub fn hash_base58(bytes: &[u8]) -> String {
    base58_encode(&hash(bytes))
}

pub fn base58_encode(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

pub fn base58_decode(s: &str) -> TesseraResult<Vec<u8>> {
    bs58::decode(s)
        .into_vec()
        .map_err(|e| TesseraError::invalid_argument(format!("invalid base58 string: {e}")))
}

/// Decode a base58 string that must be exactly `N` bytes long.
pub fn base58_decode_fixed<const N: usize>(s: &str) -> TesseraResult<[u8; N]> {
    let bytes = base58_decode(s)?;
    bytes.as_slice().try_into().map_err(|_| {
        TesseraError::invalid_argument(format!(
            "expected {N} bytes after base58 decoding, got {}",
            bytes.len()
        ))
    })
}

/// Encode bytes as `base64:<payload>`.
pub fn base64_encode(bytes: &[u8]) -> String {
    format!("{BASE64_PREFIX}{}", STANDARD.encode(bytes))
}

/// Decode base64, with or without the `base64:` prefix.
pub fn base64_decode(s: &str) -> TesseraResult<Vec<u8>> {
    let payload = s.strip_prefix(BASE64_PREFIX).unwrap_or(s);
    STANDARD
        .decode(payload)
        .map_err(|e| TesseraError::invalid_argument(format!("invalid base64 string: {e}")))
}
