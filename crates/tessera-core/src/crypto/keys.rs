//! Key derivation, signing and addresses.
//!
//! Seeds are arbitrary UTF-8 phrases. The Ed25519 secret key is
//! `SHA-256(seed)`; public keys and signatures travel as base58.
//!
//! Address layout (26 bytes, base58 on the wire):
//!
//! ```text
//! [0x01][chain id][SHA-256(public key)[0..20]][SHA-256(first 22 bytes)[0..4]]
//! ```

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use super::{base58_decode, base58_decode_fixed, base58_encode, hash};
use crate::errors::{TesseraError, TesseraResult};
use crate::model::ChainId;

pub const PUBLIC_KEY_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;
pub const ADDRESS_LEN: usize = 26;
pub const ADDRESS_VERSION: u8 = 1;

const ADDRESS_HASH_LEN: usize = 20;
const CHECKSUM_LEN: usize = 4;

fn signing_key(seed: &str) -> SigningKey {
    SigningKey::from_bytes(&hash(seed.as_bytes()))
}

/// Base58 public key for a seed.
pub fn public_key(seed: &str) -> String {
    base58_encode(signing_key(seed).verifying_key().as_bytes())
}

/// Sign `bytes` with the key derived from `seed`; returns a base58 signature.
pub fn sign_bytes(seed: &str, bytes: &[u8]) -> String {
    base58_encode(&signing_key(seed).sign(bytes).to_bytes())
}

/// Check a base58 signature against a base58 public key.
///
/// Malformed keys or signatures yield `false`.
pub fn verify_signature(public_key: &str, bytes: &[u8], signature: &str) -> bool {
    let Ok(pk) = base58_decode_fixed::<PUBLIC_KEY_LEN>(public_key) else {
        return false;
    };
    let Ok(vk) = VerifyingKey::from_bytes(&pk) else {
        return false;
    };
    let Ok(sig) = base58_decode_fixed::<SIGNATURE_LEN>(signature) else {
        return false;
    };
    vk.verify(bytes, &Signature::from_bytes(&sig)).is_ok()
}

/// Raw address bytes for a decoded public key.
pub fn address_bytes(public_key: &[u8; PUBLIC_KEY_LEN], chain_id: ChainId) -> [u8; ADDRESS_LEN] {
    let mut out = [0u8; ADDRESS_LEN];
    out[0] = ADDRESS_VERSION;
    out[1] = chain_id.byte();
    out[2..2 + ADDRESS_HASH_LEN].copy_from_slice(&hash(public_key)[..ADDRESS_HASH_LEN]);

    let body_len = ADDRESS_LEN - CHECKSUM_LEN;
    let checksum = hash(&out[..body_len]);
    out[body_len..].copy_from_slice(&checksum[..CHECKSUM_LEN]);
    out
}

/// Base58 address for a base58 public key on the given chain.
pub fn address(public_key: &str, chain_id: ChainId) -> TesseraResult<String> {
    let pk = base58_decode_fixed::<PUBLIC_KEY_LEN>(public_key)
        .map_err(|e| TesseraError::crypto(format!("invalid public key: {e}")))?;
    Ok(base58_encode(&address_bytes(&pk, chain_id)))
}

pub fn address_from_seed(seed: &str, chain_id: ChainId) -> String {
    let vk = signing_key(seed).verifying_key();
    base58_encode(&address_bytes(vk.as_bytes(), chain_id))
}

/// True if `address` decodes to a well-formed address with a valid checksum.
///
/// When `chain_id` is given the embedded chain byte must match.
pub fn is_valid_address(address: &str, chain_id: Option<ChainId>) -> bool {
    let Ok(bytes) = base58_decode(address) else {
        return false;
    };
    if bytes.len() != ADDRESS_LEN || bytes[0] != ADDRESS_VERSION {
        return false;
    }
    if let Some(chain) = chain_id {
        if bytes[1] != chain.byte() {
            return false;
        }
    }
    let body_len = ADDRESS_LEN - CHECKSUM_LEN;
    hash(&bytes[..body_len])[..CHECKSUM_LEN] == bytes[body_len..]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "df3dd6d884714288a39af0bd973a1771c9f00f168cf040d6abb6a50dd5e055d8";

    #[test]
    fn public_key_is_deterministic() {
        assert_eq!(public_key(SEED), public_key(SEED));
        assert_ne!(public_key(SEED), public_key("other seed"));
    }

    #[test]
    fn sign_then_verify() {
        let sig = sign_bytes(SEED, b"payload");
        assert!(verify_signature(&public_key(SEED), b"payload", &sig));
        assert!(!verify_signature(&public_key(SEED), b"tampered", &sig));
        assert!(!verify_signature(&public_key("other seed"), b"payload", &sig));
    }

    #[test]
    fn malformed_inputs_do_not_verify() {
        assert!(!verify_signature("not-base58!", b"x", "1111"));
        assert!(!verify_signature(&public_key(SEED), b"x", "abc"));
    }

    #[test]
    fn address_checksum_and_chain() {
        let addr = address(&public_key(SEED), ChainId::TESTNET).unwrap();
        assert_eq!(addr, address_from_seed(SEED, ChainId::TESTNET));
        assert!(is_valid_address(&addr, Some(ChainId::TESTNET)));
        assert!(!is_valid_address(&addr, Some(ChainId::MAINNET)));
        assert!(is_valid_address(&addr, None));

        let mut raw = base58_decode(&addr).unwrap();
        raw[25] ^= 0xff;
        assert!(!is_valid_address(&base58_encode(&raw), None));
    }
}
