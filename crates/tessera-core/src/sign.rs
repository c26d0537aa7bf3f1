//! Signing and verification of any [`Signable`] object.
//!
//! Signing:
//! 1. resolve the public key (explicit, else derived from the first seed)
//! 2. compute canonical bytes once
//! 3. sign them with every seed, placing proofs per [`Seeds`]
//! 4. commit the proofs and recompute the id
//!
//! The proof list is replaced only after every proof has been placed, so a
//! failed call leaves the object as it was.
//!
//! Verification recomputes the bytes from the object as it is now. A proof
//! that is absent or undecodable is reported as `Ok(false)`, never an error.

use tracing::debug;

use crate::crypto::{hash_base58, public_key, sign_bytes, verify_signature};
use crate::errors::{TesseraError, TesseraResult};
use crate::model::Signable;
use crate::proofs::Seeds;

/// Base58 hash of the canonical bytes.
pub fn content_id<S: Signable + ?Sized>(obj: &S) -> TesseraResult<String> {
    Ok(hash_base58(&obj.canonical_bytes()?))
}

/// Recompute and store the content id.
pub fn refresh_id<S: Signable + ?Sized>(obj: &mut S) -> TesseraResult<()> {
    let id = content_id(obj)?;
    obj.set_id(id);
    Ok(())
}

/// Fill an empty public key from the first seed.
///
/// Returns `true` if the key was derived. Fails with `MissingKeyMaterial` when
/// the key is empty and no seed is available.
pub fn resolve_public_key<S: Signable + ?Sized>(obj: &mut S, seeds: &Seeds) -> TesseraResult<bool> {
    if !obj.public_key().is_empty() {
        return Ok(false);
    }
    match seeds.first() {
        Some(seed) if !seed.is_empty() => {
            obj.set_public_key(public_key(seed));
            Ok(true)
        }
        _ => Err(TesseraError::MissingKeyMaterial),
    }
}

/// Sign `obj` in place with every seed in `seeds`.
///
/// With `Seeds::None` no proof is added, but the public key must still be
/// resolvable and the id is refreshed.
pub fn sign<S: Signable + ?Sized>(obj: &mut S, seeds: &Seeds) -> TesseraResult<()> {
    let derived = resolve_public_key(obj, seeds)?;
    let result = sign_resolved(obj, seeds);
    if result.is_err() && derived {
        obj.set_public_key(String::new());
    }
    result
}

fn sign_resolved<S: Signable + ?Sized>(obj: &mut S, seeds: &Seeds) -> TesseraResult<()> {
    let bytes = obj.canonical_bytes()?;
    let limit = obj.proof_limit();

    let mut proofs = obj.proofs().clone();
    for (index, seed) in seeds.assignments() {
        if seed.is_empty() {
            return Err(TesseraError::invalid_argument("seed must not be empty"));
        }
        proofs.insert(index, sign_bytes(seed, &bytes), limit)?;
    }

    let added = proofs.len() - obj.proofs().len();
    *obj.proofs_mut() = proofs;

    let id = hash_base58(&bytes);
    debug!(kind = obj.kind(), version = obj.version(), added, id = %id, "signed");
    obj.set_id(id);
    Ok(())
}

/// Owned variant of [`sign`].
pub fn signed<S: Signable>(mut obj: S, seeds: impl Into<Seeds>) -> TesseraResult<S> {
    sign(&mut obj, &seeds.into())?;
    Ok(obj)
}

/// Check the proof at `index` against the object's own public key.
pub fn verify<S: Signable + ?Sized>(obj: &S, index: usize) -> TesseraResult<bool> {
    verify_with_key(obj, index, obj.public_key())
}

/// Check the proof at `index` against an arbitrary public key.
///
/// Used for multi-signature accounts where cosigners' keys differ from the
/// sender key.
pub fn verify_with_key<S: Signable + ?Sized>(
    obj: &S,
    index: usize,
    public_key: &str,
) -> TesseraResult<bool> {
    let Some(proof) = obj.proofs().get(index) else {
        return Ok(false);
    };
    let bytes = obj.canonical_bytes()?;
    Ok(verify_signature(public_key, &bytes, proof))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CancelOrder, Signable};
    use crate::proofs::ProofList;
    use assert_matches::assert_matches;

    const SEED: &str = "cancel seed";

    fn cancel(sender: String) -> CancelOrder {
        CancelOrder {
            sender,
            order_id: crate::crypto::base58_encode(&[3u8; 32]),
            proofs: ProofList::new(),
            hash: String::new(),
        }
    }

    #[test]
    fn derives_key_and_signs() {
        let mut c = cancel(String::new());
        sign(&mut c, &Seeds::from(SEED)).unwrap();
        assert_eq!(c.sender, public_key(SEED));
        assert!(verify(&c, 0).unwrap());
        assert_eq!(c.hash, content_id(&c).unwrap());
    }

    #[test]
    fn missing_key_material() {
        let mut c = cancel(String::new());
        assert_matches!(sign(&mut c, &Seeds::None), Err(TesseraError::MissingKeyMaterial));
    }

    #[test]
    fn failed_sign_restores_derived_key() {
        let mut c = cancel(String::new());
        let err = sign(&mut c, &Seeds::from(vec![None, Some(SEED)])).unwrap_err();
        assert_matches!(err, TesseraError::ProofLimitExceeded { index: 1, limit: 1 });
        assert!(c.sender.is_empty());
        assert!(c.proofs().is_empty());
    }

    #[test]
    fn absent_or_foreign_proof_is_false() {
        let mut c = cancel(public_key(SEED));
        assert!(!verify(&c, 0).unwrap());
        sign(&mut c, &Seeds::from("someone else")).unwrap();
        assert!(!verify(&c, 0).unwrap());
        assert!(verify_with_key(&c, 0, &public_key("someone else")).unwrap());
        assert!(!verify_with_key(&c, 0, "not a key").unwrap());
    }
}
