//! Wallet authentication requests.
//!
//! A host asks a wallet to sign `(host, data)` under a fixed prefix, proving
//! control of the key behind `address` without creating a transaction.

use serde::{Deserialize, Serialize};

use super::{impl_signable, ChainId};
use crate::proofs::{self, ProofList};

/// Domain prefix of the authentication payload.
pub const AUTH_PREFIX: &str = "TesseraWalletAuthentication";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub host: String,
    pub data: String,
    pub public_key: String,
    /// Derived from `public_key` and the chain id.
    #[serde(default)]
    pub address: String,
    #[serde(rename = "signature", default, with = "proofs::as_signature")]
    pub proofs: ProofList,
    #[serde(default)]
    pub hash: String,
    #[serde(skip)]
    pub chain_id: ChainId,
}

impl AuthRequest {
    pub fn version(&self) -> u8 {
        1
    }
}

impl_signable!(AuthRequest, kind: "auth", key: public_key, id: hash, limit: |_a| 1);
