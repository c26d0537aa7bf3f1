//! Wallet authentication builder.

use serde::Deserialize;

use super::Factory;
use crate::crypto::address;
use crate::errors::TesseraResult;
use crate::model::{AuthRequest, ChainId};
use crate::proofs::{ProofList, Seeds};
use crate::sign;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthParams {
    pub host: String,
    pub data: String,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub chain_id: Option<ChainId>,
}

impl Factory {
    pub fn auth(&self, p: AuthParams, seeds: impl Into<Seeds>) -> TesseraResult<AuthRequest> {
        let seeds = seeds.into();
        let mut req = AuthRequest {
            host: p.host,
            data: p.data,
            public_key: p.public_key.unwrap_or_default(),
            address: String::new(),
            proofs: ProofList::new(),
            hash: String::new(),
            chain_id: self.chain_id(p.chain_id),
        };

        sign::resolve_public_key(&mut req, &seeds)?;
        self.validator.auth(&req)?;
        req.address = address(&req.public_key, req.chain_id)?;
        sign::sign(&mut req, &seeds)?;
        Ok(req)
    }
}
