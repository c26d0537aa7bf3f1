use anyhow::{anyhow, Result};
use serde::Serialize;
use tessera_core::crypto::{address, public_key};
use tessera_core::model::ChainId;

use crate::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeysOut {
    pub public_key: String,
    pub address: String,
    pub chain_id: String,
}

pub async fn run(seed: &str, chain_id: ChainId) -> Result<()> {
    if seed.is_empty() {
        return Err(anyhow!("seed must not be empty"));
    }
    let pk = public_key(seed);
    output::print(&KeysOut {
        address: address(&pk, chain_id)?,
        public_key: pk,
        chain_id: chain_id.to_string(),
    })?;
    Ok(())
}
