use anyhow::Result;
use serde::Serialize;
use tessera_core::crypto::{base58_encode, hash_base58};
use tessera_core::model::Signable;

use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct SerializeOut {
    pub kind: &'static str,
    pub version: u8,
    pub id: String,
    pub len: usize,
    pub hex: String,
    pub base58: String,
}

pub async fn run(input_path: &str, kind: &str) -> Result<()> {
    let obj = input::read_object(input_path, kind)?;
    let bytes = obj.canonical_bytes()?;
    output::print(&SerializeOut {
        kind: obj.kind(),
        version: obj.version(),
        id: hash_base58(&bytes),
        len: bytes.len(),
        hex: hex::encode(&bytes),
        base58: base58_encode(&bytes),
    })?;
    Ok(())
}
