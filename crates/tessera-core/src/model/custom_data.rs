//! Signed custom data payloads.
//!
//! Two payload versions exist:
//! - v1: an opaque base64 blob
//! - v2: a list of typed data entries
//!
//! The canonical bytes of both start with the marker `FF FF FF <version>`,
//! which no transaction or order encoding can begin with.

use serde::{Deserialize, Serialize};

use super::{impl_signable, DataEntry};
use crate::proofs::{self, ProofList};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomPayload {
    /// Base64 blob.
    V1 { binary: String },
    V2 { data: Vec<DataEntry> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCustomData", into = "RawCustomData")]
pub struct CustomData {
    pub payload: CustomPayload,
    pub public_key: String,
    pub proofs: ProofList,
    pub hash: String,
}

impl CustomData {
    pub fn version(&self) -> u8 {
        match self.payload {
            CustomPayload::V1 { .. } => 1,
            CustomPayload::V2 { .. } => 2,
        }
    }
}

impl_signable!(CustomData, kind: "custom-data", key: public_key, id: hash, limit: |_d| 1);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCustomData {
    version: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    binary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Vec<DataEntry>>,
    #[serde(default)]
    public_key: String,
    #[serde(rename = "signature", default, with = "proofs::as_signature")]
    proofs: ProofList,
    #[serde(default)]
    hash: String,
}

impl TryFrom<RawCustomData> for CustomData {
    type Error = String;

    fn try_from(raw: RawCustomData) -> Result<Self, Self::Error> {
        let payload = match (raw.version, raw.binary, raw.data) {
            (1, Some(binary), None) => CustomPayload::V1 { binary },
            (2, None, Some(data)) => CustomPayload::V2 { data },
            (1 | 2, _, _) => {
                return Err(format!(
                    "custom data v{} requires exactly the `{}` field",
                    raw.version,
                    if raw.version == 1 { "binary" } else { "data" }
                ))
            }
            (v, _, _) => return Err(format!("Invalid CustomData version: {v}")),
        };
        Ok(Self {
            payload,
            public_key: raw.public_key,
            proofs: raw.proofs,
            hash: raw.hash,
        })
    }
}

impl From<CustomData> for RawCustomData {
    fn from(d: CustomData) -> Self {
        let version = d.version();
        let (binary, data) = match d.payload {
            CustomPayload::V1 { binary } => (Some(binary), None),
            CustomPayload::V2 { data } => (None, Some(data)),
        };
        Self {
            version,
            binary,
            data,
            public_key: d.public_key,
            proofs: d.proofs,
            hash: d.hash,
        }
    }
}
