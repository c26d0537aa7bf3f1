//! Transaction records.
//!
//! Each transaction carries its `type` byte and `version`; the pair selects
//! the schema in `crate::codec::schemas`. The `type` field exists for the JSON
//! transport shape and is checked against the record kind on serialization.

use serde::{Deserialize, Serialize};

use super::{delegate_signable, impl_signable, ChainId, DataEntry, Signable, MAX_PROOFS};
use crate::errors::TesseraResult;
use crate::proofs::ProofList;
use crate::version::TxType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTx {
    #[serde(rename = "type")]
    pub tx_type: u8,
    pub version: u8,
    #[serde(default)]
    pub chain_id: ChainId,
    pub sender_public_key: String,
    pub name: String,
    pub description: String,
    pub quantity: i64,
    pub decimals: u8,
    pub reissuable: bool,
    /// Base64 compiled script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    pub fee: i64,
    pub timestamp: i64,
    #[serde(default)]
    pub proofs: ProofList,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferTx {
    #[serde(rename = "type")]
    pub tx_type: u8,
    pub version: u8,
    #[serde(default)]
    pub chain_id: ChainId,
    pub sender_public_key: String,
    /// Base58 address or `alias:<chain>:<name>`.
    pub recipient: String,
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub fee_asset_id: Option<String>,
    pub amount: i64,
    /// Base58 attachment bytes.
    #[serde(default)]
    pub attachment: String,
    pub fee: i64,
    pub timestamp: i64,
    #[serde(default)]
    pub proofs: ProofList,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReissueTx {
    #[serde(rename = "type")]
    pub tx_type: u8,
    pub version: u8,
    #[serde(default)]
    pub chain_id: ChainId,
    pub sender_public_key: String,
    pub asset_id: String,
    pub quantity: i64,
    pub reissuable: bool,
    pub fee: i64,
    pub timestamp: i64,
    #[serde(default)]
    pub proofs: ProofList,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnTx {
    #[serde(rename = "type")]
    pub tx_type: u8,
    pub version: u8,
    #[serde(default)]
    pub chain_id: ChainId,
    pub sender_public_key: String,
    pub asset_id: String,
    pub amount: i64,
    pub fee: i64,
    pub timestamp: i64,
    #[serde(default)]
    pub proofs: ProofList,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTx {
    #[serde(rename = "type")]
    pub tx_type: u8,
    pub version: u8,
    #[serde(default)]
    pub chain_id: ChainId,
    pub sender_public_key: String,
    pub data: Vec<DataEntry>,
    pub fee: i64,
    pub timestamp: i64,
    #[serde(default)]
    pub proofs: ProofList,
    #[serde(default)]
    pub id: String,
}

macro_rules! tx_version {
    ($($ty:ty),+) => {
        $(impl $ty {
            pub fn version(&self) -> u8 {
                self.version
            }
        })+
    };
}

tx_version!(IssueTx, TransferTx, ReissueTx, BurnTx, DataTx);

impl_signable!(IssueTx, kind: "issue", key: sender_public_key, id: id, limit: |_t| MAX_PROOFS);
impl_signable!(ReissueTx, kind: "reissue", key: sender_public_key, id: id, limit: |_t| MAX_PROOFS);
impl_signable!(BurnTx, kind: "burn", key: sender_public_key, id: id, limit: |_t| MAX_PROOFS);
impl_signable!(DataTx, kind: "data", key: sender_public_key, id: id, limit: |_t| MAX_PROOFS);
// Legacy v1 transfers carry a single signature.
impl_signable!(TransferTx, kind: "transfer", key: sender_public_key, id: id,
    limit: |t| if t.version == 1 { 1 } else { MAX_PROOFS });

/// Any transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Transaction {
    Issue(IssueTx),
    Transfer(TransferTx),
    Reissue(ReissueTx),
    Burn(BurnTx),
    Data(DataTx),
}

delegate_signable!(Transaction {
    Issue,
    Transfer,
    Reissue,
    Burn,
    Data,
});

impl Transaction {
    /// The declared type byte.
    pub fn tx_type(&self) -> u8 {
        match self {
            Transaction::Issue(t) => t.tx_type,
            Transaction::Transfer(t) => t.tx_type,
            Transaction::Reissue(t) => t.tx_type,
            Transaction::Burn(t) => t.tx_type,
            Transaction::Data(t) => t.tx_type,
        }
    }

    pub fn fee(&self) -> i64 {
        match self {
            Transaction::Issue(t) => t.fee,
            Transaction::Transfer(t) => t.fee,
            Transaction::Reissue(t) => t.fee,
            Transaction::Burn(t) => t.fee,
            Transaction::Data(t) => t.fee,
        }
    }

    pub fn timestamp(&self) -> i64 {
        match self {
            Transaction::Issue(t) => t.timestamp,
            Transaction::Transfer(t) => t.timestamp,
            Transaction::Reissue(t) => t.timestamp,
            Transaction::Burn(t) => t.timestamp,
            Transaction::Data(t) => t.timestamp,
        }
    }

    /// Parse transport JSON, dispatching on the `type` field.
    #[cfg(feature = "json")]
    pub fn from_json(value: serde_json::Value) -> TesseraResult<Self> {
        use crate::errors::TesseraError;

        let raw = value
            .get("type")
            .ok_or_else(|| TesseraError::invalid_argument("transaction json has no `type` field"))?;
        let tx_type = raw
            .as_u64()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| {
                let shown = raw.as_str().map_or_else(|| raw.to_string(), str::to_string);
                TesseraError::unknown_kind(shown)
            })?;

        fn parse<T: serde::de::DeserializeOwned>(
            t: TxType,
            value: serde_json::Value,
        ) -> TesseraResult<T> {
            serde_json::from_value(value).map_err(|e| {
                TesseraError::serialization(format!("invalid {} json: {e}", t.as_str()))
            })
        }

        let t = TxType::from_u8(tx_type)?;
        Ok(match t {
            TxType::Issue => Transaction::Issue(parse(t, value)?),
            TxType::Transfer => Transaction::Transfer(parse(t, value)?),
            TxType::Reissue => Transaction::Reissue(parse(t, value)?),
            TxType::Burn => Transaction::Burn(parse(t, value)?),
            TxType::Data => Transaction::Data(parse(t, value)?),
        })
    }
}

impl From<IssueTx> for Transaction {
    fn from(t: IssueTx) -> Self {
        Transaction::Issue(t)
    }
}

impl From<TransferTx> for Transaction {
    fn from(t: TransferTx) -> Self {
        Transaction::Transfer(t)
    }
}

impl From<ReissueTx> for Transaction {
    fn from(t: ReissueTx) -> Self {
        Transaction::Reissue(t)
    }
}

impl From<BurnTx> for Transaction {
    fn from(t: BurnTx) -> Self {
        Transaction::Burn(t)
    }
}

impl From<DataTx> for Transaction {
    fn from(t: DataTx) -> Self {
        Transaction::Data(t)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::errors::TesseraError;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn burn_json() -> serde_json::Value {
        json!({
            "type": 6,
            "version": 2,
            "chainId": 84,
            "senderPublicKey": "4EPVbbXm8QtP8SxT9oMpzmJH6arM1s8GkpDaXyByQTQz",
            "assetId": "DWgwcZTMhSvnyYCoWLRUXXSH1RSkzThXLJhww9gwkqdn",
            "amount": 10,
            "fee": 100000,
            "timestamp": 1700000000000i64,
            "proofs": []
        })
    }

    #[test]
    fn dispatches_on_type() {
        let tx = Transaction::from_json(burn_json()).unwrap();
        assert_matches!(tx, Transaction::Burn(ref b) if b.amount == 10);
        assert_eq!(tx.kind(), "burn");
        assert_eq!(tx.tx_type(), 6);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut v = burn_json();
        v["type"] = json!(99);
        let err = Transaction::from_json(v).unwrap_err();
        assert_matches!(err, TesseraError::UnknownKind { ref value } if value == "99");
        assert_eq!(err.to_string(), "Unknown tx type: 99");
    }

    #[test]
    fn string_type_is_reported_without_quotes() {
        let mut v = burn_json();
        v["type"] = json!("99");
        let err = Transaction::from_json(v).unwrap_err();
        assert_eq!(err.to_string(), "Unknown tx type: 99");
    }

    #[test]
    fn json_roundtrip_keeps_type() {
        let tx = Transaction::from_json(burn_json()).unwrap();
        let v = serde_json::to_value(&tx).unwrap();
        assert_eq!(v["type"], json!(6));
        assert_eq!(v["chainId"], json!(84));
        assert_eq!(Transaction::from_json(v).unwrap(), tx);
    }
}
