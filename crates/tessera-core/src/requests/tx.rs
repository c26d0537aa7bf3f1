//! Transaction builders.

use serde::Deserialize;

use super::{now_ms, pick_version, CommonParams, Factory};
use crate::errors::TesseraResult;
use crate::fees::{self, compose_fee};
use crate::model::{BurnTx, DataEntry, DataTx, IssueTx, ReissueTx, Signable, TransferTx};
use crate::proofs::{ProofList, Seeds};
use crate::sign;
use crate::version::TxType;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueParams {
    #[serde(flatten)]
    pub common: CommonParams,
    pub name: String,
    pub description: String,
    pub quantity: i64,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    #[serde(default = "default_true")]
    pub reissuable: bool,
    /// Base64 compiled script.
    #[serde(default)]
    pub script: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferParams {
    #[serde(flatten)]
    pub common: CommonParams,
    pub recipient: String,
    pub amount: i64,
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub fee_asset_id: Option<String>,
    /// Base58 attachment.
    #[serde(default)]
    pub attachment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReissueParams {
    #[serde(flatten)]
    pub common: CommonParams,
    pub asset_id: String,
    pub quantity: i64,
    #[serde(default = "default_true")]
    pub reissuable: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnParams {
    #[serde(flatten)]
    pub common: CommonParams,
    pub asset_id: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataParams {
    #[serde(flatten)]
    pub common: CommonParams,
    pub data: Vec<DataEntry>,
}

fn default_decimals() -> u8 {
    8
}

fn default_true() -> bool {
    true
}

fn tx_version(t: TxType, requested: Option<u8>) -> TesseraResult<u8> {
    pick_version(t.as_str(), requested, t.default_version())
}

fn tx_fee(t: TxType, c: &CommonParams) -> TesseraResult<i64> {
    compose_fee(t.as_str(), fees::base_fee(t), c.fee, c.additional_fee)
}

impl Factory {
    pub fn issue(&self, p: IssueParams, seeds: impl Into<Seeds>) -> TesseraResult<IssueTx> {
        let seeds = seeds.into();
        let c = p.common;
        let fee = tx_fee(TxType::Issue, &c)?;
        let mut tx = IssueTx {
            tx_type: TxType::Issue.as_u8(),
            version: tx_version(TxType::Issue, c.version)?,
            chain_id: self.chain_id(c.chain_id),
            sender_public_key: c.sender_public_key.unwrap_or_default(),
            name: p.name,
            description: p.description,
            quantity: p.quantity,
            decimals: p.decimals,
            reissuable: p.reissuable,
            script: p.script,
            fee,
            timestamp: c.timestamp.unwrap_or_else(now_ms),
            proofs: ProofList::new(),
            id: String::new(),
        };
        self.finish(&mut tx, &seeds, |v, t| v.issue(t))?;
        Ok(tx)
    }

    pub fn transfer(
        &self,
        p: TransferParams,
        seeds: impl Into<Seeds>,
    ) -> TesseraResult<TransferTx> {
        let seeds = seeds.into();
        let c = p.common;
        let fee = tx_fee(TxType::Transfer, &c)?;
        let mut tx = TransferTx {
            tx_type: TxType::Transfer.as_u8(),
            version: tx_version(TxType::Transfer, c.version)?,
            chain_id: self.chain_id(c.chain_id),
            sender_public_key: c.sender_public_key.unwrap_or_default(),
            recipient: p.recipient,
            asset_id: p.asset_id,
            fee_asset_id: p.fee_asset_id,
            amount: p.amount,
            attachment: p.attachment.unwrap_or_default(),
            fee,
            timestamp: c.timestamp.unwrap_or_else(now_ms),
            proofs: ProofList::new(),
            id: String::new(),
        };
        self.finish(&mut tx, &seeds, |v, t| v.transfer(t))?;
        Ok(tx)
    }

    pub fn reissue(&self, p: ReissueParams, seeds: impl Into<Seeds>) -> TesseraResult<ReissueTx> {
        let seeds = seeds.into();
        let c = p.common;
        let fee = tx_fee(TxType::Reissue, &c)?;
        let mut tx = ReissueTx {
            tx_type: TxType::Reissue.as_u8(),
            version: tx_version(TxType::Reissue, c.version)?,
            chain_id: self.chain_id(c.chain_id),
            sender_public_key: c.sender_public_key.unwrap_or_default(),
            asset_id: p.asset_id,
            quantity: p.quantity,
            reissuable: p.reissuable,
            fee,
            timestamp: c.timestamp.unwrap_or_else(now_ms),
            proofs: ProofList::new(),
            id: String::new(),
        };
        self.finish(&mut tx, &seeds, |v, t| v.reissue(t))?;
        Ok(tx)
    }

    pub fn burn(&self, p: BurnParams, seeds: impl Into<Seeds>) -> TesseraResult<BurnTx> {
        let seeds = seeds.into();
        let c = p.common;
        let fee = tx_fee(TxType::Burn, &c)?;
        let mut tx = BurnTx {
            tx_type: TxType::Burn.as_u8(),
            version: tx_version(TxType::Burn, c.version)?,
            chain_id: self.chain_id(c.chain_id),
            sender_public_key: c.sender_public_key.unwrap_or_default(),
            asset_id: p.asset_id,
            amount: p.amount,
            fee,
            timestamp: c.timestamp.unwrap_or_else(now_ms),
            proofs: ProofList::new(),
            id: String::new(),
        };
        self.finish(&mut tx, &seeds, |v, t| v.burn(t))?;
        Ok(tx)
    }

    /// The fee depends on the encoded size, so it is settled after validation.
    pub fn data(&self, p: DataParams, seeds: impl Into<Seeds>) -> TesseraResult<DataTx> {
        let seeds = seeds.into();
        let c = p.common;
        let mut tx = DataTx {
            tx_type: TxType::Data.as_u8(),
            version: tx_version(TxType::Data, c.version)?,
            chain_id: self.chain_id(c.chain_id),
            sender_public_key: c.sender_public_key.unwrap_or_default(),
            data: p.data,
            fee: c.fee.unwrap_or(fees::base_fee(TxType::Data)),
            timestamp: c.timestamp.unwrap_or_else(now_ms),
            proofs: ProofList::new(),
            id: String::new(),
        };

        sign::resolve_public_key(&mut tx, &seeds)?;
        self.validator.data(&tx)?;

        // Fee is a fixed-width field; its value does not change the length.
        let minimum = fees::data_fee(tx.canonical_bytes()?.len());
        tx.fee = compose_fee("data", minimum, c.fee, c.additional_fee)?;

        sign::sign(&mut tx, &seeds)?;
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{base58_encode, public_key};
    use crate::errors::TesseraError;
    use assert_matches::assert_matches;

    const SEED: &str = "request seed";

    fn burn_params() -> BurnParams {
        BurnParams {
            common: CommonParams {
                timestamp: Some(1_700_000_000_000),
                ..CommonParams::default()
            },
            asset_id: base58_encode(&[5u8; 32]),
            amount: 10,
        }
    }

    #[test]
    fn defaults_are_filled() {
        let tx = Factory::default().burn(burn_params(), SEED).unwrap();
        assert_eq!(tx.version, 2);
        assert_eq!(tx.tx_type, 6);
        assert_eq!(tx.fee, fees::BURN_FEE);
        assert_eq!(tx.sender_public_key, public_key(SEED));
        assert_eq!(tx.proofs.len(), 1);
        assert!(!tx.id.is_empty());
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut p = burn_params();
        p.common.version = Some(1);
        assert_matches!(
            Factory::default().burn(p, SEED),
            Err(TesseraError::UnsupportedVariant { version: 1, .. })
        );
    }

    #[test]
    fn data_fee_grows_with_payload() {
        let small = Factory::default()
            .data(
                DataParams {
                    common: CommonParams::default(),
                    data: vec![DataEntry::integer("k", 1)],
                },
                SEED,
            )
            .unwrap();
        assert_eq!(small.fee, 100_000);

        let big = Factory::default()
            .data(
                DataParams {
                    common: CommonParams::default(),
                    data: vec![DataEntry::binary("blob", &[7u8; 1500])],
                },
                SEED,
            )
            .unwrap();
        assert_eq!(big.fee, 200_000);
    }

    #[test]
    fn data_entries_without_type() {
        let p: DataParams = serde_json::from_value(serde_json::json!({
            "data": [
                {"key": "oneTwo", "value": false},
                {"key": "twoThree", "value": 2},
            ],
            "timestamp": 100000
        }))
        .unwrap();
        assert_eq!(p.data[0], DataEntry::boolean("oneTwo", false));
        assert_eq!(p.data[1], DataEntry::integer("twoThree", 2));

        let tx = Factory::default().data(p, SEED).unwrap();
        assert_eq!(tx.timestamp, 100_000);
        assert_eq!(tx.fee, fees::DATA_FEE_PER_KIB);
        assert!(crate::sign::verify(&tx, 0).unwrap());
    }

    #[test]
    fn params_from_json() {
        let p: IssueParams = serde_json::from_value(serde_json::json!({
            "name": "Token",
            "description": "",
            "quantity": 1000,
            "chainId": 84,
            "additionalFee": 400000
        }))
        .unwrap();
        assert_eq!(p.decimals, 8);
        assert!(p.reissuable);
        assert_eq!(p.common.additional_fee, Some(400_000));
        let tx = Factory::default().issue(p, SEED).unwrap();
        assert_eq!(tx.fee, fees::ISSUE_FEE + 400_000);
        assert_eq!(tx.chain_id.byte(), b'T');
    }
}
