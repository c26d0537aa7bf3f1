//! Pre-flight checks on typed records, before serialization.
//!
//! Every failure is a `TesseraError::Validation` naming the kind, the field,
//! the offending value and the reason. Validation never mutates its input.
//!
//! Checked:
//! - keys and ids decode from base58 to 32 bytes
//! - amounts, fees and timestamps are in range
//! - string and payload sizes stay within [`LimitsConfig`]
//! - recipients are addresses of the right chain or well-formed aliases
//! - data entry keys are unique

use std::collections::BTreeSet;

use crate::codec::primitives::{parse_alias, ALIAS_PREFIX};
use crate::codec::schema::encode_entries;
use crate::config::LimitsConfig;
use crate::crypto::{
    base58_decode, base64_decode, is_valid_address, keys::PUBLIC_KEY_LEN, DIGEST_LEN,
};
use crate::errors::{TesseraError, TesseraResult};
use crate::model::{
    AuthRequest, BurnTx, CancelOrder, CustomData, CustomPayload, DataEntry, DataTx, DataValue,
    IssueTx, Order, ReissueTx, SignableObject, Transaction, TransferTx,
};

/// Validator bound to a set of limits.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    pub limits: LimitsConfig,
}

impl Validator {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    pub fn validate(&self, obj: &SignableObject) -> TesseraResult<()> {
        match obj {
            SignableObject::Transaction(tx) => self.transaction(tx),
            SignableObject::Order(o) => self.order(o),
            SignableObject::CancelOrder(c) => self.cancel_order(c),
            SignableObject::Auth(a) => self.auth(a),
            SignableObject::CustomData(d) => self.custom_data(d),
        }
    }

    pub fn transaction(&self, tx: &Transaction) -> TesseraResult<()> {
        match tx {
            Transaction::Issue(t) => self.issue(t),
            Transaction::Transfer(t) => self.transfer(t),
            Transaction::Reissue(t) => self.reissue(t),
            Transaction::Burn(t) => self.burn(t),
            Transaction::Data(t) => self.data(t),
        }
    }

    pub fn issue(&self, t: &IssueTx) -> TesseraResult<()> {
        let c = Check("issue");
        c.public_key("senderPublicKey", &t.sender_public_key)?;
        c.positive("fee", t.fee)?;
        c.positive("timestamp", t.timestamp)?;
        c.positive("quantity", t.quantity)?;
        let l = &self.limits;
        c.byte_len(
            "name",
            &t.name,
            l.min_asset_name_bytes..=l.max_asset_name_bytes,
        )?;
        c.byte_len("description", &t.description, 0..=l.max_description_bytes)?;
        if t.decimals > l.max_decimals {
            return Err(c.fail(
                "decimals",
                t.decimals,
                format!("must be at most {}", l.max_decimals),
            ));
        }
        if let Some(script) = &t.script {
            c.base64("script", script)?;
        }
        Ok(())
    }

    pub fn transfer(&self, t: &TransferTx) -> TesseraResult<()> {
        let c = Check("transfer");
        c.public_key("senderPublicKey", &t.sender_public_key)?;
        c.positive("fee", t.fee)?;
        c.positive("timestamp", t.timestamp)?;
        c.positive("amount", t.amount)?;
        c.optional_digest("assetId", t.asset_id.as_deref())?;
        c.optional_digest("feeAssetId", t.fee_asset_id.as_deref())?;

        let attachment = base58_decode(&t.attachment)
            .map_err(|_| c.fail("attachment", &t.attachment, "must be base58"))?;
        if attachment.len() > self.limits.max_attachment_bytes {
            return Err(c.fail(
                "attachment",
                attachment.len(),
                format!("must be at most {} bytes", self.limits.max_attachment_bytes),
            ));
        }

        self.recipient(&c, &t.recipient, t.chain_id)
    }

    pub fn reissue(&self, t: &ReissueTx) -> TesseraResult<()> {
        let c = Check("reissue");
        c.public_key("senderPublicKey", &t.sender_public_key)?;
        c.positive("fee", t.fee)?;
        c.positive("timestamp", t.timestamp)?;
        c.digest("assetId", &t.asset_id)?;
        c.positive("quantity", t.quantity)
    }

    pub fn burn(&self, t: &BurnTx) -> TesseraResult<()> {
        let c = Check("burn");
        c.public_key("senderPublicKey", &t.sender_public_key)?;
        c.positive("fee", t.fee)?;
        c.positive("timestamp", t.timestamp)?;
        c.digest("assetId", &t.asset_id)?;
        if t.amount < 0 {
            return Err(c.fail("amount", t.amount, "must not be negative"));
        }
        Ok(())
    }

    pub fn data(&self, t: &DataTx) -> TesseraResult<()> {
        let c = Check("data");
        c.public_key("senderPublicKey", &t.sender_public_key)?;
        c.positive("fee", t.fee)?;
        c.positive("timestamp", t.timestamp)?;
        self.entries(&c, &t.data)
    }

    pub fn order(&self, o: &Order) -> TesseraResult<()> {
        let c = Check("order");
        c.public_key("senderPublicKey", &o.sender_public_key)?;
        c.public_key("matcherPublicKey", &o.matcher_public_key)?;
        c.positive("price", o.price)?;
        c.positive("amount", o.amount)?;
        c.positive("matcherFee", o.matcher_fee)?;
        c.positive("timestamp", o.timestamp)?;

        let pair = &o.asset_pair;
        c.optional_digest("amountAsset", pair.amount_asset.as_deref())?;
        c.optional_digest("priceAsset", pair.price_asset.as_deref())?;
        if pair.amount_asset == pair.price_asset {
            return Err(c.fail(
                "assetPair",
                pair.amount_asset.as_deref().unwrap_or("NATIVE"),
                "amount and price assets must differ",
            ));
        }
        c.optional_digest("matcherFeeAssetId", o.matcher_fee_asset_id.as_deref())?;

        if o.expiration <= o.timestamp {
            return Err(c.fail("expiration", o.expiration, "must be after timestamp"));
        }
        let lifetime = o.expiration - o.timestamp;
        if lifetime > self.limits.max_order_lifetime_ms {
            return Err(c.fail(
                "expiration",
                o.expiration,
                format!(
                    "must be at most {} ms after timestamp",
                    self.limits.max_order_lifetime_ms
                ),
            ));
        }
        Ok(())
    }

    pub fn cancel_order(&self, x: &CancelOrder) -> TesseraResult<()> {
        let c = Check("cancel-order");
        c.public_key("sender", &x.sender)?;
        c.digest("orderId", &x.order_id)
    }

    pub fn auth(&self, a: &AuthRequest) -> TesseraResult<()> {
        let c = Check("auth");
        c.public_key("publicKey", &a.public_key)?;
        if a.host.trim().is_empty() {
            return Err(c.fail("host", &a.host, "must not be empty"));
        }
        Ok(())
    }

    pub fn custom_data(&self, d: &CustomData) -> TesseraResult<()> {
        let c = Check("custom-data");
        c.public_key("publicKey", &d.public_key)?;
        match &d.payload {
            CustomPayload::V1 { binary } => c.base64("binary", binary).map(|_| ()),
            CustomPayload::V2 { data } => self.entries(&c, data),
        }
    }

    fn recipient(
        &self,
        c: &Check,
        recipient: &str,
        chain_id: crate::model::ChainId,
    ) -> TesseraResult<()> {
        let Some(rest) = recipient.strip_prefix(ALIAS_PREFIX) else {
            if is_valid_address(recipient, Some(chain_id)) {
                return Ok(());
            }
            return Err(c.fail(
                "recipient",
                recipient,
                format!("not a valid address for chain {chain_id}"),
            ));
        };

        let (alias_chain, name) =
            parse_alias(rest).map_err(|_| c.fail("recipient", recipient, "malformed alias"))?;
        if alias_chain != chain_id {
            return Err(c.fail(
                "recipient",
                recipient,
                format!("alias belongs to chain {alias_chain}, expected {chain_id}"),
            ));
        }
        let len = name.chars().count();
        let l = &self.limits;
        if len < l.min_alias_chars || len > l.max_alias_chars {
            return Err(c.fail(
                "recipient",
                recipient,
                format!(
                    "alias must be {} to {} characters",
                    l.min_alias_chars, l.max_alias_chars
                ),
            ));
        }
        if !name.chars().all(is_alias_char) {
            return Err(c.fail(
                "recipient",
                recipient,
                "alias may only contain lowercase letters, digits and -_.@",
            ));
        }
        Ok(())
    }

    fn entries(&self, c: &Check, entries: &[DataEntry]) -> TesseraResult<()> {
        let l = &self.limits;
        if entries.is_empty() || entries.len() > l.max_data_entries {
            return Err(c.fail(
                "data",
                entries.len(),
                format!("must hold 1 to {} entries", l.max_data_entries),
            ));
        }

        let mut seen = BTreeSet::new();
        for entry in entries {
            c.byte_len("data.key", &entry.key, 1..=l.max_data_key_bytes)?;
            if !seen.insert(entry.key.as_str()) {
                return Err(c.fail("data.key", &entry.key, "duplicate key"));
            }
            if let DataValue::Binary(v) = &entry.value {
                c.base64("data.value", v)?;
            }
        }

        let mut payload = Vec::new();
        encode_entries(entries, &mut payload)
            .map_err(|e| c.fail("data", entries.len(), e.to_string()))?;
        if payload.len() > l.max_data_bytes {
            return Err(c.fail(
                "data",
                payload.len(),
                format!("payload must be at most {} bytes", l.max_data_bytes),
            ));
        }
        Ok(())
    }
}

fn is_alias_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '-' | '_' | '.' | '@')
}

/// Field checks scoped to one kind.
struct Check(&'static str);

impl Check {
    fn fail(&self, field: &str, value: impl ToString, reason: impl Into<String>) -> TesseraError {
        TesseraError::validation(self.0, field, value, reason)
    }

    fn positive(&self, field: &str, v: i64) -> TesseraResult<()> {
        if v <= 0 {
            return Err(self.fail(field, v, "must be positive"));
        }
        Ok(())
    }

    fn fixed_base58(&self, field: &str, s: &str, len: usize) -> TesseraResult<()> {
        match base58_decode(s) {
            Ok(bytes) if bytes.len() == len => Ok(()),
            Ok(bytes) => Err(self.fail(
                field,
                s,
                format!("must decode to {len} bytes, got {}", bytes.len()),
            )),
            Err(_) => Err(self.fail(field, s, "must be base58")),
        }
    }

    fn public_key(&self, field: &str, s: &str) -> TesseraResult<()> {
        self.fixed_base58(field, s, PUBLIC_KEY_LEN)
    }

    fn digest(&self, field: &str, s: &str) -> TesseraResult<()> {
        self.fixed_base58(field, s, DIGEST_LEN)
    }

    fn optional_digest(&self, field: &str, s: Option<&str>) -> TesseraResult<()> {
        s.map_or(Ok(()), |s| self.digest(field, s))
    }

    fn base64(&self, field: &str, s: &str) -> TesseraResult<Vec<u8>> {
        base64_decode(s).map_err(|_| self.fail(field, s, "must be base64"))
    }

    fn byte_len(
        &self,
        field: &str,
        s: &str,
        range: std::ops::RangeInclusive<usize>,
    ) -> TesseraResult<()> {
        if !range.contains(&s.len()) {
            return Err(self.fail(
                field,
                s,
                format!("length must be {} to {} bytes", range.start(), range.end()),
            ));
        }
        Ok(())
    }
}

/// Validate with default limits.
pub fn validate(obj: &SignableObject) -> TesseraResult<()> {
    Validator::default().validate(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{address_from_seed, base58_encode, public_key};
    use crate::model::{AssetPair, ChainId, OrderType};
    use crate::proofs::ProofList;
    use assert_matches::assert_matches;

    fn asset(b: u8) -> String {
        base58_encode(&[b; 32])
    }

    fn transfer(recipient: String) -> TransferTx {
        TransferTx {
            tx_type: 4,
            version: 2,
            chain_id: ChainId::TESTNET,
            sender_public_key: public_key("a"),
            recipient,
            asset_id: None,
            fee_asset_id: None,
            amount: 1,
            attachment: String::new(),
            fee: 100_000,
            timestamp: 1,
            proofs: ProofList::new(),
            id: String::new(),
        }
    }

    fn field_of(e: TesseraError) -> String {
        match e {
            TesseraError::Validation { field, .. } => field,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn recipient_rules() {
        let v = Validator::default();
        v.transfer(&transfer(address_from_seed("b", ChainId::TESTNET))).unwrap();
        v.transfer(&transfer("alias:T:good.alias".into())).unwrap();

        let wrong_chain = transfer(address_from_seed("b", ChainId::MAINNET));
        assert_eq!(field_of(v.transfer(&wrong_chain).unwrap_err()), "recipient");
        assert!(v.transfer(&transfer("alias:T:Bad".into())).is_err());
        assert!(v.transfer(&transfer("alias:M:good.alias".into())).is_err());
    }

    #[test]
    fn long_attachment_rejected() {
        let mut t = transfer(address_from_seed("b", ChainId::TESTNET));
        t.attachment = base58_encode(&[1u8; 141]);
        let e = Validator::default().transfer(&t).unwrap_err();
        assert_eq!(field_of(e), "attachment");
    }

    #[test]
    fn duplicate_data_keys_rejected() {
        let t = DataTx {
            tx_type: 12,
            version: 1,
            chain_id: ChainId::TESTNET,
            sender_public_key: public_key("a"),
            data: vec![DataEntry::integer("k", 1), DataEntry::boolean("k", true)],
            fee: 100_000,
            timestamp: 1,
            proofs: ProofList::new(),
            id: String::new(),
        };
        let e = Validator::default().data(&t).unwrap_err();
        assert_matches!(
            e,
            TesseraError::Validation { ref reason, .. } if reason == "duplicate key"
        );
    }

    #[test]
    fn order_rules() {
        let base = Order {
            version: 3,
            sender_public_key: public_key("a"),
            matcher_public_key: public_key("m"),
            asset_pair: AssetPair {
                amount_asset: Some(asset(1)),
                price_asset: None,
            },
            order_type: OrderType::Buy,
            price: 10,
            amount: 10,
            timestamp: 1_000,
            expiration: 2_000,
            matcher_fee: 300_000,
            matcher_fee_asset_id: None,
            proofs: ProofList::new(),
            id: String::new(),
        };
        let v = Validator::default();
        v.order(&base).unwrap();

        let mut same_assets = base.clone();
        same_assets.asset_pair.price_asset = Some(asset(1));
        assert_eq!(field_of(v.order(&same_assets).unwrap_err()), "assetPair");

        let mut too_long = base.clone();
        too_long.expiration = base.timestamp + 31 * 24 * 60 * 60 * 1000;
        assert_eq!(field_of(v.order(&too_long).unwrap_err()), "expiration");

        let mut expired = base;
        expired.expiration = expired.timestamp;
        assert_eq!(field_of(v.order(&expired).unwrap_err()), "expiration");
    }

    #[test]
    fn message_carries_value() {
        let b = BurnTx {
            tx_type: 6,
            version: 2,
            chain_id: ChainId::TESTNET,
            sender_public_key: public_key("a"),
            asset_id: asset(2),
            amount: -5,
            fee: 100_000,
            timestamp: 1,
            proofs: ProofList::new(),
            id: String::new(),
        };
        let e = Validator::default().burn(&b).unwrap_err();
        assert_eq!(e.to_string(), "invalid burn.amount = -5: must not be negative");
    }
}
