//! Matcher orders and order cancellations.

use serde::{Deserialize, Serialize};

use super::{impl_signable, MAX_PROOFS};
use crate::proofs::{self, ProofList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Buy,
    Sell,
}

impl OrderType {
    pub fn byte(self) -> u8 {
        match self {
            OrderType::Buy => 0,
            OrderType::Sell => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Buy => "buy",
            OrderType::Sell => "sell",
        }
    }
}

/// Traded pair; `None` is the native token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPair {
    pub amount_asset: Option<String>,
    pub price_asset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub version: u8,
    pub sender_public_key: String,
    pub matcher_public_key: String,
    pub asset_pair: AssetPair,
    pub order_type: OrderType,
    pub price: i64,
    pub amount: i64,
    pub timestamp: i64,
    pub expiration: i64,
    pub matcher_fee: i64,
    /// Only serialized by version 3.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matcher_fee_asset_id: Option<String>,
    #[serde(default)]
    pub proofs: ProofList,
    #[serde(default)]
    pub id: String,
}

impl Order {
    pub fn version(&self) -> u8 {
        self.version
    }
}

impl_signable!(Order, kind: "order", key: sender_public_key, id: id, limit: |_o| MAX_PROOFS);

/// Request to cancel a previously submitted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrder {
    /// Base58 public key of the order owner.
    pub sender: String,
    pub order_id: String,
    #[serde(rename = "signature", default, with = "proofs::as_signature")]
    pub proofs: ProofList,
    #[serde(default)]
    pub hash: String,
}

impl CancelOrder {
    pub fn version(&self) -> u8 {
        1
    }
}

impl_signable!(CancelOrder, kind: "cancel-order", key: sender, id: hash, limit: |_c| 1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_json_uses_signature_field() {
        let mut c = CancelOrder {
            sender: "pk".into(),
            order_id: "oid".into(),
            proofs: ProofList::new(),
            hash: String::new(),
        };
        c.proofs.insert(None, "sig", 1).unwrap();
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["signature"], "sig");
        assert_eq!(v["orderId"], "oid");

        let back: CancelOrder = serde_json::from_value(v).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn order_type_json() {
        assert_eq!(serde_json::to_value(OrderType::Sell).unwrap(), "sell");
        assert_eq!(OrderType::Sell.byte(), 1);
    }
}
