//! Order and cancellation builders.

use serde::Deserialize;

use super::{now_ms, pick_version, Factory};
use crate::errors::{TesseraError, TesseraResult};
use crate::fees::DEFAULT_MATCHER_FEE;
use crate::model::{AssetPair, CancelOrder, Order, OrderType};
use crate::proofs::{ProofList, Seeds};

/// Expiration used when the caller gives none: 29 days after the timestamp.
pub const DEFAULT_ORDER_LIFETIME_MS: i64 = 29 * 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderParams {
    #[serde(default)]
    pub version: Option<u8>,
    #[serde(default)]
    pub sender_public_key: Option<String>,
    pub matcher_public_key: String,
    #[serde(default)]
    pub amount_asset: Option<String>,
    #[serde(default)]
    pub price_asset: Option<String>,
    pub order_type: OrderType,
    pub price: i64,
    pub amount: i64,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub expiration: Option<i64>,
    #[serde(default)]
    pub matcher_fee: Option<i64>,
    /// Requires order version 3.
    #[serde(default)]
    pub matcher_fee_asset_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderParams {
    pub order_id: String,
    #[serde(default)]
    pub sender_public_key: Option<String>,
}

impl Factory {
    /// Build and sign an order.
    ///
    /// Without an explicit version, an order with a matcher fee asset is v3
    /// and any other order v2.
    pub fn order(&self, p: OrderParams, seeds: impl Into<Seeds>) -> TesseraResult<Order> {
        let seeds = seeds.into();
        let default_version = if p.matcher_fee_asset_id.is_some() { 3 } else { 2 };
        let version = pick_version("order", p.version, default_version)?;
        if version < 3 {
            if let Some(asset) = &p.matcher_fee_asset_id {
                return Err(TesseraError::validation(
                    "order",
                    "matcherFeeAssetId",
                    asset,
                    format!("not supported by order version {version}"),
                ));
            }
        }
        let timestamp = p.timestamp.unwrap_or_else(now_ms);

        let mut order = Order {
            version,
            sender_public_key: p.sender_public_key.unwrap_or_default(),
            matcher_public_key: p.matcher_public_key,
            asset_pair: AssetPair {
                amount_asset: p.amount_asset,
                price_asset: p.price_asset,
            },
            order_type: p.order_type,
            price: p.price,
            amount: p.amount,
            timestamp,
            expiration: p
                .expiration
                .unwrap_or_else(|| timestamp.saturating_add(DEFAULT_ORDER_LIFETIME_MS)),
            matcher_fee: p.matcher_fee.unwrap_or(DEFAULT_MATCHER_FEE),
            matcher_fee_asset_id: p.matcher_fee_asset_id,
            proofs: ProofList::new(),
            id: String::new(),
        };
        self.finish(&mut order, &seeds, |v, o| v.order(o))?;
        Ok(order)
    }

    pub fn cancel_order(
        &self,
        p: CancelOrderParams,
        seeds: impl Into<Seeds>,
    ) -> TesseraResult<CancelOrder> {
        let seeds = seeds.into();
        let mut cancel = CancelOrder {
            sender: p.sender_public_key.unwrap_or_default(),
            order_id: p.order_id,
            proofs: ProofList::new(),
            hash: String::new(),
        };
        self.finish(&mut cancel, &seeds, |v, c| v.cancel_order(c))?;
        Ok(cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{base58_encode, public_key};
    use crate::sign::verify;

    fn params() -> OrderParams {
        OrderParams {
            version: None,
            sender_public_key: None,
            matcher_public_key: public_key("matcher"),
            amount_asset: Some(base58_encode(&[1u8; 32])),
            price_asset: None,
            order_type: OrderType::Sell,
            price: 100,
            amount: 5,
            timestamp: Some(1_000),
            expiration: None,
            matcher_fee: None,
            matcher_fee_asset_id: None,
        }
    }

    #[test]
    fn order_defaults() {
        let o = Factory::default().order(params(), "trader").unwrap();
        assert_eq!(o.version, 2);
        assert_eq!(o.matcher_fee, DEFAULT_MATCHER_FEE);
        assert_eq!(o.expiration, 1_000 + DEFAULT_ORDER_LIFETIME_MS);
        assert!(verify(&o, 0).unwrap());
    }

    #[test]
    fn fee_asset_selects_v3() {
        let mut p = params();
        p.matcher_fee_asset_id = Some(base58_encode(&[2u8; 32]));
        let o = Factory::default().order(p, "trader").unwrap();
        assert_eq!(o.version, 3);
        assert!(o.matcher_fee_asset_id.is_some());
    }

    #[test]
    fn cancel_signs_order_id() {
        let o = Factory::default().order(params(), "trader").unwrap();
        let c = Factory::default()
            .cancel_order(
                CancelOrderParams {
                    order_id: o.id.clone(),
                    sender_public_key: None,
                },
                "trader",
            )
            .unwrap();
        assert_eq!(c.sender, o.sender_public_key);
        assert!(verify(&c, 0).unwrap());
    }
}
