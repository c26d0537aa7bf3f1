//! Byte layouts of every supported (kind, version) pair.
//!
//! Versioned transactions start with `00 <type> <version>`; the legacy v1
//! transfer starts with its bare type byte. Orders start with their version
//! byte. Custom data starts with `FF FF FF <version>`.
//!
//! These layouts are consensus-relevant: any change breaks every existing
//! signature. The golden tests in `tests/golden_bytes.rs` pin them.

use crate::codec::primitives::put_base64_blob;
use crate::codec::schema::{encode_entries, Encoder, Schema, Schematic};
use crate::errors::{TesseraError, TesseraResult};
use crate::model::auth::AUTH_PREFIX;
use crate::model::{
    AuthRequest, BurnTx, CancelOrder, CustomData, CustomPayload, DataTx, IssueTx, Order, ReissueTx,
    TransferTx,
};
use crate::version::{require_version, TxType};

/// Every (kind, version) pair with a layout.
pub const SUPPORTED: &[(&str, u8)] = &[
    ("issue", 2),
    ("transfer", 1),
    ("transfer", 2),
    ("reissue", 2),
    ("burn", 2),
    ("data", 1),
    ("order", 2),
    ("order", 3),
    ("cancel-order", 1),
    ("auth", 1),
    ("custom-data", 1),
    ("custom-data", 2),
];

/// Field names of a layout, in wire order.
pub fn field_names(kind: &str, version: u8) -> TesseraResult<Vec<&'static str>> {
    Ok(match kind {
        "issue" => IssueTx::schema(version)?.field_names(),
        "transfer" => TransferTx::schema(version)?.field_names(),
        "reissue" => ReissueTx::schema(version)?.field_names(),
        "burn" => BurnTx::schema(version)?.field_names(),
        "data" => DataTx::schema(version)?.field_names(),
        "order" => Order::schema(version)?.field_names(),
        "cancel-order" => CancelOrder::schema(version)?.field_names(),
        "auth" => AuthRequest::schema(version)?.field_names(),
        "custom-data" => CustomData::schema(version)?.field_names(),
        other => {
            return Err(TesseraError::invalid_argument(format!(
                "unknown object kind: {other}"
            )))
        }
    })
}

impl Schematic for IssueTx {
    fn schema(version: u8) -> TesseraResult<Schema<Self>> {
        require_version("issue", version, &[2])?;
        Ok(Schema::<Self>::new("issue", version)
            .tx_header(TxType::Issue, |t| t.tx_type)
            .field("chainId", Encoder::Byte(|t| t.chain_id.byte()))
            .field("senderPublicKey", Encoder::PublicKey(|t| t.sender_public_key.as_str()))
            .field("name", Encoder::Str(|t| t.name.as_str()))
            .field("description", Encoder::Str(|t| t.description.as_str()))
            .field("quantity", Encoder::Long(|t| t.quantity))
            .field("decimals", Encoder::Byte(|t| t.decimals))
            .field("reissuable", Encoder::Bool(|t| t.reissuable))
            .field("fee", Encoder::Long(|t| t.fee))
            .field("timestamp", Encoder::Long(|t| t.timestamp))
            .field("script", Encoder::OptionalBase64(|t| t.script.as_deref())))
    }
}

impl Schematic for TransferTx {
    fn schema(version: u8) -> TesseraResult<Schema<Self>> {
        let head = match version {
            1 => Schema::<Self>::new("transfer", 1)
                .field("type", Encoder::TypeByte(TxType::Transfer, |t| t.tx_type)),
            2 => Schema::<Self>::new("transfer", 2).tx_header(TxType::Transfer, |t| t.tx_type),
            v => return Err(TesseraError::unsupported_variant("transfer", v)),
        };
        Ok(head
            .field("senderPublicKey", Encoder::PublicKey(|t| t.sender_public_key.as_str()))
            .field("assetId", Encoder::OptionalDigest(|t| t.asset_id.as_deref()))
            .field("feeAssetId", Encoder::OptionalDigest(|t| t.fee_asset_id.as_deref()))
            .field("timestamp", Encoder::Long(|t| t.timestamp))
            .field("amount", Encoder::Long(|t| t.amount))
            .field("fee", Encoder::Long(|t| t.fee))
            .field("recipient", Encoder::Recipient(|t| t.recipient.as_str()))
            .field("attachment", Encoder::Base58Blob(|t| t.attachment.as_str())))
    }
}

impl Schematic for ReissueTx {
    fn schema(version: u8) -> TesseraResult<Schema<Self>> {
        require_version("reissue", version, &[2])?;
        Ok(Schema::<Self>::new("reissue", version)
            .tx_header(TxType::Reissue, |t| t.tx_type)
            .field("chainId", Encoder::Byte(|t| t.chain_id.byte()))
            .field("senderPublicKey", Encoder::PublicKey(|t| t.sender_public_key.as_str()))
            .field("assetId", Encoder::Digest(|t| t.asset_id.as_str()))
            .field("quantity", Encoder::Long(|t| t.quantity))
            .field("reissuable", Encoder::Bool(|t| t.reissuable))
            .field("fee", Encoder::Long(|t| t.fee))
            .field("timestamp", Encoder::Long(|t| t.timestamp)))
    }
}

impl Schematic for BurnTx {
    fn schema(version: u8) -> TesseraResult<Schema<Self>> {
        require_version("burn", version, &[2])?;
        Ok(Schema::<Self>::new("burn", version)
            .tx_header(TxType::Burn, |t| t.tx_type)
            .field("chainId", Encoder::Byte(|t| t.chain_id.byte()))
            .field("senderPublicKey", Encoder::PublicKey(|t| t.sender_public_key.as_str()))
            .field("assetId", Encoder::Digest(|t| t.asset_id.as_str()))
            .field("amount", Encoder::Long(|t| t.amount))
            .field("fee", Encoder::Long(|t| t.fee))
            .field("timestamp", Encoder::Long(|t| t.timestamp)))
    }
}

impl Schematic for DataTx {
    fn schema(version: u8) -> TesseraResult<Schema<Self>> {
        require_version("data", version, &[1])?;
        Ok(Schema::<Self>::new("data", version)
            .tx_header(TxType::Data, |t| t.tx_type)
            .field("senderPublicKey", Encoder::PublicKey(|t| t.sender_public_key.as_str()))
            .field("data", Encoder::Entries(|t| t.data.as_slice()))
            .field("timestamp", Encoder::Long(|t| t.timestamp))
            .field("fee", Encoder::Long(|t| t.fee)))
    }
}

impl Schematic for Order {
    fn schema(version: u8) -> TesseraResult<Schema<Self>> {
        let head = match version {
            2 => Schema::<Self>::new("order", 2).field("version", Encoder::Tag(&[2])),
            3 => Schema::<Self>::new("order", 3).field("version", Encoder::Tag(&[3])),
            v => return Err(TesseraError::unsupported_variant("order", v)),
        };
        let body = head
            .field("senderPublicKey", Encoder::PublicKey(|o| o.sender_public_key.as_str()))
            .field("matcherPublicKey", Encoder::PublicKey(|o| o.matcher_public_key.as_str()))
            .field("amountAsset", Encoder::OptionalDigest(|o| o.asset_pair.amount_asset.as_deref()))
            .field("priceAsset", Encoder::OptionalDigest(|o| o.asset_pair.price_asset.as_deref()))
            .field("orderType", Encoder::Byte(|o| o.order_type.byte()))
            .field("price", Encoder::Long(|o| o.price))
            .field("amount", Encoder::Long(|o| o.amount))
            .field("timestamp", Encoder::Long(|o| o.timestamp))
            .field("expiration", Encoder::Long(|o| o.expiration))
            .field("matcherFee", Encoder::Long(|o| o.matcher_fee));
        Ok(if version == 3 {
            body.field(
                "matcherFeeAssetId",
                Encoder::OptionalDigest(|o| o.matcher_fee_asset_id.as_deref()),
            )
        } else {
            body
        })
    }
}

impl Schematic for CancelOrder {
    fn schema(version: u8) -> TesseraResult<Schema<Self>> {
        require_version("cancel-order", version, &[1])?;
        Ok(Schema::<Self>::new("cancel-order", version)
            .field("sender", Encoder::PublicKey(|c| c.sender.as_str()))
            .field("orderId", Encoder::Digest(|c| c.order_id.as_str())))
    }
}

impl Schematic for AuthRequest {
    fn schema(version: u8) -> TesseraResult<Schema<Self>> {
        require_version("auth", version, &[1])?;
        Ok(Schema::<Self>::new("auth", version)
            .field("prefix", Encoder::Str(|_| AUTH_PREFIX))
            .field("host", Encoder::Str(|a| a.host.as_str()))
            .field("data", Encoder::Str(|a| a.data.as_str())))
    }
}

impl Schematic for CustomData {
    fn schema(version: u8) -> TesseraResult<Schema<Self>> {
        Ok(match version {
            1 => Schema::<Self>::new("custom-data", 1)
                .field("marker", Encoder::Tag(&[0xff, 0xff, 0xff, 1]))
                .field(
                    "binary",
                    Encoder::With(|d, out| match &d.payload {
                        CustomPayload::V1 { binary } => put_base64_blob(out, binary),
                        CustomPayload::V2 { .. } => Err(payload_mismatch(1)),
                    }),
                ),
            2 => Schema::<Self>::new("custom-data", 2)
                .field("marker", Encoder::Tag(&[0xff, 0xff, 0xff, 2]))
                .field(
                    "data",
                    Encoder::With(|d, out| match &d.payload {
                        CustomPayload::V2 { data } => encode_entries(data, out),
                        CustomPayload::V1 { .. } => Err(payload_mismatch(2)),
                    }),
                ),
            v => return Err(TesseraError::unsupported_variant("custom-data", v)),
        })
    }
}

fn payload_mismatch(version: u8) -> TesseraError {
    TesseraError::invariant(format!(
        "custom data v{version} layout applied to a payload of another version"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn every_supported_pair_resolves() {
        for (kind, version) in SUPPORTED {
            let names = field_names(kind, *version).unwrap();
            assert!(!names.is_empty(), "{kind} v{version}");
        }
    }

    #[test]
    fn unknown_versions_are_rejected() {
        assert_matches!(
            BurnTx::schema(1),
            Err(TesseraError::UnsupportedVariant { version: 1, .. })
        );
        assert_matches!(
            Order::schema(1),
            Err(TesseraError::UnsupportedVariant { version: 1, .. })
        );
        assert_matches!(
            CustomData::schema(3),
            Err(TesseraError::UnsupportedVariant { version: 3, .. })
        );
    }

    #[test]
    fn order_v3_adds_fee_asset() {
        let v2 = field_names("order", 2).unwrap();
        let v3 = field_names("order", 3).unwrap();
        assert_eq!(v3.len(), v2.len() + 1);
        assert_eq!(v3.last(), Some(&"matcherFeeAssetId"));
    }

    #[test]
    fn transfer_versions_differ_only_in_header() {
        let v1 = field_names("transfer", 1).unwrap();
        let v2 = field_names("transfer", 2).unwrap();
        assert_eq!(v1[1..], v2[3..]);
    }
}
