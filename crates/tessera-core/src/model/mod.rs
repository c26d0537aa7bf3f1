//! TESSERA data models.
//!
//! Every object that can be signed implements [`Signable`]:
//! - a kind name and version, which select the schema
//! - canonical bytes (produced by `crate::codec`, never by serde)
//! - a public key
//! - a sparse [`ProofList`]
//! - a content id (`id` for transactions and orders, `hash` for payloads)
//!
//! [`SignableObject`] is the closed sum over all kinds; dispatch on it is an
//! exhaustive match, so adding a kind is a compile-time change.
//!
//! Serde derives describe the JSON transport shape only. Canonical hashing
//! must never rely on `serde_json` output.

pub mod auth;
pub mod custom_data;
pub mod data_entry;
pub mod order;
pub mod tx;

use serde::{Deserialize, Serialize};

use crate::errors::TesseraResult;
use crate::proofs::ProofList;

pub use auth::AuthRequest;
pub use custom_data::{CustomData, CustomPayload};
pub use data_entry::{DataEntry, DataValue};
pub use order::{AssetPair, CancelOrder, Order, OrderType};
pub use tx::{BurnTx, DataTx, IssueTx, ReissueTx, Transaction, TransferTx};

/// Network discriminant byte, embedded in addresses and some transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u8);

impl ChainId {
    pub const MAINNET: ChainId = ChainId(b'M');
    pub const TESTNET: ChainId = ChainId(b'T');

    pub fn byte(self) -> u8 {
        self.0
    }

    /// Parse a single ASCII character (`"T"`) or a decimal byte (`"84"`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Some(ChainId(c as u8)),
            _ => s.parse::<u8>().ok().map(ChainId),
        }
    }
}

impl Default for ChainId {
    fn default() -> Self {
        Self::MAINNET
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_ascii_graphic() {
            write!(f, "{}", self.0 as char)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Common surface of every signable object.
pub trait Signable {
    /// Stable kind name (`"burn"`, `"order"`, ...).
    fn kind(&self) -> &'static str;

    fn version(&self) -> u8;

    /// The exact bytes that are hashed and signed.
    fn canonical_bytes(&self) -> TesseraResult<Vec<u8>>;

    /// Base58 public key of the owner. Empty before key resolution.
    fn public_key(&self) -> &str;

    fn set_public_key(&mut self, public_key: String);

    fn proofs(&self) -> &ProofList;

    fn proofs_mut(&mut self) -> &mut ProofList;

    /// Maximum number of proof slots for this kind and version.
    fn proof_limit(&self) -> usize;

    /// Content id (base58 hash of the canonical bytes).
    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);
}

/// Protocol proof limit for multi-proof shapes.
pub const MAX_PROOFS: usize = 8;

/// Implement [`Signable`] for a concrete record.
///
/// `key` names the public key field, `id` the content id field, `limit` is an
/// expression over `self` giving the proof limit.
macro_rules! impl_signable {
    ($ty:ty, kind: $kind:expr, key: $key:ident, id: $id:ident, limit: |$s:ident| $limit:expr) => {
        impl $crate::model::Signable for $ty {
            fn kind(&self) -> &'static str {
                $kind
            }

            fn version(&self) -> u8 {
                <$ty>::version(self)
            }

            fn canonical_bytes(&self) -> $crate::errors::TesseraResult<Vec<u8>> {
                <$ty as $crate::codec::schema::Schematic>::schema(<$ty>::version(self))?
                    .encode(self)
            }

            fn public_key(&self) -> &str {
                &self.$key
            }

            fn set_public_key(&mut self, public_key: String) {
                self.$key = public_key;
            }

            fn proofs(&self) -> &$crate::proofs::ProofList {
                &self.proofs
            }

            fn proofs_mut(&mut self) -> &mut $crate::proofs::ProofList {
                &mut self.proofs
            }

            fn proof_limit(&self) -> usize {
                let $s = self;
                $limit
            }

            fn id(&self) -> &str {
                &self.$id
            }

            fn set_id(&mut self, id: String) {
                self.$id = id;
            }
        }
    };
}

/// Implement [`Signable`] for an enum whose variants all wrap a `Signable`.
macro_rules! delegate_signable {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::model::Signable for $ty {
            fn kind(&self) -> &'static str {
                match self { $($ty::$variant(x) => x.kind(),)+ }
            }

            fn version(&self) -> u8 {
                match self { $($ty::$variant(x) => $crate::model::Signable::version(x),)+ }
            }

            fn canonical_bytes(&self) -> $crate::errors::TesseraResult<Vec<u8>> {
                match self { $($ty::$variant(x) => x.canonical_bytes(),)+ }
            }

            fn public_key(&self) -> &str {
                match self { $($ty::$variant(x) => x.public_key(),)+ }
            }

            fn set_public_key(&mut self, public_key: String) {
                match self { $($ty::$variant(x) => x.set_public_key(public_key),)+ }
            }

            fn proofs(&self) -> &$crate::proofs::ProofList {
                match self { $($ty::$variant(x) => x.proofs(),)+ }
            }

            fn proofs_mut(&mut self) -> &mut $crate::proofs::ProofList {
                match self { $($ty::$variant(x) => x.proofs_mut(),)+ }
            }

            fn proof_limit(&self) -> usize {
                match self { $($ty::$variant(x) => x.proof_limit(),)+ }
            }

            fn id(&self) -> &str {
                match self { $($ty::$variant(x) => x.id(),)+ }
            }

            fn set_id(&mut self, id: String) {
                match self { $($ty::$variant(x) => x.set_id(id),)+ }
            }
        }
    };
}

pub(crate) use delegate_signable;
pub(crate) use impl_signable;

/// Closed sum over every signable kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SignableObject {
    Transaction(Transaction),
    Order(Order),
    CancelOrder(CancelOrder),
    Auth(AuthRequest),
    CustomData(CustomData),
}

delegate_signable!(SignableObject {
    Transaction,
    Order,
    CancelOrder,
    Auth,
    CustomData,
});

/// Object family used when parsing untyped JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Transaction,
    Order,
    CancelOrder,
    Auth,
    CustomData,
}

impl ObjectKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tx" | "transaction" => Some(Self::Transaction),
            "order" => Some(Self::Order),
            "cancel-order" | "cancel_order" => Some(Self::CancelOrder),
            "auth" => Some(Self::Auth),
            "custom-data" | "custom_data" => Some(Self::CustomData),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transaction => "transaction",
            Self::Order => "order",
            Self::CancelOrder => "cancel-order",
            Self::Auth => "auth",
            Self::CustomData => "custom-data",
        }
    }
}

#[cfg(feature = "json")]
impl SignableObject {
    /// Parse transport JSON of a known family.
    ///
    /// Transactions dispatch on their `type` field; an undeclared type fails
    /// with `UnknownKind` before any encoding happens.
    pub fn from_json(kind: ObjectKind, value: serde_json::Value) -> TesseraResult<Self> {
        use crate::errors::TesseraError;

        fn parse<T: serde::de::DeserializeOwned>(
            kind: ObjectKind,
            value: serde_json::Value,
        ) -> TesseraResult<T> {
            serde_json::from_value(value).map_err(|e| {
                TesseraError::serialization(format!("invalid {} json: {e}", kind.as_str()))
            })
        }

        Ok(match kind {
            ObjectKind::Transaction => Self::Transaction(Transaction::from_json(value)?),
            ObjectKind::Order => Self::Order(parse(kind, value)?),
            ObjectKind::CancelOrder => Self::CancelOrder(parse(kind, value)?),
            ObjectKind::Auth => Self::Auth(parse(kind, value)?),
            ObjectKind::CustomData => Self::CustomData(parse(kind, value)?),
        })
    }
}

impl From<Transaction> for SignableObject {
    fn from(tx: Transaction) -> Self {
        Self::Transaction(tx)
    }
}

impl From<Order> for SignableObject {
    fn from(o: Order) -> Self {
        Self::Order(o)
    }
}

impl From<CancelOrder> for SignableObject {
    fn from(c: CancelOrder) -> Self {
        Self::CancelOrder(c)
    }
}

impl From<AuthRequest> for SignableObject {
    fn from(a: AuthRequest) -> Self {
        Self::Auth(a)
    }
}

impl From<CustomData> for SignableObject {
    fn from(d: CustomData) -> Self {
        Self::CustomData(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_id_parse() {
        assert_eq!(ChainId::parse("T"), Some(ChainId::TESTNET));
        assert_eq!(ChainId::parse("84"), Some(ChainId::TESTNET));
        assert_eq!(ChainId::parse("TT"), None);
        assert_eq!(ChainId::TESTNET.to_string(), "T");
    }

    #[test]
    fn object_kind_names_roundtrip() {
        for k in [
            ObjectKind::Transaction,
            ObjectKind::Order,
            ObjectKind::CancelOrder,
            ObjectKind::Auth,
            ObjectKind::CustomData,
        ] {
            assert_eq!(ObjectKind::parse(k.as_str()), Some(k));
        }
    }
}
