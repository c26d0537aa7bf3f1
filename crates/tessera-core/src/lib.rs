//! tessera-core
//!
//! Core primitives for TESSERA:
//! - Typed, versioned ledger objects (transactions, orders, cancellations,
//!   wallet authentication, custom data)
//! - Canonical binary serialization driven by per-version schemas
//! - Sparse multi-proof lists with explicit index placement
//! - Signing and verification over canonical bytes
//! - Pre-flight validation and fee computation
//!
//! The crate performs no I/O and never installs a tracing subscriber.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod fees;
pub mod model;
pub mod proofs;
pub mod requests;
pub mod sign;
pub mod validate;
pub mod version;

pub use crate::codec::serialize;
pub use crate::errors::{TesseraError, TesseraResult};
pub use crate::requests::{
    auth, burn, cancel_order, custom_data, data, issue, order, reissue, sign_tx, transfer,
};
pub use crate::sign::{verify, verify_with_key};

/// Transport-level constants shared with clients.
/// These must remain stable across versions.
pub mod wire {
    /// Stands for the native token where an asset id is expected (matcher URLs).
    pub const NATIVE_ASSET: &str = "NATIVE";
}

/// Convenience re-exports.
pub mod prelude {
    pub use crate::codec::{serialize, Schema, Schematic, SUPPORTED};
    pub use crate::config::{CoreConfig, LimitsConfig, NetworkConfig};
    pub use crate::crypto::{address, address_from_seed, hash_base58, public_key};
    pub use crate::model::{
        AssetPair, AuthRequest, BurnTx, CancelOrder, ChainId, CustomData, CustomPayload, DataEntry,
        DataTx, DataValue, IssueTx, ObjectKind, Order, OrderType, ReissueTx, Signable,
        SignableObject, Transaction, TransferTx,
    };
    pub use crate::proofs::{attach_proof, ProofList, Seeds};
    pub use crate::requests::{
        AuthParams, BurnParams, CancelOrderParams, CommonParams, CustomDataParams, DataParams,
        Factory, IssueParams, OrderParams, ReissueParams, TransferParams,
    };
    pub use crate::sign::{sign, signed, verify, verify_with_key};
    pub use crate::validate::Validator;
    pub use crate::{TesseraError, TesseraResult};
}
