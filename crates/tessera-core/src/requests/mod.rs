//! Construction functions.
//!
//! Each builder takes a parameter record plus [`Seeds`] and:
//! 1. fills defaults (version, chain id, timestamp = now, fee)
//! 2. resolves the public key (explicit, else from the first seed)
//! 3. validates the typed record
//! 4. computes the id and signs
//!
//! [`Factory`] carries the configuration; the free functions use the defaults.
//! Parameter records deserialize from camelCase JSON so the CLI can feed them
//! directly.

mod auth;
mod custom_data;
mod order;
mod tx;

use serde::Deserialize;

use crate::codec::SUPPORTED;
use crate::config::{validate_config, CoreConfig};
use crate::errors::{TesseraError, TesseraResult};
use crate::model::{ChainId, Signable};
use crate::proofs::Seeds;
use crate::sign;
use crate::validate::Validator;

pub use auth::AuthParams;
pub use custom_data::CustomDataParams;
pub use order::{CancelOrderParams, OrderParams, DEFAULT_ORDER_LIFETIME_MS};
pub use tx::{BurnParams, DataParams, IssueParams, ReissueParams, TransferParams};

/// Fields shared by every transaction request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonParams {
    #[serde(default)]
    pub sender_public_key: Option<String>,
    /// Explicit fee; must cover the minimum.
    #[serde(default)]
    pub fee: Option<i64>,
    /// Added to the minimum when no explicit fee is given.
    #[serde(default)]
    pub additional_fee: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub chain_id: Option<ChainId>,
    #[serde(default)]
    pub version: Option<u8>,
}

/// Builds signed objects under one configuration.
#[derive(Debug, Clone)]
pub struct Factory {
    config: CoreConfig,
    validator: Validator,
}

impl Default for Factory {
    fn default() -> Self {
        let config = CoreConfig::default();
        let validator = Validator::new(config.limits.clone());
        Self { config, validator }
    }
}

impl Factory {
    pub fn new(config: CoreConfig) -> TesseraResult<Self> {
        validate_config(&config)?;
        let validator = Validator::new(config.limits.clone());
        Ok(Self { config, validator })
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    fn chain_id(&self, requested: Option<ChainId>) -> ChainId {
        requested.unwrap_or(self.config.network.chain_id)
    }

    /// Resolve the key, run `check`, then sign. Shared tail of every builder.
    fn finish<S: Signable>(
        &self,
        obj: &mut S,
        seeds: &Seeds,
        check: impl FnOnce(&Validator, &S) -> TesseraResult<()>,
    ) -> TesseraResult<()> {
        sign::resolve_public_key(obj, seeds)?;
        check(&self.validator, obj)?;
        sign::sign(obj, seeds)
    }
}

/// Pick the requested version or the default, rejecting pairs without a layout.
fn pick_version(kind: &str, requested: Option<u8>, default: u8) -> TesseraResult<u8> {
    let version = requested.unwrap_or(default);
    if SUPPORTED.iter().any(|&(k, v)| k == kind && v == version) {
        Ok(version)
    } else {
        Err(TesseraError::unsupported_variant(kind, version))
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
    i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX)
}

pub fn issue(params: IssueParams, seeds: impl Into<Seeds>) -> TesseraResult<crate::model::IssueTx> {
    Factory::default().issue(params, seeds)
}

pub fn transfer(
    params: TransferParams,
    seeds: impl Into<Seeds>,
) -> TesseraResult<crate::model::TransferTx> {
    Factory::default().transfer(params, seeds)
}

pub fn reissue(
    params: ReissueParams,
    seeds: impl Into<Seeds>,
) -> TesseraResult<crate::model::ReissueTx> {
    Factory::default().reissue(params, seeds)
}

pub fn burn(params: BurnParams, seeds: impl Into<Seeds>) -> TesseraResult<crate::model::BurnTx> {
    Factory::default().burn(params, seeds)
}

pub fn data(params: DataParams, seeds: impl Into<Seeds>) -> TesseraResult<crate::model::DataTx> {
    Factory::default().data(params, seeds)
}

pub fn order(params: OrderParams, seeds: impl Into<Seeds>) -> TesseraResult<crate::model::Order> {
    Factory::default().order(params, seeds)
}

pub fn cancel_order(
    params: CancelOrderParams,
    seeds: impl Into<Seeds>,
) -> TesseraResult<crate::model::CancelOrder> {
    Factory::default().cancel_order(params, seeds)
}

pub fn auth(
    params: AuthParams,
    seeds: impl Into<Seeds>,
) -> TesseraResult<crate::model::AuthRequest> {
    Factory::default().auth(params, seeds)
}

pub fn custom_data(
    params: CustomDataParams,
    seeds: impl Into<Seeds>,
) -> TesseraResult<crate::model::CustomData> {
    Factory::default().custom_data(params, seeds)
}

/// Add proofs to an existing transaction.
///
/// A single seed appends at the lowest free index; an indexed list places
/// each proof at its position and fails on occupied slots.
pub fn sign_tx(
    tx: crate::model::Transaction,
    seeds: impl Into<Seeds>,
) -> TesseraResult<crate::model::Transaction> {
    sign::signed(tx, seeds)
}
