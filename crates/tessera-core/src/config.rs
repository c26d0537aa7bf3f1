//! Configuration structures for tessera-core.
//!
//! The core crate itself does not read environment variables. All configuration
//! must be provided explicitly by the caller (the CLI maps its flags onto these
//! structs).

use crate::errors::{TesseraError, TesseraResult};
use crate::model::ChainId;

/// Global configuration container.
#[derive(Debug, Clone, Default)]
pub struct CoreConfig {
    pub network: NetworkConfig,
    pub limits: LimitsConfig,
}

impl CoreConfig {
    pub fn for_chain(chain_id: ChainId) -> Self {
        Self {
            network: NetworkConfig { chain_id },
            ..Self::default()
        }
    }
}

/// Network selection.
#[derive(Debug, Clone, Default)]
pub struct NetworkConfig {
    /// Used when a request does not carry its own chain id.
    pub chain_id: ChainId,
}

/// Structural limits enforced by the validator.
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    pub min_asset_name_bytes: usize,
    pub max_asset_name_bytes: usize,
    pub max_description_bytes: usize,
    pub max_decimals: u8,
    pub max_attachment_bytes: usize,
    pub min_alias_chars: usize,
    pub max_alias_chars: usize,
    pub max_data_entries: usize,
    pub max_data_key_bytes: usize,
    pub max_data_bytes: usize,
    pub max_order_lifetime_ms: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_asset_name_bytes: 4,
            max_asset_name_bytes: 16,
            max_description_bytes: 1000,
            max_decimals: 8,
            max_attachment_bytes: 140,
            min_alias_chars: 4,
            max_alias_chars: 30,
            max_data_entries: 100,
            max_data_key_bytes: 400,
            max_data_bytes: 150 * 1024,
            max_order_lifetime_ms: 30 * 24 * 60 * 60 * 1000,
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &CoreConfig) -> TesseraResult<()> {
    if !cfg.network.chain_id.byte().is_ascii_graphic() {
        return Err(TesseraError::invalid_argument(
            "chain id must be a printable ASCII byte",
        ));
    }

    let l = &cfg.limits;
    if l.min_asset_name_bytes > l.max_asset_name_bytes {
        return Err(TesseraError::invalid_argument(
            "min_asset_name_bytes must not exceed max_asset_name_bytes",
        ));
    }

    if l.min_alias_chars > l.max_alias_chars {
        return Err(TesseraError::invalid_argument(
            "min_alias_chars must not exceed max_alias_chars",
        ));
    }

    if l.max_data_entries == 0 {
        return Err(TesseraError::invalid_argument(
            "max_data_entries must be greater than zero",
        ));
    }

    if l.max_order_lifetime_ms <= 0 {
        return Err(TesseraError::invalid_argument(
            "max_order_lifetime_ms must be positive",
        ));
    }

    Ok(())
}
