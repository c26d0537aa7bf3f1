//! Minimum fees and fee composition.
//!
//! `fee = explicit` when the caller supplies one (it must cover the minimum),
//! otherwise `minimum + additional`.

use crate::errors::{TesseraError, TesseraResult};
use crate::version::TxType;

pub const ISSUE_FEE: i64 = 100_000_000;
pub const TRANSFER_FEE: i64 = 100_000;
pub const REISSUE_FEE: i64 = 100_000_000;
pub const BURN_FEE: i64 = 100_000;
/// Charged per started KiB of a data transaction.
pub const DATA_FEE_PER_KIB: i64 = 100_000;
pub const DEFAULT_MATCHER_FEE: i64 = 300_000;

const KIB: usize = 1024;

/// Minimum fee of a transaction type whose fee does not depend on its size.
///
/// Data transactions need their byte length; see [`data_fee`].
pub fn base_fee(tx_type: TxType) -> i64 {
    match tx_type {
        TxType::Issue => ISSUE_FEE,
        TxType::Transfer => TRANSFER_FEE,
        TxType::Reissue => REISSUE_FEE,
        TxType::Burn => BURN_FEE,
        TxType::Data => DATA_FEE_PER_KIB,
    }
}

/// Minimum fee of a data transaction of `len` unsigned bytes.
pub fn data_fee(len: usize) -> i64 {
    let kib = len.div_ceil(KIB).max(1);
    i64::try_from(kib).unwrap_or(i64::MAX).saturating_mul(DATA_FEE_PER_KIB)
}

/// Resolve the fee to put on an object.
pub fn compose_fee(
    kind: &str,
    minimum: i64,
    explicit: Option<i64>,
    additional: Option<i64>,
) -> TesseraResult<i64> {
    let additional = additional.unwrap_or(0);
    if additional < 0 {
        return Err(TesseraError::validation(
            kind,
            "additionalFee",
            additional,
            "must not be negative",
        ));
    }
    match explicit {
        Some(fee) if fee < minimum => Err(TesseraError::validation(
            kind,
            "fee",
            fee,
            format!("below the minimum fee of {minimum}"),
        )),
        Some(fee) => Ok(fee),
        None => minimum.checked_add(additional).ok_or_else(|| {
            TesseraError::validation(kind, "additionalFee", additional, "fee overflows i64")
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn additional_fee_is_added_to_minimum() {
        assert_eq!(compose_fee("burn", BURN_FEE, None, Some(100_000)).unwrap(), 200_000);
        assert_eq!(compose_fee("burn", BURN_FEE, None, None).unwrap(), 100_000);
    }

    #[test]
    fn explicit_fee_wins_but_must_cover_minimum() {
        assert_eq!(compose_fee("burn", BURN_FEE, Some(500_000), Some(1)).unwrap(), 500_000);
        assert_matches!(
            compose_fee("burn", BURN_FEE, Some(1), None),
            Err(TesseraError::Validation { ref field, .. }) if field == "fee"
        );
    }

    #[test]
    fn data_fee_counts_started_kib() {
        assert_eq!(data_fee(0), 100_000);
        assert_eq!(data_fee(1), 100_000);
        assert_eq!(data_fee(1024), 100_000);
        assert_eq!(data_fee(1025), 200_000);
    }
}
