//! Type and version discriminants.
//!
//! This module centralizes parsing of the `type` byte of transactions and
//! the version numbers accepted for every kind. Unknown values fail with
//! stable errors: `UnknownKind` for types, `UnsupportedVariant` for versions.

use crate::errors::{TesseraError, TesseraResult};

/// Known transaction types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TxType {
    Issue = 3,
    Transfer = 4,
    Reissue = 5,
    Burn = 6,
    Data = 12,
}

impl TxType {
    pub const ALL: [TxType; 5] = [
        TxType::Issue,
        TxType::Transfer,
        TxType::Reissue,
        TxType::Burn,
        TxType::Data,
    ];

    /// Parse a type byte.
    pub fn from_u8(v: u8) -> TesseraResult<Self> {
        match v {
            3 => Ok(Self::Issue),
            4 => Ok(Self::Transfer),
            5 => Ok(Self::Reissue),
            6 => Ok(Self::Burn),
            12 => Ok(Self::Data),
            other => Err(TesseraError::unknown_kind(other)),
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Stable kind name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::Transfer => "transfer",
            Self::Reissue => "reissue",
            Self::Burn => "burn",
            Self::Data => "data",
        }
    }

    /// Version used when the caller does not pick one.
    pub fn default_version(self) -> u8 {
        match self {
            Self::Data => 1,
            _ => 2,
        }
    }
}

impl TryFrom<u8> for TxType {
    type Error = TesseraError;

    fn try_from(v: u8) -> TesseraResult<Self> {
        Self::from_u8(v)
    }
}

/// Fail with `UnknownKind` unless the stored type byte is the expected one.
pub fn require_type(actual: u8, expected: TxType) -> TesseraResult<()> {
    if actual == expected.as_u8() {
        Ok(())
    } else {
        Err(TesseraError::unknown_kind(actual))
    }
}

/// Fail with `UnsupportedVariant` unless `version` is in `supported`.
pub fn require_version(kind: &str, version: u8, supported: &[u8]) -> TesseraResult<()> {
    if supported.contains(&version) {
        Ok(())
    } else {
        Err(TesseraError::unsupported_variant(kind, version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parse_known_types() {
        for t in TxType::ALL {
            assert_eq!(TxType::from_u8(t.as_u8()).unwrap(), t);
        }
    }

    #[test]
    fn parse_unknown_type() {
        let e = TxType::from_u8(99).unwrap_err();
        assert_eq!(e.to_string(), "Unknown tx type: 99");
    }

    #[test]
    fn require_type_mismatch() {
        assert_matches!(
            require_type(99, TxType::Reissue),
            Err(TesseraError::UnknownKind { value }) if value == "99"
        );
        require_type(5, TxType::Reissue).unwrap();
    }

    #[test]
    fn require_version_err() {
        let e = require_version("order", 1, &[2, 3]).unwrap_err();
        assert!(e.to_string().contains("unsupported order version: 1"));
    }
}
