use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tessera_core::model::{ObjectKind, SignableObject};

pub fn read_json_file<P: AsRef<Path>>(path: P) -> Result<serde_json::Value> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let v: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| anyhow!("invalid json in {}: {e}", path.display()))?;
    Ok(v)
}

pub fn parse_kind(kind: &str) -> Result<ObjectKind> {
    ObjectKind::parse(kind).ok_or_else(|| {
        anyhow!(
            "unknown object kind `{kind}` \
             (expected transaction|order|cancel-order|auth|custom-data)"
        )
    })
}

/// Load a signable object of the given family from a JSON file.
pub fn read_object<P: AsRef<Path>>(path: P, kind: &str) -> Result<SignableObject> {
    let kind = parse_kind(kind)?;
    let value = read_json_file(path)?;
    Ok(SignableObject::from_json(kind, value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn unknown_tx_type_surfaces_core_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"type": 99, "version": 1}}"#).unwrap();
        let err = read_object(f.path(), "transaction").unwrap_err();
        assert_eq!(err.to_string(), "Unknown tx type: 99");
    }

    #[test]
    fn bad_kind_and_bad_json() {
        assert!(parse_kind("ticket").is_err());

        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{not json").unwrap();
        assert!(read_json_file(f.path()).is_err());
    }
}
