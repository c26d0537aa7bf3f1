//! Transport configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{NodeError, NodeResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    pub node_url: String,
    pub matcher_url: String,
    /// Whole-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_url: "http://127.0.0.1:6869".to_string(),
            matcher_url: "http://127.0.0.1:6886".to_string(),
            timeout_ms: 30_000,
        }
    }
}

pub fn validate_config(cfg: &NodeConfig) -> NodeResult<()> {
    parse_base(&cfg.node_url)?;
    parse_base(&cfg.matcher_url)?;
    if cfg.timeout_ms == 0 {
        return Err(NodeError::config("timeout_ms must be > 0"));
    }
    Ok(())
}

/// Parse a base URL and make sure its path ends with `/`, so that joining a
/// relative endpoint appends instead of replacing the last segment.
pub(crate) fn parse_base(raw: &str) -> NodeResult<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|e| NodeError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(NodeError::InvalidUrl {
            url: raw.to_string(),
            reason: "expected an http(s) base url".to_string(),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        validate_config(&NodeConfig::default()).unwrap();
    }

    #[test]
    fn rejects_bad_urls_and_zero_timeout() {
        let mut cfg = NodeConfig::default();
        cfg.node_url = "not a url".into();
        assert!(matches!(validate_config(&cfg), Err(NodeError::InvalidUrl { .. })));

        let mut cfg = NodeConfig::default();
        cfg.matcher_url = "ftp://example.org".into();
        assert!(validate_config(&cfg).is_err());

        let mut cfg = NodeConfig::default();
        cfg.timeout_ms = 0;
        assert!(matches!(validate_config(&cfg), Err(NodeError::Config(_))));
    }

    #[test]
    fn base_path_gets_trailing_slash() {
        let url = parse_base("https://node.example.org/api").unwrap();
        assert_eq!(url.path(), "/api/");
        let joined = url.join("transactions/broadcast").unwrap();
        assert_eq!(joined.as_str(), "https://node.example.org/api/transactions/broadcast");
    }
}
