//! Node and matcher clients.
//!
//! Both clients POST the JSON transport shape of an already signed object and
//! decode the JSON reply. Error responses with a JSON body surface as
//! [`NodeError::Rejected`] so callers can match on the remote error code.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use tessera_core::model::{CancelOrder, Order, Signable, Transaction};
use tessera_core::wire::NATIVE_ASSET;

use crate::config::{parse_base, NodeConfig};
use crate::error::{NodeError, NodeResult};

/// Matcher acknowledgement, e.g. `{"status": "OrderAccepted", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherReply {
    pub status: String,
    /// Free text or, for accepted orders, the order as the matcher stored it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<serde_json::Value>,
    /// Everything else the matcher sent back.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone)]
struct Endpoint {
    http: Client,
    base: Url,
}

impl Endpoint {
    fn new(base: &str, timeout_ms: u64) -> NodeResult<Self> {
        if timeout_ms == 0 {
            return Err(NodeError::config("timeout_ms must be > 0"));
        }
        let base = parse_base(base)?;
        let http = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self { http, base })
    }

    fn url(&self, path: &str) -> NodeResult<Url> {
        self.base.join(path).map_err(|e| NodeError::InvalidUrl {
            url: format!("{}{path}", self.base),
            reason: e.to_string(),
        })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> NodeResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path)?;
        let body = serde_json::to_value(body)?;
        debug!(%url, "POST");

        let resp = self.http.post(url.clone()).json(&body).send().await?;
        let status = resp.status();
        let failure = match resp.error_for_status_ref() {
            Ok(_) => None,
            Err(e) => Some(e),
        };

        match failure {
            None => Ok(resp.json::<R>().await?),
            Some(err) => {
                let text = resp.text().await?;
                match NodeError::rejected(status.as_u16(), &text) {
                    Some(rejected) => {
                        warn!(
                            %url,
                            status = status.as_u16(),
                            code = ?rejected.code(),
                            "request rejected"
                        );
                        Err(rejected)
                    }
                    None => {
                        warn!(%url, status = status.as_u16(), "request failed");
                        Err(NodeError::Http(err))
                    }
                }
            }
        }
    }
}

/// Client for a ledger node.
#[derive(Debug, Clone)]
pub struct NodeClient {
    endpoint: Endpoint,
}

impl NodeClient {
    pub fn new(node_url: &str) -> NodeResult<Self> {
        Self::with_timeout(node_url, NodeConfig::default().timeout_ms)
    }

    pub fn with_timeout(node_url: &str, timeout_ms: u64) -> NodeResult<Self> {
        Ok(Self {
            endpoint: Endpoint::new(node_url, timeout_ms)?,
        })
    }

    pub fn from_config(cfg: &NodeConfig) -> NodeResult<Self> {
        Self::with_timeout(&cfg.node_url, cfg.timeout_ms)
    }

    pub fn base_url(&self) -> &Url {
        &self.endpoint.base
    }

    /// Broadcast a signed transaction. Returns the node's JSON echo.
    pub async fn broadcast(&self, tx: &Transaction) -> NodeResult<serde_json::Value> {
        info!(
            kind = tx.kind(),
            id = tx.id(),
            proofs = tx.proofs().len(),
            node = %self.endpoint.base,
            "broadcasting transaction"
        );
        self.endpoint.post("transactions/broadcast", tx).await
    }
}

/// Client for an order matcher.
#[derive(Debug, Clone)]
pub struct MatcherClient {
    endpoint: Endpoint,
}

impl MatcherClient {
    pub fn new(matcher_url: &str) -> NodeResult<Self> {
        Self::with_timeout(matcher_url, NodeConfig::default().timeout_ms)
    }

    pub fn with_timeout(matcher_url: &str, timeout_ms: u64) -> NodeResult<Self> {
        Ok(Self {
            endpoint: Endpoint::new(matcher_url, timeout_ms)?,
        })
    }

    pub fn from_config(cfg: &NodeConfig) -> NodeResult<Self> {
        Self::with_timeout(&cfg.matcher_url, cfg.timeout_ms)
    }

    pub fn base_url(&self) -> &Url {
        &self.endpoint.base
    }

    pub async fn submit_order(&self, order: &Order) -> NodeResult<MatcherReply> {
        info!(id = %order.id, order_type = order.order_type.as_str(), "submitting order");
        self.endpoint.post("matcher/orderbook", order).await
    }

    /// Cancel a previously submitted order. A missing asset stands for the
    /// native token.
    pub async fn cancel_submitted_order(
        &self,
        cancel: &CancelOrder,
        amount_asset: Option<&str>,
        price_asset: Option<&str>,
    ) -> NodeResult<MatcherReply> {
        let path = cancel_path(amount_asset, price_asset);
        info!(order_id = %cancel.order_id, %path, "cancelling order");
        self.endpoint.post(&path, cancel).await
    }
}

fn cancel_path(amount_asset: Option<&str>, price_asset: Option<&str>) -> String {
    format!(
        "matcher/orderbook/{}/{}/cancel",
        amount_asset.unwrap_or(NATIVE_ASSET),
        price_asset.unwrap_or(NATIVE_ASSET)
    )
}
