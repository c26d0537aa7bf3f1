//! Transport errors.

use thiserror::Error;

pub type NodeResult<T> = Result<T, NodeError>;

#[derive(Debug, Error)]
pub enum NodeError {
    /// The remote answered with a non-2xx status and a JSON error body.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        status: u16,
        /// Node/matcher error code, e.g. `307`.
        code: Option<i64>,
        message: String,
        body: serde_json::Value,
    },

    /// Connection failure, timeout, non-JSON error status or undecodable body.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(String),
}

impl NodeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Remote error code, when the remote gave one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rejected { code, .. } => *code,
            _ => None,
        }
    }

    /// Build a rejection from an error response body, if it is JSON.
    pub(crate) fn rejected(status: u16, body: &str) -> Option<Self> {
        let body: serde_json::Value = serde_json::from_str(body).ok()?;
        let code = body.get("error").and_then(serde_json::Value::as_i64);
        let message = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string());
        Some(Self::Rejected {
            status,
            code,
            message,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_reads_code_and_message() {
        let body = r#"{"error":307,"message":"State check failed"}"#;
        let e = NodeError::rejected(400, body).unwrap();
        assert_eq!(e.code(), Some(307));
        assert_eq!(e.to_string(), "request rejected with status 400: State check failed");
    }

    #[test]
    fn non_json_body_is_not_a_rejection() {
        assert!(NodeError::rejected(502, "<html>bad gateway</html>").is_none());
    }
}
