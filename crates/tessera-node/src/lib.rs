//! tessera-node
//!
//! Thin async HTTP transport for signed TESSERA objects:
//! - broadcast transactions to a node
//! - submit orders to a matcher and cancel them
//!
//! Objects are sent as their JSON transport shape. Nothing here signs,
//! validates or retries; callers build objects with `tessera-core` first.

pub mod client;
pub mod config;
pub mod error;

pub use crate::client::{MatcherClient, MatcherReply, NodeClient};
pub use crate::config::{validate_config, NodeConfig};
pub use crate::error::{NodeError, NodeResult};
