use anyhow::{anyhow, Result};
use tessera_core::model::SignableObject;
use tessera_node::{MatcherClient, NodeClient, NodeConfig};

use crate::io::input;
use crate::output;

pub async fn run(
    cfg: &NodeConfig,
    input_path: &str,
    kind: &str,
    amount_asset: Option<&str>,
    price_asset: Option<&str>,
) -> Result<()> {
    match input::read_object(input_path, kind)? {
        SignableObject::Transaction(tx) => {
            let reply = NodeClient::from_config(cfg)?.broadcast(&tx).await?;
            output::print(&reply)
        }
        SignableObject::Order(order) => {
            let reply = MatcherClient::from_config(cfg)?.submit_order(&order).await?;
            output::print(&reply)
        }
        SignableObject::CancelOrder(cancel) => {
            let reply = MatcherClient::from_config(cfg)?
                .cancel_submitted_order(&cancel, amount_asset, price_asset)
                .await?;
            output::print(&reply)
        }
        SignableObject::Auth(_) | SignableObject::CustomData(_) => {
            Err(anyhow!("{kind} objects are signed locally and cannot be broadcast"))
        }
    }
}
