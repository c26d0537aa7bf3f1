use anyhow::{anyhow, Result};
use tessera_core::model::ChainId;
use tessera_core::proofs::Seeds;
use tessera_node::{validate_config, NodeConfig};

use crate::args::{Cli, Command, SeedArgs};

mod broadcast;
mod build;
mod keys;
mod serialize;
mod sign;
mod verify;

pub async fn dispatch(cli: Cli) -> Result<()> {
    let chain_id = parse_chain_id(&cli.chain_id)?;

    match &cli.command {
        Command::Build {
            kind,
            params,
            seeds,
        } => build::run(chain_id, kind, params, to_seeds(seeds)).await,
        Command::Sign { input, kind, seeds } => sign::run(input, kind, to_seeds(seeds)).await,
        Command::Serialize { input, kind } => serialize::run(input, kind).await,
        Command::Verify {
            input,
            kind,
            index,
            public_key,
        } => verify::run(input, kind, *index, public_key.as_deref()).await,
        Command::Keys { seed } => keys::run(seed, chain_id).await,
        Command::Broadcast {
            input,
            kind,
            amount_asset,
            price_asset,
        } => {
            let node_cfg = node_config(&cli)?;
            broadcast::run(
                &node_cfg,
                input,
                kind,
                amount_asset.as_deref(),
                price_asset.as_deref(),
            )
            .await
        }
    }
}

fn parse_chain_id(raw: &str) -> Result<ChainId> {
    ChainId::parse(raw).ok_or_else(|| anyhow!("invalid --chain-id `{raw}`"))
}

fn node_config(cli: &Cli) -> Result<NodeConfig> {
    let mut cfg = NodeConfig::default();
    if let Some(url) = &cli.node_url {
        cfg.node_url = url.clone();
    }
    if let Some(url) = &cli.matcher_url {
        cfg.matcher_url = url.clone();
    }
    if let Some(ms) = cli.timeout_ms {
        cfg.timeout_ms = ms;
    }
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Map `--seed`/`--index` onto proof placement.
pub(crate) fn to_seeds(args: &SeedArgs) -> Seeds {
    match (args.index, args.seeds.as_slice()) {
        (_, []) => Seeds::None,
        (None, [one]) => Seeds::Single(one.clone()),
        (start, many) => {
            let mut slots = vec![None; start.unwrap_or(0)];
            slots.extend(many.iter().cloned().map(Some));
            Seeds::Indexed(slots)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(seeds: &[&str], index: Option<usize>) -> SeedArgs {
        SeedArgs {
            seeds: seeds.iter().map(|s| s.to_string()).collect(),
            index,
        }
    }

    #[test]
    fn seed_placement() {
        assert_eq!(to_seeds(&args(&[], Some(3))), Seeds::None);
        assert_eq!(to_seeds(&args(&["a"], None)), Seeds::Single("a".into()));
        assert_eq!(
            to_seeds(&args(&["a"], Some(1))),
            Seeds::Indexed(vec![None, Some("a".into())])
        );
        assert_eq!(
            to_seeds(&args(&["a", "b"], None)),
            Seeds::Indexed(vec![Some("a".into()), Some("b".into())])
        );
    }

    fn cli(args: &[&str]) -> Cli {
        use clap::Parser;
        Cli::parse_from(std::iter::once("tessera").chain(args.iter().copied()))
    }

    #[test]
    fn node_url_is_checked_only_for_broadcast() {
        let keys = cli(&["keys", "some seed", "--node-url", "not a url"]);
        assert!(node_config(&keys).is_err());

        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        rt.block_on(dispatch(keys)).unwrap();

        let broadcast = cli(&["broadcast", "tx.json", "--node-url", "not a url"]);
        let err = rt.block_on(dispatch(broadcast)).unwrap_err();
        assert!(err.downcast_ref::<tessera_node::NodeError>().is_some());
    }

    #[test]
    fn chain_id_forms() {
        assert_eq!(parse_chain_id("T").unwrap(), ChainId::TESTNET);
        assert_eq!(parse_chain_id("84").unwrap(), ChainId::TESTNET);
        assert!(parse_chain_id("").is_err());
    }
}
