use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use tessera_core::config::CoreConfig;
use tessera_core::model::{ChainId, SignableObject, Transaction};
use tessera_core::proofs::Seeds;
use tessera_core::requests::Factory;

use crate::io::input;
use crate::output;

pub async fn run(chain_id: ChainId, kind: &str, params_path: &str, seeds: Seeds) -> Result<()> {
    let params = input::read_json_file(params_path)?;
    let factory = Factory::new(CoreConfig::for_chain(chain_id))?;
    let obj = build(&factory, kind, params, seeds)?;
    output::print(&obj)?;
    Ok(())
}

fn parse<T: DeserializeOwned>(kind: &str, params: serde_json::Value) -> Result<T> {
    serde_json::from_value(params).map_err(|e| anyhow!("invalid {kind} params: {e}"))
}

pub(crate) fn build(
    factory: &Factory,
    kind: &str,
    params: serde_json::Value,
    seeds: Seeds,
) -> Result<SignableObject> {
    let obj: SignableObject = match kind {
        "issue" => Transaction::from(factory.issue(parse(kind, params)?, seeds)?).into(),
        "transfer" => Transaction::from(factory.transfer(parse(kind, params)?, seeds)?).into(),
        "reissue" => Transaction::from(factory.reissue(parse(kind, params)?, seeds)?).into(),
        "burn" => Transaction::from(factory.burn(parse(kind, params)?, seeds)?).into(),
        "data" => Transaction::from(factory.data(parse(kind, params)?, seeds)?).into(),
        "order" => factory.order(parse(kind, params)?, seeds)?.into(),
        "cancel-order" => factory.cancel_order(parse(kind, params)?, seeds)?.into(),
        "auth" => factory.auth(parse(kind, params)?, seeds)?.into(),
        "custom-data" => factory.custom_data(parse(kind, params)?, seeds)?.into(),
        other => return Err(anyhow!("unknown build kind `{other}`")),
    };
    Ok(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tessera_core::model::Signable;
    use tessera_core::sign::verify;

    #[test]
    fn builds_and_signs_burn() {
        let factory = Factory::new(CoreConfig::for_chain(ChainId::TESTNET)).unwrap();
        let params = json!({
            "assetId": "4wBqpZM9xaSheZzJSMawUKKwhdpChKbZ5eu5ky4Vigw",
            "amount": 1000,
            "timestamp": 1700000000000i64
        });
        let obj = build(&factory, "burn", params, Seeds::Single("cli seed".into())).unwrap();
        assert_eq!(obj.kind(), "burn");
        assert!(verify(&obj, 0).unwrap());
    }

    #[test]
    fn missing_seed_and_key_is_reported() {
        let factory = Factory::default();
        let params = json!({"orderId": "4wBqpZM9xaSheZzJSMawUKKwhdpChKbZ5eu5ky4Vigw"});
        let err = build(&factory, "cancel-order", params, Seeds::None).unwrap_err();
        assert_eq!(err.to_string(), "Please provide either seed or senderPublicKey");
    }

    #[test]
    fn unknown_kind() {
        assert!(build(&Factory::default(), "lease", json!({}), Seeds::None).is_err());
    }
}
