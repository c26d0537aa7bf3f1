use anyhow::Result;
use serde::Serialize;
use tessera_core::model::Signable;
use tessera_core::sign::verify_with_key;

use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOut {
    pub ok: bool,
    pub index: usize,
    pub public_key: String,
}

pub async fn run(
    input_path: &str,
    kind: &str,
    index: usize,
    public_key: Option<&str>,
) -> Result<()> {
    let obj = input::read_object(input_path, kind)?;
    let key = public_key.unwrap_or(obj.public_key()).to_string();
    let ok = verify_with_key(&obj, index, &key)?;
    output::print(&VerifyOut {
        ok,
        index,
        public_key: key,
    })?;
    Ok(())
}
