use anyhow::Result;
use tessera_core::model::Signable;
use tessera_core::proofs::Seeds;
use tessera_core::sign;
use tessera_core::validate::validate;

use crate::io::input;
use crate::output;

pub async fn run(input_path: &str, kind: &str, seeds: Seeds) -> Result<()> {
    let mut obj = input::read_object(input_path, kind)?;
    if seeds.is_empty() && !output::is_json() {
        output::eprintln_line("no --seed given: object is re-hashed but not signed");
    }

    sign::resolve_public_key(&mut obj, &seeds)?;
    validate(&obj)?;
    sign::sign(&mut obj, &seeds)?;

    tracing::info!(kind = obj.kind(), id = obj.id(), proofs = obj.proofs().len(), "signed");
    output::print(&obj)?;
    Ok(())
}
