use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tessera_core::TesseraError;
use tessera_node::NodeError;

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOut {
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_code: Option<i64>,
    pub message: String,
}

impl ErrorOut {
    pub fn from_error(err: &anyhow::Error) -> Self {
        let (code, remote_code) = if let Some(e) = err.downcast_ref::<TesseraError>() {
            (e.code(), None)
        } else if let Some(e) = err.downcast_ref::<NodeError>() {
            ("transport", e.code())
        } else {
            ("error", None)
        };
        Self {
            code,
            remote_code,
            message: format!("{err:#}"),
        }
    }
}

pub fn print_error(err: &anyhow::Error) -> anyhow::Result<()> {
    print(&ErrorOut::from_error(err))
}

pub fn eprintln_line(msg: &str) {
    let _ = writeln!(io::stderr(), "{msg}");
}
