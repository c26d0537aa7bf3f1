//! Canonical binary encoding.
//!
//! - `primitives`: big-endian integers, length-prefixed strings and blobs,
//!   option flags, recipients, data entries
//! - `schema`: ordered field layouts and the [`Schematic`] trait
//! - `registry`: the layout of every supported (kind, version) pair
//!
//! [`serialize`] is the single entry point used by hashing and signing.

pub mod primitives;
pub mod registry;
pub mod schema;

use crate::errors::TesseraResult;
use crate::model::Signable;

pub use registry::SUPPORTED;
pub use schema::{Encoder, Field, Schema, Schematic};

/// Canonical bytes of any signable object. Pure and deterministic.
pub fn serialize<S: Signable + ?Sized>(obj: &S) -> TesseraResult<Vec<u8>> {
    obj.canonical_bytes()
}
