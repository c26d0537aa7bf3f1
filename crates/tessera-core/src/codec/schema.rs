//! Declarative byte layouts.
//!
//! A [`Schema`] is an ordered list of named fields, each paired with an
//! [`Encoder`] that knows how to pull a value out of the record and append its
//! bytes. Field order is the wire order; there is no other source of truth for
//! a layout.
//!
//! Accessors are plain `fn` pointers so a schema is data, cheap to build and
//! trivially inspectable (see [`Schema::field_names`]).

use crate::codec::primitives::{
    put_base58_blob, put_base58_fixed, put_base64_blob, put_bool, put_byte, put_data_value,
    put_entry_count, put_long, put_option, put_recipient, put_string,
};
use crate::crypto::{keys::PUBLIC_KEY_LEN, DIGEST_LEN};
use crate::errors::{TesseraError, TesseraResult};
use crate::model::DataEntry;
use crate::version::{require_type, TxType};

/// How one field is read from `T` and written to the output.
pub enum Encoder<T> {
    /// Constant bytes (leading markers, fixed versions, prefixes).
    Tag(&'static [u8]),
    /// One constant byte known only when the schema is built.
    Const(u8),
    /// Declared transaction type, checked against the expected kind.
    TypeByte(TxType, fn(&T) -> u8),
    Byte(fn(&T) -> u8),
    Bool(fn(&T) -> bool),
    Long(fn(&T) -> i64),
    /// Length-prefixed UTF-8.
    Str(fn(&T) -> &str),
    /// Base58 public key, 32 raw bytes.
    PublicKey(fn(&T) -> &str),
    /// Base58 asset or order id, 32 raw bytes.
    Digest(fn(&T) -> &str),
    OptionalDigest(fn(&T) -> Option<&str>),
    Base58Blob(fn(&T) -> &str),
    Base64Blob(fn(&T) -> &str),
    OptionalBase64(fn(&T) -> Option<&str>),
    Recipient(fn(&T) -> &str),
    /// Count followed by `key tag value` per entry.
    Entries(fn(&T) -> &[DataEntry]),
    /// Escape hatch for fields whose shape depends on the record itself.
    With(fn(&T, &mut Vec<u8>) -> TesseraResult<()>),
}

impl<T> Encoder<T> {
    pub fn encode(&self, obj: &T, out: &mut Vec<u8>) -> TesseraResult<()> {
        match self {
            Encoder::Tag(bytes) => out.extend_from_slice(bytes),
            Encoder::Const(b) => put_byte(out, *b),
            Encoder::TypeByte(expected, get) => {
                require_type(get(obj), *expected)?;
                put_byte(out, expected.as_u8());
            }
            Encoder::Byte(get) => put_byte(out, get(obj)),
            Encoder::Bool(get) => put_bool(out, get(obj)),
            Encoder::Long(get) => put_long(out, get(obj)),
            Encoder::Str(get) => put_string(out, get(obj))?,
            Encoder::PublicKey(get) => put_base58_fixed::<PUBLIC_KEY_LEN>(out, get(obj))?,
            Encoder::Digest(get) => put_base58_fixed::<DIGEST_LEN>(out, get(obj))?,
            Encoder::OptionalDigest(get) => {
                put_option(out, get(obj), put_base58_fixed::<DIGEST_LEN>)?
            }
            Encoder::Base58Blob(get) => put_base58_blob(out, get(obj))?,
            Encoder::Base64Blob(get) => put_base64_blob(out, get(obj))?,
            Encoder::OptionalBase64(get) => put_option(out, get(obj), put_base64_blob)?,
            Encoder::Recipient(get) => put_recipient(out, get(obj))?,
            Encoder::Entries(get) => encode_entries(get(obj), out)?,
            Encoder::With(f) => f(obj, out)?,
        }
        Ok(())
    }
}

/// Encode a data entry list: `u16` count, then `key tag value` per entry.
pub fn encode_entries(entries: &[DataEntry], out: &mut Vec<u8>) -> TesseraResult<()> {
    put_entry_count(out, entries)?;
    for entry in entries {
        put_string(out, &entry.key)?;
        put_data_value(out, &entry.value)?;
    }
    Ok(())
}

pub struct Field<T> {
    pub name: &'static str,
    pub encoder: Encoder<T>,
}

/// Ordered layout of one (kind, version) pair.
pub struct Schema<T> {
    kind: &'static str,
    version: u8,
    fields: Vec<Field<T>>,
}

impl<T> Schema<T> {
    pub fn new(kind: &'static str, version: u8) -> Self {
        Self {
            kind,
            version,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: &'static str, encoder: Encoder<T>) -> Self {
        self.fields.push(Field { name, encoder });
        self
    }

    /// `00 <type> <version>` header of versioned transactions.
    pub fn tx_header(self, tx_type: TxType, declared: fn(&T) -> u8) -> Self {
        let version = self.version;
        self.field("marker", Encoder::Tag(&[0]))
            .field("type", Encoder::TypeByte(tx_type, declared))
            .field("version", Encoder::Const(version))
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    pub fn encode(&self, obj: &T) -> TesseraResult<Vec<u8>> {
        let mut out = Vec::with_capacity(128);
        self.encode_into(obj, &mut out)?;
        Ok(out)
    }

    /// Append the encoding of `obj` to `out`.
    ///
    /// Decoding failures are reported with the kind, version and field name.
    pub fn encode_into(&self, obj: &T, out: &mut Vec<u8>) -> TesseraResult<()> {
        for field in &self.fields {
            field.encoder.encode(obj, out).map_err(|e| match e {
                TesseraError::InvalidArgument(msg) | TesseraError::Serialization(msg) => {
                    TesseraError::serialization(format!(
                        "{} v{} field `{}`: {msg}",
                        self.kind, self.version, field.name
                    ))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

impl<T> std::fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("kind", &self.kind)
            .field("version", &self.version)
            .field("fields", &self.field_names())
            .finish()
    }
}

/// Records with one schema per supported version.
pub trait Schematic: Sized {
    /// Fails with `UnsupportedVariant` for versions without a layout.
    fn schema(version: u8) -> TesseraResult<Schema<Self>>;
}
