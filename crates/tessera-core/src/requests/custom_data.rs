//! Custom data builder.

use serde::Deserialize;

use super::Factory;
use crate::errors::TesseraResult;
use crate::model::{CustomData, CustomPayload, DataEntry};
use crate::proofs::{ProofList, Seeds};

#[derive(Debug, Clone)]
pub struct CustomDataParams {
    pub payload: CustomPayload,
    pub public_key: Option<String>,
}

impl CustomDataParams {
    /// v1 payload from a base64 blob.
    pub fn binary(binary: impl Into<String>) -> Self {
        Self {
            payload: CustomPayload::V1 {
                binary: binary.into(),
            },
            public_key: None,
        }
    }

    /// v2 payload from data entries.
    pub fn entries(data: Vec<DataEntry>) -> Self {
        Self {
            payload: CustomPayload::V2 { data },
            public_key: None,
        }
    }
}

impl<'de> Deserialize<'de> for CustomDataParams {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let d = CustomData::deserialize(deserializer)?;
        Ok(Self {
            payload: d.payload,
            public_key: (!d.public_key.is_empty()).then_some(d.public_key),
        })
    }
}

impl Factory {
    pub fn custom_data(
        &self,
        p: CustomDataParams,
        seeds: impl Into<Seeds>,
    ) -> TesseraResult<CustomData> {
        let seeds = seeds.into();
        let mut d = CustomData {
            payload: p.payload,
            public_key: p.public_key.unwrap_or_default(),
            proofs: ProofList::new(),
            hash: String::new(),
        };
        self.finish(&mut d, &seeds, |v, d| v.custom_data(d))?;
        Ok(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Signable;
    use crate::sign::verify;

    #[test]
    fn both_versions_sign() {
        let v1 = Factory::default()
            .custom_data(CustomDataParams::binary("base64:AQa3b8tH"), "seed")
            .unwrap();
        let v2 = Factory::default()
            .custom_data(
                CustomDataParams::entries(vec![DataEntry::string("k", "v")]),
                "seed",
            )
            .unwrap();
        assert_eq!(v1.version(), 1);
        assert_eq!(v2.version(), 2);
        assert!(verify(&v1, 0).unwrap());
        assert!(verify(&v2, 0).unwrap());
        assert_eq!(&v1.canonical_bytes().unwrap()[..4], &[0xff, 0xff, 0xff, 1]);
        assert_eq!(&v2.canonical_bytes().unwrap()[..4], &[0xff, 0xff, 0xff, 2]);
    }

    #[test]
    fn params_from_json() {
        let p: CustomDataParams =
            serde_json::from_value(serde_json::json!({"version": 1, "binary": "AQID"})).unwrap();
        assert!(p.public_key.is_none());
        assert!(matches!(p.payload, CustomPayload::V1 { .. }));
    }
}
