//! Sparse proof lists and seed assignment.
//!
//! A [`ProofList`] maps a non-negative index to a base58 signature. It holds:
//! - at most one proof per index
//! - no proof at or above the owning kind's limit
//!
//! Indices need not be contiguous. On the wire the list is a JSON array in
//! index order where gaps are empty strings.
//!
//! [`Seeds`] describes which seeds sign and where their proofs land:
//! - `Seeds::Single`: one seed, appended at the lowest free index
//! - `Seeds::Indexed`: seed `i` lands at index `i`; `None` skips the slot

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::errors::{TesseraError, TesseraResult};
use crate::model::Signable;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProofList {
    proofs: BTreeMap<usize, String>,
}

impl ProofList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.proofs.get(&index).map(|s| s.as_str())
    }

    pub fn contains(&self, index: usize) -> bool {
        self.proofs.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.proofs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }

    /// Occupied indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.proofs.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.proofs.iter().map(|(i, p)| (*i, p.as_str()))
    }

    /// Lowest unused index, starting at 0.
    pub fn next_free(&self) -> usize {
        let mut candidate = 0;
        for &i in self.proofs.keys() {
            if i != candidate {
                break;
            }
            candidate += 1;
        }
        candidate
    }

    /// Insert a proof at `index`, or at the lowest free index when `None`.
    ///
    /// An occupied index fails with `DuplicateProofIndex` and leaves the
    /// existing proof untouched. Returns the index used.
    pub fn insert(
        &mut self,
        index: Option<usize>,
        proof: impl Into<String>,
        limit: usize,
    ) -> TesseraResult<usize> {
        let index = index.unwrap_or_else(|| self.next_free());
        if index >= limit {
            return Err(TesseraError::ProofLimitExceeded { index, limit });
        }
        if self.proofs.contains_key(&index) {
            return Err(TesseraError::DuplicateProofIndex { index });
        }
        self.proofs.insert(index, proof.into());
        Ok(index)
    }

    /// Dense wire form: one entry per index up to the highest, gaps empty.
    pub fn to_wire(&self) -> Vec<String> {
        let Some(&last) = self.proofs.keys().next_back() else {
            return Vec::new();
        };
        (0..=last)
            .map(|i| self.proofs.get(&i).cloned().unwrap_or_default())
            .collect()
    }

    /// Parse the dense wire form; empty strings and nulls are gaps.
    pub fn from_wire<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let proofs = items
            .into_iter()
            .enumerate()
            .filter_map(|(i, p)| {
                let p: String = p?.into();
                (!p.is_empty()).then_some((i, p))
            })
            .collect();
        Self { proofs }
    }
}

impl Serialize for ProofList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProofList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<Option<String>>::deserialize(deserializer)?;
        Ok(Self::from_wire(items))
    }
}

/// Serde adapter for single-signature kinds: the list travels as one
/// `signature` string (empty when unsigned).
pub mod as_signature {
    use super::*;

    pub fn serialize<S: Serializer>(proofs: &ProofList, serializer: S) -> Result<S::Ok, S::Error> {
        proofs.get(0).unwrap_or_default().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ProofList, D::Error> {
        let sig = Option::<String>::deserialize(deserializer)?;
        Ok(ProofList::from_wire([sig]))
    }
}

/// Which seeds sign, and at which proof indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Seeds {
    #[default]
    None,
    Single(String),
    Indexed(Vec<Option<String>>),
}

impl Seeds {
    pub fn is_empty(&self) -> bool {
        match self {
            Seeds::None => true,
            Seeds::Single(_) => false,
            Seeds::Indexed(v) => v.iter().all(Option::is_none),
        }
    }

    /// The first usable seed, used to derive a missing public key.
    pub fn first(&self) -> Option<&str> {
        match self {
            Seeds::None => None,
            Seeds::Single(s) => Some(s),
            Seeds::Indexed(v) => v.iter().flatten().next().map(|s| s.as_str()),
        }
    }

    /// `(target index, seed)` pairs; `None` index means append.
    pub fn assignments(&self) -> Vec<(Option<usize>, &str)> {
        match self {
            Seeds::None => Vec::new(),
            Seeds::Single(s) => vec![(None, s.as_str())],
            Seeds::Indexed(v) => v
                .iter()
                .enumerate()
                .filter_map(|(i, s)| s.as_deref().map(|s| (Some(i), s)))
                .collect(),
        }
    }
}

impl From<&str> for Seeds {
    fn from(s: &str) -> Self {
        Seeds::Single(s.to_string())
    }
}

impl From<String> for Seeds {
    fn from(s: String) -> Self {
        Seeds::Single(s)
    }
}

impl From<Option<&str>> for Seeds {
    fn from(s: Option<&str>) -> Self {
        s.map(Seeds::from).unwrap_or_default()
    }
}

impl From<Vec<Option<&str>>> for Seeds {
    fn from(v: Vec<Option<&str>>) -> Self {
        Seeds::Indexed(v.into_iter().map(|s| s.map(str::to_string)).collect())
    }
}

impl From<Vec<Option<String>>> for Seeds {
    fn from(v: Vec<Option<String>>) -> Self {
        Seeds::Indexed(v)
    }
}

impl From<Vec<&str>> for Seeds {
    fn from(v: Vec<&str>) -> Self {
        Seeds::Indexed(v.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

impl<const N: usize> From<[Option<&str>; N]> for Seeds {
    fn from(v: [Option<&str>; N]) -> Self {
        Seeds::from(v.to_vec())
    }
}

/// Attach an externally produced proof to `obj`.
///
/// The object's id is not touched: proofs are not part of the canonical bytes.
pub fn attach_proof<S: Signable + ?Sized>(
    obj: &mut S,
    index: Option<usize>,
    proof: impl Into<String>,
) -> TesseraResult<usize> {
    let limit = obj.proof_limit();
    let kind = obj.kind();
    let used = obj.proofs_mut().insert(index, proof, limit)?;
    debug!(kind, index = used, "proof attached");
    Ok(used)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn append_uses_lowest_free_index() {
        let mut p = ProofList::new();
        assert_eq!(p.insert(Some(1), "b", 8).unwrap(), 1);
        assert_eq!(p.insert(None, "a", 8).unwrap(), 0);
        assert_eq!(p.insert(None, "c", 8).unwrap(), 2);
        assert_eq!(p.indices().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn duplicate_index_keeps_existing_proof() {
        let mut p = ProofList::new();
        p.insert(Some(0), "first", 8).unwrap();
        let err = p.insert(Some(0), "second", 8).unwrap_err();
        assert_matches!(err, TesseraError::DuplicateProofIndex { index: 0 });
        assert_eq!(p.get(0), Some("first"));
    }

    #[test]
    fn limit_is_enforced() {
        let mut p = ProofList::new();
        p.insert(None, "only", 1).unwrap();
        assert_matches!(
            p.insert(None, "more", 1),
            Err(TesseraError::ProofLimitExceeded { index: 1, limit: 1 })
        );
        assert_matches!(
            ProofList::new().insert(Some(8), "x", 8),
            Err(TesseraError::ProofLimitExceeded { index: 8, .. })
        );
    }

    #[test]
    fn wire_form_keeps_gaps() {
        let mut p = ProofList::new();
        p.insert(Some(2), "z", 8).unwrap();
        assert_eq!(p.to_wire(), vec!["".to_string(), "".to_string(), "z".to_string()]);

        let back = ProofList::from_wire(p.to_wire().into_iter().map(Some));
        assert_eq!(back, p);
        assert_eq!(back.next_free(), 0);
    }

    #[test]
    fn json_accepts_null_gaps() {
        let p: ProofList = serde_json::from_str(r#"[null, "sig"]"#).unwrap();
        assert_eq!(p.get(0), None);
        assert_eq!(p.get(1), Some("sig"));
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"["","sig"]"#);
    }

    #[test]
    fn seed_assignments() {
        let s = Seeds::from(vec![None, Some("a"), None, Some("b")]);
        assert_eq!(s.assignments(), vec![(Some(1), "a"), (Some(3), "b")]);
        assert_eq!(s.first(), Some("a"));

        let single = Seeds::from("x");
        assert_eq!(single.assignments(), vec![(None, "x")]);

        assert!(Seeds::None.is_empty());
        assert!(Seeds::from(vec![None::<&str>]).is_empty());
    }
}
