use serde::Serialize;

use crate::errors::Result;
use crate::model::{MethodEntity, MethodFlags, OwnerKind};
use crate::render::{format_type, method_signature};
use crate::snapshot::ModelSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSummary {
    pub owner: String,
    pub owner_kind: OwnerKind,
    pub name: String,
    pub qualified_name: String,
    pub signature: String,
    pub return_type: String,
    pub arguments: Vec<String>,
    pub hash: Option<u64>,
    pub hash_compatibility: Vec<u64>,
    #[serde(flatten)]
    pub flags: MethodFlags,
}

impl From<&MethodEntity> for MethodSummary {
    fn from(method: &MethodEntity) -> Self {
        Self {
            owner: method.owner.name.clone(),
            owner_kind: method.owner.kind,
            name: method.name.clone(),
            qualified_name: method.qualified_name.clone(),
            signature: method_signature(method),
            return_type: format_type(method.return_value.as_ref().map(|r| r.ty.as_str())),
            arguments: method
                .parameters
                .iter()
                .map(|p| format_type(Some(&p.ty)))
                .collect(),
            hash: method.hash,
            hash_compatibility: method.hash_compatibility.clone(),
            flags: method.flags,
        }
    }
}

/// Methods with an unqualified name, optionally restricted to one owner
///
/// The name falls back to a case-insensitive match; the owner filter is
/// always case-insensitive. No match is an empty list.
pub fn methods_by_name(
    snapshot: &ModelSnapshot,
    name: &str,
    owner: Option<&str>,
) -> Vec<MethodSummary> {
    let index = snapshot.index();
    let ids = match index.methods_named(name) {
        [] => index
            .method_name_ignore_case(name)
            .map(|folded| index.methods_named(folded))
            .unwrap_or_default(),
        ids => ids,
    };
    ids.iter()
        .map(|&id| snapshot.model().method(id))
        .filter(|m| owner.map_or(true, |o| m.owner.name.eq_ignore_ascii_case(o)))
        .map(MethodSummary::from)
        .collect()
}

pub fn method_by_hash(snapshot: &ModelSnapshot, hash: u64) -> Result<MethodSummary> {
    snapshot.lookup_method_by_hash(hash).map(MethodSummary::from)
}
