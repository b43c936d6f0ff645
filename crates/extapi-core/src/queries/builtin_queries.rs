use std::collections::BTreeMap;

use serde::Serialize;

use extapi_core_types::EntityKind;

use crate::errors::{ExtApiError, Result};
use crate::model::{BuiltinEntity, ConstantSpec, EntityRef};
use crate::render::{constructor_signature, method_signature, operator_signature};
use crate::snapshot::ModelSnapshot;

use super::EnumListing;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberListing {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    /// Present only for members restricted to some configurations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltinDetails {
    pub name: String,
    pub is_keyed: bool,
    pub has_destructor: bool,
    pub indexing_return_type: Option<String>,
    pub members: Vec<MemberListing>,
    pub declared_sizes: BTreeMap<String, u32>,
    pub constants: Vec<ConstantSpec>,
    pub constructors: Vec<String>,
    pub operators: Vec<String>,
    pub methods: Vec<String>,
    pub enums: Vec<EnumListing>,
}

fn find_builtin<'a>(snapshot: &'a ModelSnapshot, name: &str) -> Result<&'a BuiltinEntity> {
    match snapshot.index().get_ignore_case(EntityKind::Builtin, name) {
        Some(EntityRef::Builtin(id)) => Ok(snapshot.model().builtin(id)),
        _ => Err(ExtApiError::UnknownBuiltin {
            name: name.to_string(),
        }),
    }
}

pub fn builtin_details(snapshot: &ModelSnapshot, name: &str) -> Result<BuiltinDetails> {
    let builtin = find_builtin(snapshot, name)?;
    let model = snapshot.model();
    Ok(BuiltinDetails {
        name: builtin.name.clone(),
        is_keyed: builtin.is_keyed,
        has_destructor: builtin.has_destructor,
        indexing_return_type: builtin.indexing_return_type.clone(),
        members: builtin
            .fields
            .iter()
            .map(|f| MemberListing {
                name: f.name.clone(),
                ty: f.ty.clone(),
                configurations: f
                    .configurations
                    .as_ref()
                    .map(|set| set.iter().cloned().collect()),
            })
            .collect(),
        declared_sizes: builtin.declared_sizes.clone(),
        constants: builtin.constants.clone(),
        constructors: builtin
            .constructors
            .iter()
            .map(|c| constructor_signature(&builtin.name, c))
            .collect(),
        operators: builtin
            .operators
            .iter()
            .map(|o| operator_signature(&builtin.name, o))
            .collect(),
        methods: builtin
            .methods
            .iter()
            .map(|&id| method_signature(model.method(id)))
            .collect(),
        enums: builtin
            .enums
            .iter()
            .map(|&id| EnumListing::from(model.enumeration(id)))
            .collect(),
    })
}

/// Builtin names, sorted
pub fn builtin_names(snapshot: &ModelSnapshot) -> Vec<String> {
    let mut names: Vec<String> = snapshot
        .model()
        .builtins
        .iter()
        .map(|b| b.name.clone())
        .collect();
    names.sort();
    names
}
