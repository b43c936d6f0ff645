use serde::Serialize;

use extapi_core_types::EntityKind;

use crate::errors::{ExtApiError, Result};
use crate::model::{EntityRef, GlobalConstant, NativeStructure, Singleton, UtilityFunction};
use crate::render::{format_type, utility_signature};
use crate::snapshot::ModelSnapshot;

use super::EnumListing;

/// Global enum by name, or class/builtin enum by `Owner.Name`
pub fn enum_lookup(snapshot: &ModelSnapshot, name: &str) -> Result<EnumListing> {
    match snapshot.index().get_ignore_case(EntityKind::Enum, name) {
        Some(EntityRef::Enum(id)) => Ok(EnumListing::from(snapshot.model().enumeration(id))),
        _ => Err(ExtApiError::not_found("enum", name)),
    }
}

pub fn singletons(snapshot: &ModelSnapshot) -> Vec<Singleton> {
    snapshot.model().singletons.clone()
}

pub fn native_structures(snapshot: &ModelSnapshot) -> Vec<NativeStructure> {
    snapshot.model().native_structures.clone()
}

/// Global constant by name; on a case-insensitive tie the lowest name wins
pub fn global_constant(snapshot: &ModelSnapshot, name: &str) -> Result<GlobalConstant> {
    let constants = &snapshot.model().global_constants;
    constants
        .iter()
        .find(|c| c.name == name)
        .or_else(|| {
            constants
                .iter()
                .filter(|c| c.name.eq_ignore_ascii_case(name))
                .min_by(|a, b| a.name.cmp(&b.name))
        })
        .cloned()
        .ok_or_else(|| ExtApiError::not_found("global constant", name))
}

/// Global constant names, sorted
pub fn global_constant_names(snapshot: &ModelSnapshot) -> Vec<String> {
    let mut names: Vec<String> = snapshot
        .model()
        .global_constants
        .iter()
        .map(|c| c.name.clone())
        .collect();
    names.sort();
    names
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilitySummary {
    pub name: String,
    pub category: Option<String>,
    pub return_type: String,
    pub arguments: Vec<String>,
    pub signature: String,
    pub hash: Option<u64>,
}

impl From<&UtilityFunction> for UtilitySummary {
    fn from(utility: &UtilityFunction) -> Self {
        Self {
            name: utility.name.clone(),
            category: utility.category.clone(),
            return_type: format_type(utility.return_type.as_deref()),
            arguments: utility
                .arguments
                .iter()
                .map(|a| format_type(Some(&a.ty)))
                .collect(),
            signature: utility_signature(utility),
            hash: utility.hash,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilityQuery<'a> {
    ByName(&'a str),
    ByCategory(&'a str),
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "listing", rename_all = "snake_case")]
pub enum UtilityListing {
    Function(UtilitySummary),
    /// Functions of one category in declaration order
    Category {
        category: String,
        functions: Vec<String>,
    },
    /// Every function name, sorted
    All { functions: Vec<String> },
}

/// Utility functions by name, by category, or all of them
///
/// # Errors
///
/// `NotFound` when a name matches no function. An unknown category is an
/// empty listing.
pub fn utilities(snapshot: &ModelSnapshot, query: UtilityQuery<'_>) -> Result<UtilityListing> {
    let model = snapshot.model();
    match query {
        UtilityQuery::ByName(name) => {
            match snapshot.index().get_ignore_case(EntityKind::Utility, name) {
                Some(EntityRef::Utility(id)) => {
                    Ok(UtilityListing::Function(model.utility(id).into()))
                }
                _ => Err(ExtApiError::not_found("utility function", name)),
            }
        }
        UtilityQuery::ByCategory(category) => Ok(UtilityListing::Category {
            category: category.to_string(),
            functions: snapshot
                .index()
                .utilities_in_category(category)
                .iter()
                .map(|&id| model.utility(id).name.clone())
                .collect(),
        }),
        UtilityQuery::All => {
            let mut functions: Vec<String> =
                model.utilities.iter().map(|u| u.name.clone()).collect();
            functions.sort();
            Ok(UtilityListing::All { functions })
        }
    }
}
