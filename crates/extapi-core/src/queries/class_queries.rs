use serde::Serialize;

use extapi_core_types::EntityKind;

use crate::errors::{ExtApiError, Result};
use crate::model::{ClassEntity, ConstantSpec, EntityRef};
use crate::render::{method_signature, property_signature, signal_signature};
use crate::snapshot::ModelSnapshot;

use super::EnumListing;

/// Everything a class declares, with rendered signatures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDetails {
    pub name: String,
    pub api_type: Option<String>,
    pub inherits: Option<String>,
    pub is_instantiable: bool,
    pub is_refcounted: bool,
    pub singletons: Vec<String>,
    pub methods: Vec<String>,
    pub properties: Vec<String>,
    pub signals: Vec<String>,
    pub constants: Vec<ConstantSpec>,
    pub enums: Vec<EnumListing>,
}

fn find_class<'a>(snapshot: &'a ModelSnapshot, name: &str) -> Result<&'a ClassEntity> {
    match snapshot.index().get_ignore_case(EntityKind::Class, name) {
        Some(EntityRef::Class(id)) => Ok(snapshot.model().class(id)),
        _ => Err(ExtApiError::not_found("class", name)),
    }
}

pub fn class_details(snapshot: &ModelSnapshot, name: &str) -> Result<ClassDetails> {
    let class = find_class(snapshot, name)?;
    let model = snapshot.model();
    Ok(ClassDetails {
        name: class.name.clone(),
        api_type: class.api_type.clone(),
        inherits: class.parent.clone(),
        is_instantiable: class.is_instantiable,
        is_refcounted: class.is_refcounted,
        singletons: class.singletons.clone(),
        methods: class
            .methods
            .iter()
            .map(|&id| method_signature(model.method(id)))
            .collect(),
        properties: class.properties.iter().map(property_signature).collect(),
        signals: class.signals.iter().map(signal_signature).collect(),
        constants: class.constants.clone(),
        enums: class
            .enums
            .iter()
            .map(|&id| EnumListing::from(model.enumeration(id)))
            .collect(),
    })
}

/// The class followed by its parents, up to the root
pub fn class_ancestry(snapshot: &ModelSnapshot, name: &str) -> Result<Vec<String>> {
    let mut class = find_class(snapshot, name)?;
    let mut chain = vec![class.name.clone()];
    // hand-built models skip the loader's cycle check
    let limit = snapshot.model().classes.len();
    while let Some(parent) = class.parent.as_deref() {
        if chain.len() > limit {
            return Err(ExtApiError::Internal {
                message: format!("Inheritance chain of {} does not terminate", name),
            });
        }
        let id = snapshot.index().class_id(parent).ok_or_else(|| ExtApiError::Internal {
            message: format!("Parent {} of {} is not indexed", parent, class.name),
        })?;
        class = snapshot.model().class(id);
        chain.push(class.name.clone());
    }
    Ok(chain)
}
