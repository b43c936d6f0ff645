//! Structural checks run over the raw document before and after it is folded
//! into the model. Each check reports the first violation it finds.

use std::collections::{HashMap, HashSet};

use crate::errors::{ExtApiError, Result};
use crate::layout::primitive::primitive_size;
use crate::model::{ApiModel, Configuration};

use super::format::RawDocument;

/// Sizing implied by Godot's `<precision>_<bits>` configuration names
pub fn configuration_from_name(name: &str) -> Option<Configuration> {
    let (precision, bits) = name.split_once('_')?;
    let real_size = match precision {
        "float" => 4,
        "double" => 8,
        _ => return None,
    };
    let pointer_size = match bits {
        "32" => 4,
        "64" => 8,
        _ => return None,
    };
    Some(Configuration {
        name: name.to_string(),
        real_size,
        pointer_size,
    })
}

/// Configuration names used by the size and offset tables, first-seen order
fn referenced_configurations(raw: &RawDocument) -> Vec<&str> {
    let mut seen = HashSet::new();
    raw.builtin_class_sizes
        .iter()
        .map(|t| t.build_configuration.as_str())
        .chain(
            raw.builtin_class_member_offsets
                .iter()
                .map(|t| t.build_configuration.as_str()),
        )
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Determine the configuration set, explicit or inferred
pub fn resolve_configurations(raw: &RawDocument) -> Result<Vec<Configuration>> {
    let referenced = referenced_configurations(raw);

    let Some(declared) = &raw.build_configurations else {
        return referenced
            .into_iter()
            .map(|name| {
                configuration_from_name(name).ok_or_else(|| {
                    ExtApiError::malformed(format!(
                        "Configuration '{}' has no declared sizing and does not follow the <float|double>_<32|64> convention",
                        name
                    ))
                })
            })
            .collect();
    };

    let mut names = HashSet::new();
    let mut configurations = Vec::with_capacity(declared.len());
    for entry in declared {
        if entry.name.trim().is_empty() {
            return Err(ExtApiError::malformed("Build configuration with empty name"));
        }
        if !names.insert(entry.name.as_str()) {
            return Err(ExtApiError::malformed(format!(
                "Duplicate build configuration: {}",
                entry.name
            )));
        }
        if entry.real_size == 0 || entry.pointer_size == 0 {
            return Err(ExtApiError::malformed(format!(
                "Build configuration {} declares a zero primitive size",
                entry.name
            )));
        }
        configurations.push(Configuration {
            name: entry.name.clone(),
            real_size: entry.real_size,
            pointer_size: entry.pointer_size,
        });
    }

    if let Some(undeclared) = referenced.into_iter().find(|name| !names.contains(name)) {
        return Err(ExtApiError::malformed(format!(
            "Layout tables reference undeclared configuration: {}",
            undeclared
        )));
    }

    Ok(configurations)
}

/// Duplicate size/offset entries and duplicate member names
pub fn check_duplicates(raw: &RawDocument) -> Result<()> {
    let mut sizes = HashSet::new();
    for table in &raw.builtin_class_sizes {
        for entry in &table.sizes {
            if !sizes.insert((table.build_configuration.as_str(), entry.name.as_str())) {
                return Err(ExtApiError::malformed(format!(
                    "Duplicate size entry for {} in configuration {}",
                    entry.name, table.build_configuration
                )));
            }
        }
    }

    let mut offsets = HashSet::new();
    for table in &raw.builtin_class_member_offsets {
        for class in &table.classes {
            for member in &class.members {
                let key = (
                    table.build_configuration.as_str(),
                    class.name.as_str(),
                    member.member.as_str(),
                );
                if !offsets.insert(key) {
                    return Err(ExtApiError::malformed(format!(
                        "Duplicate offset entry for {}.{} in configuration {}",
                        class.name, member.member, table.build_configuration
                    )));
                }
            }
        }
    }

    for builtin in &raw.builtin_classes {
        let mut members = HashSet::new();
        for member in &builtin.members {
            if !members.insert(member.name.as_str()) {
                return Err(ExtApiError::malformed(format!(
                    "Duplicate member {} in builtin {}",
                    member.name, builtin.name
                )));
            }
        }
    }

    Ok(())
}

/// Every `inherits` names a declared class and the hierarchy is acyclic
pub fn check_inheritance(raw: &RawDocument) -> Result<()> {
    let mut parents: HashMap<&str, Option<&str>> = HashMap::new();
    for class in &raw.classes {
        parents
            .entry(class.name.as_str())
            .or_insert(class.inherits.as_deref());
    }

    for class in &raw.classes {
        if let Some(parent) = class.inherits.as_deref() {
            if !parents.contains_key(parent) {
                return Err(ExtApiError::malformed(format!(
                    "Class {} inherits undeclared class {}",
                    class.name, parent
                )));
            }
        }
    }

    for class in &raw.classes {
        let mut visited = HashSet::new();
        let mut current = Some(class.name.as_str());
        while let Some(name) = current {
            if !visited.insert(name) {
                return Err(ExtApiError::malformed(format!(
                    "Inheritance cycle through class {}",
                    class.name
                )));
            }
            current = parents.get(name).copied().flatten();
        }
    }

    Ok(())
}

pub fn check_singletons(raw: &RawDocument) -> Result<()> {
    let classes: HashSet<&str> = raw.classes.iter().map(|c| c.name.as_str()).collect();
    match raw
        .singletons
        .iter()
        .find(|s| !classes.contains(s.ty.as_str()))
    {
        Some(singleton) => Err(ExtApiError::malformed(format!(
            "Singleton {} has undeclared type {}",
            singleton.name, singleton.ty
        ))),
        None => Ok(()),
    }
}

/// Offset tables may only describe builtins declared under `builtin_classes`
pub fn check_offset_tables(raw: &RawDocument) -> Result<()> {
    let builtins: HashSet<&str> = raw.builtin_classes.iter().map(|b| b.name.as_str()).collect();
    for table in &raw.builtin_class_member_offsets {
        if let Some(class) = table
            .classes
            .iter()
            .find(|c| !builtins.contains(c.name.as_str()))
        {
            return Err(ExtApiError::malformed(format!(
                "Offset table for configuration {} references undeclared builtin {}",
                table.build_configuration, class.name
            )));
        }
    }
    Ok(())
}

/// Every field type is a primitive or a declared builtin, under every
/// configuration the field applies to
pub fn check_field_types(model: &ApiModel) -> Result<()> {
    let builtins: HashSet<&str> = model.builtins.iter().map(|b| b.name.as_str()).collect();
    for builtin in &model.builtins {
        for configuration in &model.configurations {
            for field in builtin.fields_for(&configuration.name) {
                let ty = field.effective_type(&configuration.name);
                if primitive_size(ty, configuration).is_none() && !builtins.contains(ty) {
                    return Err(ExtApiError::malformed(format!(
                        "Field {}.{} has undeclared type {} in configuration {}",
                        builtin.name, field.name, ty, configuration.name
                    )));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawDocument {
        serde_json::from_str(json).expect("fixture parses")
    }

    #[test]
    fn test_configuration_naming_convention() {
        let c = configuration_from_name("double_32").expect("conventional name");
        assert_eq!((c.real_size, c.pointer_size), (8, 4));
        assert!(configuration_from_name("float32").is_none());
        assert!(configuration_from_name("half_64").is_none());
        assert!(configuration_from_name("float_16").is_none());
    }

    #[test]
    fn test_inferred_configurations_first_seen_order() {
        let doc = raw(
            r#"{
                "builtin_class_sizes": [
                    {"build_configuration": "float_64", "sizes": []},
                    {"build_configuration": "float_32", "sizes": []}
                ],
                "builtin_class_member_offsets": [
                    {"build_configuration": "float_32", "classes": []},
                    {"build_configuration": "double_64", "classes": []}
                ]
            }"#,
        );
        let names: Vec<String> = resolve_configurations(&doc)
            .expect("valid")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["float_64", "float_32", "double_64"]);
    }

    #[test]
    fn test_explicit_configurations_must_cover_tables() {
        let doc = raw(
            r#"{
                "build_configurations": [{"name": "custom", "real_size": 4, "pointer_size": 8}],
                "builtin_class_sizes": [{"build_configuration": "float_32", "sizes": []}]
            }"#,
        );
        let err = resolve_configurations(&doc).unwrap_err();
        assert!(err.to_string().contains("float_32"));
    }

    #[test]
    fn test_unconventional_name_without_declaration() {
        let doc = raw(r#"{"builtin_class_sizes": [{"build_configuration": "wide", "sizes": []}]}"#);
        assert!(matches!(
            resolve_configurations(&doc),
            Err(ExtApiError::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_inheritance_cycle_detected() {
        let doc = raw(
            r#"{"classes": [
                {"name": "A", "inherits": "B"},
                {"name": "B", "inherits": "A"}
            ]}"#,
        );
        let err = check_inheritance(&doc).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_duplicate_member_detected() {
        let doc = raw(
            r#"{"builtin_classes": [
                {"name": "Vector2", "members": [
                    {"name": "x", "type": "real"},
                    {"name": "x", "type": "real"}
                ]}
            ]}"#,
        );
        let err = check_duplicates(&doc).unwrap_err();
        assert!(err.to_string().contains("Duplicate member x"));
    }
}
