//! Folds a structurally valid raw document into the arena model

use std::collections::{BTreeSet, HashMap};

use crate::errors::{ExtApiError, Result};
use crate::model::{
    ApiModel, BuiltinEntity, ClassEntity, ConstantSpec, ConstructorSpec, Configuration,
    DeclaredPlacement, EnumEntity, EnumId, EnumValue, FieldSpec, GlobalConstant, MethodEntity,
    MethodFlags, MethodId, MethodOwner, NativeStructure, OperatorSpec, OwnerKind, Parameter,
    PropertySpec, ReturnValue, SignalSpec, Singleton, UtilityFunction,
};

use super::format::{
    RawArgument, RawBuiltinClass, RawClass, RawConstant, RawDocument, RawEnum, RawMethod,
};

const UNKNOWN_VERSION: &str = "unknown";

pub fn build_model(raw: RawDocument, configurations: Vec<Configuration>) -> Result<ApiModel> {
    let mut model = ApiModel {
        version: raw
            .header
            .as_ref()
            .and_then(|h| h.version_full_name.clone())
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
        configurations,
        ..ApiModel::default()
    };

    model.global_constants = raw
        .global_constants
        .iter()
        .map(|c| GlobalConstant {
            name: c.name.clone(),
            value: c.value,
            is_bitfield: c.is_bitfield,
        })
        .collect();

    for raw_enum in &raw.global_enums {
        push_enum(&mut model, None, raw_enum);
    }

    model.utilities = raw
        .utility_functions
        .iter()
        .map(|u| UtilityFunction {
            name: u.name.clone(),
            category: u.category.clone(),
            return_type: u.return_type.clone(),
            is_vararg: u.is_vararg,
            hash: u.hash,
            arguments: parameters(&u.arguments),
        })
        .collect();

    for raw_builtin in &raw.builtin_classes {
        let builtin = build_builtin(&mut model, raw_builtin);
        model.builtins.push(builtin);
    }
    apply_layout_tables(&mut model, &raw)?;

    for raw_class in &raw.classes {
        let class = build_class(&mut model, raw_class);
        model.classes.push(class);
    }

    for singleton in &raw.singletons {
        if let Some(class) = model.classes.iter_mut().find(|c| c.name == singleton.ty) {
            class.singletons.push(singleton.name.clone());
        }
        model.singletons.push(Singleton {
            name: singleton.name.clone(),
            class: singleton.ty.clone(),
        });
    }

    model.native_structures = raw
        .native_structures
        .iter()
        .map(|n| NativeStructure {
            name: n.name.clone(),
            format: n.format.clone(),
        })
        .collect();

    Ok(model)
}

fn parameters(arguments: &[RawArgument]) -> Vec<Parameter> {
    arguments
        .iter()
        .map(|a| Parameter {
            name: a.name.clone(),
            ty: a.ty.clone(),
            meta: a.meta.clone(),
            default_value: a.default_value.clone(),
        })
        .collect()
}

fn constants(raw: &[RawConstant]) -> Vec<ConstantSpec> {
    raw.iter()
        .map(|c| ConstantSpec {
            name: c.name.clone(),
            ty: c.ty.clone(),
            value: c.value.to_string(),
        })
        .collect()
}

fn push_enum(model: &mut ApiModel, owner: Option<&str>, raw: &RawEnum) -> EnumId {
    let mut entity = EnumEntity::new(owner, raw.name.clone());
    entity.is_bitfield = raw.is_bitfield;
    entity.values = raw
        .values
        .iter()
        .map(|v| EnumValue {
            name: v.name.clone(),
            value: v.value,
        })
        .collect();
    let id = EnumId::from_index(model.enums.len());
    model.enums.push(entity);
    id
}

fn push_method(model: &mut ApiModel, owner: MethodOwner, raw: &RawMethod) -> MethodId {
    let mut method = MethodEntity::new(owner, raw.name.clone());
    method.hash = raw.hash;
    method.hash_compatibility = raw
        .hash_compatibility
        .clone()
        .map(|h| h.into_vec())
        .unwrap_or_default();
    method.parameters = parameters(&raw.arguments);
    method.return_value = raw
        .return_value
        .as_ref()
        .map(|r| ReturnValue {
            ty: r.ty.clone(),
            meta: r.meta.clone(),
        })
        .or_else(|| {
            raw.return_type.as_ref().map(|ty| ReturnValue {
                ty: ty.clone(),
                meta: None,
            })
        });
    method.flags = MethodFlags {
        is_const: raw.is_const,
        is_static: raw.is_static,
        is_virtual: raw.is_virtual,
        is_vararg: raw.is_vararg,
    };
    let id = MethodId::from_index(model.methods.len());
    model.methods.push(method);
    id
}

fn build_builtin(model: &mut ApiModel, raw: &RawBuiltinClass) -> BuiltinEntity {
    let mut builtin = BuiltinEntity::new(raw.name.clone());
    builtin.is_keyed = raw.is_keyed;
    builtin.has_destructor = raw.has_destructor;
    builtin.indexing_return_type = raw.indexing_return_type.clone();
    builtin.fields = raw
        .members
        .iter()
        .map(|m| FieldSpec::new(m.name.clone(), m.ty.clone()))
        .collect();
    builtin.constants = constants(&raw.constants);
    builtin.constructors = raw
        .constructors
        .iter()
        .map(|c| ConstructorSpec {
            index: c.index,
            arguments: parameters(&c.arguments),
        })
        .collect();
    builtin.operators = raw
        .operators
        .iter()
        .map(|o| OperatorSpec {
            name: o.name.clone(),
            right_type: o.right_type.clone(),
            return_type: o.return_type.clone(),
        })
        .collect();

    let owner = MethodOwner {
        kind: OwnerKind::Builtin,
        name: raw.name.clone(),
    };
    builtin.methods = raw
        .methods
        .iter()
        .map(|m| push_method(model, owner.clone(), m))
        .collect();
    builtin.enums = raw
        .enums
        .iter()
        .map(|e| push_enum(model, Some(&raw.name), e))
        .collect();
    builtin
}

fn build_class(model: &mut ApiModel, raw: &RawClass) -> ClassEntity {
    let mut class = ClassEntity::new(raw.name.clone());
    class.parent = raw.inherits.clone();
    class.api_type = raw.api_type.clone();
    class.is_instantiable = raw.is_instantiable;
    class.is_refcounted = raw.is_refcounted;
    class.properties = raw
        .properties
        .iter()
        .map(|p| PropertySpec {
            name: p.name.clone(),
            ty: p.ty.clone(),
            setter: p.setter.clone(),
            getter: p.getter.clone(),
            index: p.index,
        })
        .collect();
    class.signals = raw
        .signals
        .iter()
        .map(|s| SignalSpec {
            name: s.name.clone(),
            arguments: parameters(&s.arguments),
        })
        .collect();
    class.constants = constants(&raw.constants);

    let owner = MethodOwner {
        kind: OwnerKind::Class,
        name: raw.name.clone(),
    };
    class.methods = raw
        .methods
        .iter()
        .map(|m| push_method(model, owner.clone(), m))
        .collect();
    class.enums = raw
        .enums
        .iter()
        .map(|e| push_enum(model, Some(&raw.name), e))
        .collect();
    class
}

/// Merge declared sizes and per-configuration placements into the builtins.
/// Size entries for names outside `builtin_classes` become opaque builtins.
/// A builtin listed in a configuration's offset table has exactly the listed
/// members under that configuration; its other members are derived
/// properties with no storage there.
fn apply_layout_tables(model: &mut ApiModel, raw: &RawDocument) -> Result<()> {
    let mut by_name: HashMap<String, usize> = HashMap::new();
    for (i, builtin) in model.builtins.iter().enumerate() {
        by_name.entry(builtin.name.clone()).or_insert(i);
    }

    for table in &raw.builtin_class_sizes {
        for entry in &table.sizes {
            let index = match by_name.get(&entry.name) {
                Some(&index) => index,
                None => {
                    model.builtins.push(BuiltinEntity::new(entry.name.clone()));
                    let index = model.builtins.len() - 1;
                    by_name.insert(entry.name.clone(), index);
                    index
                }
            };
            model.builtins[index]
                .declared_sizes
                .insert(table.build_configuration.clone(), entry.size);
        }
    }

    let mut tabled: Vec<(usize, &str)> = Vec::new();
    for table in &raw.builtin_class_member_offsets {
        let configuration = &table.build_configuration;
        for class in &table.classes {
            let Some(&index) = by_name.get(&class.name) else {
                continue;
            };
            tabled.push((index, configuration.as_str()));
            let builtin = &mut model.builtins[index];
            for member in &class.members {
                let placement = DeclaredPlacement {
                    offset: member.offset,
                    meta: member.meta.clone(),
                };
                match builtin.fields.iter_mut().find(|f| f.name == member.member) {
                    Some(field) => {
                        if let Some(set) = field.configurations.as_mut() {
                            set.insert(configuration.clone());
                        }
                        field.placements.insert(configuration.clone(), placement);
                    }
                    None => {
                        let ty = member.meta.clone().ok_or_else(|| {
                            ExtApiError::malformed(format!(
                                "Member {}.{} in configuration {} has neither a declared type nor meta",
                                class.name, member.member, configuration
                            ))
                        })?;
                        let mut field = FieldSpec::new(member.member.clone(), ty);
                        field.configurations = Some(BTreeSet::from([configuration.clone()]));
                        field.placements.insert(configuration.clone(), placement);
                        builtin.fields.push(field);
                    }
                }
            }
        }
    }

    let every: BTreeSet<String> = model
        .configurations
        .iter()
        .map(|c| c.name.clone())
        .collect();
    for (index, configuration) in tabled {
        for field in &mut model.builtins[index].fields {
            if !field.placements.contains_key(configuration) {
                field
                    .configurations
                    .get_or_insert_with(|| every.clone())
                    .remove(configuration);
            }
        }
    }

    Ok(())
}
