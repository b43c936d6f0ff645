use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::class::ConstantSpec;
use super::method::Parameter;
use super::{EnumId, MethodId};

/// Value type declared under `builtin_classes`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltinEntity {
    pub name: String,
    /// Fields in declaration order, including derived members with no storage
    pub fields: Vec<FieldSpec>,
    /// Declared total size per configuration
    pub declared_sizes: BTreeMap<String, u32>,
    pub is_keyed: bool,
    pub has_destructor: bool,
    pub indexing_return_type: Option<String>,
    pub methods: Vec<MethodId>,
    pub enums: Vec<EnumId>,
    pub constants: Vec<ConstantSpec>,
    pub constructors: Vec<ConstructorSpec>,
    pub operators: Vec<OperatorSpec>,
}

impl BuiltinEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            declared_sizes: BTreeMap::new(),
            is_keyed: false,
            has_destructor: false,
            indexing_return_type: None,
            methods: Vec::new(),
            enums: Vec::new(),
            constants: Vec::new(),
            constructors: Vec::new(),
            operators: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields present under a configuration, in declaration order
    pub fn fields_for<'a>(&'a self, configuration: &'a str) -> impl Iterator<Item = &'a FieldSpec> {
        self.fields
            .iter()
            .filter(move |f| f.applies_to(configuration))
    }

    pub fn declared_size(&self, configuration: &str) -> Option<u32> {
        self.declared_sizes.get(configuration).copied()
    }
}

/// Explicit placement of a field under one configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclaredPlacement {
    pub offset: u32,
    /// Storage type under this configuration, overriding the member type
    pub meta: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    /// Declared semantic type
    #[serde(rename = "type")]
    pub ty: String,
    /// `None` when the field applies to every configuration
    pub configurations: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub placements: BTreeMap<String, DeclaredPlacement>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            configurations: None,
            placements: BTreeMap::new(),
        }
    }

    pub fn applies_to(&self, configuration: &str) -> bool {
        self.configurations
            .as_ref()
            .map_or(true, |set| set.contains(configuration))
    }

    /// Type that determines size and alignment under a configuration
    pub fn effective_type(&self, configuration: &str) -> &str {
        self.placements
            .get(configuration)
            .and_then(|p| p.meta.as_deref())
            .unwrap_or(&self.ty)
    }

    pub fn declared_offset(&self, configuration: &str) -> Option<u32> {
        self.placements.get(configuration).map(|p| p.offset)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructorSpec {
    pub index: u32,
    pub arguments: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorSpec {
    pub name: String,
    pub right_type: Option<String>,
    pub return_type: String,
}
