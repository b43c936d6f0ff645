//! Raw JSON shape of an extension API document
//!
//! These structs mirror the document one-to-one; the loader validates them
//! and folds them into the canonical [`ApiModel`](crate::model::ApiModel).
//! Sections the core does not model are ignored.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDocument {
    pub header: Option<RawHeader>,
    pub build_configurations: Option<Vec<RawBuildConfiguration>>,
    pub builtin_class_sizes: Vec<RawSizeTable>,
    pub builtin_class_member_offsets: Vec<RawOffsetTable>,
    pub global_constants: Vec<RawGlobalConstant>,
    pub global_enums: Vec<RawEnum>,
    pub utility_functions: Vec<RawUtilityFunction>,
    pub builtin_classes: Vec<RawBuiltinClass>,
    pub classes: Vec<RawClass>,
    pub singletons: Vec<RawSingleton>,
    pub native_structures: Vec<RawNativeStructure>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawHeader {
    pub version_major: Option<u32>,
    pub version_minor: Option<u32>,
    pub version_patch: Option<u32>,
    pub version_status: Option<String>,
    pub version_full_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBuildConfiguration {
    pub name: String,
    pub real_size: u32,
    pub pointer_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSizeTable {
    pub build_configuration: String,
    #[serde(default)]
    pub sizes: Vec<RawSize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSize {
    pub name: String,
    pub size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOffsetTable {
    pub build_configuration: String,
    #[serde(default)]
    pub classes: Vec<RawOffsetClass>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOffsetClass {
    pub name: String,
    #[serde(default)]
    pub members: Vec<RawOffsetMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOffsetMember {
    pub member: String,
    pub offset: u32,
    pub meta: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGlobalConstant {
    pub name: String,
    pub value: i64,
    #[serde(default)]
    pub is_bitfield: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEnum {
    pub name: String,
    #[serde(default)]
    pub is_bitfield: bool,
    #[serde(default)]
    pub values: Vec<RawEnumValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEnumValue {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawArgument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub meta: Option<String>,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUtilityFunction {
    pub name: String,
    pub category: Option<String>,
    pub return_type: Option<String>,
    #[serde(default)]
    pub is_vararg: bool,
    pub hash: Option<u64>,
    #[serde(default)]
    pub arguments: Vec<RawArgument>,
}

/// `hash_compatibility` appears both as a list and as a bare number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawHashCompatibility {
    One(u64),
    Many(Vec<u64>),
}

impl RawHashCompatibility {
    pub fn into_vec(self) -> Vec<u64> {
        match self {
            RawHashCompatibility::One(h) => vec![h],
            RawHashCompatibility::Many(hs) => hs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawReturnValue {
    #[serde(rename = "type")]
    pub ty: String,
    pub meta: Option<String>,
}

/// Method as declared by either a class (`return_value`) or a builtin
/// (`return_type`)
#[derive(Debug, Clone, Deserialize)]
pub struct RawMethod {
    pub name: String,
    pub hash: Option<u64>,
    pub hash_compatibility: Option<RawHashCompatibility>,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_vararg: bool,
    pub return_value: Option<RawReturnValue>,
    pub return_type: Option<String>,
    #[serde(default)]
    pub arguments: Vec<RawArgument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMember {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Constant value: an integer on classes, a constructor expression on builtins
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawConstantValue {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for RawConstantValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawConstantValue::Int(v) => write!(f, "{}", v),
            RawConstantValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawConstant {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<String>,
    pub value: RawConstantValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawConstructor {
    pub index: u32,
    #[serde(default)]
    pub arguments: Vec<RawArgument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOperator {
    pub name: String,
    pub right_type: Option<String>,
    pub return_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBuiltinClass {
    pub name: String,
    #[serde(default)]
    pub is_keyed: bool,
    #[serde(default)]
    pub has_destructor: bool,
    pub indexing_return_type: Option<String>,
    #[serde(default)]
    pub members: Vec<RawMember>,
    #[serde(default)]
    pub methods: Vec<RawMethod>,
    #[serde(default)]
    pub enums: Vec<RawEnum>,
    #[serde(default)]
    pub constants: Vec<RawConstant>,
    #[serde(default)]
    pub constructors: Vec<RawConstructor>,
    #[serde(default)]
    pub operators: Vec<RawOperator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub setter: Option<String>,
    pub getter: Option<String>,
    pub index: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSignal {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<RawArgument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawClass {
    pub name: String,
    pub inherits: Option<String>,
    pub api_type: Option<String>,
    #[serde(default)]
    pub is_instantiable: bool,
    #[serde(default)]
    pub is_refcounted: bool,
    #[serde(default)]
    pub methods: Vec<RawMethod>,
    #[serde(default)]
    pub enums: Vec<RawEnum>,
    #[serde(default)]
    pub properties: Vec<RawProperty>,
    #[serde(default)]
    pub signals: Vec<RawSignal>,
    #[serde(default)]
    pub constants: Vec<RawConstant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSingleton {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNativeStructure {
    pub name: String,
    pub format: String,
}
