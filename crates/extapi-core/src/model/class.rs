use serde::Serialize;

use super::method::Parameter;
use super::{EnumId, MethodId};

/// Engine class (reference type) declared under `classes`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassEntity {
    pub name: String,
    /// Parent class by name; `None` for a root class
    pub parent: Option<String>,
    /// `core`, `editor`, ... as declared
    pub api_type: Option<String>,
    pub is_instantiable: bool,
    pub is_refcounted: bool,
    /// Declared methods in document order
    pub methods: Vec<MethodId>,
    /// Declared enums in document order
    pub enums: Vec<EnumId>,
    pub properties: Vec<PropertySpec>,
    pub signals: Vec<SignalSpec>,
    pub constants: Vec<ConstantSpec>,
    /// Names of singletons exposing an instance of this class
    pub singletons: Vec<String>,
}

impl ClassEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            api_type: None,
            is_instantiable: false,
            is_refcounted: false,
            methods: Vec::new(),
            enums: Vec::new(),
            properties: Vec::new(),
            signals: Vec::new(),
            constants: Vec::new(),
            singletons: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub setter: Option<String>,
    pub getter: Option<String>,
    pub index: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalSpec {
    pub name: String,
    pub arguments: Vec<Parameter>,
}

/// Named constant; `ty` is only present on builtin constants
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantSpec {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    /// Value as written in the document (integers rendered in decimal)
    pub value: String,
}
