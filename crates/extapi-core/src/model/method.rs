use serde::Serialize;

/// Whether a method belongs to an engine class or a builtin value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    Class,
    Builtin,
}

/// Back-reference from a method to its declaring type, by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodOwner {
    pub kind: OwnerKind,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnValue {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MethodFlags {
    pub is_const: bool,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_vararg: bool,
}

impl MethodFlags {
    /// Flag names that are set, in rendering order
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.is_static {
            labels.push("static");
        }
        if self.is_const {
            labels.push("const");
        }
        if self.is_virtual {
            labels.push("virtual");
        }
        if self.is_vararg {
            labels.push("vararg");
        }
        labels
    }
}

/// Method declared by a class or a builtin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodEntity {
    pub name: String,
    /// `Owner.name`
    pub qualified_name: String,
    pub owner: MethodOwner,
    /// Absent on virtual methods, which are not addressable by hash
    pub hash: Option<u64>,
    pub hash_compatibility: Vec<u64>,
    pub parameters: Vec<Parameter>,
    /// `None` for methods returning nothing
    pub return_value: Option<ReturnValue>,
    pub flags: MethodFlags,
}

impl MethodEntity {
    pub fn new(owner: MethodOwner, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            qualified_name: format!("{}.{}", owner.name, name),
            name,
            owner,
            hash: None,
            hash_compatibility: Vec::new(),
            parameters: Vec::new(),
            return_value: None,
            flags: MethodFlags::default(),
        }
    }
}
