use serde::Serialize;

/// Enum or bitfield, either global or scoped to a class or builtin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumEntity {
    pub name: String,
    /// `Owner.Name` when scoped, else `Name`
    pub qualified_name: String,
    pub owner: Option<String>,
    pub is_bitfield: bool,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

impl EnumEntity {
    pub fn new(owner: Option<&str>, name: impl Into<String>) -> Self {
        let name = name.into();
        let qualified_name = match owner {
            Some(owner) => format!("{}.{}", owner, name),
            None => name.clone(),
        };
        Self {
            name,
            qualified_name,
            owner: owner.map(str::to_string),
            is_bitfield: false,
            values: Vec::new(),
        }
    }
}
