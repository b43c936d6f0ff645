use serde::Serialize;

/// Globally reachable instance of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Singleton {
    pub name: String,
    /// Class of the instance
    #[serde(rename = "type")]
    pub class: String,
}

/// C struct exposed to extensions, described by a format string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeStructure {
    pub name: String,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalConstant {
    pub name: String,
    pub value: i64,
    pub is_bitfield: bool,
}
