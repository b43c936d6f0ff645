//! Canonical in-memory model of an extension API document
//!
//! Entities live in flat arenas on [`ApiModel`] and refer to each other either
//! by typed arena id (class → methods, class → enums) or by name
//! (method → owner, class → parent). Name references are resolved through
//! the index.

pub mod builtin;
pub mod class;
pub mod enums;
pub mod globals;
pub mod method;
pub mod utility;

use serde::Serialize;

use extapi_core_types::EntityKind;

pub use builtin::{BuiltinEntity, ConstructorSpec, DeclaredPlacement, FieldSpec, OperatorSpec};
pub use class::{ClassEntity, ConstantSpec, PropertySpec, SignalSpec};
pub use enums::{EnumEntity, EnumValue};
pub use globals::{GlobalConstant, NativeStructure, Singleton};
pub use method::{MethodEntity, MethodFlags, MethodOwner, OwnerKind, Parameter, ReturnValue};
pub use utility::UtilityFunction;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            /// Position of the entity in its arena
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(
    /// Index into [`ApiModel::classes`]
    ClassId
);
arena_id!(
    /// Index into [`ApiModel::builtins`]
    BuiltinId
);
arena_id!(
    /// Index into [`ApiModel::methods`]
    MethodId
);
arena_id!(
    /// Index into [`ApiModel::enums`]
    EnumId
);
arena_id!(
    /// Index into [`ApiModel::utilities`]
    UtilityId
);

/// Named build variant selecting primitive sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub name: String,
    /// Width of `real` / `real_t` in bytes
    pub real_size: u32,
    /// Width of a pointer in bytes
    pub pointer_size: u32,
}

/// Typed reference to an entity of any kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityRef {
    Class(ClassId),
    Builtin(BuiltinId),
    Method(MethodId),
    Enum(EnumId),
    Utility(UtilityId),
}

impl EntityRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Class(_) => EntityKind::Class,
            EntityRef::Builtin(_) => EntityKind::Builtin,
            EntityRef::Method(_) => EntityKind::Method,
            EntityRef::Enum(_) => EntityKind::Enum,
            EntityRef::Utility(_) => EntityKind::Utility,
        }
    }
}

/// Borrowed view of an entity, tagged with its kind when serialized
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity<'a> {
    Class(&'a ClassEntity),
    Builtin(&'a BuiltinEntity),
    Method(&'a MethodEntity),
    Enum(&'a EnumEntity),
    Utility(&'a UtilityFunction),
}

impl<'a> Entity<'a> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Class(_) => EntityKind::Class,
            Entity::Builtin(_) => EntityKind::Builtin,
            Entity::Method(_) => EntityKind::Method,
            Entity::Enum(_) => EntityKind::Enum,
            Entity::Utility(_) => EntityKind::Utility,
        }
    }

    /// Name unique within the entity's kind
    pub fn qualified_name(&self) -> &'a str {
        match self {
            Entity::Class(c) => &c.name,
            Entity::Builtin(b) => &b.name,
            Entity::Method(m) => &m.qualified_name,
            Entity::Enum(e) => &e.qualified_name,
            Entity::Utility(u) => &u.name,
        }
    }

    /// Unqualified declared name
    pub fn name(&self) -> &'a str {
        match self {
            Entity::Class(c) => &c.name,
            Entity::Builtin(b) => &b.name,
            Entity::Method(m) => &m.name,
            Entity::Enum(e) => &e.name,
            Entity::Utility(u) => &u.name,
        }
    }

    pub fn to_record(&self) -> EntityRecord {
        match *self {
            Entity::Class(c) => EntityRecord::Class(c.clone()),
            Entity::Builtin(b) => EntityRecord::Builtin(b.clone()),
            Entity::Method(m) => EntityRecord::Method(m.clone()),
            Entity::Enum(e) => EntityRecord::Enum(e.clone()),
            Entity::Utility(u) => EntityRecord::Utility(u.clone()),
        }
    }
}

/// Owned copy of an entity, detached from the snapshot it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityRecord {
    Class(ClassEntity),
    Builtin(BuiltinEntity),
    Method(MethodEntity),
    Enum(EnumEntity),
    Utility(UtilityFunction),
}

impl EntityRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRecord::Class(_) => EntityKind::Class,
            EntityRecord::Builtin(_) => EntityKind::Builtin,
            EntityRecord::Method(_) => EntityKind::Method,
            EntityRecord::Enum(_) => EntityKind::Enum,
            EntityRecord::Utility(_) => EntityKind::Utility,
        }
    }

    pub fn qualified_name(&self) -> &str {
        match self {
            EntityRecord::Class(c) => &c.name,
            EntityRecord::Builtin(b) => &b.name,
            EntityRecord::Method(m) => &m.qualified_name,
            EntityRecord::Enum(e) => &e.qualified_name,
            EntityRecord::Utility(u) => &u.name,
        }
    }
}

/// Validated canonical model produced by the loader
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiModel {
    pub version: String,
    pub configurations: Vec<Configuration>,
    pub classes: Vec<ClassEntity>,
    pub builtins: Vec<BuiltinEntity>,
    pub methods: Vec<MethodEntity>,
    pub enums: Vec<EnumEntity>,
    pub utilities: Vec<UtilityFunction>,
    pub singletons: Vec<Singleton>,
    pub native_structures: Vec<NativeStructure>,
    pub global_constants: Vec<GlobalConstant>,
}

impl ApiModel {
    pub fn class(&self, id: ClassId) -> &ClassEntity {
        &self.classes[id.index()]
    }

    pub fn builtin(&self, id: BuiltinId) -> &BuiltinEntity {
        &self.builtins[id.index()]
    }

    pub fn method(&self, id: MethodId) -> &MethodEntity {
        &self.methods[id.index()]
    }

    pub fn enumeration(&self, id: EnumId) -> &EnumEntity {
        &self.enums[id.index()]
    }

    pub fn utility(&self, id: UtilityId) -> &UtilityFunction {
        &self.utilities[id.index()]
    }

    /// Resolve a typed reference into a borrowed entity view
    pub fn entity(&self, entity: EntityRef) -> Entity<'_> {
        match entity {
            EntityRef::Class(id) => Entity::Class(self.class(id)),
            EntityRef::Builtin(id) => Entity::Builtin(self.builtin(id)),
            EntityRef::Method(id) => Entity::Method(self.method(id)),
            EntityRef::Enum(id) => Entity::Enum(self.enumeration(id)),
            EntityRef::Utility(id) => Entity::Utility(self.utility(id)),
        }
    }

    /// Every entity reference in arena order, kind by kind
    pub fn entity_refs(&self) -> impl Iterator<Item = EntityRef> + '_ {
        let classes = (0..self.classes.len()).map(|i| EntityRef::Class(ClassId::from_index(i)));
        let builtins =
            (0..self.builtins.len()).map(|i| EntityRef::Builtin(BuiltinId::from_index(i)));
        let methods = (0..self.methods.len()).map(|i| EntityRef::Method(MethodId::from_index(i)));
        let enums = (0..self.enums.len()).map(|i| EntityRef::Enum(EnumId::from_index(i)));
        let utilities =
            (0..self.utilities.len()).map(|i| EntityRef::Utility(UtilityId::from_index(i)));
        classes
            .chain(builtins)
            .chain(methods)
            .chain(enums)
            .chain(utilities)
    }

    pub fn configuration(&self, name: &str) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.name == name)
    }

    pub fn configuration_names(&self) -> Vec<String> {
        self.configurations.iter().map(|c| c.name.clone()).collect()
    }

    pub fn configuration_index(&self, name: &str) -> Option<usize> {
        self.configurations.iter().position(|c| c.name == name)
    }

    /// Number of entities of one kind
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Class => self.classes.len(),
            EntityKind::Builtin => self.builtins.len(),
            EntityKind::Method => self.methods.len(),
            EntityKind::Enum => self.enums.len(),
            EntityKind::Utility => self.utilities.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_model() -> ApiModel {
        ApiModel {
            version: "test".into(),
            configurations: vec![Configuration {
                name: "float_32".into(),
                real_size: 4,
                pointer_size: 4,
            }],
            classes: vec![ClassEntity::new("Object")],
            builtins: vec![BuiltinEntity::new("Color")],
            ..ApiModel::default()
        }
    }

    #[test]
    fn test_entity_refs_cover_every_arena() {
        let model = tiny_model();
        let refs: Vec<EntityRef> = model.entity_refs().collect();
        assert_eq!(
            refs,
            vec![
                EntityRef::Class(ClassId(0)),
                EntityRef::Builtin(BuiltinId(0))
            ]
        );
    }

    #[test]
    fn test_entity_view_names() {
        let model = tiny_model();
        let entity = model.entity(EntityRef::Builtin(BuiltinId(0)));
        assert_eq!(entity.kind(), EntityKind::Builtin);
        assert_eq!(entity.qualified_name(), "Color");
        assert_eq!(entity.to_record().qualified_name(), "Color");
    }

    #[test]
    fn test_configuration_lookup() {
        let model = tiny_model();
        assert_eq!(model.configuration_index("float_32"), Some(0));
        assert!(model.configuration("float_64").is_none());
        assert_eq!(model.configuration_names(), vec!["float_32".to_string()]);
    }

    #[test]
    fn test_entity_serializes_with_kind_tag() {
        let model = tiny_model();
        let json = serde_json::to_value(model.entity(EntityRef::Class(ClassId(0))))
            .expect("entity serializes");
        assert_eq!(json["kind"], "class");
        assert_eq!(json["name"], "Object");
    }
}
