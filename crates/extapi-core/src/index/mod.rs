//! Read-only lookup structures over an [`ApiModel`]
//!
//! - method hash → method (primary hashes, then compatibility hashes)
//! - (kind, qualified name) → entity, case-sensitive and case-folded
//! - token → postings, for the query router
//!
//! Built once per snapshot; never mutated afterwards.

pub mod tokens;

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use extapi_core_types::EntityKind;

use crate::errors::{ExtApiError, Result};
use crate::model::{
    ApiModel, BuiltinId, ClassId, EntityRef, EnumId, MethodId, UtilityId,
};

use tokens::{fold, word_parts};

/// How a token key relates to the entity it points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrength {
    /// Key is the entity's own name, case-folded
    Exact,
    /// Key is a word part, owner, singleton or category of the entity
    Alias,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub entity: EntityRef,
    pub strength: MatchStrength,
}

#[derive(Debug, Default)]
pub struct ModelIndex {
    methods_by_hash: HashMap<u64, MethodId>,
    methods_by_compat_hash: HashMap<u64, MethodId>,
    classes: HashMap<String, ClassId>,
    builtins: HashMap<String, BuiltinId>,
    methods: HashMap<String, MethodId>,
    enums: HashMap<String, EnumId>,
    utilities: HashMap<String, UtilityId>,
    folded: HashMap<(EntityKind, String), EntityRef>,
    methods_by_name: HashMap<String, Vec<MethodId>>,
    utilities_by_category: BTreeMap<String, Vec<UtilityId>>,
    tokens: BTreeMap<String, Vec<Posting>>,
}

fn insert_unique<Id: Copy>(
    map: &mut HashMap<String, Id>,
    kind: EntityKind,
    name: &str,
    id: Id,
    position: impl Fn(Id) -> usize,
) -> Result<()> {
    if let Some(&existing) = map.get(name) {
        return Err(ExtApiError::IndexConflict {
            namespace: format!("{} name", kind),
            key: name.to_string(),
            first: format!("{} #{}", kind, position(existing)),
            second: format!("{} #{}", kind, position(id)),
        });
    }
    map.insert(name.to_string(), id);
    Ok(())
}

fn insert_hash(
    map: &mut HashMap<u64, MethodId>,
    namespace: &str,
    model: &ApiModel,
    hash: u64,
    id: MethodId,
) -> Result<()> {
    if let Some(&existing) = map.get(&hash) {
        return Err(ExtApiError::IndexConflict {
            namespace: namespace.to_string(),
            key: hash.to_string(),
            first: model.method(existing).qualified_name.clone(),
            second: model.method(id).qualified_name.clone(),
        });
    }
    map.insert(hash, id);
    Ok(())
}

/// Token keys of one entity with their strength
fn entity_keys(model: &ApiModel, entity: EntityRef) -> Vec<(String, MatchStrength)> {
    let view = model.entity(entity);
    let exact = fold(view.name());
    let mut aliases: Vec<String> = word_parts(view.name());
    match entity {
        EntityRef::Class(id) => {
            aliases.extend(model.class(id).singletons.iter().map(|s| fold(s)));
        }
        EntityRef::Method(id) => aliases.push(fold(&model.method(id).owner.name)),
        EntityRef::Enum(id) => {
            if let Some(owner) = &model.enumeration(id).owner {
                aliases.push(fold(owner));
            }
        }
        EntityRef::Utility(id) => {
            if let Some(category) = &model.utility(id).category {
                aliases.push(fold(category));
            }
        }
        EntityRef::Builtin(_) => {}
    }

    let mut keys = vec![(exact.clone(), MatchStrength::Exact)];
    for alias in aliases {
        if alias != exact && !keys.iter().any(|(k, _)| *k == alias) {
            keys.push((alias, MatchStrength::Alias));
        }
    }
    keys
}

impl ModelIndex {
    /// Build every index over a model
    ///
    /// # Errors
    ///
    /// `IndexConflict` on a duplicate method hash (primary or compatibility)
    /// or a duplicate qualified name within a kind.
    pub fn build(model: &ApiModel) -> Result<Self> {
        let mut index = ModelIndex::default();

        for (i, class) in model.classes.iter().enumerate() {
            insert_unique(
                &mut index.classes,
                EntityKind::Class,
                &class.name,
                ClassId::from_index(i),
                ClassId::index,
            )?;
        }
        for (i, builtin) in model.builtins.iter().enumerate() {
            insert_unique(
                &mut index.builtins,
                EntityKind::Builtin,
                &builtin.name,
                BuiltinId::from_index(i),
                BuiltinId::index,
            )?;
        }
        for (i, method) in model.methods.iter().enumerate() {
            let id = MethodId::from_index(i);
            insert_unique(
                &mut index.methods,
                EntityKind::Method,
                &method.qualified_name,
                id,
                MethodId::index,
            )?;
            if let Some(hash) = method.hash {
                insert_hash(&mut index.methods_by_hash, "method hash", model, hash, id)?;
            }
            for &hash in &method.hash_compatibility {
                insert_hash(
                    &mut index.methods_by_compat_hash,
                    "method compatibility hash",
                    model,
                    hash,
                    id,
                )?;
            }
            index
                .methods_by_name
                .entry(method.name.clone())
                .or_default()
                .push(id);
        }
        for (i, enumeration) in model.enums.iter().enumerate() {
            insert_unique(
                &mut index.enums,
                EntityKind::Enum,
                &enumeration.qualified_name,
                EnumId::from_index(i),
                EnumId::index,
            )?;
        }
        for (i, utility) in model.utilities.iter().enumerate() {
            let id = UtilityId::from_index(i);
            insert_unique(
                &mut index.utilities,
                EntityKind::Utility,
                &utility.name,
                id,
                UtilityId::index,
            )?;
            index
                .utilities_by_category
                .entry(utility.category.clone().unwrap_or_default())
                .or_default()
                .push(id);
        }

        let mut tokens: BTreeMap<String, BTreeMap<EntityRef, MatchStrength>> = BTreeMap::new();
        for entity in model.entity_refs() {
            let qualified = model.entity(entity).qualified_name();
            let key = (entity.kind(), fold(qualified));
            let keep_existing = index
                .folded
                .get(&key)
                .is_some_and(|existing| model.entity(*existing).qualified_name() < qualified);
            if !keep_existing {
                index.folded.insert(key, entity);
            }

            for (token, strength) in entity_keys(model, entity) {
                let postings = tokens.entry(token).or_default();
                let slot = postings.entry(entity).or_insert(strength);
                if strength == MatchStrength::Exact {
                    *slot = MatchStrength::Exact;
                }
            }
        }
        index.tokens = tokens
            .into_iter()
            .map(|(token, postings)| {
                let postings = postings
                    .into_iter()
                    .map(|(entity, strength)| Posting { entity, strength })
                    .collect();
                (token, postings)
            })
            .collect();

        Ok(index)
    }

    /// Method declaring `hash`, consulting primary hashes first
    pub fn method_by_hash(&self, hash: u64) -> Option<MethodId> {
        self.methods_by_hash
            .get(&hash)
            .or_else(|| self.methods_by_compat_hash.get(&hash))
            .copied()
    }

    /// Case-sensitive lookup by qualified name
    pub fn get(&self, kind: EntityKind, name: &str) -> Option<EntityRef> {
        match kind {
            EntityKind::Class => self.classes.get(name).map(|&id| EntityRef::Class(id)),
            EntityKind::Builtin => self.builtins.get(name).map(|&id| EntityRef::Builtin(id)),
            EntityKind::Method => self.methods.get(name).map(|&id| EntityRef::Method(id)),
            EntityKind::Enum => self.enums.get(name).map(|&id| EntityRef::Enum(id)),
            EntityKind::Utility => self.utilities.get(name).map(|&id| EntityRef::Utility(id)),
        }
    }

    /// Exact lookup, falling back to a case-insensitive match
    pub fn get_ignore_case(&self, kind: EntityKind, name: &str) -> Option<EntityRef> {
        self.get(kind, name)
            .or_else(|| self.folded.get(&(kind, fold(name))).copied())
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.classes.get(name).copied()
    }

    /// Builtin name → id, as consumed by the layout resolver
    pub fn builtin_ids(&self) -> &HashMap<String, BuiltinId> {
        &self.builtins
    }

    /// Methods with a given unqualified name, in arena order
    pub fn methods_named(&self, name: &str) -> &[MethodId] {
        self.methods_by_name
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Unqualified method names, case-folded lookup
    pub fn method_name_ignore_case(&self, name: &str) -> Option<&str> {
        let folded = fold(name);
        self.methods_by_name
            .keys()
            .filter(|k| fold(k) == folded)
            .min()
            .map(String::as_str)
    }

    /// Utility functions of a category (`""` for uncategorized)
    pub fn utilities_in_category(&self, category: &str) -> &[UtilityId] {
        self.utilities_by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn postings(&self, token: &str) -> &[Posting] {
        self.tokens
            .get(token)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Keys strictly extending `prefix`, in key order
    pub fn keys_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [Posting])> + 'a {
        self.tokens
            .range::<str, _>((
                std::ops::Bound::Excluded(prefix),
                std::ops::Bound::Unbounded,
            ))
            .take_while(move |(key, _)| key.starts_with(prefix))
            .map(|(key, postings)| (key.as_str(), postings.as_slice()))
    }
}
