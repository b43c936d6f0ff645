//! Binary layout of builtin value types
//!
//! Fields are placed in declaration order: each offset is the running cursor
//! rounded up to the field's alignment, the composite alignment is the
//! largest field alignment and the size is the cursor rounded up to it.
//! When every field has a declared offset under the configuration, fields are
//! walked in offset order instead. Declared offsets and sizes replace the
//! natural ones and must not overlap, must be aligned and must be large enough.
//!
//! Results are memoized per (builtin, configuration) in a [`LayoutCache`] of
//! `ArcSwapOption` slots. Readers never lock; two threads racing on an empty
//! slot both compute the same result and the last store wins.

pub mod primitive;

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::Serialize;

use crate::errors::{ExtApiError, Result};
use crate::model::{ApiModel, BuiltinId, FieldSpec};

use primitive::primitive_size;

/// Largest alignment inferred for an opaque builtin
const MAX_OPAQUE_ALIGNMENT: u32 = 8;

/// Placement of one field under one configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldLayout {
    pub name: String,
    /// Effective storage type under the configuration
    #[serde(rename = "type")]
    pub ty: String,
    pub offset: u32,
    pub size: u32,
    pub alignment: u32,
}

impl FieldLayout {
    pub fn end(&self) -> u32 {
        self.offset + self.size
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutResult {
    pub builtin: String,
    pub configuration: String,
    pub size: u32,
    pub alignment: u32,
    pub fields: Vec<FieldLayout>,
}

impl LayoutResult {
    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_opaque(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Round `value` up to a multiple of `align`
pub(crate) fn align_to(value: u32, align: u32) -> Option<u32> {
    if align <= 1 {
        Some(value)
    } else {
        value.checked_next_multiple_of(align)
    }
}

/// Largest power of two dividing `size`, capped
fn opaque_alignment(size: u32) -> u32 {
    if size == 0 {
        1
    } else {
        (1u32 << size.trailing_zeros()).min(MAX_OPAQUE_ALIGNMENT)
    }
}

/// Lock-free memo of computed layouts, one slot per (builtin, configuration)
pub struct LayoutCache {
    slots: Vec<ArcSwapOption<LayoutResult>>,
    configurations: usize,
}

impl LayoutCache {
    pub fn new(builtins: usize, configurations: usize) -> Self {
        let slots = (0..builtins * configurations)
            .map(|_| ArcSwapOption::empty())
            .collect();
        Self {
            slots,
            configurations,
        }
    }

    pub fn for_model(model: &ApiModel) -> Self {
        Self::new(model.builtins.len(), model.configurations.len())
    }

    fn slot(&self, builtin: BuiltinId, configuration: usize) -> Option<&ArcSwapOption<LayoutResult>> {
        if configuration >= self.configurations {
            return None;
        }
        self.slots
            .get(builtin.index() * self.configurations + configuration)
    }

    pub fn get(&self, builtin: BuiltinId, configuration: usize) -> Option<Arc<LayoutResult>> {
        self.slot(builtin, configuration).and_then(|s| s.load_full())
    }

    pub fn store(&self, builtin: BuiltinId, configuration: usize, layout: Arc<LayoutResult>) {
        if let Some(slot) = self.slot(builtin, configuration) {
            slot.store(Some(layout));
        }
    }

    /// Number of slots holding a computed layout
    pub fn populated(&self) -> usize {
        self.slots.iter().filter(|s| s.load().is_some()).count()
    }
}

impl std::fmt::Debug for LayoutCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutCache")
            .field("slots", &self.slots.len())
            .field("populated", &self.populated())
            .finish()
    }
}

/// Computes layouts against one model, memoizing into a cache
pub struct LayoutResolver<'a> {
    model: &'a ApiModel,
    builtins: &'a HashMap<String, BuiltinId>,
    cache: &'a LayoutCache,
}

impl<'a> LayoutResolver<'a> {
    pub fn new(
        model: &'a ApiModel,
        builtins: &'a HashMap<String, BuiltinId>,
        cache: &'a LayoutCache,
    ) -> Self {
        Self {
            model,
            builtins,
            cache,
        }
    }

    fn builtin_id(&self, name: &str) -> Result<BuiltinId> {
        self.builtins
            .get(name)
            .copied()
            .ok_or_else(|| ExtApiError::UnknownBuiltin {
                name: name.to_string(),
            })
    }

    fn configuration_index(&self, configuration: &str) -> Result<usize> {
        self.model
            .configuration_index(configuration)
            .ok_or_else(|| ExtApiError::UnknownConfiguration {
                configuration: configuration.to_string(),
                available: self.model.configuration_names(),
            })
    }

    /// Size, alignment and field offsets of a builtin under a configuration
    ///
    /// # Errors
    ///
    /// `UnknownBuiltin` is checked before `UnknownConfiguration`.
    pub fn resolve(&self, builtin: &str, configuration: &str) -> Result<Arc<LayoutResult>> {
        let id = self.builtin_id(builtin)?;
        let config_index = self.configuration_index(configuration)?;
        self.layout(id, config_index, &mut Vec::new())
    }

    /// Byte offset of one field
    ///
    /// # Errors
    ///
    /// `UnknownBuiltin`, then `UnknownConfiguration`, then `UnknownField`
    /// when the field does not exist under that configuration.
    pub fn offset_of(&self, builtin: &str, field: &str, configuration: &str) -> Result<u32> {
        let layout = self.resolve(builtin, configuration)?;
        layout
            .field(field)
            .map(|f| f.offset)
            .ok_or_else(|| ExtApiError::UnknownField {
                builtin: layout.builtin.clone(),
                field: field.to_string(),
            })
    }

    fn layout(
        &self,
        id: BuiltinId,
        config_index: usize,
        visiting: &mut Vec<BuiltinId>,
    ) -> Result<Arc<LayoutResult>> {
        if let Some(cached) = self.cache.get(id, config_index) {
            return Ok(cached);
        }
        let computed = Arc::new(self.compute(id, config_index, visiting)?);
        self.cache.store(id, config_index, Arc::clone(&computed));
        Ok(computed)
    }

    fn compute(
        &self,
        id: BuiltinId,
        config_index: usize,
        visiting: &mut Vec<BuiltinId>,
    ) -> Result<LayoutResult> {
        let builtin = self.model.builtin(id);
        let configuration = &self.model.configurations[config_index];
        let config_name = configuration.name.as_str();

        if visiting.contains(&id) {
            return Err(ExtApiError::malformed(format!(
                "Builtin {} contains itself in configuration {}",
                builtin.name, config_name
            )));
        }
        visiting.push(id);

        let mut cursor = 0u32;
        let mut alignment = 1u32;
        let mut fields = Vec::new();
        let mut members: Vec<&FieldSpec> = builtin.fields_for(config_name).collect();
        if members
            .iter()
            .all(|f| f.declared_offset(config_name).is_some())
        {
            members.sort_by_key(|f| f.declared_offset(config_name));
        }
        for field in members {
            let ty = field.effective_type(config_name);
            let (size, field_alignment) = match primitive_size(ty, configuration) {
                Some(size) => (size, size.max(1)),
                None => {
                    let nested = self.builtins.get(ty).copied().ok_or_else(|| {
                        ExtApiError::malformed(format!(
                            "Field {}.{} has undeclared type {}",
                            builtin.name, field.name, ty
                        ))
                    })?;
                    let nested = self.layout(nested, config_index, visiting)?;
                    (nested.size, nested.alignment)
                }
            };

            let offset = match field.declared_offset(config_name) {
                Some(declared) => {
                    if declared < cursor {
                        return Err(ExtApiError::malformed(format!(
                            "Field {}.{} at offset {} overlaps the previous field ending at {} in configuration {}",
                            builtin.name, field.name, declared, cursor, config_name
                        )));
                    }
                    if declared % field_alignment != 0 {
                        return Err(ExtApiError::malformed(format!(
                            "Field {}.{} at offset {} is not aligned to {} in configuration {}",
                            builtin.name, field.name, declared, field_alignment, config_name
                        )));
                    }
                    declared
                }
                None => align_to(cursor, field_alignment).ok_or_else(|| overflow(&builtin.name))?,
            };

            cursor = offset
                .checked_add(size)
                .ok_or_else(|| overflow(&builtin.name))?;
            alignment = alignment.max(field_alignment);
            fields.push(FieldLayout {
                name: field.name.clone(),
                ty: ty.to_string(),
                offset,
                size,
                alignment: field_alignment,
            });
        }
        visiting.pop();

        let declared_size = builtin.declared_size(config_name);
        let size = if fields.is_empty() {
            let size = declared_size.unwrap_or(0);
            alignment = opaque_alignment(size);
            size
        } else {
            match declared_size {
                Some(declared) => {
                    if declared < cursor {
                        return Err(ExtApiError::malformed(format!(
                            "Declared size {} of {} does not cover its fields ({} bytes) in configuration {}",
                            declared, builtin.name, cursor, config_name
                        )));
                    }
                    if declared % alignment != 0 {
                        return Err(ExtApiError::malformed(format!(
                            "Declared size {} of {} is not a multiple of its alignment {} in configuration {}",
                            declared, builtin.name, alignment, config_name
                        )));
                    }
                    declared
                }
                None => align_to(cursor, alignment).ok_or_else(|| overflow(&builtin.name))?,
            }
        };

        Ok(LayoutResult {
            builtin: builtin.name.clone(),
            configuration: config_name.to_string(),
            size,
            alignment,
            fields,
        })
    }
}

fn overflow(builtin: &str) -> ExtApiError {
    ExtApiError::malformed(format!("Layout of {} overflows 32 bits", builtin))
}

/// Resolve every (builtin, configuration) pair once, reporting the first
/// packing violation. Results are discarded.
pub fn verify_model(model: &ApiModel) -> Result<()> {
    let mut builtins = HashMap::new();
    for (i, builtin) in model.builtins.iter().enumerate() {
        builtins
            .entry(builtin.name.clone())
            .or_insert(BuiltinId::from_index(i));
    }
    let cache = LayoutCache::for_model(model);
    let resolver = LayoutResolver::new(model, &builtins, &cache);
    for i in 0..model.builtins.len() {
        for c in 0..model.configurations.len() {
            resolver.layout(BuiltinId::from_index(i), c, &mut Vec::new())?;
        }
    }
    Ok(())
}
