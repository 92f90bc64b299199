//! Per-field transforms and per-type adapters consulted by the mapper.

use std::collections::HashMap;
use std::fmt;

use crate::domain::arena::{ElementId, ElementTree};
use crate::domain::error::DomainResult;
use crate::domain::mapper::value::FieldValue;

/// Turns a raw field value into its attribute text, replacing the default conversion.
pub trait Transformer {
    fn transform(&self, value: &FieldValue) -> String;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Transformer for F
where
    F: Fn(&FieldValue) -> String,
{
    fn transform(&self, value: &FieldValue) -> String {
        self(value)
    }
}

/// Appends a percent sign: `20` becomes `20%`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddPercentage;

impl Transformer for AddPercentage {
    fn transform(&self, value: &FieldValue) -> String {
        format!("{value}%")
    }

    fn name(&self) -> &str {
        "AddPercentage"
    }
}

/// Post-processes the element just built for a value of one type.
///
/// Runs once, after the field-to-attribute mapping, and may reorder or rename
/// attributes and add synthetic attributes or children.
pub trait Adapter {
    fn adapt(&self, tree: &mut ElementTree, element: ElementId) -> DomainResult<()>;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Adapter for F
where
    F: Fn(&mut ElementTree, ElementId) -> DomainResult<()>,
{
    fn adapt(&self, tree: &mut ElementTree, element: ElementId) -> DomainResult<()> {
        self(tree, element)
    }
}

/// Transforms keyed by `(type name, field name)`.
#[derive(Default)]
pub struct TransformRegistry {
    entries: HashMap<(String, String), Box<dyn Transformer>>,
}

impl TransformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `transformer` for one field of one type, replacing any earlier entry.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        field: impl Into<String>,
        transformer: impl Transformer + 'static,
    ) -> &mut Self {
        self.entries
            .insert((type_name.into(), field.into()), Box::new(transformer));
        self
    }

    pub fn with(
        mut self,
        type_name: impl Into<String>,
        field: impl Into<String>,
        transformer: impl Transformer + 'static,
    ) -> Self {
        self.register(type_name, field, transformer);
        self
    }

    pub fn get(&self, type_name: &str, field: &str) -> Option<&dyn Transformer> {
        self.entries
            .get(&(type_name.to_string(), field.to_string()))
            .map(|entry| &**entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v.name())))
            .finish()
    }
}

/// Adapters keyed by type name.
#[derive(Default)]
pub struct AdapterRegistry {
    entries: HashMap<String, Box<dyn Adapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        adapter: impl Adapter + 'static,
    ) -> &mut Self {
        self.entries.insert(type_name.into(), Box::new(adapter));
        self
    }

    pub fn with(mut self, type_name: impl Into<String>, adapter: impl Adapter + 'static) -> Self {
        self.register(type_name, adapter);
        self
    }

    pub fn get(&self, type_name: &str) -> Option<&dyn Adapter> {
        self.entries.get(type_name).map(|entry| &**entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v.name())))
            .finish()
    }
}
