//! Value-to-element mapping.
//!
//! A record becomes an element named after its type. Every non-null field
//! becomes an attribute in declaration order; its text comes from the
//! transform registered for `(type, field)` or, failing that, from the value's
//! default string form. Finally the adapter registered for the type, if any,
//! gets to rewrite the new element.

pub mod registry;
pub mod value;

use tracing::{debug, instrument, trace};

use crate::domain::arena::{ElementId, ElementTree};
use crate::domain::error::{DomainError, DomainResult};

pub use registry::{AddPercentage, Adapter, AdapterRegistry, TransformRegistry, Transformer};
pub use value::{FieldValue, Record, ToFieldValue, ToRecord};

/// Mapping pipeline holding the caller's transforms and adapters.
#[derive(Debug, Default)]
pub struct Mapper {
    transforms: TransformRegistry,
    adapters: AdapterRegistry,
}

impl Mapper {
    pub fn new(transforms: TransformRegistry, adapters: AdapterRegistry) -> Self {
        Self {
            transforms,
            adapters,
        }
    }

    pub fn transforms(&self) -> &TransformRegistry {
        &self.transforms
    }

    pub fn transforms_mut(&mut self) -> &mut TransformRegistry {
        &mut self.transforms
    }

    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    pub fn adapters_mut(&mut self) -> &mut AdapterRegistry {
        &mut self.adapters
    }

    /// Maps a typed value into a new detached element of `tree`.
    pub fn map<T: ToRecord + ?Sized>(
        &self,
        tree: &mut ElementTree,
        value: &T,
    ) -> DomainResult<ElementId> {
        self.map_record(tree, &value.to_record())
    }

    /// Maps a dynamic value. Anything but [`FieldValue::Record`] is rejected.
    pub fn map_value(&self, tree: &mut ElementTree, value: &FieldValue) -> DomainResult<ElementId> {
        match value {
            FieldValue::Record(record) => self.map_record(tree, record),
            other => Err(DomainError::NotARecord { kind: other.kind() }),
        }
    }

    pub fn map_record(&self, tree: &mut ElementTree, record: &Record) -> DomainResult<ElementId> {
        map_record(tree, record, &self.transforms, &self.adapters)
    }
}

/// One-shot mapping with borrowed registries.
pub fn map_value(
    tree: &mut ElementTree,
    value: &FieldValue,
    transforms: &TransformRegistry,
    adapters: &AdapterRegistry,
) -> DomainResult<ElementId> {
    let record = match value {
        FieldValue::Record(record) => record,
        other => return Err(DomainError::NotARecord { kind: other.kind() }),
    };
    map_record(tree, record, transforms, adapters)
}

/// Builds the element for `record`: attributes from non-null fields, then the
/// type's adapter.
#[instrument(level = "debug", skip_all, fields(type_name = record.type_name()))]
pub fn map_record(
    tree: &mut ElementTree,
    record: &Record,
    transforms: &TransformRegistry,
    adapters: &AdapterRegistry,
) -> DomainResult<ElementId> {
    let type_name = record.type_name();
    if type_name.is_empty() {
        return Err(DomainError::MissingTypeName);
    }

    let id = tree.create_element(type_name)?;
    let element = tree.element_mut(id)?;
    for (field, value) in record.fields() {
        if value.is_null() {
            trace!(field = field.as_str(), "skipping null field");
            continue;
        }
        let text = match transforms.get(type_name, field) {
            Some(transformer) => {
                trace!(
                    field = field.as_str(),
                    transformer = transformer.name(),
                    "applying transform"
                );
                transformer.transform(value)
            }
            None => value.to_string(),
        };
        element.add_attribute(field.as_str(), text);
    }

    if let Some(adapter) = adapters.get(type_name) {
        debug!(adapter = adapter.name(), "applying adapter");
        adapter.adapt(tree, id)?;
    }

    Ok(id)
}
