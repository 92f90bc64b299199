//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::ElementId;

/// Domain errors represent malformed input to the tree or the mapper.
///
/// Lookup misses (renaming or removing something that is not there) are not
/// errors; every tree operation treats them as no-ops.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("element name must not be empty")]
    EmptyName,

    #[error("tree has no root element")]
    MissingRoot,

    #[error("unknown element: {0}")]
    UnknownElement(ElementId),

    #[error("adding {child} under {parent} would create a cycle")]
    CycleDetected { parent: ElementId, child: ElementId },

    #[error("value is not a record: got {kind}")]
    NotARecord { kind: &'static str },

    #[error("record has no type name")]
    MissingTypeName,

    #[error("adapter for {type_name} failed: {message}")]
    Adapter { type_name: String, message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
