//! Domain layer: the element tree and everything built on it
//!
//! This layer is independent of external concerns (no files, no CLI, no config loading).

pub mod arena;
pub mod document;
pub mod error;
pub mod mapper;
pub mod path;
pub mod serialize;
pub mod visitor;

pub use arena::{Attributes, Element, ElementId, ElementTree};
pub use document::Document;
pub use error::{DomainError, DomainResult};
pub use mapper::{
    AddPercentage, Adapter, AdapterRegistry, FieldValue, Mapper, Record, ToFieldValue, ToRecord,
    TransformRegistry, Transformer,
};
pub use path::{find, PathQuery, DESCENDANT_OR_SELF};
pub use serialize::Renderer;
pub use visitor::{
    walk, AddAttribute, AttributeCollector, AttributePrinter, NamePrinter, RemoveAttribute,
    RemoveEntity, RenameAttribute, RenameEntity, VisitResult, Visitor,
};
