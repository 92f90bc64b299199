//! Infrastructure layer: file export and I/O-level errors

pub mod error;
pub mod export;

pub use error::{InfraError, InfraResult};
pub use export::{write_document, write_document_with};
