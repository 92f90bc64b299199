//! In-memory XML element tree.
//!
//! - [`domain::ElementTree`]: arena of elements with ordered attributes and parent links
//! - [`domain::Visitor`]: pre-order traversal strategies driving the global edits
//! - [`domain::Document`]: root handle exposing `find` and the global rename/add/remove operations
//! - [`domain::Mapper`]: record-to-element projection with per-field transforms and per-type adapters
//!
//! ```
//! use xmlmodel::domain::Document;
//!
//! let mut doc = Document::new("plano").unwrap();
//! let root = doc.root();
//! let curso = doc.tree_mut().append_child(root, "curso").unwrap();
//! doc.get_mut(curso).unwrap().add_attribute("value", "MEI");
//!
//! doc.rename_global_attribute("curso", "value", "descricao");
//! assert_eq!(doc.to_text(), "<plano >\n  <curso descricao=\"MEI\"/>\n</plano>");
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
mod macros;
pub mod sample;
pub mod util;
