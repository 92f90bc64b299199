//! Visitor protocol for element trees.
//!
//! # Traversal Order
//!
//! [`walk`] owns the traversal: depth-first, pre-order, children left-to-right.
//! A node's children are read after its visit returns, so a strategy that edits
//! the child list of the visited node (see [`RemoveEntity`]) is honoured by the
//! rest of the walk. Strategies never recurse themselves.
//!
//! # Writing a Visitor
//!
//! ```
//! use xmlmodel::domain::{walk, ElementId, ElementTree, VisitResult};
//!
//! let mut tree = ElementTree::with_root("plano").unwrap();
//! let root = tree.root().unwrap();
//! tree.append_child(root, "curso").unwrap();
//!
//! let mut count = 0;
//! walk(&mut tree, root, &mut |_: &mut ElementTree, _: ElementId| {
//!     count += 1;
//!     VisitResult::Continue
//! });
//! assert_eq!(count, 2);
//! ```

use std::io::{self, Write};

use tracing::{debug, instrument};

use crate::domain::arena::{Attributes, ElementId, ElementTree};

/// Result of visiting a node - controls traversal behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Continue traversal into children.
    #[default]
    Continue,

    /// Skip children, continue with siblings.
    SkipChildren,

    /// Stop traversal entirely.
    Stop,
}

/// A traversal strategy invoked once per element in pre-order.
pub trait Visitor {
    fn visit(&mut self, tree: &mut ElementTree, id: ElementId) -> VisitResult;
}

impl<F> Visitor for F
where
    F: FnMut(&mut ElementTree, ElementId) -> VisitResult,
{
    fn visit(&mut self, tree: &mut ElementTree, id: ElementId) -> VisitResult {
        self(tree, id)
    }
}

/// Walks the subtree rooted at `start`, handing every element to `visitor`.
///
/// Returns the number of elements visited.
#[instrument(level = "trace", skip(tree, visitor))]
pub fn walk<V>(tree: &mut ElementTree, start: ElementId, visitor: &mut V) -> usize
where
    V: Visitor + ?Sized,
{
    let mut visited = 0;
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        if !tree.contains(current) {
            continue;
        }
        visited += 1;
        match visitor.visit(tree, current) {
            VisitResult::Continue => {
                stack.extend(tree.children(current).iter().rev().copied());
            }
            VisitResult::SkipChildren => {}
            VisitResult::Stop => break,
        }
    }

    visited
}

/// Writes the name of every visited element, one per line.
pub struct NamePrinter<W> {
    out: W,
    status: io::Result<()>,
}

impl<W: Write> NamePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out, status: Ok(()) }
    }

    /// Flushes and returns the writer, or the first write error that stopped the walk.
    pub fn finish(self) -> io::Result<W> {
        finish_output(self.out, self.status)
    }
}

impl<W: Write> Visitor for NamePrinter<W> {
    fn visit(&mut self, tree: &mut ElementTree, id: ElementId) -> VisitResult {
        let Some(element) = tree.get(id) else {
            return VisitResult::Continue;
        };
        match writeln!(self.out, "{}", element.name()) {
            Ok(()) => VisitResult::Continue,
            Err(e) => {
                self.status = Err(e);
                VisitResult::Stop
            }
        }
    }
}

fn finish_output<W: Write>(mut out: W, status: io::Result<()>) -> io::Result<W> {
    status?;
    out.flush()?;
    Ok(out)
}

/// Writes `Attributes of {name}: {key=value, ...}` for every visited element.
pub struct AttributePrinter<W> {
    out: W,
    status: io::Result<()>,
}

impl<W: Write> AttributePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out, status: Ok(()) }
    }

    pub fn finish(self) -> io::Result<W> {
        finish_output(self.out, self.status)
    }
}

impl<W: Write> Visitor for AttributePrinter<W> {
    fn visit(&mut self, tree: &mut ElementTree, id: ElementId) -> VisitResult {
        let Some(element) = tree.get(id) else {
            return VisitResult::Continue;
        };
        let pairs = element
            .attributes()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        match writeln!(self.out, "Attributes of {}: {{{pairs}}}", element.name()) {
            Ok(()) => VisitResult::Continue,
            Err(e) => {
                self.status = Err(e);
                VisitResult::Stop
            }
        }
    }
}

/// Collects `(name, attributes)` of every visited element in visit order.
#[derive(Debug, Default)]
pub struct AttributeCollector {
    pub entries: Vec<(String, Attributes)>,
}

impl AttributeCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Visitor for AttributeCollector {
    fn visit(&mut self, tree: &mut ElementTree, id: ElementId) -> VisitResult {
        if let Some(element) = tree.get(id) {
            self.entries
                .push((element.name().to_string(), element.attributes().clone()));
        }
        VisitResult::Continue
    }
}

/// Sets `key=value` on every element named `target`.
#[derive(Debug, Clone)]
pub struct AddAttribute {
    target: String,
    key: String,
    value: String,
}

impl AddAttribute {
    pub fn new(target: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Visitor for AddAttribute {
    fn visit(&mut self, tree: &mut ElementTree, id: ElementId) -> VisitResult {
        if let Some(element) = tree.get_mut(id) {
            if element.name() == self.target {
                element.add_attribute(self.key.clone(), self.value.clone());
            }
        }
        VisitResult::Continue
    }
}

/// Renames every element named `old` to `new`.
///
/// Construct through [`crate::domain::Document::rename_global_entity`] or make
/// sure `new` is not empty; the visitor itself cannot report errors.
#[derive(Debug, Clone)]
pub struct RenameEntity {
    old: String,
    new: String,
    pub renamed: usize,
}

impl RenameEntity {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
            renamed: 0,
        }
    }
}

impl Visitor for RenameEntity {
    fn visit(&mut self, tree: &mut ElementTree, id: ElementId) -> VisitResult {
        if let Some(element) = tree.get_mut(id) {
            if element.name() == self.old && element.rename(self.new.as_str()).is_ok() {
                self.renamed += 1;
            }
        }
        VisitResult::Continue
    }
}

/// On every element named `target`, moves the value of `old_key` to `new_key`.
#[derive(Debug, Clone)]
pub struct RenameAttribute {
    target: String,
    old_key: String,
    new_key: String,
}

impl RenameAttribute {
    pub fn new(
        target: impl Into<String>,
        old_key: impl Into<String>,
        new_key: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            old_key: old_key.into(),
            new_key: new_key.into(),
        }
    }
}

impl Visitor for RenameAttribute {
    fn visit(&mut self, tree: &mut ElementTree, id: ElementId) -> VisitResult {
        if let Some(element) = tree.get_mut(id) {
            if element.name() == self.target {
                element.rename_attribute(&self.old_key, self.new_key.clone());
            }
        }
        VisitResult::Continue
    }
}

/// Drops every child named `target` from the visited element before the walk
/// descends. The element the walk starts from is never removed.
#[derive(Debug, Clone)]
pub struct RemoveEntity {
    target: String,
    pub removed: usize,
}

impl RemoveEntity {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            removed: 0,
        }
    }
}

impl Visitor for RemoveEntity {
    fn visit(&mut self, tree: &mut ElementTree, id: ElementId) -> VisitResult {
        let removed = tree.remove_children_named(id, &self.target);
        if removed > 0 {
            debug!(removed, target = %self.target, "removed children");
        }
        self.removed += removed;
        VisitResult::Continue
    }
}

/// Deletes `key` from every element named `target`.
#[derive(Debug, Clone)]
pub struct RemoveAttribute {
    target: String,
    key: String,
}

impl RemoveAttribute {
    pub fn new(target: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            key: key.into(),
        }
    }
}

impl Visitor for RemoveAttribute {
    fn visit(&mut self, tree: &mut ElementTree, id: ElementId) -> VisitResult {
        if let Some(element) = tree.get_mut(id) {
            if element.name() == self.target {
                element.remove_attribute(&self.key);
            }
        }
        VisitResult::Continue
    }
}
