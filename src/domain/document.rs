use std::fmt;
use std::io::{self, Write};

use tracing::instrument;

use crate::domain::arena::{Element, ElementId, ElementTree};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::path;
use crate::domain::serialize::{self, Renderer};
use crate::domain::visitor::{
    walk, AddAttribute, RemoveAttribute, RemoveEntity, RenameAttribute, RenameEntity, Visitor,
};

/// A handle to one element tree and its root.
///
/// Every global operation builds one visitor and walks the tree once from the root.
#[derive(Debug)]
pub struct Document {
    tree: ElementTree,
    root: ElementId,
}

impl Document {
    /// Creates a document whose tree holds only a root named `root_name`.
    pub fn new(root_name: impl Into<String>) -> DomainResult<Self> {
        let tree = ElementTree::with_root(root_name)?;
        Self::from_tree(tree)
    }

    /// Wraps an existing tree. The tree must have a root.
    pub fn from_tree(tree: ElementTree) -> DomainResult<Self> {
        let root = tree.root().ok_or(DomainError::MissingRoot)?;
        Ok(Self { tree, root })
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// None once the root was removed or replaced through [`Document::tree_mut`].
    pub fn root_element(&self) -> Option<&Element> {
        self.tree
            .root()
            .filter(|&root| root == self.root)
            .and_then(|root| self.tree.get(root))
    }

    /// Makes `id` the document root, detaching it from its parent.
    pub fn set_root(&mut self, id: ElementId) -> DomainResult<()> {
        self.tree.set_root(id)?;
        self.root = id;
        Ok(())
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    /// Structural access to the tree.
    ///
    /// The document keeps its own root handle: re-root with [`Document::set_root`],
    /// not [`ElementTree::set_root`], or global operations keep walking the old root.
    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut self.tree
    }

    pub fn into_tree(self) -> ElementTree {
        self.tree
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.tree.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.tree.get_mut(id)
    }

    /// Runs `visitor` over the whole document in pre-order.
    pub fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V) -> usize {
        walk(&mut self.tree, self.root, visitor)
    }

    /// Resolves a path expression against the whole document.
    pub fn find(&self, expr: &str) -> Vec<ElementId> {
        path::find(&self.tree, self.root, expr)
    }

    /// Like [`Document::find`], returning the matching elements themselves.
    pub fn find_elements(&self, expr: &str) -> Vec<&Element> {
        self.find(expr)
            .into_iter()
            .filter_map(|id| self.tree.get(id))
            .collect()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn add_global_attribute(&mut self, entity: &str, key: &str, value: &str) {
        self.accept(&mut AddAttribute::new(entity, key, value));
    }

    /// Renames every element named `old`. Returns how many were renamed.
    #[instrument(level = "debug", skip(self))]
    pub fn rename_global_entity(&mut self, old: &str, new: &str) -> DomainResult<usize> {
        if new.is_empty() {
            return Err(DomainError::EmptyName);
        }
        let mut visitor = RenameEntity::new(old, new);
        self.accept(&mut visitor);
        Ok(visitor.renamed)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn rename_global_attribute(&mut self, entity: &str, old_key: &str, new_key: &str) {
        self.accept(&mut RenameAttribute::new(entity, old_key, new_key));
    }

    /// Removes every element named `entity` except the root. Returns how many
    /// subtrees were dropped.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_global_entity(&mut self, entity: &str) -> usize {
        let mut visitor = RemoveEntity::new(entity);
        self.accept(&mut visitor);
        visitor.removed
    }

    #[instrument(level = "debug", skip(self))]
    pub fn remove_global_attribute(&mut self, entity: &str, key: &str) {
        self.accept(&mut RemoveAttribute::new(entity, key));
    }

    /// Text form of the whole document with the default indentation.
    pub fn to_text(&self) -> String {
        serialize::render(&self.tree, self.root)
    }

    pub fn render_with(&self, renderer: &Renderer) -> String {
        renderer.render(&self.tree, self.root)
    }

    /// Writes the text form to `out`. Write errors are returned unchanged.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(self.to_text().as_bytes())?;
        out.flush()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
