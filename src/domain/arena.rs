use std::fmt;

use generational_arena::{Arena, Index};
use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

/// Ordered attribute mapping; overwriting a key keeps its original position.
pub type Attributes = IndexMap<String, String>;

/// Stable handle to an element stored in an [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Index);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{slot}.{generation}")
    }
}

/// One tagged node: name, ordered attributes and links into the arena.
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    attributes: Attributes,
    /// Index of parent element in the arena, None for roots and detached elements
    parent: Option<ElementId>,
    /// Indices of child elements in the arena, in document order
    children: Vec<ElementId>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            attributes: Attributes::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the element. Empty names are rejected.
    pub fn rename(&mut self, name: impl Into<String>) -> DomainResult<()> {
        self.name = validate_name(name.into())?;
        Ok(())
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets an attribute. An existing key keeps its position and gets the new value.
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn add_attributes<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in pairs {
            self.add_attribute(key, value);
        }
    }

    /// Removes an attribute, closing the gap so the remaining order is kept.
    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(key)
    }

    /// Moves the value stored under `old` to `new`, appending `new` at the end.
    ///
    /// Returns false (and changes nothing) when `old` is absent.
    pub fn rename_attribute(&mut self, old: &str, new: impl Into<String>) -> bool {
        match self.attributes.shift_remove(old) {
            Some(value) => {
                self.attributes.insert(new.into(), value);
                true
            }
            None => false,
        }
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

fn validate_name(name: String) -> DomainResult<String> {
    if name.is_empty() {
        Err(DomainError::EmptyName)
    } else {
        Ok(name)
    }
}

/// Arena-based element tree.
///
/// Elements own their children through index lists and point back to their
/// parent by index, so the tree needs no reference counting. Elements can live
/// detached (no parent, not the root) until [`ElementTree::add_child`] links them.
#[derive(Debug, Default)]
pub struct ElementTree {
    arena: Arena<Element>,
    root: Option<ElementId>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Creates a tree holding a single root element.
    pub fn with_root(name: impl Into<String>) -> DomainResult<Self> {
        let mut tree = Self::new();
        let root = tree.create_element(name)?;
        tree.root = Some(root);
        Ok(tree)
    }

    /// Creates a detached element with no attributes and no children.
    #[instrument(level = "trace", skip(self, name))]
    pub fn create_element(&mut self, name: impl Into<String>) -> DomainResult<ElementId> {
        let name = validate_name(name.into())?;
        Ok(ElementId(self.arena.insert(Element::new(name))))
    }

    /// Creates an element and appends it to `parent` in one step.
    pub fn append_child(
        &mut self,
        parent: ElementId,
        name: impl Into<String>,
    ) -> DomainResult<ElementId> {
        let child = self.create_element(name)?;
        self.add_child(parent, child)?;
        Ok(child)
    }

    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    /// Designates an existing element as root, detaching it from any parent.
    pub fn set_root(&mut self, id: ElementId) -> DomainResult<()> {
        self.element(id)?;
        self.detach(id);
        self.root = Some(id);
        Ok(())
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.arena.contains(id.0)
    }

    /// Number of elements in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.arena.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.arena.get_mut(id.0)
    }

    pub fn element(&self, id: ElementId) -> DomainResult<&Element> {
        self.get(id).ok_or(DomainError::UnknownElement(id))
    }

    pub fn element_mut(&mut self, id: ElementId) -> DomainResult<&mut Element> {
        self.get_mut(id).ok_or(DomainError::UnknownElement(id))
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(Element::parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(Element::children).unwrap_or(&[])
    }

    /// Appends `child` to `parent` and points `child` back at it.
    ///
    /// A child that already hangs under another element is unlinked from that
    /// element first, so every attached element has exactly one parent.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> DomainResult<()> {
        self.element(parent)?;
        let leaf = !self.element(child)?.has_children();
        // a leaf's subtree is itself, so only the self-link can close a cycle
        let cycle = if leaf {
            child == parent
        } else {
            self.is_ancestor_or_self(child, parent)
        };
        if cycle {
            return Err(DomainError::CycleDetected { parent, child });
        }

        self.detach(child);
        if self.root == Some(child) {
            self.root = None;
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Unlinks an element from its parent without dropping it from the arena.
    pub fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.get_mut(id).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(node) = self.get_mut(parent) {
            node.children.retain(|&c| c != id);
        }
    }

    /// Drops an element and its whole subtree. Returns the number of elements removed.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, id: ElementId) -> usize {
        if !self.contains(id) {
            return 0;
        }
        self.detach(id);
        if self.root == Some(id) {
            self.root = None;
        }

        let doomed: Vec<ElementId> = self.iter_postorder_from(id).map(|(idx, _)| idx).collect();
        for idx in &doomed {
            self.arena.remove(idx.0);
        }
        doomed.len()
    }

    /// Removes every immediate child of `id` named `name`. Returns how many were removed.
    pub fn remove_children_named(&mut self, id: ElementId, name: &str) -> usize {
        let doomed: Vec<ElementId> = self
            .children(id)
            .iter()
            .copied()
            .filter(|&c| self.get(c).is_some_and(|e| e.name == name))
            .collect();
        for child in &doomed {
            self.remove(*child);
        }
        doomed.len()
    }

    /// Removes every descendant of `id` named `name`; `id` itself is never removed.
    ///
    /// Removed elements take their subtrees with them, so nothing below a
    /// removed element is inspected.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_entities_by_name(&mut self, id: ElementId, name: &str) -> usize {
        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            removed += self.remove_children_named(current, name);
            stack.extend(self.children(current).iter().rev().copied());
        }
        debug!(removed, "removed entities");
        removed
    }

    /// Renames every element in the subtree rooted at `id`, `id` included.
    #[instrument(level = "debug", skip(self))]
    pub fn rename_entities_by_name(
        &mut self,
        id: ElementId,
        old: &str,
        new: &str,
    ) -> DomainResult<usize> {
        let new = validate_name(new.to_string())?;
        let matching: Vec<ElementId> = self
            .iter_from(id)
            .filter(|(_, e)| e.name == old)
            .map(|(idx, _)| idx)
            .collect();
        for idx in &matching {
            if let Some(node) = self.get_mut(*idx) {
                node.name.clone_from(&new);
            }
        }
        Ok(matching.len())
    }

    fn is_ancestor_or_self(&self, candidate: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(idx) = current {
            if idx == candidate {
                return true;
            }
            current = self.parent(idx);
        }
        false
    }

    /// Pre-order, depth-first, left-to-right walk over the whole tree.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, self.root)
    }

    pub fn iter_from(&self, start: ElementId) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, Some(start))
    }

    pub fn iter_postorder_from(&self, start: ElementId) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, Some(start))
    }

    /// Height of the subtree rooted at `id`; a leaf has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, id: ElementId) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(id, 1)];
        while let Some((current, depth)) = stack.pop() {
            if !self.contains(current) {
                continue;
            }
            max_depth = max_depth.max(depth);
            for &child in self.children(current) {
                stack.push((child, depth + 1));
            }
        }
        max_depth
    }

    /// Number of elements in the subtree rooted at `id`, `id` included.
    pub fn deep_element_count(&self, id: ElementId) -> usize {
        self.iter_from(id).count()
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a ElementTree,
    stack: Vec<ElementId>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a ElementTree, start: Option<ElementId>) -> Self {
        Self {
            tree,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (ElementId, &'a Element);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.get(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev().copied());
                return Some((current, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a ElementTree,
    stack: Vec<(ElementId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a ElementTree, start: Option<ElementId>) -> Self {
        Self {
            tree,
            stack: start.map(|id| (id, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (ElementId, &'a Element);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get(current) {
                if visited {
                    return Some((current, node));
                }
                self.stack.push((current, true));
                for &child in node.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
