//! Indented text rendering of element subtrees.
//!
//! The shape is fixed and consumed byte-for-byte by existing readers:
//!
//! ```text
//! <plano >
//!   <curso value="MEI"/>
//!   <fuc codigo="M4310"/>
//! </plano>
//! ```
//!
//! A leaf renders as `<name attrs/>`, an inner element as an opening line, one
//! block per child and a closing line. The separator space after the name is
//! always written, so an element without attributes renders as `<name />`.

use crate::domain::arena::{Element, ElementId, ElementTree};

/// Default indentation unit: two spaces per level.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    indent: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::with_indent_width(DEFAULT_INDENT_WIDTH)
    }
}

enum Step {
    Open(ElementId, usize),
    Close(ElementId, usize),
}

impl Renderer {
    pub fn with_indent_width(width: usize) -> Self {
        Self {
            indent: " ".repeat(width),
        }
    }

    /// Renders the subtree rooted at `id` starting at indentation level 0.
    pub fn render(&self, tree: &ElementTree, id: ElementId) -> String {
        self.render_at(tree, id, 0)
    }

    /// Renders the subtree rooted at `id` with `depth` leading indentation units.
    ///
    /// Uses an explicit stack, so the rendering depth is not bounded by the call stack.
    pub fn render_at(&self, tree: &ElementTree, id: ElementId, depth: usize) -> String {
        let mut lines = Vec::new();
        let mut stack = vec![Step::Open(id, depth)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Open(current, level) => {
                    let Some(element) = tree.get(current) else {
                        continue;
                    };
                    let indent = self.indent.repeat(level);
                    let attributes = format_attributes(element);
                    if element.has_children() {
                        lines.push(format!("{indent}<{} {attributes}>", element.name()));
                        stack.push(Step::Close(current, level));
                        for &child in element.children().iter().rev() {
                            stack.push(Step::Open(child, level + 1));
                        }
                    } else {
                        lines.push(format!("{indent}<{} {attributes}/>", element.name()));
                    }
                }
                Step::Close(current, level) => {
                    if let Some(element) = tree.get(current) {
                        let indent = self.indent.repeat(level);
                        lines.push(format!("{indent}</{}>", element.name()));
                    }
                }
            }
        }

        lines.join("\n")
    }
}

fn format_attributes(element: &Element) -> String {
    element
        .attributes()
        .iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders with the default two-space indentation.
pub fn render(tree: &ElementTree, id: ElementId) -> String {
    Renderer::default().render(tree, id)
}
