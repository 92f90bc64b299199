//! Minimal path matching: `//` selects every element, a bare tag name selects
//! every element with that name anywhere below (and including) the start.

use tracing::instrument;

use crate::domain::arena::{Element, ElementId, ElementTree};

/// Wildcard selecting every element (descendant-or-self).
pub const DESCENDANT_OR_SELF: &str = "//";

const SEPARATOR: char = '/';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathQuery {
    All,
    Named(String),
}

impl PathQuery {
    /// Parses a path expression. Leading and trailing separators are stripped;
    /// nothing left (as for `//`) means every element.
    pub fn parse(expr: &str) -> Self {
        if expr == DESCENDANT_OR_SELF {
            return Self::All;
        }
        match expr.trim_matches(SEPARATOR) {
            "" => Self::All,
            name => Self::Named(name.to_string()),
        }
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => element.name() == name,
        }
    }
}

/// Returns every element in the subtree of `start` matching `expr`, in pre-order.
#[instrument(level = "debug", skip(tree))]
pub fn find(tree: &ElementTree, start: ElementId, expr: &str) -> Vec<ElementId> {
    let query = PathQuery::parse(expr);
    tree.iter_from(start)
        .filter(|(_, element)| query.matches(element))
        .map(|(id, _)| id)
        .collect()
}
