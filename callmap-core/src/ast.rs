//! Generic syntax tree consumed by the call graph walker.
//!
//! The walker does not operate on `syn` types directly. Each source file is
//! lowered into this reduced tree, which keeps only the distinctions the
//! walk cares about: is a node a function definition, a call expression,
//! or anything else.

use std::path::PathBuf;

/// Position of a node in the analyzed source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// File the node was parsed from
    pub file: PathBuf,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

/// Node classification used by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A function or method definition
    FunctionDefinition,
    /// A call site (direct call or method call)
    CallExpression,
    /// Any other syntax (modules, impl blocks, statements, ...)
    Other,
}

/// A node in the lowered syntax tree.
///
/// `name` may be empty for anonymous containers. `location` is only
/// guaranteed for function definitions; the walker uses it to skip
/// definitions that live outside the analyzed directory.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub name: String,
    pub location: Option<SourceLocation>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            location: None,
            children: Vec::new(),
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    /// Total node count of this subtree, including self.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(SyntaxNode::subtree_size)
            .sum::<usize>()
    }
}
