//! AST source boundary: lowering Rust source files into [`SyntaxNode`] trees.
//!
//! The walker never sees `syn` types. This module parses a file with
//! `syn::parse_file` and reduces the result to the three node kinds the
//! walk distinguishes:
//!
//! - `fn` items, impl methods, and trait default methods become
//!   FunctionDefinition nodes (located via proc-macro2 span positions)
//! - direct calls (`foo()`, `path::foo()`) and method calls
//!   (`obj.method()`) become CallExpression nodes named by the last path
//!   segment or method identifier
//! - `mod` and `impl` items become named Other containers so nesting
//!   depth survives the lowering
//!
//! A `fn` item inside another function's body lowers to a nested
//! FunctionDefinition node, which the walker attributes to its lexical
//! parent.

use std::fs;
use std::path::{Path, PathBuf};

use syn::visit::Visit;
use syn::{Expr, File, ImplItemFn, ItemFn, ItemImpl, ItemMod, TraitItemFn, Type};

use crate::ast::{NodeKind, SourceLocation, SyntaxNode};
use crate::error::{CallmapError, CallmapResult};

/// Parse one source file into a lowered syntax tree.
///
/// Unreadable or unparsable files produce a recoverable error carrying
/// the file path and diagnostic; callers skip the file and continue.
pub fn parse_source(path: &Path) -> CallmapResult<SyntaxNode> {
    let content = fs::read_to_string(path).map_err(|e| CallmapError::io(path, e))?;
    lower_source(path, &content)
}

/// Parse source text into a lowered syntax tree.
///
/// Split out from [`parse_source`] so tests can feed in-memory sources.
pub fn lower_source(path: &Path, content: &str) -> CallmapResult<SyntaxNode> {
    let ast: File = syn::parse_file(content).map_err(|e| {
        let start = e.span().start();
        CallmapError::parse_at(path, e.to_string(), start.line, start.column + 1)
    })?;
    Ok(lower_file(path, &ast))
}

/// Lower an already-parsed `syn::File` into the generic tree.
pub fn lower_file(path: &Path, ast: &File) -> SyntaxNode {
    let mut lowering = Lowering::new(path);
    lowering.visit_file(ast);
    lowering.finish()
}

/// Visitor that folds the `syn` AST into a stack of in-progress nodes.
///
/// The bottom of the stack is the file root (an anonymous Other node);
/// every definition, call, mod, and impl pushes a node, visits its
/// interior, then pops itself into its parent's child list.
struct Lowering {
    file: PathBuf,
    stack: Vec<SyntaxNode>,
}

impl Lowering {
    fn new(path: &Path) -> Self {
        Self {
            file: path.to_path_buf(),
            stack: vec![SyntaxNode::new(NodeKind::Other, "")],
        }
    }

    fn finish(mut self) -> SyntaxNode {
        // Unbalanced push/pop would leave extra frames; fold any
        // stragglers down into the root rather than lose them.
        while self.stack.len() > 1 {
            self.attach_top();
        }
        self.stack.pop().unwrap_or_else(|| SyntaxNode::new(NodeKind::Other, ""))
    }

    fn open(&mut self, node: SyntaxNode) {
        self.stack.push(node);
    }

    fn attach_top(&mut self) {
        if let Some(node) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut() {
                parent.children.push(node);
            } else {
                self.stack.push(node);
            }
        }
    }

    fn locate(&self, span: proc_macro2::Span) -> SourceLocation {
        let start = span.start();
        SourceLocation::new(self.file.clone(), start.line, start.column + 1)
    }

    fn function_node(&self, ident: &proc_macro2::Ident) -> SyntaxNode {
        SyntaxNode::new(NodeKind::FunctionDefinition, ident.to_string())
            .with_location(self.locate(ident.span()))
    }
}

impl<'ast> Visit<'ast> for Lowering {
    fn visit_item_fn(&mut self, node: &'ast ItemFn) {
        self.open(self.function_node(&node.sig.ident));
        syn::visit::visit_item_fn(self, node);
        self.attach_top();
    }

    fn visit_impl_item_fn(&mut self, node: &'ast ImplItemFn) {
        self.open(self.function_node(&node.sig.ident));
        syn::visit::visit_impl_item_fn(self, node);
        self.attach_top();
    }

    fn visit_trait_item_fn(&mut self, node: &'ast TraitItemFn) {
        // Only default method bodies contain calls, but the definition
        // node is created either way, matching fn items.
        self.open(self.function_node(&node.sig.ident));
        syn::visit::visit_trait_item_fn(self, node);
        self.attach_top();
    }

    fn visit_item_mod(&mut self, node: &'ast ItemMod) {
        self.open(SyntaxNode::new(NodeKind::Other, node.ident.to_string()));
        syn::visit::visit_item_mod(self, node);
        self.attach_top();
    }

    fn visit_item_impl(&mut self, node: &'ast ItemImpl) {
        let name = match &*node.self_ty {
            Type::Path(type_path) => type_path
                .path
                .segments
                .last()
                .map(|seg| seg.ident.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };
        self.open(SyntaxNode::new(NodeKind::Other, name));
        syn::visit::visit_item_impl(self, node);
        self.attach_top();
    }

    fn visit_expr(&mut self, node: &'ast Expr) {
        match node {
            // Direct calls: foo() or path::foo()
            Expr::Call(call) => {
                if let Expr::Path(expr_path) = &*call.func {
                    if let Some(seg) = expr_path.path.segments.last() {
                        let call_node =
                            SyntaxNode::new(NodeKind::CallExpression, seg.ident.to_string())
                                .with_location(self.locate(seg.ident.span()));
                        self.open(call_node);
                        syn::visit::visit_expr(self, node);
                        self.attach_top();
                        return;
                    }
                }
                syn::visit::visit_expr(self, node);
            }

            // Method calls: obj.method()
            Expr::MethodCall(method) => {
                let call_node =
                    SyntaxNode::new(NodeKind::CallExpression, method.method.to_string())
                        .with_location(self.locate(method.method.span()));
                self.open(call_node);
                syn::visit::visit_expr(self, node);
                self.attach_top();
            }

            _ => syn::visit::visit_expr(self, node),
        }
    }
}
