//! Abstract syntax tree and parser for TINY.
//!
//! AST nodes are allocated in a [`bumpalo`] arena and borrow from it; the
//! tree is immutable once parsed and read-only to every later phase.
//!
//! # Example
//!
//! ```
//! use tinylang_parser::Parser;
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let program = Parser::parse("read x; write x + 1", &arena).unwrap();
//! assert_eq!(program.stmts().len(), 2);
//! ```

pub mod expr;
pub mod stmt;

mod expr_parser;
mod parser;
mod stmt_parser;

pub use expr::*;
pub use parser::Parser;
pub use stmt::*;

// Re-export error types from core
pub use tinylang_core::{ParseError, ParseErrorKind};

use tinylang_core::Span;

/// A parsed TINY program: the top-level statement sequence.
///
/// Borrows from the arena it was parsed into and stays valid for the
/// arena's lifetime.
#[derive(Debug)]
pub struct Program<'ast> {
    stmts: &'ast [Stmt<'ast>],
    span: Span,
}

impl<'ast> Program<'ast> {
    /// Create a new program from parsed statements.
    pub(crate) fn new(stmts: &'ast [Stmt<'ast>], span: Span) -> Self {
        Self { stmts, span }
    }

    /// The top-level statements, in execution order.
    pub fn stmts(&self) -> &'ast [Stmt<'ast>] {
        self.stmts
    }

    /// The source span covered by this program.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// An identifier with its source location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ident<'ast> {
    /// The name (allocated in the arena).
    pub name: &'ast str,
    /// Source location
    pub span: Span,
}

impl<'ast> Ident<'ast> {
    /// Create a new identifier.
    pub fn new(name: &'ast str, span: Span) -> Self {
        Self { name, span }
    }
}
