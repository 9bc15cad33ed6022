//! TINY parser crate.
//!
//! Lexer, arena-allocated AST, and recursive-descent parser for the TINY
//! language. The parser produces a read-only [`ast::Program`] whose nodes
//! live in a caller-supplied [`bumpalo::Bump`] arena.
//!
//! # Example
//!
//! ```
//! use tinylang_parser::Parser;
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let source = "read x; if 0 < x then write x else write 0 endif";
//!
//! let program = Parser::parse(source, &arena).unwrap();
//! assert_eq!(program.stmts().len(), 2);
//! ```

pub mod ast;
pub mod lexer;

pub use ast::{Parser, Program};
pub use lexer::{Lexer, Token, TokenKind};
