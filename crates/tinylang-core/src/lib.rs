//! Shared foundation for the TINY compiler.
//!
//! This crate holds the vocabulary the other crates speak:
//! - [`Span`]: source locations attached to tokens, AST nodes, and errors
//! - [`error`]: the phase-segregated error hierarchy
//! - [`TraceFlags`]: listing/trace configuration
//! - [`tm`]: the TM target-machine instruction model

pub mod error;
pub mod span;
pub mod tm;
pub mod trace;

pub use error::{CompileError, LexError, ParseError, ParseErrorKind, RuntimeError, TinyError};
pub use span::Span;
pub use trace::TraceFlags;
