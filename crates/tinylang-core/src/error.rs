//! Unified error types for the TINY compiler.
//!
//! One error enum per phase, so callers can match on exactly the failures a
//! phase can produce:
//!
//! ```text
//! TinyError (top-level wrapper)
//! ├── LexError      - tokenization errors
//! ├── ParseError    - syntax errors (with ParseErrorKind)
//! ├── CompileError  - code-generation errors
//! └── RuntimeError  - TM execution traps
//! ```

use thiserror::Error;

use crate::Span;

// ============================================================================
// Lexer errors
// ============================================================================

/// Errors that occur during tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character outside the TINY alphabet was encountered.
    #[error("unexpected character '{ch}' at {span}")]
    UnexpectedChar { ch: char, span: Span },

    /// A `{ ... }` comment ran to end of file.
    #[error("unterminated comment at {span}")]
    UnterminatedComment { span: Span },
}

impl LexError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
            LexError::UnterminatedComment { span } => *span,
        }
    }
}

// ============================================================================
// Parse errors
// ============================================================================

/// Categories of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A specific token was expected but not found.
    ExpectedToken,
    /// A statement was expected.
    ExpectedStatement,
    /// An expression operand was expected.
    ExpectedExpression,
    /// Unexpected end of file.
    UnexpectedEof,
    /// The lexer produced an error token.
    InvalidToken,
}

/// A syntax error with its category and location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {span}")]
pub struct ParseError {
    /// What went wrong, structurally.
    pub kind: ParseErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Where it went wrong.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(ParseErrorKind::InvalidToken, err.to_string(), err.span())
    }
}

// ============================================================================
// Code-generation errors
// ============================================================================

/// Errors that occur while generating TM code.
///
/// Code generation assumes a well-formed tree; these cover the guards that
/// remain once the type system has ruled the rest out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// An identifier has no storage slot. Trees produced by the symbol-table
    /// builder never trigger this; hand-built trees can.
    #[error("undeclared identifier '{name}' at {span}")]
    UnresolvedIdentifier { name: String, span: Span },

    /// A reserved instruction slot reached the end of generation unpatched.
    #[error("reserved instruction slot at address {address} was never patched")]
    UnpatchedSlot { address: usize },
}

// ============================================================================
// Runtime errors
// ============================================================================

/// Traps raised while executing TM code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The program counter left instruction memory.
    #[error("instruction address {address} out of range")]
    ImemOutOfRange { address: i32 },

    /// A load or store computed an address outside data memory.
    #[error("data address {address} out of range at instruction {at}")]
    DmemOutOfRange { address: i32, at: usize },

    /// `DIV` with a zero divisor.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: usize },

    /// `IN` executed with no scripted input left.
    #[error("input exhausted at instruction {at}")]
    InputExhausted { at: usize },

    /// The machine ran longer than its fuel allows; almost always a loop
    /// that never reaches `HALT`.
    #[error("fuel exhausted after {steps} steps")]
    OutOfFuel { steps: u64 },
}

// ============================================================================
// Top-level wrapper
// ============================================================================

/// Any error from any phase of compilation or execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TinyError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
