//! The parser driver: token buffer and primitive operations.
//!
//! Statement and expression grammar rules live in `stmt_parser.rs` and
//! `expr_parser.rs`; this file owns the one-token lookahead and the
//! `check`/`eat`/`expect` vocabulary those rules are written in.

use bumpalo::Bump;
use tinylang_core::{ParseError, ParseErrorKind, Span};

use super::Program;
use crate::lexer::{Lexer, Token, TokenKind};

/// Recursive-descent parser for TINY.
///
/// Holds the lexer, the arena all AST nodes are allocated into, and a
/// single token of lookahead.
pub struct Parser<'src, 'ast> {
    lexer: Lexer<'src, 'ast>,
    pub(super) arena: &'ast Bump,
    current: Token<'ast>,
}

impl<'src, 'ast> Parser<'src, 'ast> {
    /// Parse a complete program.
    ///
    /// All AST nodes are allocated in `arena`; the source string may be
    /// dropped once this returns.
    pub fn parse(source: &'src str, arena: &'ast Bump) -> Result<Program<'ast>, ParseError> {
        let mut lexer = Lexer::new(source, arena);
        let current = lexer.next_token()?;
        let mut parser = Parser {
            lexer,
            arena,
            current,
        };

        let start = parser.current.span;
        let stmts = parser.parse_stmt_seq()?;
        parser.expect(TokenKind::Eof)?;

        let span = stmts
            .last()
            .map(|last| start.merge(last.span()))
            .unwrap_or(start);
        Ok(Program::new(stmts, span))
    }

    /// The current (not yet consumed) token.
    #[inline]
    pub(super) fn peek(&self) -> &Token<'ast> {
        &self.current
    }

    /// Whether the current token has the given kind.
    #[inline]
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consume the current token and return it.
    pub(super) fn bump(&mut self) -> Result<Token<'ast>, ParseError> {
        let token = self.current;
        self.current = self.lexer.next_token()?;
        Ok(token)
    }

    /// Consume the current token if it has the given kind.
    pub(super) fn eat(&mut self, kind: TokenKind) -> Result<Option<Token<'ast>>, ParseError> {
        if self.check(kind) {
            self.bump().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Consume the current token, requiring the given kind.
    pub(super) fn expect(&mut self, kind: TokenKind) -> Result<Token<'ast>, ParseError> {
        if self.check(kind) {
            return self.bump();
        }
        Err(self.expected(kind.describe()))
    }

    /// Build an "expected X, found Y" error at the current token.
    pub(super) fn expected(&self, what: &str) -> ParseError {
        let found = self.current.kind;
        let kind = if found == TokenKind::Eof {
            ParseErrorKind::UnexpectedEof
        } else {
            ParseErrorKind::ExpectedToken
        };
        ParseError::new(
            kind,
            format!("expected {}, found {}", what, found.describe()),
            self.span(),
        )
    }

    /// The span of the current token.
    #[inline]
    pub(super) fn span(&self) -> Span {
        self.current.span
    }
}
