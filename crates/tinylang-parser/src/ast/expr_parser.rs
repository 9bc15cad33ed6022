//! Expression parsing.
//!
//! Three precedence levels, all left-associative, no parentheses:
//!
//! ```text
//! exp        → simple_exp [ ('<' | '=') simple_exp ]
//! simple_exp → term { ('+' | '-') term }
//! term       → factor { ('*' | '/') factor }
//! factor     → NUM | ID
//! ```
//!
//! A relational operator may appear at most once per expression; `a < b < c`
//! is a syntax error at the second `<` because a comparison result is not a
//! simple expression.

use tinylang_core::{ParseError, ParseErrorKind};

use super::expr::*;
use super::parser::Parser;
use crate::lexer::TokenKind;

impl<'src, 'ast> Parser<'src, 'ast> {
    /// Parse an expression.
    pub fn parse_expr(&mut self) -> Result<Expr<'ast>, ParseError> {
        let lhs = self.parse_simple_expr()?;

        let op = match self.peek().kind {
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::Eq => BinaryOp::Eq,
            _ => return Ok(lhs),
        };
        self.bump()?;
        let rhs = self.parse_simple_expr()?;

        Ok(self.binary(op, lhs, rhs))
    }

    /// Parse an additive expression.
    fn parse_simple_expr(&mut self) -> Result<Expr<'ast>, ParseError> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.bump()?;
            let rhs = self.parse_term()?;
            lhs = self.binary(op, lhs, rhs);
        }
    }

    /// Parse a multiplicative expression.
    fn parse_term(&mut self) -> Result<Expr<'ast>, ParseError> {
        let mut lhs = self.parse_factor()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.bump()?;
            let rhs = self.parse_factor()?;
            lhs = self.binary(op, lhs, rhs);
        }
    }

    /// Parse a factor: an integer literal or a variable reference.
    fn parse_factor(&mut self) -> Result<Expr<'ast>, ParseError> {
        match self.peek().kind {
            TokenKind::Num => {
                let token = self.bump()?;
                let value: i32 = token.lexeme.parse().map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::InvalidToken,
                        format!("integer literal '{}' out of range", token.lexeme),
                        token.span,
                    )
                })?;
                Ok(Expr::Literal(LiteralExpr {
                    value,
                    span: token.span,
                }))
            }
            TokenKind::Ident => {
                let token = self.bump()?;
                Ok(Expr::Ident(IdentExpr {
                    name: token.lexeme,
                    span: token.span,
                }))
            }
            found => Err(ParseError::new(
                ParseErrorKind::ExpectedExpression,
                format!("expected number or identifier, found {}", found.describe()),
                self.span(),
            )),
        }
    }

    /// Allocate a binary node covering both operands.
    fn binary(&self, op: BinaryOp, lhs: Expr<'ast>, rhs: Expr<'ast>) -> Expr<'ast> {
        Expr::Binary(self.arena.alloc(BinaryExpr {
            op,
            lhs,
            rhs,
            span: lhs.span().merge(rhs.span()),
        }))
    }
}
