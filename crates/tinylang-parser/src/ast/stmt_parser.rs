//! Statement parsing.
//!
//! Grammar (statement separators are semicolons; a trailing semicolon
//! before a block terminator is tolerated):
//!
//! ```text
//! stmt_seq    → stmt { ';' stmt }
//! stmt        → if_stmt | repeat_stmt | while_stmt | switch_stmt
//!             | assign_stmt | read_stmt | write_stmt
//! if_stmt     → 'if' exp 'then' stmt_seq [ 'else' stmt_seq ] 'endif'
//! repeat_stmt → 'repeat' stmt_seq 'until' exp
//! while_stmt  → 'while' exp stmt_seq 'endwhile'
//! switch_stmt → 'switch' exp { 'case' exp ':' stmt_seq }+ 'endswitch'
//! assign_stmt → ID ':=' exp
//! read_stmt   → 'read' ID
//! write_stmt  → 'write' exp
//! ```

use bumpalo::collections::Vec as BVec;
use tinylang_core::{ParseError, ParseErrorKind};

use super::parser::Parser;
use super::stmt::*;
use super::Ident;
use crate::lexer::TokenKind;

impl<'src, 'ast> Parser<'src, 'ast> {
    /// Parse a statement sequence up to (not including) its terminator.
    pub(super) fn parse_stmt_seq(&mut self) -> Result<&'ast [Stmt<'ast>], ParseError> {
        let mut stmts = BVec::new_in(self.arena);
        stmts.push(self.parse_statement()?);

        while self.eat(TokenKind::Semicolon)?.is_some() {
            if self.sequence_ended() {
                break;
            }
            stmts.push(self.parse_statement()?);
        }

        Ok(self.arena.alloc_slice_copy(&stmts))
    }

    /// Whether the current token terminates a statement sequence.
    fn sequence_ended(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Else
                | TokenKind::Endif
                | TokenKind::Until
                | TokenKind::Endwhile
                | TokenKind::Case
                | TokenKind::Endswitch
                | TokenKind::Eof
        )
    }

    /// Parse a single statement, dispatching on the current token.
    pub fn parse_statement(&mut self) -> Result<Stmt<'ast>, ParseError> {
        match self.peek().kind {
            TokenKind::If => self.parse_if(),
            TokenKind::Repeat => self.parse_repeat(),
            TokenKind::While => self.parse_while(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::Read => self.parse_read(),
            TokenKind::Write => self.parse_write(),
            TokenKind::Ident => self.parse_assign(),
            found => Err(ParseError::new(
                ParseErrorKind::ExpectedStatement,
                format!("expected statement, found {}", found.describe()),
                self.span(),
            )),
        }
    }

    fn parse_if(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let start = self.expect(TokenKind::If)?.span;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::Then)?;
        let then_body = self.parse_stmt_seq()?;
        let else_body = if self.eat(TokenKind::Else)?.is_some() {
            self.parse_stmt_seq()?
        } else {
            &[]
        };
        let end = self.expect(TokenKind::Endif)?.span;

        Ok(Stmt::If(self.arena.alloc(IfStmt {
            condition,
            then_body,
            else_body,
            span: start.merge(end),
        })))
    }

    fn parse_repeat(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let start = self.expect(TokenKind::Repeat)?.span;
        let body = self.parse_stmt_seq()?;
        self.expect(TokenKind::Until)?;
        let until = self.parse_expr()?;

        Ok(Stmt::Repeat(self.arena.alloc(RepeatStmt {
            body,
            until,
            span: start.merge(until.span()),
        })))
    }

    fn parse_while(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let start = self.expect(TokenKind::While)?.span;
        let condition = self.parse_expr()?;
        let body = self.parse_stmt_seq()?;
        let end = self.expect(TokenKind::Endwhile)?.span;

        Ok(Stmt::While(self.arena.alloc(WhileStmt {
            condition,
            body,
            span: start.merge(end),
        })))
    }

    /// Parse a switch statement. At least one `case` arm is required.
    fn parse_switch(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let start = self.expect(TokenKind::Switch)?.span;
        let selector = self.parse_expr()?;

        let mut arms = BVec::new_in(self.arena);
        while self.check(TokenKind::Case) {
            let case_start = self.bump()?.span;
            let value = self.parse_expr()?;
            self.expect(TokenKind::Colon)?;
            let body = self.parse_stmt_seq()?;
            let span = body
                .last()
                .map(|last| case_start.merge(last.span()))
                .unwrap_or(case_start);
            arms.push(CaseArm { value, body, span });
        }
        if arms.is_empty() {
            return Err(self.expected("'case'"));
        }
        let end = self.expect(TokenKind::Endswitch)?.span;

        Ok(Stmt::Switch(self.arena.alloc(SwitchStmt {
            selector,
            arms: self.arena.alloc_slice_copy(&arms),
            span: start.merge(end),
        })))
    }

    fn parse_assign(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let name = self.expect(TokenKind::Ident)?;
        let target = Ident::new(name.lexeme, name.span);
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;

        Ok(Stmt::Assign(AssignStmt {
            target,
            value,
            span: name.span.merge(value.span()),
        }))
    }

    fn parse_read(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let start = self.expect(TokenKind::Read)?.span;
        let name = self.expect(TokenKind::Ident)?;

        Ok(Stmt::Read(ReadStmt {
            target: Ident::new(name.lexeme, name.span),
            span: start.merge(name.span),
        }))
    }

    fn parse_write(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let start = self.expect(TokenKind::Write)?.span;
        let value = self.parse_expr()?;

        Ok(Stmt::Write(WriteStmt {
            value,
            span: start.merge(value.span()),
        }))
    }
}
