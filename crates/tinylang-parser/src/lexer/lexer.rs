//! The TINY scanner.
//!
//! Converts source text into [`Token`]s. Comments are written `{ ... }`,
//! may span lines, and do not nest. The only two-character token is `:=`;
//! a bare `:` is the case-label separator.
//!
//! Lexemes are copied into the caller's arena, so tokens outlive the source
//! string.

use bumpalo::Bump;
use tinylang_core::{LexError, Span};

use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::token::{Token, TokenKind, lookup_keyword};

/// Lexer for TINY source code.
pub struct Lexer<'src, 'ast> {
    /// Low-level character cursor.
    cursor: Cursor<'src>,
    /// Arena for allocating token lexemes.
    arena: &'ast Bump,
}

impl<'src, 'ast> Lexer<'src, 'ast> {
    /// Create a new lexer over `source`, allocating lexemes in `arena`.
    pub fn new(source: &'src str, arena: &'ast Bump) -> Self {
        Self {
            cursor: Cursor::new(source),
            arena,
        }
    }

    /// Scan and return the next token.
    ///
    /// Returns [`TokenKind::Eof`] forever once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token<'ast>, LexError> {
        self.skip_trivia()?;

        let line = self.cursor.line();
        let col = self.cursor.column();
        let start = self.cursor.offset();

        let Some(c) = self.cursor.peek() else {
            return Ok(Token::new(
                TokenKind::Eof,
                self.arena.alloc_str(""),
                Span::point(line, col),
            ));
        };

        if c.is_ascii_digit() {
            self.cursor.advance_while(|c| c.is_ascii_digit());
            return Ok(self.make_token(TokenKind::Num, line, col, start));
        }

        if is_ident_start(c) {
            self.cursor.advance_while(is_ident_continue);
            let token = self.make_token(TokenKind::Ident, line, col, start);
            let kind = lookup_keyword(token.lexeme).unwrap_or(TokenKind::Ident);
            return Ok(Token::new(kind, token.lexeme, token.span));
        }

        self.cursor.advance();
        let kind = match c {
            ':' => {
                if self.cursor.check(|c| c == '=') {
                    self.cursor.advance();
                    TokenKind::Assign
                } else {
                    TokenKind::Colon
                }
            }
            ';' => TokenKind::Semicolon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '<' => TokenKind::Lt,
            '=' => TokenKind::Eq,
            _ => {
                return Err(LexError::UnexpectedChar {
                    ch: c,
                    span: Span::new(line, col, c.len_utf8() as u32),
                });
            }
        };
        Ok(self.make_token(kind, line, col, start))
    }

    /// Skip whitespace and `{ ... }` comments.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            self.cursor.advance_while(|c| c.is_ascii_whitespace());
            if !self.cursor.check(|c| c == '{') {
                return Ok(());
            }
            let line = self.cursor.line();
            let col = self.cursor.column();
            self.cursor.advance();
            loop {
                match self.cursor.advance() {
                    Some('}') => break,
                    Some(_) => {}
                    None => {
                        return Err(LexError::UnterminatedComment {
                            span: Span::new(line, col, 1),
                        });
                    }
                }
            }
        }
    }

    /// Build a token spanning from `start` to the current position,
    /// copying the lexeme into the arena.
    fn make_token(&self, kind: TokenKind, line: u32, col: u32, start: u32) -> Token<'ast> {
        let end = self.cursor.offset();
        let lexeme = &self.cursor.source()[start as usize..end as usize];
        Token::new(
            kind,
            self.arena.alloc_str(lexeme),
            Span::new(line, col, end - start),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_kinds(source: &str) -> Vec<TokenKind> {
        let arena = Bump::new();
        let mut lexer = Lexer::new(source, &arena);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token().expect("lex error");
            let done = token.kind == TokenKind::Eof;
            kinds.push(token.kind);
            if done {
                break;
            }
        }
        kinds
    }

    #[test]
    fn scans_assignment() {
        assert_eq!(
            collect_kinds("x := 4 + 2;"),
            vec![
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Num,
                TokenKind::Plus,
                TokenKind::Num,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn distinguishes_colon_from_assign() {
        assert_eq!(
            collect_kinds("case 1 : x := 1"),
            vec![
                TokenKind::Case,
                TokenKind::Num,
                TokenKind::Colon,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Num,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert_eq!(
            collect_kinds("if x then endif"),
            vec![
                TokenKind::If,
                TokenKind::Ident,
                TokenKind::Then,
                TokenKind::Endif,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn skips_comments_including_multiline() {
        assert_eq!(
            collect_kinds("{ first } x { spans\nlines } := 1"),
            vec![
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Num,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_comment_is_an_error() {
        let arena = Bump::new();
        let mut lexer = Lexer::new("{ never closed", &arena);
        assert!(matches!(
            lexer.next_token(),
            Err(LexError::UnterminatedComment { .. })
        ));
    }

    #[test]
    fn rejects_characters_outside_the_alphabet() {
        let arena = Bump::new();
        let mut lexer = Lexer::new("x := (1)", &arena);
        lexer.next_token().unwrap(); // x
        lexer.next_token().unwrap(); // :=
        let err = lexer.next_token().unwrap_err();
        assert!(matches!(err, LexError::UnexpectedChar { ch: '(', .. }));
    }

    #[test]
    fn spans_track_lines() {
        let arena = Bump::new();
        let mut lexer = Lexer::new("x\ny", &arena);
        assert_eq!(lexer.next_token().unwrap().span, Span::new(1, 1, 1));
        assert_eq!(lexer.next_token().unwrap().span, Span::new(2, 1, 1));
    }

    #[test]
    fn eof_repeats() {
        let arena = Bump::new();
        let mut lexer = Lexer::new("", &arena);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }
}
