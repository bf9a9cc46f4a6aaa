/*
 * ==========================================================================
 * PAWCALC - Code with Claws!
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * Github:   https://github.com/samwilcox/pawx
 *
 * License:
 * This file is part of the PAWX programming language project.
 *
 * PAWX is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 * Full license text available at:
 *    https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use crate::error::{CalcError, CalcResult};
use crate::lexer::{Keyword, Token, TokenKind};
use crate::parser::parser::Parser;

impl Parser {
    /// Returns the current token without consuming it.
    pub fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Returns the token after the current one. Sticks to `Eof`.
    pub fn peek_next(&self) -> &Token {
        let index = (self.current + 1).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Returns the previously consumed token.
    pub fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    /// Returns true if the parser is at EOF.
    pub fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    /// Advances one token forward. Never moves past `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.current].clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Checks the current token's kind without consuming it.
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.peek().kind.same_variant(kind)
    }

    /// Checks for a keyword without consuming it.
    pub fn check_keyword(&self, kw: Keyword) -> bool {
        self.peek().kind == TokenKind::Keyword(kw)
    }

    /// Consumes the current token if it has the given kind.
    pub fn match_kind(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Matches a keyword and consumes it if present.
    pub fn match_keyword(&mut self, kw: Keyword) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a required token or fails with a syntax error that
    /// describes what was `expected`.
    pub fn consume(&mut self, kind: &TokenKind, expected: &str) -> CalcResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(expected))
        }
    }

    /// Consumes and returns an identifier.
    pub fn consume_identifier(&mut self, expected: &str) -> CalcResult<Token> {
        self.consume(&TokenKind::Identifier, expected)
    }

    /// Builds a syntax error pointing at the current token.
    pub fn error_at_current(&self, expected: &str) -> CalcError {
        let token = self.peek();
        let found = if token.is_eof() {
            "unexpected end of input".to_string()
        } else {
            format!("unexpected token '{}'", token.lexeme)
        };
        CalcError::syntax(format!("{}, expected {}", found, expected), token.span)
    }
}
