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

use crate::lexer::keywords::Keyword;
use crate::span::Span;
use std::fmt;

/// Represents the **category of a lexical token**.
///
/// Integer literals carry their parsed value; identifier text lives in
/// [`Token::lexeme`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A non-negative decimal integer literal.
    Number(i64),

    /// A user-defined name (variable or function).
    Identifier,

    /// A reserved word.
    Keyword(Keyword),

    // Arithmetic
    Plus,
    PlusPlus,
    Minus,
    Star,
    Slash,

    // Relational
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    EqualEqual,
    BangEqual,

    // Logical
    And,
    Or,

    // Punctuation
    Assign,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,

    /// End-of-input marker. Always the final token.
    Eof,
}

impl TokenKind {
    /// True when both kinds are the same variant, ignoring payloads.
    pub fn same_variant(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A single lexical token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,

    /// The exact source text that produced this token.
    pub lexeme: String,

    /// Where the token starts. The line is what diagnostics report.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    /// Prints only what the user wrote.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            write!(f, "end of input")
        } else {
            write!(f, "{}", self.lexeme)
        }
    }
}
