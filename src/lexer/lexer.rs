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

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CalcError;
use crate::lexer::keywords::keyword;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// Operator and punctuation table.
///
/// Order matters: two-character operators come before their one-character
/// prefixes so that `++`, `==` and `<=` are never split.
const SYMBOLS: &[(&str, TokenKind)] = &[
    ("++", TokenKind::PlusPlus),
    ("==", TokenKind::EqualEqual),
    ("<=", TokenKind::LessEqual),
    (">=", TokenKind::GreaterEqual),
    ("!=", TokenKind::BangEqual),
    ("&&", TokenKind::And),
    ("||", TokenKind::Or),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
    ("=", TokenKind::Assign),
    ("&", TokenKind::And),
    ("|", TokenKind::Or),
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    ("{", TokenKind::LeftBrace),
    ("}", TokenKind::RightBrace),
    (",", TokenKind::Comma),
    (";", TokenKind::Semicolon),
];

struct Patterns {
    blank: Regex,
    newlines: Regex,
    number: Regex,
    identifier: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        blank: Regex::new(r"^[ \t\r]+").expect("blank pattern"),
        newlines: Regex::new(r"^\n+").expect("newline pattern"),
        number: Regex::new(r"^[0-9]+").expect("number pattern"),
        identifier: Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").expect("identifier pattern"),
    })
}

/// Converts program text into tokens, one at a time.
///
/// The lexer is an [`Iterator`]: it only scans as far as it is asked to,
/// and it always finishes with exactly one [`TokenKind::Eof`]. Cloning a
/// lexer (or calling [`Lexer::reset`]) gives an independent restart point.
///
/// Unrecognized characters are reported into [`Lexer::diagnostics`] and
/// skipped one at a time; scanning then resumes.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,

    /// Byte offset of the next unread character.
    current: usize,

    /// 1-based line of `current`.
    line: usize,

    /// Byte offset where the current line starts.
    line_start: usize,

    finished: bool,
    diagnostics: Vec<CalcError>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            current: 0,
            line: 1,
            line_start: 0,
            finished: false,
            diagnostics: Vec::new(),
        }
    }

    /// Rewinds to the start of the input and forgets earlier diagnostics.
    pub fn reset(&mut self) {
        *self = Lexer::new(self.source);
    }

    /// Lexical errors reported so far.
    pub fn diagnostics(&self) -> &[CalcError] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<CalcError> {
        self.diagnostics
    }

    /// Scans everything that is left, including the final `Eof`.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    fn span_at(&self, offset: usize) -> Span {
        let column = self.source[self.line_start..offset].chars().count() + 1;
        Span::new(self.line, column)
    }

    fn rest(&self) -> &'src str {
        &self.source[self.current..]
    }

    /// Scans the next meaningful token, or `None` at end of input.
    fn scan_token(&mut self) -> Option<Token> {
        let rules = patterns();

        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return None;
            }

            if let Some(m) = rules.blank.find(rest) {
                self.current += m.end();
                continue;
            }

            if let Some(m) = rules.newlines.find(rest) {
                self.current += m.end();
                self.line += m.end();
                self.line_start = self.current;
                continue;
            }

            let start = self.current;
            let span = self.span_at(start);

            if let Some(m) = rules.number.find(rest) {
                let text = m.as_str();
                self.current += m.end();
                match text.parse::<i64>() {
                    Ok(value) => return Some(Token::new(TokenKind::Number(value), text, span)),
                    Err(_) => {
                        self.diagnostics.push(CalcError::lexical(
                            format!("integer literal '{}' is out of range", text),
                            span,
                        ));
                        continue;
                    }
                }
            }

            if let Some(m) = rules.identifier.find(rest) {
                let text = m.as_str();
                self.current += m.end();
                let kind = match keyword(text) {
                    Some(kw) => TokenKind::Keyword(kw),
                    None => TokenKind::Identifier,
                };
                return Some(Token::new(kind, text, span));
            }

            if let Some((symbol, kind)) = SYMBOLS.iter().find(|(s, _)| rest.starts_with(s)) {
                self.current += symbol.len();
                return Some(Token::new(kind.clone(), *symbol, span));
            }

            // Anything else: report, skip exactly one character, keep going.
            let ch = rest.chars().next().unwrap_or('\0');
            self.diagnostics.push(CalcError::lexical(
                format!("unrecognized character '{}'", ch.escape_default()),
                span,
            ));
            self.current += ch.len_utf8().max(1);
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        match self.scan_token() {
            Some(token) => Some(token),
            None => {
                self.finished = true;
                Some(Token::new(TokenKind::Eof, "", self.span_at(self.current)))
            }
        }
    }
}

/// Tokenizes a complete program.
///
/// Returns the tokens (ending with `Eof`) and every lexical error that was
/// skipped along the way.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<CalcError>) {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.scan_tokens();
    (tokens, lexer.into_diagnostics())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::keywords::Keyword;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn multi_character_operators_win_over_prefixes() {
        assert_eq!(
            kinds("x++ == y <= z"),
            vec![
                TokenKind::Identifier,
                TokenKind::PlusPlus,
                TokenKind::EqualEqual,
                TokenKind::Identifier,
                TokenKind::LessEqual,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("a+++b"),
            vec![
                TokenKind::Identifier,
                TokenKind::PlusPlus,
                TokenKind::Plus,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_are_split_from_identifiers() {
        let (tokens, _) = tokenize("while whilex print_it return");
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::While));
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "whilex");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[3].kind, TokenKind::Keyword(Keyword::Return));
    }

    #[test]
    fn numbers_carry_their_value() {
        assert_eq!(kinds("0 42"), vec![TokenKind::Number(0), TokenKind::Number(42), TokenKind::Eof]);
    }

    #[test]
    fn single_and_double_logical_operators_agree() {
        assert_eq!(kinds("& && | ||"), vec![
            TokenKind::And,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Or,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn newlines_advance_the_line_counter() {
        let (tokens, _) = tokenize("x\n\n  y");
        assert_eq!(tokens[0].span, Span::new(1, 1));
        assert_eq!(tokens[1].span, Span::new(3, 3));
    }

    #[test]
    fn bad_characters_are_reported_and_skipped() {
        let (tokens, errors) = tokenize("x = 1 $ 2 @;");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].span, Some(Span::new(1, 7)));
        assert!(errors[0].message().contains('$'));
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["x", "=", "1", "2", ";", ""]);
    }

    #[test]
    fn oversized_literals_are_lexical_errors() {
        let (tokens, errors) = tokenize("99999999999999999999");
        assert_eq!(errors.len(), 1);
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn the_lexer_is_lazy_and_restartable() {
        let mut lexer = Lexer::new("a b c");
        let checkpoint = lexer.clone();
        assert_eq!(lexer.next().map(|t| t.lexeme), Some("a".to_string()));
        assert_eq!(lexer.next().map(|t| t.lexeme), Some("b".to_string()));

        let mut again = checkpoint;
        assert_eq!(again.next().map(|t| t.lexeme), Some("a".to_string()));

        lexer.reset();
        assert_eq!(lexer.count(), 4);
    }

    #[test]
    fn eof_is_emitted_exactly_once() {
        let mut lexer = Lexer::new("");
        assert!(lexer.next().map(|t| t.is_eof()).unwrap_or(false));
        assert!(lexer.next().is_none());
    }
}
