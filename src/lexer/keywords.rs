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

/// Reserved words of the calculator language.
///
/// Keywords are recognized after the generic identifier pattern has
/// matched, by exact lookup on the identifier text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Print,
    If,
    Else,
    While,
    For,
    Function,
    Return,
}

impl Keyword {
    /// Canonical spelling, used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Print => "print",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::Function => "function",
            Keyword::Return => "return",
        }
    }
}

/// Looks up `word` in the reserved word table.
///
/// Returns `None` for ordinary names. Both `function` and the French
/// spelling `fonction` introduce a function declaration.
pub fn keyword(word: &str) -> Option<Keyword> {
    match word {
        "print" => Some(Keyword::Print),
        "if" => Some(Keyword::If),
        "else" => Some(Keyword::Else),
        "while" => Some(Keyword::While),
        "for" => Some(Keyword::For),
        "function" | "fonction" => Some(Keyword::Function),
        "return" => Some(Keyword::Return),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_declaration_spellings_are_reserved() {
        assert_eq!(keyword("function"), Some(Keyword::Function));
        assert_eq!(keyword("fonction"), Some(Keyword::Function));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(keyword("Print"), None);
        assert_eq!(keyword("printer"), None);
    }
}
