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

use crate::span::Span;
use std::fmt;
use thiserror::Error;

/// Convenience alias used by every fallible stage of the pipeline.
pub type CalcResult<T> = Result<T, CalcError>;

/// What went wrong, independent of where it happened.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    /// Unrecognized input. Reported, skipped, and never fatal.
    #[error("{0}")]
    Lexical(String),

    /// Grammar violation or unexpected end of input.
    #[error("{0}")]
    Syntax(String),

    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("undefined function '{0}'")]
    UndefinedFunction(String),

    #[error("function '{name}' expects {expected} argument(s), received {received}")]
    ArityMismatch {
        name: String,
        expected: usize,
        received: usize,
    },

    #[error("{0}")]
    InvalidIncrementTarget(String),

    #[error("{0}")]
    TypeMismatch(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow while evaluating '{0}'")]
    Overflow(String),

    #[error("maximum call depth of {0} exceeded")]
    RecursionLimit(usize),

    #[error("failed to write program output: {0}")]
    Output(String),

    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

impl ErrorKind {
    /// Stable error code (E_SYNTAX, E_REFERENCE, ...)
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Lexical(_) => "E_LEXICAL",
            ErrorKind::Syntax(_) => "E_SYNTAX",
            ErrorKind::UndefinedVariable(_) => "E_REFERENCE",
            ErrorKind::UndefinedFunction(_) => "E_REFERENCE",
            ErrorKind::ArityMismatch { .. } => "E_ARITY",
            ErrorKind::InvalidIncrementTarget(_) => "E_INCREMENT",
            ErrorKind::TypeMismatch(_) => "E_TYPE",
            ErrorKind::DivisionByZero => "E_ARITHMETIC",
            ErrorKind::Overflow(_) => "E_ARITHMETIC",
            ErrorKind::RecursionLimit(_) => "E_RECURSION",
            ErrorKind::Output(_) => "E_OUTPUT",
            ErrorKind::InternalInvariantViolation(_) => "E_INTERNAL",
        }
    }

    /// Only lexical errors are recovered locally; everything else aborts the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ErrorKind::Lexical(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalcError {
    pub kind: ErrorKind,

    /// Primary source location, when one is known.
    pub span: Option<Span>,

    /// Optional note / help text
    pub help: Option<String>,
}

impl CalcError {
    /// Generic constructor
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            span: None,
            help: None,
        }
    }

    pub fn at(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span: Some(span),
            help: None,
        }
    }

    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self::at(ErrorKind::Lexical(message.into()), span)
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::at(ErrorKind::Syntax(message.into()), span)
    }

    pub fn undefined_variable(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedVariable(name.into()))
    }

    pub fn undefined_function(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedFunction(name.into()))
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch(message.into()))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalInvariantViolation(message.into()))
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Human-readable error message
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Fills in a location unless a more precise one is already attached.
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code(), self.kind)?;
        if let Some(span) = self.span {
            write!(f, " at {}", span)?;
        }
        Ok(())
    }
}

impl std::error::Error for CalcError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_message_names_both_counts() {
        let err = CalcError::new(ErrorKind::ArityMismatch {
            name: "h".into(),
            expected: 1,
            received: 2,
        });
        assert_eq!(err.code(), "E_ARITY");
        assert_eq!(err.message(), "function 'h' expects 1 argument(s), received 2");
    }

    #[test]
    fn or_span_keeps_the_first_location() {
        let err = CalcError::undefined_variable("y")
            .or_span(Span::new(2, 4))
            .or_span(Span::new(9, 9));
        assert_eq!(err.span, Some(Span::new(2, 4)));
        assert_eq!(err.to_string(), "error[E_REFERENCE]: undefined variable 'y' at 2:4");
    }

    #[test]
    fn only_lexical_errors_are_recoverable() {
        assert!(!ErrorKind::Lexical("x".into()).is_fatal());
        assert!(ErrorKind::DivisionByZero.is_fatal());
    }
}
