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

use std::fmt::Write as _;

use crate::error::CalcError;
use crate::span::Span;

/// Renders compiler-style diagnostics for [`CalcError`]s.
///
/// This printer:
/// - Formats errors with input name, line and column
/// - Displays the offending source line
/// - Highlights the error position with a caret (`^`)
/// - Optionally shows a help line
///
/// The layout follows `rustc`, simplified and without color.
pub struct DiagnosticPrinter {
    /// Full program text, kept whole so single lines can be quoted.
    source: String,

    /// Display name of the input (`<input>`, `<stdin>` or a file path).
    file_name: String,
}

impl DiagnosticPrinter {
    /// Creates a printer for one program.
    ///
    /// # Arguments
    /// - `file_name` → How the input is named in the `-->` line
    /// - `source` → The full program text
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Formats `error` without printing it.
    ///
    /// # Output Example
    /// ```text
    /// error[E_REFERENCE]: undefined variable 'y'
    ///   --> <input>:1:7
    ///    |
    ///  1 | print(y);
    ///    |       ^
    /// help: assign 'y' before reading it
    /// ```
    pub fn render(&self, error: &CalcError) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "error[{}]: {}", error.code(), error.message());

        if let Some(Span { line, column }) = error.span {
            // Lines are 1-indexed; a location past the end quotes nothing.
            let src_line = self.source.lines().nth(line.saturating_sub(1)).unwrap_or("");
            let gutter = line.to_string().len().max(2);

            let _ = writeln!(out, "{:>width$}--> {}:{}:{}", "", self.file_name, line, column, width = gutter);
            let _ = writeln!(out, "{:>width$} |", "", width = gutter);
            let _ = writeln!(out, "{:>width$} | {}", line, src_line, width = gutter);
            let _ = writeln!(
                out,
                "{:>width$} | {}^",
                "",
                " ".repeat(column.saturating_sub(1)),
                width = gutter
            );
        }

        if let Some(help) = &error.help {
            let _ = writeln!(out, "help: {}", help);
        }

        out
    }

    /// Prints `error` to stderr.
    pub fn print(&self, error: &CalcError) {
        eprint!("{}", self.render(error));
    }
}
