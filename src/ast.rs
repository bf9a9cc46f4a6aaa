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

//! Syntax tree produced by the parser and consumed by the interpreter.
//!
//! The node set is closed: expressions are [`Expr`], executable statements
//! are [`Stmt`], and a whole program is a [`Program`] that already keeps its
//! function declarations apart from the statements that run.

pub mod expr;
pub mod graph;
pub mod stmt;

use serde::Serialize;

pub use expr::{BinaryOp, Expr};
pub use stmt::{FunctionDecl, Stmt, StmtKind};

/// Root of a parsed program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    /// Top-level function declarations, in source order.
    pub functions: Vec<FunctionDecl>,

    /// Every other top-level statement, in source order. This is what runs.
    pub main: Vec<Stmt>,
}

impl Program {
    /// Splits a flat top-level statement list into declarations and the
    /// entry sequence, preserving the relative order of both.
    ///
    /// Only the explicit [`StmtKind::Function`] tag marks a declaration.
    pub fn partition(statements: Vec<Stmt>) -> Self {
        let mut functions = Vec::new();
        let mut main = Vec::new();

        for stmt in statements {
            match stmt.kind {
                StmtKind::Function(decl) => functions.push(decl),
                kind => main.push(Stmt { kind, span: stmt.span }),
            }
        }

        Self { functions, main }
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.main.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn at(line: usize) -> Span {
        Span::new(line, 1)
    }

    #[test]
    fn partition_hoists_declarations_in_order() {
        let decl = |name: &str, line| Stmt {
            kind: StmtKind::Function(FunctionDecl {
                name: name.to_string(),
                params: vec![],
                body: vec![],
                span: at(line),
            }),
            span: at(line),
        };
        let print = |n, line| Stmt {
            kind: StmtKind::Print(Expr::Number(n)),
            span: at(line),
        };

        let program = Program::partition(vec![print(1, 1), decl("f", 2), print(2, 3), decl("g", 4)]);

        let names: Vec<_> = program.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["f", "g"]);
        assert_eq!(program.main, vec![print(1, 1), print(2, 3)]);
    }
}
