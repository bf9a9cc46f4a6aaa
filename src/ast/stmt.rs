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

use serde::Serialize;

use crate::ast::expr::Expr;
use crate::span::Span;

/// A user function: name, ordered parameter names, body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// An executable statement and where it starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtKind {
    /* ----------------------------- */
    /* SIMPLE STATEMENTS             */
    /* ----------------------------- */

    Assign { name: String, value: Expr },

    Print(Expr),

    Return(Option<Expr>),

    /// Bare call, postfix increment, or any other expression run for its
    /// side effects.
    Expression(Expr),

    /* ----------------------------- */
    /* CONTROL FLOW                  */
    /* ----------------------------- */

    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },

    While {
        condition: Expr,
        body: Vec<Stmt>,
    },

    For {
        init: Box<Stmt>,
        condition: Expr,
        step: Box<Stmt>,
        body: Vec<Stmt>,
    },

    /* ----------------------------- */
    /* DECLARATIONS                  */
    /* ----------------------------- */

    /// Tagged by the parser when it reads the declaration keyword.
    Function(FunctionDecl),
}

impl StmtKind {
    /// Short name used by the trace log and the graph export.
    pub fn tag(&self) -> &'static str {
        match self {
            StmtKind::Assign { .. } => "assign",
            StmtKind::Print(_) => "print",
            StmtKind::Return(_) => "return",
            StmtKind::Expression(_) => "expression",
            StmtKind::If { .. } => "if",
            StmtKind::While { .. } => "while",
            StmtKind::For { .. } => "for",
            StmtKind::Function(_) => "function",
        }
    }
}
