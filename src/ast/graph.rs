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

//! Graphviz export of a parsed program.
//!
//! Purely a viewer: nothing here feeds back into evaluation.

use crate::ast::{Expr, FunctionDecl, Program, Stmt, StmtKind};

/// Renders `program` as a Graphviz `digraph`.
///
/// Every AST node becomes one box; edges run from parent to child in
/// source order and are labelled with the role of the child.
pub fn to_dot(program: &Program) -> String {
    let mut graph = DotGraph::new();
    let root = graph.node("Program");

    let functions = graph.node("functions");
    graph.edge(root, functions, None);
    for decl in &program.functions {
        let id = graph.function(decl);
        graph.edge(functions, id, None);
    }

    let main = graph.block("main", &program.main);
    graph.edge(root, main, None);

    graph.finish()
}

struct DotGraph {
    out: String,
    next_id: usize,
}

impl DotGraph {
    fn new() -> Self {
        Self {
            out: String::from("digraph ast {\n  node [shape=box, fontname=\"monospace\"];\n"),
            next_id: 0,
        }
    }

    fn finish(mut self) -> String {
        self.out.push_str("}\n");
        self.out
    }

    fn node(&mut self, label: &str) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.out
            .push_str(&format!("  n{} [label=\"{}\"];\n", id, escape(label)));
        id
    }

    fn edge(&mut self, from: usize, to: usize, label: Option<&str>) {
        match label {
            Some(label) => self.out.push_str(&format!(
                "  n{} -> n{} [label=\"{}\"];\n",
                from,
                to,
                escape(label)
            )),
            None => self.out.push_str(&format!("  n{} -> n{};\n", from, to)),
        }
    }

    fn block(&mut self, label: &str, stmts: &[Stmt]) -> usize {
        let id = self.node(label);
        for stmt in stmts {
            let child = self.stmt(stmt);
            self.edge(id, child, None);
        }
        id
    }

    fn function(&mut self, decl: &FunctionDecl) -> usize {
        let id = self.node(&format!("function {}({})", decl.name, decl.params.join(", ")));
        let body = self.block("body", &decl.body);
        self.edge(id, body, None);
        id
    }

    fn stmt(&mut self, stmt: &Stmt) -> usize {
        match &stmt.kind {
            StmtKind::Assign { name, value } => {
                let id = self.node(&format!("assign {}", name));
                let value = self.expr(value);
                self.edge(id, value, None);
                id
            }
            StmtKind::Print(expr) => {
                let id = self.node("print");
                let child = self.expr(expr);
                self.edge(id, child, None);
                id
            }
            StmtKind::Return(expr) => {
                let id = self.node("return");
                if let Some(expr) = expr {
                    let child = self.expr(expr);
                    self.edge(id, child, None);
                }
                id
            }
            StmtKind::Expression(expr) => self.expr(expr),
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let id = self.node("if");
                let cond = self.expr(condition);
                self.edge(id, cond, Some("cond"));
                let then_id = self.block("then", then_branch);
                self.edge(id, then_id, None);
                if let Some(else_branch) = else_branch {
                    let else_id = self.block("else", else_branch);
                    self.edge(id, else_id, None);
                }
                id
            }
            StmtKind::While { condition, body } => {
                let id = self.node("while");
                let cond = self.expr(condition);
                self.edge(id, cond, Some("cond"));
                let body = self.block("body", body);
                self.edge(id, body, None);
                id
            }
            StmtKind::For {
                init,
                condition,
                step,
                body,
            } => {
                let id = self.node("for");
                let init = self.stmt(init);
                self.edge(id, init, Some("init"));
                let cond = self.expr(condition);
                self.edge(id, cond, Some("cond"));
                let step = self.stmt(step);
                self.edge(id, step, Some("step"));
                let body = self.block("body", body);
                self.edge(id, body, None);
                id
            }
            StmtKind::Function(decl) => self.function(decl),
        }
    }

    fn expr(&mut self, expr: &Expr) -> usize {
        match expr {
            Expr::Number(n) => self.node(&n.to_string()),
            Expr::Variable { name, .. } => self.node(name),
            Expr::Binary { op, left, right } => {
                let id = self.node(op.symbol());
                let left = self.expr(left);
                self.edge(id, left, None);
                let right = self.expr(right);
                self.edge(id, right, None);
                id
            }
            Expr::Call { name, args, .. } => {
                let id = self.node(&format!("call {}", name));
                for (i, arg) in args.iter().enumerate() {
                    let child = self.expr(arg);
                    self.edge(id, child, Some(format!("arg {}", i).as_str()));
                }
                id
            }
            Expr::Increment { name, .. } => self.node(&format!("{}++", name)),
        }
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;
    use crate::span::Span;

    #[test]
    fn renders_one_node_per_ast_node() {
        let program = Program {
            functions: vec![],
            main: vec![Stmt {
                kind: StmtKind::Print(Expr::binary(
                    BinaryOp::Add,
                    Expr::Number(1),
                    Expr::Number(2),
                )),
                span: Span::new(1, 1),
            }],
        };

        let dot = to_dot(&program);
        assert!(dot.starts_with("digraph ast {"));
        assert!(dot.trim_end().ends_with('}'));
        // Program, functions, main, print, +, 1, 2
        assert_eq!(dot.matches("[label=").count(), 7);
        assert!(dot.contains("label=\"print\""));
        assert!(dot.contains("n4 -> n5;"));
    }

    #[test]
    fn quotes_in_labels_are_escaped() {
        assert_eq!(escape("a\"b"), "a\\\"b");
    }
}
