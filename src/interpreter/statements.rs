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

/*!
 * Statement Executor
 * ------------------
 *
 * Runs statements against the scope stack and the function table.
 * Expressions are evaluated by `expressions.rs`; calls by `calls.rs`.
 *
 * `return` is not an unwinding jump: every step hands back an
 * [`ExecSignal`] and every enclosing block, loop and branch passes a
 * `Return` straight up until the call boundary takes it.
 */

use std::io::Write;

use crate::ast::{Expr, Stmt, StmtKind};
use crate::error::{CalcError, CalcResult, ErrorKind};
use crate::interpreter::Interpreter;
use crate::value::Value;

/* ============================================================================
 * Execution Control Signals
 * ============================================================================
 */

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExecSignal {
    /// Fall through to the next statement.
    Completed,

    /// `return` was executed; carries its value (`Unit` for a bare return).
    Return(Value),
}

impl<W: Write> Interpreter<W> {
    /// Executes statements in order, stopping at the first `Return`.
    pub fn exec_block(&mut self, stmts: &[Stmt]) -> CalcResult<ExecSignal> {
        for stmt in stmts {
            if let signal @ ExecSignal::Return(_) = self.exec_stmt(stmt)? {
                return Ok(signal);
            }
        }

        Ok(ExecSignal::Completed)
    }

    /// Executes one statement. Errors without a location get the
    /// statement's.
    pub fn exec_stmt(&mut self, stmt: &Stmt) -> CalcResult<ExecSignal> {
        self.trace(|| format!("{} at {}", stmt.kind.tag(), stmt.span));

        self.exec_kind(&stmt.kind)
            .map_err(|err| err.or_span(stmt.span))
    }

    fn exec_kind(&mut self, kind: &StmtKind) -> CalcResult<ExecSignal> {
        match kind {
            /* ------------------------------------------------------------------
             * Simple statements
             * ---------------------------------------------------------------- */
            StmtKind::Assign { name, value } => {
                let value = self.eval_expr(value)?;
                self.env.set(name, value);
                self.commit_pending();
                Ok(ExecSignal::Completed)
            }

            StmtKind::Print(expr) => {
                let value = self.eval_expr(expr)?;
                writeln!(self.out, "{}{}", self.config.output_prefix, value)
                    .map_err(|e| CalcError::new(ErrorKind::Output(e.to_string())))?;
                self.commit_pending();
                Ok(ExecSignal::Completed)
            }

            StmtKind::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Unit,
                };
                self.commit_pending();
                Ok(ExecSignal::Return(value))
            }

            StmtKind::Expression(expr) => {
                self.eval_expr(expr)?;
                self.commit_pending();
                Ok(ExecSignal::Completed)
            }

            /* ------------------------------------------------------------------
             * Control flow
             * ---------------------------------------------------------------- */
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(condition)? {
                    self.exec_block(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_block(else_branch)
                } else {
                    Ok(ExecSignal::Completed)
                }
            }

            StmtKind::While { condition, body } => {
                while self.eval_condition(condition)? {
                    if let signal @ ExecSignal::Return(_) = self.exec_block(body)? {
                        return Ok(signal);
                    }
                }
                Ok(ExecSignal::Completed)
            }

            StmtKind::For {
                init,
                condition,
                step,
                body,
            } => {
                if let signal @ ExecSignal::Return(_) = self.exec_stmt(init)? {
                    return Ok(signal);
                }

                while self.eval_condition(condition)? {
                    if let signal @ ExecSignal::Return(_) = self.exec_block(body)? {
                        return Ok(signal);
                    }
                    if let signal @ ExecSignal::Return(_) = self.exec_stmt(step)? {
                        return Ok(signal);
                    }
                }
                Ok(ExecSignal::Completed)
            }

            /* ------------------------------------------------------------------
             * Declarations
             * ---------------------------------------------------------------- */

            // Registered before the run starts; nothing to do here.
            StmtKind::Function(_) => Ok(ExecSignal::Completed),
        }
    }

    /// Evaluates a branch or loop condition and commits its increments.
    fn eval_condition(&mut self, condition: &Expr) -> CalcResult<bool> {
        let value = self.eval_expr(condition)?;
        self.commit_pending();
        Ok(value.is_truthy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InterpreterConfig;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn run(source: &str) -> (CalcResult<()>, String) {
        let (tokens, errors) = tokenize(source);
        assert!(errors.is_empty(), "{:?}", errors);
        let program = parse(tokens).expect("parses");

        let mut interpreter = Interpreter::new(InterpreterConfig::default(), Vec::new());
        let result = interpreter.run(&program);
        let out = String::from_utf8(interpreter.into_output()).expect("utf-8");
        (result, out)
    }

    fn lines(source: &str) -> Vec<String> {
        let (result, out) = run(source);
        assert_eq!(result, Ok(()));
        out.lines().map(str::to_string).collect()
    }

    #[test]
    fn exactly_one_branch_runs() {
        assert_eq!(
            lines("if (1 < 2) { print(1); } else { print(2); }; if (0) { print(3); }"),
            vec!["calc > 1"]
        );
    }

    #[test]
    fn else_if_chains_pick_the_first_truthy_branch() {
        assert_eq!(
            lines("x = 5; if (x < 3) { print(1); } else if (x < 9) { print(2); } else { print(3); }"),
            vec!["calc > 2"]
        );
    }

    #[test]
    fn while_is_pretest() {
        assert!(lines("x = 5; while (x < 3) { print(x); x = x + 1; };").is_empty());
    }

    #[test]
    fn for_runs_step_after_body() {
        assert_eq!(
            lines("for (i = 0; i < 3; i = i + 1) { print(i); };"),
            vec!["calc > 0", "calc > 1", "calc > 2"]
        );
    }

    #[test]
    fn return_skips_the_rest_of_every_enclosing_block() {
        let source = "function f() { x = 0; while (1) { if (x == 2) { return x; } print(x); x = x + 1; } print(99); }; print(f());";
        assert_eq!(lines(source), vec!["calc > 0", "calc > 1", "calc > 2"]);
    }

    #[test]
    fn nested_declarations_do_nothing() {
        let (result, out) = run("function f() { function g() { return 1; } return 2; }; print(f()); print(g());");
        assert_eq!(out, "calc > 2\n");
        assert_eq!(result.unwrap_err().kind, ErrorKind::UndefinedFunction("g".into()));
    }

    #[test]
    fn runtime_errors_carry_the_statement_location() {
        let (result, _) = run("x = 1;\nprint(x / 0);");
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
        assert_eq!(err.span.map(|s| s.line), Some(2));
    }
}
