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

use std::io::Write;

use crate::ast::{BinaryOp, Expr};
use crate::error::{CalcError, CalcResult, ErrorKind};
use crate::interpreter::helpers::{apply_binary, increment};
use crate::interpreter::Interpreter;
use crate::value::Value;

impl<W: Write> Interpreter<W> {
    /// Reduces an expression to a value.
    ///
    /// `&&` and `||` only evaluate their right operand when the left one
    /// does not already decide the result.
    pub fn eval_expr(&mut self, expr: &Expr) -> CalcResult<Value> {
        match expr {
            Expr::Number(n) => Ok(Value::Int(*n)),

            Expr::Variable { name, span } => self.env.get(name).map_err(|e| e.or_span(*span)),

            Expr::Binary {
                op: BinaryOp::And,
                left,
                right,
            } => {
                if !self.eval_expr(left)?.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval_expr(right)?.is_truthy()))
            }

            Expr::Binary {
                op: BinaryOp::Or,
                left,
                right,
            } => {
                if self.eval_expr(left)?.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval_expr(right)?.is_truthy()))
            }

            Expr::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                apply_binary(*op, left, right)
            }

            Expr::Call { name, args, span } => {
                self.call_function(name, args).map_err(|e| e.or_span(*span))
            }

            Expr::Increment { name, span } => {
                self.eval_increment(name).map_err(|e| e.or_span(*span))
            }
        }
    }

    /// `name++`: yields the current value and queues `value + 1` for the
    /// end of the enclosing statement.
    ///
    /// A name already queued in the same statement continues from its
    /// queued value, so `x++ + x++` sees 0 then 1.
    fn eval_increment(&mut self, name: &str) -> CalcResult<Value> {
        let queued = self
            .pending
            .iter()
            .rev()
            .find(|(pending, _)| pending == name)
            .map(|(_, value)| *value);

        let current = match queued.or_else(|| self.env.lookup(name)) {
            Some(value) => value,
            None => {
                return Err(CalcError::new(ErrorKind::InvalidIncrementTarget(format!(
                    "cannot increment undefined variable '{}'",
                    name
                ))))
            }
        };

        self.pending.push((name.to_string(), increment(current)?));
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::InterpreterConfig;
    use crate::error::{CalcResult, ErrorKind};
    use crate::interpreter::Interpreter;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use crate::value::Value;

    fn run(source: &str) -> (CalcResult<()>, Interpreter<Vec<u8>>) {
        let (tokens, errors) = tokenize(source);
        assert!(errors.is_empty(), "{:?}", errors);
        let program = parse(tokens).expect("parses");

        let mut interpreter = Interpreter::new(InterpreterConfig::default(), Vec::new());
        let result = interpreter.run(&program);
        (result, interpreter)
    }

    fn var(interpreter: &Interpreter<Vec<u8>>, name: &str) -> Option<Value> {
        interpreter.environment().lookup(name)
    }

    #[test]
    fn increment_yields_old_value_then_commits() {
        let (result, interpreter) = run("x = 4; y = x++;");
        assert_eq!(result, Ok(()));
        assert_eq!(var(&interpreter, "y"), Some(Value::Int(4)));
        assert_eq!(var(&interpreter, "x"), Some(Value::Int(5)));
    }

    #[test]
    fn repeated_increments_in_one_statement_accumulate() {
        let (result, interpreter) = run("x = 0; y = x++ + x++;");
        assert_eq!(result, Ok(()));
        assert_eq!(var(&interpreter, "y"), Some(Value::Int(1)));
        assert_eq!(var(&interpreter, "x"), Some(Value::Int(2)));
    }

    #[test]
    fn failed_run_leaves_no_increment_behind() {
        let (result, mut interpreter) = run("x = 1; y = x++ + missing;");
        assert_eq!(result.unwrap_err().kind, ErrorKind::UndefinedVariable("missing".into()));
        assert_eq!(var(&interpreter, "x"), Some(Value::Int(1)));

        let (tokens, _) = tokenize("print(x); print(x);");
        let program = parse(tokens).expect("parses");
        assert_eq!(interpreter.run(&program), Ok(()));

        let out = String::from_utf8(interpreter.into_output()).expect("utf-8");
        assert_eq!(out, "calc > 1\ncalc > 1\n");
    }

    #[test]
    fn increment_of_undefined_variable_is_rejected() {
        let (result, _) = run("q++;");
        assert_eq!(
            result.unwrap_err().kind,
            ErrorKind::InvalidIncrementTarget("cannot increment undefined variable 'q'".into())
        );
    }

    #[test]
    fn and_skips_right_operand_when_left_is_falsy() {
        let (result, interpreter) = run("a = 0; r = (a != 0) && (1 / a > 0); s = 0 && missing;");
        assert_eq!(result, Ok(()));
        assert_eq!(var(&interpreter, "r"), Some(Value::Bool(false)));
        assert_eq!(var(&interpreter, "s"), Some(Value::Bool(false)));
    }

    #[test]
    fn or_skips_right_operand_when_left_is_truthy() {
        let (result, interpreter) = run("r = 1 || undefined_fn(); s = 0 || 2;");
        assert_eq!(result, Ok(()));
        assert_eq!(var(&interpreter, "r"), Some(Value::Bool(true)));
        assert_eq!(var(&interpreter, "s"), Some(Value::Bool(true)));
    }

    #[test]
    fn undefined_variable_points_at_the_name() {
        let (result, _) = run("x = 1;\nprint(x + y);");
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedVariable("y".into()));
        assert_eq!(err.span.map(|s| (s.line, s.column)), Some((2, 11)));
    }

    #[test]
    fn division_is_always_true_division() {
        let (result, interpreter) = run("q = 7 / 2; w = 6 / 3;");
        assert_eq!(result, Ok(()));
        assert_eq!(var(&interpreter, "q"), Some(Value::Float(3.5)));
        assert_eq!(var(&interpreter, "w"), Some(Value::Float(2.0)));
    }
}
