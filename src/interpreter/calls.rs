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

use crate::ast::Expr;
use crate::error::{CalcError, CalcResult, ErrorKind};
use crate::interpreter::environment::Frame;
use crate::interpreter::{ExecSignal, Interpreter};
use crate::value::Value;

impl<W: Write> Interpreter<W> {
    /// Calls a user function.
    ///
    /// 1. Look the name up in the function table
    /// 2. Evaluate the arguments left to right in the caller's frame
    /// 3. Check the argument count, then the call depth
    /// 4. Push a frame binding each parameter, run the body, pop the frame
    ///
    /// The frame is popped on every exit path, errors included. A body
    /// that finishes without `return` yields `Unit`.
    pub fn call_function(&mut self, name: &str, args: &[Expr]) -> CalcResult<Value> {
        let decl = self
            .functions
            .get(name)
            .ok_or_else(|| CalcError::undefined_function(name))?;

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?);
        }

        if values.len() != decl.params.len() {
            return Err(CalcError::new(ErrorKind::ArityMismatch {
                name: name.to_string(),
                expected: decl.params.len(),
                received: values.len(),
            }));
        }

        if self.call_depth >= self.config.max_call_depth {
            return Err(CalcError::new(ErrorKind::RecursionLimit(self.config.max_call_depth))
                .with_help("check that the recursion has a reachable base case"));
        }

        self.trace(|| {
            let shown: Vec<String> = values.iter().map(Value::to_string).collect();
            format!("call {}({})", name, shown.join(", "))
        });

        let frame: Frame = decl.params.iter().cloned().zip(values).collect();
        let caller_pending = std::mem::take(&mut self.pending);

        self.env.push_frame(frame);
        self.call_depth += 1;

        let outcome = self.exec_block(&decl.body);

        self.call_depth -= 1;
        self.env.pop_frame();
        self.pending = caller_pending;

        let value = match outcome? {
            ExecSignal::Return(value) => value,
            ExecSignal::Completed => Value::Unit,
        };

        self.trace(|| format!("return {} from {}", value, name));
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::InterpreterConfig;
    use crate::error::{CalcResult, ErrorKind};
    use crate::interpreter::Interpreter;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn run_with(config: InterpreterConfig, source: &str) -> (CalcResult<()>, Interpreter<Vec<u8>>) {
        let (tokens, errors) = tokenize(source);
        assert!(errors.is_empty(), "{:?}", errors);
        let program = parse(tokens).expect("parses");

        let mut interpreter = Interpreter::new(config, Vec::new());
        let result = interpreter.run(&program);
        (result, interpreter)
    }

    fn run(source: &str) -> (CalcResult<()>, Interpreter<Vec<u8>>) {
        run_with(InterpreterConfig::default(), source)
    }

    fn output(interpreter: Interpreter<Vec<u8>>) -> String {
        String::from_utf8(interpreter.into_output()).expect("utf-8")
    }

    #[test]
    fn arity_is_checked_before_the_body_runs() {
        let (result, interpreter) = run("function h(a) { print(a); return a; }; print(h(1, 2));");
        assert_eq!(
            result.unwrap_err().kind,
            ErrorKind::ArityMismatch {
                name: "h".into(),
                expected: 1,
                received: 2
            }
        );
        assert_eq!(output(interpreter), "");
    }

    #[test]
    fn frames_are_released_after_failed_calls() {
        let (result, interpreter) = run("function bad(n) { return n / 0; }; x = bad(1);");
        assert_eq!(result.unwrap_err().kind, ErrorKind::DivisionByZero);
        assert_eq!(interpreter.environment().depth(), 1);
        assert_eq!(interpreter.call_depth(), 0);
    }

    #[test]
    fn arguments_are_evaluated_in_the_caller_frame() {
        let (result, interpreter) =
            run("function f(a, b) { return a - b; }; a = 10; b = 4; print(f(b, a));");
        assert_eq!(result, Ok(()));
        assert_eq!(output(interpreter), "calc > -6\n");
    }

    #[test]
    fn callees_see_and_update_caller_variables() {
        let (result, interpreter) =
            run("function bump() { counter = counter + 1; }; counter = 1; bump(); bump(); print(counter);");
        assert_eq!(result, Ok(()));
        assert_eq!(output(interpreter), "calc > 3\n");
    }

    #[test]
    fn body_without_return_yields_none() {
        let (result, interpreter) = run("function f() { y = 1; }; print(f());");
        assert_eq!(result, Ok(()));
        assert_eq!(output(interpreter), "calc > none\n");
    }

    #[test]
    fn recursion_and_forward_references_work() {
        let source = "print(fact(5)); function fact(n) { if (n <= 1) { return 1; } return n * fact(n - 1); };";
        let (result, interpreter) = run(source);
        assert_eq!(result, Ok(()));
        assert_eq!(output(interpreter), "calc > 120\n");
    }

    #[test]
    fn runaway_recursion_hits_the_depth_limit() {
        let config = InterpreterConfig::default().with_max_call_depth(25);
        let (result, interpreter) = run_with(config, "function f(n) { return f(n + 1); }; f(0);");
        assert_eq!(result.unwrap_err().kind, ErrorKind::RecursionLimit(25));
        assert_eq!(interpreter.environment().depth(), 1);
    }

    #[test]
    fn caller_increments_survive_the_call() {
        let (result, interpreter) =
            run("function id(v) { return v; }; x = 1; y = id(x++); print(x); print(y);");
        assert_eq!(result, Ok(()));
        assert_eq!(output(interpreter), "calc > 2\ncalc > 1\n");
    }
}
