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

//! Tree-walking execution of a parsed [`Program`].
//!
//! One [`Interpreter`] owns all state of a run: the scope stack, the
//! function table, the output sink and the pending post-increments.
//! Statement execution lives in `statements.rs`, expression evaluation in
//! `expressions.rs`, user-function calls in `calls.rs`.

pub mod calls;
pub mod environment;
pub mod expressions;
pub mod functions;
pub mod helpers;
pub mod statements;

use std::io::Write;

use crate::ast::Program;
use crate::config::InterpreterConfig;
use crate::error::{CalcError, CalcResult, ErrorKind};
use crate::trace::Tracer;
use crate::value::Value;

pub use environment::Environment;
pub use functions::FunctionRegistry;
pub use statements::ExecSignal;

pub struct Interpreter<W: Write> {
    env: Environment,
    functions: FunctionRegistry,
    config: InterpreterConfig,
    out: W,
    tracer: Tracer,

    /// Number of user-function calls currently executing.
    call_depth: usize,

    /// Post-increment write-backs not yet applied, oldest first.
    pending: Vec<(String, Value)>,
}

impl<W: Write> Interpreter<W> {
    pub fn new(config: InterpreterConfig, out: W) -> Self {
        Self {
            env: Environment::new(),
            functions: FunctionRegistry::new(),
            tracer: Tracer::new(config.trace),
            config,
            out,
            call_depth: 0,
            pending: Vec::new(),
        }
    }

    /// Registers every declaration, then executes the entry sequence in
    /// order. The first fatal error aborts the run.
    pub fn run(&mut self, program: &Program) -> CalcResult<()> {
        // A failed earlier run may have left write-backs queued.
        self.pending.clear();
        self.functions.register_all(&program.functions);
        self.trace(|| format!("registered {} function(s)", program.functions.len()));

        for stmt in &program.main {
            if let ExecSignal::Return(_) = self.exec_stmt(stmt)? {
                return Err(CalcError::internal("'return' reached the top level").or_span(stmt.span));
            }
        }

        self.out
            .flush()
            .map_err(|e| CalcError::new(ErrorKind::Output(e.to_string())))
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Applies every pending post-increment through the normal write rule.
    fn commit_pending(&mut self) {
        for (name, value) in std::mem::take(&mut self.pending) {
            self.env.set(&name, value);
        }
    }

    fn trace(&self, message: impl FnOnce() -> String) {
        self.tracer.event(self.call_depth, message);
    }
}
