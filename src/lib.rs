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

//! PAWCALC: a small calculator language run by a tree-walking interpreter.
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Program → Interpreter
//! ```
//!
//! [`run`] drives the whole pipeline over one program text; [`compile`] and
//! [`execute`] expose the two halves separately.

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod trace;
pub mod value;

use std::io::Write;
use std::thread;

use crate::ast::Program;
use crate::config::InterpreterConfig;
use crate::error::{CalcError, CalcResult};
use crate::interpreter::Interpreter;

/// Output of the front half of the pipeline.
#[derive(Debug)]
pub struct Compilation {
    /// Unrecognized characters. They were skipped and never stop parsing.
    pub lexical_errors: Vec<CalcError>,

    pub program: CalcResult<Program>,
}

/// Everything a caller needs to report after [`run`].
#[derive(Debug)]
pub struct RunReport {
    pub lexical_errors: Vec<CalcError>,

    /// The syntax error or the first runtime error, if any.
    pub outcome: CalcResult<()>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Tokenizes and parses `source`.
pub fn compile(source: &str) -> Compilation {
    let (tokens, lexical_errors) = lexer::tokenize(source);

    Compilation {
        lexical_errors,
        program: parser::parse(tokens),
    }
}

/// Stack reserved for the evaluator beyond the user-function calls.
const EVAL_STACK_BASE: usize = 1 << 20;

/// Stack reserved per nested user-function call.
const EVAL_STACK_PER_CALL: usize = 64 << 10;

/// Runs an already parsed program on a fresh interpreter.
///
/// Evaluation happens on a dedicated thread whose stack grows with
/// `max_call_depth`, so the depth limit is reached before the host stack
/// runs out, whatever thread the caller is on.
pub fn execute<W: Write + Send>(
    program: &Program,
    config: &InterpreterConfig,
    out: &mut W,
) -> CalcResult<()> {
    let stack_size = config
        .max_call_depth
        .saturating_mul(EVAL_STACK_PER_CALL)
        .saturating_add(EVAL_STACK_BASE);

    thread::scope(|scope| {
        thread::Builder::new()
            .name("pawcalc-eval".to_string())
            .stack_size(stack_size)
            .spawn_scoped(scope, || Interpreter::new(config.clone(), out).run(program))
            .map_err(|e| CalcError::internal(format!("failed to start the evaluator: {}", e)))?
            .join()
            .map_err(|_| CalcError::internal("the evaluator thread panicked"))?
    })
}

/// Compiles and runs `source`, writing `print` output to `out`.
///
/// A syntax error means nothing runs and nothing is written.
pub fn run<W: Write + Send>(source: &str, config: &InterpreterConfig, out: &mut W) -> RunReport {
    let Compilation {
        lexical_errors,
        program,
    } = compile(source);

    RunReport {
        lexical_errors,
        outcome: program.and_then(|program| execute(&program, config, out)),
    }
}
