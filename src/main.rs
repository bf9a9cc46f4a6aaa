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

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use pawcalc::ast::{graph, Program};
use pawcalc::config::{InterpreterConfig, DEFAULT_MAX_CALL_DEPTH, DEFAULT_OUTPUT_PREFIX};
use pawcalc::diagnostics::DiagnosticPrinter;

/// pawcalc runs one program of the PAWX calculator language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Program text. When neither this nor --file is given, one line is
    /// read from stdin after a prompt.
    source: Option<String>,

    /// Read the program from a file instead.
    #[arg(short, long, conflicts_with = "source")]
    file: Option<PathBuf>,

    /// Print the parsed syntax tree before running.
    #[arg(long, value_enum)]
    emit_ast: Option<AstFormat>,

    /// Write the syntax tree export to this file instead of stdout.
    #[arg(long, requires = "emit_ast")]
    ast_out: Option<PathBuf>,

    /// Log each statement, call and return to stderr.
    #[arg(long)]
    trace: bool,

    /// Maximum nesting of user-function calls.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    /// Text in front of every printed value.
    #[arg(long, default_value = DEFAULT_OUTPUT_PREFIX)]
    prefix: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AstFormat {
    Json,
    Dot,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (name, source) = match read_program(&args) {
        Ok(program) => program,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let printer = DiagnosticPrinter::new(name, source.as_str());
    let compilation = pawcalc::compile(&source);

    for error in &compilation.lexical_errors {
        printer.print(error);
    }

    let program = match compilation.program {
        Ok(program) => program,
        Err(error) => {
            printer.print(&error);
            return ExitCode::FAILURE;
        }
    };

    if let Some(format) = args.emit_ast {
        if let Err(message) = emit_ast(&program, format, args.ast_out.as_deref()) {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    }

    let config = InterpreterConfig::default()
        .with_output_prefix(args.prefix)
        .with_max_call_depth(args.max_depth)
        .with_trace(args.trace);

    let mut out = io::stdout();

    match pawcalc::execute(&program, &config, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            printer.print(&error);
            ExitCode::FAILURE
        }
    }
}

/// Returns the display name and text of the program to run.
fn read_program(args: &Args) -> Result<(String, String), String> {
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .map(|text| (path.display().to_string(), text))
            .map_err(|e| format!("Failed to read the input file '{}': {}", path.display(), e));
    }

    if let Some(source) = &args.source {
        return Ok(("<input>".to_string(), source.clone()));
    }

    print!("{}", args.prefix);
    io::stdout()
        .flush()
        .map_err(|e| format!("Failed to show the prompt: {}", e))?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| format!("Failed to read from stdin: {}", e))?;

    Ok(("<stdin>".to_string(), line))
}

fn emit_ast(program: &Program, format: AstFormat, out: Option<&Path>) -> Result<(), String> {
    let rendered = match format {
        AstFormat::Json => serde_json::to_string_pretty(program)
            .map_err(|e| format!("Failed to serialize the syntax tree: {}", e))?,
        AstFormat::Dot => graph::to_dot(program),
    };

    match out {
        Some(path) => fs::write(path, rendered)
            .map_err(|e| format!("Failed to write '{}': {}", path.display(), e)),
        None => {
            println!("{}", rendered);
            Ok(())
        }
    }
}
