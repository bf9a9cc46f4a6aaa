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

use crate::ast::Program;
use crate::error::CalcResult;
use crate::lexer::{Token, TokenKind};
use crate::span::Span;

/// The recursive-descent parser.
///
/// The grammar itself is spread over `statements`, `expressions` and
/// `helpers`, each adding its own `impl Parser` block.
pub struct Parser {
    /// Complete list of tokens to be parsed. Always ends with `Eof`.
    pub tokens: Vec<Token>,

    /// Current cursor position within the token stream.
    pub current: usize,

    /// How many function bodies enclose the cursor. `return` is only
    /// legal when this is non-zero.
    pub(crate) function_depth: usize,
}

/// Public entry point for the parsing phase.
///
/// ```text
/// Source → Lexer → Tokens → Parser → Program → Interpreter
/// ```
///
/// Fails on the first grammar violation; no partial program is returned.
pub fn parse(tokens: Vec<Token>) -> CalcResult<Program> {
    Parser::new(tokens).parse()
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().map(Token::is_eof).unwrap_or(false) {
            let span = tokens.last().map(|t| t.span).unwrap_or(Span::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", span));
        }

        Self {
            tokens,
            current: 0,
            function_depth: 0,
        }
    }

    /// Parses the whole token stream.
    ///
    /// The flat list of top-level statements is split in one pass into
    /// the hoisted function declarations and the entry sequence.
    pub fn parse(&mut self) -> CalcResult<Program> {
        let mut stmts = Vec::new();

        while !self.is_at_end() {
            stmts.push(self.element()?);
        }

        Ok(Program::partition(stmts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Expr, StmtKind};
    use crate::error::ErrorKind;
    use crate::lexer::tokenize;

    fn parse_src(source: &str) -> CalcResult<Program> {
        let (tokens, errors) = tokenize(source);
        assert!(errors.is_empty(), "unexpected lexical errors: {:?}", errors);
        parse(tokens)
    }

    fn syntax_message(source: &str) -> String {
        match parse_src(source) {
            Err(err) => {
                assert!(matches!(err.kind, ErrorKind::Syntax(_)), "{:?}", err);
                err.message()
            }
            Ok(program) => panic!("expected a syntax error, got {:?}", program),
        }
    }

    fn only_expr(source: &str) -> Expr {
        let program = parse_src(source).expect("parses");
        match &program.main[0].kind {
            StmtKind::Print(expr) => expr.clone(),
            other => panic!("expected print, got {:?}", other),
        }
    }

    #[test]
    fn empty_input_is_an_empty_program() {
        assert!(parse_src("").expect("parses").is_empty());
        assert!(parse(vec![]).expect("parses").is_empty());
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = only_expr("print(1 + 2 * 3);");
        match expr {
            Expr::Binary { op: BinaryOp::Add, right, .. } => {
                assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
            }
            other => panic!("unexpected tree {:?}", other),
        }
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expr = only_expr("print(10 - 4 - 3);");
        match expr {
            Expr::Binary { op: BinaryOp::Sub, left, right } => {
                assert!(matches!(*left, Expr::Binary { op: BinaryOp::Sub, .. }));
                assert_eq!(*right, Expr::Number(3));
            }
            other => panic!("unexpected tree {:?}", other),
        }
    }

    #[test]
    fn or_is_the_loosest_operator() {
        let expr = only_expr("print(a < 1 && b | c == 2);");
        match expr {
            Expr::Binary { op: BinaryOp::Or, left, right } => {
                assert!(matches!(*left, Expr::Binary { op: BinaryOp::And, .. }));
                assert!(matches!(*right, Expr::Binary { op: BinaryOp::Equal, .. }));
            }
            other => panic!("unexpected tree {:?}", other),
        }
    }

    #[test]
    fn grouping_overrides_precedence() {
        let expr = only_expr("print((1 + 2) * 3);");
        assert!(matches!(expr, Expr::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn chained_comparisons_are_rejected() {
        let message = syntax_message("print(a < b < c);");
        assert!(message.contains("chained"), "{}", message);
    }

    #[test]
    fn parenthesized_comparisons_may_be_compared() {
        assert!(parse_src("print((a < b) == 1);").is_ok());
    }

    #[test]
    fn declarations_are_hoisted_out_of_main() {
        let program = parse_src("print(f(1)); function f(a) { return a; }; x = 2;").expect("parses");
        assert_eq!(program.functions.len(), 1);
        assert_eq!(program.functions[0].params, vec!["a".to_string()]);
        assert_eq!(program.main.len(), 2);
    }

    #[test]
    fn parameter_and_argument_lists_are_ordered() {
        let program = parse_src("function f(a, b, c) { return a; } f(1, 2 + 3, x);").expect("parses");
        assert_eq!(program.functions[0].params, vec!["a", "b", "c"]);
        match &program.main[0].kind {
            StmtKind::Expression(Expr::Call { name, args, .. }) => {
                assert_eq!(name, "f");
                assert_eq!(args.len(), 3);
                assert_eq!(args[0], Expr::Number(1));
            }
            other => panic!("unexpected statement {:?}", other),
        }
    }

    #[test]
    fn empty_lists_are_empty_sequences() {
        let program = parse_src("fonction g() { print(1); } g();").expect("parses");
        assert!(program.functions[0].params.is_empty());
        assert!(matches!(
            &program.main[0].kind,
            StmtKind::Expression(Expr::Call { args, .. }) if args.is_empty()
        ));
    }

    #[test]
    fn simple_statements_require_a_separator() {
        let message = syntax_message("x = 1 print(x);");
        assert!(message.contains("';'"), "{}", message);
    }

    #[test]
    fn compound_statement_separator_is_optional() {
        assert!(parse_src("if (1) { x = 1; } while (0) { x = 2; }; print(x);").is_ok());
    }

    #[test]
    fn for_loop_accepts_trailing_separator_in_header() {
        let program = parse_src("for (i = 0; i < 3; i = i + 1;) { print(i); }").expect("parses");
        assert!(matches!(program.main[0].kind, StmtKind::For { .. }));
        assert!(parse_src("for (i = 0; i < 3; i++) { print(i); }").is_ok());
    }

    #[test]
    fn else_if_chains_nest() {
        let program = parse_src("if (a) { x = 1; } else if (b) { x = 2; } else { x = 3; }").expect("parses");
        match &program.main[0].kind {
            StmtKind::If { else_branch: Some(branch), .. } => {
                assert!(matches!(branch[0].kind, StmtKind::If { else_branch: Some(_), .. }));
            }
            other => panic!("unexpected statement {:?}", other),
        }
    }

    #[test]
    fn return_outside_a_function_is_a_syntax_error() {
        let message = syntax_message("return 1;");
        assert!(message.contains("outside"), "{}", message);
    }

    #[test]
    fn bare_return_has_no_value() {
        let program = parse_src("function f() { return; }").expect("parses");
        assert_eq!(program.functions[0].body[0].kind, StmtKind::Return(None));
    }

    #[test]
    fn increment_requires_a_variable() {
        let err = parse_src("print((1 + 2)++);").expect_err("must fail");
        assert!(matches!(err.kind, ErrorKind::InvalidIncrementTarget(_)));
        let err = parse_src("x++++;").expect_err("must fail");
        assert!(matches!(err.kind, ErrorKind::InvalidIncrementTarget(_)));
    }

    #[test]
    fn errors_name_the_offending_token_and_line() {
        let err = parse_src("x = 1;\ny = * 2;").expect_err("must fail");
        assert_eq!(err.span.map(|s| s.line), Some(2));
        assert!(err.message().contains("'*'"), "{}", err.message());
    }

    #[test]
    fn unexpected_end_of_input_is_reported() {
        let message = syntax_message("print(1 + ");
        assert!(message.contains("end of input"), "{}", message);
    }

    #[test]
    fn nested_declarations_stay_in_their_block() {
        let program = parse_src("if (1) { function inner() { return 1; } }").expect("parses");
        assert!(program.functions.is_empty());
        match &program.main[0].kind {
            StmtKind::If { then_branch, .. } => {
                assert!(matches!(then_branch[0].kind, StmtKind::Function(_)));
            }
            other => panic!("unexpected statement {:?}", other),
        }
    }
}
