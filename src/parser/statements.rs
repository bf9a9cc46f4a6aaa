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
 * Statement grammar
 * -----------------
 *
 *   element     → simple ";" | compound ";"?
 *   simple      → NAME "=" expr | print "(" expr ")" | return expr? | expr
 *   compound    → if | while | for | function
 *   block       → "{" element* "}"
 */

use crate::ast::{FunctionDecl, Stmt, StmtKind};
use crate::error::{CalcError, CalcResult};
use crate::lexer::{Keyword, TokenKind};
use crate::parser::parser::Parser;

impl Parser {
    /// Parses one terminated statement.
    pub fn element(&mut self) -> CalcResult<Stmt> {
        if let Some(stmt) = self.compound_statement()? {
            self.match_kind(&TokenKind::Semicolon);
            return Ok(stmt);
        }

        let stmt = self.simple_statement()?;
        self.consume(&TokenKind::Semicolon, "';' after statement")?;
        Ok(stmt)
    }

    /// `{ element* }`
    fn block(&mut self) -> CalcResult<Vec<Stmt>> {
        self.consume(&TokenKind::LeftBrace, "'{' to open a block")?;

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            stmts.push(self.element()?);
        }

        self.consume(&TokenKind::RightBrace, "'}' to close the block")?;
        Ok(stmts)
    }

    fn compound_statement(&mut self) -> CalcResult<Option<Stmt>> {
        let stmt = match self.peek().kind.clone() {
            TokenKind::Keyword(Keyword::If) => self.if_statement()?,
            TokenKind::Keyword(Keyword::While) => self.while_statement()?,
            TokenKind::Keyword(Keyword::For) => self.for_statement()?,
            TokenKind::Keyword(Keyword::Function) => self.function_declaration()?,
            _ => return Ok(None),
        };
        Ok(Some(stmt))
    }

    fn simple_statement(&mut self) -> CalcResult<Stmt> {
        match self.peek().kind.clone() {
            TokenKind::Keyword(Keyword::Print) => self.print_statement(),
            TokenKind::Keyword(Keyword::Return) => self.return_statement(),
            TokenKind::Keyword(Keyword::Else) => {
                Err(self.error_at_current("a statement ('else' needs a preceding 'if' block)"))
            }
            TokenKind::Identifier if self.peek_next().kind == TokenKind::Assign => {
                self.assignment()
            }
            _ => self.expression_statement(),
        }
    }

    /// NAME "=" expression
    fn assignment(&mut self) -> CalcResult<Stmt> {
        let name = self.consume_identifier("a variable name")?;
        self.consume(&TokenKind::Assign, "'='")?;
        let value = self.expression()?;

        Ok(Stmt {
            kind: StmtKind::Assign {
                name: name.lexeme,
                value,
            },
            span: name.span,
        })
    }

    /// print "(" expression ")"
    fn print_statement(&mut self) -> CalcResult<Stmt> {
        let keyword = self.advance();
        self.consume(&TokenKind::LeftParen, "'(' after 'print'")?;
        let value = self.expression()?;
        self.consume(&TokenKind::RightParen, "')' after the printed expression")?;

        Ok(Stmt {
            kind: StmtKind::Print(value),
            span: keyword.span,
        })
    }

    /// return expression?
    fn return_statement(&mut self) -> CalcResult<Stmt> {
        let keyword = self.peek().clone();

        if self.function_depth == 0 {
            return Err(CalcError::syntax(
                "'return' outside of a function",
                keyword.span,
            ));
        }
        self.advance();

        let value = if self.check(&TokenKind::Semicolon)
            || self.check(&TokenKind::RightBrace)
            || self.is_at_end()
        {
            None
        } else {
            Some(self.expression()?)
        };

        Ok(Stmt {
            kind: StmtKind::Return(value),
            span: keyword.span,
        })
    }

    /// Bare call, postfix increment, or any other expression.
    fn expression_statement(&mut self) -> CalcResult<Stmt> {
        let span = self.peek().span;
        let expr = self.expression()?;

        Ok(Stmt {
            kind: StmtKind::Expression(expr),
            span,
        })
    }

    /// if "(" expression ")" block ( else ( block | if ... ) )?
    fn if_statement(&mut self) -> CalcResult<Stmt> {
        let keyword = self.advance();
        self.consume(&TokenKind::LeftParen, "'(' after 'if'")?;
        let condition = self.expression()?;
        self.consume(&TokenKind::RightParen, "')' after the condition")?;
        let then_branch = self.block()?;

        let else_branch = if self.match_keyword(Keyword::Else) {
            if self.check_keyword(Keyword::If) {
                Some(vec![self.if_statement()?])
            } else {
                Some(self.block()?)
            }
        } else {
            None
        };

        Ok(Stmt {
            kind: StmtKind::If {
                condition,
                then_branch,
                else_branch,
            },
            span: keyword.span,
        })
    }

    /// while "(" expression ")" block
    fn while_statement(&mut self) -> CalcResult<Stmt> {
        let keyword = self.advance();
        self.consume(&TokenKind::LeftParen, "'(' after 'while'")?;
        let condition = self.expression()?;
        self.consume(&TokenKind::RightParen, "')' after the condition")?;
        let body = self.block()?;

        Ok(Stmt {
            kind: StmtKind::While { condition, body },
            span: keyword.span,
        })
    }

    /// for "(" clause ";" expression ";" clause ";"? ")" block
    fn for_statement(&mut self) -> CalcResult<Stmt> {
        let keyword = self.advance();
        self.consume(&TokenKind::LeftParen, "'(' after 'for'")?;
        let init = self.for_clause()?;
        self.consume(&TokenKind::Semicolon, "';' after the loop initializer")?;
        let condition = self.expression()?;
        self.consume(&TokenKind::Semicolon, "';' after the loop condition")?;
        let step = self.for_clause()?;
        self.match_kind(&TokenKind::Semicolon);
        self.consume(&TokenKind::RightParen, "')' to close the loop header")?;
        let body = self.block()?;

        Ok(Stmt {
            kind: StmtKind::For {
                init: Box::new(init),
                condition,
                step: Box::new(step),
                body,
            },
            span: keyword.span,
        })
    }

    /// Initializer / step of a `for` header: an assignment or an expression.
    fn for_clause(&mut self) -> CalcResult<Stmt> {
        if self.check(&TokenKind::Identifier) && self.peek_next().kind == TokenKind::Assign {
            self.assignment()
        } else {
            self.expression_statement()
        }
    }

    /// function NAME "(" params? ")" block
    fn function_declaration(&mut self) -> CalcResult<Stmt> {
        let keyword = self.advance();
        let name = self.consume_identifier("a function name")?;
        self.consume(&TokenKind::LeftParen, "'(' after the function name")?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                params.push(self.consume_identifier("a parameter name")?.lexeme);
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(&TokenKind::RightParen, "')' after the parameters")?;

        self.function_depth += 1;
        let body = self.block();
        self.function_depth -= 1;

        Ok(Stmt {
            kind: StmtKind::Function(FunctionDecl {
                name: name.lexeme,
                params,
                body: body?,
                span: name.span,
            }),
            span: keyword.span,
        })
    }
}
