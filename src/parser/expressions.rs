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
 * Expression grammar, loosest to tightest:
 *
 *   or             → and ( "||" and )*
 *   and            → relational ( "&&" relational )*
 *   relational     → additive ( relop additive )?      (non-associative)
 *   additive       → multiplicative ( ( "+" | "-" ) multiplicative )*
 *   multiplicative → postfix ( ( "*" | "/" ) postfix )*
 *   postfix        → primary "++"*
 *   primary        → NUMBER | NAME | NAME "(" arguments? ")" | "(" or ")"
 */

use crate::ast::{BinaryOp, Expr};
use crate::error::{CalcError, CalcResult, ErrorKind};
use crate::lexer::TokenKind;
use crate::parser::parser::Parser;

fn relational_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Less => Some(BinaryOp::Less),
        TokenKind::LessEqual => Some(BinaryOp::LessEqual),
        TokenKind::Greater => Some(BinaryOp::Greater),
        TokenKind::GreaterEqual => Some(BinaryOp::GreaterEqual),
        TokenKind::EqualEqual => Some(BinaryOp::Equal),
        TokenKind::BangEqual => Some(BinaryOp::NotEqual),
        _ => None,
    }
}

impl Parser {
    pub fn expression(&mut self) -> CalcResult<Expr> {
        self.logical_or()
    }

    fn logical_or(&mut self) -> CalcResult<Expr> {
        let mut expr = self.logical_and()?;

        while self.match_kind(&TokenKind::Or) {
            let right = self.logical_and()?;
            expr = Expr::binary(BinaryOp::Or, expr, right);
        }

        Ok(expr)
    }

    fn logical_and(&mut self) -> CalcResult<Expr> {
        let mut expr = self.relational()?;

        while self.match_kind(&TokenKind::And) {
            let right = self.relational()?;
            expr = Expr::binary(BinaryOp::And, expr, right);
        }

        Ok(expr)
    }

    /// At most one relational operator per tier: `a < b < c` is rejected.
    fn relational(&mut self) -> CalcResult<Expr> {
        let left = self.additive()?;

        let Some(op) = relational_op(&self.peek().kind) else {
            return Ok(left);
        };
        self.advance();
        let right = self.additive()?;

        if relational_op(&self.peek().kind).is_some() {
            let token = self.peek();
            return Err(CalcError::syntax(
                format!(
                    "unexpected token '{}': comparison operators cannot be chained",
                    token.lexeme
                ),
                token.span,
            )
            .with_help("combine comparisons with '&&', e.g. (a < b) && (b < c)"));
        }

        Ok(Expr::binary(op, left, right))
    }

    fn additive(&mut self) -> CalcResult<Expr> {
        let mut expr = self.multiplicative()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.multiplicative()?;
            expr = Expr::binary(op, expr, right);
        }

        Ok(expr)
    }

    fn multiplicative(&mut self) -> CalcResult<Expr> {
        let mut expr = self.postfix()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.postfix()?;
            expr = Expr::binary(op, expr, right);
        }

        Ok(expr)
    }

    /// Postfix `++` only applies to a bare variable name.
    fn postfix(&mut self) -> CalcResult<Expr> {
        let mut expr = self.primary()?;

        while self.match_kind(&TokenKind::PlusPlus) {
            expr = match expr {
                Expr::Variable { name, span } => Expr::Increment { name, span },
                _ => {
                    return Err(CalcError::at(
                        ErrorKind::InvalidIncrementTarget(
                            "'++' can only be applied to a variable name".to_string(),
                        ),
                        self.previous().span,
                    ))
                }
            };
        }

        Ok(expr)
    }

    fn primary(&mut self) -> CalcResult<Expr> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Number(value) => {
                self.advance();
                Ok(Expr::Number(value))
            }

            TokenKind::Identifier => {
                self.advance();
                if self.match_kind(&TokenKind::LeftParen) {
                    let args = self.arguments()?;
                    Ok(Expr::Call {
                        name: token.lexeme,
                        args,
                        span: token.span,
                    })
                } else {
                    Ok(Expr::Variable {
                        name: token.lexeme,
                        span: token.span,
                    })
                }
            }

            TokenKind::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(&TokenKind::RightParen, "')' to close the group")?;
                Ok(expr)
            }

            _ => Err(self.error_at_current("an expression")),
        }
    }

    /// Call arguments after the opening `(`, left to right.
    fn arguments(&mut self) -> CalcResult<Vec<Expr>> {
        let mut args = Vec::new();

        if !self.check(&TokenKind::RightParen) {
            loop {
                args.push(self.expression()?);
                if !self.match_kind(&TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(&TokenKind::RightParen, "')' after the arguments")?;
        Ok(args)
    }
}
