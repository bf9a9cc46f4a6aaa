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

//! Pure operator semantics shared by the evaluator.

use std::cmp::Ordering;

use crate::ast::BinaryOp;
use crate::error::{CalcError, CalcResult, ErrorKind};
use crate::value::{Number, Value};

/// Applies a binary operator to two already-evaluated operands.
///
/// # Rules
/// - `+ - *` on two integers stay integral and fail with `Overflow` when
///   the result leaves the 64-bit range; any float operand gives a float
/// - `/` always gives a float; a zero divisor is `DivisionByZero`
/// - `< <= > >=` compare numerically and give a boolean
/// - `== !=` compare numerically; `none` only equals `none`
/// - `&& ||` combine truthiness (the evaluator short-circuits before
///   reaching here)
///
/// Booleans count as 0 and 1. `none` is a `TypeMismatch` everywhere except
/// equality and the logical operators.
///
/// # Parameters
/// - `op` → The operator
/// - `left`, `right` → The evaluated operands, in source order
pub fn apply_binary(op: BinaryOp, left: Value, right: Value) -> CalcResult<Value> {
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => arithmetic(op, left, right),
        BinaryOp::Div => divide(left, right),

        BinaryOp::Equal => Ok(Value::Bool(values_equal(left, right))),
        BinaryOp::NotEqual => Ok(Value::Bool(!values_equal(left, right))),

        BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
            let ordering = compare(op, left, right)?;
            let result = match op {
                BinaryOp::Less => ordering == Some(Ordering::Less),
                BinaryOp::LessEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
                BinaryOp::Greater => ordering == Some(Ordering::Greater),
                _ => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            };
            Ok(Value::Bool(result))
        }

        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
    }
}

/// `value + 1`, used by postfix `++`.
pub fn increment(value: Value) -> CalcResult<Value> {
    match value.as_number() {
        Some(Number::Int(i)) => i
            .checked_add(1)
            .map(Value::Int)
            .ok_or_else(|| CalcError::new(ErrorKind::Overflow(format!("{} + 1", i)))),
        Some(Number::Float(f)) => Ok(Value::Float(f + 1.0)),
        None => Err(CalcError::type_mismatch(format!(
            "cannot increment a value of type {}",
            value.type_name()
        ))),
    }
}

fn operands(op: BinaryOp, left: Value, right: Value) -> CalcResult<(Number, Number)> {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(CalcError::type_mismatch(format!(
            "cannot apply '{}' to {} and {}",
            op,
            left.type_name(),
            right.type_name()
        ))),
    }
}

fn arithmetic(op: BinaryOp, left: Value, right: Value) -> CalcResult<Value> {
    match operands(op, left, right)? {
        (Number::Int(a), Number::Int(b)) => {
            let result = match op {
                BinaryOp::Add => a.checked_add(b),
                BinaryOp::Sub => a.checked_sub(b),
                _ => a.checked_mul(b),
            };
            result
                .map(Value::Int)
                .ok_or_else(|| CalcError::new(ErrorKind::Overflow(format!("{} {} {}", a, op, b))))
        }
        (a, b) => {
            let (a, b) = (a.as_f64(), b.as_f64());
            Ok(Value::Float(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                _ => a * b,
            }))
        }
    }
}

fn divide(left: Value, right: Value) -> CalcResult<Value> {
    let (a, b) = operands(BinaryOp::Div, left, right)?;
    if b.as_f64() == 0.0 {
        return Err(CalcError::new(ErrorKind::DivisionByZero));
    }
    Ok(Value::Float(a.as_f64() / b.as_f64()))
}

fn compare(op: BinaryOp, left: Value, right: Value) -> CalcResult<Option<Ordering>> {
    Ok(match operands(op, left, right)? {
        (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
        (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
    })
}

fn values_equal(left: Value, right: Value) -> bool {
    match (left.as_number(), right.as_number()) {
        (Some(Number::Int(a)), Some(Number::Int(b))) => a == b,
        (Some(a), Some(b)) => a.as_f64() == b.as_f64(),
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(op: BinaryOp, left: impl Into<Value>, right: impl Into<Value>) -> CalcResult<Value> {
        apply_binary(op, left.into(), right.into())
    }

    #[test]
    fn integer_arithmetic_stays_integral() {
        assert_eq!(apply(BinaryOp::Add, 2i64, 3i64), Ok(Value::Int(5)));
        assert_eq!(apply(BinaryOp::Sub, 2i64, 3i64), Ok(Value::Int(-1)));
        assert_eq!(apply(BinaryOp::Mul, 2.5, 2i64), Ok(Value::Float(5.0)));
    }

    #[test]
    fn overflow_is_reported() {
        let err = apply(BinaryOp::Mul, i64::MAX, 2i64).unwrap_err();
        assert_eq!(err.code(), "E_ARITHMETIC");
        assert!(increment(Value::Int(i64::MAX)).is_err());
    }

    #[test]
    fn division_gives_exact_quotient() {
        assert_eq!(apply(BinaryOp::Div, 1i64, 4i64), Ok(Value::Float(0.25)));
        assert_eq!(apply(BinaryOp::Div, -9i64, 2i64), Ok(Value::Float(-4.5)));
        assert_eq!(
            apply(BinaryOp::Div, 1i64, 0i64).unwrap_err().kind,
            ErrorKind::DivisionByZero
        );
    }

    #[test]
    fn comparisons_mix_integers_floats_and_booleans() {
        assert_eq!(apply(BinaryOp::Less, 1i64, 1.5), Ok(Value::Bool(true)));
        assert_eq!(apply(BinaryOp::GreaterEqual, 2i64, 2i64), Ok(Value::Bool(true)));
        assert_eq!(apply(BinaryOp::Equal, true, 1i64), Ok(Value::Bool(true)));
        assert_eq!(apply(BinaryOp::NotEqual, 3.0, 3i64), Ok(Value::Bool(false)));
    }

    #[test]
    fn none_only_supports_equality() {
        assert_eq!(apply_binary(BinaryOp::Equal, Value::Unit, Value::Unit), Ok(Value::Bool(true)));
        assert_eq!(apply_binary(BinaryOp::Equal, Value::Unit, Value::Int(0)), Ok(Value::Bool(false)));

        let err = apply_binary(BinaryOp::Add, Value::Unit, Value::Int(1)).unwrap_err();
        assert_eq!(err.message(), "cannot apply '+' to none and integer");
        assert!(increment(Value::Unit).is_err());
    }

    #[test]
    fn increment_promotes_booleans() {
        assert_eq!(increment(Value::Bool(true)), Ok(Value::Int(2)));
        assert_eq!(increment(Value::Float(0.5)), Ok(Value::Float(1.5)));
    }
}
