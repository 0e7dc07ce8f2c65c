use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        semantics::symbol::BuiltinType,
        value::Value,
    },
    util::num::{f64_to_i64_checked, i64_to_f64_checked},
};

/// One operand of a binary operation.
///
/// `code` is set when the operand is statically character-typed and its
/// runtime value is a single character: the candidates for promotion to a
/// numeric code point. A character value *without* the static tag (for
/// example a function result) behaves as text.
struct Operand {
    value: Value,
    code:  Option<i64>,
}

impl Operand {
    fn new(value: Value, statically_char: bool) -> Self {
        if statically_char && let Some(c) = value.single_char() {
            return Self { code: Some(i64::from(u32::from(c))),
                          value };
        }

        let value = match value {
            Value::Char(c) => Value::Text(c.to_string()),
            other => other,
        };
        Self { value, code: None }
    }

    const fn is_boolean(&self) -> bool {
        matches!(self.value, Value::Boolean(_))
    }
}

/// Whether an expression is statically character-typed: a character
/// literal, or a variable declared `caractère`.
fn is_char_operand(expr: &Expr) -> bool {
    match expr {
        Expr::CharLiteral { .. } => true,
        Expr::Variable(variable) => {
            variable.symbol
                    .as_ref()
                    .is_some_and(|symbol| symbol.ty == BuiltinType::Char)
        },
        _ => false,
    }
}

impl Interpreter<'_> {
    /// Evaluates a binary operation.
    ///
    /// The character algebra works per operand: a promotable character
    /// becomes its code point when the *other* side is plainly numeric,
    /// and the numeric result is demoted back to a character (`'a' + 1`
    /// is `'b'`). When the other side is not numeric, the character
    /// demotes to its text form instead (`'a' + 'b'` is `"ab"`).
    ///
    /// `+` rejects booleans and concatenates when either side is textual;
    /// `-`, `*`, `mod` and `/` reject booleans and text; `/` floors its
    /// quotient toward negative infinity. Comparisons accept any operand
    /// types.
    pub(in crate::interpreter::evaluator) fn eval_binary_op(&mut self,
                                                            left: &Expr,
                                                            op: BinaryOperator,
                                                            right: &Expr,
                                                            line: usize)
                                                            -> EvalResult<Value> {
        let left_value = self.eval(left)?;
        let right_value = self.eval(right)?;

        let mut lhs = Operand::new(left_value, is_char_operand(left));
        let mut rhs = Operand::new(right_value, is_char_operand(right));

        if !op.is_comparison() && (lhs.is_boolean() || rhs.is_boolean()) {
            return Err(RuntimeError::BooleanOperand { operation: op.to_string(),
                                                      line });
        }

        if let Some(code) = lhs.code
           && rhs.code.is_none()
           && rhs.value.is_numeric()
        {
            return char_numeric(op, code, &rhs.value, true, line);
        }
        if let Some(code) = rhs.code
           && lhs.code.is_none()
           && lhs.value.is_numeric()
        {
            return char_numeric(op, code, &lhs.value, false, line);
        }

        // Any character operand still here met a non-numeric other side:
        // it demotes to its text form before the operation proceeds.
        if lhs.code.is_some() {
            lhs.value = Value::Text(lhs.value.to_string());
        }
        if rhs.code.is_some() {
            rhs.value = Value::Text(rhs.value.to_string());
        }

        if op.is_comparison() {
            return compare(op, &lhs.value, &rhs.value);
        }
        arithmetic(op, &lhs.value, &rhs.value, line)
    }
}

/// A promoted character against a plain number: the operation runs on the
/// code point, and an arithmetic result is demoted back to a character.
/// Comparison results stay boolean.
fn char_numeric(op: BinaryOperator,
                code: i64,
                number: &Value,
                char_on_left: bool,
                line: usize)
                -> EvalResult<Value> {
    let number = match number {
        Value::Integer(n) => *n,
        Value::Real(r) => f64_to_i64_checked(r.floor(), RuntimeError::ExpectedNumber { line })?,
        _ => return Err(RuntimeError::ExpectedNumber { line }),
    };

    let (a, b) = if char_on_left { (code, number) } else { (number, code) };

    if op.is_comparison() {
        return Ok(Value::Boolean(ordering_result(op, a.cmp(&b))));
    }

    let result = match op {
        BinaryOperator::Add => a.checked_add(b).ok_or(RuntimeError::Overflow { line })?,
        BinaryOperator::Sub => a.checked_sub(b).ok_or(RuntimeError::Overflow { line })?,
        BinaryOperator::Mul => a.checked_mul(b).ok_or(RuntimeError::Overflow { line })?,
        BinaryOperator::Div => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            floor_div(a, b, line)?
        },
        BinaryOperator::Mod => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            a.checked_rem(b).ok_or(RuntimeError::Overflow { line })?
        },
        _ => unreachable!("comparisons are handled above"),
    };

    u32::try_from(result).ok()
                         .and_then(char::from_u32)
                         .map(Value::Char)
                         .ok_or(RuntimeError::InvalidCharacterCode { code: result,
                                                                     line })
}

/// Comparison over already-demoted operands.
///
/// Numeric pairs compare numerically, same-type pairs by their natural
/// order. Operands of different categories are never equal, and their
/// ordering falls back to the textual form.
#[allow(clippy::cast_precision_loss)]
fn compare(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    use Value::{Boolean, Integer, Real, Text};

    let ordering = match (left, right) {
        (Integer(a), Integer(b)) => Some(a.cmp(b)),
        (Real(a), Real(b)) => a.partial_cmp(b),
        (Integer(a), Real(b)) => (*a as f64).partial_cmp(b),
        (Real(a), Integer(b)) => a.partial_cmp(&(*b as f64)),
        (Text(a), Text(b)) => Some(a.cmp(b)),
        (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
        _ => {
            return Ok(Value::Boolean(match op {
                          BinaryOperator::Equal => false,
                          BinaryOperator::NotEqual => true,
                          _ => ordering_result(op, left.to_string().cmp(&right.to_string())),
                      }));
        },
    };

    let Some(ordering) = ordering else {
        // NaN compares equal to nothing, so only `!=` holds.
        return Ok(Value::Boolean(matches!(op, BinaryOperator::NotEqual)));
    };

    Ok(Value::Boolean(ordering_result(op, ordering)))
}

fn ordering_result(op: BinaryOperator, ordering: std::cmp::Ordering) -> bool {
    match op {
        BinaryOperator::Equal => ordering.is_eq(),
        BinaryOperator::NotEqual => ordering.is_ne(),
        BinaryOperator::Less => ordering.is_lt(),
        BinaryOperator::Greater => ordering.is_gt(),
        BinaryOperator::LessEqual => ordering.is_le(),
        BinaryOperator::GreaterEqual => ordering.is_ge(),
        _ => unreachable!("not a comparison operator"),
    }
}

/// Arithmetic over already-demoted operands.
fn arithmetic(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    let textual = matches!(left, Value::Text(_)) || matches!(right, Value::Text(_));

    if textual {
        // `+` concatenates as soon as either side is textual; numbers
        // join in their natural form. Every other operator is
        // numbers-only.
        if op == BinaryOperator::Add {
            return Ok(Value::Text(format!("{left}{right}")));
        }
        return Err(RuntimeError::TextOperand { operation: op.to_string(),
                                               line });
    }

    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => int_arithmetic(op, *a, *b, line),
        _ => {
            let a = to_float(left, line)?;
            let b = to_float(right, line)?;
            float_arithmetic(op, a, b, line)
        },
    }
}

fn to_float(value: &Value, line: usize) -> EvalResult<f64> {
    match value {
        Value::Real(r) => Ok(*r),
        Value::Integer(n) => i64_to_f64_checked(*n, RuntimeError::NumberTooLarge { line }),
        _ => Err(RuntimeError::ExpectedNumber { line }),
    }
}

fn int_arithmetic(op: BinaryOperator, a: i64, b: i64, line: usize) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a.checked_add(b).ok_or(RuntimeError::Overflow { line })?,
        BinaryOperator::Sub => a.checked_sub(b).ok_or(RuntimeError::Overflow { line })?,
        BinaryOperator::Mul => a.checked_mul(b).ok_or(RuntimeError::Overflow { line })?,
        BinaryOperator::Div => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            floor_div(a, b, line)?
        },
        BinaryOperator::Mod => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            a.checked_rem(b).ok_or(RuntimeError::Overflow { line })?
        },
        _ => unreachable!("comparisons are handled before arithmetic"),
    };

    Ok(Value::Integer(result))
}

#[allow(clippy::float_cmp)]
fn float_arithmetic(op: BinaryOperator, a: f64, b: f64, line: usize) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            // Division always floors, even between reals.
            (a / b).floor()
        },
        BinaryOperator::Mod => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            a % b
        },
        _ => unreachable!("comparisons are handled before arithmetic"),
    };

    Ok(Value::Real(result))
}

/// Integer division rounded toward negative infinity, not truncation.
fn floor_div(a: i64, b: i64, line: usize) -> EvalResult<i64> {
    let quotient = a.checked_div(b).ok_or(RuntimeError::Overflow { line })?;
    if a % b != 0 && (a < 0) != (b < 0) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}
