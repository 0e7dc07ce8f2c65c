use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        builtins::{Console, INPUT},
        evaluator::core::EvalResult,
        semantics::symbol::BuiltinType,
        stack::CallStack,
        value::Value,
    },
    util::num::f64_to_i64_checked,
};

/// Reads one line of interactive input into a variable.
///
/// The argument is a write target, not a read: it arrives as the raw
/// expression node and its current value — if any — is never consulted.
/// The line is validated against the variable's declared type and the
/// parsed value is written through the current activation record,
/// honoring any installed reference handle.
///
/// The analyzer already guarantees a single bare-variable argument; the
/// checks here protect direct embedders of the evaluator.
pub(crate) fn saisir(console: &mut dyn Console,
                     call_stack: &mut CallStack,
                     args: &[Expr],
                     line: usize)
                     -> EvalResult<()> {
    let [argument] = args else {
        return Err(RuntimeError::InvalidIntrinsicCall { name: INPUT.to_string(),
                                                        line });
    };
    let Expr::Variable(variable) = argument else {
        return Err(RuntimeError::InvalidIntrinsicCall { name: INPUT.to_string(),
                                                        line });
    };
    let Some(symbol) = &variable.symbol else {
        return Err(RuntimeError::UnresolvedSymbol { name: variable.name.clone(),
                                                    line });
    };

    let input = console.read_line()
                       .map_err(|_| RuntimeError::InputUnavailable { line })?;

    let mismatch = || RuntimeError::InputMismatch { expected: symbol.ty.french_name().to_string(),
                                                    line };

    let value = match symbol.ty {
        BuiltinType::Integer => {
            // Accepts `3` and `3.0` alike, but nothing fractional.
            let number: f64 = input.trim().parse().map_err(|_| mismatch())?;
            Value::Integer(f64_to_i64_checked(number, mismatch())?)
        },
        BuiltinType::Real => {
            if !input.contains('.') {
                return Err(mismatch());
            }
            let number: f64 = input.trim().parse().map_err(|_| mismatch())?;
            Value::Real(number)
        },
        BuiltinType::Text => Value::Text(input),
        BuiltinType::Char => {
            let mut chars = input.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Value::Char(c),
                _ => return Err(mismatch()),
            }
        },
        BuiltinType::Boolean => match input.as_str() {
            "vrai" => Value::Boolean(true),
            "faux" => Value::Boolean(false),
            _ => return Err(mismatch()),
        },
    };

    call_stack.set(&variable.name, value);
    Ok(())
}
