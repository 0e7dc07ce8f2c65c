use crate::{
    ast::Expr,
    interpreter::{
        builtins::{Console, EvaluatedArgument},
        semantics::symbol::BuiltinType,
        value::Value,
    },
};

/// Renders every argument and writes them joined by a single space, with
/// no trailing line break.
///
/// Booleans print as `vrai`/`faux`. An argument that is statically
/// real-typed — a real literal, or a variable declared `réel` — always
/// shows a decimal point, so the real value `4` prints as `4.0`.
/// Everything else prints in its natural textual form.
pub(crate) fn afficher(console: &mut dyn Console, args: &[EvaluatedArgument]) {
    let rendered: Vec<String> = args.iter().map(render_argument).collect();
    console.write(&rendered.join(" "));
}

fn render_argument(arg: &EvaluatedArgument) -> String {
    // The boolean check comes first: a boolean held by a réel variable
    // still prints as vrai/faux.
    if matches!(arg.value, Value::Boolean(_)) {
        return arg.value.to_string();
    }

    if is_statically_real(arg.node) {
        return render_real(&arg.value);
    }

    arg.value.to_string()
}

fn is_statically_real(node: &Expr) -> bool {
    match node {
        Expr::RealLiteral { .. } => true,
        Expr::Variable(variable) => {
            variable.symbol
                    .as_ref()
                    .is_some_and(|symbol| symbol.ty == BuiltinType::Real)
        },
        _ => false,
    }
}

/// Forces the decimal part of a real to stay visible: `4` becomes `4.0`,
/// `4.5` stays `4.5`.
fn render_real(value: &Value) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}
