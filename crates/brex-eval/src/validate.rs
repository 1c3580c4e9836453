//! Argument validation against a command's parameter schema.

use brex_types::{BrexError, CommandSchema, ParamType, Value};

/// The one command whose arity is fixed regardless of its schema.
const NOT: &str = "NOT";

/// Check evaluated arguments against `schema`.
///
/// A variadic (`multiple`) slot takes zero or more arguments even when it
/// is marked required, and its type applies to every argument in the tail.
/// Extra arguments beyond the schema are left for the handler to reject.
pub fn validate(args: &[Value], schema: &CommandSchema, command: &str) -> Result<(), BrexError> {
    let min = schema.min_args();
    if args.len() < min {
        return Err(BrexError::invalid_parameters(
            command,
            format!(
                "{command} expects at least {min} argument(s), got {}",
                args.len()
            ),
        ));
    }

    if command == NOT && args.len() != 1 {
        return Err(BrexError::invalid_parameters(
            command,
            format!("{NOT} takes exactly one argument, got {}", args.len()),
        ));
    }

    let tail = schema.variadic_tail();
    let fixed = &schema.params[..schema.params.len() - usize::from(tail.is_some())];

    for (i, spec) in fixed.iter().enumerate() {
        match args.get(i) {
            Some(arg) => check_type(command, i, spec.ty, arg)?,
            None if spec.required && !spec.multiple => {
                return Err(BrexError::invalid_parameters(
                    command,
                    format!("{command} is missing required argument {}", i + 1),
                ));
            }
            None => {}
        }
    }
    if let Some(tail) = tail {
        for (i, arg) in args.iter().enumerate().skip(fixed.len()) {
            check_type(command, i, tail.ty, arg)?;
        }
    }
    Ok(())
}

fn check_type(command: &str, index: usize, ty: ParamType, arg: &Value) -> Result<(), BrexError> {
    match ty {
        ParamType::Any => Ok(()),
        ParamType::Condition if matches!(arg, Value::Bool(_)) => Ok(()),
        ParamType::Condition => Err(BrexError::invalid_parameters(
            command,
            format!(
                "argument {} of {command} must be a condition, got {} '{arg}'",
                index + 1,
                arg.type_name()
            ),
        )),
    }
}
