//! String and sequence builtins: `plus` on strings, `concat`, `length`

use crate::builtins::{BuiltinRegistry, BuiltinSpec};
use crate::error::{EvalError, Result};
use crate::runtime::{Value, ValueKind};

use super::mismatch;

/// Register string builtins
pub fn register(registry: &mut BuiltinRegistry) -> Result<()> {
    // Joins the numeric overloads registered under the same name
    registry.register(
        BuiltinSpec::new("plus").overload(&[ValueKind::Str, ValueKind::Str], concat),
    )?;
    registry.register(
        BuiltinSpec::new("concat").overload(&[ValueKind::Str, ValueKind::Str], concat),
    )?;
    registry.register(
        BuiltinSpec::new("length")
            .overload(&[ValueKind::Str], length)
            .overload(&[ValueKind::Array], length),
    )?;
    Ok(())
}

fn concat(args: &[Value]) -> Result<Value> {
    match args {
        [Value::Str(a), Value::Str(b)] => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::Str(joined))
        }
        _ => Err(mismatch("concat", args)),
    }
}

fn length(args: &[Value]) -> Result<Value> {
    let len = match args {
        [Value::Str(s)] => s.chars().count(),
        [Value::Array(items)] => items.len(),
        _ => return Err(mismatch("length", args)),
    };
    i64::try_from(len).map(Value::Int).map_err(|_| {
        EvalError::IntegerOverflow {
            name: "length".to_string(),
        }
        .into()
    })
}
