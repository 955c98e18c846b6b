//! Equality builtin: `equals`

use crate::builtins::{BuiltinRegistry, BuiltinSpec};
use crate::error::Result;
use crate::runtime::{Value, ValueKind};

/// Register comparison builtins
pub fn register(registry: &mut BuiltinRegistry) -> Result<()> {
    let kinds = [
        ValueKind::Int,
        ValueKind::Float,
        ValueKind::Str,
        ValueKind::Bool,
        ValueKind::Array,
    ];
    let spec = kinds
        .iter()
        .fold(BuiltinSpec::new("equals"), |spec, &kind| {
            spec.overload(&[kind, kind], equals)
        });
    registry.register(spec)
}

fn equals(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(args.len() == 2 && args[0] == args[1]))
}
