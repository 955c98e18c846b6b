//! Numeric builtins: `plus`, `minus`

use crate::builtins::{BuiltinRegistry, BuiltinSpec};
use crate::error::{EvalError, Result};
use crate::runtime::{Value, ValueKind};

use super::mismatch;

/// Register arithmetic builtins
pub fn register(registry: &mut BuiltinRegistry) -> Result<()> {
    registry.register(
        BuiltinSpec::new("plus")
            .overload(&[ValueKind::Int, ValueKind::Int], plus_int)
            .overload(&[ValueKind::Float, ValueKind::Float], plus_float),
    )?;
    registry.register(
        BuiltinSpec::new("minus")
            .overload(&[ValueKind::Int, ValueKind::Int], minus_int)
            .overload(&[ValueKind::Float, ValueKind::Float], minus_float),
    )?;
    Ok(())
}

fn overflow(name: &str) -> crate::error::Error {
    EvalError::IntegerOverflow {
        name: name.to_string(),
    }
    .into()
}

fn plus_int(args: &[Value]) -> Result<Value> {
    match args {
        [Value::Int(a), Value::Int(b)] => a
            .checked_add(*b)
            .map(Value::Int)
            .ok_or_else(|| overflow("plus")),
        _ => Err(mismatch("plus", args)),
    }
}

fn plus_float(args: &[Value]) -> Result<Value> {
    match args {
        [Value::Float(a), Value::Float(b)] => Ok(Value::Float(a + b)),
        _ => Err(mismatch("plus", args)),
    }
}

fn minus_int(args: &[Value]) -> Result<Value> {
    match args {
        [Value::Int(a), Value::Int(b)] => a
            .checked_sub(*b)
            .map(Value::Int)
            .ok_or_else(|| overflow("minus")),
        _ => Err(mismatch("minus", args)),
    }
}

fn minus_float(args: &[Value]) -> Result<Value> {
    match args {
        [Value::Float(a), Value::Float(b)] => Ok(Value::Float(a - b)),
        _ => Err(mismatch("minus", args)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn registry() -> BuiltinRegistry {
        let mut registry = BuiltinRegistry::empty();
        register(&mut registry).unwrap();
        registry
    }

    #[test]
    fn test_plus_overloads() {
        let plus = registry().lookup("plus").cloned().unwrap();
        assert_eq!(
            plus.call(&[Value::Int(123), Value::Int(123)]).unwrap(),
            Value::Int(246)
        );
        assert_eq!(
            plus.call(&[Value::Float(0.5), Value::Float(0.5)]).unwrap(),
            Value::Float(1.0)
        );
    }

    #[test]
    fn test_minus() {
        let minus = registry().lookup("minus").cloned().unwrap();
        assert_eq!(
            minus.call(&[Value::Int(4), Value::Int(3)]).unwrap(),
            Value::Int(1)
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let plus = registry().lookup("plus").cloned().unwrap();
        let err = plus.call(&[Value::Int(i64::MAX), Value::Int(1)]).unwrap_err();
        assert!(matches!(err, Error::Eval(EvalError::IntegerOverflow { .. })));
    }

    #[test]
    fn test_mixed_numeric_kinds_rejected() {
        let plus = registry().lookup("plus").cloned().unwrap();
        assert!(plus.call(&[Value::Int(1), Value::Float(1.0)]).is_err());
    }
}
