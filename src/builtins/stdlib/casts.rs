//! Conversion builtins: `int`, `float`, `string`

use crate::builtins::{BuiltinRegistry, BuiltinSpec};
use crate::error::{Result, TypeError};
use crate::runtime::{Value, ValueKind};

use super::mismatch;

/// Register cast builtins
pub fn register(registry: &mut BuiltinRegistry) -> Result<()> {
    registry.register(BuiltinSpec::new("int").overload(&[ValueKind::Str], to_int))?;
    registry.register(BuiltinSpec::new("float").overload(&[ValueKind::Str], to_float))?;
    registry.register(
        BuiltinSpec::new("string")
            .overload(&[ValueKind::Int], to_string)
            .overload(&[ValueKind::Float], to_string),
    )?;
    Ok(())
}

fn invalid_cast(target: ValueKind, text: &str) -> crate::error::Error {
    TypeError::InvalidCast {
        target,
        text: text.to_string(),
    }
    .into()
}

fn to_int(args: &[Value]) -> Result<Value> {
    match args {
        [Value::Str(text)] => text
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| invalid_cast(ValueKind::Int, text)),
        _ => Err(mismatch("int", args)),
    }
}

fn to_float(args: &[Value]) -> Result<Value> {
    match args {
        [Value::Str(text)] => match text.parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(Value::Float(x)),
            _ => Err(invalid_cast(ValueKind::Float, text)),
        },
        _ => Err(mismatch("float", args)),
    }
}

fn to_string(args: &[Value]) -> Result<Value> {
    match args {
        [Value::Int(n)] => Ok(Value::Str(n.to_string())),
        [Value::Float(x)] => Ok(Value::Str(x.to_string())),
        _ => Err(mismatch("string", args)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn call(name: &str, args: &[Value]) -> Result<Value> {
        let mut registry = BuiltinRegistry::empty();
        register(&mut registry).unwrap();
        registry.lookup(name).unwrap().call(args)
    }

    fn s(text: &str) -> Value {
        Value::Str(text.to_string())
    }

    #[test]
    fn test_int_cast() {
        assert_eq!(call("int", &[s("123")]).unwrap(), Value::Int(123));
        assert_eq!(
            call("int", &[s("a")]).unwrap_err(),
            Error::Type(TypeError::InvalidCast {
                target: ValueKind::Int,
                text: "a".to_string()
            })
        );
    }

    #[test]
    fn test_float_cast() {
        assert_eq!(call("float", &[s("0.5")]).unwrap(), Value::Float(0.5));
        assert!(call("float", &[s("a")]).is_err());
        assert!(call("float", &[s("inf")]).is_err());
    }

    #[test]
    fn test_string_cast() {
        assert_eq!(call("string", &[Value::Int(1)]).unwrap(), s("1"));
        assert_eq!(call("string", &[Value::Float(1.5)]).unwrap(), s("1.5"));
        assert_eq!(call("string", &[Value::Float(2.0)]).unwrap(), s("2"));
        assert!(call("string", &[Value::Bool(true)]).is_err());
    }
}
