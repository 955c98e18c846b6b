//! Standard builtins, grouped by area

pub mod arithmetic;
pub mod casts;
pub mod compare;
pub mod strings;

use crate::builtins::BuiltinRegistry;
use crate::error::{Result, TypeError};
use crate::runtime::Value;

/// Register all standard builtins
pub fn register_all(registry: &mut BuiltinRegistry) -> Result<()> {
    arithmetic::register(registry)?;
    strings::register(registry)?;
    compare::register(registry)?;
    casts::register(registry)?;
    Ok(())
}

/// Error for arguments that reached an implementation with the wrong kinds
pub(crate) fn mismatch(name: &str, args: &[Value]) -> crate::error::Error {
    TypeError::NoMatchingOverload {
        name: name.to_string(),
        got: Value::kinds(args),
    }
    .into()
}
