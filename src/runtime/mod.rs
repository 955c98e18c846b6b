//! Runtime for fuselisp: values, scopes and the single-pass evaluator

mod evaluator;
mod frame;
mod scope;
mod value;

pub use evaluator::Evaluator;
pub use frame::{CallFrame, FrameKind, SpecialForm};
pub use scope::ScopeChain;
pub use value::{Value, ValueKind};
