//! # Fuselisp - A Single-Pass Lisp-like Evaluator
//!
//! Fuselisp evaluates a minimal parenthesized expression language: literals,
//! arrays of literals, nested builtin calls and the special forms `if` and
//! `def`. Tokens are evaluated as they are scanned; no syntax tree is ever
//! built.
//!
//! ## Quick Start
//!
//! ```rust
//! use fuselisp::{evaluate, Value};
//!
//! # fn main() -> fuselisp::Result<()> {
//! assert_eq!(evaluate("(plus 1 (plus 2 3))")?, Value::Int(6));
//! assert_eq!(
//!     evaluate(r#"(def a "hello " (def b "world!" (concat a b)))"#)?,
//!     Value::Str("hello world!".to_string())
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ### Reusing an evaluator
//!
//! [`evaluate`] builds the lexer and builtin table on every call. Build an
//! [`Evaluator`] once when evaluating many expressions; it is `Send + Sync`
//! and keeps no state between calls.
//!
//! ```rust
//! use fuselisp::{Evaluator, Value};
//!
//! # fn main() -> fuselisp::Result<()> {
//! let evaluator = Evaluator::new()?;
//! assert_eq!(evaluator.evaluate("(if (equals 1 1) 1 2)")?, Value::Int(1));
//! assert_eq!(evaluator.evaluate("(length [1 2])")?, Value::Int(2));
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! - **Literals**: `42`, `1.5`, `.5`, `1.`, `"text"` (no escapes), `true`, `false`
//! - **Arrays**: `[1 "two" [3]]`, literals only
//! - **Calls**: `(name arg ...)`, arguments may be literals, arrays, calls or
//!   names bound by `def`
//! - **Special forms**: `(if cond then else)`, `(def name value body)`
//!
//! ### Builtins
//!
//! - **Arithmetic**: `plus` (int, float, string), `minus` (int, float)
//! - **Strings**: `concat`, `length` (string or array)
//! - **Comparison**: `equals` (two values of the same kind)
//! - **Casts**: `int` and `float` from strings, `string` from numbers
//!
//! Both branches of `if` are evaluated during the scan; only the result is
//! selected by the condition.
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Lexer → Tokens → Evaluator (BuiltinRegistry, ScopeChain) → Value
//! ```
//!
//! ## Error Handling
//!
//! Errors are typed by category and abort the evaluation at the first
//! problem:
//!
//! ```rust
//! use fuselisp::{evaluate, Error, ParseError};
//!
//! let err = evaluate("[(plus 1 1)]").unwrap_err();
//! assert_eq!(err, Error::Parse(ParseError::NestedCallInArray));
//! assert_eq!(err.kind(), "ParseError");
//! ```

/// Version of the fuselisp crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod builtins;
pub mod config;
pub mod error;
pub mod lexer;
pub mod runtime;

// Re-export main types
pub use builtins::{BuiltinFn, BuiltinRegistry, BuiltinSpec, Overload};
pub use config::EvalConfig;
pub use error::{
    ArityError, Error, EvalError, LexError, ParseError, RegistryError, Result, TypeError,
};
pub use lexer::{Lexer, Token, TokenKind};
pub use runtime::{Evaluator, ScopeChain, Value, ValueKind};

/// Evaluates one expression with the standard builtins and a fresh scope
pub fn evaluate(source: &str) -> Result<Value> {
    Evaluator::new()?.evaluate(source)
}
