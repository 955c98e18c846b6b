//! Error types for the fuselisp lexer-evaluator
//!
//! Every failure is terminal for the evaluation that produced it. Each
//! category lives in its own enum so callers can match on the exact cause,
//! and [`Error`] ties them together for `?` propagation.

use thiserror::Error;

use crate::lexer::TokenKind;
use crate::runtime::ValueKind;

/// Errors raised while turning source text into tokens
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character that no token rule claims
    ///
    /// **Triggered by:** Any character outside the language's literal and
    /// delimiter surface
    /// **Example:** `(plus 1 2) #`
    #[error("Unrecognized character '{character}' at offset {offset}")]
    UnrecognizedCharacter {
        /// Byte offset of the character in the source
        offset: usize,
        /// The offending character
        character: char,
    },

    /// A token rule whose pattern does not compile
    #[error("Invalid {kind} rule: {reason}")]
    InvalidRule {
        /// Kind the rule was meant to produce
        kind: TokenKind,
        /// Compiler message for the pattern
        reason: String,
    },

    /// A numeric token that does not fit its value type
    #[error("Invalid number literal '{text}' at offset {offset}")]
    InvalidNumber {
        /// Byte offset of the token
        offset: usize,
        /// Token text
        text: String,
    },
}

/// Errors in the structure of the token stream
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Parentheses do not balance
    ///
    /// **Triggered by:** A missing `)` (positive depth at end of input) or a
    /// `)` with no open frame (depth -1)
    /// **Example:** `(plus 1 2`, `(plus 1 2))`
    #[error("Parenthesis mismatch, depth: {depth}, expected: 0")]
    ParenMismatch {
        /// Nesting depth when the mismatch was detected
        depth: isize,
    },

    /// A call inside an array literal
    ///
    /// **Example:** `[(plus 1 1)]`
    #[error("Array literals may only contain literal values, found a nested call")]
    NestedCallInArray,

    /// An identifier inside an array literal
    #[error("Array literals may only contain literal values, found an identifier at offset {offset}")]
    NonLiteralInArray {
        /// Byte offset of the identifier
        offset: usize,
    },

    /// An `[` that is never closed
    #[error("Unclosed array literal")]
    UnclosedBracket,

    /// A `]` with no matching `[`
    #[error("Unmatched ']' at offset {offset}")]
    UnmatchedCloseBracket {
        /// Byte offset of the bracket
        offset: usize,
    },

    /// `(` not followed by an identifier
    ///
    /// **Example:** `(1 2)`, `()`
    #[error("Expected a function name after '(' at offset {offset}")]
    MissingCallee {
        /// Byte offset of the token found instead
        offset: usize,
    },

    /// `def` given something other than an identifier to bind
    ///
    /// **Example:** `(def 1 2 3)`
    #[error("Expected a binding name at offset {offset}")]
    InvalidBindingName {
        /// Byte offset of the token found instead
        offset: usize,
    },

    /// Source holds no expression at all
    #[error("Empty expression")]
    EmptyExpression,

    /// Source holds more than one top-level expression
    #[error("Expected a single expression, found {0}")]
    MultipleExpressions(usize),
}

/// Errors resolving names and running operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Call to a function that is neither a builtin nor a special form
    #[error("{0} is not a valid function")]
    UnknownFunction(String),

    /// Reference to a name no enclosing `def` binds
    #[error("Unbound name: {0}")]
    UnboundName(String),

    /// Checked integer arithmetic overflowed
    #[error("Integer overflow in {name}")]
    IntegerOverflow {
        /// Builtin that overflowed
        name: String,
    },

    /// Nesting went past the configured limit
    #[error("Nesting depth limit exceeded (max: {limit})")]
    DepthLimitExceeded {
        /// Configured limit
        limit: usize,
    },
}

/// Errors from argument kinds that an operation cannot accept
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    /// No overload of the builtin accepts the collected argument kinds
    ///
    /// **Example:** `(length 1)`, `(plus 1 "a")`
    #[error("No overload of {name} accepts ({})", format_kinds(.got))]
    NoMatchingOverload {
        /// Builtin name
        name: String,
        /// Kinds of the collected arguments
        got: Vec<ValueKind>,
    },

    /// A string that does not parse as the requested type
    ///
    /// **Example:** `(int "a")`
    #[error("Cannot cast \"{text}\" to {target}")]
    InvalidCast {
        /// Target kind of the cast
        target: ValueKind,
        /// Text that failed to parse
        text: String,
    },

    /// `if` with a condition that is not a boolean
    #[error("Condition of if must be a bool, got {got}")]
    NonBooleanCondition {
        /// Kind of the condition value
        got: ValueKind,
    },
}

/// Errors from calls with the wrong number of arguments
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArityError {
    /// Fewer arguments than any overload takes
    #[error("{0} expects {1} arguments, but only got {2}")]
    TooFewArguments(String, usize, usize),

    /// More arguments than any overload takes
    #[error("{0} expects {1} arguments, but got {2}")]
    TooManyArguments(String, usize, usize),
}

/// Errors building a builtin registry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// A second overload with the same parameter kinds
    #[error("Duplicate overload {name}({})", format_kinds(.params))]
    DuplicateOverload {
        /// Builtin name
        name: String,
        /// Parameter kinds of the duplicate
        params: Vec<ValueKind>,
    },
}

/// Fuselisp errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Lexing failed
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Token structure is malformed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Name resolution or execution failed
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// Argument kinds were rejected
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Argument count was rejected
    #[error(transparent)]
    Arity(#[from] ArityError),

    /// Builtin registry construction failed
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Name of the error category, for reporting alongside the message
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Lex(_) => "LexError",
            Error::Parse(_) => "ParseError",
            Error::Eval(_) => "EvalError",
            Error::Type(_) => "TypeError",
            Error::Arity(_) => "ArityError",
            Error::Registry(_) => "RegistryError",
            Error::Config(_) => "ConfigError",
        }
    }
}

fn format_kinds(kinds: &[ValueKind]) -> String {
    kinds
        .iter()
        .map(ValueKind::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for fuselisp operations
pub type Result<T> = std::result::Result<T, Error>;
