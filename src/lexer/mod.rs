//! Lexical analysis for fuselisp
//!
//! Converts source text into an ordered sequence of tokens using a table of
//! prioritized token rules.

mod scanner;
mod token;

pub use scanner::{significant, Lexer, TokenRule};
pub use token::{Token, TokenKind};
