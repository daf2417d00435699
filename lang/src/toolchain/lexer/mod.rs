//! A lexer, which splits the input source string into positioned tokens.
//!
//! The scanner core is a single left-to-right pass that skips blank space and comments and
//! matches, in priority order, string literals, numbers, identifiers and reserved words,
//! operators (longest match first) and single-character delimiters. Which words and symbols
//! belong to the language comes from a [Vocabulary].
//!
//! Two operating modes share that core. [TokenizedBuffer::tokenize()] is resilient: it reports
//! each lexical error to a diagnostic consumer and keeps scanning, which suits live highlighting
//! in an editor where input is routinely incomplete. [TokenizedBuffer::tokenize_strict()] stops
//! at the first error and hands back a [LexicalError] holding the tokens scanned so far. The lexer
//! does no processing of literals beyond classifying them; for example, it does not convert
//! number strings into their binary representation.
//!

pub mod rows;
pub mod token;
pub mod tokenized_buffer;
pub mod vocabulary;

mod cursor;

pub use rows::Row;
pub use token::{Token, TokenKind};
pub use tokenized_buffer::{LexicalError, TokenDiagnosticEmitter, TokenizedBuffer};
pub use vocabulary::{LanguageConfig, Vocabulary};

pub type TokenIndex = usize;

#[cfg(test)]
mod tokenized_buffer_unittests;
