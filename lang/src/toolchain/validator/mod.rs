//! Grammar-free structural checks over a finished token sequence.
//!
//! The validator tracks the delimiter pairs of a [Vocabulary](crate::toolchain::lexer::Vocabulary)
//! on a stack and reports every closing delimiter that doesn't match, and every opening delimiter
//! left unclosed at the end of input. It doesn't need or build a syntax tree.

pub mod validation;

mod context;

pub use validation::{report, validate, ValidationIssue, ValidationResult};
