pub mod analyzer;
pub mod diagnostics;
pub mod lexer;
pub mod source;
pub mod validator;
