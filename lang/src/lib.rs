//! Lexical analysis and structural validation for code-editing clients.
//!
//! Quarry turns source text into a positioned token stream, with either strict (fail at the
//! first error, keeping what was scanned so far) or resilient (record diagnostics and keep
//! going) error handling, and runs a grammar-free delimiter balance check over finished token
//! streams. The [service] module shapes these results into the JSON payloads an editor front end
//! consumes.
//!

#[macro_use]
extern crate static_assertions;

#[doc(hidden)]
pub use const_format;

pub mod config;
pub mod service;
pub mod toolchain;
