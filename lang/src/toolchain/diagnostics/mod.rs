//! Tools for the production and management of diagnostic feedback from the toolchain.
//!
//! Toolchain code produces [Diagnostic] values carrying a [DiagnosticKind], a location and a
//! human-readable body. The lexer yields them directly, already located, while later stages
//! construct them through a [DiagnosticEmitter] that translates domain-specific locations (token
//! indices, for the validator) with a [DiagnosticLocationTranslator]. Either way they end up in
//! a [DiagnosticConsumer], which decides how to deliver them to the user. For transport, a
//! [DiagnosticRecord] projects a diagnostic down to its message and position.
//!

pub mod diagnostic_emitter;
pub mod diagnostic_kind;
pub mod diagnostic_record;

pub use diagnostic_emitter::Diagnostic;
pub use diagnostic_emitter::DiagnosticCollector;
pub use diagnostic_emitter::DiagnosticConsumer;
pub use diagnostic_emitter::DiagnosticEmitter;
pub use diagnostic_emitter::DiagnosticLevel;
pub use diagnostic_emitter::DiagnosticLocation;
pub use diagnostic_emitter::DiagnosticLocationTranslator;
pub use diagnostic_emitter::DiagnosticMessage;
pub use diagnostic_emitter::NullDiagnosticConsumer;
pub use diagnostic_emitter::StreamDiagnosticConsumer;
pub use diagnostic_kind::DiagnosticKind;
pub use diagnostic_record::DiagnosticRecord;
