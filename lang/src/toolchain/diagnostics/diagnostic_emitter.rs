use std::fmt;
use std::io::Write;

use super::DiagnosticKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Warning,
    Error,
}

/// A location in code referred to by the diagnostic.
///
/// A `line_number` or `column_number` of zero means the position is unknown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticLocation<'s> {
    pub file_name: &'s str,
    pub line_number: i32,
    pub column_number: i32,

    /// The text of the source line, without its line ending. May be empty if not known.
    pub line: &'s str,
}

impl<'s> fmt::Display for DiagnosticLocation<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name)?;
        if self.line_number > 0 {
            f.write_fmt(format_args!(":{}", self.line_number))?;
        }
        if self.column_number > 0 {
            f.write_fmt(format_args!(":{}", self.column_number))?;
        }
        fmt::Result::Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage<'s> {
    pub kind: DiagnosticKind,
    pub location: DiagnosticLocation<'s>,
    pub body: String,
}

impl<'s> fmt::Display for DiagnosticMessage<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // This is an abuse of the "alternate" syntax in fmt::Display trait used to pass a boolean
        // argument to fmt(), in this case to tell the DiagnosticMessage to print this message
        // as an error.
        let infix = match f.alternate() {
            true => "ERROR: ",
            false => "",
        };
        f.write_fmt(format_args!("{}: {}{}", self.location, infix, self.body))
    }
}

/// A complete Diagnostic, including a main message and optional notes, plus the level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic<'s> {
    pub level: DiagnosticLevel,
    pub message: DiagnosticMessage<'s>,
    pub notes: Vec<DiagnosticMessage<'s>>,
}

impl<'s> Diagnostic<'s> {
    pub fn new(
        level: DiagnosticLevel,
        message: DiagnosticMessage<'s>,
        notes: Vec<DiagnosticMessage<'s>>,
    ) -> Diagnostic<'s> {
        Diagnostic { level, message, notes }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.message.kind
    }
}

impl<'s> fmt::Display for Diagnostic<'s> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.level == DiagnosticLevel::Error {
            f.write_fmt(format_args!("{:#}", self.message))?;
        } else {
            f.write_fmt(format_args!("{}", self.message))?;
        }
        for m in &self.notes {
            f.write_fmt(format_args!("\n{}", m))?;
        }
        fmt::Result::Ok(())
    }
}

/// An interface for an object that can receive diagnostics from the toolchain as they are emitted.
pub trait DiagnosticConsumer<'s> {
    fn handle_diagnostic(&mut self, diag: Diagnostic<'s>);
    fn flush(&mut self) {}
}

pub trait DiagnosticLocationTranslator<'s, LocationT> {
    fn get_location(&self, loc: &LocationT) -> DiagnosticLocation<'s>;
}

// This is an adaptor between subsystems (like the validator) and the diagnostic consumer. It
// holds the consumer and translator and facilitates creating Diagnostics, and ultimately
// provides the completed diagnostics to the DiagnosticConsumer.
pub struct DiagnosticEmitter<'c, 's, LocationT> {
    consumer: &'c mut dyn DiagnosticConsumer<'s>,
    translator: &'c dyn DiagnosticLocationTranslator<'s, LocationT>,
}

impl<'c, 's, LocationT> DiagnosticEmitter<'c, 's, LocationT> {
    pub fn new(
        consumer: &'c mut dyn DiagnosticConsumer<'s>,
        translator: &'c dyn DiagnosticLocationTranslator<'s, LocationT>,
    ) -> DiagnosticEmitter<'c, 's, LocationT> {
        DiagnosticEmitter { consumer, translator }
    }

    pub fn build(
        &mut self,
        level: DiagnosticLevel,
        kind: DiagnosticKind,
        location: &LocationT,
        body: String,
    ) -> DiagnosticBuilder<'_, 'c, 's, LocationT> {
        let location = self.translator.get_location(location);
        let message = DiagnosticMessage { kind, location, body };
        DiagnosticBuilder { emitter: self, level, message, notes: Vec::new() }
    }
}

/// Accumulates notes onto a diagnostic before handing it to the emitter's consumer.
pub struct DiagnosticBuilder<'e, 'c, 's, LocationT> {
    emitter: &'e mut DiagnosticEmitter<'c, 's, LocationT>,
    level: DiagnosticLevel,
    message: DiagnosticMessage<'s>,
    notes: Vec<DiagnosticMessage<'s>>,
}

impl<'e, 'c, 's, LocationT> DiagnosticBuilder<'e, 'c, 's, LocationT> {
    pub fn note(mut self, kind: DiagnosticKind, location: &LocationT, body: String) -> Self {
        let location = self.emitter.translator.get_location(location);
        self.notes.push(DiagnosticMessage { kind, location, body });
        self
    }

    pub fn emit(self) {
        let diag = Diagnostic::new(self.level, self.message, self.notes);
        self.emitter.consumer.handle_diagnostic(diag);
    }
}

/// Writes each diagnostic to a stream, followed by the offending source line and a caret under
/// the reported column when those are known.
pub struct StreamDiagnosticConsumer<W: std::io::Write> {
    stream: std::io::BufWriter<W>,
}

impl<W: std::io::Write> StreamDiagnosticConsumer<W> {
    pub fn new(stream: W) -> StreamDiagnosticConsumer<W> {
        StreamDiagnosticConsumer { stream: std::io::BufWriter::new(stream) }
    }

    fn write_message(&mut self, message: &DiagnosticMessage, error: bool) -> std::io::Result<()> {
        if error {
            writeln!(self.stream, "{:#}", message)?;
        } else {
            writeln!(self.stream, "{}", message)?;
        }
        let location = &message.location;
        if !location.line.is_empty() {
            writeln!(self.stream, "    {}", location.line)?;
            if location.column_number > 0 {
                let indent: String = location
                    .line
                    .chars()
                    .take((location.column_number - 1) as usize)
                    .map(|c| if c == '\t' { '\t' } else { ' ' })
                    .collect();
                writeln!(self.stream, "    {}^", indent)?;
            }
        }
        Ok(())
    }
}

impl<'s, W: std::io::Write> DiagnosticConsumer<'s> for StreamDiagnosticConsumer<W> {
    fn handle_diagnostic(&mut self, diag: Diagnostic<'s>) {
        // There is nowhere left to report a failure to write a diagnostic.
        let _ = self.write_message(&diag.message, diag.level == DiagnosticLevel::Error);
        for note in &diag.notes {
            let _ = self.write_message(note, false);
        }
    }

    fn flush(&mut self) {
        let _ = self.stream.flush();
    }
}

pub fn console_diagnostic_consumer() -> StreamDiagnosticConsumer<impl std::io::Write> {
    StreamDiagnosticConsumer::new(std::io::stderr())
}

/// Discards every diagnostic.
pub struct NullDiagnosticConsumer {}

impl<'s> DiagnosticConsumer<'s> for NullDiagnosticConsumer {
    fn handle_diagnostic(&mut self, _diag: Diagnostic<'s>) {}
}

/// Keeps every diagnostic, in the order they were emitted.
#[derive(Debug, Default)]
pub struct DiagnosticCollector<'s> {
    diagnostics: Vec<Diagnostic<'s>>,
}

impl<'s> DiagnosticCollector<'s> {
    pub fn new() -> DiagnosticCollector<'s> {
        DiagnosticCollector { diagnostics: Vec::new() }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic<'s>> {
        self.diagnostics
    }
}

impl<'s> DiagnosticConsumer<'s> for DiagnosticCollector<'s> {
    fn handle_diagnostic(&mut self, diag: Diagnostic<'s>) {
        self.diagnostics.push(diag);
    }
}
