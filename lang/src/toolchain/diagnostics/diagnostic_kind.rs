/// The enumerated type of all diagnostics Quarry emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    LexerError { kind: LexerDiagnosticKind },
    StructureError { kind: StructureDiagnosticKind },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexerDiagnosticKind {
    /// A character that doesn't start any token and isn't blank space or a comment.
    UnrecognizedCharacter,

    /// A string literal missing its closing quote before the end of the line or input.
    UnterminatedString,

    /// A block comment missing its closing marker before the end of input.
    UnterminatedComment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructureDiagnosticKind {
    /// A closing delimiter that doesn't pair with the innermost open delimiter.
    MismatchedDelimiter,

    /// A closing delimiter with no open delimiter at all.
    UnexpectedClosingDelimiter,

    /// An opening delimiter still open at the end of input.
    UnclosedDelimiter,
}
