use super::cursor::Cursor;
use super::rows::{self, Row};
use super::vocabulary::Vocabulary;
use super::{Token, TokenIndex};
use crate::toolchain::diagnostics::{
    Diagnostic, DiagnosticCollector, DiagnosticConsumer, DiagnosticEmitter, DiagnosticLocation,
    DiagnosticLocationTranslator,
};
use crate::toolchain::source;

/// The fatal outcome of strict tokenization: the first lexical error, plus every token
/// recognized before it.
#[derive(Debug, thiserror::Error)]
#[error("{diagnostic}")]
pub struct LexicalError<'s> {
    pub diagnostic: Diagnostic<'s>,

    /// Tokens scanned before the error. Never includes an end-of-input token.
    pub partial: Vec<Token<'s>>,
}

pub struct TokenizedBuffer<'s> {
    tokens: Vec<Token<'s>>,
    lines: Vec<&'s str>,
    source: &'s source::SourceBuffer<'s>,
}

impl<'s> TokenizedBuffer<'s> {
    /// Resilient tokenization. Every lexical error goes to `diags` and scanning continues, so the
    /// buffer always holds every recognized token and ends with an end-of-input token.
    pub fn tokenize(
        source: &'s source::SourceBuffer,
        vocabulary: &Vocabulary,
        diags: &mut impl DiagnosticConsumer<'s>,
    ) -> TokenizedBuffer<'s> {
        let mut lines = Vec::new();
        let mut tokens = Vec::new();
        let mut errors = Vec::new();
        for scanned in Cursor::new(source, vocabulary, &mut lines) {
            match scanned {
                Ok(token) => tokens.push(token),
                Err(diag) => errors.push(diag),
            }
        }
        let buffer = TokenizedBuffer { tokens, lines, source };

        // Lines are only all known once scanning finishes.
        for mut diag in errors {
            let location = &mut diag.message.location;
            location.line = buffer.line(location.line_number).unwrap_or("");
            diags.handle_diagnostic(diag);
        }
        buffer
    }

    /// Resilient tokenization returning the diagnostics alongside the buffer.
    pub fn tokenize_resilient(
        source: &'s source::SourceBuffer,
        vocabulary: &Vocabulary,
    ) -> (TokenizedBuffer<'s>, Vec<Diagnostic<'s>>) {
        let mut diags = DiagnosticCollector::new();
        let buffer = Self::tokenize(source, vocabulary, &mut diags);
        (buffer, diags.into_diagnostics())
    }

    /// Strict tokenization, stopping at the first lexical error.
    pub fn tokenize_strict(
        source: &'s source::SourceBuffer,
        vocabulary: &Vocabulary,
    ) -> Result<TokenizedBuffer<'s>, LexicalError<'s>> {
        let mut lines = Vec::new();
        let mut tokens = Vec::new();
        for scanned in Cursor::new(source, vocabulary, &mut lines) {
            match scanned {
                Ok(token) => tokens.push(token),
                Err(mut diagnostic) => {
                    let location = &mut diagnostic.message.location;
                    location.line = line_text(source.code(), location.line_number);
                    return Err(LexicalError { diagnostic, partial: tokens });
                }
            }
        }
        Ok(TokenizedBuffer { tokens, lines, source })
    }

    pub fn token_at(&self, i: TokenIndex) -> Option<&Token<'s>> {
        self.tokens.get(i)
    }

    pub fn tokens(&self) -> &[Token<'s>] {
        &self.tokens
    }

    /// The text of the 1-based line `line_number`, without its line ending.
    pub fn line(&self, line_number: i32) -> Option<&'s str> {
        let index = usize::try_from(line_number).ok()?.checked_sub(1)?;
        self.lines.get(index).copied()
    }

    pub fn rows(&self) -> Vec<Row<'s>> {
        rows::to_rows(&self.tokens)
    }
}

impl<'s> DiagnosticLocationTranslator<'s, TokenIndex> for TokenizedBuffer<'s> {
    fn get_location(&self, token_index: &TokenIndex) -> DiagnosticLocation<'s> {
        let (line_number, column_number) = match self.tokens.get(*token_index) {
            Some(token) => (token.line, token.column),
            None => (0, 0),
        };
        DiagnosticLocation {
            file_name: self.source.file_name(),
            line_number,
            column_number,
            // The end-of-input token may sit on an empty final line with no entry in `lines`.
            line: self.line(line_number).unwrap_or(""),
        }
    }
}

// The text of the 1-based line `line_number` of `code`, without its line ending.
fn line_text(code: &str, line_number: i32) -> &str {
    let line = usize::try_from(line_number)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| code.split('\n').nth(index))
        .unwrap_or("");
    line.strip_suffix('\r').unwrap_or(line)
}

pub type TokenDiagnosticEmitter<'c, 's> = DiagnosticEmitter<'c, 's, TokenIndex>;
