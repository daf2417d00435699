use serde::Serialize;

use super::context::Context;
use crate::toolchain::diagnostics::diagnostic_emitter::{DiagnosticConsumer, DiagnosticLevel};
use crate::toolchain::diagnostics::diagnostic_kind::{DiagnosticKind, StructureDiagnosticKind};
use crate::toolchain::lexer::vocabulary::{DelimiterPair, Vocabulary};
use crate::toolchain::lexer::{
    Token, TokenDiagnosticEmitter, TokenIndex, TokenKind, TokenizedBuffer,
};

/// A single structural violation, positioned at the token that revealed it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    #[serde(skip)]
    pub kind: StructureDiagnosticKind,
    pub message: String,
    pub line: i32,
    pub column: i32,

    /// The closing delimiter or end-of-input token the issue is reported at.
    #[serde(skip)]
    pub token_index: TokenIndex,

    /// The opening delimiter involved, for mismatched and unclosed delimiters.
    #[serde(skip)]
    pub opened_at: Option<TokenIndex>,
}

/// Outcome of a validation pass. `ok` is true exactly when `issues` is empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub ok: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    fn from_issues(issues: Vec<ValidationIssue>) -> ValidationResult {
        ValidationResult { ok: issues.is_empty(), issues }
    }
}

assert_impl_all!(ValidationResult: Send, Sync);

/// Checks that the delimiter pairs of `vocabulary` are balanced and correctly nested in `tokens`.
///
/// A closing delimiter that doesn't match the innermost open delimiter, or arrives with nothing
/// open, is reported and otherwise ignored, leaving the open delimiters as they were. Delimiters
/// still open at the end of input are reported there, innermost first. Tokens after the first
/// end-of-input token are not examined. A sequence with no end-of-input token reports unclosed
/// delimiters at its last token.
pub fn validate(tokens: &[Token], vocabulary: &Vocabulary) -> ValidationResult {
    let mut context = Context::new();
    let mut issues = Vec::new();

    for (token_index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Delimiter => {
                let c = match token.string.chars().next() {
                    Some(c) => c,
                    None => continue,
                };
                if let Some(pair) = vocabulary.opening_pair(c) {
                    context.push_state(*pair, token_index);
                } else if vocabulary.closing_pair(c).is_some() {
                    if let Some(issue) = close(&mut context, tokens, token_index, c) {
                        issues.push(issue);
                    }
                }
            }
            TokenKind::EndOfInput => {
                unwind(&mut context, tokens, token_index, &mut issues);
                return ValidationResult::from_issues(issues);
            }
            _ => {}
        }
    }

    if let Some(last) = tokens.len().checked_sub(1) {
        unwind(&mut context, tokens, last, &mut issues);
    }
    ValidationResult::from_issues(issues)
}

// Matches the closing delimiter `c` at `token_index` against the innermost open delimiter.
fn close(
    context: &mut Context,
    tokens: &[Token],
    token_index: TokenIndex,
    c: char,
) -> Option<ValidationIssue> {
    let token = &tokens[token_index];
    let innermost = context.state().map(|entry| (entry.pair, entry.token_index));
    match innermost {
        Some((pair, _)) if pair.close == c => {
            context.pop_state();
            None
        }
        Some((pair, opened_at)) => {
            let opener = &tokens[opened_at];
            Some(ValidationIssue {
                kind: StructureDiagnosticKind::MismatchedDelimiter,
                message: format!(
                    "mismatched closing delimiter '{}', expected '{}' to close '{}' opened at \
                     line {}, column {}",
                    c, pair.close, pair.open, opener.line, opener.column
                ),
                line: token.line,
                column: token.column,
                token_index,
                opened_at: Some(opened_at),
            })
        }
        None => Some(ValidationIssue {
            kind: StructureDiagnosticKind::UnexpectedClosingDelimiter,
            message: format!("unexpected closing delimiter '{}'", c),
            line: token.line,
            column: token.column,
            token_index,
            opened_at: None,
        }),
    }
}

// Reports, innermost first, every delimiter still open at `token_index`.
fn unwind(
    context: &mut Context,
    tokens: &[Token],
    token_index: TokenIndex,
    issues: &mut Vec<ValidationIssue>,
) {
    let token = &tokens[token_index];
    while let Some(entry) = context.pop_state() {
        let DelimiterPair { open, close } = entry.pair;
        let opener = &tokens[entry.token_index];
        issues.push(ValidationIssue {
            kind: StructureDiagnosticKind::UnclosedDelimiter,
            message: format!(
                "unclosed delimiter '{}' opened at line {}, column {}, expected '{}'",
                open, opener.line, opener.column, close
            ),
            line: token.line,
            column: token.column,
            token_index,
            opened_at: Some(entry.token_index),
        });
    }
    debug_assert_eq!(context.depth(), 0);
}

/// Emits each issue of `result` as an error diagnostic located in `buffer`, with a note at the
/// opening delimiter when there is one.
pub fn report<'s>(
    result: &ValidationResult,
    buffer: &TokenizedBuffer<'s>,
    diags: &mut impl DiagnosticConsumer<'s>,
) {
    let mut emitter = TokenDiagnosticEmitter::new(diags, buffer);
    for issue in &result.issues {
        let kind = DiagnosticKind::StructureError { kind: issue.kind };
        let mut builder =
            emitter.build(DiagnosticLevel::Error, kind, &issue.token_index, issue.message.clone());
        if let Some(opened_at) = issue.opened_at {
            let open = buffer.token_at(opened_at).map_or("", |token| token.string);
            builder = builder.note(kind, &opened_at, format!("'{}' opened here", open));
        }
        builder.emit();
    }
}
