//! A parser-shaped front for the lexer and validator, so editors can show the first error in the
//! form a full parser would report it.

use serde::Serialize;

use crate::toolchain::diagnostics::diagnostic_kind::StructureDiagnosticKind;
use crate::toolchain::diagnostics::DiagnosticRecord;
use crate::toolchain::lexer::rows::{self, Row};
use crate::toolchain::lexer::{Token, TokenizedBuffer, Vocabulary};
use crate::toolchain::source::SourceBuffer;
use crate::toolchain::validator::{self, ValidationIssue};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    Lexical,
    Structural,
}

/// The first error found in a source, described by what was expected and what was found
/// instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxErrorReport {
    pub message: String,
    pub raw_message: String,
    pub expected: Vec<String>,
    pub unexpected: String,
    pub line: Option<i32>,
    pub column: Option<i32>,
    pub value: String,
    #[serde(rename = "type")]
    pub error_type: ErrorType,

    // The expected tokens, grouped by category.
    pub keywords: Vec<String>,
    pub literals: Vec<String>,
    pub symbols: Vec<String>,
    pub others: Vec<String>,

    pub is_end_of_input: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Analysis<'s> {
    Ok(Vec<Row<'s>>),
    Error(SyntaxErrorReport),
}

/// Scans `source` resiliently and analyzes the result.
pub fn analyze<'s>(source: &'s SourceBuffer<'s>, vocabulary: &Vocabulary) -> Analysis<'s> {
    let (buffer, diags) = TokenizedBuffer::tokenize_resilient(source, vocabulary);
    let lexical_errors: Vec<DiagnosticRecord> = diags.iter().map(DiagnosticRecord::from).collect();
    analyze_tokens(buffer.tokens(), &lexical_errors, vocabulary)
}

/// Analyzes an already scanned token sequence. The first of `lexical_errors` wins, then the first
/// structural issue in `tokens`. With neither, returns the rows of `tokens`.
pub fn analyze_tokens<'s>(
    tokens: &[Token<'s>],
    lexical_errors: &[DiagnosticRecord],
    vocabulary: &Vocabulary,
) -> Analysis<'s> {
    if let Some(first) = lexical_errors.first() {
        return Analysis::Error(lexical_report(first));
    }

    let result = validator::validate(tokens, vocabulary);
    match result.issues.first() {
        Some(issue) => Analysis::Error(structural_report(issue, tokens, vocabulary)),
        None => Analysis::Ok(rows::to_rows(tokens)),
    }
}

fn lexical_report(error: &DiagnosticRecord) -> SyntaxErrorReport {
    SyntaxErrorReport {
        message: error.message.clone(),
        raw_message: error.message.clone(),
        expected: Vec::new(),
        unexpected: "invalid token".to_string(),
        line: error.line,
        column: error.column,
        value: String::new(),
        error_type: ErrorType::Lexical,
        keywords: Vec::new(),
        literals: Vec::new(),
        symbols: Vec::new(),
        others: Vec::new(),
        is_end_of_input: false,
    }
}

fn structural_report(
    issue: &ValidationIssue,
    tokens: &[Token],
    vocabulary: &Vocabulary,
) -> SyntaxErrorReport {
    let found = tokens.get(issue.token_index);
    let value = found.map_or("", |token| token.string).to_string();

    // The closer that would have been accepted, if any delimiter was open.
    let expected: Vec<String> = issue
        .opened_at
        .and_then(|index| tokens.get(index))
        .and_then(|opener| opener.string.chars().next())
        .and_then(|c| vocabulary.opening_pair(c))
        .map(|pair| vec![pair.close.to_string()])
        .unwrap_or_default();

    let is_end_of_input = issue.kind == StructureDiagnosticKind::UnclosedDelimiter;
    let unexpected = match found {
        Some(token) if !token.is_end() => format!("'{}'", token.string),
        _ => "end of input".to_string(),
    };

    SyntaxErrorReport {
        message: format!("{} at line {}, column {}", issue.message, issue.line, issue.column),
        raw_message: issue.message.clone(),
        symbols: expected.clone(),
        expected,
        unexpected,
        line: Some(issue.line),
        column: Some(issue.column),
        value,
        error_type: ErrorType::Structural,
        keywords: Vec::new(),
        literals: Vec::new(),
        others: Vec::new(),
        is_end_of_input,
    }
}
