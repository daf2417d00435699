use serde_json::{json, Map, Value};

use super::request::{Payload, Response, ScanMode};
use crate::toolchain::diagnostics::DiagnosticRecord;
use crate::toolchain::lexer::{rows, LexicalError, TokenizedBuffer, Vocabulary};
use crate::toolchain::source::SourceBuffer;
use crate::toolchain::validator;

// File name attached to diagnostics about request sources.
const REQUEST_FILE_NAME: &str = "request";

fn lexing_failed(error: &LexicalError) -> String {
    format!("Lexing failed: {}", DiagnosticRecord::from(&error.diagnostic))
}

/// Row-projected tokens of the payload source. Lexical errors never fail the request: resilient
/// scans attach every diagnostic, strict scans attach the fatal one and the rows before it.
pub fn lex(payload: &Payload, vocabulary: &Vocabulary) -> Response {
    let source = SourceBuffer::new_from_string(&payload.source, REQUEST_FILE_NAME);
    let mut body = Map::new();
    match payload.mode {
        ScanMode::Resilient => {
            let (buffer, diags) = TokenizedBuffer::tokenize_resilient(&source, vocabulary);
            body.insert("rows".to_string(), json!(buffer.rows()));
            let errors: Vec<DiagnosticRecord> = diags.iter().map(DiagnosticRecord::from).collect();
            if let Some(first) = errors.first() {
                body.insert("error".to_string(), json!(first.to_string()));
                body.insert("errors".to_string(), json!(errors));
            }
        }
        ScanMode::Strict => match TokenizedBuffer::tokenize_strict(&source, vocabulary) {
            Ok(buffer) => {
                body.insert("rows".to_string(), json!(buffer.rows()));
            }
            Err(error) => {
                body.insert("rows".to_string(), json!(rows::to_rows(&error.partial)));
                body.insert("error".to_string(), json!(lexing_failed(&error)));
            }
        },
    }
    Response::new(200, Value::Object(body))
}

/// The structural validation result of the payload source, which must scan without errors.
pub fn validate(payload: &Payload, vocabulary: &Vocabulary) -> Response {
    let source = SourceBuffer::new_from_string(&payload.source, REQUEST_FILE_NAME);
    match TokenizedBuffer::tokenize_strict(&source, vocabulary) {
        Ok(buffer) => {
            let result = validator::validate(buffer.tokens(), vocabulary);
            let status = if result.ok { 200 } else { 400 };
            Response::new(status, json!(result))
        }
        Err(error) => Response::error(400, lexing_failed(&error)),
    }
}
