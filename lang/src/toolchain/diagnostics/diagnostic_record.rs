use std::fmt;

use serde::Serialize;

use super::Diagnostic;

/// A transport-neutral projection of a [Diagnostic]: its message and, when known, position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRecord {
    pub message: String,
    pub line: Option<i32>,
    pub column: Option<i32>,
}

impl<'s> From<&Diagnostic<'s>> for DiagnosticRecord {
    fn from(diag: &Diagnostic<'s>) -> Self {
        let location = &diag.message.location;
        DiagnosticRecord {
            message: diag.message.body.clone(),
            line: (location.line_number > 0).then_some(location.line_number),
            column: (location.column_number > 0).then_some(location.column_number),
        }
    }
}

impl fmt::Display for DiagnosticRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, " at line {}, column {}", line, column),
            (Some(line), None) => write!(f, " at line {}", line),
            _ => Ok(()),
        }
    }
}
