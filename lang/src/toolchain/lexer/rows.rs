//! Flat, transport-neutral projection of tokens, one [Row] per token, for display.

use serde::Serialize;

use super::token::{Token, TokenCategory};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Row<'s> {
    pub kind: TokenCategory,
    pub lexeme: &'s str,
    pub line: i32,
    pub column: i32,
}

impl<'s> From<&Token<'s>> for Row<'s> {
    fn from(token: &Token<'s>) -> Self {
        Row { kind: token.kind.category(), lexeme: token.string, line: token.line, column: token.column }
    }
}

pub fn to_rows<'s>(tokens: &[Token<'s>]) -> Vec<Row<'s>> {
    tokens.iter().map(Row::from).collect()
}

/// Renders rows as an aligned text table with a header line.
pub fn format_rows(rows: &[Row]) -> String {
    let kind_width = rows.iter().map(|r| r.kind.to_string().len()).max().unwrap_or(0).max(4);
    let mut out = format!("{:<kind_width$}  {:>4}  {:>6}  LEXEME\n", "KIND", "LINE", "COLUMN");
    for row in rows {
        out.push_str(&format!(
            "{:<kind_width$}  {:>4}  {:>6}  {}\n",
            row.kind.to_string(),
            row.line,
            row.column,
            row.lexeme.escape_debug()
        ));
    }
    out
}
