use std::str::Chars;

use crate::toolchain::diagnostics::diagnostic_kind::LexerDiagnosticKind;
use crate::toolchain::diagnostics::{
    Diagnostic, DiagnosticKind, DiagnosticLevel, DiagnosticLocation, DiagnosticMessage,
};
use crate::toolchain::source::SourceBuffer;

use super::token::{FloatKind, LiteralKind, Token, TokenKind};
use super::vocabulary::Vocabulary;

/// Token iterator over a SourceBuffer.
///
/// Yields `Ok` for each recognized token and `Err` for each lexical error, in source order, and
/// finishes with a single [TokenKind::EndOfInput] token. By the time an `Err` is yielded the cursor
/// has already skipped past the offending input, so iteration may simply continue. Also tracks
/// input buffer position by line and column, and collects the text of each line into `lines`.
///
/// Design roughly inspired by the rustc lexer Cursor.
pub struct Cursor<'s, 'l> {
    source: &'s SourceBuffer<'s>,
    vocabulary: &'l Vocabulary,
    // An iterator over the input character string.
    chars: Chars<'s>,
    // Input remaining from the start of the current token.
    string: &'s str,
    line: i32,
    column: i32,
    line_str: &'s str,
    lines: &'l mut Vec<&'s str>,
    finished: bool,
}

impl<'s, 'l> Iterator for Cursor<'s, 'l> {
    type Item = Result<Token<'s>, Diagnostic<'s>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if let Err(diag) = self.skip_ignored() {
            return Some(Err(diag));
        }

        // Collect string position at the start of the token.
        let line = self.line;
        let column = self.column;

        if self.is_eof() {
            self.finished = true;
            self.finish_line();
            return Some(Ok(Token::end(line, column)));
        }

        let first_char = self.first();
        let token_kind = if self.vocabulary.is_quote(first_char) {
            self.string_literal(first_char)
        } else if first_char.is_ascii_digit() {
            Some(self.number())
        } else if is_identifier_start(first_char) {
            self.eat_while(is_identifier);
            Some(TokenKind::Identifier)
        } else if let Some(length) = self.vocabulary.match_operator(self.chars.as_str()) {
            self.bump_bytes(length);
            Some(TokenKind::Operator)
        } else if self.vocabulary.is_delimiter(first_char) {
            self.bump();
            Some(TokenKind::Delimiter)
        } else {
            self.bump();
            None
        };

        // End of token, extract the substring.
        let token_str = self.extract_substring();

        let token_kind = match token_kind {
            Some(kind) => kind,
            None => {
                let (kind, body) = match first_char {
                    c if self.vocabulary.is_quote(c) => (
                        LexerDiagnosticKind::UnterminatedString,
                        format!("unterminated string literal, missing closing {}", c),
                    ),
                    c => (
                        LexerDiagnosticKind::UnrecognizedCharacter,
                        format!("unrecognized character '{}'", c.escape_debug()),
                    ),
                };
                return Some(Err(self.error(kind, body, line, column)));
            }
        };

        // Fixup identifiers to match against reserved words.
        let token_kind = match token_kind {
            TokenKind::Identifier => match self.vocabulary.boolean_value(token_str) {
                Some(value) => TokenKind::Literal { kind: LiteralKind::Boolean { value } },
                None if self.vocabulary.is_keyword(token_str) => TokenKind::Keyword,
                None => TokenKind::Identifier,
            },
            kind => kind,
        };
        Some(Ok(Token::new(token_kind, token_str, line, column)))
    }
}

impl<'s, 'l> Cursor<'s, 'l> {
    pub const EOF: char = '\0';

    pub fn new(
        source: &'s SourceBuffer<'s>,
        vocabulary: &'l Vocabulary,
        lines: &'l mut Vec<&'s str>,
    ) -> Cursor<'s, 'l> {
        let input = source.code();
        Cursor {
            source,
            vocabulary,
            chars: input.chars(),
            string: input,
            line: 1,
            column: 1,
            line_str: input,
            lines,
            finished: false,
        }
    }

    fn first(&self) -> char {
        self.chars.clone().next().unwrap_or(Self::EOF)
    }

    fn peek_nth(&self, n: usize) -> char {
        self.chars.clone().nth(n).unwrap_or(Self::EOF)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        // Handle newlines as we encounter them.
        if c == '\n' {
            // Extract the line substring for the line we just terminated.
            let consumed = self.line_str.len() - self.chars.as_str().len();
            let (prefix, suffix) = self.line_str.split_at(consumed);
            self.lines.push(trim_line_end(prefix));
            self.line_str = suffix;

            // Our 1-based line count should now be the same size as the lines array.
            debug_assert!(self.line as usize == self.lines.len());
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    // Advances over `length` bytes of input, which must end on a character boundary.
    fn bump_bytes(&mut self, length: usize) {
        let target = self.chars.as_str().len() - length;
        while self.chars.as_str().len() > target {
            self.bump();
        }
    }

    fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    fn finish_line(&mut self) {
        if !self.line_str.is_empty() {
            self.lines.push(trim_line_end(self.line_str));
            self.line_str = "";
        }
    }

    fn extract_substring(&mut self) -> &'s str {
        let consumed = self.string.len() - self.chars.as_str().len();
        let (prefix, suffix) = self.string.split_at(consumed);
        self.string = suffix;
        prefix
    }

    fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while predicate(self.first()) && !self.is_eof() {
            self.bump();
        }
    }

    fn error(
        &self,
        kind: LexerDiagnosticKind,
        body: String,
        line: i32,
        column: i32,
    ) -> Diagnostic<'s> {
        // We manually build error messages in the lexer, as we don't yet have the file
        // completely mapped out for location translation to be meaningful.
        let location = DiagnosticLocation {
            file_name: self.source.file_name(),
            line_number: line,
            column_number: column,
            line: "",
        };
        let message = DiagnosticMessage { kind: DiagnosticKind::LexerError { kind }, location, body };
        Diagnostic::new(DiagnosticLevel::Error, message, Vec::new())
    }

    // Consumes blank space and comments ahead of the next token. An unterminated block comment
    // consumes the rest of the input and is reported at its opening marker.
    fn skip_ignored(&mut self) -> Result<(), Diagnostic<'s>> {
        let vocabulary = self.vocabulary;
        loop {
            let rest = self.chars.as_str();
            if is_blank_space(self.first()) && !self.is_eof() {
                self.eat_while(is_blank_space);
            } else if let Some(length) = vocabulary.match_line_comment(rest) {
                self.bump_bytes(length);
                self.eat_while(|c| c != '\n');
            } else if let Some((open, close)) =
                vocabulary.block_comment().filter(|(open, _)| rest.starts_with(open))
            {
                let line = self.line;
                let column = self.column;
                self.bump_bytes(open.len());
                let terminated = self.block_comment(close);
                self.extract_substring();
                if !terminated {
                    return Err(self.error(
                        LexerDiagnosticKind::UnterminatedComment,
                        format!("unterminated block comment starting with {}", open),
                        line,
                        column,
                    ));
                }
            } else {
                self.extract_substring();
                return Ok(());
            }
        }
    }

    fn block_comment(&mut self, close: &str) -> bool {
        while !self.is_eof() {
            if self.chars.as_str().starts_with(close) {
                self.bump_bytes(close.len());
                return true;
            }
            self.bump();
        }
        false
    }

    // Returns the kind of a terminated string, or `None` if the string is unterminated, in which
    // case the cursor stops at the end of the line (single-line strings) or input.
    fn string_literal(&mut self, quote: char) -> Option<TokenKind> {
        let multiline = self.vocabulary.multiline_strings();
        self.bump();
        let mut has_escapes = false;
        while !self.is_eof() {
            let c = self.first();
            if c == quote {
                self.bump();
                return Some(TokenKind::Literal { kind: LiteralKind::String { has_escapes } });
            }
            if c == '\n' && !multiline {
                break;
            }
            self.bump();
            if c == '\\' {
                has_escapes = true;
                if !self.is_eof() && (multiline || self.first() != '\n') {
                    self.bump();
                }
            }
        }
        None
    }

    fn number(&mut self) -> TokenKind {
        // Every number starts with one or more numeric characters.
        self.eat_while(|c| c.is_ascii_digit());
        let mut kind = TokenKind::Literal { kind: LiteralKind::Integer };

        if self.first() == '.' && self.peek_nth(1).is_ascii_digit() {
            self.bump();
            self.eat_while(|c| c.is_ascii_digit());
            kind = TokenKind::Literal { kind: LiteralKind::Float { kind: FloatKind::Simple } };
        }

        if matches!(self.first(), 'e' | 'E') {
            let has_exponent = match self.peek_nth(1) {
                '+' | '-' => self.peek_nth(2).is_ascii_digit(),
                c => c.is_ascii_digit(),
            };
            if has_exponent {
                // Consume the 'e' and any sign.
                self.bump();
                if self.first() == '+' || self.first() == '-' {
                    self.bump();
                }
                self.eat_while(|c| c.is_ascii_digit());
                kind = TokenKind::Literal { kind: LiteralKind::Float { kind: FloatKind::Scientific } };
            }
        }

        kind
    }
}

fn trim_line_end(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn is_blank_space(c: char) -> bool {
    // Copied from the rustc lexer.
    matches!(
        c,
        // Usual ASCII suspects
        '\u{0009}'   // \t
        | '\u{000A}' // \n
        | '\u{000B}' // vertical tab
        | '\u{000C}' // form feed
        | '\u{000D}' // \r
        | '\u{0020}' // space

        // NEXT LINE from latin1
        | '\u{0085}'

        // Bidi markers
        | '\u{200E}' // LEFT-TO-RIGHT MARK
        | '\u{200F}' // RIGHT-TO-LEFT MARK

        // Dedicated whitespace characters from Unicode
        | '\u{2028}' // LINE SEPARATOR
        | '\u{2029}' // PARAGRAPH SEPARATOR
    )
}

pub(super) fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
