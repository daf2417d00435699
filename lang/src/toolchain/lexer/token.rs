use std::fmt::Display;

use serde::Serialize;

/// Represents a single lexical token.
///
/// Blank space and comments are consumed by the lexer and never appear as [Token]s. Every token
/// sequence the lexer finishes ends with exactly one [TokenKind::EndOfInput] token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// The kind of Token.
    pub kind: TokenKind,

    /// The substring representing the Token. Empty for [TokenKind::EndOfInput].
    pub string: &'a str,

    /// The 1-based line position in the input string.
    pub line: i32,

    /// The 1-based character column on the line.
    pub column: i32,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, string: &'a str, line: i32, column: i32) -> Token<'a> {
        Token { kind, string, line, column }
    }

    /// The terminating token, positioned just past the last character of input.
    pub fn end(line: i32, column: i32) -> Token<'a> {
        Token { kind: TokenKind::EndOfInput, string: "", line, column }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

/// An enumeration of all possible Token types.
///
/// Which words are keywords and which character sequences are operators or delimiters is decided
/// by the [Vocabulary](super::Vocabulary) the lexer runs with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A single character from the vocabulary's delimiter set, such as `(` or `;`.
    Delimiter,

    /// Signals the end of the token stream, so consumers can detect exhaustion without separate
    /// length checks.
    EndOfInput,

    /// A letter or underscore followed by zero or more alphanumeric characters or underscores,
    /// that is not a reserved word.
    Identifier,

    /// A reserved word of the vocabulary, `while` for example.
    Keyword,

    /// A literal value in the code.
    Literal { kind: LiteralKind },

    /// The longest operator of the vocabulary matching at this position, `<=` for example.
    Operator,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralKind {
    /// One of the vocabulary's boolean words, `true` or `false` by default.
    Boolean { value: bool },

    /// A floating point numeric literal.
    Float { kind: FloatKind },

    /// A base-10 integer number, `0` for example.
    Integer,

    /// A quote-delimited character sequence. If it has backslash (`\`) escape characters in it
    /// `has_escapes` is true, telling later stages if they must process the string more or can
    /// copy it directly.
    String { has_escapes: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatKind {
    /// A base-10 number with an `e` or `E` and a signed exponent, `6.02e23` or `1e-9` for example.
    Scientific,

    /// A base-10 number with a single dot, `1.0` for example.
    Simple,
}

/// The flat category of a [TokenKind], as exposed to clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenCategory {
    Keyword,
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    BooleanLiteral,
    Operator,
    Delimiter,
    EndOfInput,
}

impl TokenKind {
    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::Delimiter => TokenCategory::Delimiter,
            TokenKind::EndOfInput => TokenCategory::EndOfInput,
            TokenKind::Identifier => TokenCategory::Identifier,
            TokenKind::Keyword => TokenCategory::Keyword,
            TokenKind::Literal { kind: LiteralKind::Boolean { .. } } => TokenCategory::BooleanLiteral,
            TokenKind::Literal { kind: LiteralKind::Float { .. } } => TokenCategory::FloatLiteral,
            TokenKind::Literal { kind: LiteralKind::Integer } => TokenCategory::IntegerLiteral,
            TokenKind::Literal { kind: LiteralKind::String { .. } } => TokenCategory::StringLiteral,
            TokenKind::Operator => TokenCategory::Operator,
        }
    }
}

impl Display for TokenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            TokenCategory::Keyword => "keyword",
            TokenCategory::Identifier => "identifier",
            TokenCategory::IntegerLiteral => "integer-literal",
            TokenCategory::FloatLiteral => "float-literal",
            TokenCategory::StringLiteral => "string-literal",
            TokenCategory::BooleanLiteral => "boolean-literal",
            TokenCategory::Operator => "operator",
            TokenCategory::Delimiter => "delimiter",
            TokenCategory::EndOfInput => "end-of-input",
        };
        f.write_str(s)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            TokenKind::Delimiter => "delimiter",
            TokenKind::EndOfInput => "end of input",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Literal { kind: LiteralKind::Boolean { .. } } => "boolean literal",
            TokenKind::Literal { kind: LiteralKind::Float { .. } } => "floating point literal",
            TokenKind::Literal { kind: LiteralKind::Integer } => "integer literal",
            TokenKind::Literal { kind: LiteralKind::String { .. } } => "string literal",
            TokenKind::Operator => "operator",
        };
        f.write_str(s)
    }
}

impl<'s> Display for Token<'s> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => f.write_fmt(format_args!("{}", self.kind)),
            _ => f.write_fmt(format_args!("{} '{}'", self.kind, self.string)),
        }
    }
}

assert_impl_all!(Token<'static>: Send, Sync);
