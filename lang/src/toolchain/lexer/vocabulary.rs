//! The language-defined tables the lexer and validator run against.
//!
//! A [LanguageConfig] is the serializable, user-facing description of a vocabulary. It is checked
//! and compiled into a [Vocabulary] once, which is then shared read-only by every scan.
//!

use std::collections::HashSet;

use serde::Deserialize;

use super::cursor::is_identifier_start;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum VocabularyError {
    #[error("{field} entry {value:?} must be exactly one character")]
    NotSingleCharacter { field: &'static str, value: String },

    #[error("{field} entries must not be empty")]
    Empty { field: &'static str },

    #[error("delimiter pair {open:?}/{close:?} uses a character missing from delimiters")]
    PairNotDelimiter { open: String, close: String },

    #[error("delimiter pair {open:?}/{close:?} must use two different characters")]
    PairSameCharacter { open: String, close: String },

    #[error("delimiter pair character {character:?} always scans as {shadowed_by}")]
    PairShadowed { character: char, shadowed_by: &'static str },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PairConfig {
    pub open: String,
    pub close: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockCommentConfig {
    pub open: String,
    pub close: String,
}

/// User-facing vocabulary description, typically the `[language]` table of a config file. Any
/// field left out keeps its default.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LanguageConfig {
    pub keywords: Vec<String>,
    pub true_literal: String,
    pub false_literal: String,
    pub operators: Vec<String>,
    pub delimiters: Vec<String>,
    pub pairs: Vec<PairConfig>,
    pub line_comments: Vec<String>,
    pub block_comment: Option<BlockCommentConfig>,
    pub quotes: Vec<String>,
    pub multiline_strings: bool,
}

const DEFAULT_KEYWORDS: &[&str] = &[
    "break", "case", "const", "continue", "default", "do", "else", "for", "func", "if", "import",
    "in", "let", "null", "return", "struct", "switch", "var", "while",
];

const DEFAULT_OPERATORS: &[&str] = &[
    "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+=", "-=", "*=", "/=", "%=", "->", "=>",
    "::", "<<", ">>", "**", "+", "-", "*", "/", "%", "=", "<", ">", "!", "&", "|", "^", "~", "?",
];

const DEFAULT_DELIMITERS: &[&str] = &["(", ")", "{", "}", "[", "]", ",", ";", ":", ".", "#", "@"];

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Default for LanguageConfig {
    fn default() -> Self {
        LanguageConfig {
            keywords: strings(DEFAULT_KEYWORDS),
            true_literal: "true".to_string(),
            false_literal: "false".to_string(),
            operators: strings(DEFAULT_OPERATORS),
            delimiters: strings(DEFAULT_DELIMITERS),
            pairs: vec![
                PairConfig { open: "(".to_string(), close: ")".to_string() },
                PairConfig { open: "[".to_string(), close: "]".to_string() },
                PairConfig { open: "{".to_string(), close: "}".to_string() },
            ],
            line_comments: strings(&["//"]),
            block_comment: Some(BlockCommentConfig {
                open: "/*".to_string(),
                close: "*/".to_string(),
            }),
            quotes: strings(&["\"", "'"]),
            multiline_strings: false,
        }
    }
}

/// An opening and closing delimiter checked for balance by the validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelimiterPair {
    pub open: char,
    pub close: char,
}

/// A checked, compiled [LanguageConfig].
#[derive(Clone, Debug)]
pub struct Vocabulary {
    keywords: HashSet<String>,
    true_literal: String,
    false_literal: String,
    // Longest first, so the first match is the greedy match.
    operators: Vec<String>,
    delimiters: Vec<char>,
    pairs: Vec<DelimiterPair>,
    line_comments: Vec<String>,
    block_comment: Option<(String, String)>,
    quotes: Vec<char>,
    multiline_strings: bool,
}

fn single_char(field: &'static str, value: &str) -> Result<char, VocabularyError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(VocabularyError::NotSingleCharacter { field, value: value.to_string() }),
    }
}

fn non_empty(field: &'static str, values: &[String]) -> Result<(), VocabularyError> {
    if values.iter().any(|v| v.is_empty()) {
        return Err(VocabularyError::Empty { field });
    }
    Ok(())
}

// Names the scanning rule that claims `c` on its own ahead of the delimiter rule, if any. Longer
// markers that merely start with `c` leave the bare character to the delimiter rule.
fn shadowing_rule(config: &LanguageConfig, quotes: &[char], c: char) -> Option<&'static str> {
    let is = |marker: &String| marker.chars().eq(std::iter::once(c));
    if quotes.contains(&c) {
        Some("a string literal")
    } else if c.is_ascii_digit() {
        Some("a number")
    } else if is_identifier_start(c) {
        Some("an identifier")
    } else if config.operators.iter().any(is) {
        Some("an operator")
    } else if config.line_comments.iter().any(is)
        || config.block_comment.as_ref().is_some_and(|block| is(&block.open))
    {
        Some("a comment")
    } else {
        None
    }
}

impl Vocabulary {
    pub fn from_config(config: &LanguageConfig) -> Result<Vocabulary, VocabularyError> {
        non_empty("keywords", &config.keywords)?;
        non_empty("operators", &config.operators)?;
        non_empty("line_comments", &config.line_comments)?;

        let delimiters = config
            .delimiters
            .iter()
            .map(|d| single_char("delimiters", d))
            .collect::<Result<Vec<char>, VocabularyError>>()?;
        let quotes = config
            .quotes
            .iter()
            .map(|q| single_char("quotes", q))
            .collect::<Result<Vec<char>, VocabularyError>>()?;

        let mut pairs = Vec::with_capacity(config.pairs.len());
        for pair in &config.pairs {
            let open = single_char("pairs", &pair.open)?;
            let close = single_char("pairs", &pair.close)?;
            if open == close {
                return Err(VocabularyError::PairSameCharacter {
                    open: pair.open.clone(),
                    close: pair.close.clone(),
                });
            }
            if !delimiters.contains(&open) || !delimiters.contains(&close) {
                return Err(VocabularyError::PairNotDelimiter {
                    open: pair.open.clone(),
                    close: pair.close.clone(),
                });
            }
            for character in [open, close] {
                if let Some(shadowed_by) = shadowing_rule(config, &quotes, character) {
                    return Err(VocabularyError::PairShadowed { character, shadowed_by });
                }
            }
            pairs.push(DelimiterPair { open, close });
        }

        let block_comment = match &config.block_comment {
            Some(block) if block.open.is_empty() || block.close.is_empty() => {
                return Err(VocabularyError::Empty { field: "block_comment" });
            }
            Some(block) => Some((block.open.clone(), block.close.clone())),
            None => None,
        };

        let mut operators = config.operators.clone();
        operators.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        operators.dedup();

        Ok(Vocabulary {
            keywords: config.keywords.iter().cloned().collect(),
            true_literal: config.true_literal.clone(),
            false_literal: config.false_literal.clone(),
            operators,
            delimiters,
            pairs,
            line_comments: config.line_comments.clone(),
            block_comment,
            quotes,
            multiline_strings: config.multiline_strings,
        })
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    /// Returns `Some(value)` if `word` is one of the boolean literal words.
    pub fn boolean_value(&self, word: &str) -> Option<bool> {
        if word == self.true_literal {
            Some(true)
        } else if word == self.false_literal {
            Some(false)
        } else {
            None
        }
    }

    /// Length in bytes of the longest operator `input` starts with.
    pub fn match_operator(&self, input: &str) -> Option<usize> {
        self.operators.iter().find(|op| input.starts_with(op.as_str())).map(|op| op.len())
    }

    pub fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(&c)
    }

    pub fn is_quote(&self, c: char) -> bool {
        self.quotes.contains(&c)
    }

    pub fn multiline_strings(&self) -> bool {
        self.multiline_strings
    }

    /// Length in bytes of the line comment marker `input` starts with.
    pub fn match_line_comment(&self, input: &str) -> Option<usize> {
        self.line_comments
            .iter()
            .find(|prefix| input.starts_with(prefix.as_str()))
            .map(|prefix| prefix.len())
    }

    /// The opening and closing markers of block comments, if the language has them.
    pub fn block_comment(&self) -> Option<(&str, &str)> {
        self.block_comment.as_ref().map(|(open, close)| (open.as_str(), close.as_str()))
    }

    pub fn opening_pair(&self, c: char) -> Option<&DelimiterPair> {
        self.pairs.iter().find(|pair| pair.open == c)
    }

    pub fn closing_pair(&self, c: char) -> Option<&DelimiterPair> {
        self.pairs.iter().find(|pair| pair.close == c)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        let config = LanguageConfig::default();
        match Vocabulary::from_config(&config) {
            Ok(vocabulary) => vocabulary,
            Err(e) => unreachable!("default language config is invalid: {}", e),
        }
    }
}

assert_impl_all!(Vocabulary: Send, Sync);
