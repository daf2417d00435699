#[cfg(test)]
mod tests {
    use crate::source;
    use crate::toolchain::diagnostics::diagnostic_kind::LexerDiagnosticKind;
    use crate::toolchain::diagnostics::{DiagnosticKind, DiagnosticRecord, NullDiagnosticConsumer};
    use crate::toolchain::source;

    use crate::toolchain::lexer::token::FloatKind;
    use crate::toolchain::lexer::token::LiteralKind;
    use crate::toolchain::lexer::token::Token;
    use crate::toolchain::lexer::token::TokenKind::*;
    use crate::toolchain::lexer::vocabulary::{LanguageConfig, Vocabulary};

    use crate::toolchain::lexer::TokenizedBuffer;

    // Lexing helper function to compare expected lexing to the resilient token stream, which
    // must contain no diagnostics.
    fn check_lexing(source: &source::SourceBuffer, expect: Vec<Token>) {
        let vocabulary = Vocabulary::default();
        let (buffer, diags) = TokenizedBuffer::tokenize_resilient(source, &vocabulary);
        assert!(diags.is_empty(), "unexpected diagnostics: {:?}", diags);
        assert_eq!(buffer.tokens(), &expect);
    }

    fn lexer_kind(kind: LexerDiagnosticKind) -> DiagnosticKind {
        DiagnosticKind::LexerError { kind }
    }

    #[test]
    fn empty_string() {
        check_lexing(source!(""), vec![Token::end(1, 1)]);
        check_lexing(source!("   "), vec![Token::end(1, 4)]);
        check_lexing(source!("\n\t\n  "), vec![Token::end(3, 3)]);
        check_lexing(source!(" /* block comment */"), vec![Token::end(1, 21)]);
        check_lexing(source!("// line comment\n"), vec![Token::end(2, 1)]);
    }

    #[test]
    fn assignment() {
        check_lexing(
            source!("x = 1 + 2"),
            vec![
                Token { kind: Identifier, string: "x", line: 1, column: 1 },
                Token { kind: Operator, string: "=", line: 1, column: 3 },
                Token { kind: Literal { kind: LiteralKind::Integer }, string: "1", line: 1, column: 5 },
                Token { kind: Operator, string: "+", line: 1, column: 7 },
                Token { kind: Literal { kind: LiteralKind::Integer }, string: "2", line: 1, column: 9 },
                Token::end(1, 10),
            ],
        );
    }

    #[test]
    fn keywords_and_booleans() {
        check_lexing(
            source!("while truly true false_ false"),
            vec![
                Token { kind: Keyword, string: "while", line: 1, column: 1 },
                Token { kind: Identifier, string: "truly", line: 1, column: 7 },
                Token {
                    kind: Literal { kind: LiteralKind::Boolean { value: true } },
                    string: "true",
                    line: 1,
                    column: 13,
                },
                Token { kind: Identifier, string: "false_", line: 1, column: 18 },
                Token {
                    kind: Literal { kind: LiteralKind::Boolean { value: false } },
                    string: "false",
                    line: 1,
                    column: 25,
                },
                Token::end(1, 30),
            ],
        );
    }

    #[test]
    fn identifiers() {
        check_lexing(
            source!("_a b2 çava x_y_"),
            vec![
                Token { kind: Identifier, string: "_a", line: 1, column: 1 },
                Token { kind: Identifier, string: "b2", line: 1, column: 4 },
                Token { kind: Identifier, string: "çava", line: 1, column: 7 },
                Token { kind: Identifier, string: "x_y_", line: 1, column: 12 },
                Token::end(1, 16),
            ],
        );
    }

    #[test]
    fn numbers() {
        check_lexing(
            source!("0 42 3.25 1e9 6.02E+23 7e-1"),
            vec![
                Token { kind: Literal { kind: LiteralKind::Integer }, string: "0", line: 1, column: 1 },
                Token {
                    kind: Literal { kind: LiteralKind::Integer },
                    string: "42",
                    line: 1,
                    column: 3,
                },
                Token {
                    kind: Literal { kind: LiteralKind::Float { kind: FloatKind::Simple } },
                    string: "3.25",
                    line: 1,
                    column: 6,
                },
                Token {
                    kind: Literal { kind: LiteralKind::Float { kind: FloatKind::Scientific } },
                    string: "1e9",
                    line: 1,
                    column: 11,
                },
                Token {
                    kind: Literal { kind: LiteralKind::Float { kind: FloatKind::Scientific } },
                    string: "6.02E+23",
                    line: 1,
                    column: 15,
                },
                Token {
                    kind: Literal { kind: LiteralKind::Float { kind: FloatKind::Scientific } },
                    string: "7e-1",
                    line: 1,
                    column: 24,
                },
                Token::end(1, 28),
            ],
        );
    }

    #[test]
    fn number_suffixes_are_not_consumed() {
        check_lexing(
            source!("1.x 2e 3.e4"),
            vec![
                Token { kind: Literal { kind: LiteralKind::Integer }, string: "1", line: 1, column: 1 },
                Token { kind: Delimiter, string: ".", line: 1, column: 2 },
                Token { kind: Identifier, string: "x", line: 1, column: 3 },
                Token { kind: Literal { kind: LiteralKind::Integer }, string: "2", line: 1, column: 5 },
                Token { kind: Identifier, string: "e", line: 1, column: 6 },
                Token { kind: Literal { kind: LiteralKind::Integer }, string: "3", line: 1, column: 8 },
                Token { kind: Delimiter, string: ".", line: 1, column: 9 },
                Token { kind: Identifier, string: "e4", line: 1, column: 10 },
                Token::end(1, 12),
            ],
        );
    }

    #[test]
    fn operators_greedy() {
        check_lexing(
            source!("a<=b==c=>d->e<<f"),
            vec![
                Token { kind: Identifier, string: "a", line: 1, column: 1 },
                Token { kind: Operator, string: "<=", line: 1, column: 2 },
                Token { kind: Identifier, string: "b", line: 1, column: 4 },
                Token { kind: Operator, string: "==", line: 1, column: 5 },
                Token { kind: Identifier, string: "c", line: 1, column: 7 },
                Token { kind: Operator, string: "=>", line: 1, column: 8 },
                Token { kind: Identifier, string: "d", line: 1, column: 10 },
                Token { kind: Operator, string: "->", line: 1, column: 11 },
                Token { kind: Identifier, string: "e", line: 1, column: 13 },
                Token { kind: Operator, string: "<<", line: 1, column: 14 },
                Token { kind: Identifier, string: "f", line: 1, column: 16 },
                Token::end(1, 17),
            ],
        );

        check_lexing(
            source!("a::b:c"),
            vec![
                Token { kind: Identifier, string: "a", line: 1, column: 1 },
                Token { kind: Operator, string: "::", line: 1, column: 2 },
                Token { kind: Identifier, string: "b", line: 1, column: 4 },
                Token { kind: Delimiter, string: ":", line: 1, column: 5 },
                Token { kind: Identifier, string: "c", line: 1, column: 6 },
                Token::end(1, 7),
            ],
        );
    }

    #[test]
    fn delimiters() {
        check_lexing(
            source!("f(a, [b]);{#}"),
            vec![
                Token { kind: Identifier, string: "f", line: 1, column: 1 },
                Token { kind: Delimiter, string: "(", line: 1, column: 2 },
                Token { kind: Identifier, string: "a", line: 1, column: 3 },
                Token { kind: Delimiter, string: ",", line: 1, column: 4 },
                Token { kind: Delimiter, string: "[", line: 1, column: 6 },
                Token { kind: Identifier, string: "b", line: 1, column: 7 },
                Token { kind: Delimiter, string: "]", line: 1, column: 8 },
                Token { kind: Delimiter, string: ")", line: 1, column: 9 },
                Token { kind: Delimiter, string: ";", line: 1, column: 10 },
                Token { kind: Delimiter, string: "{", line: 1, column: 11 },
                Token { kind: Delimiter, string: "#", line: 1, column: 12 },
                Token { kind: Delimiter, string: "}", line: 1, column: 13 },
                Token::end(1, 14),
            ],
        );
    }

    #[test]
    fn strings() {
        check_lexing(
            source!(r#""abc" 'd' "" "\"q\"""#),
            vec![
                Token {
                    kind: Literal { kind: LiteralKind::String { has_escapes: false } },
                    string: "\"abc\"",
                    line: 1,
                    column: 1,
                },
                Token {
                    kind: Literal { kind: LiteralKind::String { has_escapes: false } },
                    string: "'d'",
                    line: 1,
                    column: 7,
                },
                Token {
                    kind: Literal { kind: LiteralKind::String { has_escapes: false } },
                    string: "\"\"",
                    line: 1,
                    column: 11,
                },
                Token {
                    kind: Literal { kind: LiteralKind::String { has_escapes: true } },
                    string: "\"\\\"q\\\"\"",
                    line: 1,
                    column: 14,
                },
                Token::end(1, 21),
            ],
        );

        // A quote of the other kind doesn't close the string.
        check_lexing(
            source!(r#""it's""#),
            vec![
                Token {
                    kind: Literal { kind: LiteralKind::String { has_escapes: false } },
                    string: "\"it's\"",
                    line: 1,
                    column: 1,
                },
                Token::end(1, 7),
            ],
        );
    }

    #[test]
    fn comments() {
        check_lexing(
            source!("a // b )\n/* c\n ( */ d"),
            vec![
                Token { kind: Identifier, string: "a", line: 1, column: 1 },
                Token { kind: Identifier, string: "d", line: 3, column: 7 },
                Token::end(3, 8),
            ],
        );

        // Block comments don't nest, the first closing marker ends the comment.
        check_lexing(
            source!("/* /* */ x */"),
            vec![
                Token { kind: Identifier, string: "x", line: 1, column: 10 },
                Token { kind: Operator, string: "*", line: 1, column: 12 },
                Token { kind: Operator, string: "/", line: 1, column: 13 },
                Token::end(1, 14),
            ],
        );
    }

    #[test]
    fn positions_across_lines() {
        check_lexing(
            source!("a\n  bb\r\n\tc"),
            vec![
                Token { kind: Identifier, string: "a", line: 1, column: 1 },
                Token { kind: Identifier, string: "bb", line: 2, column: 3 },
                Token { kind: Identifier, string: "c", line: 3, column: 2 },
                Token::end(3, 3),
            ],
        );
    }

    #[test]
    fn unrecognized_character() {
        let vocabulary = Vocabulary::default();
        let source = source!("x = 1 $ 2");
        let (buffer, diags) = TokenizedBuffer::tokenize_resilient(source, &vocabulary);
        let strings: Vec<&str> = buffer.tokens().iter().map(|t| t.string).collect();
        assert_eq!(strings, vec!["x", "=", "1", "2", ""]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind(), lexer_kind(LexerDiagnosticKind::UnrecognizedCharacter));
        assert_eq!(
            DiagnosticRecord::from(&diags[0]),
            DiagnosticRecord {
                message: "unrecognized character '$'".to_string(),
                line: Some(1),
                column: Some(7),
            }
        );
    }

    #[test]
    fn each_unrecognized_character_is_reported() {
        let vocabulary = Vocabulary::default();
        let source = source!("a$`\\b");
        let (buffer, diags) = TokenizedBuffer::tokenize_resilient(source, &vocabulary);
        let strings: Vec<&str> = buffer.tokens().iter().map(|t| t.string).collect();
        assert_eq!(strings, vec!["a", "b", ""]);
        let columns: Vec<i32> = diags.iter().map(|d| d.message.location.column_number).collect();
        assert_eq!(columns, vec![2, 3, 4]);
    }

    #[test]
    fn unterminated_string_stops_at_line_end() {
        let vocabulary = Vocabulary::default();
        let source = source!("a = \"open (\nb )");
        let (buffer, diags) = TokenizedBuffer::tokenize_resilient(source, &vocabulary);
        assert_eq!(
            buffer.tokens(),
            &vec![
                Token { kind: Identifier, string: "a", line: 1, column: 1 },
                Token { kind: Operator, string: "=", line: 1, column: 3 },
                Token { kind: Identifier, string: "b", line: 2, column: 1 },
                Token { kind: Delimiter, string: ")", line: 2, column: 3 },
                Token::end(2, 4),
            ]
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind(), lexer_kind(LexerDiagnosticKind::UnterminatedString));
        // Anchored at the opening quote.
        assert_eq!(diags[0].message.location.line_number, 1);
        assert_eq!(diags[0].message.location.column_number, 5);
        assert_eq!(diags[0].message.location.line, "a = \"open (");
    }

    #[test]
    fn unterminated_string_at_end_of_input() {
        let vocabulary = Vocabulary::default();
        let source = source!("'abc\\");
        let (buffer, diags) = TokenizedBuffer::tokenize_resilient(source, &vocabulary);
        assert_eq!(buffer.tokens(), &vec![Token::end(1, 6)]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message.location.column_number, 1);
    }

    #[test]
    fn unterminated_block_comment() {
        let vocabulary = Vocabulary::default();
        let source = source!("x\n  /* never\nclosed (");
        let (buffer, diags) = TokenizedBuffer::tokenize_resilient(source, &vocabulary);
        assert_eq!(
            buffer.tokens(),
            &vec![Token { kind: Identifier, string: "x", line: 1, column: 1 }, Token::end(3, 9)]
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind(), lexer_kind(LexerDiagnosticKind::UnterminatedComment));
        assert_eq!(diags[0].message.location.line_number, 2);
        assert_eq!(diags[0].message.location.column_number, 3);
        assert_eq!(diags[0].message.location.line, "  /* never");
    }

    #[test]
    fn multiline_strings() {
        let config = LanguageConfig { multiline_strings: true, ..LanguageConfig::default() };
        let vocabulary = Vocabulary::from_config(&config).unwrap();
        let source = source!("\"a\nb\" c");
        let (buffer, diags) = TokenizedBuffer::tokenize_resilient(source, &vocabulary);
        assert!(diags.is_empty());
        assert_eq!(
            buffer.tokens(),
            &vec![
                Token {
                    kind: Literal { kind: LiteralKind::String { has_escapes: false } },
                    string: "\"a\nb\"",
                    line: 1,
                    column: 1,
                },
                Token { kind: Identifier, string: "c", line: 2, column: 4 },
                Token::end(2, 5),
            ]
        );
    }

    #[test]
    fn custom_vocabulary() {
        let config: LanguageConfig = toml::from_str(
            r##"
            keywords = ["def", "end"]
            true_literal = "yes"
            false_literal = "no"
            operators = [":=", "+"]
            delimiters = ["(", ")", "$"]
            pairs = [{ open = "(", close = ")" }]
            line_comments = ["#"]
            block_comment = { open = "(*", close = "*)" }
            quotes = ["`"]
            "##,
        )
        .unwrap();
        let vocabulary = Vocabulary::from_config(&config).unwrap();
        let source = source!("def x := yes (* skip *) `s` $ # rest\nend");
        let (buffer, diags) = TokenizedBuffer::tokenize_resilient(source, &vocabulary);
        assert!(diags.is_empty());
        let kinds: Vec<_> = buffer.tokens().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                Keyword,
                Identifier,
                Operator,
                Literal { kind: LiteralKind::Boolean { value: true } },
                Literal { kind: LiteralKind::String { has_escapes: false } },
                Delimiter,
                Keyword,
                EndOfInput,
            ]
        );
    }

    #[test]
    fn strict_returns_partial_tokens() {
        let vocabulary = Vocabulary::default();
        let source = source!("x = 1 $ 2");
        let error = match TokenizedBuffer::tokenize_strict(source, &vocabulary) {
            Err(e) => e,
            Ok(_) => panic!("expected a lexical error"),
        };
        let strings: Vec<&str> = error.partial.iter().map(|t| t.string).collect();
        assert_eq!(strings, vec!["x", "=", "1"]);
        assert_eq!(error.diagnostic.message.location.column_number, 7);
        assert_eq!(error.diagnostic.message.location.line, "x = 1 $ 2");
        assert!(error.to_string().ends_with(":1:7: ERROR: unrecognized character '$'"));
    }

    #[test]
    fn strict_succeeds_on_clean_input() {
        let vocabulary = Vocabulary::default();
        let source = source!("f(a, b");
        let buffer = match TokenizedBuffer::tokenize_strict(source, &vocabulary) {
            Ok(buffer) => buffer,
            Err(e) => panic!("unexpected lexical error {}", e),
        };
        assert_eq!(buffer.tokens().len(), 6);
        assert!(buffer.tokens()[5].is_end());
    }

    #[test]
    fn strict_partial_is_prefix_of_resilient() {
        let vocabulary = Vocabulary::default();
        let inputs = [
            source!("a $ b"),
            source!("if (x) { \"open\n }"),
            source!("1 + /* open"),
            source!("$"),
            source!("ok(); @ ` ~"),
        ];
        for source in inputs {
            let mut diags = NullDiagnosticConsumer {};
            let resilient = TokenizedBuffer::tokenize(source, &vocabulary, &mut diags);
            match TokenizedBuffer::tokenize_strict(source, &vocabulary) {
                Err(e) => {
                    assert_eq!(&resilient.tokens()[..e.partial.len()], e.partial.as_slice());
                    assert!(e.partial.iter().all(|t| !t.is_end()));
                }
                Ok(strict) => assert_eq!(strict.tokens(), resilient.tokens()),
            }
        }
    }

    #[test]
    fn lines_are_recorded() {
        let vocabulary = Vocabulary::default();
        let mut diags = NullDiagnosticConsumer {};
        let source = source!("one\r\ntwo\n\nfour");
        let buffer = TokenizedBuffer::tokenize(source, &vocabulary, &mut diags);
        assert_eq!(buffer.line(1), Some("one"));
        assert_eq!(buffer.line(2), Some("two"));
        assert_eq!(buffer.line(3), Some(""));
        assert_eq!(buffer.line(4), Some("four"));
        assert_eq!(buffer.line(5), None);
        assert_eq!(buffer.line(0), None);
    }
}
