#![no_main]

use libfuzzer_sys::fuzz_target;

use quarry::toolchain::lexer::{TokenizedBuffer, Vocabulary};
use quarry::toolchain::source::SourceBuffer;

fuzz_target!(|data: &[u8]| {
    // Source buffers only ever hold valid utf-8.
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let source = SourceBuffer::new_from_string(s, "fuzz_targets/lex.rs");
    let vocabulary = Vocabulary::default();

    let (buffer, _) = TokenizedBuffer::tokenize_resilient(&source, &vocabulary);
    let tokens = buffer.tokens();
    assert_eq!(tokens.iter().filter(|t| t.is_end()).count(), 1);
    assert!(tokens.last().is_some_and(|t| t.is_end()));
    for pair in tokens.windows(2) {
        assert!(pair[0].line <= pair[1].line);
    }

    if let Err(e) = TokenizedBuffer::tokenize_strict(&source, &vocabulary) {
        assert_eq!(&tokens[..e.partial.len()], e.partial.as_slice());
    }
});
