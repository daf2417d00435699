#![no_main]

use libfuzzer_sys::fuzz_target;

use quarry::toolchain::lexer::{TokenizedBuffer, Vocabulary};
use quarry::toolchain::source::SourceBuffer;
use quarry::toolchain::validator;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let source = SourceBuffer::new_from_string(s, "fuzz_targets/validate.rs");
    let vocabulary = Vocabulary::default();

    let (buffer, _) = TokenizedBuffer::tokenize_resilient(&source, &vocabulary);
    let result = validator::validate(buffer.tokens(), &vocabulary);
    assert_eq!(result.ok, result.issues.is_empty());
    for issue in &result.issues {
        assert!(issue.token_index < buffer.tokens().len());
    }
});
