pub mod source_buffer;

pub use source_buffer::SourceBuffer;
pub use source_buffer::SourceError;

/// Builds an in-memory [SourceBuffer] named after the macro call site, for tests.
#[macro_export]
macro_rules! source {
    ( $s:literal ) => {
        &$crate::toolchain::source::SourceBuffer::new_from_string(
            $s,
            $crate::const_format::formatcp!("{}:{}:{}", file!(), line!(), column!()),
        )
    };
}
