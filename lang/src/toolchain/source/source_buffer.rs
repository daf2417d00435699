use std::fs::File;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("unable to open {file_name}: {source}")]
    Io { file_name: String, source: std::io::Error },

    #[error("unable to map {file_name}: {source}")]
    Map { file_name: String, source: mmap_rs::Error },

    #[error("{file_name} is not valid utf-8 (first bad byte at offset {offset})")]
    InvalidUtf8 { file_name: String, offset: usize },
}

enum SourceBufferKind<'a> {
    File { buffer: mmap_rs::Mmap },
    Memory { string: &'a str },
}

// Keeps source and a file name in the same object, so they provide the same lifetimes.
pub struct SourceBuffer<'a> {
    kind: SourceBufferKind<'a>,
    file_name: String,
}

impl<'a> SourceBuffer<'a> {
    /// Maps the file at `file_path` into memory. The contents must be valid utf-8.
    pub fn new_from_file(file_path: &std::path::Path) -> Result<SourceBuffer<'static>, SourceError> {
        let file_name = file_path.display().to_string();
        let io_error = |source| SourceError::Io { file_name: file_name.clone(), source };
        let file = File::open(file_path).map_err(io_error)?;
        let len = file.metadata().map_err(io_error)?.len();

        // Zero-length mappings are rejected by the OS.
        if len == 0 {
            return Ok(SourceBuffer { kind: SourceBufferKind::Memory { string: "" }, file_name });
        }

        let map_error = |source| SourceError::Map { file_name: file_name.clone(), source };
        let len = usize::try_from(len).map_err(|_| SourceError::Io {
            file_name: file_name.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "file too large to map"),
        })?;
        let buffer = unsafe {
            mmap_rs::MmapOptions::new(len).map_err(map_error)?.with_file(&file, 0).map()
        }
        .map_err(map_error)?;

        if let Err(e) = std::str::from_utf8(buffer.as_slice()) {
            return Err(SourceError::InvalidUtf8 { file_name, offset: e.valid_up_to() });
        }
        Ok(SourceBuffer { kind: SourceBufferKind::File { buffer }, file_name })
    }

    pub fn new_from_string(string: &'a str, name: &str) -> SourceBuffer<'a> {
        SourceBuffer { kind: SourceBufferKind::Memory { string }, file_name: String::from(name) }
    }

    pub fn code(&self) -> &'_ str {
        match &self.kind {
            SourceBufferKind::File { buffer } => {
                // Validated as utf-8 in new_from_file().
                unsafe { std::str::from_utf8_unchecked(buffer.as_slice()) }
            }
            SourceBufferKind::Memory { string } => string,
        }
    }

    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }
}
