use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::io::{self, Read};

/// Source name that selects standard input instead of a file.
pub const STDIN_SOURCE: &str = "-";

/// A trait that defines how raw filter-list text is obtained.
///
/// The converter itself only ever sees a string; importers are the edge
/// where bytes come in from files, pipes or anything else.
pub trait ListImporter {
    /// Reads the whole filter list named by `source`.
    ///
    /// # Arguments
    /// * `source`: A file path, or `-` for standard input.
    ///
    /// # Returns
    /// The list text. Invalid UTF-8 is replaced rather than rejected, so a
    /// damaged list still converts as far as it can.
    fn import_list(&mut self, source: &str) -> Result<String>;
}

/// Reads filter lists from the filesystem or from standard input.
pub struct FileImporter;

impl ListImporter for FileImporter {
    fn import_list(&mut self, source: &str) -> Result<String> {
        let bytes = if source == STDIN_SOURCE {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read filter list from stdin")?;
            buffer
        } else {
            fs::read(source).with_context(|| format!("Failed to read filter list {source}"))?
        };

        Ok(decode_list(source, bytes))
    }
}

impl FileImporter {
    pub fn new() -> Self {
        Self
    }
}

/// Decodes list bytes, replacing invalid UTF-8 sequences with U+FFFD.
pub fn decode_list(source: &str, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!("{source} is not valid UTF-8; invalid sequences were replaced");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_import_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filter.txt");
        fs::write(&path, "! list\n||example.com^\n").unwrap();

        let text = FileImporter::new()
            .import_list(path.to_str().unwrap())
            .unwrap();
        assert_eq!(text, "! list\n||example.com^\n");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = FileImporter::new()
            .import_list(path.to_str().unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read filter list"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let text = decode_list("bytes", b"||ok.com^\n||b\xffad^\n".to_vec());
        assert_eq!(text, "||ok.com^\n||b\u{fffd}ad^\n");
    }
}
