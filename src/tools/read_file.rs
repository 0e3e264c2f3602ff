//! `read_file` — return the text content of a file.

use super::path::{path_argument, resolve_path};
use super::traits::{error_result, Tool};
use serde_json::json;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const READ_FILE: &str = "read_file";

/// Reads are capped to this many bytes so one file cannot flood the context.
pub const READ_LIMIT_BYTES: u64 = 100_000;

/// Reads a UTF-8 text file.
#[derive(Debug, Clone)]
pub struct ReadFile {
    cwd: PathBuf,
}

impl ReadFile {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }
}

fn read_capped(path: &Path) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    File::open(path)?
        .take(READ_LIMIT_BYTES)
        .read_to_end(&mut bytes)?;
    Ok(bytes)
}

impl Tool for ReadFile {
    fn name(&self) -> &str {
        READ_FILE
    }

    fn description(&self) -> &str {
        "Read the contents of a given relative file path. \
         Use this when you want to see what's inside a file. \
         Do not use this with directory names."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path of the file to read"
                }
            },
            "required": ["path"]
        })
    }

    fn execute(&self, raw_arguments: &str) -> String {
        let Some(path) = path_argument(raw_arguments, None) else {
            return error_result(
                "Invalid JSON arguments for read_file. Expected: {\"path\": \"...\"}",
            );
        };

        let bytes = match read_capped(&resolve_path(&path, &self.cwd)) {
            Ok(bytes) => bytes,
            Err(e) => {
                return error_result(format!(
                    "Could not read file at path: {}. Error: {}",
                    path, e
                ))
            }
        };

        debug!("Read {} bytes from {}", bytes.len(), path);

        match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => error_result("File is not valid UTF-8 or is binary."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn returns_file_content_verbatim() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hello.txt"), "hello\nworld\n").unwrap();

        let out = ReadFile::new(dir.path()).execute(r#"{"path": "hello.txt"}"#);
        assert_eq!(out, "hello\nworld\n");
    }

    #[test]
    fn large_files_are_capped() {
        let dir = TempDir::new().unwrap();
        let content = "abcdefghij".repeat(15_000);
        fs::write(dir.path().join("big.txt"), &content).unwrap();

        let out = ReadFile::new(dir.path()).execute(r#"{"path": "big.txt"}"#);
        assert_eq!(out.len(), READ_LIMIT_BYTES as usize);
        assert_eq!(out, &content[..READ_LIMIT_BYTES as usize]);
    }

    #[test]
    fn cap_inside_multibyte_char_is_not_utf8() {
        let dir = TempDir::new().unwrap();
        // 'é' is two bytes and occupies bytes 99_999..100_001.
        let content = format!("{}é tail", "a".repeat(READ_LIMIT_BYTES as usize - 1));
        fs::write(dir.path().join("split.txt"), &content).unwrap();

        let out = ReadFile::new(dir.path()).execute(r#"{"path": "split.txt"}"#);
        assert_eq!(out, "<error> File is not valid UTF-8 or is binary.");
    }

    #[test]
    fn binary_content_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("blob.bin"), [0xff, 0xfe, 0x00, 0x81]).unwrap();

        let out = ReadFile::new(dir.path()).execute(r#"{"path": "blob.bin"}"#);
        assert_eq!(out, "<error> File is not valid UTF-8 or is binary.");
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let out = ReadFile::new(dir.path()).execute(r#"{"path": "absent.txt"}"#);
        assert!(
            out.starts_with("<error> Could not read file at path: absent.txt. Error: "),
            "unexpected result: {out}"
        );
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        let dir = TempDir::new().unwrap();
        let tool = ReadFile::new(dir.path());
        let expected = "<error> Invalid JSON arguments for read_file. Expected: {\"path\": \"...\"}";
        assert_eq!(tool.execute("{oops"), expected);
        assert_eq!(tool.execute("{}"), expected);
        assert_eq!(tool.execute(r#"{"path": "  "}"#), expected);
    }
}
