//! `edit_file` — create a file, or replace one unique occurrence of text in it.
//!
//! An existing file is only changed when `old_str` matches exactly once, so
//! an ambiguous anchor can never produce a multi-site edit.

use super::path::{resolve_path, truncate_chars};
use super::traits::{error_result, Tool};
use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const EDIT_FILE: &str = "edit_file";

/// The post-edit content echoed back to the model is capped at this many characters.
const CONTENT_PREVIEW_LIMIT: usize = 100_000;

const INVALID_ARGUMENTS: &str = "Invalid JSON arguments for edit_file. \
     Expected: {\"path\": \"...\", \"old_str\": \"...\", \"new_str\": \"...\"}";

#[derive(Debug, Deserialize)]
struct EditArguments {
    path: String,
    old_str: String,
    new_str: String,
}

/// Creates or edits text files by unique string replacement.
#[derive(Debug, Clone)]
pub struct EditFile {
    cwd: PathBuf,
}

impl EditFile {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    fn process(&self, args: &EditArguments) -> String {
        let path = args.path.trim();
        if path.is_empty() {
            return error_result("Path must not be empty.");
        }

        if args.old_str == args.new_str {
            return error_result("old_str and new_str must be different.");
        }

        let target = resolve_path(path, &self.cwd);
        if target.exists() {
            update_existing(args, &target, path)
        } else {
            create_new(args, &target, path)
        }
    }
}

fn create_new(args: &EditArguments, target: &Path, path: &str) -> String {
    if !args.old_str.is_empty() {
        return error_result("File does not exist. Use an empty old_str to create a new file.");
    }

    let written = target
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| fs::write(target, &args.new_str));

    match written {
        Ok(()) => {
            info!("Created file {}", target.display());
            success_message("created", path, &args.new_str)
        }
        Err(e) => error_result(format!(
            "Could not create file at path: {}. Error: {}",
            path, e
        )),
    }
}

fn update_existing(args: &EditArguments, target: &Path, path: &str) -> String {
    if args.old_str.is_empty() {
        return error_result("old_str must not be empty when editing an existing file.");
    }

    let original = match fs::read_to_string(target) {
        Ok(content) => content,
        Err(e) => return edit_failure(path, e),
    };

    match original.matches(args.old_str.as_str()).count() {
        0 => error_result(format!("old_str not found in {}.", path)),
        1 => {
            let updated = original.replacen(args.old_str.as_str(), &args.new_str, 1);
            // fs::write truncates in place: symlinks are followed and the mode is kept.
            if let Err(e) = fs::write(target, &updated) {
                return edit_failure(path, e);
            }
            info!("Updated file {}", target.display());
            success_message("updated", path, &updated)
        }
        n => {
            debug!("Ambiguous edit of {}: {} matches", target.display(), n);
            error_result(format!(
                "old_str must match exactly one occurrence. Found {}.",
                n
            ))
        }
    }
}

fn edit_failure(path: &str, e: io::Error) -> String {
    error_result(format!(
        "Could not edit file at path: {}. Error: {}",
        path, e
    ))
}

fn success_message(verb: &str, path: &str, content: &str) -> String {
    format!(
        "{} file {}\n{}",
        verb,
        path,
        truncate_chars(content, CONTENT_PREVIEW_LIMIT)
    )
}

impl Tool for EditFile {
    fn name(&self) -> &str {
        EDIT_FILE
    }

    fn description(&self) -> &str {
        "Make edits to a text file by replacing an exact match of `old_str` with `new_str`. \
         The replacement must be unique and `old_str` must differ from `new_str`. \
         Creates the file when it does not exist and `old_str` is empty."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path of the file to edit or create"
                },
                "old_str": {
                    "type": "string",
                    "description": "Exact text to replace. Must occur exactly once; empty to create a new file"
                },
                "new_str": {
                    "type": "string",
                    "description": "Replacement text, or the full content of a new file"
                }
            },
            "required": ["path", "old_str", "new_str"]
        })
    }

    fn execute(&self, raw_arguments: &str) -> String {
        match serde_json::from_str::<EditArguments>(raw_arguments) {
            Ok(args) => self.process(&args),
            Err(_) => error_result(INVALID_ARGUMENTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn args(path: &str, old_str: &str, new_str: &str) -> String {
        json!({ "path": path, "old_str": old_str, "new_str": new_str }).to_string()
    }

    #[test]
    fn creates_missing_file_and_parents() {
        let dir = TempDir::new().unwrap();
        let tool = EditFile::new(dir.path());

        let out = tool.execute(&args("nested/deep/new.txt", "", "fresh\ncontent"));
        assert_eq!(out, "created file nested/deep/new.txt\nfresh\ncontent");
        assert_eq!(
            fs::read_to_string(dir.path().join("nested/deep/new.txt")).unwrap(),
            "fresh\ncontent"
        );
    }

    #[test]
    fn create_requires_empty_old_str() {
        let dir = TempDir::new().unwrap();
        let out = EditFile::new(dir.path()).execute(&args("new.txt", "x", "y"));
        assert_eq!(
            out,
            "<error> File does not exist. Use an empty old_str to create a new file."
        );
        assert!(!dir.path().join("new.txt").exists());
    }

    #[test]
    fn replaces_single_occurrence() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("main.rs");
        fs::write(&file, "fn main() {\n    println!(\"hi\");\n}\n").unwrap();

        let out = EditFile::new(dir.path()).execute(&args("main.rs", "\"hi\"", "\"hello\""));
        let expected = "fn main() {\n    println!(\"hello\");\n}\n";
        assert_eq!(out, format!("updated file main.rs\n{}", expected));
        assert_eq!(fs::read_to_string(&file).unwrap(), expected);
    }

    #[test]
    fn rejects_ambiguous_match_without_touching_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("dup.txt");
        fs::write(&file, "foo bar foo baz foo").unwrap();

        let out = EditFile::new(dir.path()).execute(&args("dup.txt", "foo", "qux"));
        assert_eq!(out, "<error> old_str must match exactly one occurrence. Found 3.");
        assert_eq!(fs::read_to_string(&file).unwrap(), "foo bar foo baz foo");
    }

    #[test]
    fn rejects_missing_match_without_touching_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "alpha").unwrap();

        let out = EditFile::new(dir.path()).execute(&args("a.txt", "beta", "gamma"));
        assert_eq!(out, "<error> old_str not found in a.txt.");
        assert_eq!(fs::read_to_string(&file).unwrap(), "alpha");
    }

    #[test]
    fn overlapping_text_counts_non_overlapping_matches() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("o.txt");
        fs::write(&file, "aaa").unwrap();

        let out = EditFile::new(dir.path()).execute(&args("o.txt", "aa", "b"));
        assert_eq!(out, "updated file o.txt\nba");
    }

    #[test]
    fn existing_file_needs_non_empty_old_str() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha").unwrap();

        let out = EditFile::new(dir.path()).execute(&args("a.txt", "", "beta"));
        assert_eq!(
            out,
            "<error> old_str must not be empty when editing an existing file."
        );
    }

    #[test]
    fn validates_arguments_before_touching_disk() {
        let dir = TempDir::new().unwrap();
        let tool = EditFile::new(dir.path());

        assert_eq!(
            tool.execute(&args("   ", "", "x")),
            "<error> Path must not be empty."
        );
        assert_eq!(
            tool.execute(&args("same.txt", "x", "x")),
            "<error> old_str and new_str must be different."
        );
        assert!(tool
            .execute(r#"{"path": "a.txt", "old_str": ""}"#)
            .starts_with("<error> Invalid JSON arguments for edit_file."));
        assert!(tool.execute("garbage").starts_with("<error> Invalid JSON"));
    }

    #[cfg(unix)]
    #[test]
    fn edits_through_symlink_reach_the_target() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("real.txt"), "alpha beta").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link.txt"))
            .unwrap();

        let out = EditFile::new(dir.path()).execute(&args("link.txt", "beta", "gamma"));
        assert_eq!(out, "updated file link.txt\nalpha gamma");
        assert_eq!(
            fs::read_to_string(dir.path().join("real.txt")).unwrap(),
            "alpha gamma"
        );
        assert!(fs::symlink_metadata(dir.path().join("link.txt"))
            .unwrap()
            .file_type()
            .is_symlink());
    }

    #[cfg(unix)]
    #[test]
    fn edits_keep_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let script = dir.path().join("run.sh");
        fs::write(&script, "#!/bin/sh\necho old\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let out = EditFile::new(dir.path()).execute(&args("run.sh", "old", "new"));
        assert!(out.starts_with("updated file run.sh"), "unexpected result: {out}");
        let mode = fs::metadata(&script).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755);
    }

    #[test]
    fn preview_is_truncated() {
        let dir = TempDir::new().unwrap();
        let content = "é".repeat(CONTENT_PREVIEW_LIMIT + 10);

        let out = EditFile::new(dir.path()).execute(&args("big.txt", "", &content));
        let preview = out.strip_prefix("created file big.txt\n").unwrap();
        assert_eq!(preview.chars().count(), CONTENT_PREVIEW_LIMIT);
        assert_eq!(
            fs::read_to_string(dir.path().join("big.txt")).unwrap(),
            content
        );
    }
}
