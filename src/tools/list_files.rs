//! `list_files` — non-recursive directory listing.

use super::path::{path_argument, resolve_path};
use super::traits::{error_result, Tool};
use serde_json::json;
use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LIST_FILES: &str = "list_files";

/// Maximum number of entries shown before summarising the rest.
const ENTRY_LIMIT: usize = 200;
const DEFAULT_PATH: &str = ".";

/// Lists the immediate children of a directory.
#[derive(Debug, Clone)]
pub struct ListFiles {
    cwd: PathBuf,
}

#[derive(Debug)]
struct Entry {
    name: String,
    is_dir: bool,
    is_symlink: bool,
}

impl Entry {
    fn render(&self) -> String {
        let mut line = self.name.clone();
        if self.is_dir {
            line.push('/');
        }
        if self.is_symlink {
            line.push('@');
        }
        line
    }
}

impl ListFiles {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    fn list(&self, target: &Path) -> String {
        if !target.exists() {
            return error_result(format!("Path not found: {}", target.display()));
        }

        if !target.is_dir() {
            return format!("file {}", target.display());
        }

        let entries = match read_entries(target) {
            Ok(entries) => entries,
            Err(e) => {
                return error_result(format!(
                    "Could not list path {}. Error: {}",
                    target.display(),
                    e
                ))
            }
        };

        debug!("Listing {} entries in {}", entries.len(), target.display());

        let mut lines = vec![format!("directory {}", target.display())];
        if entries.is_empty() {
            lines.push("<empty>".into());
            return lines.join("\n");
        }

        lines.extend(entries.iter().take(ENTRY_LIMIT).map(Entry::render));
        if entries.len() > ENTRY_LIMIT {
            lines.push(format!("… {} more", entries.len() - ENTRY_LIMIT));
        }

        lines.join("\n")
    }
}

fn read_entries(dir: &Path) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        // file_type does not follow symlinks, so links to directories keep the `@` marker only.
        let file_type = entry.file_type()?;
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: file_type.is_dir(),
            is_symlink: file_type.is_symlink(),
        });
    }
    entries.sort_by(|a, b| compare_names(&a.name, &b.name));
    Ok(entries)
}

/// Case-insensitive first, then case-sensitive to keep the order total.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl Tool for ListFiles {
    fn name(&self) -> &str {
        LIST_FILES
    }

    fn description(&self) -> &str {
        "List files and directories at a given relative path. \
         Use this when you need to inspect the project structure. \
         Defaults to the current working directory when no path is supplied."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Directory to list. Defaults to the current directory."
                }
            }
        })
    }

    fn execute(&self, raw_arguments: &str) -> String {
        let path = path_argument(raw_arguments, Some(DEFAULT_PATH))
            .unwrap_or_else(|| DEFAULT_PATH.to_string());
        self.list(&resolve_path(&path, &self.cwd))
    }
}
