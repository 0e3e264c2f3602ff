//! Path resolution and argument parsing shared by the filesystem tools.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The invoking user's home directory, if one can be determined.
pub fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

/// Resolve a user-supplied path to an absolute location.
///
/// - `/...` is taken as already absolute.
/// - `~` and `~/...` expand to the home directory.
/// - anything else is joined onto `cwd`. This includes `~user/...` forms
///   and `~` when no home directory is known, e.g. `~foo/x` becomes
///   `cwd/~foo/x`.
///
/// `.` components are dropped from the result. No existence check is
/// performed.
pub fn resolve_path(path: &str, cwd: &Path) -> PathBuf {
    resolve_with_home(path, cwd, home_dir().as_deref())
}

fn resolve_with_home(path: &str, cwd: &Path, home: Option<&Path>) -> PathBuf {
    if path.starts_with('/') {
        return normalize(Path::new(path));
    }

    if path.starts_with('~') {
        let expanded = shellexpand::tilde_with_context(path, || {
            home.and_then(|h| h.to_str()).map(str::to_owned)
        });
        let candidate = Path::new(expanded.as_ref());
        if candidate.is_absolute() {
            return normalize(candidate);
        }
    }

    normalize(&cwd.join(path))
}

fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

#[derive(Debug, Deserialize)]
struct PathArguments {
    path: Option<String>,
}

/// Extract a trimmed, non-empty `path` from a raw argument payload.
///
/// Falls back to `default` when the payload is empty, not a JSON object with
/// a string `path`, or the path is blank.
pub(crate) fn path_argument(raw: &str, default: Option<&str>) -> Option<String> {
    let fallback = || default.map(str::to_owned);

    if raw.trim().is_empty() {
        return fallback();
    }

    match serde_json::from_str::<PathArguments>(raw) {
        Ok(PathArguments { path: Some(path) }) => {
            let trimmed = path.trim();
            if trimmed.is_empty() {
                fallback()
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => fallback(),
    }
}

/// Truncate to at most `max_chars` characters.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
